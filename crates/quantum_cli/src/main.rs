//! Quantum theme CLI
//!
//! Generates the CSS variable stylesheet, resolved variable maps, theme
//! descriptors and the pre-hydration script from a semantic token table.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quantum_theme::{
    build_theme, check_tokens, init_script, render_stylesheet, resolve, resolve_all,
    resolve_scheme, Breakpoint, ColorScheme, SemanticTokens, Severity, TokenTree,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{QuantumConfig, CONFIG_FILE};

#[derive(Parser)]
#[command(name = "quantum")]
#[command(author, version, about = "Quantum theme token tooling", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory or file holding quantum.toml
    #[arg(short, long, global = true, default_value = ".")]
    config: PathBuf,

    /// Token tree (JSON or TOML) to use instead of the configured one
    #[arg(long, global = true)]
    tokens: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the CSS variable stylesheet
    Css {
        /// Output file (defaults to output.css from quantum.toml, else stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print resolved variable maps as JSON
    Vars {
        #[arg(short, long, value_parser = parse_scheme)]
        scheme: Option<ColorScheme>,

        /// Requires --scheme
        #[arg(short, long, value_parser = parse_breakpoint, requires = "scheme")]
        breakpoint: Option<Breakpoint>,
    },

    /// Print the theme descriptor as JSON
    Theme {
        #[arg(short, long, value_parser = parse_scheme, default_value = "light")]
        scheme: ColorScheme,
    },

    /// Print the blocking init script for the document head
    Script,

    /// Report token authoring defects
    Check,

    /// Write a starter quantum.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn parse_scheme(value: &str) -> std::result::Result<ColorScheme, String> {
    value.parse()
}

fn parse_breakpoint(value: &str) -> std::result::Result<Breakpoint, String> {
    Breakpoint::parse(value)
        .ok_or_else(|| format!("unknown breakpoint `{value}`, expected mobile, tablet or desktop"))
}

/// Resolved config plus the token table it points at
struct Project {
    config: QuantumConfig,
    tokens: SemanticTokens,
}

impl Project {
    fn load(config_dir: &Path, tokens_override: Option<&Path>) -> Result<Self> {
        let config = QuantumConfig::load_or_default(config_dir)?;
        let tokens = load_tokens(tokens_override.or(config.tokens.path.as_deref()))?;
        Ok(Self { config, tokens })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let project = || Project::load(&cli.config, cli.tokens.as_deref());

    match cli.command {
        Commands::Css { out } => cmd_css(&project()?, out.as_deref()),
        Commands::Vars { scheme, breakpoint } => cmd_vars(&project()?, scheme, breakpoint),
        Commands::Theme { scheme } => {
            let project = project()?;
            print_json(&project.config, &build_theme(&project.tokens, scheme))
        }
        Commands::Script => {
            let project = project()?;
            println!("{}", init_script(&project.config.init_script_options()));
            Ok(())
        }
        Commands::Check => cmd_check(&project()?.tokens),
        Commands::Init { force } => cmd_init(&cli.config, force),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_tokens(path: Option<&Path>) -> Result<SemanticTokens> {
    match path {
        Some(path) => {
            info!("Loading tokens from {}", path.display());
            let tree = TokenTree::load(path)
                .with_context(|| format!("Failed to load tokens from {}", path.display()))?;
            Ok(SemanticTokens::from_tree(tree))
        }
        None => Ok(SemanticTokens::quantum()),
    }
}

fn cmd_css(project: &Project, out: Option<&Path>) -> Result<()> {
    let Project { config, tokens } = project;
    let css = render_stylesheet(&resolve_all(&tokens.tree), &config.stylesheet_options());

    match out.or(config.output.css.as_deref()) {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(path, css).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => print!("{css}"),
    }
    Ok(())
}

fn cmd_vars(
    project: &Project,
    scheme: Option<ColorScheme>,
    breakpoint: Option<Breakpoint>,
) -> Result<()> {
    let Project { config, tokens } = project;
    match (scheme, breakpoint) {
        (Some(scheme), Some(breakpoint)) => {
            print_json(config, &resolve(&tokens.tree, scheme, breakpoint))
        }
        (Some(scheme), None) => print_json(config, &resolve_scheme(&tokens.tree, scheme)),
        (None, _) => print_json(config, &resolve_all(&tokens.tree)),
    }
}

fn cmd_check(tokens: &SemanticTokens) -> Result<()> {
    let diagnostics = check_tokens(tokens);
    for diagnostic in &diagnostics {
        println!("{diagnostic}");
    }

    let errors = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    if errors > 0 {
        anyhow::bail!("{errors} error(s) in token table");
    }

    info!("{} warning(s), no errors", diagnostics.len());
    Ok(())
}

fn cmd_init(dir: &Path, force: bool) -> Result<()> {
    let path = if dir.extension().is_some_and(|ext| ext == "toml") {
        dir.to_path_buf()
    } else {
        dir.join(CONFIG_FILE)
    };

    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, QuantumConfig::new().to_toml()?)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Created {}", path.display());
    Ok(())
}

fn print_json<T: Serialize>(config: &QuantumConfig, value: &T) -> Result<()> {
    let json = match config.output.pretty_json {
        true => serde_json::to_string_pretty(value),
        false => serde_json::to_string(value),
    }
    .context("Failed to serialize output")?;

    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cli_parses_vars_filters() {
        let cli =
            Cli::try_parse_from(["quantum", "vars", "--scheme", "dark", "-b", "tablet"]).unwrap();
        match cli.command {
            Commands::Vars { scheme, breakpoint } => {
                assert_eq!(scheme, Some(ColorScheme::Dark));
                assert_eq!(breakpoint, Some(Breakpoint::Tablet));
            }
            _ => panic!("expected vars"),
        }
    }

    #[test]
    fn cli_rejects_unknown_scheme() {
        assert!(Cli::try_parse_from(["quantum", "theme", "--scheme", "blue"]).is_err());
        assert!(Cli::try_parse_from(["quantum", "vars", "-b", "desktop"]).is_err());
    }

    #[test]
    fn token_file_overrides_builtin_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        fs::write(&path, r#"{ "gap": { "kind": "scalar", "value": "4px" } }"#).unwrap();

        let tokens = load_tokens(Some(&path)).unwrap();
        assert_eq!(tokens.tree.len(), 1);
        assert!(load_tokens(Some(&dir.path().join("missing.json"))).is_err());
    }

    #[test]
    fn css_writes_configured_output() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("dist/quantum.css");

        let project = Project {
            config: QuantumConfig::default(),
            tokens: SemanticTokens::quantum(),
        };
        cmd_css(&project, Some(&out)).unwrap();

        let css = fs::read_to_string(&out).unwrap();
        assert!(css.starts_with(":root,\n[data-theme=\"light\"] {"));
        assert!(css.contains("--quantum-colors-action-primaryRGB: 0, 102, 204;"));
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        cmd_init(dir.path(), false).unwrap();
        assert!(cmd_init(dir.path(), false).is_err());
        cmd_init(dir.path(), true).unwrap();

        let config = QuantumConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.runtime.storage_key, "quantum-theme");
    }

    #[test]
    fn check_passes_on_builtin_table() {
        cmd_check(&SemanticTokens::quantum()).unwrap();
    }
}
