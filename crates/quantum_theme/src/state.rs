//! Theme runtime state
//!
//! [`ThemeState`] owns the active color scheme. It is seeded once from the
//! persisted preference or the root attribute (hydration) and afterwards
//! changes only through [`ThemeState::toggle`] and
//! [`ThemeState::set_scheme`], which write through to storage and the root
//! attribute before returning.
//!
//! Storage failures never escape: they are logged and the in-memory scheme
//! stays authoritative for the session.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::storage::{PreferenceStore, RootAttribute};
use crate::theme::ColorScheme;

/// Storage key used when none is given
pub const DEFAULT_STORAGE_KEY: &str = "quantum-theme";

/// Observable runtime state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThemeRuntimeState {
    pub color_scheme: ColorScheme,
    pub is_hydrated: bool,
}

type Listener = Arc<dyn Fn(ColorScheme) + Send + Sync>;

struct Inner {
    store: Box<dyn PreferenceStore>,
    attribute: Box<dyn RootAttribute>,
    storage_key: String,
    state: RwLock<ThemeRuntimeState>,
    listeners: RwLock<FxHashMap<u64, Listener>>,
    next_listener: AtomicU64,
}

/// Shared handle to the theme runtime
///
/// Cloning is cheap; all clones observe the same state.
#[derive(Clone)]
pub struct ThemeState {
    inner: Arc<Inner>,
}

impl ThemeState {
    /// Create an un-hydrated state using [`DEFAULT_STORAGE_KEY`]
    pub fn new(store: impl PreferenceStore + 'static, attribute: impl RootAttribute + 'static) -> Self {
        Self::with_storage_key(store, attribute, DEFAULT_STORAGE_KEY)
    }

    pub fn with_storage_key(
        store: impl PreferenceStore + 'static,
        attribute: impl RootAttribute + 'static,
        storage_key: impl Into<String>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                store: Box::new(store),
                attribute: Box::new(attribute),
                storage_key: storage_key.into(),
                state: RwLock::new(ThemeRuntimeState::default()),
                listeners: RwLock::new(FxHashMap::default()),
                next_listener: AtomicU64::new(0),
            }),
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.inner.storage_key
    }

    pub fn snapshot(&self) -> ThemeRuntimeState {
        *self.inner.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current color scheme
    pub fn scheme(&self) -> ColorScheme {
        self.snapshot().color_scheme
    }

    pub fn is_hydrated(&self) -> bool {
        self.snapshot().is_hydrated
    }

    /// Settle the scheme from the environment, once
    ///
    /// Priority: persisted preference, then the root attribute, then
    /// [`ColorScheme::Light`]. Values other than `light`/`dark` are treated
    /// as absent. Later calls return the current scheme untouched.
    pub fn hydrate(&self) -> ColorScheme {
        if let Some(scheme) = self.hydrated_scheme() {
            return scheme;
        }

        let scheme = self
            .persisted_scheme()
            .or_else(|| self.attribute_scheme())
            .unwrap_or_default();

        {
            let mut state = self.inner.state.write().unwrap_or_else(PoisonError::into_inner);
            if state.is_hydrated {
                return state.color_scheme;
            }
            *state = ThemeRuntimeState {
                color_scheme: scheme,
                is_hydrated: true,
            };
        }

        if self.inner.attribute.get().as_deref() != Some(scheme.as_str()) {
            self.inner.attribute.set(scheme.as_str());
        }

        debug!(scheme = %scheme, "ThemeState hydrated");
        scheme
    }

    fn hydrated_scheme(&self) -> Option<ColorScheme> {
        let state = self.snapshot();
        state.is_hydrated.then_some(state.color_scheme)
    }

    fn persisted_scheme(&self) -> Option<ColorScheme> {
        match self.inner.store.load(&self.inner.storage_key) {
            Ok(Some(value)) => {
                let scheme = ColorScheme::parse(&value);
                if scheme.is_none() {
                    debug!(value = %value, "ignoring invalid persisted color scheme");
                }
                scheme
            }
            Ok(None) => None,
            Err(err) => {
                warn!(error = %err, "could not read persisted color scheme");
                None
            }
        }
    }

    fn attribute_scheme(&self) -> Option<ColorScheme> {
        self.inner
            .attribute
            .get()
            .and_then(|value| ColorScheme::parse(&value))
    }

    /// Flip between light and dark; returns the new scheme
    ///
    /// The flip happens under the state lock, so concurrent toggles from
    /// cloned handles never collapse into one.
    pub fn toggle(&self) -> ColorScheme {
        self.update_scheme(ColorScheme::toggle)
    }

    /// Switch to `scheme`, persisting it and updating the root attribute
    ///
    /// Writes happen on every call, even when the scheme is unchanged;
    /// listeners are only notified on an actual change.
    pub fn set_scheme(&self, scheme: ColorScheme) {
        self.update_scheme(|_| scheme);
    }

    fn update_scheme(&self, next: impl FnOnce(ColorScheme) -> ColorScheme) -> ColorScheme {
        let (previous, scheme) = {
            let mut state = self.inner.state.write().unwrap_or_else(PoisonError::into_inner);
            let previous = state.color_scheme;
            let scheme = next(previous);
            *state = ThemeRuntimeState {
                color_scheme: scheme,
                is_hydrated: true,
            };
            (previous, scheme)
        };

        if previous != scheme {
            debug!("ThemeState::set_scheme - switching from {:?} to {:?}", previous, scheme);
        }

        if let Err(err) = self.inner.store.save(&self.inner.storage_key, scheme.as_str()) {
            warn!(
                error = %err,
                scheme = %scheme,
                "could not persist color scheme; keeping it for this session only"
            );
        }
        self.inner.attribute.set(scheme.as_str());

        if previous != scheme {
            self.notify(scheme);
        }
        scheme
    }

    /// Call `listener` after every scheme change until the returned
    /// [`Subscription`] is dropped
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe(&self, listener: impl Fn(ColorScheme) + Send + Sync + 'static) -> Subscription {
        let id = self.inner.next_listener.fetch_add(1, Ordering::Relaxed);
        self.inner
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::new(listener));

        Subscription {
            state: Arc::downgrade(&self.inner),
            id,
        }
    }

    fn notify(&self, scheme: ColorScheme) {
        // Snapshot so listeners may subscribe or unsubscribe re-entrantly
        let mut listeners: Vec<(u64, Listener)> = self
            .inner
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(id, listener)| (*id, Arc::clone(listener)))
            .collect();
        listeners.sort_by_key(|(id, _)| *id);

        for (_, listener) in listeners {
            listener(scheme);
        }
    }

    pub(crate) fn ptr_eq(&self, other: &ThemeState) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for ThemeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeState")
            .field("storage_key", &self.inner.storage_key)
            .field("state", &self.snapshot())
            .finish_non_exhaustive()
    }
}

/// Listener registration returned by [`ThemeState::subscribe`]
pub struct Subscription {
    state: Weak<Inner>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.state.upgrade() {
            inner
                .listeners
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&self.id);
        }
    }
}
