//! Scoped access to the theme runtime
//!
//! Views that cannot be handed a [`ThemeState`] directly look it up with
//! [`use_theme`], which finds the innermost [`ThemeProvider`] mounted on the
//! current thread. Asking with no provider mounted is a programming error and
//! fails loudly instead of returning a default scheme.

use std::cell::RefCell;
use std::marker::PhantomData;

use crate::error::{Result, ThemeError};
use crate::state::ThemeState;

thread_local! {
    static PROVIDERS: RefCell<Vec<ThemeState>> = const { RefCell::new(Vec::new()) };
}

/// Mount guard for a [`ThemeState`]
///
/// Mounting hydrates the state; dropping the guard unmounts it. Providers
/// nest, and the most recently mounted one wins.
pub struct ThemeProvider {
    state: ThemeState,
    // Scope is per thread, so the guard must stay on the mounting thread
    _not_send: PhantomData<*const ()>,
}

impl ThemeProvider {
    pub fn mount(state: ThemeState) -> Self {
        state.hydrate();
        PROVIDERS.with(|providers| providers.borrow_mut().push(state.clone()));
        tracing::debug!(scheme = %state.scheme(), "ThemeProvider mounted");
        Self {
            state,
            _not_send: PhantomData,
        }
    }

    pub fn state(&self) -> &ThemeState {
        &self.state
    }
}

impl Drop for ThemeProvider {
    fn drop(&mut self) {
        PROVIDERS.with(|providers| {
            let mut providers = providers.borrow_mut();
            if let Some(pos) = providers.iter().rposition(|s| s.ptr_eq(&self.state)) {
                providers.remove(pos);
            }
        });
    }
}

/// The innermost mounted theme state
pub fn use_theme() -> Result<ThemeState> {
    PROVIDERS
        .with(|providers| providers.borrow().last().cloned())
        .ok_or(ThemeError::OutsideProvider)
}
