//! Change handlers that can live in configuration and listener lists.
//!
//! Closures are neither `Clone` nor comparable, yet [`SliderConfig`] must be
//! both and a [`CallbackRegistry`] hands the same handler to every slider
//! naming it. [`Callback`] wraps the closure in an `Arc` so copies are cheap
//! and equality means "the same registered handler".
//!
//! [`SliderConfig`]: crate::SliderConfig
//! [`CallbackRegistry`]: crate::CallbackRegistry

use std::{fmt, sync::Arc};

/// A shared `Fn(T) -> R` handler.
///
/// Two handles are equal only when one was cloned from the other.
pub struct Callback<T, R = ()> {
    handler: Arc<dyn Fn(T) -> R + Send + Sync>,
}

impl<T, R> Callback<T, R> {
    /// Wraps `handler`.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Runs the handler.
    pub fn call(&self, value: T) -> R {
        (self.handler)(value)
    }
}

impl<T, R, F> From<F> for Callback<T, R>
where
    F: Fn(T) -> R + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        Self::new(handler)
    }
}

impl<T, R> Clone for Callback<T, R> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<T, R> PartialEq for Callback<T, R> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }
}

impl<T, R> Eq for Callback<T, R> {}

impl<T, R> fmt::Debug for Callback<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("handles", &Arc::strong_count(&self.handler))
            .finish_non_exhaustive()
    }
}
