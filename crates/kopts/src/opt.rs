//! Deferred mutations which are applied to an object during or after its construction.
use std::{any::type_name, fmt};

use tracing::trace;

/// A deferred mutation of a `T`, usually changing exactly one field or appending to exactly one
/// collection.
///
/// An [`Opt`] is not consumed when applied. The same option can be applied to any number of
/// objects, any number of times.
///
/// ```
/// use kopts::builder::service::{self, Service};
///
/// let port = service::port(80, 8080);
///
/// let mut a = Service::new("a", []);
/// let mut b = Service::new("b", []);
/// port.apply(&mut a);
/// port.apply(&mut b);
///
/// assert_eq!(a.spec().and_then(|s| s.ports.as_ref()).map(Vec::len), Some(1));
/// assert_eq!(b.spec().and_then(|s| s.ports.as_ref()).map(Vec::len), Some(1));
/// ```
pub struct Opt<T>(Box<dyn Fn(&mut T) + Send + Sync>);

impl<T> Opt<T> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        Self(Box::new(f))
    }

    /// Mutates `target` with this option.
    pub fn apply(&self, target: &mut T) {
        (self.0)(target);
    }

    /// Returns a single option which applies `self` and then `other`.
    pub fn and(self, other: Self) -> Self
    where
        T: 'static,
    {
        Self::new(move |target| {
            self.apply(target);
            other.apply(target);
        })
    }
}

impl<T> fmt::Debug for Opt<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opt<{}>", type_name::<T>())
    }
}

/// Extension trait to apply an option in a method chain.
pub trait Apply: Sized {
    fn apply_opt(&mut self, opt: &Opt<Self>) -> &mut Self {
        opt.apply(self);
        self
    }
}

impl<T> Apply for T {}

/// Applies every option of `opts` to `target`, in the given order.
pub fn apply_all<T>(target: &mut T, opts: impl IntoIterator<Item = Opt<T>>) {
    let mut applied = 0usize;
    for opt in opts {
        opt.apply(target);
        applied += 1;
    }

    trace!(
        object = type_name::<T>(),
        options = applied,
        "applied options"
    );
}
