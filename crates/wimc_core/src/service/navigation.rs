//! Navigation contract consumed by resolvers and edit views.

/// Router/history host provided by the UI shell.
pub trait Navigator: Send + Sync {
    /// Navigates to an absolute route such as `404`.
    fn navigate(&self, route: &str);
    /// Returns to the previous view (history back).
    fn back(&self);
}
