use crate::routing::Route;

/// Navigation surface of the host shell.
pub trait NavigationPort: Send + Sync {
    /// Replace the current route. Used for redirects, so the previous
    /// route is not kept on the back stack.
    fn replace(&self, route: &Route);

    /// Push a route on top of the current one.
    fn push(&self, route: &Route);
}
