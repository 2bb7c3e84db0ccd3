//! Navigation signal for terminal auth outcomes.

/// Host-supplied navigation actions.
///
/// In the browser original this is a router redirect; here it is whatever
/// the hosting application wants it to be - a channel send, a UI event, a
/// process exit.
pub trait NavigationSink: Send + Sync {
    /// Present the login screen. Invoked by the session manager exactly
    /// once per expiry episode, when the session is cleared after an
    /// unrecoverable auth failure.
    fn redirect_to_login(&self);

    /// Present the "not authorized" screen. For hosts acting on a
    /// [`can_access`](crate::auth::can_access) decision; the client never
    /// invokes this itself.
    fn redirect_to_unauthorized(&self);
}

type NavigateFn = dyn Fn() + Send + Sync;

/// Navigation sink backed by user-provided callbacks.
pub struct CallbackNavigator {
    login_fn: Box<NavigateFn>,
    unauthorized_fn: Box<NavigateFn>,
}

impl CallbackNavigator {
    /// Create from two closures.
    pub fn new<L, U>(login: L, unauthorized: U) -> Self
    where
        L: Fn() + Send + Sync + 'static,
        U: Fn() + Send + Sync + 'static,
    {
        Self {
            login_fn: Box::new(login),
            unauthorized_fn: Box::new(unauthorized),
        }
    }
}

impl NavigationSink for CallbackNavigator {
    fn redirect_to_login(&self) {
        (self.login_fn)()
    }

    fn redirect_to_unauthorized(&self) {
        (self.unauthorized_fn)()
    }
}
