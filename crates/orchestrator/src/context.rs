//! Identity of the caller, resolved by the HTTP layer.

use database::User;

/// The authenticated user a request acts on behalf of.
///
/// Every store and service operation takes this explicitly; nothing in the
/// orchestrator reads identity from ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    /// Stable user identifier.
    pub user_id: String,
    /// Display name, for logs.
    pub name: String,
}

impl UserContext {
    /// Create a context for the given user.
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
        }
    }
}

impl From<User> for UserContext {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            name: user.name,
        }
    }
}
