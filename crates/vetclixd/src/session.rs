//! Per-connection session state.

use crate::permissions::Permissions;

/// State owned by a single connection for its lifetime.
///
/// Sessions start with no access. Only the `auth` command replaces the
/// permissions, and it always overwrites rather than merging.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Session {
    permissions: Permissions,
}

impl Session {
    /// Creates an unauthenticated session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current permissions.
    #[must_use]
    pub fn permissions(&self) -> Permissions {
        self.permissions
    }

    /// Replaces the current permissions wholesale.
    pub fn replace_permissions(&mut self, permissions: Permissions) {
        self.permissions = permissions;
    }
}
