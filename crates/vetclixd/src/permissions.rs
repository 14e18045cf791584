//! Capability lattice governing which commands a session may run.
//!
//! Levels are ordered: none (0) < read (1) < write (2). Write access also
//! satisfies the read check.

use std::fmt;

/// A session's record permissions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Permissions {
    records: u8,
}

/// Requested change to a [`Permissions`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionChange {
    /// Leave the level untouched.
    Unchanged,
    /// Drop to no access.
    Clear,
    /// Set the level verbatim. Callers are trusted; no range check applies.
    Set(u8),
}

impl Permissions {
    /// No access.
    pub const NONE: Self = Self { records: 0 };
    /// Read-only record access.
    pub const READ: Self = Self { records: 1 };
    /// Read and write record access.
    pub const WRITE: Self = Self { records: 2 };

    /// Builds permissions from a raw level.
    #[must_use]
    pub const fn from_level(records: u8) -> Self {
        Self { records }
    }

    /// Raw record level.
    #[must_use]
    pub const fn level(self) -> u8 {
        self.records
    }

    /// True for read and write levels.
    #[must_use]
    pub const fn can_read_records(self) -> bool {
        self.records >= Self::READ.records
    }

    /// True only for the write level.
    #[must_use]
    pub const fn can_write_records(self) -> bool {
        self.records == Self::WRITE.records
    }

    /// Applies `change` in place.
    pub fn modify(&mut self, change: PermissionChange) {
        match change {
            PermissionChange::Unchanged => {}
            PermissionChange::Clear => *self = Self::NONE,
            PermissionChange::Set(level) => self.records = level,
        }
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.records {
            0 => formatter.write_str("none"),
            1 => formatter.write_str("read"),
            2 => formatter.write_str("write"),
            other => write!(formatter, "level-{other}"),
        }
    }
}
