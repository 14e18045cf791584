//! Credential table mapping users to permissions.
//!
//! Passwords are compared verbatim and case-sensitively. The users file is
//! written in the wire grammar, one `(user password level)` entry per user:
//!
//! ```text
//! (("frontdesk" "s3cret" 1)
//!  ("vet" "hunter2" 2))
//! ```

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use vetclix_sexp::{ParseError, StructureError, Value, maplist, parse, structure};

use crate::permissions::Permissions;

const USER_FIELDS: [&str; 2] = ["password", "records"];

/// Resolves credentials to permissions.
pub trait CredentialTable: Send + Sync {
    /// Returns the user's permissions when `credential` matches, otherwise
    /// [`Permissions::NONE`]. Never fails.
    fn lookup(&self, user: &str, credential: &str) -> Permissions;
}

/// Errors raised while loading a users file.
#[derive(Debug, Error)]
pub enum UserTableError {
    /// Reading the file failed.
    #[error("failed to read users file '{}': {source}", path.display())]
    Read {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The file is not a valid S-expression.
    #[error("users file is not a valid S-expression: {0}")]
    Parse(#[from] ParseError),
    /// The top-level value is not a list of entries.
    #[error("users file must be a list of (user password level) entries")]
    NotAList,
    /// An entry does not have the `(user password level)` shape.
    #[error("malformed entry for user '{user}': {source}")]
    Entry {
        /// User whose entry is malformed.
        user: String,
        /// Structural failure.
        #[source]
        source: StructureError,
    },
    /// The entry list itself is malformed.
    #[error("malformed users file: {0}")]
    Structure(#[from] StructureError),
    /// A password or level has the wrong type.
    #[error("entry for user '{user}' needs a string password and integer level")]
    FieldType {
        /// User whose entry is malformed.
        user: String,
    },
    /// A level lies outside `0..=2`.
    #[error("permission level {level} for user '{user}' is outside 0..=2")]
    Level {
        /// User whose level is invalid.
        user: String,
        /// Rejected level.
        level: i64,
    },
}

#[derive(Debug, Clone)]
struct UserEntry {
    password: String,
    permissions: Permissions,
}

/// In-memory credential table.
#[derive(Debug, Default, Clone)]
pub struct UserTable {
    users: HashMap<String, UserEntry>,
}

impl UserTable {
    /// Creates an empty table; every lookup yields no access.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a user.
    pub fn add_user(
        &mut self,
        user: impl Into<String>,
        password: impl Into<String>,
        permissions: Permissions,
    ) {
        self.users.insert(
            user.into(),
            UserEntry {
                password: password.into(),
                permissions,
            },
        );
    }

    /// Number of known users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// True when no users are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Loads a users file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`UserTableError`] when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, UserTableError> {
        let text = fs::read_to_string(path).map_err(|source| UserTableError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_sexp(&text)?;
        debug!(
            target: "vetclixd::users",
            path = %path.display(),
            users = table.len(),
            "loaded users file"
        );
        Ok(table)
    }

    /// Builds a table from users-file text.
    ///
    /// # Errors
    ///
    /// Returns [`UserTableError`] when the text is not a list of
    /// `(user password level)` entries with levels in `0..=2`.
    pub fn from_sexp(text: &str) -> Result<Self, UserTableError> {
        let parsed = parse(text)?;
        let entries = parsed.as_list().ok_or(UserTableError::NotAList)?;
        check_arity(entries)?;
        let mut table = Self::new();
        for (user, fields) in maplist(entries)? {
            let entry = user_entry(&user, &fields)?;
            table.users.insert(user, entry);
        }
        Ok(table)
    }
}

impl CredentialTable for UserTable {
    fn lookup(&self, user: &str, credential: &str) -> Permissions {
        self.users
            .get(user)
            .filter(|entry| entry.password == credential)
            .map_or(Permissions::NONE, |entry| entry.permissions)
    }
}

// `maplist` unwraps a lone value, so `(user (password level))` would otherwise
// pass for a flat entry.
fn check_arity(entries: &[Value]) -> Result<(), UserTableError> {
    for entry in entries {
        let Some([user, fields @ ..]) = entry.as_list() else {
            continue;
        };
        if fields.len() != USER_FIELDS.len() {
            return Err(UserTableError::Entry {
                user: user.as_text().map_or_else(|| user.to_string(), str::to_owned),
                source: StructureError::LengthMismatch {
                    expected: USER_FIELDS.len(),
                    actual: fields.len(),
                },
            });
        }
    }
    Ok(())
}

fn user_entry(user: &str, fields: &Value) -> Result<UserEntry, UserTableError> {
    let values = fields.as_list().unwrap_or_default();
    let named = structure(values, &USER_FIELDS).map_err(|source| UserTableError::Entry {
        user: user.to_owned(),
        source,
    })?;
    let field_type = || UserTableError::FieldType {
        user: user.to_owned(),
    };
    let password = named
        .get("password")
        .and_then(Value::as_text)
        .ok_or_else(field_type)?;
    let level = named
        .get("records")
        .and_then(Value::as_integer)
        .ok_or_else(field_type)?;
    let records = u8::try_from(level)
        .ok()
        .filter(|records| *records <= Permissions::WRITE.level())
        .ok_or_else(|| UserTableError::Level {
            user: user.to_owned(),
            level,
        })?;

    Ok(UserEntry {
        password: password.to_owned(),
        permissions: Permissions::from_level(records),
    })
}
