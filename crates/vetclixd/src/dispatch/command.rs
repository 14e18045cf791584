//! The command table: validators, authorisation rules and handlers.

use vetclix_sexp::{Value, ValueKind};

use crate::permissions::Permissions;
use crate::records::marshal;

use super::handlers::{self, Handler};

const TWO_STRINGS: &[ValueKind] = &[ValueKind::Text, ValueKind::Text];

/// Body check run before authorisation.
#[derive(Debug, Clone, Copy)]
pub enum Validator {
    /// Body must have exactly these kinds, position by position.
    Kinds(&'static [ValueKind]),
    /// Body must satisfy the predicate.
    Predicate(fn(&[Value]) -> bool),
}

impl Validator {
    /// Returns whether `body` passes.
    #[must_use]
    pub fn accepts(&self, body: &[Value]) -> bool {
        match self {
            Self::Kinds(kinds) => {
                body.len() == kinds.len()
                    && body.iter().zip(kinds.iter()).all(|(value, kind)| value.kind() == *kind)
            }
            Self::Predicate(predicate) => predicate(body),
        }
    }
}

/// One entry of the command table.
#[derive(Debug, Clone, Copy)]
pub struct CommandDescriptor {
    /// Command atom.
    pub name: &'static str,
    /// Shape check for the body.
    pub validator: Validator,
    /// Permission check, run after the shape check.
    pub authorise: fn(Permissions) -> bool,
    /// Handler; `None` marks a declared but unimplemented command.
    pub handler: Option<Handler>,
}

/// Lookup table of commands by name.
#[derive(Debug, Clone)]
pub struct CommandTable {
    commands: Vec<CommandDescriptor>,
}

impl CommandTable {
    /// The commands every server answers.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(vec![
            CommandDescriptor {
                name: "version?",
                validator: Validator::Kinds(&[]),
                authorise: always,
                handler: Some(handlers::version),
            },
            CommandDescriptor {
                name: "auth",
                validator: Validator::Kinds(TWO_STRINGS),
                authorise: always,
                handler: Some(handlers::auth),
            },
            CommandDescriptor {
                name: "get",
                validator: Validator::Kinds(TWO_STRINGS),
                authorise: Permissions::can_read_records,
                handler: Some(handlers::get),
            },
            CommandDescriptor {
                name: "set-client",
                validator: Validator::Predicate(marshal::verify_client),
                authorise: Permissions::can_write_records,
                handler: Some(handlers::set_client),
            },
            CommandDescriptor {
                name: "set-patient",
                validator: Validator::Predicate(marshal::verify_patient),
                authorise: Permissions::can_write_records,
                handler: Some(handlers::set_patient),
            },
            CommandDescriptor {
                name: "search",
                validator: Validator::Kinds(&[ValueKind::Text]),
                authorise: Permissions::can_read_records,
                handler: None,
            },
        ])
    }

    /// Builds a table from explicit descriptors. Later entries shadow earlier
    /// ones with the same name.
    #[must_use]
    pub const fn new(commands: Vec<CommandDescriptor>) -> Self {
        Self { commands }
    }

    /// Finds a command by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.iter().rev().find(|command| command.name == name)
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::builtin()
    }
}

const fn always(_: Permissions) -> bool {
    true
}
