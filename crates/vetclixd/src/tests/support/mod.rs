//! Shared doubles for the daemon test suites.

mod reporter;
mod signal;
mod store;

pub use reporter::{HealthEvent, RecordingHealthReporter};
pub use signal::ChannelShutdownSignal;
pub use store::MockStore;

use crate::permissions::Permissions;
use crate::users::UserTable;

/// Users shared by the suites: `vet` may write, `frontdesk` may read.
pub fn clinic_users() -> UserTable {
    let mut users = UserTable::new();
    users.add_user("vet", "hunter2", Permissions::WRITE);
    users.add_user("frontdesk", "s3cret", Permissions::READ);
    users
}

/// Password of a user in [`clinic_users`].
pub fn password_for(user: &str) -> &'static str {
    match user {
        "vet" => "hunter2",
        "frontdesk" => "s3cret",
        other => panic!("no clinic user named {other}"),
    }
}
