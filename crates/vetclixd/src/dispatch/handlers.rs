//! Built-in command handlers.
//!
//! Handlers run only after the dispatcher has validated the body and checked
//! permissions. They report every failure through [`HandlerError`]; the
//! dispatcher decides what reaches the wire.

use vetclix_sexp::Value;

use crate::records::{RecordKind, RecordStore, marshal};
use crate::session::Session;
use crate::users::CredentialTable;

use super::errors::HandlerError;

/// Protocol version answered by `version?`.
pub const PROTOCOL_VERSION: i64 = 1;

/// Signature shared by every handler.
pub type Handler = fn(&mut HandlerContext<'_>, &[Value]) -> Result<Value, HandlerError>;

/// State a handler may read or change.
pub struct HandlerContext<'a> {
    /// The connection's session.
    pub session: &'a mut Session,
    /// Credential lookup for `auth`.
    pub users: &'a dyn CredentialTable,
    /// Record storage.
    pub store: &'a dyn RecordStore,
}

pub(crate) fn version(_: &mut HandlerContext<'_>, _: &[Value]) -> Result<Value, HandlerError> {
    Ok(Value::Integer(PROTOCOL_VERSION))
}

pub(crate) fn auth(
    context: &mut HandlerContext<'_>,
    body: &[Value],
) -> Result<Value, HandlerError> {
    let [Value::Text(user), Value::Text(credential)] = body else {
        return Err(HandlerError::UnexpectedBody { command: "auth" });
    };
    let permissions = context.users.lookup(user, credential);
    context.session.replace_permissions(permissions);
    Ok(marshal::permissions(permissions))
}

pub(crate) fn get(context: &mut HandlerContext<'_>, body: &[Value]) -> Result<Value, HandlerError> {
    let [Value::Text(tag), Value::Text(id)] = body else {
        return Err(HandlerError::UnexpectedBody { command: "get" });
    };
    let kind: RecordKind = tag.parse()?;
    let record = context
        .store
        .get(kind, id)?
        .ok_or_else(|| HandlerError::NoMatch {
            kind,
            id: id.clone(),
        })?;
    Ok(marshal::to_wire(&record))
}

pub(crate) fn set_client(
    context: &mut HandlerContext<'_>,
    body: &[Value],
) -> Result<Value, HandlerError> {
    let client = marshal::parse_client(body)?;
    context.store.set(client.into())?;
    Ok(marshal::success())
}

pub(crate) fn set_patient(
    context: &mut HandlerContext<'_>,
    body: &[Value],
) -> Result<Value, HandlerError> {
    let patient = marshal::parse_patient(body)?;
    context.store.set(patient.into())?;
    Ok(marshal::success())
}
