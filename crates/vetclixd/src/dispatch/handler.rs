//! Connection handler that answers one S-expression request per connection.
//!
//! The client writes its request and shuts down its write side. The handler
//! reads to end of input, evaluates the request in a fresh session, writes
//! the canonical reply and closes the connection.

use std::io::{self, Read, Write};
use std::sync::Arc;

use tracing::{debug, warn};
use vetclix_sexp::dump;

use crate::session::Session;
use crate::transport::{ConnectionHandler, ConnectionStream};

use super::dispatcher::{DISPATCH_TARGET, Dispatcher, error_reply};
use super::errors::DispatchError;

/// Maximum size of a request in bytes.
pub(crate) const MAX_REQUEST_BYTES: usize = 1024 * 1024;

/// Connection handler backed by a [`Dispatcher`].
#[derive(Debug, Clone)]
pub struct DispatchConnectionHandler {
    dispatcher: Arc<Dispatcher>,
}

impl DispatchConnectionHandler {
    /// Creates a handler sharing `dispatcher` across connections.
    #[must_use]
    pub const fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    fn serve(&self, mut stream: ConnectionStream) {
        let mut session = Session::new();
        let response = match read_request(&mut stream) {
            Ok(text) => self.dispatcher.respond(&mut session, &text),
            Err(error) => error_reply(&error),
        };

        let mut payload = dump(&response);
        payload.push('\n');
        if let Err(error) = write_response(&mut stream, payload.as_bytes()) {
            warn!(target: DISPATCH_TARGET, %error, "failed to write response");
        }
        debug!(target: DISPATCH_TARGET, response = %response, "connection answered");
    }
}

impl ConnectionHandler for DispatchConnectionHandler {
    fn handle(&self, stream: ConnectionStream) {
        self.serve(stream);
    }
}

/// Reads the whole request up to end of input.
fn read_request(stream: &mut ConnectionStream) -> Result<String, DispatchError> {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 1024];

    loop {
        let bytes_read = read_with_retry(stream, &mut chunk)?;
        if bytes_read == 0 {
            break;
        }
        let received = chunk.get(..bytes_read).unwrap_or_default();
        buffer.extend_from_slice(received);
        enforce_limit(buffer.len())?;
    }

    String::from_utf8(buffer).map_err(|_| DispatchError::InvalidUtf8)
}

/// Reads from the stream, retrying on interrupts.
fn read_with_retry(stream: &mut ConnectionStream, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match stream.read(buf) {
            Ok(n) => return Ok(n),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
}

const fn enforce_limit(size: usize) -> Result<(), DispatchError> {
    if size > MAX_REQUEST_BYTES {
        return Err(DispatchError::request_too_large(size, MAX_REQUEST_BYTES));
    }
    Ok(())
}

fn write_response(stream: &mut ConnectionStream, payload: &[u8]) -> io::Result<()> {
    stream.write_all(payload)?;
    stream.flush()?;
    stream.shutdown()
}
