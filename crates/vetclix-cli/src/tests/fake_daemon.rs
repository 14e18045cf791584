//! A one-shot daemon that records the request and sends a canned reply.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

#[cfg(unix)]
use std::os::unix::net::UnixListener;

use vetclix_config::SocketEndpoint;

pub(crate) struct FakeDaemon {
    endpoint: SocketEndpoint,
    handle: Option<thread::JoinHandle<String>>,
}

impl FakeDaemon {
    /// Listens on an ephemeral TCP port and answers one connection.
    pub(crate) fn spawn(reply: &str) -> Self {
        let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind fake daemon");
        let port = listener.local_addr().expect("local addr").port();
        let reply = reply.to_owned();
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().expect("accept client");
            Self::answer(stream, &reply)
        });
        Self {
            endpoint: SocketEndpoint::tcp("127.0.0.1", port),
            handle: Some(handle),
        }
    }

    /// Listens on a Unix socket at `path` and answers one connection.
    #[cfg(unix)]
    pub(crate) fn spawn_unix(path: &std::path::Path, reply: &str) -> Self {
        let listener = UnixListener::bind(path).expect("bind fake daemon");
        let reply = reply.to_owned();
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().expect("accept client");
            Self::answer(stream, &reply)
        });
        Self {
            endpoint: SocketEndpoint::unix(path.to_str().expect("utf-8 socket path")),
            handle: Some(handle),
        }
    }

    fn answer(mut stream: impl Read + Write, reply: &str) -> String {
        let mut request = String::new();
        stream.read_to_string(&mut request).expect("read request");
        stream.write_all(reply.as_bytes()).expect("write reply");
        stream.flush().expect("flush reply");
        request
    }

    pub(crate) fn endpoint(&self) -> SocketEndpoint {
        self.endpoint.clone()
    }

    /// Waits for the connection to finish and returns the received request.
    pub(crate) fn request(&mut self) -> String {
        self.handle
            .take()
            .expect("request already taken")
            .join()
            .expect("fake daemon panicked")
    }
}
