//! Connections from the client to the daemon socket.
//!
//! The daemon answers once the request side of the stream is closed, so the
//! client writes the whole request, half-closes and then reads to EOF.

use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

#[cfg(unix)]
use std::os::unix::net::UnixStream;

#[cfg(unix)]
use socket2::{Domain, SockAddr, Socket, Type};
use vetclix_config::SocketEndpoint;

use crate::AppError;

pub(crate) const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub(crate) const RESPONSE_TIMEOUT: Duration = Duration::from_secs(15);

pub(crate) enum Connection {
    Tcp(TcpStream),
    #[cfg(unix)]
    Unix(UnixStream),
}

impl Connection {
    /// Sends `request` and closes the write half of the stream.
    pub(crate) fn send(&mut self, request: &[u8]) -> io::Result<()> {
        self.write_all(request)?;
        self.flush()?;
        match self {
            Self::Tcp(stream) => stream.shutdown(Shutdown::Write),
            #[cfg(unix)]
            Self::Unix(stream) => stream.shutdown(Shutdown::Write),
        }
    }

    /// Reads the daemon's reply up to EOF.
    pub(crate) fn receive(&mut self) -> io::Result<String> {
        let mut response = String::new();
        self.read_to_string(&mut response)?;
        Ok(response)
    }

    fn set_read_timeout(&self, timeout: Duration) -> io::Result<()> {
        match self {
            Self::Tcp(stream) => stream.set_read_timeout(Some(timeout)),
            #[cfg(unix)]
            Self::Unix(stream) => stream.set_read_timeout(Some(timeout)),
        }
    }
}

impl Read for Connection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Tcp(stream) => stream.read(buf),
            #[cfg(unix)]
            Self::Unix(stream) => stream.read(buf),
        }
    }
}

impl Write for Connection {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Tcp(stream) => stream.write(buf),
            #[cfg(unix)]
            Self::Unix(stream) => stream.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Tcp(stream) => stream.flush(),
            #[cfg(unix)]
            Self::Unix(stream) => stream.flush(),
        }
    }
}

pub(crate) fn connect(endpoint: &SocketEndpoint) -> Result<Connection, AppError> {
    let connect_error = |source| AppError::Connect {
        endpoint: endpoint.to_string(),
        source,
    };
    let connection = match endpoint {
        SocketEndpoint::Tcp { host, port } => {
            let address =
                resolve_tcp_address(host, *port).map_err(|source| AppError::Resolve {
                    endpoint: endpoint.to_string(),
                    source,
                })?;
            TcpStream::connect_timeout(&address, CONNECT_TIMEOUT)
                .map(Connection::Tcp)
                .map_err(connect_error)?
        }
        SocketEndpoint::Unix { path } => {
            #[cfg(unix)]
            {
                connect_unix(path.as_str()).map_err(connect_error)?
            }

            #[cfg(not(unix))]
            {
                let _ = path;
                return Err(AppError::UnsupportedUnixTransport(endpoint.to_string()));
            }
        }
    };
    connection
        .set_read_timeout(RESPONSE_TIMEOUT)
        .map_err(connect_error)?;
    Ok(connection)
}

fn resolve_tcp_address(host: &str, port: u16) -> io::Result<SocketAddr> {
    (host, port)
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::AddrNotAvailable, "no resolved addresses"))
}

#[cfg(unix)]
fn connect_unix(path: &str) -> io::Result<Connection> {
    let socket = Socket::new(Domain::UNIX, Type::STREAM, None)?;
    let address = SockAddr::unix(path)?;
    socket.connect_timeout(&address, CONNECT_TIMEOUT)?;
    Ok(Connection::Unix(std::os::fd::OwnedFd::from(socket).into()))
}
