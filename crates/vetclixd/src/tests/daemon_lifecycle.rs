//! Bootstrap, start and shutdown of the whole daemon.

use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use camino::Utf8PathBuf;
use vetclix_config::{Config, SocketEndpoint};

use crate::bootstrap::{BootstrapError, Daemon, StaticConfigLoader, bootstrap_with};
use crate::process::LaunchError;
use crate::records::{InMemoryRecordStore, RecordKind, RecordStore, StoreError};

use super::support::{ChannelShutdownSignal, HealthEvent, MockStore, RecordingHealthReporter};

fn tcp_config() -> Config {
    Config {
        daemon_socket: SocketEndpoint::tcp("127.0.0.1", 0),
        ..Config::default()
    }
}

fn bootstrap(
    config: Config,
    store: Arc<dyn RecordStore>,
) -> (Arc<RecordingHealthReporter>, Result<Daemon, BootstrapError>) {
    let reporter = Arc::new(RecordingHealthReporter::default());
    let daemon = bootstrap_with(&StaticConfigLoader::new(config), reporter.clone(), store);
    (reporter, daemon)
}

fn exchange<S: Read + Write>(mut stream: S, request: &str, close: impl FnOnce(&S)) -> String {
    stream.write_all(request.as_bytes()).expect("write request");
    close(&stream);
    let mut reply = String::new();
    stream.read_to_string(&mut reply).expect("read reply");
    reply
}

fn exchange_tcp(addr: SocketAddr, request: &str) -> String {
    let stream = TcpStream::connect(addr).expect("connect");
    exchange(stream, request, |stream| {
        stream.shutdown(Shutdown::Write).expect("half close");
    })
}

fn wait_for_listener(reporter: &RecordingHealthReporter) -> SocketAddr {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let ready = reporter.events().into_iter().find_map(|event| match event {
            HealthEvent::ListenerReady(addr) => addr,
            _ => None,
        });
        if let Some(addr) = ready {
            return addr;
        }
        assert!(Instant::now() < deadline, "listener never became ready");
        thread::sleep(Duration::from_millis(10));
    }
}

#[test]
fn started_daemon_answers_and_closes_the_store_on_stop() {
    let store = Arc::new(InMemoryRecordStore::new());
    let (reporter, daemon) = bootstrap(tcp_config(), store.clone());
    let running = daemon.expect("bootstrap").start().expect("start");
    let addr = running.local_addr().expect("tcp address");

    assert_eq!(exchange_tcp(addr, r#"("version?")"#), "1\n");
    assert_eq!(
        exchange_tcp(addr, r#"("auth" "vet" "hunter2")"#),
        "(\"permissions\" (\"records\" 0))\n"
    );

    running.stop().expect("stop");

    assert_eq!(
        reporter.events(),
        vec![
            HealthEvent::BootstrapStarting,
            HealthEvent::BootstrapSucceeded,
            HealthEvent::ListenerReady(Some(addr)),
            HealthEvent::ShutdownCompleted,
        ]
    );
    assert_eq!(store.get(RecordKind::Client, "c-1"), Err(StoreError::Closed));
}

#[test]
fn serve_runs_until_the_signal_fires() {
    let (reporter, daemon) = bootstrap(tcp_config(), Arc::new(InMemoryRecordStore::new()));
    let daemon = daemon.expect("bootstrap");
    let (trigger, signal) = ChannelShutdownSignal::new();
    let server = thread::spawn(move || daemon.serve(&signal));

    let addr = wait_for_listener(&reporter);
    assert_eq!(exchange_tcp(addr, "(\"version?\")"), "1\n");
    assert_eq!(exchange_tcp(addr, "(\"version?\""), "(\"error\" \"malformed\")\n");

    trigger.send(()).expect("signal daemon");
    server
        .join()
        .expect("serve thread panicked")
        .expect("serve");
    assert_eq!(
        reporter.events().last(),
        Some(&HealthEvent::ShutdownCompleted)
    );
}

#[test]
fn users_file_grants_permissions() {
    let dir = tempfile::tempdir().expect("temp dir");
    let users = dir.path().join("users.sexp");
    std::fs::write(&users, r#"(("vet" "hunter2" 2))"#).expect("write users");
    let config = Config {
        users_path: Some(Utf8PathBuf::from_path_buf(users).expect("utf-8 path")),
        ..tcp_config()
    };

    let (_reporter, daemon) = bootstrap(config, Arc::new(InMemoryRecordStore::new()));
    let running = daemon.expect("bootstrap").start().expect("start");
    let addr = running.local_addr().expect("tcp address");

    assert_eq!(
        exchange_tcp(addr, r#"("auth" "vet" "hunter2")"#),
        "(\"permissions\" (\"records\" 2))\n"
    );
    assert_eq!(
        exchange_tcp(addr, r#"("auth" "vet" "HUNTER2")"#),
        "(\"permissions\" (\"records\" 0))\n"
    );
    running.stop().expect("stop");
}

#[test]
fn malformed_users_file_fails_bootstrap() {
    let dir = tempfile::tempdir().expect("temp dir");
    let users = dir.path().join("users.sexp");
    std::fs::write(&users, "((").expect("write users");
    let config = Config {
        users_path: Some(Utf8PathBuf::from_path_buf(users).expect("utf-8 path")),
        ..tcp_config()
    };

    let (reporter, daemon) = bootstrap(config, Arc::new(InMemoryRecordStore::new()));
    let error = daemon.err().expect("bootstrap should fail");
    assert!(matches!(error, BootstrapError::Users { .. }));

    let events = reporter.events();
    assert_eq!(events.first(), Some(&HealthEvent::BootstrapStarting));
    assert!(matches!(
        events.get(1),
        Some(HealthEvent::BootstrapFailed(message)) if message.starts_with("failed to load users")
    ));
    assert_eq!(events.len(), 2);
}

#[test]
fn store_close_failures_are_reported() {
    let mut store = MockStore::new();
    store
        .expect_close()
        .times(1)
        .returning(|| Err(StoreError::backend("flush failed")));
    let (reporter, daemon) = bootstrap(tcp_config(), Arc::new(store));
    let running = daemon.expect("bootstrap").start().expect("start");

    let error = running.stop().expect_err("close should fail");
    assert!(matches!(
        error,
        LaunchError::Store {
            source: StoreError::Backend { .. }
        }
    ));
    assert!(!reporter.events().contains(&HealthEvent::ShutdownCompleted));
}

#[cfg(unix)]
#[test]
fn unix_endpoint_serves_and_removes_its_socket() {
    use std::os::unix::net::UnixStream;

    let dir = tempfile::tempdir().expect("temp dir");
    let path = Utf8PathBuf::from_path_buf(dir.path().join("run").join("vetclixd.sock"))
        .expect("utf-8 path");
    let config = Config {
        daemon_socket: SocketEndpoint::unix(path.clone()),
        ..Config::default()
    };

    let (reporter, daemon) = bootstrap(config, Arc::new(InMemoryRecordStore::new()));
    let running = daemon.expect("bootstrap").start().expect("start");
    assert_eq!(running.local_addr(), None);
    assert!(path.exists());

    let stream = UnixStream::connect(path.as_std_path()).expect("connect");
    let reply = exchange(stream, r#"("version?")"#, |stream| {
        stream.shutdown(Shutdown::Write).expect("half close");
    });
    assert_eq!(reply, "1\n");

    running.stop().expect("stop");
    assert!(!path.exists());
    assert!(reporter.events().contains(&HealthEvent::ListenerReady(None)));
}
