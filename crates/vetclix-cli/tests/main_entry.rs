//! Tests for the `vetclix` binary entry point.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::{contains, diff};

#[test]
fn help_lists_the_request_argument() {
    let mut command = cargo_bin_cmd!("vetclix");
    command.arg("--help");
    command.assert().success().stdout(contains("[REQUEST]"));
}

#[test]
fn malformed_requests_exit_with_two() {
    let mut command = cargo_bin_cmd!("vetclix");
    command.arg("(\"version?\"");
    command
        .assert()
        .code(2)
        .stderr(contains("request is not a valid S-expression"));
}

#[test]
fn prints_the_daemon_reply() {
    let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind fake daemon");
    let port = listener.local_addr().expect("local addr").port();
    let daemon = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut request = String::new();
        stream.read_to_string(&mut request).expect("read request");
        stream.write_all(b"(\"error\" \"nomatch\")\n").expect("reply");
        request
    });

    let mut command = cargo_bin_cmd!("vetclix");
    command
        .arg("--daemon-socket")
        .arg(format!("tcp://127.0.0.1:{port}"))
        .write_stdin("(\"get\" \"patient\" \"p-404\")");
    command
        .assert()
        .code(1)
        .stdout(diff("(\"error\" \"nomatch\")\n"));

    let request = daemon.join().expect("fake daemon panicked");
    assert_eq!(request, "(\"get\" \"patient\" \"p-404\")");
}
