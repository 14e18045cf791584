use std::ffi::OsString;
use std::io::{self, Cursor};
use std::net::TcpListener;
use std::process::ExitCode;

use rstest::rstest;
use vetclix_config::{Config, SocketEndpoint};

use super::StaticConfigLoader;
use super::fake_daemon::FakeDaemon;
use crate::{AppError, IoStreams, Outcome, classify_response, run_with_loader};

struct Run {
    exit: ExitCode,
    stdout: String,
    stderr: String,
}

fn run(endpoint: SocketEndpoint, args: &[&str], stdin: &str) -> Run {
    let config = Config {
        daemon_socket: endpoint,
        ..Config::default()
    };
    let args: Vec<OsString> = std::iter::once("vetclix")
        .chain(args.iter().copied())
        .map(OsString::from)
        .collect();
    let mut stdin = Cursor::new(stdin.as_bytes().to_vec());
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let exit = {
        let mut io = IoStreams {
            stdin: &mut stdin,
            stdout: &mut stdout,
            stderr: &mut stderr,
        };
        run_with_loader(args, &mut io, &StaticConfigLoader::new(config))
    };
    Run {
        exit,
        stdout: String::from_utf8(stdout).expect("stdout utf8"),
        stderr: String::from_utf8(stderr).expect("stderr utf8"),
    }
}

#[rstest]
#[case::integer("1\n", Outcome::Reply)]
#[case::permissions("(\"permissions\" (\"records\" 2))\n", Outcome::Reply)]
#[case::ok("(\"ok\")", Outcome::Reply)]
#[case::error("(\"error\" \"badauth\")\n", Outcome::ErrorReply)]
#[case::record_named_error("(\"client\" \"error\" \"Ed\" ())", Outcome::Reply)]
fn classifies_replies(#[case] response: &str, #[case] expected: Outcome) {
    assert_eq!(classify_response(response).expect("classify"), expected);
}

#[test]
fn unparseable_replies_are_local_failures() {
    let error = classify_response("(\"error\"").expect_err("reply is truncated");
    assert!(matches!(error, AppError::InvalidResponse { .. }));
}

#[test]
fn sends_the_canonical_form_of_an_argument_request() {
    let mut daemon = FakeDaemon::spawn("1\n");
    let outcome = run(daemon.endpoint(), &["(  \"version?\"\n)"], "");

    assert_eq!(daemon.request(), "(\"version?\")");
    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert_eq!(outcome.stdout, "1\n");
    assert_eq!(outcome.stderr, "");
}

#[test]
fn reads_the_request_from_stdin_when_no_argument_is_given() {
    let mut daemon = FakeDaemon::spawn("(\"permissions\" (\"records\" 1))\n");
    let outcome = run(
        daemon.endpoint(),
        &[],
        "(\"auth\" \"frontdesk\" \"s3cret\")\n",
    );

    assert_eq!(daemon.request(), "(\"auth\" \"frontdesk\" \"s3cret\")");
    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert_eq!(outcome.stdout, "(\"permissions\" (\"records\" 1))\n");
}

#[test]
fn error_replies_exit_with_one() {
    let mut daemon = FakeDaemon::spawn("(\"error\" \"badrequest\")\n");
    let outcome = run(daemon.endpoint(), &["(\"delete\" \"client\" \"c-1\")"], "");

    daemon.request();
    assert_eq!(outcome.exit, ExitCode::from(1));
    assert_eq!(outcome.stdout, "(\"error\" \"badrequest\")\n");
}

#[rstest]
#[case::unclosed("(\"version?\"")]
#[case::empty("   ")]
#[case::symbol("(version?)")]
fn invalid_requests_never_reach_the_daemon(#[case] request: &str) {
    let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind listener");
    listener.set_nonblocking(true).expect("nonblocking");
    let port = listener.local_addr().expect("local addr").port();

    let outcome = run(SocketEndpoint::tcp("127.0.0.1", port), &[request], "");

    assert_eq!(outcome.exit, ExitCode::from(2));
    assert!(
        outcome.stderr.contains("not a valid S-expression"),
        "stderr was {:?}",
        outcome.stderr
    );
    let accepted = listener.accept().map(|_| ()).map_err(|error| error.kind());
    assert_eq!(accepted, Err(io::ErrorKind::WouldBlock));
}

#[test]
fn unreachable_daemons_are_local_failures() {
    let port = {
        let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind listener");
        listener.local_addr().expect("local addr").port()
    };

    let outcome = run(SocketEndpoint::tcp("127.0.0.1", port), &["(\"version?\")"], "");

    assert_eq!(outcome.exit, ExitCode::from(2));
    assert!(outcome.stderr.starts_with("vetclix: no daemon reachable at"));
    assert_eq!(outcome.stdout, "");
}

#[test]
fn help_is_printed_to_stdout() {
    let outcome = run(SocketEndpoint::default(), &["--help"], "");
    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert!(outcome.stdout.contains("REQUEST"));
}

#[test]
fn surplus_arguments_are_usage_errors() {
    let outcome = run(SocketEndpoint::default(), &["(\"version?\")", "extra"], "");
    assert_eq!(outcome.exit, ExitCode::from(2));
    assert!(outcome.stderr.contains("unexpected argument"));
}

#[cfg(unix)]
#[test]
fn talks_to_unix_socket_daemons() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut daemon = FakeDaemon::spawn_unix(&dir.path().join("vetclixd.sock"), "1\n");

    let outcome = run(daemon.endpoint(), &["(\"version?\")"], "");

    assert_eq!(daemon.request(), "(\"version?\")");
    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert_eq!(outcome.stdout, "1\n");
}
