//! Test suites for the Vetclix daemon.

mod daemon_lifecycle;
mod support;
