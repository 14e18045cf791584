//! Test helpers for the transport module.

use std::io::{Read, Write};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use super::{ConnectionHandler, ConnectionStream};

/// Counts connections and answers each with its request text reversed.
pub(crate) struct EchoCountingHandler {
    served: Arc<AtomicUsize>,
    order: Mutex<Vec<String>>,
}

impl EchoCountingHandler {
    pub(crate) fn new() -> (Arc<AtomicUsize>, Arc<Self>) {
        let served = Arc::new(AtomicUsize::new(0));
        let handler = Arc::new(Self {
            served: Arc::clone(&served),
            order: Mutex::new(Vec::new()),
        });
        (served, handler)
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.order.lock().expect("order lock").clone()
    }
}

impl ConnectionHandler for EchoCountingHandler {
    fn handle(&self, mut stream: ConnectionStream) {
        let mut request = String::new();
        if stream.read_to_string(&mut request).is_ok() {
            let reply: String = request.chars().rev().collect();
            let _ = stream.write_all(reply.as_bytes());
            let _ = stream.shutdown();
            self.order.lock().expect("order lock").push(request);
        }
        self.served.fetch_add(1, Ordering::SeqCst);
    }
}
