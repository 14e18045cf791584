//! Shutdown signal driven by a channel.

use std::sync::Mutex;
use std::sync::mpsc::{Receiver, Sender, channel};

use crate::process::{ShutdownError, ShutdownSignal};

/// Fires when the paired sender sends or is dropped.
pub struct ChannelShutdownSignal {
    receiver: Mutex<Receiver<()>>,
}

impl ChannelShutdownSignal {
    pub fn new() -> (Sender<()>, Self) {
        let (sender, receiver) = channel();
        (
            sender,
            Self {
                receiver: Mutex::new(receiver),
            },
        )
    }
}

impl ShutdownSignal for ChannelShutdownSignal {
    fn wait(&self) -> Result<(), ShutdownError> {
        let receiver = self.receiver.lock().expect("signal mutex poisoned");
        let _ = receiver.recv();
        Ok(())
    }
}
