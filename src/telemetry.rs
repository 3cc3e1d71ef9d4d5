//! Status line sinks
//!
//! The simulator hands every tick's status line to a [`StatusSink`] as an
//! owned `String`. Sinks never fail the caller.

use std::sync::mpsc;

/// Fire-and-forget receiver of per-tick status lines
pub trait StatusSink {
    fn send(&mut self, status: String);
}

/// Writes status lines through the `log` facade at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl StatusSink for LogSink {
    fn send(&mut self, status: String) {
        log::info!("{status}");
    }
}

/// Forwards status lines to a transport thread over an unbounded channel.
///
/// A dropped receiver is logged once and then ignored.
#[derive(Debug)]
pub struct ChannelSink {
    tx: mpsc::Sender<String>,
    disconnected: bool,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<String>) -> Self {
        Self {
            tx,
            disconnected: false,
        }
    }

    /// Sink plus the receiving end for the transport thread
    pub fn channel() -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel();
        (Self::new(tx), rx)
    }
}

impl StatusSink for ChannelSink {
    fn send(&mut self, status: String) {
        if let Err(e) = self.tx.send(status) {
            if !self.disconnected {
                log::debug!("Status receiver dropped: {e}");
                self.disconnected = true;
            }
        }
    }
}

/// Collects lines in memory
impl StatusSink for Vec<String> {
    fn send(&mut self, status: String) {
        self.push(status);
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl StatusSink for NullSink {
    fn send(&mut self, _status: String) {}
}
