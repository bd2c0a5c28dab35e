//! UDP broadcast sink for daemon → operator-tool monitoring
//!
//! Sends JSON-serialized records via UDP to a localhost monitoring port,
//! one JSON object per line. Fire-and-forget: nobody listening is fine.

use super::{Record, Sink, SinkFactory};
use crate::category::Category;
use crate::constants::BROADCAST_CHANNEL_CAPACITY;
use std::io;
use std::net::UdpSocket;
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::thread;

/// Factory sharing one broadcaster thread among all created sinks
pub struct UdpBroadcastFactory {
    tx: SyncSender<Record>,
}

impl UdpBroadcastFactory {
    /// Bind the sending socket and start the broadcaster thread.
    ///
    /// Binds up-front so callers can handle socket errors cleanly; records
    /// are sent to `127.0.0.1:port`.
    pub fn spawn(port: u16) -> io::Result<Self> {
        let socket = UdpSocket::bind("127.0.0.1:0")?;
        let target = format!("127.0.0.1:{}", port);
        let (tx, rx) = sync_channel::<Record>(BROADCAST_CHANNEL_CAPACITY);

        thread::Builder::new()
            .name("log-registry-broadcast".to_string())
            .spawn(move || run_broadcaster(rx, socket, target))
            .map_err(|e| io::Error::other(e.to_string()))?;

        Ok(Self { tx })
    }
}

impl SinkFactory for UdpBroadcastFactory {
    fn create(&self, _category: Category, _name: Option<&str>) -> io::Result<Box<dyn Sink>> {
        Ok(Box::new(UdpBroadcastSink {
            tx: self.tx.clone(),
        }))
    }
}

/// Sink feeding the shared broadcaster thread
pub struct UdpBroadcastSink {
    tx: SyncSender<Record>,
}

impl Sink for UdpBroadcastSink {
    fn emit(&mut self, record: &Record) {
        // Queue full or broadcaster gone: drop the line rather than block
        let _ = self.tx.try_send(record.clone());
    }
}

/// Run the broadcaster loop (blocking, runs in thread)
fn run_broadcaster(rx: Receiver<Record>, socket: UdpSocket, target: String) {
    // Process records until the channel closes
    for record in rx {
        if let Ok(json) = serde_json::to_string(&record) {
            let msg = format!("{}\n", json);
            let _ = socket.send_to(msg.as_bytes(), &target);
        }
    }
}
