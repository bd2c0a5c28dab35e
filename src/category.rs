//! Subsystem categories
//!
//! Closed set of tags identifying which daemon subsystem a log emitter
//! speaks for. Every emitted line carries its category label, and the
//! verbosity table keeps one entry per category.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Subsystem tag for log emitters and verbosity entries.
///
/// The set is fixed at compile time; `Category::ALL` enumerates every
/// variant and `Category::COUNT` sizes per-category tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Inbound message parser
    Parser,
    /// Outbound message generator
    Generator,
    /// Security association state
    SecurityAssociation,
    /// Security association manager
    SaManager,
    /// Child security association state
    ChildSa,
    /// Message handling
    Message,
    /// Thread pool
    ThreadPool,
    /// Worker threads
    Worker,
    /// Job scheduler
    Scheduler,
    /// Network sender
    Sender,
    /// Network receiver
    Receiver,
    /// Socket layer
    Socket,
    /// Self-test harness
    Tester,
    /// Daemon core
    Daemon,
    /// Configuration manager
    ConfigManager,
    /// Encryption payload handling
    EncryptionPayload,
}

impl Category {
    /// Number of categories (sizes per-category tables)
    pub const COUNT: usize = 16;

    /// Every category, in table order
    pub const ALL: [Category; Self::COUNT] = [
        Category::Parser,
        Category::Generator,
        Category::SecurityAssociation,
        Category::SaManager,
        Category::ChildSa,
        Category::Message,
        Category::ThreadPool,
        Category::Worker,
        Category::Scheduler,
        Category::Sender,
        Category::Receiver,
        Category::Socket,
        Category::Tester,
        Category::Daemon,
        Category::ConfigManager,
        Category::EncryptionPayload,
    ];

    /// Label embedded in emitted lines
    pub fn label(self) -> &'static str {
        match self {
            Category::Parser => "PARSER",
            Category::Generator => "GENERATOR",
            Category::SecurityAssociation => "SA",
            Category::SaManager => "SA_MGR",
            Category::ChildSa => "CHILD_SA",
            Category::Message => "MESSAGE",
            Category::ThreadPool => "THREAD_POOL",
            Category::Worker => "WORKER",
            Category::Scheduler => "SCHEDULER",
            Category::Sender => "SENDER",
            Category::Receiver => "RECEIVER",
            Category::Socket => "SOCKET",
            Category::Tester => "TESTER",
            Category::Daemon => "DAEMON",
            Category::ConfigManager => "CONFIG",
            Category::EncryptionPayload => "ENC_PAYLOAD",
        }
    }

    /// Index into per-category tables
    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
