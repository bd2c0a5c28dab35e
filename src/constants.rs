//! Crate-wide constants
//!
//! Centralized defaults to avoid duplication and ensure consistency.

// =============================================================================
// Network
// =============================================================================

/// Default UDP port for log monitoring broadcast (daemon -> operator tool)
pub const DEFAULT_BROADCAST_PORT: u16 = 9402;

// =============================================================================
// File sink
// =============================================================================

/// Default maximum size of the active log file before rotation (bytes)
pub const DEFAULT_MAX_LOG_BYTES: u64 = 5 * 1024 * 1024;

/// Default number of rotated log files kept on disk
pub const DEFAULT_MAX_LOG_FILES: usize = 3;

/// Default flush interval for the file writer thread (milliseconds)
pub const FILE_FLUSH_INTERVAL_MS: u64 = 250;

// =============================================================================
// Buffers
// =============================================================================

/// Queue capacity between emitters and the file writer thread
pub const FILE_CHANNEL_CAPACITY: usize = 1024;

/// Queue capacity between emitters and the broadcast thread
pub const BROADCAST_CHANNEL_CAPACITY: usize = 256;
