//! Verbosity flags
//!
//! Bitmask of message kinds currently allowed through for a category.
//! The registry only stores, unions, and subtracts these masks; what each
//! bit means for formatting is the sink's business.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Set of independently toggleable verbosity bits.
    ///
    /// Bits are combined with `|` and removed with `-`:
    ///
    /// ```rust
    /// use log_registry::Verbosity;
    ///
    /// let v = Verbosity::ERROR | Verbosity::DEBUG;
    /// assert!(v.contains(Verbosity::ERROR));
    /// assert!(!(v - Verbosity::DEBUG).contains(Verbosity::DEBUG));
    /// ```
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    pub struct Verbosity: u32 {
        /// Errors and failed operations
        const ERROR = 0b0000_0001;
        /// Unusual but survivable conditions
        const WARN  = 0b0000_0010;
        /// Normal operational messages
        const INFO  = 0b0000_0100;
        /// Verbose diagnostics
        const DEBUG = 0b0000_1000;
        /// Raw payload dumps
        const RAW   = 0b0001_0000;
    }
}

impl fmt::Display for Verbosity {
    /// Format as `NONE` when empty or as flag names joined by `|` otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NONE");
        }
        bitflags::parser::to_writer(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_and_subtract() {
        let v = Verbosity::ERROR | Verbosity::DEBUG;
        assert!(v.contains(Verbosity::ERROR));
        assert!(v.contains(Verbosity::DEBUG));
        assert!(!v.contains(Verbosity::INFO));

        let v = v - Verbosity::ERROR;
        assert_eq!(v, Verbosity::DEBUG);
    }

    #[test]
    fn test_union_is_idempotent() {
        let v = Verbosity::WARN | Verbosity::WARN;
        assert_eq!(v, Verbosity::WARN);
    }

    #[test]
    fn test_display_empty_is_none() {
        assert_eq!(Verbosity::empty().to_string(), "NONE");
    }

    #[test]
    fn test_display_joins_flags() {
        let s = (Verbosity::ERROR | Verbosity::RAW).to_string();
        assert!(s.contains("ERROR"));
        assert!(s.contains("RAW"));
        assert!(s.contains('|'));
    }

    #[test]
    fn test_serde_roundtrip() {
        let v = Verbosity::ERROR | Verbosity::DEBUG;
        let json = serde_json::to_string(&v).unwrap();
        let parsed: Verbosity = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, v);
    }
}
