//! Stable error codes.
//!
//! Every error variant carries a `[TVAL_*]` code in its message and
//! exposes it through a `code()` accessor, so integrations can match on
//! codes instead of message text.

pub const ENGINE_READ_ONLY: &str = "TVAL_ENGINE_001";
pub const ENGINE_WRITE_UNSUPPORTED: &str = "TVAL_ENGINE_002";
pub const ENGINE_UNSUPPORTED_FORMAT: &str = "TVAL_ENGINE_003";

pub const COMPARE_ENGINE: &str = "TVAL_COMPARE_001";
pub const COMPARE_SINK: &str = "TVAL_COMPARE_002";

pub const SUMMARY_HEADERS_NOT_SET: &str = "TVAL_SUMMARY_001";
