//! Shared primitive aliases used across the client crates.

/// Block height. Zero means "latest" in query contexts.
pub type Height = i64;

/// Per-account transaction sequence number (replay protection).
pub type Sequence = u64;
