//! Append-only audit trail of completion responses
//!
//! Every annotation produces exactly one [`AuditLogEntry`]: the raw provider
//! response on success, the diagnostic on failure. Entries are written as
//! JSON lines so each one parses on its own.

mod entry;
mod sink;


pub use entry::{AuditLogEntry, AuditOutcome};
pub use sink::{AuditSink, JsonlAuditSink, MemoryAuditSink};
