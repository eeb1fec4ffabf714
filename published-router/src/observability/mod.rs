//! Structured logging vocabulary.
//!
//! Canonical `event` names and field-format helpers used by every log line in
//! the crate. Library code emits events/spans through `tracing` and never
//! installs a global subscriber; binaries and tests own one-time subscriber
//! initialization.

pub mod events;
pub mod fields;
