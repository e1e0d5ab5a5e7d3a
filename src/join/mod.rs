//! Concurrent month data join.
//!
//! This module provides the [`AttendanceSource`] abstraction over the four month
//! inputs and the [`DataJoinController`] that fetches them concurrently, waits on
//! all four, and runs the reconciliation for the current selection only.

mod controller;
mod source;

pub use controller::{DataJoinController, JoinOutcome, JoinState, SourceStatuses};
pub use source::{AttendanceSource, SnapshotSource, SourceKind, SourceStatus};
