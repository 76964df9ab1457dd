//! Persistence boundary.
//!
//! The core never talks to storage. It encodes a [`GameState`](crate::rules::GameState)
//! into a flat [`Snapshot`] and decodes one back; the host decides where the
//! snapshot lives.

pub mod snapshot;

pub use snapshot::{from_snapshot, keys, to_snapshot, Snapshot, SnapshotValue};
