//! Adapters implementing the ports.
//!
//! Adapters depend on [`crate::ports`], never the other way around.

pub mod console_move_source;
pub mod in_memory_store;
pub mod json_file_store;
pub mod msgpack_snapshot;

pub use console_move_source::ConsoleMoveSource;
pub use in_memory_store::{InMemoryStore, NullStore};
pub use json_file_store::JsonFileStore;
pub use msgpack_snapshot::MsgPackSnapshots;
