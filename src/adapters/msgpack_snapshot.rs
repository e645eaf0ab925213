//! MessagePack implementation of the snapshot repository.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use crate::{
    Result,
    error::Error,
    ports::{Snapshot, SnapshotRepository},
};

/// Writes snapshots as a single MessagePack document via `rmp_serde`.
///
/// # Examples
///
/// ```no_run
/// use selfplay::adapters::{MsgPackSnapshots, NullStore};
/// use selfplay::engine::StateRegistry;
/// use selfplay::ports::SnapshotRepository;
/// use std::path::Path;
///
/// let registry = StateRegistry::new(NullStore);
/// MsgPackSnapshots.save(&registry.snapshot(), Path::new("trained.msgpack"))?;
/// # Ok::<(), selfplay::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackSnapshots;

impl SnapshotRepository for MsgPackSnapshots {
    fn save(&self, snapshot: &Snapshot, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write_named(&mut writer, snapshot).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize snapshot to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;
        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush {path:?}"),
            source,
        })
    }

    fn load(&self, path: &Path) -> Result<Snapshot> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        rmp_serde::decode::from_read(BufReader::new(file)).map_err(|e| {
            Error::SerializationContext {
                operation: "deserialize snapshot from MessagePack".to_string(),
                message: e.to_string(),
            }
        })
    }
}
