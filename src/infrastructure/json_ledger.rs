use crate::domain::order::Order;
use crate::domain::ports::OrderLedger;
use crate::error::Result;
use async_trait::async_trait;
use std::fs;
use std::path::PathBuf;
use tokio::sync::Mutex;

/// Append-only order ledger persisted as a single JSON array-of-objects
/// file.
///
/// Every append reads the full collection, pushes the entry, and rewrites
/// the whole file. The writer mutex covers the entire read-modify-write, so
/// concurrent handlers cannot interleave appends. A missing file reads as
/// an empty ledger; any other I/O or parse failure propagates to the caller
/// without touching the file.
pub struct JsonFileLedger {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn read_all(&self) -> Result<Vec<Order>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl OrderLedger for JsonFileLedger {
    async fn append(&self, entry: Order) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_all()?;
        entries.push(entry);
        fs::write(&self.path, serde_json::to_vec_pretty(&entries)?)?;
        Ok(())
    }

    async fn recent(&self, n: usize) -> Result<Vec<Order>> {
        let _guard = self.write_lock.lock().await;
        let entries = self.read_all()?;
        let start = entries.len().saturating_sub(n);
        Ok(entries[start..].to_vec())
    }
}
