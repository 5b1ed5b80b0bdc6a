#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod convert;
mod memory;
mod sql;

use std::path::Path;
use std::sync::Arc;

use strand_core::StringRecordRepo;
use tracing::info;

pub use memory::MemoryStore;
pub use sql::SqlStore;

/// URL that selects the in-process store instead of a database.
pub const MEMORY_URL: &str = "memory";

/// Open the store named by `url`: [`MEMORY_URL`] for the in-process store,
/// anything else is handed to sea-orm.
pub async fn open(url: &str) -> anyhow::Result<Arc<dyn StringRecordRepo>> {
    if url == MEMORY_URL {
        info!("Using in-memory string store");
        return Ok(Arc::new(MemoryStore::new()));
    }
    ensure_sqlite_parent(url)?;
    Ok(Arc::new(SqlStore::new(url).await?))
}

/// Create the directory holding a file-backed SQLite database.
fn ensure_sqlite_parent(url: &str) -> anyhow::Result<()> {
    let Some(rest) = url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = rest.split_once('?').map_or(rest, |(path, _)| path);
    if path.is_empty() || path.contains(":memory:") {
        return Ok(());
    }

    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}
