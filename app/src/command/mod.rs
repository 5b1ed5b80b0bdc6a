//! Static strategy pattern for CLI commands.
//!
//! Each subcommand is its own zero-sized strategy type with a typed input,
//! dispatched statically from `main`.

use serde::Serialize;
use std::sync::Arc;
use strand_core::StringCatalog;

mod add;
mod analyze;
mod delete;
mod get;
mod info;
mod init;
mod list;
mod query;
mod version;

pub use add::AddStrategy;
pub use analyze::{AnalyzeInput, AnalyzeStrategy};
pub use delete::DeleteStrategy;
pub use get::GetStrategy;
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use list::{ListInput, ListStrategy};
pub use query::QueryStrategy;
pub use version::VersionStrategy;

/// Input shared by commands that act on one string against the catalog.
pub struct ValueInput {
    pub catalog: Arc<StringCatalog>,
    pub value: String,
}

/// Contract for all command strategies.
///
/// Each strategy defines its own input type, so adding a command is a new
/// type plus an impl of this trait.
pub trait CommandStrategy: Send + Sync + 'static {
    type Input;

    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Write a value to stdout as pretty JSON.
fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
