pub mod migrations;
pub mod sqlite;

use async_trait::async_trait;
use thiserror::Error;

pub use sqlite::SqliteSheetStore;


#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Sheet '{0}' not found")]
    SheetNotFound(String),

    #[error("Storage operation failed: {0}")]
    OperationFailed(String),

    #[error("Invalid row data: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl StoreError {
    pub fn operation_failed<S: Into<String>>(message: S) -> Self {
        Self::OperationFailed(message.into())
    }
}

/// Stable identity of a row. Unlike its position, it survives inserts and
/// deletes of other rows.
pub type RowKey = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub key: RowKey,
    pub cells: Vec<String>,
}

/// Row-level access to a spreadsheet-like store.
///
/// The header is the first row of every sheet. No operation locks across
/// calls, so a key read earlier may already be gone when it is deleted.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// All rows of the sheet in table order with their keys, header included
    async fn read_keyed_rows(&self, sheet: &str) -> Result<Vec<SheetRow>, StoreError>;

    /// All rows of the sheet in table order, header included
    async fn read_rows(&self, sheet: &str) -> Result<Vec<Vec<String>>, StoreError> {
        let rows = self.read_keyed_rows(sheet).await?;
        Ok(rows.into_iter().map(|row| row.cells).collect())
    }

    async fn append_row(&self, sheet: &str, cells: Vec<String>) -> Result<(), StoreError>;

    /// Deletes the row with `key`. Returns false when no such row is left.
    async fn delete_row(&self, sheet: &str, key: RowKey) -> Result<bool, StoreError>;

    /// Creates the sheet with a header row unless it already exists.
    /// Returns true when the sheet was created.
    async fn ensure_sheet(&self, sheet: &str, header: &[&str]) -> Result<bool, StoreError>;

    /// Drops every row of the sheet and writes a fresh header
    async fn clear_sheet(&self, sheet: &str, header: &[&str]) -> Result<(), StoreError>;

    async fn sheet_names(&self) -> Result<Vec<String>, StoreError>;
}
