//! First-come-first-served claiming of answers.
//!
//! A claim scans the Answers sheet, appends the claimant to Responses and
//! only then deletes the matched answer row by its key. Nothing serializes
//! two claims of the same answer: both may pass the scan before either
//! delete runs, and both are recorded. Claims of different answers never
//! remove each other's rows.

use crate::storage::{SheetStore, StoreError};
use serde::{Deserialize, Serialize};
use shared_types::{Answer, ResponseRecord, ANSWER_NOT_FOUND};
use thiserror::Error;
use tracing::{info, warn};

pub const ANSWERS_HEADER: [&str; 2] = ["ID", "Text"];
pub const RESPONSES_HEADER: [&str; 3] = ["Name", "Selected Answer", "Timestamp"];

#[derive(Error, Debug)]
pub enum AllocationError {
    #[error("{}", ANSWER_NOT_FOUND)]
    AnswerNotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Names of the two sheets the allocator works on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLayout {
    pub answers: String,
    pub responses: String,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            answers: "Answers".to_string(),
            responses: "Responses".to_string(),
        }
    }
}

fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(|c| c.trim()).unwrap_or_default()
}

fn answer_from_row(row: &[String]) -> Option<Answer> {
    let id = cell(row, 0);
    let text = cell(row, 1);

    if id.is_empty() || text.is_empty() {
        return None;
    }

    Some(Answer::new(id, text))
}

/// Every claimable answer in sheet order. Rows with a blank id or text are
/// never listed.
pub async fn list_answers(
    store: &dyn SheetStore,
    layout: &SheetLayout,
) -> Result<Vec<Answer>, AllocationError> {
    let rows = store.read_rows(&layout.answers).await?;

    Ok(rows
        .iter()
        .skip(1)
        .filter_map(|row| answer_from_row(row))
        .collect())
}

/// Claims `selected_answer_id` for `name`.
///
/// The earliest row whose trimmed id matches wins. `name` and `timestamp`
/// are stored verbatim.
pub async fn submit_response(
    store: &dyn SheetStore,
    layout: &SheetLayout,
    name: &str,
    selected_answer_id: &str,
    timestamp: &str,
) -> Result<ResponseRecord, AllocationError> {
    let wanted = selected_answer_id.trim();
    let rows = store.read_keyed_rows(&layout.answers).await?;

    let matched = rows
        .iter()
        .skip(1)
        .find(|row| cell(&row.cells, 0) == wanted)
        .map(|row| (row.key, cell(&row.cells, 1).to_string()));

    let (key, answer_text) = match matched {
        Some((key, text)) if !wanted.is_empty() && !text.is_empty() => (key, text),
        _ => {
            warn!(answer_id = %wanted, "Answer not found or already taken");
            return Err(AllocationError::AnswerNotFound);
        }
    };

    let record = ResponseRecord {
        name: name.to_string(),
        answer_text,
        timestamp: timestamp.to_string(),
    };

    store
        .append_row(
            &layout.responses,
            vec![
                record.name.clone(),
                record.answer_text.clone(),
                record.timestamp.clone(),
            ],
        )
        .await?;

    if !store.delete_row(&layout.answers, key).await? {
        warn!(answer_id = %wanted, "Answer row was removed by a concurrent claim");
    }

    info!(
        answer_id = %wanted,
        answer_text = %record.answer_text,
        "Answer claimed"
    );

    Ok(record)
}

/// Every recorded claim, oldest first
pub async fn list_responses(
    store: &dyn SheetStore,
    layout: &SheetLayout,
) -> Result<Vec<ResponseRecord>, AllocationError> {
    let rows = store.read_rows(&layout.responses).await?;

    Ok(rows
        .iter()
        .skip(1)
        .map(|row| ResponseRecord {
            name: row.first().cloned().unwrap_or_default(),
            answer_text: row.get(1).cloned().unwrap_or_default(),
            timestamp: row.get(2).cloned().unwrap_or_default(),
        })
        .collect())
}
