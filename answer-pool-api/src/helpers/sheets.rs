use crate::allocation::{list_answers, AllocationError, SheetLayout, ANSWERS_HEADER, RESPONSES_HEADER};
use crate::storage::{SheetStore, StoreError};
use shared_types::Answer;
use tracing::{info, warn};

pub const SAMPLE_ANSWERS: [&str; 5] = ["Apple", "Banana", "Orange", "Grape", "Strawberry"];

/// Creates both sheets if needed and resets them to their headers, then
/// fills Answers with `answers`, numbering ids from 1.
///
/// Destructive: previous answers and responses are dropped.
pub async fn initialize_sheets(
    store: &dyn SheetStore,
    layout: &SheetLayout,
    answers: &[&str],
) -> Result<(), StoreError> {
    store.ensure_sheet(&layout.answers, &ANSWERS_HEADER).await?;
    store.clear_sheet(&layout.answers, &ANSWERS_HEADER).await?;

    store
        .ensure_sheet(&layout.responses, &RESPONSES_HEADER)
        .await?;
    store
        .clear_sheet(&layout.responses, &RESPONSES_HEADER)
        .await?;

    for (index, text) in answers.iter().enumerate() {
        store
            .append_row(&layout.answers, vec![(index + 1).to_string(), text.to_string()])
            .await?;
    }

    info!(
        answers_sheet = %layout.answers,
        responses_sheet = %layout.responses,
        seeded = answers.len(),
        "Initialized sheets"
    );

    Ok(())
}

/// Creates missing sheets with their headers without touching existing ones
pub async fn ensure_sheets(store: &dyn SheetStore, layout: &SheetLayout) -> Result<(), StoreError> {
    if store.ensure_sheet(&layout.answers, &ANSWERS_HEADER).await? {
        info!(sheet = %layout.answers, "Created missing sheet");
    }
    if store
        .ensure_sheet(&layout.responses, &RESPONSES_HEADER)
        .await?
    {
        info!(sheet = %layout.responses, "Created missing sheet");
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetReport {
    pub answers_sheet_found: bool,
    pub responses_sheet_found: bool,
    pub available: Vec<Answer>,
}

impl SheetReport {
    pub fn is_healthy(&self) -> bool {
        self.answers_sheet_found && self.responses_sheet_found
    }
}

/// Reports which sheets exist and what is currently claimable
pub async fn check_sheets(
    store: &dyn SheetStore,
    layout: &SheetLayout,
) -> Result<SheetReport, StoreError> {
    let names = store.sheet_names().await?;
    let answers_sheet_found = names.contains(&layout.answers);
    let responses_sheet_found = names.contains(&layout.responses);

    let available = if answers_sheet_found {
        match list_answers(store, layout).await {
            Ok(answers) => answers,
            Err(AllocationError::Store(e)) => return Err(e),
            Err(e) => return Err(StoreError::operation_failed(e.to_string())),
        }
    } else {
        Vec::new()
    };

    let report = SheetReport {
        answers_sheet_found,
        responses_sheet_found,
        available,
    };

    if report.is_healthy() {
        info!(available = report.available.len(), "Sheets found");
    } else {
        warn!(
            answers_sheet_found,
            responses_sheet_found, "Sheets missing, run `answer-pool-api seed`"
        );
    }

    Ok(report)
}
