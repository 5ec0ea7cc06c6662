//! Command implementations for the answer-pool CLI

pub mod claim;
pub mod list;
pub mod watch;

pub use claim::*;
pub use list::*;
pub use watch::*;

use answer_pool_client::{AllocationClient, AllocationForm, ClientConfig, FormPhase};
use std::sync::Arc;

use crate::error::CliError;

fn build_form(config: &ClientConfig) -> Result<AllocationForm, CliError> {
    let client = AllocationClient::new(config)?;
    if !client.is_configured() {
        eprintln!("No endpoint configured, showing the built-in demo answers.");
    }
    Ok(AllocationForm::new(Arc::new(client), config))
}

/// Plain-text rendering of the form's answer list
fn render_answers(form: &AllocationForm) -> String {
    let mut out = String::new();

    if let Some(error) = form.load_error() {
        out.push_str(&format!("! {} (will retry)\n", error));
    }

    match form.phase() {
        FormPhase::Loading => out.push_str("Loading available answers...\n"),
        FormPhase::Empty => {
            out.push_str("No options available. All answers have been selected.\n")
        }
        _ => {
            for answer in form.answers() {
                out.push_str(&format!("{:>4}  {}\n", answer.id, answer.text));
            }
        }
    }

    let count = form.answers().len();
    out.push_str(&format!(
        "{} option{} available\n",
        count,
        if count == 1 { "" } else { "s" }
    ));
    out
}
