use answer_pool_client::ClientConfig;

use super::{build_form, render_answers};
use crate::{cli::OutputFormat, error::CliError};

pub async fn list_answers(config: &ClientConfig, format: &OutputFormat) -> Result<(), CliError> {
    let mut form = build_form(config)?;
    form.refresh().await;

    match format {
        OutputFormat::Json => {
            if let Some(error) = form.load_error() {
                return Err(CliError::Communication(error.to_string()));
            }
            println!("{}", serde_json::to_string_pretty(form.answers())?);
        }
        OutputFormat::Text => print!("{}", render_answers(&form)),
    }

    Ok(())
}
