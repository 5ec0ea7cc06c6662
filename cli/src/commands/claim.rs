use answer_pool_client::ClientConfig;
use tokio::time::Instant;
use tracing::info;

use super::{build_form, render_answers};
use crate::error::CliError;

pub async fn claim_answer(config: &ClientConfig, name: &str, answer: &str) -> Result<(), CliError> {
    let mut form = build_form(config)?;
    form.refresh().await;

    form.set_name(name);
    form.select_answer(answer);
    form.submit().await?;

    info!(answer_id = %answer, "Claimed answer");
    if let Some(message) = form.confirmation(Instant::now()) {
        println!("{}", message);
    }
    print!("{}", render_answers(&form));

    Ok(())
}
