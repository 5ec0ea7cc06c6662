use answer_pool_client::{spawn_poller, ClientConfig};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{build_form, render_answers};
use crate::error::CliError;

/// Prints the list after every poll until interrupted
pub async fn watch_answers(config: &ClientConfig) -> Result<(), CliError> {
    let form = Arc::new(Mutex::new(build_form(config)?));
    let poller = spawn_poller(form.clone(), config.poll_interval);
    let mut refreshed = poller.refreshed();

    loop {
        let keep_going = tokio::select! {
            changed = refreshed.changed() => changed.is_ok(),
            signal = tokio::signal::ctrl_c() => {
                signal?;
                false
            }
        };
        if !keep_going {
            break;
        }

        let count = *refreshed.borrow();
        let form = form.lock().await;
        println!("--- refresh #{} ---", count);
        print!("{}", render_answers(&form));
    }

    poller.stop();
    Ok(())
}
