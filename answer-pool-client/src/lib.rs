//! # answer-pool client
//!
//! Talks to the allocation endpoint and keeps the state of the claim form.
//!
//! ## Example
//!
//! ```rust,no_run
//! use answer_pool_client::{AllocationClient, AllocationForm, ClientConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::default().with_endpoint("http://127.0.0.1:8080/");
//!     let client = Arc::new(AllocationClient::new(&config)?);
//!
//!     let mut form = AllocationForm::new(client, &config);
//!     form.refresh().await;
//!
//!     if let Some(answer) = form.answers().first().cloned() {
//!         form.set_name("Alice");
//!         form.select_answer(&answer.id);
//!         form.submit().await?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod mock;
pub mod poller;
pub mod source;

pub use client::AllocationClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use form::{validate, AllocationForm, FieldErrors, FormPhase, Submission};
pub use poller::{spawn_poller, PollerHandle};
pub use source::AnswerSource;
pub use shared_types::Answer;
