use crate::error::ClientError;
use async_trait::async_trait;
use shared_types::Answer;

/// Where the form gets its answers from and sends its claims to
#[async_trait]
pub trait AnswerSource: Send + Sync {
    async fn fetch_answers(&self) -> Result<Vec<Answer>, ClientError>;

    async fn submit_response(&self, name: &str, selected_answer_id: &str)
        -> Result<(), ClientError>;
}
