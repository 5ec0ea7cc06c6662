use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub mod allocation;
pub mod typescript_gen;

pub use allocation::{
    ActionEnvelope, Answer, AnswersResponse, ApiReply, ResponseRecord, SubmitResponseRequest,
    SubmitResponseResponse, ACTION_GET_ANSWERS, ACTION_SUBMIT_RESPONSE, ANSWER_NOT_FOUND,
    INVALID_ACTION,
};
pub use typescript_gen::generate_typescript_definitions;

/// Error body returned by every failing action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
