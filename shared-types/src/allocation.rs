use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ErrorResponse;

pub const ACTION_GET_ANSWERS: &str = "getAnswers";
pub const ACTION_SUBMIT_RESPONSE: &str = "submitResponse";

pub const ANSWER_NOT_FOUND: &str = "Answer not found or already taken";
pub const INVALID_ACTION: &str = "Invalid action";

/// One claimable option from the Answers sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Answer {
    pub id: String,
    pub text: String,
}

impl Answer {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswersResponse {
    pub answers: Vec<Answer>,
}

/// Body of `POST { action: "submitResponse", ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SubmitResponseRequest {
    pub action: String,
    pub name: String,
    pub selected_answer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub timestamp: Option<String>,
}

impl SubmitResponseRequest {
    pub fn new(
        name: impl Into<String>,
        selected_answer_id: impl Into<String>,
        timestamp: Option<String>,
    ) -> Self {
        Self {
            action: ACTION_SUBMIT_RESPONSE.to_string(),
            name: name.into(),
            selected_answer_id: selected_answer_id.into(),
            timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmitResponseResponse {
    pub success: bool,
}

/// A row of the Responses sheet: who claimed what, and when
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ResponseRecord {
    pub name: String,
    pub answer_text: String,
    pub timestamp: String,
}

/// Only the action selector of a POST body, read before the full payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionEnvelope {
    #[serde(default)]
    pub action: Option<String>,
}

/// Any reply of the allocation endpoint. Error payloads take precedence.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ApiReply<T> {
    Error(ErrorResponse),
    Ok(T),
}

impl<T> ApiReply<T> {
    pub fn into_result(self) -> Result<T, String> {
        match self {
            ApiReply::Ok(value) => Ok(value),
            ApiReply::Error(err) => Err(err.error),
        }
    }
}
