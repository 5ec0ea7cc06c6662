use super::AllocationState;
use crate::allocation::{self, AllocationError};
use actix_web::{web, HttpResponse};
use chrono::SecondsFormat;
use serde::Deserialize;
use shared_types::{
    ActionEnvelope, AnswersResponse, ErrorResponse, SubmitResponseRequest, SubmitResponseResponse,
    ACTION_GET_ANSWERS, ACTION_SUBMIT_RESPONSE, INVALID_ACTION,
};
use tracing::{debug, error, info, warn};

#[derive(Debug, Deserialize)]
pub struct ActionQuery {
    pub action: Option<String>,
}

/// `GET ?action=getAnswers`
pub async fn get_action(
    query: Result<web::Query<ActionQuery>, actix_web::Error>,
    state: web::Data<AllocationState>,
) -> HttpResponse {
    let query = match query {
        Ok(query) => query,
        Err(e) => return rejected_request("Invalid query", e),
    };

    match query.action.as_deref() {
        Some(ACTION_GET_ANSWERS) => get_answers(&state).await,
        other => {
            warn!(action = ?other, "Rejected GET with invalid action");
            HttpResponse::BadRequest().json(ErrorResponse::new(INVALID_ACTION))
        }
    }
}

/// `POST { action: "submitResponse", name, selectedAnswerId, timestamp }`
pub async fn post_action(
    body: Result<web::Bytes, actix_web::Error>,
    state: web::Data<AllocationState>,
) -> HttpResponse {
    let body = match body {
        Ok(body) => body,
        Err(e) => return rejected_request("Invalid request body", e),
    };

    let envelope: ActionEnvelope = match serde_json::from_slice(&body) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(error = %e, "Rejected unparseable POST body");
            return HttpResponse::BadRequest()
                .json(ErrorResponse::new(format!("Invalid request body: {}", e)));
        }
    };

    match envelope.action.as_deref() {
        Some(ACTION_SUBMIT_RESPONSE) => {}
        other => {
            warn!(action = ?other, "Rejected POST with invalid action");
            return HttpResponse::BadRequest().json(ErrorResponse::new(INVALID_ACTION));
        }
    }

    let request: SubmitResponseRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "Rejected malformed submitResponse");
            return HttpResponse::BadRequest()
                .json(ErrorResponse::new(format!("Invalid request body: {}", e)));
        }
    };

    submit_response(&state, request).await
}

async fn get_answers(state: &AllocationState) -> HttpResponse {
    match allocation::list_answers(state.store.as_ref(), &state.layout).await {
        Ok(answers) => {
            debug!(count = answers.len(), "Listed available answers");
            HttpResponse::Ok().json(AnswersResponse { answers })
        }
        Err(e) => {
            error!(error = %e, "Failed to read answers");
            allocation_error_response(e)
        }
    }
}

async fn submit_response(state: &AllocationState, request: SubmitResponseRequest) -> HttpResponse {
    let timestamp = match request.timestamp {
        Some(timestamp) if !timestamp.trim().is_empty() => timestamp,
        _ => chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    };

    info!(answer_id = %request.selected_answer_id, "Submitting response");

    match allocation::submit_response(
        state.store.as_ref(),
        &state.layout,
        &request.name,
        &request.selected_answer_id,
        &timestamp,
    )
    .await
    {
        Ok(_) => HttpResponse::Ok().json(SubmitResponseResponse { success: true }),
        Err(e) => {
            if matches!(e, AllocationError::Store(_)) {
                error!(error = %e, "Failed to submit response");
            }
            allocation_error_response(e)
        }
    }
}

/// Extractor failures keep their status but get the `{ error }` body
fn rejected_request(context: &str, e: actix_web::Error) -> HttpResponse {
    let status = e.as_response_error().status_code();
    warn!(status = status.as_u16(), error = %e, "{}", context);
    HttpResponse::build(status).json(ErrorResponse::new(format!("{}: {}", context, e)))
}

fn allocation_error_response(e: AllocationError) -> HttpResponse {
    let body = ErrorResponse::new(e.to_string());
    match e {
        AllocationError::AnswerNotFound => HttpResponse::NotFound().json(body),
        AllocationError::Store(_) => HttpResponse::InternalServerError().json(body),
    }
}
