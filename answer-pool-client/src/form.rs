use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use shared_types::Answer;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::{config::ClientConfig, error::ClientError, source::AnswerSource};

pub const NAME_REQUIRED: &str = "Name is required";
pub const NAME_TOO_SHORT: &str = "Name must be at least 2 characters";
pub const ANSWER_REQUIRED: &str = "Please select an answer";
pub const LOAD_FAILED: &str = "Failed to load available answers";
pub const CONFIRMATION: &str = "Your response has been submitted successfully!";

const MIN_NAME_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// No fetch has completed yet
    Loading,
    Ready,
    /// A claim is in flight; the form is disabled
    Submitting,
    /// Loaded, and every answer has been claimed
    Empty,
    /// The last fetch failed; any previous list is still shown
    Error,
}

/// Validation messages keyed by form field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<String>,
    pub answer: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.answer.is_none()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = [self.name.as_deref(), self.answer.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// A validated claim, ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub answer_id: String,
}

/// Checks the form fields without contacting the server
pub fn validate(name: &str, selected_answer_id: Option<&str>) -> Result<Submission, FieldErrors> {
    let mut errors = FieldErrors::default();
    let name = name.trim();

    if name.is_empty() {
        errors.name = Some(NAME_REQUIRED.to_string());
    } else if name.chars().count() < MIN_NAME_LEN {
        errors.name = Some(NAME_TOO_SHORT.to_string());
    }

    let answer_id = selected_answer_id.filter(|id| !id.is_empty());
    if answer_id.is_none() {
        errors.answer = Some(ANSWER_REQUIRED.to_string());
    }

    match answer_id {
        Some(answer_id) if errors.is_empty() => Ok(Submission {
            name: name.to_string(),
            answer_id: answer_id.to_string(),
        }),
        _ => Err(errors),
    }
}

/// State of the claim form: the answer list, the fields, and what the user
/// should currently see
pub struct AllocationForm {
    source: Arc<dyn AnswerSource>,
    answers: Vec<Answer>,
    loaded: bool,
    load_error: Option<String>,
    submit_error: Option<String>,
    submitting: bool,
    name: String,
    selected_answer_id: Option<String>,
    field_errors: FieldErrors,
    confirmed_at: Option<Instant>,
    confirmation_ttl: Duration,
}

impl AllocationForm {
    pub fn new(source: Arc<dyn AnswerSource>, config: &ClientConfig) -> Self {
        Self {
            source,
            answers: Vec::new(),
            loaded: false,
            load_error: None,
            submit_error: None,
            submitting: false,
            name: String::new(),
            selected_answer_id: None,
            field_errors: FieldErrors::default(),
            confirmed_at: None,
            confirmation_ttl: config.confirmation_ttl,
        }
    }

    pub fn source(&self) -> Arc<dyn AnswerSource> {
        self.source.clone()
    }

    pub fn phase(&self) -> FormPhase {
        if self.submitting {
            FormPhase::Submitting
        } else if self.load_error.is_some() {
            FormPhase::Error
        } else if !self.loaded {
            FormPhase::Loading
        } else if self.answers.is_empty() {
            FormPhase::Empty
        } else {
            FormPhase::Ready
        }
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn selected_answer_id(&self) -> Option<&str> {
        self.selected_answer_id.as_deref()
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// Error banner for the answer list, with a retry affordance
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Non-field error of the last submission
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.answers.is_empty()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn select_answer(&mut self, answer_id: impl Into<String>) {
        self.selected_answer_id = Some(answer_id.into());
    }

    /// Fetches the list and applies it. Also the manual retry action.
    pub async fn refresh(&mut self) {
        let result = self.source.fetch_answers().await;
        self.apply_fetch(result);
    }

    /// Applies the outcome of a fetch. A failure keeps the previous list.
    pub fn apply_fetch(&mut self, result: Result<Vec<Answer>, ClientError>) {
        self.loaded = true;

        match result {
            Ok(answers) => {
                self.answers = answers;
                self.load_error = None;

                let still_listed = self
                    .selected_answer_id
                    .as_ref()
                    .map_or(true, |id| self.answers.iter().any(|answer| &answer.id == id));
                if !still_listed {
                    self.selected_answer_id = None;
                }
            }
            Err(e) => {
                warn!(error = %e, "Keeping previous answers after failed fetch");
                self.load_error = Some(LOAD_FAILED.to_string());
            }
        }
    }

    /// Validates the fields and enters `Submitting`
    pub fn begin_submit(&mut self) -> Result<Submission, ClientError> {
        if self.submitting {
            return Err(ClientError::SubmissionInProgress);
        }

        let submission = validate(&self.name, self.selected_answer_id.as_deref()).map_err(
            |errors| {
                self.field_errors = errors.clone();
                ClientError::Validation(errors)
            },
        )?;

        self.field_errors = FieldErrors::default();
        self.submit_error = None;
        self.submitting = true;

        Ok(submission)
    }

    /// Leaves `Submitting`. On success the claimed answer is dropped from the
    /// local list straight away and the fields are cleared.
    pub fn finish_submit(
        &mut self,
        submission: &Submission,
        result: Result<(), ClientError>,
        now: Instant,
    ) -> Result<(), ClientError> {
        self.submitting = false;

        match result {
            Ok(()) => {
                self.answers
                    .retain(|answer| answer.id != submission.answer_id);
                self.name.clear();
                self.selected_answer_id = None;
                self.confirmed_at = Some(now);

                info!(answer_id = %submission.answer_id, "Response submitted");
                Ok(())
            }
            Err(e) => {
                self.submit_error = Some(format!("Failed to submit response: {}", e));
                Err(e)
            }
        }
    }

    pub async fn submit(&mut self) -> Result<(), ClientError> {
        let submission = self.begin_submit()?;
        let result = self
            .source
            .submit_response(&submission.name, &submission.answer_id)
            .await;
        self.finish_submit(&submission, result, Instant::now())
    }

    /// The success message, until it expires
    pub fn confirmation(&self, now: Instant) -> Option<&'static str> {
        self.confirmed_at
            .filter(|confirmed_at| now.saturating_duration_since(*confirmed_at) < self.confirmation_ttl)
            .map(|_| CONFIRMATION)
    }

    pub fn clear_expired_confirmation(&mut self, now: Instant) {
        if self.confirmation(now).is_none() {
            self.confirmed_at = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays scripted fetch and submit outcomes and records claims
    #[derive(Default)]
    struct ScriptedSource {
        fetches: Mutex<VecDeque<Result<Vec<Answer>, ClientError>>>,
        submits: Mutex<VecDeque<Result<(), ClientError>>>,
        claims: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedSource {
        fn with_fetches(fetches: Vec<Result<Vec<Answer>, ClientError>>) -> Self {
            Self {
                fetches: Mutex::new(fetches.into()),
                ..Default::default()
            }
        }

        fn push_submit(&self, result: Result<(), ClientError>) {
            self.submits.lock().unwrap().push_back(result);
        }

        fn claims(&self) -> Vec<(String, String)> {
            self.claims.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AnswerSource for ScriptedSource {
        async fn fetch_answers(&self) -> Result<Vec<Answer>, ClientError> {
            self.fetches
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn submit_response(
            &self,
            name: &str,
            selected_answer_id: &str,
        ) -> Result<(), ClientError> {
            self.claims
                .lock()
                .unwrap()
                .push((name.to_string(), selected_answer_id.to_string()));
            self.submits.lock().unwrap().pop_front().unwrap_or(Ok(()))
        }
    }

    fn fruits() -> Vec<Answer> {
        vec![Answer::new("1", "Apple"), Answer::new("2", "Banana")]
    }

    fn form_with(source: Arc<ScriptedSource>) -> AllocationForm {
        AllocationForm::new(source, &ClientConfig::default())
    }

    #[test]
    fn test_validate_name_length() {
        let err = validate("A", Some("1")).unwrap_err();
        assert_eq!(err.name.as_deref(), Some(NAME_TOO_SHORT));
        assert!(err.answer.is_none());

        let ok = validate("Al", Some("1")).unwrap();
        assert_eq!(ok.name, "Al");

        let err = validate("   ", Some("1")).unwrap_err();
        assert_eq!(err.name.as_deref(), Some(NAME_REQUIRED));

        let err = validate(" A ", Some("1")).unwrap_err();
        assert_eq!(err.name.as_deref(), Some(NAME_TOO_SHORT));
    }

    #[test]
    fn test_validate_requires_answer() {
        let err = validate("Alice", None).unwrap_err();
        assert_eq!(err.answer.as_deref(), Some(ANSWER_REQUIRED));
        assert!(err.name.is_none());

        let err = validate("", Some("")).unwrap_err();
        assert!(err.name.is_some());
        assert!(err.answer.is_some());
        assert_eq!(err.to_string(), format!("{}; {}", NAME_REQUIRED, ANSWER_REQUIRED));
    }

    #[test]
    fn test_validate_trims_name() {
        let submission = validate("  Alice  ", Some("2")).unwrap();
        assert_eq!(
            submission,
            Submission {
                name: "Alice".to_string(),
                answer_id: "2".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_phase_transitions_from_loading() {
        let source = Arc::new(ScriptedSource::with_fetches(vec![Ok(fruits()), Ok(Vec::new())]));
        let mut form = form_with(source);
        assert_eq!(form.phase(), FormPhase::Loading);

        form.refresh().await;
        assert_eq!(form.phase(), FormPhase::Ready);

        form.refresh().await;
        assert_eq!(form.phase(), FormPhase::Empty);
        assert!(!form.can_submit());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_stale_list() {
        let source = Arc::new(ScriptedSource::with_fetches(vec![
            Ok(fruits()),
            Err(ClientError::remote("Sheet 'Answers' not found")),
            Ok(vec![Answer::new("2", "Banana")]),
        ]));
        let mut form = form_with(source);

        form.refresh().await;
        form.refresh().await;
        assert_eq!(form.phase(), FormPhase::Error);
        assert_eq!(form.load_error(), Some(LOAD_FAILED));
        assert_eq!(form.answers(), fruits().as_slice());
        assert!(form.can_submit());

        form.refresh().await;
        assert_eq!(form.phase(), FormPhase::Ready);
        assert!(form.load_error().is_none());
        assert_eq!(form.answers().len(), 1);
    }

    #[tokio::test]
    async fn test_first_fetch_failure_ends_loading_with_error() {
        let source = Arc::new(ScriptedSource::with_fetches(vec![Err(ClientError::network(
            "connection refused",
        ))]));
        let mut form = form_with(source);

        form.refresh().await;

        assert_eq!(form.phase(), FormPhase::Error);
        assert!(form.answers().is_empty());
    }

    #[tokio::test]
    async fn test_validation_blocks_submission() {
        let source = Arc::new(ScriptedSource::with_fetches(vec![Ok(fruits())]));
        let mut form = form_with(source.clone());
        form.refresh().await;

        form.set_name("A");
        let err = form.submit().await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(form.field_errors().name.as_deref(), Some(NAME_TOO_SHORT));
        assert_eq!(form.field_errors().answer.as_deref(), Some(ANSWER_REQUIRED));
        assert!(source.claims().is_empty());
        assert_eq!(form.phase(), FormPhase::Ready);
    }

    #[tokio::test]
    async fn test_successful_submit_removes_answer_and_confirms() {
        let source = Arc::new(ScriptedSource::with_fetches(vec![Ok(fruits())]));
        let mut form = form_with(source.clone());
        form.refresh().await;

        form.set_name("  Alice ");
        form.select_answer("1");
        form.submit().await.unwrap();

        assert_eq!(source.claims(), vec![("Alice".to_string(), "1".to_string())]);
        assert_eq!(form.answers(), &[Answer::new("2", "Banana")]);
        assert_eq!(form.name(), "");
        assert!(form.selected_answer_id().is_none());
        assert!(form.field_errors().is_empty());
        assert_eq!(form.confirmation(Instant::now()), Some(CONFIRMATION));
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_form_populated() {
        let source = Arc::new(ScriptedSource::with_fetches(vec![Ok(fruits())]));
        source.push_submit(Err(ClientError::remote("Answer not found or already taken")));
        let mut form = form_with(source);
        form.refresh().await;

        form.set_name("Bob");
        form.select_answer("1");
        let err = form.submit().await.unwrap_err();

        assert!(matches!(err, ClientError::Remote { .. }));
        assert_eq!(form.phase(), FormPhase::Ready);
        assert_eq!(
            form.submit_error(),
            Some("Failed to submit response: Answer not found or already taken")
        );
        assert_eq!(form.name(), "Bob");
        assert_eq!(form.selected_answer_id(), Some("1"));
        assert_eq!(form.answers().len(), 2);
        assert!(form.confirmation(Instant::now()).is_none());
    }

    #[tokio::test]
    async fn test_submitting_is_a_sub_state_of_ready() {
        let source = Arc::new(ScriptedSource::with_fetches(vec![Ok(fruits())]));
        let mut form = form_with(source);
        form.refresh().await;
        form.set_name("Alice");
        form.select_answer("2");

        let submission = form.begin_submit().unwrap();
        assert_eq!(form.phase(), FormPhase::Submitting);
        assert!(!form.can_submit());
        assert!(matches!(
            form.begin_submit(),
            Err(ClientError::SubmissionInProgress)
        ));

        form.finish_submit(&submission, Ok(()), Instant::now())
            .unwrap();
        assert_eq!(form.phase(), FormPhase::Ready);
        assert_eq!(form.answers(), &[Answer::new("1", "Apple")]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirmation_expires() {
        let source = Arc::new(ScriptedSource::with_fetches(vec![Ok(fruits())]));
        let mut form = form_with(source);
        form.refresh().await;
        form.set_name("Alice");
        form.select_answer("1");
        form.submit().await.unwrap();

        tokio::time::advance(Duration::from_millis(4_900)).await;
        assert!(form.confirmation(Instant::now()).is_some());

        tokio::time::advance(Duration::from_millis(200)).await;
        assert!(form.confirmation(Instant::now()).is_none());

        form.clear_expired_confirmation(Instant::now());
        assert!(form.confirmation(Instant::now()).is_none());
    }

    #[tokio::test]
    async fn test_refresh_drops_selection_that_disappeared() {
        let source = Arc::new(ScriptedSource::with_fetches(vec![
            Ok(fruits()),
            Ok(vec![Answer::new("2", "Banana")]),
        ]));
        let mut form = form_with(source);
        form.refresh().await;
        form.select_answer("1");

        form.refresh().await;

        assert!(form.selected_answer_id().is_none());
    }
}
