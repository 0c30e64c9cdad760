//! Submission Controller: payload serialization, credential attachment, the
//! single POST, and the redirect-and-replace step.

use serde_json::{json, Map, Value};

use crate::errors::FormError;
use crate::form::widgets::ValidityError;
use crate::form::Form;
use crate::transport::{Transport, CONFIG_TOKEN_HEADER};

const REDIRECT_SUFFIX: &str = ".plain.html";

/// Outcome of one submission request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub success: bool,
    pub status: u16,
    pub message: String,
}

/// What pressing submit did. Rejections and invalid states leave the form
/// fully interactive; the caller presents the message and the user may retry.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// A control failed native-style validation; no request was issued.
    Invalid(ValidityError),
    /// The backend rejected the submission.
    Rejected(SubmissionResult),
    /// Accepted, but no redirect target was declared; nothing was replaced.
    Accepted(SubmissionResult),
    /// Accepted, and the confirmation content was fetched. The form view is
    /// replaced by `html` in a one-shot, non-reversible transition.
    Redirected {
        result: SubmissionResult,
        html: String,
    },
}

/// Issues exactly one POST with the dialect implied by the form's tokens:
/// token mode sends the flat payload plus `csrfToken` under a config-token
/// header, plain mode wraps the payload as `{ "data": payload }`.
pub(crate) fn submit(form: &Form, transport: &dyn Transport) -> Result<SubmissionResult, FormError> {
    let mut payload = Map::new();
    for (key, value) in form.payload() {
        payload.insert(key, Value::String(value));
    }

    let response = match form.csrf_token() {
        Some(csrf) => {
            payload.insert("csrfToken".to_string(), Value::String(csrf.to_string()));
            let token = form.config_token().unwrap_or_default();
            transport.post_json(
                form.action(),
                &[(CONFIG_TOKEN_HEADER, token)],
                &Value::Object(payload),
            )?
        }
        None => transport.post_json(form.action(), &[], &json!({ "data": Value::Object(payload) }))?,
    };

    Ok(SubmissionResult {
        success: response.is_success(),
        status: response.status,
        message: response.body,
    })
}

/// Fetches the static rendering of the configured redirect target.
pub(crate) fn fetch_redirect(transport: &dyn Transport, target: &str) -> Result<String, FormError> {
    let response = transport.get(&format!("{target}{REDIRECT_SUFFIX}"), &[])?;
    Ok(response.body)
}
