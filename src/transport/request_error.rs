use serde::Deserialize;

use super::json::{from_object_str, object_or_null};
use crate::domain::{KandyError, UNPARSABLE_BODY};

#[derive(Debug, Clone, Default, Deserialize)]
struct RequestErrorJsonResponse {
    #[serde(default, rename = "requestError", deserialize_with = "object_or_null")]
    request_error: Option<RequestErrorJson>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RequestErrorJson {
    #[serde(default, rename = "serviceException", deserialize_with = "object_or_null")]
    service_exception: Option<ExceptionJson>,
    #[serde(default, rename = "policyException", deserialize_with = "object_or_null")]
    policy_exception: Option<ExceptionJson>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ExceptionJson {
    #[serde(default, rename = "messageId")]
    message_id: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    variables: Option<Vec<String>>,
}

/// Normalize a failed API call into a [`KandyError`].
///
/// A non-empty `transport_error` wins over the body. Otherwise the body is read as the
/// platform's `requestError` envelope: the service exception is used when it carries a
/// `messageId`, the policy exception otherwise, and its `%1`, `%2`, ... placeholders are
/// filled from `variables`.
pub fn decode_request_error(status: u16, body: &str, transport_error: Option<&str>) -> KandyError {
    if let Some(text) = transport_error.filter(|text| !text.is_empty()) {
        return KandyError::new(status, text);
    }

    let parsed: RequestErrorJsonResponse = match from_object_str(body) {
        Ok(parsed) => parsed,
        Err(_) => return KandyError::new(status, UNPARSABLE_BODY),
    };

    let request_error = parsed.request_error.unwrap_or_default();
    let service = request_error.service_exception.unwrap_or_default();
    let exception = if service.message_id.as_deref().is_some_and(|id| !id.is_empty()) {
        service
    } else {
        request_error.policy_exception.unwrap_or_default()
    };

    let text = exception.text.unwrap_or_default();
    let variables = exception.variables.unwrap_or_default();
    KandyError::new(status, substitute_variables(&text, &variables))
}

/// Replace every `%<i+1>` in `text` with `variables[i]`, in index order.
pub fn substitute_variables(text: &str, variables: &[String]) -> String {
    variables
        .iter()
        .enumerate()
        .fold(text.to_owned(), |acc, (idx, value)| {
            acc.replace(&format!("%{}", idx + 1), value)
        })
}
