//! GitHub API client construction and error classification.
//!
//! Each side of the migration gets its own [`Octocrab`] client, rooted at
//! that side's host and authenticated with that side's credential pair.
//! Octocrab maps any non-2xx response into [`octocrab::Error::GitHub`]
//! carrying the decoded status, message, and `errors` array; the one error
//! shape this tool recovers from locally - an invalid assignee on a
//! creation call - is classified here.

use crate::config::Credentials;
use octocrab::Octocrab;

/// Builds an authenticated client for one side of the migration.
///
/// # Errors
///
/// Returns [`octocrab::Error`] if the root is not a valid URI or the
/// client cannot be constructed.
pub fn build_client(root: &str, credentials: &Credentials) -> Result<Octocrab, octocrab::Error> {
    Octocrab::builder()
        .base_uri(root)?
        .basic_auth(credentials.username.clone(), credentials.token.clone())
        .build()
}

/// A creation failure caused by an assignee the destination does not know.
#[derive(Debug, Clone)]
pub(crate) struct InvalidAssignee {
    /// The rejected assignee login, when the response names it.
    pub value: Option<String>,
}

/// Classifies an invalid-assignee validation failure.
///
/// Matches exactly the response shape the destination produces for an
/// unknown assignee: the first entry of the `errors` array has
/// `code == "invalid"` and `field == "assignee"`. No other error shape
/// triggers a retry.
pub(crate) fn classify_invalid_assignee(error: &octocrab::Error) -> Option<InvalidAssignee> {
    match error {
        octocrab::Error::GitHub { source, .. } => classify_github_error(source),
        _ => None,
    }
}

/// Issues a creation POST, retrying exactly once without the assignee
/// field when the destination rejects the assignee as invalid.
///
/// The stripped payload is produced by the caller so it stays identical to
/// the original except for the removed field. Any other failure, including
/// a failed retry, is returned to the caller as-is.
pub(crate) async fn post_with_assignee_retry<P, R>(
    client: &Octocrab,
    route: &str,
    payload: &P,
    strip_assignee: impl FnOnce() -> P,
    record: &str,
) -> Result<R, octocrab::Error>
where
    P: serde::Serialize,
    R: octocrab::FromResponse,
{
    match client.post(route, Some(payload)).await {
        Ok(response) => Ok(response),
        Err(error) => match classify_invalid_assignee(&error) {
            Some(invalid) => {
                tracing::warn!(
                    record,
                    assignee = invalid.value.as_deref().unwrap_or("unknown"),
                    "Assignee does not exist at the destination, retrying without assignee"
                );
                client.post(route, Some(&strip_assignee())).await
            }
            None => Err(error),
        },
    }
}

fn classify_github_error(source: &octocrab::GitHubError) -> Option<InvalidAssignee> {
    let first = source.errors.as_ref()?.first()?;
    let code = first.get("code").and_then(serde_json::Value::as_str)?;
    let field = first.get("field").and_then(serde_json::Value::as_str)?;
    if code == "invalid" && field == "assignee" {
        Some(InvalidAssignee {
            value: first
                .get("value")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string),
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::StatusCode;
    use http_body_util::{BodyExt, Full};
    use octocrab::GitHubError;
    use serde_json::json;

    // `octocrab::GitHubError` is `#[non_exhaustive]`, so it cannot be built with
    // a struct literal from outside the crate. Reconstruct it through octocrab's
    // own public error path instead: build the 422 response body it would parse
    // and let `map_github_error` produce the real `GitHubError`.
    fn github_error(errors: Option<Vec<serde_json::Value>>) -> GitHubError {
        let body = json!({
            "message": "Validation Failed",
            "errors": errors,
        });
        let bytes = Bytes::from(serde_json::to_vec(&body).unwrap());
        let response = http::Response::builder()
            .status(StatusCode::UNPROCESSABLE_ENTITY)
            .body(
                Full::new(bytes)
                    .map_err(|never: std::convert::Infallible| match never {})
                    .boxed(),
            )
            .unwrap();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        match runtime.block_on(octocrab::map_github_error(response)) {
            Err(octocrab::Error::GitHub { source, .. }) => *source,
            other => panic!("expected GitHub error, got {other:?}"),
        }
    }

    #[test]
    fn classifies_invalid_assignee() {
        let source = github_error(Some(vec![json!({
            "resource": "Issue",
            "code": "invalid",
            "field": "assignee",
            "value": "ghost"
        })]));
        let classified = classify_github_error(&source).unwrap();
        assert_eq!(classified.value.as_deref(), Some("ghost"));
    }

    #[test]
    fn classifies_without_a_value() {
        let source = github_error(Some(vec![json!({
            "code": "invalid",
            "field": "assignee"
        })]));
        let classified = classify_github_error(&source).unwrap();
        assert!(classified.value.is_none());
    }

    #[test]
    fn ignores_other_invalid_fields() {
        let source = github_error(Some(vec![json!({
            "code": "invalid",
            "field": "milestone"
        })]));
        assert!(classify_github_error(&source).is_none());
    }

    #[test]
    fn ignores_other_codes_and_missing_errors() {
        let wrong_code = github_error(Some(vec![json!({
            "code": "missing_field",
            "field": "assignee"
        })]));
        assert!(classify_github_error(&wrong_code).is_none());
        assert!(classify_github_error(&github_error(None)).is_none());
        assert!(classify_github_error(&github_error(Some(Vec::new()))).is_none());
    }
}
