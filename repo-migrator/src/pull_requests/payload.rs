//! Pull request creation payloads.

use crate::comments::attributed_body;
use crate::milestones::MilestoneMap;
use crate::models::PullRequest;
use serde::Serialize;

/// Every recreated PR is based onto this branch; the original head/base
/// relationship cannot be reproduced without the underlying commits.
const BASE_BRANCH: &str = "master";

/// Minimal creation payload for a destination pull request.
///
/// The recreated PR is authored by the migrating credential, so the body
/// carries an attribution line crediting the original author. The same
/// optional-field rules as for issues apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestPayload {
    /// PR title.
    pub title: String,

    /// Source body plus the original-author attribution line.
    pub body: String,

    /// Assignee login; only forwarded on same-installation migrations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    /// PR state.
    pub state: String,

    /// Head branch label, forwarded from the source record.
    pub head: String,

    /// Base branch, fixed.
    pub base: String,

    /// Destination milestone number, already remapped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<u64>,

    /// Label names, assumed already created at the destination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

impl PullRequestPayload {
    /// Builds the payload for one source pull request.
    pub(crate) fn build(
        pull_request: &PullRequest,
        milestone_map: Option<&MilestoneMap>,
        labels_enabled: bool,
        same_installation: bool,
    ) -> Self {
        let assignee = if same_installation {
            pull_request
                .assignee
                .as_ref()
                .map(|account| account.login.clone())
        } else {
            None
        };
        let milestone = milestone_map.and_then(|map| {
            pull_request
                .milestone
                .as_ref()
                .and_then(|reference| map.destination_for(reference.number))
        });
        let labels = if labels_enabled && !pull_request.labels.is_empty() {
            Some(
                pull_request
                    .labels
                    .iter()
                    .map(|label| label.name.clone())
                    .collect(),
            )
        } else {
            None
        };

        Self {
            title: pull_request.title.clone(),
            body: attributed_body(pull_request.body.as_deref(), &pull_request.user.login),
            assignee,
            state: pull_request.state.clone(),
            head: pull_request.head.label.clone(),
            base: BASE_BRANCH.to_string(),
            milestone,
            labels,
        }
    }

    /// The retry form: identical except the assignee field is removed.
    #[must_use]
    pub(crate) fn without_assignee(&self) -> Self {
        Self {
            assignee: None,
            ..self.clone()
        }
    }
}

/// Follow-up update for the issue record underlying a newly created PR.
///
/// PR creation does not accept labels or assignees directly, so they are
/// applied to the issue record afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueUpdatePayload {
    /// Label names from the source record.
    pub labels: Vec<String>,

    /// Assignee logins from the source record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<String>>,
}

impl IssueUpdatePayload {
    /// Builds the follow-up update for one source pull request.
    pub(crate) fn build(pull_request: &PullRequest) -> Self {
        Self {
            labels: pull_request
                .labels
                .iter()
                .map(|label| label.name.clone())
                .collect(),
            assignees: Some(
                pull_request
                    .assignees
                    .iter()
                    .map(|account| account.login.clone())
                    .collect(),
            ),
        }
    }

    /// The retry form: identical except the assignees field is removed.
    #[must_use]
    pub(crate) fn without_assignees(&self) -> Self {
        Self {
            assignees: None,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn source_pull_request(value: serde_json::Value) -> PullRequest {
        serde_json::from_value(value).unwrap()
    }

    fn pull_request() -> PullRequest {
        source_pull_request(json!({
            "number": 4,
            "title": "add feature",
            "body": "please merge",
            "state": "open",
            "user": {"login": "alice"},
            "assignee": {"login": "bob"},
            "assignees": [{"login": "bob"}, {"login": "carol"}],
            "labels": [{"name": "enhancement", "color": "00ff00"}],
            "head": {"label": "alice:feature"},
            "comments_url": "https://api.github.com/repos/a/b/issues/4/comments",
        }))
    }

    #[test]
    fn credits_the_original_author_and_bases_onto_master() {
        let payload = PullRequestPayload::build(&pull_request(), None, false, true);
        assert_eq!(payload.body, "please merge\n\nOriginal by @alice");
        assert_eq!(payload.head, "alice:feature");
        assert_eq!(payload.base, "master");
    }

    #[test]
    fn suppresses_the_assignee_across_installations() {
        let payload = PullRequestPayload::build(&pull_request(), None, false, false);
        assert_eq!(payload.assignee, None);

        let same = PullRequestPayload::build(&pull_request(), None, false, true);
        assert_eq!(same.assignee.as_deref(), Some("bob"));
    }

    #[test]
    fn follow_up_forwards_label_names_and_assignee_logins() {
        let update = IssueUpdatePayload::build(&pull_request());
        assert_eq!(update.labels, vec!["enhancement".to_string()]);
        assert_eq!(
            update.assignees,
            Some(vec!["bob".to_string(), "carol".to_string()])
        );
    }

    #[test]
    fn follow_up_retry_differs_only_in_the_assignees_field() {
        let update = IssueUpdatePayload::build(&pull_request());
        let retry = update.without_assignees();

        let mut expected = serde_json::to_value(&update).unwrap();
        expected.as_object_mut().unwrap().remove("assignees");
        assert_eq!(serde_json::to_value(&retry).unwrap(), expected);
    }
}
