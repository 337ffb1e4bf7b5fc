//! Issue creation payload.

use crate::milestones::MilestoneMap;
use crate::models::Issue;
use serde::Serialize;

/// Minimal creation payload for a destination issue.
///
/// Only fields the destination accepts for creation are present; the
/// optional fields are omitted from the serialized form entirely (not sent
/// as null) when they do not apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuePayload {
    /// Issue title.
    pub title: String,

    /// Issue body, forwarded verbatim.
    pub body: Option<String>,

    /// Assignee login; only forwarded on same-installation migrations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    /// Issue state.
    pub state: String,

    /// Destination milestone number, already remapped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<u64>,

    /// Label names, assumed already created at the destination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

impl IssuePayload {
    /// Builds the payload for one source issue.
    ///
    /// - The assignee is included only when the source record has one and
    ///   both sides share one installation (logins are not guaranteed to
    ///   resolve across installations).
    /// - The milestone is included only when milestone migration ran and
    ///   the source number has an entry in the map; an unmapped milestone
    ///   is dropped rather than failing the record.
    /// - Labels are included only when label migration was requested and
    ///   the record carries at least one label, forwarded by name.
    pub(crate) fn build(
        issue: &Issue,
        milestone_map: Option<&MilestoneMap>,
        labels_enabled: bool,
        same_installation: bool,
    ) -> Self {
        let assignee = if same_installation {
            issue.assignee.as_ref().map(|account| account.login.clone())
        } else {
            None
        };
        let milestone = milestone_map.and_then(|map| {
            issue
                .milestone
                .as_ref()
                .and_then(|reference| map.destination_for(reference.number))
        });
        let labels = if labels_enabled && !issue.labels.is_empty() {
            Some(issue.labels.iter().map(|label| label.name.clone()).collect())
        } else {
            None
        };

        Self {
            title: issue.title.clone(),
            body: issue.body.clone(),
            assignee,
            state: issue.state.clone(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn source_issue(value: serde_json::Value) -> Issue {
        serde_json::from_value(value).unwrap()
    }

    fn mapped_milestones() -> MilestoneMap {
        let mut map = MilestoneMap::new();
        map.insert(1, 7);
        map
    }

    fn issue_with_milestone(number: u64) -> Issue {
        source_issue(json!({
            "number": 10,
            "title": "crash on startup",
            "body": "it crashes",
            "state": "open",
            "milestone": {"number": number},
            "comments_url": "https://api.github.com/repos/a/b/issues/10/comments",
        }))
    }

    #[test]
    fn remaps_a_mapped_milestone() {
        let map = mapped_milestones();
        let payload = IssuePayload::build(&issue_with_milestone(1), Some(&map), false, true);
        assert_eq!(payload.milestone, Some(7));
    }

    #[test]
    fn drops_an_unmapped_milestone() {
        let map = mapped_milestones();
        let payload = IssuePayload::build(&issue_with_milestone(2), Some(&map), false, true);
        assert_eq!(payload.milestone, None);
        assert!(serde_json::to_value(&payload)
            .unwrap()
            .get("milestone")
            .is_none());
    }

    #[test]
    fn omits_the_milestone_when_milestones_were_not_migrated() {
        let payload = IssuePayload::build(&issue_with_milestone(1), None, false, true);
        assert_eq!(payload.milestone, None);
    }

    #[test]
    fn suppresses_the_assignee_across_installations() {
        let issue = source_issue(json!({
            "number": 10,
            "title": "crash on startup",
            "state": "open",
            "assignee": {"login": "alice"},
            "comments_url": "https://api.github.com/repos/a/b/issues/10/comments",
        }));
        let same = IssuePayload::build(&issue, None, false, true);
        assert_eq!(same.assignee.as_deref(), Some("alice"));

        let cross = IssuePayload::build(&issue, None, false, false);
        assert_eq!(cross.assignee, None);
        assert!(serde_json::to_value(&cross)
            .unwrap()
            .get("assignee")
            .is_none());
    }

    #[test]
    fn forwards_label_names_only_when_requested() {
        let issue = source_issue(json!({
            "number": 10,
            "title": "crash on startup",
            "state": "open",
            "labels": [{"name": "bug", "color": "ff0000"}],
            "comments_url": "https://api.github.com/repos/a/b/issues/10/comments",
        }));
        let with = IssuePayload::build(&issue, None, true, true);
        assert_eq!(with.labels, Some(vec!["bug".to_string()]));

        let without = IssuePayload::build(&issue, None, false, true);
        assert_eq!(without.labels, None);
    }

    #[test]
    fn retry_payload_differs_only_in_the_assignee_field() {
        let issue = source_issue(json!({
            "number": 10,
            "title": "crash on startup",
            "body": "it crashes",
            "state": "open",
            "assignee": {"login": "ghost"},
            "labels": [{"name": "bug", "color": "ff0000"}],
            "comments_url": "https://api.github.com/repos/a/b/issues/10/comments",
        }));
        let payload = IssuePayload::build(&issue, None, true, true);
        let retry = payload.without_assignee();

        let mut expected = serde_json::to_value(&payload).unwrap();
        expected.as_object_mut().unwrap().remove("assignee");
        assert_eq!(serde_json::to_value(&retry).unwrap(), expected);
    }
}
