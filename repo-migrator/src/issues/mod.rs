//! Issue migration.
//!
//! Issues are recreated at the destination from a minimal payload, then
//! each one's comment thread is replayed onto the new record. A creation
//! rejected for an invalid assignee is retried exactly once without the
//! assignee field; any other failure is logged and the batch continues.

mod payload;

pub use payload::IssuePayload;

use crate::api;
use crate::comments::{self, CommentReplay};
use crate::config::RepoRef;
use crate::milestones::MilestoneMap;
use crate::models::{CreatedThread, Issue};
use octocrab::Octocrab;
use tracing::{info, info_span, warn, Instrument};

/// Result of the issue creation stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct IssueOutcome {
    /// Number of issues created.
    pub created: usize,

    /// Number of issues that failed to create.
    pub failed: usize,

    /// Comment replay counters across all created issues.
    pub comments: CommentReplay,
}

/// Recreates the fetched issues at the destination.
///
/// Creation calls are issued in the fetched (ascending number) order.
/// Comment replay runs only after a confirmed-successful creation, against
/// the comment thread of the record that creation actually produced.
pub async fn create_issues(
    source: &Octocrab,
    destination: &Octocrab,
    repo: &RepoRef,
    issues: &[Issue],
    milestone_map: Option<&MilestoneMap>,
    labels_enabled: bool,
    same_installation: bool,
) -> IssueOutcome {
    let span = info_span!("create_issues", repo = %repo);

    async {
        let route = format!("/repos/{}/{}/issues", repo.owner, repo.name);
        let mut outcome = IssueOutcome::default();

        for issue in issues {
            let payload =
                IssuePayload::build(issue, milestone_map, labels_enabled, same_installation);
            let created: Result<CreatedThread, octocrab::Error> = api::post_with_assignee_retry(
                destination,
                &route,
                &payload,
                || payload.without_assignee(),
                &payload.title,
            )
            .await;

            match created {
                Ok(created) => {
                    info!(
                        source = issue.number,
                        destination = created.number,
                        title = %issue.title,
                        "Issue migrated"
                    );
                    outcome.created += 1;
                    let replay = comments::replay_comments(
                        source,
                        destination,
                        &issue.comments_url,
                        &created.comments_url,
                    )
                    .await;
                    outcome.comments.merge(replay);
                }
                Err(error) => {
                    warn!(
                        number = issue.number,
                        title = %issue.title,
                        error = %error,
                        "Failed to create issue"
                    );
                    outcome.failed += 1;
                }
            }
        }

        outcome
    }
    .instrument(span)
    .await
}
