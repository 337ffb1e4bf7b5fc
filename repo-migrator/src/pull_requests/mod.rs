//! Pull request migration.
//!
//! Pull requests are recreated from metadata only: the head branch label
//! is forwarded and every recreated PR is based onto "master", since the
//! underlying commits are not migrated by this tool. After a successful
//! creation the source comment thread is replayed, and a follow-up call
//! applies labels and assignees to the PR's underlying issue record (PR
//! creation does not accept either directly).

mod payload;

pub use payload::{IssueUpdatePayload, PullRequestPayload};

use crate::api;
use crate::comments::{self, CommentReplay};
use crate::config::RepoRef;
use crate::milestones::MilestoneMap;
use crate::models::{CreatedThread, PullRequest};
use octocrab::Octocrab;
use tracing::{debug, info, info_span, warn, Instrument};

/// Result of the pull request creation stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct PullRequestOutcome {
    /// Number of pull requests created.
    pub created: usize,

    /// Number of pull requests that failed to create.
    pub failed: usize,

    /// Number of follow-up label/assignee updates that failed.
    pub updates_failed: usize,

    /// Comment replay counters across all created pull requests.
    pub comments: CommentReplay,
}

/// Recreates the fetched pull requests at the destination.
///
/// Creation calls are issued in the fetched (ascending number) order. The
/// invalid-assignee retry applies both to the creation POST and to the
/// follow-up issue update; each is retried at most once.
pub async fn create_pull_requests(
    source: &Octocrab,
    destination: &Octocrab,
    repo: &RepoRef,
    pull_requests: &[PullRequest],
    milestone_map: Option<&MilestoneMap>,
    labels_enabled: bool,
    same_installation: bool,
) -> PullRequestOutcome {
    let span = info_span!("create_pull_requests", repo = %repo);

    async {
        let route = format!("/repos/{}/{}/pulls", repo.owner, repo.name);
        let mut outcome = PullRequestOutcome::default();

        for pull_request in pull_requests {
            let payload = PullRequestPayload::build(
                pull_request,
                milestone_map,
                labels_enabled,
                same_installation,
            );
            let created: Result<CreatedThread, octocrab::Error> = api::post_with_assignee_retry(
                destination,
                &route,
                &payload,
                || payload.without_assignee(),
                &payload.title,
            )
            .await;

            let created = match created {
                Ok(created) => created,
                Err(error) => {
                    warn!(
                        number = pull_request.number,
                        title = %pull_request.title,
                        error = %error,
                        "Failed to create pull request"
                    );
                    outcome.failed += 1;
                    continue;
                }
            };

            info!(
                source = pull_request.number,
                destination = created.number,
                title = %pull_request.title,
                "Pull request migrated"
            );
            outcome.created += 1;

            let replay = comments::replay_comments(
                source,
                destination,
                &pull_request.comments_url,
                &created.comments_url,
            )
            .await;
            outcome.comments.merge(replay);

            if let Err(error) =
                update_underlying_issue(destination, repo, created.number, pull_request).await
            {
                warn!(
                    number = created.number,
                    error = %error,
                    "Failed to update the pull request's issue record"
                );
                outcome.updates_failed += 1;
            }
        }

        outcome
    }
    .instrument(span)
    .await
}

/// Applies labels and assignees to the issue record underlying a newly
/// created pull request.
async fn update_underlying_issue(
    destination: &Octocrab,
    repo: &RepoRef,
    number: u64,
    pull_request: &PullRequest,
) -> Result<(), octocrab::Error> {
    let route = format!("/repos/{}/{}/issues/{}", repo.owner, repo.name, number);
    let update = IssueUpdatePayload::build(pull_request);
    let _: serde_json::Value = api::post_with_assignee_retry(
        destination,
        &route,
        &update,
        || update.without_assignees(),
        &pull_request.title,
    )
    .await?;
    debug!(number, "Labels and assignees applied to the issue record");
    Ok(())
}
