//! Entity fetchers for the source repository.
//!
//! One function per entity kind. Each issues a single authenticated
//! listing GET and applies the kind-specific post-processing: milestones,
//! collaborators, issues, and pull requests get a stable ascending sort
//! (by number or id), and the issue listing drops records that are
//! actually pull requests. Labels and releases are returned as-is.
//!
//! A listing failure is fatal for the whole run and surfaces as
//! [`FetchError::Listing`]. An empty collection is a success with zero
//! elements - `Ok(vec![])` and `Err(..)` are distinct by construction, so
//! callers can report "none found, none migrated" instead of aborting.

use crate::config::RepoRef;
use crate::models::{Collaborator, Issue, Label, Milestone, PullRequest, Release};
use octocrab::Octocrab;
use thiserror::Error;
use tracing::debug;

/// Listing query used by the original endpoints.
const FILTER_ALL: [(&str, &str); 1] = [("filter", "all")];

/// Errors that can occur while listing a source collection.
#[derive(Debug, Error)]
pub enum FetchError {
    /// A listing call failed; the underlying error carries the response
    /// status and message for diagnostics.
    #[error("Failed to list {kind} from {repo}: {source}")]
    Listing {
        kind: &'static str,
        repo: String,
        #[source]
        source: octocrab::Error,
    },
}

fn listing_error(kind: &'static str, repo: &RepoRef) -> impl FnOnce(octocrab::Error) -> FetchError {
    let repo = repo.to_string();
    move |source| FetchError::Listing { kind, repo, source }
}

/// Lists the repository's milestones, sorted ascending by number.
///
/// # Errors
///
/// Returns [`FetchError::Listing`] if the listing call fails.
pub async fn fetch_milestones(
    client: &Octocrab,
    repo: &RepoRef,
) -> Result<Vec<Milestone>, FetchError> {
    debug!(repo = %repo, "Listing milestones");
    let route = format!("/repos/{}/{}/milestones", repo.owner, repo.name);
    let mut milestones: Vec<Milestone> = client
        .get(route, Some(&FILTER_ALL))
        .await
        .map_err(listing_error("milestones", repo))?;
    milestones.sort_by_key(|milestone| milestone.number);
    Ok(milestones)
}

/// Lists the repository's collaborators, sorted ascending by account id.
///
/// # Errors
///
/// Returns [`FetchError::Listing`] if the listing call fails.
pub async fn fetch_collaborators(
    client: &Octocrab,
    repo: &RepoRef,
) -> Result<Vec<Collaborator>, FetchError> {
    debug!(repo = %repo, "Listing collaborators");
    let route = format!("/repos/{}/{}/collaborators", repo.owner, repo.name);
    let mut collaborators: Vec<Collaborator> = client
        .get(route, Some(&FILTER_ALL))
        .await
        .map_err(listing_error("collaborators", repo))?;
    collaborators.sort_by_key(|collaborator| collaborator.id);
    Ok(collaborators)
}

/// Lists the repository's issues, sorted ascending by number.
///
/// The listing endpoint conflates issues and pull requests; records
/// carrying a pull-request marker are dropped here so the issue creator
/// never recreates a PR as a plain issue.
///
/// # Errors
///
/// Returns [`FetchError::Listing`] if the listing call fails.
pub async fn fetch_issues(client: &Octocrab, repo: &RepoRef) -> Result<Vec<Issue>, FetchError> {
    debug!(repo = %repo, "Listing issues");
    let route = format!("/repos/{}/{}/issues", repo.owner, repo.name);
    let mut issues: Vec<Issue> = client
        .get(route, Some(&FILTER_ALL))
        .await
        .map_err(listing_error("issues", repo))?;
    issues.sort_by_key(|issue| issue.number);
    Ok(drop_pull_requests(issues))
}

/// Lists the repository's pull requests, sorted ascending by number.
///
/// # Errors
///
/// Returns [`FetchError::Listing`] if the listing call fails.
pub async fn fetch_pull_requests(
    client: &Octocrab,
    repo: &RepoRef,
) -> Result<Vec<PullRequest>, FetchError> {
    debug!(repo = %repo, "Listing pull requests");
    let route = format!("/repos/{}/{}/pulls", repo.owner, repo.name);
    let mut pull_requests: Vec<PullRequest> = client
        .get(route, Some(&FILTER_ALL))
        .await
        .map_err(listing_error("pull requests", repo))?;
    pull_requests.sort_by_key(|pull_request| pull_request.number);
    Ok(pull_requests)
}

/// Lists the repository's labels. Listing order is not meaningful and is
/// preserved as returned.
///
/// # Errors
///
/// Returns [`FetchError::Listing`] if the listing call fails.
pub async fn fetch_labels(client: &Octocrab, repo: &RepoRef) -> Result<Vec<Label>, FetchError> {
    debug!(repo = %repo, "Listing labels");
    let route = format!("/repos/{}/{}/labels", repo.owner, repo.name);
    client
        .get(route, Some(&FILTER_ALL))
        .await
        .map_err(listing_error("labels", repo))
}

/// Lists the repository's releases. Listing order is not meaningful and is
/// preserved as returned.
///
/// # Errors
///
/// Returns [`FetchError::Listing`] if the listing call fails.
pub async fn fetch_releases(client: &Octocrab, repo: &RepoRef) -> Result<Vec<Release>, FetchError> {
    debug!(repo = %repo, "Listing releases");
    let route = format!("/repos/{}/{}/releases", repo.owner, repo.name);
    client
        .get(route, None::<&()>)
        .await
        .map_err(listing_error("releases", repo))
}

/// Drops listing records that are actually pull requests.
fn drop_pull_requests(issues: Vec<Issue>) -> Vec<Issue> {
    issues
        .into_iter()
        .filter(|issue| issue.pull_request.is_none())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn issue(number: u64, pull_request: bool) -> Issue {
        let mut value = json!({
            "number": number,
            "title": format!("issue {number}"),
            "state": "open",
            "comments_url": format!("https://api.github.com/repos/a/b/issues/{number}/comments"),
        });
        if pull_request {
            value["pull_request"] = json!({"url": "https://api.github.com/repos/a/b/pulls/1"});
        }
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn drops_pull_request_records() {
        let issues = vec![issue(1, false), issue(2, true), issue(3, false)];
        let kept = drop_pull_requests(issues);
        let numbers: Vec<u64> = kept.iter().map(|issue| issue.number).collect();
        assert_eq!(numbers, vec![1, 3]);
    }

    #[test]
    fn keeps_pure_issue_listings_intact() {
        let issues = vec![issue(1, false), issue(2, false)];
        assert_eq!(drop_pull_requests(issues).len(), 2);
    }
}
