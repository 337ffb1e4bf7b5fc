//! Wire types for the repository metadata migration.
//!
//! These are the subsets of the GitHub REST responses that the migration
//! actually consumes:
//! - [`Milestone`], [`Label`], [`Release`], [`Collaborator`] - listed entities
//! - [`Issue`] and [`PullRequest`] - threaded entities with comment replay
//! - [`Comment`] - a single thread entry
//! - [`CreatedMilestone`] and [`CreatedThread`] - creation responses
//!
//! Fields the destination assigns (ids, urls, timestamps) are deliberately
//! not modeled on the creation side; creation payloads live next to their
//! creators.

use serde::Deserialize;

/// A milestone as listed from the source repository.
#[derive(Debug, Clone, Deserialize)]
pub struct Milestone {
    /// Source-assigned milestone number.
    pub number: u64,

    /// Milestone title.
    pub title: String,

    /// Milestone state ("open" or "closed").
    pub state: String,

    /// Optional free-form description.
    #[serde(default)]
    pub description: Option<String>,

    /// Optional due date, passed through verbatim as an ISO timestamp.
    #[serde(default)]
    pub due_on: Option<String>,
}

/// A label as listed from a repository.
#[derive(Debug, Clone, Deserialize)]
pub struct Label {
    /// Label name. Labels are idempotent by name.
    pub name: String,

    /// Six digit hex color code, without the leading `#`.
    pub color: String,
}

/// A release as listed from a repository.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Git tag the release points at.
    pub tag_name: String,

    /// Commitish the tag was created from.
    pub target_commitish: String,

    /// Release name. Releases are idempotent by name; a missing name
    /// indexes as the empty string.
    #[serde(default)]
    pub name: Option<String>,

    /// Release notes body.
    #[serde(default)]
    pub body: Option<String>,

    /// Whether the release is marked as a prerelease.
    pub prerelease: bool,
}

/// Permission flags attached to a collaborator record.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Permissions {
    /// Admin access on the source repository.
    #[serde(default)]
    pub admin: bool,

    /// Push access on the source repository.
    #[serde(default)]
    pub push: bool,

    /// Pull access on the source repository.
    #[serde(default)]
    pub pull: bool,
}

/// A collaborator as listed from the source repository.
#[derive(Debug, Clone, Deserialize)]
pub struct Collaborator {
    /// Account id, used for the stable listing sort.
    pub id: u64,

    /// Account login.
    pub login: String,

    /// Source-side permission flags.
    #[serde(default)]
    pub permissions: Permissions,
}

/// A user account reference embedded in issues, PRs, and comments.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    /// Account login.
    pub login: String,
}

/// A milestone reference embedded in an issue or PR record.
#[derive(Debug, Clone, Deserialize)]
pub struct MilestoneRef {
    /// Source-side milestone number, remapped through the milestone map.
    pub number: u64,
}

/// An issue as listed from the source repository.
///
/// The issue listing endpoint also returns pull requests; those records
/// carry a `pull_request` marker and are dropped by the fetcher.
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    /// Source-assigned issue number.
    pub number: u64,

    /// Issue title.
    pub title: String,

    /// Issue body.
    #[serde(default)]
    pub body: Option<String>,

    /// Issue state ("open" or "closed").
    pub state: String,

    /// Assigned account, if any.
    #[serde(default)]
    pub assignee: Option<Account>,

    /// Milestone the issue belongs to, if any.
    #[serde(default)]
    pub milestone: Option<MilestoneRef>,

    /// Labels attached to the issue.
    #[serde(default)]
    pub labels: Vec<Label>,

    /// Endpoint of the issue's own comment thread.
    pub comments_url: String,

    /// Marker present when the record is actually a pull request.
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

/// A branch reference on a pull request.
#[derive(Debug, Clone, Deserialize)]
pub struct BranchRef {
    /// Branch label in `owner:branch` form.
    pub label: String,
}

/// A pull request as listed from the source repository.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    /// Source-assigned PR number.
    pub number: u64,

    /// PR title.
    pub title: String,

    /// PR body.
    #[serde(default)]
    pub body: Option<String>,

    /// PR state ("open" or "closed").
    pub state: String,

    /// Original author; credited in the recreated body.
    pub user: Account,

    /// Assigned account, if any.
    #[serde(default)]
    pub assignee: Option<Account>,

    /// All assigned accounts, forwarded in the follow-up issue update.
    #[serde(default)]
    pub assignees: Vec<Account>,

    /// Milestone the PR belongs to, if any.
    #[serde(default)]
    pub milestone: Option<MilestoneRef>,

    /// Labels attached to the PR, forwarded in the follow-up issue update.
    #[serde(default)]
    pub labels: Vec<Label>,

    /// Head branch the PR was opened from.
    pub head: BranchRef,

    /// Endpoint of the PR's own comment thread.
    pub comments_url: String,
}

/// A single comment in an issue or PR thread.
#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    /// Comment body.
    #[serde(default)]
    pub body: Option<String>,

    /// Original author; credited in the replayed body.
    pub user: Account,
}

/// Creation response for a milestone POST.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedMilestone {
    /// Destination-assigned milestone number.
    pub number: u64,
}

/// Creation response for an issue or PR POST.
///
/// Carries just enough to drive comment replay and, for PRs, the follow-up
/// update of the underlying issue record.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedThread {
    /// Destination-assigned number.
    pub number: u64,

    /// Endpoint of the newly created record's comment thread.
    pub comments_url: String,
}
