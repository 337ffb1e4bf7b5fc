//! Run summary types.

use crate::collaborators::CollaboratorOutcome;
use crate::issues::IssueOutcome;
use crate::labels::LabelOutcome;
use crate::milestones::MilestoneOutcome;
use crate::pull_requests::PullRequestOutcome;
use crate::releases::ReleaseOutcome;

/// Summary of a complete migration run.
///
/// Stages that were not selected, or that found nothing to migrate, leave
/// their counters at zero.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of milestones created.
    pub milestones_created: usize,

    /// Number of milestones that failed to create.
    pub milestones_failed: usize,

    /// Number of labels created.
    pub labels_created: usize,

    /// Number of labels skipped as already present.
    pub labels_skipped: usize,

    /// Number of labels that failed to create.
    pub labels_failed: usize,

    /// Number of collaborator grants issued.
    pub collaborators_granted: usize,

    /// Number of collaborators skipped (the acting account itself).
    pub collaborators_skipped: usize,

    /// Number of collaborator grants that failed.
    pub collaborators_failed: usize,

    /// Number of issues created.
    pub issues_created: usize,

    /// Number of issues that failed to create.
    pub issues_failed: usize,

    /// Number of pull requests created.
    pub prs_created: usize,

    /// Number of pull requests that failed to create.
    pub prs_failed: usize,

    /// Number of PR follow-up updates that failed.
    pub pr_updates_failed: usize,

    /// Number of releases created.
    pub releases_created: usize,

    /// Number of releases skipped as already present.
    pub releases_skipped: usize,

    /// Number of releases that failed to create.
    pub releases_failed: usize,

    /// Number of comments replayed across issues and pull requests.
    pub comments_replayed: usize,

    /// Number of comments that failed to replay.
    pub comments_failed: usize,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds in the milestone stage outcome.
    pub fn record_milestones(&mut self, outcome: &MilestoneOutcome) {
        self.milestones_created += outcome.created;
        self.milestones_failed += outcome.failed;
    }

    /// Folds in the label stage outcome.
    pub fn record_labels(&mut self, outcome: &LabelOutcome) {
        self.labels_created += outcome.created;
        self.labels_skipped += outcome.skipped;
        self.labels_failed += outcome.failed;
    }

    /// Folds in the collaborator stage outcome.
    pub fn record_collaborators(&mut self, outcome: &CollaboratorOutcome) {
        self.collaborators_granted += outcome.granted;
        self.collaborators_skipped += outcome.skipped;
        self.collaborators_failed += outcome.failed;
    }

    /// Folds in the issue stage outcome.
    pub fn record_issues(&mut self, outcome: &IssueOutcome) {
        self.issues_created += outcome.created;
        self.issues_failed += outcome.failed;
        self.comments_replayed += outcome.comments.replayed;
        self.comments_failed += outcome.comments.failed;
    }

    /// Folds in the pull request stage outcome.
    pub fn record_pull_requests(&mut self, outcome: &PullRequestOutcome) {
        self.prs_created += outcome.created;
        self.prs_failed += outcome.failed;
        self.pr_updates_failed += outcome.updates_failed;
        self.comments_replayed += outcome.comments.replayed;
        self.comments_failed += outcome.comments.failed;
    }

    /// Folds in the release stage outcome.
    pub fn record_releases(&mut self, outcome: &ReleaseOutcome) {
        self.releases_created += outcome.created;
        self.releases_skipped += outcome.skipped;
        self.releases_failed += outcome.failed;
    }

    /// Returns true if any per-record failure occurred.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.milestones_failed > 0
            || self.labels_failed > 0
            || self.collaborators_failed > 0
            || self.issues_failed > 0
            || self.prs_failed > 0
            || self.pr_updates_failed > 0
            || self.releases_failed > 0
            || self.comments_failed > 0
    }

    /// Returns true if every attempted record succeeded.
    #[must_use]
    pub fn all_success(&self) -> bool {
        !self.has_failures()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::milestones::MilestoneMap;

    #[test]
    fn records_stage_outcomes() {
        let mut summary = RunSummary::new();

        let mut map = MilestoneMap::new();
        map.insert(1, 7);
        summary.record_milestones(&MilestoneOutcome {
            map,
            created: 1,
            failed: 0,
        });
        summary.record_labels(&LabelOutcome {
            created: 2,
            skipped: 1,
            failed: 0,
        });

        assert_eq!(summary.milestones_created, 1);
        assert_eq!(summary.labels_created, 2);
        assert_eq!(summary.labels_skipped, 1);
        assert!(summary.all_success());
    }

    #[test]
    fn per_record_failures_are_visible() {
        let mut summary = RunSummary::new();
        summary.record_releases(&ReleaseOutcome {
            created: 1,
            skipped: 0,
            failed: 2,
        });

        assert!(summary.has_failures());
        assert!(!summary.all_success());
    }
}
