//! Label migration.
//!
//! Labels are idempotent by name: the destination's current label set is
//! listed first and any source label whose name already exists there is
//! skipped, so re-running a migration never produces duplicates.

use crate::config::RepoRef;
use crate::fetch;
use crate::models::Label;
use octocrab::Octocrab;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, info_span, warn, Instrument};

/// Creation payload for a destination label.
#[derive(Debug, Clone, Serialize)]
struct LabelPayload<'a> {
    name: &'a str,
    color: &'a str,
}

/// Result of the label creation stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelOutcome {
    /// Number of labels created.
    pub created: usize,

    /// Number of labels skipped because the destination already has them.
    pub skipped: usize,

    /// Number of labels that failed to create.
    pub failed: usize,
}

/// Recreates the fetched labels at the destination, skipping duplicates.
///
/// A failed destination listing is logged and treated as an empty set, so
/// creation still proceeds. Per-label creation failures are logged and
/// skipped.
pub async fn create_labels(
    destination: &Octocrab,
    repo: &RepoRef,
    labels: &[Label],
) -> LabelOutcome {
    let span = info_span!("create_labels", repo = %repo);

    async {
        let existing = match fetch::fetch_labels(destination, repo).await {
            Ok(labels) => labels,
            Err(error) => {
                warn!(error = %error, "Failed to list destination labels, assuming none exist");
                Vec::new()
            }
        };
        let existing: HashSet<&str> = existing.iter().map(|label| label.name.as_str()).collect();

        let route = format!("/repos/{}/{}/labels", repo.owner, repo.name);
        let mut outcome = LabelOutcome::default();

        for label in labels {
            if existing.contains(label.name.as_str()) {
                debug!(name = %label.name, "Label already exists at destination, skipping");
                outcome.skipped += 1;
                continue;
            }
            info!(name = %label.name, "Migrating label");
            let payload = LabelPayload {
                name: &label.name,
                color: &label.color,
            };
            match destination.post::<_, Label>(&route, Some(&payload)).await {
                Ok(_) => outcome.created += 1,
                Err(error) => {
                    warn!(name = %label.name, error = %error, "Failed to create label");
                    outcome.failed += 1;
                }
            }
        }

        outcome
    }
    .instrument(span)
    .await
}
