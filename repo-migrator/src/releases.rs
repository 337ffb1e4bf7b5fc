//! Release migration.
//!
//! Releases follow the same idempotency rule as labels, keyed by release
//! name: existing destination releases are listed first and name
//! collisions are skipped. A release without a name indexes as the empty
//! string.

use crate::config::RepoRef;
use crate::fetch;
use crate::models::Release;
use octocrab::Octocrab;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, info_span, warn, Instrument};

/// Creation payload for a destination release.
#[derive(Debug, Clone, Serialize)]
struct ReleasePayload<'a> {
    tag_name: &'a str,
    target_commitish: &'a str,
    name: Option<&'a str>,
    body: Option<&'a str>,
    prerelease: bool,
}

/// Result of the release creation stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReleaseOutcome {
    /// Number of releases created.
    pub created: usize,

    /// Number of releases skipped because the destination already has them.
    pub skipped: usize,

    /// Number of releases that failed to create.
    pub failed: usize,
}

fn release_name(release: &Release) -> &str {
    release.name.as_deref().unwrap_or("")
}

/// Recreates the fetched releases at the destination, skipping duplicates.
///
/// A failed destination listing is logged and treated as an empty set.
/// Per-release creation failures are logged and skipped.
pub async fn create_releases(
    destination: &Octocrab,
    repo: &RepoRef,
    releases: &[Release],
) -> ReleaseOutcome {
    let span = info_span!("create_releases", repo = %repo);

    async {
        let existing = match fetch::fetch_releases(destination, repo).await {
            Ok(releases) => releases,
            Err(error) => {
                warn!(error = %error, "Failed to list destination releases, assuming none exist");
                Vec::new()
            }
        };
        let existing: HashSet<&str> = existing.iter().map(release_name).collect();

        let route = format!("/repos/{}/{}/releases", repo.owner, repo.name);
        let mut outcome = ReleaseOutcome::default();

        for release in releases {
            if existing.contains(release_name(release)) {
                debug!(
                    name = release_name(release),
                    "Release already exists at destination, skipping"
                );
                outcome.skipped += 1;
                continue;
            }
            info!(name = release_name(release), tag = %release.tag_name, "Migrating release");
            let payload = ReleasePayload {
                tag_name: &release.tag_name,
                target_commitish: &release.target_commitish,
                name: release.name.as_deref(),
                body: release.body.as_deref(),
                prerelease: release.prerelease,
            };
            match destination.post::<_, Release>(&route, Some(&payload)).await {
                Ok(_) => outcome.created += 1,
                Err(error) => {
                    warn!(tag = %release.tag_name, error = %error, "Failed to create release");
                    outcome.failed += 1;
                }
            }
        }

        outcome
    }
    .instrument(span)
    .await
}
