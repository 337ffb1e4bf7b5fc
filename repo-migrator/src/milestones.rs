//! Milestone migration.
//!
//! Milestones are the first stage of every run because issues and pull
//! requests reference them by number, and the destination assigns fresh
//! numbers on creation. The creator records each successful creation in a
//! [`MilestoneMap`]; the map is built here once and handed to the issue
//! and PR creators as an immutable value.

use crate::config::RepoRef;
use crate::models::{CreatedMilestone, Milestone};
use octocrab::Octocrab;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, info_span, warn, Instrument};

/// Mapping from source milestone numbers to destination milestone numbers.
///
/// Only successfully created milestones appear here; a source number with
/// no entry means the referencing issue or PR is created without a
/// milestone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MilestoneMap {
    entries: BTreeMap<u64, u64>,
}

impl MilestoneMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a (source number, destination number) pair.
    pub fn insert(&mut self, source: u64, destination: u64) {
        self.entries.insert(source, destination);
    }

    /// Looks up the destination number for a source milestone number.
    #[must_use]
    pub fn destination_for(&self, source: u64) -> Option<u64> {
        self.entries.get(&source).copied()
    }

    /// Number of remapped milestones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no milestone was remapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Creation payload for a destination milestone. Absent description and
/// due date serialize as explicit nulls, matching the listing shape.
#[derive(Debug, Clone, Serialize)]
struct MilestonePayload<'a> {
    title: &'a str,
    state: &'a str,
    description: Option<&'a str>,
    due_on: Option<&'a str>,
}

/// Result of the milestone creation stage.
#[derive(Debug, Clone, Default)]
pub struct MilestoneOutcome {
    /// Source number to destination number mapping for created milestones.
    pub map: MilestoneMap,

    /// Number of milestones created.
    pub created: usize,

    /// Number of milestones that failed to create.
    pub failed: usize,
}

/// Recreates the fetched milestones at the destination.
///
/// Creation calls are issued in the fetched (ascending number) order. A
/// failed creation is logged and skipped; the run continues and the failed
/// milestone never enters the map.
pub async fn create_milestones(
    destination: &Octocrab,
    repo: &RepoRef,
    milestones: &[Milestone],
) -> MilestoneOutcome {
    let span = info_span!("create_milestones", repo = %repo);

    async {
        let route = format!("/repos/{}/{}/milestones", repo.owner, repo.name);
        let mut outcome = MilestoneOutcome::default();

        for milestone in milestones {
            let payload = MilestonePayload {
                title: &milestone.title,
                state: &milestone.state,
                description: milestone.description.as_deref(),
                due_on: milestone.due_on.as_deref(),
            };
            match destination
                .post::<_, CreatedMilestone>(&route, Some(&payload))
                .await
            {
                Ok(created) => {
                    info!(
                        source = milestone.number,
                        destination = created.number,
                        title = %milestone.title,
                        "Milestone migrated"
                    );
                    outcome.map.insert(milestone.number, created.number);
                    outcome.created += 1;
                }
                Err(error) => {
                    warn!(
                        number = milestone.number,
                        title = %milestone.title,
                        error = %error,
                        "Failed to create milestone"
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_source_numbers_to_destination_numbers() {
        let mut map = MilestoneMap::new();
        map.insert(1, 7);

        assert_eq!(map.destination_for(1), Some(7));
        assert_eq!(map.destination_for(2), None);
        assert_eq!(map.len(), 1);
        assert!(!map.is_empty());
    }
}
