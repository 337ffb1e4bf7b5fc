//! Collaborator migration.
//!
//! Each source collaborator is granted access on the destination via a
//! permission PUT. The acting destination account cannot add itself, so
//! its own login is skipped. The destination API answers this PUT with an
//! empty body when the account is already a collaborator, so the call goes
//! through the raw verb and maps the status by hand.

use crate::config::RepoRef;
use crate::models::Collaborator;
use octocrab::Octocrab;
use serde::Serialize;
use tracing::{debug, info, info_span, warn, Instrument};

/// Permission grant payload for the collaborator PUT.
#[derive(Debug, Clone, Serialize)]
struct PermissionGrant {
    permission: &'static str,
}

/// Result of the collaborator grant stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollaboratorOutcome {
    /// Number of permission grants issued.
    pub granted: usize,

    /// Number of collaborators skipped (the acting account itself).
    pub skipped: usize,

    /// Number of grants that failed.
    pub failed: usize,
}

/// Maps a source collaborator record to the destination permission level.
///
/// Admin access carries over; the acting account keeps admin on its own
/// repository; everyone else is granted push.
fn grant_permission(collaborator: &Collaborator, acting_login: &str) -> &'static str {
    if collaborator.permissions.admin || collaborator.login == acting_login {
        "admin"
    } else {
        "push"
    }
}

async fn put_grant(
    destination: &Octocrab,
    route: String,
    grant: &PermissionGrant,
) -> Result<(), octocrab::Error> {
    let response = destination._put(route, Some(grant)).await?;
    octocrab::map_github_error(response).await?;
    Ok(())
}

/// Grants the fetched collaborators access on the destination repository.
///
/// Grants are issued in the fetched (ascending id) order. Per-record
/// failures are logged and skipped.
pub async fn create_collaborators(
    destination: &Octocrab,
    repo: &RepoRef,
    acting_login: &str,
    collaborators: &[Collaborator],
) -> CollaboratorOutcome {
    let span = info_span!("create_collaborators", repo = %repo);

    async {
        let mut outcome = CollaboratorOutcome::default();

        for collaborator in collaborators {
            if collaborator.login == acting_login {
                debug!(login = %collaborator.login, "Skipping the acting account");
                outcome.skipped += 1;
                continue;
            }
            let permission = grant_permission(collaborator, acting_login);
            let route = format!(
                "/repos/{}/{}/collaborators/{}",
                repo.owner, repo.name, collaborator.login
            );
            match put_grant(destination, route, &PermissionGrant { permission }).await {
                Ok(()) => {
                    info!(login = %collaborator.login, permission, "Collaborator granted");
                    outcome.granted += 1;
                }
                Err(error) => {
                    warn!(
                        login = %collaborator.login,
                        error = %error,
                        "Failed to grant collaborator"
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
    use crate::models::Permissions;

    fn collaborator(login: &str, admin: bool) -> Collaborator {
        Collaborator {
            id: 1,
            login: login.to_string(),
            permissions: Permissions {
                admin,
                push: true,
                pull: true,
            },
        }
    }

    #[test]
    fn admins_stay_admins() {
        assert_eq!(grant_permission(&collaborator("alice", true), "octocat"), "admin");
    }

    #[test]
    fn the_acting_account_maps_to_admin() {
        assert_eq!(
            grant_permission(&collaborator("octocat", false), "octocat"),
            "admin"
        );
    }

    #[test]
    fn everyone_else_maps_to_push() {
        assert_eq!(grant_permission(&collaborator("bob", false), "octocat"), "push");
    }
}
