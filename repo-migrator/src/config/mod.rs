//! Run configuration.
//!
//! This module turns raw operator input ([`MigrationOptions`]) into a
//! validated [`MigrationConfig`]: repository references are parsed, host
//! roots are normalized, destination credentials are defaulted to the
//! source credentials, and cross-installation runs without a destination
//! token are rejected before any network activity.

mod error;

pub use error::ConfigError;

use std::fmt;
use tracing::info;

/// Root URL of the public GitHub API installation.
pub const PUBLIC_API_ROOT: &str = "https://api.github.com";

/// An (account, token) pair used to authenticate one side of the migration.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Account login.
    pub username: String,

    /// Personal access token.
    pub token: String,
}

impl Credentials {
    /// Creates a credential pair.
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }
}

/// An `<owner>/<name>` reference selecting a repository under a host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// Owning user or organization.
    pub owner: String,

    /// Repository name.
    pub name: String,
}

impl RepoRef {
    /// Parses a `<owner>/<name>` reference.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRepository`] unless the input is two
    /// non-empty segments separated by exactly one `/`.
    pub fn parse(spec: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidRepository {
            spec: spec.to_string(),
        };
        let (owner, name) = spec.split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// The entity kinds selected for migration.
///
/// Selecting no kind at all enables all six.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntitySelection {
    /// Migrate milestones.
    pub milestones: bool,

    /// Migrate labels.
    pub labels: bool,

    /// Migrate collaborators.
    pub collaborators: bool,

    /// Migrate issues (with their comment threads).
    pub issues: bool,

    /// Migrate pull requests (with their comment threads).
    pub pull_requests: bool,

    /// Migrate releases.
    pub releases: bool,
}

impl EntitySelection {
    /// Selection with every entity kind enabled.
    #[must_use]
    pub fn all() -> Self {
        Self {
            milestones: true,
            labels: true,
            collaborators: true,
            issues: true,
            pull_requests: true,
            releases: true,
        }
    }

    /// Returns true if at least one entity kind is selected.
    #[must_use]
    pub fn any(self) -> bool {
        self.milestones
            || self.labels
            || self.collaborators
            || self.issues
            || self.pull_requests
            || self.releases
    }

    /// Applies the default: no explicit selection means everything.
    #[must_use]
    pub fn defaulted(self) -> Self {
        if self.any() {
            self
        } else {
            Self::all()
        }
    }
}

/// Raw operator input, prior to validation and defaulting.
#[derive(Debug, Clone)]
pub struct MigrationOptions {
    /// Source account login.
    pub username: String,

    /// Source personal access token.
    pub token: String,

    /// Source repository as `<owner>/<name>`.
    pub source_repo: String,

    /// Destination repository as `<owner>/<name>`.
    pub destination_repo: String,

    /// Destination account login, when migrating between installations.
    pub destination_username: Option<String>,

    /// Destination token, when migrating between installations.
    pub destination_token: Option<String>,

    /// Source host root; defaults to the public API root.
    pub source_root: Option<String>,

    /// Destination host root; defaults to the public API root.
    pub destination_root: Option<String>,

    /// Entity kinds to migrate.
    pub entities: EntitySelection,
}

impl MigrationOptions {
    /// Resolves the raw input into a validated [`MigrationConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a repository reference is malformed or
    /// when the roots differ and no destination token was supplied.
    pub fn resolve(self) -> Result<MigrationConfig, ConfigError> {
        let source = RepoRef::parse(&self.source_repo)?;
        let destination = RepoRef::parse(&self.destination_repo)?;

        let source_root = normalize_root(self.source_root.as_deref().unwrap_or(PUBLIC_API_ROOT));
        let destination_root =
            normalize_root(self.destination_root.as_deref().unwrap_or(PUBLIC_API_ROOT));

        if source_root != destination_root && self.destination_token.is_none() {
            return Err(ConfigError::MissingDestinationToken);
        }

        let destination_username = self.destination_username.unwrap_or_else(|| {
            info!(
                username = %self.username,
                "No destination username provided, defaulting to source username"
            );
            self.username.clone()
        });
        let destination_token = self.destination_token.unwrap_or_else(|| {
            info!("No destination token provided, defaulting to source token");
            self.token.clone()
        });

        Ok(MigrationConfig {
            source,
            destination,
            source_root,
            destination_root,
            source_credentials: Credentials::new(self.username, self.token),
            destination_credentials: Credentials::new(destination_username, destination_token),
            entities: self.entities.defaulted(),
        })
    }
}

/// A validated per-run configuration, threaded by reference through the
/// runner and into the entity creators.
#[derive(Debug, Clone)]
pub struct MigrationConfig {
    /// Repository to migrate from.
    pub source: RepoRef,

    /// Repository to migrate to.
    pub destination: RepoRef,

    /// Normalized source host root.
    pub source_root: String,

    /// Normalized destination host root.
    pub destination_root: String,

    /// Credentials for the source side.
    pub source_credentials: Credentials,

    /// Credentials for the destination side.
    pub destination_credentials: Credentials,

    /// Entity kinds to migrate.
    pub entities: EntitySelection,
}

impl MigrationConfig {
    /// Returns true when both sides share one installation, implying a
    /// shared user-identity space so assignee logins can be forwarded.
    #[must_use]
    pub fn same_installation(&self) -> bool {
        self.source_root == self.destination_root
    }
}

/// Normalizes a host root.
///
/// The public API root is used verbatim; any other root is a self-hosted
/// installation whose REST API lives under `/api/v3`.
fn normalize_root(root: &str) -> String {
    let trimmed = root.trim_end_matches('/');
    if trimmed == PUBLIC_API_ROOT {
        trimmed.to_string()
    } else {
        format!("{trimmed}/api/v3")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> MigrationOptions {
        MigrationOptions {
            username: "octocat".to_string(),
            token: "secret".to_string(),
            source_repo: "acme/widgets".to_string(),
            destination_repo: "acme/widgets-archive".to_string(),
            destination_username: None,
            destination_token: None,
            source_root: None,
            destination_root: None,
            entities: EntitySelection::default(),
        }
    }

    #[test]
    fn parses_owner_and_name() {
        let repo = RepoRef::parse("acme/widgets").unwrap();
        assert_eq!(repo.owner, "acme");
        assert_eq!(repo.name, "widgets");
        assert_eq!(repo.to_string(), "acme/widgets");
    }

    #[test]
    fn rejects_malformed_references() {
        for spec in ["acme", "acme/", "/widgets", "acme/widgets/extra"] {
            assert!(matches!(
                RepoRef::parse(spec),
                Err(ConfigError::InvalidRepository { .. })
            ));
        }
    }

    #[test]
    fn public_root_is_left_alone() {
        assert_eq!(normalize_root(PUBLIC_API_ROOT), PUBLIC_API_ROOT);
    }

    #[test]
    fn self_hosted_root_gains_api_suffix() {
        assert_eq!(
            normalize_root("https://ghe.example.com/"),
            "https://ghe.example.com/api/v3"
        );
    }

    #[test]
    fn empty_selection_defaults_to_all() {
        assert_eq!(EntitySelection::default().defaulted(), EntitySelection::all());
    }

    #[test]
    fn explicit_selection_is_kept() {
        let selection = EntitySelection {
            labels: true,
            ..EntitySelection::default()
        };
        assert_eq!(selection.defaulted(), selection);
    }

    #[test]
    fn destination_credentials_default_to_source() {
        let config = options().resolve().unwrap();
        assert_eq!(config.destination_credentials.username, "octocat");
        assert_eq!(config.destination_credentials.token, "secret");
        assert!(config.same_installation());
    }

    #[test]
    fn cross_installation_requires_destination_token() {
        let mut opts = options();
        opts.destination_root = Some("https://ghe.example.com".to_string());
        assert!(matches!(
            opts.resolve(),
            Err(ConfigError::MissingDestinationToken)
        ));
    }

    #[test]
    fn cross_installation_with_token_resolves() {
        let mut opts = options();
        opts.destination_root = Some("https://ghe.example.com".to_string());
        opts.destination_token = Some("other-secret".to_string());
        let config = opts.resolve().unwrap();
        assert!(!config.same_installation());
        assert_eq!(config.destination_root, "https://ghe.example.com/api/v3");
        // The username still defaults to the source side.
        assert_eq!(config.destination_credentials.username, "octocat");
    }
}
