//! Comment replay.
//!
//! Issues and pull requests carry their comment threads with them. The
//! destination posts are authored by the migrating credential, so each
//! replayed body is appended with an attribution line naming the original
//! author. Threads are addressed through the records' own `comments_url`
//! references: the URL's path is re-rooted on the owning client's base
//! URI, which keeps source and destination hosts independent.

use crate::models::Comment;
use octocrab::Octocrab;
use serde::Serialize;
use tracing::warn;
use url::Url;

/// Creation payload for a replayed comment.
#[derive(Debug, Clone, Serialize)]
struct CommentPayload {
    body: String,
}

/// Counters for one replayed comment thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommentReplay {
    /// Number of comments replayed at the destination.
    pub replayed: usize,

    /// Number of comments (or whole threads) that failed to replay.
    pub failed: usize,
}

impl CommentReplay {
    pub(crate) fn merge(&mut self, other: CommentReplay) {
        self.replayed += other.replayed;
        self.failed += other.failed;
    }
}

/// Builds the replayed body: the original body plus an attribution line
/// crediting the original author.
pub(crate) fn attributed_body(body: Option<&str>, author: &str) -> String {
    format!("{}\n\nOriginal by @{author}", body.unwrap_or_default())
}

/// Reduces an absolute `comments_url` to a path for the owning client.
fn comments_route(url: &str) -> Option<String> {
    match Url::parse(url) {
        Ok(parsed) => Some(parsed.path().to_string()),
        Err(error) => {
            warn!(url, error = %error, "Unparseable comments url, skipping thread");
            None
        }
    }
}

/// Replays the source comment thread onto a newly created destination
/// record.
///
/// A failed thread fetch or per-comment post is logged and counted,
/// non-fatal. Comments carry no assignee field, so no retry applies here.
pub(crate) async fn replay_comments(
    source: &Octocrab,
    destination: &Octocrab,
    source_comments_url: &str,
    destination_comments_url: &str,
) -> CommentReplay {
    let mut replay = CommentReplay::default();

    let (Some(source_route), Some(destination_route)) = (
        comments_route(source_comments_url),
        comments_route(destination_comments_url),
    ) else {
        replay.failed += 1;
        return replay;
    };

    let comments: Vec<Comment> = match source.get(&source_route, None::<&()>).await {
        Ok(comments) => comments,
        Err(error) => {
            warn!(
                route = %source_route,
                error = %error,
                "Failed to fetch source comment thread"
            );
            replay.failed += 1;
            return replay;
        }
    };

    for comment in &comments {
        let payload = CommentPayload {
            body: attributed_body(comment.body.as_deref(), &comment.user.login),
        };
        match destination
            .post::<_, serde_json::Value>(&destination_route, Some(&payload))
            .await
        {
            Ok(_) => replay.replayed += 1,
            Err(error) => {
                warn!(
                    route = %destination_route,
                    error = %error,
                    "Failed to replay comment"
                );
                replay.failed += 1;
            }
        }
    }

    replay
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credits_the_original_author() {
        assert_eq!(
            attributed_body(Some("fix it"), "alice"),
            "fix it\n\nOriginal by @alice"
        );
    }

    #[test]
    fn tolerates_a_missing_body() {
        assert_eq!(attributed_body(None, "alice"), "\n\nOriginal by @alice");
    }

    #[test]
    fn reduces_comment_urls_to_paths() {
        assert_eq!(
            comments_route("https://api.github.com/repos/a/b/issues/3/comments").as_deref(),
            Some("/repos/a/b/issues/3/comments")
        );
        assert!(comments_route("not a url").is_none());
    }
}
