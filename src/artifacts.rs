//! Artifact path resolution
//!
//! Derives the relative paths of the three conventional artifacts from the
//! latest agent reply. Explicit entries in the reply's `files` map win,
//! independently per artifact kind; otherwise the naming convention the
//! agent uses when writing files applies. Pure string work, no I/O, no
//! normalization, no escaping.

use crate::agent::AgentReply;

/// Resolved relative paths for one render cycle.
///
/// Derived, never stored: recomputed from the latest metadata every time
/// the page is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// The markdown deliverable
    pub markdown: String,
    /// The hero image (blog convention)
    pub hero_image: String,
    /// The social image
    pub social_image: String,
}

/// Resolve artifact paths from an agent reply.
///
/// Returns `None` unless both `platform` and `slug` are present and
/// non-empty. Both are required even when an explicit `files` entry could
/// cover every artifact kind; that rigidity matches the backend contract
/// and is kept deliberately.
pub fn resolve(reply: &AgentReply) -> Option<ArtifactPaths> {
    let platform = reply.platform.as_deref().filter(|p| !p.is_empty())?;
    let slug = reply.slug.as_deref().filter(|s| !s.is_empty())?;

    let explicit = |kind: &str| {
        reply
            .files
            .get(kind)
            .filter(|path| !path.is_empty())
            .cloned()
    };

    Some(ArtifactPaths {
        markdown: explicit("markdown").unwrap_or_else(|| format!("{}/{}/post.md", platform, slug)),
        hero_image: explicit("hero_image").unwrap_or_else(|| format!("blogs/{}/hero.png", slug)),
        social_image: explicit("social_image")
            .unwrap_or_else(|| format!("{}/{}/image.png", platform, slug)),
    })
}
