//! Artifact preview fetching
//!
//! Read-only probes against the backend file store. Every failure mode
//! (transport error, non-success status, empty body) degrades to an
//! explicit `Absent` outcome for that one slot; nothing here ever
//! propagates an error, and one slot's absence never affects the others.
//! Results are never cached: each render cycle fetches from scratch.

use crate::artifacts::ArtifactPaths;
use crate::config::BackendConfig;
use std::time::Duration;

/// Timeout for the markdown fetch: the primary deliverable, worth waiting for.
pub const MARKDOWN_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for image probes: best-effort previews, kept short.
pub const IMAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of fetching the markdown artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The file exists and has non-blank content
    Found(String),
    /// Missing, empty, or unreachable
    Absent,
}

/// Outcome of probing an image artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageProbe {
    /// The file store answered with a success status
    Present,
    /// Missing or unreachable
    Absent,
}

/// The markdown pane's slot for one render
#[derive(Debug, Clone)]
pub struct MarkdownSlot {
    pub rel_path: String,
    pub url: String,
    pub outcome: FetchOutcome,
}

/// One image slot for one render
#[derive(Debug, Clone)]
pub struct ImageSlot {
    pub rel_path: String,
    pub url: String,
    pub probe: ImageProbe,
}

/// Fully-fetched preview state for one render cycle
#[derive(Debug, Clone)]
pub struct ArtifactPreview {
    pub markdown: MarkdownSlot,
    pub hero: ImageSlot,
    pub social: ImageSlot,
}

/// Fetches artifact previews from the backend file store
#[derive(Clone)]
pub struct Previewer {
    http: reqwest::Client,
    backend: BackendConfig,
}

impl Previewer {
    /// Create a previewer against the given backend
    pub fn new(backend: BackendConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            backend,
        }
    }

    /// Fetch and probe all three artifacts.
    ///
    /// The three requests are independent reads; they run concurrently and
    /// all complete (or fail) before the preview is considered rendered.
    pub async fn preview(&self, paths: &ArtifactPaths) -> ArtifactPreview {
        let (markdown, hero, social) = tokio::join!(
            self.fetch_markdown(&paths.markdown),
            self.probe_image(&paths.hero_image),
            self.probe_image(&paths.social_image),
        );

        ArtifactPreview {
            markdown: MarkdownSlot {
                rel_path: paths.markdown.clone(),
                url: self.backend.file_url(&paths.markdown),
                outcome: markdown,
            },
            hero: ImageSlot {
                rel_path: paths.hero_image.clone(),
                url: self.backend.file_url(&paths.hero_image),
                probe: hero,
            },
            social: ImageSlot {
                rel_path: paths.social_image.clone(),
                url: self.backend.file_url(&paths.social_image),
                probe: social,
            },
        }
    }

    /// Fetch the markdown artifact's text.
    async fn fetch_markdown(&self, rel_path: &str) -> FetchOutcome {
        let url = self.backend.file_url(rel_path);
        let response = match self.http.get(&url).timeout(MARKDOWN_TIMEOUT).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(%url, "Markdown fetch failed: {}", e);
                return FetchOutcome::Absent;
            }
        };

        if !response.status().is_success() {
            tracing::debug!(%url, status = %response.status(), "Markdown not found");
            return FetchOutcome::Absent;
        }

        match response.text().await {
            Ok(text) if !text.trim().is_empty() => FetchOutcome::Found(text),
            Ok(_) => FetchOutcome::Absent,
            Err(e) => {
                tracing::debug!(%url, "Markdown body read failed: {}", e);
                FetchOutcome::Absent
            }
        }
    }

    /// Probe whether an image artifact exists. The page links the image by
    /// URL; only existence matters here, not the bytes.
    async fn probe_image(&self, rel_path: &str) -> ImageProbe {
        let url = self.backend.file_url(rel_path);
        match self.http.get(&url).timeout(IMAGE_TIMEOUT).send().await {
            Ok(r) if r.status().is_success() => ImageProbe::Present,
            Ok(r) => {
                tracing::debug!(%url, status = %r.status(), "Image not found");
                ImageProbe::Absent
            }
            Err(e) => {
                tracing::debug!(%url, "Image probe failed: {}", e);
                ImageProbe::Absent
            }
        }
    }
}
