//! Page model and HTML rendering
//!
//! The console is classic server-side rendering: each request builds a
//! complete [`PageModel`] from scratch and pushes it through an embedded
//! minijinja template. Fetched markdown artifacts are converted to HTML
//! with pulldown-cmark before templating; everything else is auto-escaped
//! by the template engine.

use crate::error::Result;
use crate::preview::{ArtifactPreview, FetchOutcome, ImageProbe};
use crate::session::{Role, Session};
use minijinja::Environment;
use serde::Serialize;

/// Quick-fill prompts offered on the page
pub const STARTER_PROMPTS: [&str; 4] = [
    "Create a LinkedIn post about AI agents",
    "Write a blog post about AI agents",
    "Create a LinkedIn post about prompt engineering",
    "Write a Twitter thread about the future of coding",
];

const PAGE_TEMPLATE: &str = include_str!("../assets/page.html");

/// One transcript entry, ready for the template
#[derive(Debug, Clone, Serialize)]
pub struct TurnView {
    pub role: &'static str,
    pub content: String,
}

/// The markdown pane
#[derive(Debug, Clone, Serialize)]
pub struct MarkdownView {
    pub rel_path: String,
    pub url: String,
    pub found: bool,
    /// Rendered HTML, inserted unescaped by the template
    pub html: String,
}

/// One image slot in the images pane
#[derive(Debug, Clone, Serialize)]
pub struct ImageView {
    pub rel_path: String,
    pub url: String,
    pub present: bool,
}

/// Preview section state, distinguishing "never ran" and "ran but no
/// routing metadata" notices from an actual preview.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PreviewView {
    /// No assistant turn carries metadata yet
    NoRuns,
    /// Latest metadata lacks platform or slug; preview suppressed entirely
    MissingMeta,
    /// All three slots fetched
    Ready {
        markdown: MarkdownView,
        hero: ImageView,
        social: ImageView,
    },
}

impl PreviewView {
    /// Convert a fetched preview into its template form.
    pub fn ready(preview: ArtifactPreview) -> Self {
        let (found, html) = match preview.markdown.outcome {
            FetchOutcome::Found(ref text) => (true, markdown_to_html(text)),
            FetchOutcome::Absent => (false, String::new()),
        };

        PreviewView::Ready {
            markdown: MarkdownView {
                rel_path: preview.markdown.rel_path,
                url: preview.markdown.url,
                found,
                html,
            },
            hero: ImageView {
                rel_path: preview.hero.rel_path,
                url: preview.hero.url,
                present: preview.hero.probe == ImageProbe::Present,
            },
            social: ImageView {
                rel_path: preview.social.rel_path,
                url: preview.social.url,
                present: preview.social.probe == ImageProbe::Present,
            },
        }
    }
}

/// Everything the page template needs for one render
#[derive(Debug, Clone, Serialize)]
pub struct PageModel {
    pub backend_url: String,
    pub thread_id: String,
    pub prefill: String,
    pub starters: Vec<&'static str>,
    pub transcript: Vec<TurnView>,
    pub preview: PreviewView,
}

impl PageModel {
    /// Build the transcript view from a session snapshot.
    pub fn transcript_from(session: &Session) -> Vec<TurnView> {
        session
            .transcript
            .iter()
            .map(|turn| TurnView {
                role: match turn.role {
                    Role::User => "user",
                    Role::Assistant => "assistant",
                },
                content: turn.content.clone(),
            })
            .collect()
    }
}

/// Convert markdown text to HTML.
pub fn markdown_to_html(text: &str) -> String {
    use pulldown_cmark::{html, Options, Parser};

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(text, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Shared template environment with the console page loaded
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Create the renderer with the embedded page template
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("page.html", PAGE_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Render the console page
    pub fn render_page(&self, model: &PageModel) -> Result<String> {
        let template = self.env.get_template("page.html")?;
        Ok(template.render(model)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::{ImageSlot, MarkdownSlot};

    fn model(preview: PreviewView) -> PageModel {
        PageModel {
            backend_url: "http://localhost:8000".to_string(),
            thread_id: "thread-1".to_string(),
            prefill: String::new(),
            starters: STARTER_PROMPTS.to_vec(),
            transcript: vec![
                TurnView {
                    role: "user",
                    content: "Create a LinkedIn post about AI agents".to_string(),
                },
                TurnView {
                    role: "assistant",
                    content: "Done".to_string(),
                },
            ],
            preview,
        }
    }

    fn ready_preview(found: bool, hero: bool) -> ArtifactPreview {
        ArtifactPreview {
            markdown: MarkdownSlot {
                rel_path: "linkedin/ai-agents/post.md".to_string(),
                url: "http://localhost:8000/files/linkedin/ai-agents/post.md".to_string(),
                outcome: if found {
                    FetchOutcome::Found("# Hello\n\nworld".to_string())
                } else {
                    FetchOutcome::Absent
                },
            },
            hero: ImageSlot {
                rel_path: "blogs/ai-agents/hero.png".to_string(),
                url: "http://localhost:8000/files/blogs/ai-agents/hero.png".to_string(),
                probe: if hero {
                    ImageProbe::Present
                } else {
                    ImageProbe::Absent
                },
            },
            social: ImageSlot {
                rel_path: "linkedin/ai-agents/image.png".to_string(),
                url: "http://localhost:8000/files/linkedin/ai-agents/image.png".to_string(),
                probe: ImageProbe::Present,
            },
        }
    }

    #[test]
    fn test_markdown_to_html_renders_headings() {
        let html = markdown_to_html("# Title\n\nbody text");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<p>body text</p>"));
    }

    #[test]
    fn test_page_includes_transcript_and_starters() {
        let renderer = Renderer::new().unwrap();
        let html = renderer.render_page(&model(PreviewView::NoRuns)).unwrap();

        assert!(html.contains("Create a LinkedIn post about AI agents"));
        assert!(html.contains("Done"));
        assert!(html.contains("Run the agent once to see outputs here."));
        assert!(html.contains("http://localhost:8000"));
    }

    #[test]
    fn test_missing_meta_notice_suppresses_preview() {
        let renderer = Renderer::new().unwrap();
        let html = renderer
            .render_page(&model(PreviewView::MissingMeta))
            .unwrap();

        assert!(html.contains("No platform/slug returned by the backend yet"));
        assert!(!html.contains("No hero image found."));
    }

    #[test]
    fn test_ready_preview_renders_markdown_and_image() {
        let renderer = Renderer::new().unwrap();
        let view = PreviewView::ready(ready_preview(true, true));
        let html = renderer.render_page(&model(view)).unwrap();

        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("linkedin/ai-agents/post.md"));
        assert!(html.contains(r#"src="http://localhost:8000/files/blogs/ai-agents/hero.png""#));
    }

    #[test]
    fn test_absent_slots_degrade_independently() {
        let renderer = Renderer::new().unwrap();
        let view = PreviewView::ready(ready_preview(false, false));
        let html = renderer.render_page(&model(view)).unwrap();

        assert!(html.contains("Markdown not found yet."));
        assert!(html.contains("No hero image found."));
        // Social image is still present and rendered.
        assert!(html.contains(r#"src="http://localhost:8000/files/linkedin/ai-agents/image.png""#));
    }

    #[test]
    fn test_user_content_is_escaped() {
        let renderer = Renderer::new().unwrap();
        let mut m = model(PreviewView::NoRuns);
        m.transcript[0].content = "<script>alert(1)</script>".to_string();
        let html = renderer.render_page(&m).unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
