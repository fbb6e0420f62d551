//! Markdown preview rendering.
//!
//! Provides [`PreviewRenderer`], which turns editor markdown into sanitized
//! HTML for the preview pane.

use std::sync::Arc;

use wiki_config::Config;
use wiki_diagrams::{
    DEFAULT_PLANTUML_URL, DeflateEncoder64, DiagramEncoder, DiagramFormat, DiagramIdGenerator,
    DiagramProcessor, SequentialIds,
};
use wiki_renderer::{HtmlBackend, MarkdownRenderer, sanitize};

use crate::error::PreviewError;

/// Markup returned by [`PreviewRenderer::render`] when rendering fails.
pub const FALLBACK_HTML: &str = "<p>Error rendering markdown</p>";

/// Result of rendering a preview.
#[derive(Clone, Debug)]
pub struct Preview {
    /// Sanitized HTML.
    pub html: String,
    /// Warnings from diagram processing.
    pub warnings: Vec<String>,
}

/// Configuration for [`PreviewRenderer`].
#[derive(Clone, Debug)]
pub struct PreviewConfig {
    /// Render soft line breaks as `<br>`.
    pub breaks: bool,
    /// Enable tables, strikethrough, task lists and footnotes.
    pub gfm: bool,
    /// `PlantUML` server base URL.
    pub plantuml_url: String,
    /// Image format requested from the `PlantUML` server.
    pub plantuml_format: DiagramFormat,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            breaks: true,
            gfm: true,
            plantuml_url: DEFAULT_PLANTUML_URL.to_owned(),
            plantuml_format: DiagramFormat::Svg,
        }
    }
}

impl From<&Config> for PreviewConfig {
    fn from(config: &Config) -> Self {
        Self {
            breaks: config.renderer.breaks,
            gfm: config.renderer.gfm,
            plantuml_url: config.diagrams.plantuml_url.clone(),
            plantuml_format: DiagramFormat::parse(&config.diagrams.plantuml_format)
                .unwrap_or_default(),
        }
    }
}

/// Markdown preview renderer.
///
/// Each call runs the full pipeline: markdown to HTML with diagram blocks
/// replaced, then sanitization. The only state shared between calls is the
/// diagram id generator, so one renderer can serve several editors and
/// threads at once.
///
/// # Example
///
/// ```
/// use wiki_preview::PreviewRenderer;
///
/// let renderer = PreviewRenderer::default();
/// let html = renderer.render("**bold** <script>alert(1)</script>");
/// assert!(html.contains("<strong>bold</strong>"));
/// assert!(!html.contains("script"));
/// ```
pub struct PreviewRenderer {
    config: PreviewConfig,
    ids: Arc<dyn DiagramIdGenerator>,
    encoder: Arc<dyn DiagramEncoder>,
}

impl PreviewRenderer {
    /// Create a renderer with sequential diagram ids.
    #[must_use]
    pub fn new(config: PreviewConfig) -> Self {
        Self {
            config,
            ids: Arc::new(SequentialIds::new()),
            encoder: Arc::new(DeflateEncoder64),
        }
    }

    /// Create a renderer from application configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(PreviewConfig::from(config))
    }

    /// Use a different diagram id generator.
    #[must_use]
    pub fn with_id_generator(mut self, ids: Arc<dyn DiagramIdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Use a different `PlantUML` encoder.
    #[must_use]
    pub fn with_encoder(mut self, encoder: Arc<dyn DiagramEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    /// Render markdown to sanitized HTML.
    ///
    /// Never fails: any error is logged and replaced with [`FALLBACK_HTML`].
    #[must_use]
    pub fn render(&self, markdown: &str) -> String {
        match self.try_render(markdown) {
            Ok(preview) => preview.html,
            Err(err) => {
                tracing::error!(error = %err, "Markdown render error");
                FALLBACK_HTML.to_owned()
            }
        }
    }

    /// Render markdown to sanitized HTML, reporting failures.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::Sanitize`] if the sanitized HTML cannot be
    /// serialized. No partial output is produced.
    pub fn try_render(&self, markdown: &str) -> Result<Preview, PreviewError> {
        let processor = DiagramProcessor::new(Arc::clone(&self.ids))
            .plantuml_url(self.config.plantuml_url.as_str())
            .format(self.config.plantuml_format)
            .with_encoder(Arc::clone(&self.encoder));

        let mut renderer = MarkdownRenderer::<HtmlBackend>::new()
            .with_gfm(self.config.gfm)
            .with_breaks(self.config.breaks)
            .with_processor(processor);

        let result = renderer.render_markdown(markdown);
        for warning in &result.warnings {
            tracing::warn!(warning = %warning, "Preview warning");
        }

        let html = sanitize::sanitize_html(&result.html)?;

        Ok(Preview {
            html,
            warnings: result.warnings,
        })
    }
}

impl Default for PreviewRenderer {
    fn default() -> Self {
        Self::new(PreviewConfig::default())
    }
}
