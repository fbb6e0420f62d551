//! Code block processor for diagram languages.
//!
//! This module provides [`DiagramProcessor`], which implements the
//! [`CodeBlockProcessor`] trait and replaces `plantuml` and `mermaid`
//! blocks with their container markup during rendering.

use std::collections::HashMap;
use std::sync::Arc;

use wiki_renderer::{CodeBlockProcessor, ProcessResult};

use crate::consts::{DEFAULT_PLANTUML_URL, PLANTUML_ERROR_HTML};
use crate::id::DiagramIdGenerator;
use crate::language::{DiagramFormat, DiagramLanguage};
use crate::mermaid::mermaid_html;
use crate::plantuml::{DeflateEncoder64, DiagramEncoder, diagram_label, image_url, plantuml_html};

/// Code block processor for diagram languages.
///
/// `PlantUML` blocks become an `<img>` pointing at the configured server,
/// Mermaid blocks become an escaped marker element. Encoding failures never
/// escape: the block is replaced with an error placeholder and a warning is
/// recorded.
///
/// A `format=png` attribute on the fence overrides the configured format for
/// that block.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use wiki_diagrams::{DiagramProcessor, SequentialIds};
/// use wiki_renderer::{HtmlBackend, MarkdownRenderer};
///
/// let processor = DiagramProcessor::new(Arc::new(SequentialIds::new()))
///     .plantuml_url("https://plantuml.example");
/// let mut renderer = MarkdownRenderer::<HtmlBackend>::new().with_processor(processor);
///
/// let result = renderer.render_markdown("```plantuml\n@startuml\nA -> B\n@enduml\n```");
/// assert!(result.html.contains(r#"src="https://plantuml.example/svg/"#));
/// assert!(result.html.contains(r#"alt="A -&gt; B""#));
/// ```
pub struct DiagramProcessor {
    ids: Arc<dyn DiagramIdGenerator>,
    encoder: Arc<dyn DiagramEncoder>,
    plantuml_url: String,
    format: DiagramFormat,
    warnings: Vec<String>,
}

impl DiagramProcessor {
    /// Create a processor drawing element ids from `ids`.
    #[must_use]
    pub fn new(ids: Arc<dyn DiagramIdGenerator>) -> Self {
        Self {
            ids,
            encoder: Arc::new(DeflateEncoder64),
            plantuml_url: DEFAULT_PLANTUML_URL.to_owned(),
            format: DiagramFormat::default(),
            warnings: Vec::new(),
        }
    }

    /// Set the `PlantUML` server base URL.
    #[must_use]
    pub fn plantuml_url(mut self, url: impl Into<String>) -> Self {
        self.plantuml_url = url.into();
        self
    }

    /// Set the default image format.
    #[must_use]
    pub fn format(mut self, format: DiagramFormat) -> Self {
        self.format = format;
        self
    }

    /// Replace the `PlantUML` source encoder.
    #[must_use]
    pub fn with_encoder(mut self, encoder: Arc<dyn DiagramEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    fn render_plantuml(&mut self, attrs: &HashMap<String, String>, source: &str) -> String {
        let format = match attrs.get("format") {
            Some(value) => DiagramFormat::parse(value).unwrap_or_else(|| {
                self.warnings.push(format!(
                    "Unknown diagram format '{value}', using {}",
                    self.format.as_str()
                ));
                self.format
            }),
            None => self.format,
        };

        match self.encoder.encode(source) {
            Ok(encoded) => {
                let url = image_url(&self.plantuml_url, format, &encoded);
                plantuml_html(&self.ids.next_id(), &url, diagram_label(source))
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to encode PlantUML diagram");
                self.warnings
                    .push(format!("Failed to encode PlantUML diagram: {err}"));
                PLANTUML_ERROR_HTML.to_owned()
            }
        }
    }
}

impl CodeBlockProcessor for DiagramProcessor {
    fn process(
        &mut self,
        language: &str,
        attrs: &HashMap<String, String>,
        source: &str,
    ) -> ProcessResult {
        let Some(language) = DiagramLanguage::parse(language) else {
            return ProcessResult::PassThrough;
        };

        // Fence content ends with the newline before the closing fence
        let body = source.strip_suffix('\n').unwrap_or(source);

        let html = match language {
            DiagramLanguage::PlantUml => self.render_plantuml(attrs, body),
            DiagramLanguage::Mermaid => mermaid_html(&self.ids.next_id(), body),
        };
        ProcessResult::Inline(html)
    }

    fn warnings(&self) -> &[String] {
        &self.warnings
    }
}
