//! `PlantUML` text encoding and image markup.
//!
//! The server accepts diagram source in the URL: raw-deflated, then written
//! with a base64 variant whose alphabet starts with the digits. The browser
//! fetches the image later; nothing here touches the network.

use std::io::Write;

use base64::Engine;
use base64::alphabet::Alphabet;
use base64::engine::{GeneralPurpose, general_purpose};
use flate2::Compression;
use flate2::write::DeflateEncoder;
use wiki_renderer::escape_html;

use crate::consts::{DEFAULT_PLANTUML_LABEL, PLANTUML_ALPHABET};
use crate::error::EncodeError;
use crate::language::DiagramFormat;

const ALPHABET: Alphabet = match Alphabet::new(PLANTUML_ALPHABET) {
    Ok(alphabet) => alphabet,
    Err(_) => panic!("invalid PlantUML alphabet"),
};

const ENGINE: GeneralPurpose = GeneralPurpose::new(&ALPHABET, general_purpose::NO_PAD);

/// Turns diagram source into the text segment of a server URL.
pub trait DiagramEncoder: Send + Sync {
    /// Encode diagram source.
    fn encode(&self, source: &str) -> Result<String, EncodeError>;
}

/// Default encoder: raw deflate at best compression plus `PlantUML` base64.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeflateEncoder64;

impl DiagramEncoder for DeflateEncoder64 {
    fn encode(&self, source: &str) -> Result<String, EncodeError> {
        encode_plantuml(source)
    }
}

/// Encode `PlantUML` source for use in a server URL.
///
/// # Example
///
/// ```
/// use wiki_diagrams::encode_plantuml;
///
/// let encoded = encode_plantuml("@startuml\nA -> B\n@enduml").unwrap();
/// assert!(encoded.len() % 4 == 0);
/// assert!(encoded.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
/// ```
pub fn encode_plantuml(source: &str) -> Result<String, EncodeError> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(source.as_bytes())?;
    let compressed = encoder.finish()?;

    let mut encoded = ENGINE.encode(compressed);
    // The reference encoder always emits whole 4-character groups
    while encoded.len() % 4 != 0 {
        encoded.push('0');
    }
    Ok(encoded)
}

/// Image URL for an encoded diagram.
#[must_use]
pub fn image_url(server: &str, format: DiagramFormat, encoded: &str) -> String {
    format!(
        "{}/{}/{encoded}",
        server.trim_end_matches('/'),
        format.as_str()
    )
}

/// Human-readable label for a diagram.
///
/// First non-blank line that is not a directive such as `@startuml`.
#[must_use]
pub fn diagram_label(source: &str) -> &str {
    source
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('@'))
        .unwrap_or(DEFAULT_PLANTUML_LABEL)
}

/// Container markup for an encoded diagram image.
#[must_use]
pub fn plantuml_html(id: &str, url: &str, label: &str) -> String {
    format!(
        r#"<div class="plantuml-diagram" id="plantuml-{}"><img src="{}" alt="{}" loading="lazy"></div>"#,
        escape_html(id),
        escape_html(url),
        escape_html(label)
    )
}
