//! Diagram languages and image formats.

/// Diagram notations recognized on fenced code blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramLanguage {
    /// Rendered by a `PlantUML` server from an encoded URL.
    PlantUml,
    /// Left for the client-side Mermaid runtime.
    Mermaid,
}

impl DiagramLanguage {
    /// Parse language from code fence info string.
    ///
    /// Returns None if the language is not a diagram notation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "plantuml" => Some(Self::PlantUml),
            "mermaid" => Some(Self::Mermaid),
            _ => None,
        }
    }
}

/// Image format requested from the `PlantUML` server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagramFormat {
    /// Scalable vector image (default).
    #[default]
    Svg,
    /// Raster image.
    Png,
}

impl DiagramFormat {
    /// Parse format from attribute or configuration value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "svg" => Some(Self::Svg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    /// Path segment used by the server for this format.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_languages() {
        assert_eq!(DiagramLanguage::parse("plantuml"), Some(DiagramLanguage::PlantUml));
        assert_eq!(DiagramLanguage::parse("mermaid"), Some(DiagramLanguage::Mermaid));
        assert_eq!(DiagramLanguage::parse("rust"), None);
        assert_eq!(DiagramLanguage::parse(""), None);
    }

    #[test]
    fn test_format_round_trip() {
        for format in [DiagramFormat::Svg, DiagramFormat::Png] {
            assert_eq!(DiagramFormat::parse(format.as_str()), Some(format));
        }
        assert_eq!(DiagramFormat::parse("pdf"), None);
        assert_eq!(DiagramFormat::default(), DiagramFormat::Svg);
    }
}
