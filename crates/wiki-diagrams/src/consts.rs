//! Internal constants for diagram rendering.

/// Public `PlantUML` server used when none is configured.
pub const DEFAULT_PLANTUML_URL: &str = "https://www.plantuml.com/plantuml";

/// Alt text for diagrams without a usable first line.
pub const DEFAULT_PLANTUML_LABEL: &str = "PlantUML diagram";

/// Placeholder emitted when a diagram cannot be encoded.
pub const PLANTUML_ERROR_HTML: &str =
    r#"<div class="diagram-error">Failed to render PlantUML diagram</div>"#;

/// `PlantUML` text encoding alphabet (digits, upper, lower, `-`, `_`).
pub const PLANTUML_ALPHABET: &str =
    "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_";
