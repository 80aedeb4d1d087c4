//! Rendered output shape.

use serde::{Deserialize, Serialize};

/// A name/value pair shown inside a rendered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    /// Field heading
    pub name: String,
    /// Field body
    pub value: String,
    /// Whether the field may share a row with its neighbours
    pub inline: bool,
}

/// The only message shape handlers and the event bridge produce.
///
/// Platform adapters translate it into their native rich-message format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedMessage {
    /// Heading
    pub title: String,
    /// Body text
    pub description: String,
    /// Accent colour as `0xRRGGBB`
    pub color: u32,
    /// Extra fields, in display order
    pub fields: Vec<EmbedField>,
    /// Thumbnail image URL
    pub thumbnail: Option<String>,
    /// Footer text
    pub footer: Option<String>,
}
