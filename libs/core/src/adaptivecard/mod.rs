//! Adaptive Card documents for Microsoft Teams incoming webhooks.
//!
//! The model is a plain owned tree: a [`Message`] owns its [`Attachment`]s,
//! each attachment owns one [`TopLevelCard`], and cards own their body
//! [`Element`]s and [`Action`]s. Every node implements [`Validate`], which is
//! fail-fast and returns the first [`ValidationError`](crate::ValidationError)
//! found during a depth-first walk.

mod action;
mod builder;
mod card;
mod check;
mod element;
mod fact;
mod mention;
mod message;
mod table;
pub mod values;
mod width;

pub use action::{Action, SelectAction};
pub use builder::*;
pub use card::{Card, TopLevelCard};
pub use check::Validate;
pub use element::{Column, Element, MediaSource};
pub use fact::Fact;
pub use mention::{Mention, Mentioned, MsTeams};
pub use message::{Attachment, Message};
pub use table::{TableCell, TableRow};
pub use width::ColumnWidth;

/// Type value of the outer message envelope.
pub const TYPE_MESSAGE: &str = "message";

pub const TYPE_ADAPTIVE_CARD: &str = "AdaptiveCard";
pub const ADAPTIVE_CARD_SCHEMA: &str = "http://adaptivecards.io/schemas/adaptive-card.json";

/// Highest schema version this crate knows how to validate. Cards declaring
/// a newer version are still accepted.
pub const ADAPTIVE_CARD_MAX_VERSION: f64 = 1.5;
pub const ADAPTIVE_CARD_MIN_VERSION: f64 = 1.0;

pub const TYPE_MENTION: &str = "mention";
pub const MENTION_TEXT_OPEN: &str = "<at>";
pub const MENTION_TEXT_CLOSE: &str = "</at>";

pub const ATTACHMENT_CONTENT_TYPE: &str = "application/vnd.microsoft.card.adaptive";
pub const ATTACHMENT_LAYOUT_LIST: &str = "list";
pub const ATTACHMENT_LAYOUT_CAROUSEL: &str = "carousel";

pub const TYPE_COLUMN: &str = "Column";
pub const TYPE_TABLE_COLUMN_DEFINITION: &str = "TableColumnDefinition";
pub const TYPE_TABLE_ROW: &str = "TableRow";
pub const TYPE_TABLE_CELL: &str = "TableCell";

pub const COLUMN_WIDTH_AUTO: &str = "auto";
pub const COLUMN_WIDTH_STRETCH: &str = "stretch";
pub const PIXEL_WIDTH_PATTERN: &str = "^[0-9]+px$";
pub const PIXEL_WIDTH_EXAMPLE: &str = "50px";

pub const SIZE_SMALL: &str = "small";
pub const SIZE_DEFAULT: &str = "default";
pub const SIZE_MEDIUM: &str = "medium";
pub const SIZE_LARGE: &str = "large";
pub const SIZE_EXTRA_LARGE: &str = "extraLarge";

pub const WEIGHT_BOLDER: &str = "bolder";
pub const WEIGHT_LIGHTER: &str = "lighter";
pub const WEIGHT_DEFAULT: &str = "default";

pub const COLOR_DEFAULT: &str = "default";
pub const COLOR_DARK: &str = "dark";
pub const COLOR_LIGHT: &str = "light";
pub const COLOR_ACCENT: &str = "accent";
pub const COLOR_GOOD: &str = "good";
pub const COLOR_WARNING: &str = "warning";
pub const COLOR_ATTENTION: &str = "attention";

pub const SPACING_DEFAULT: &str = "default";
pub const SPACING_NONE: &str = "none";
pub const SPACING_SMALL: &str = "small";
pub const SPACING_MEDIUM: &str = "medium";
pub const SPACING_LARGE: &str = "large";
pub const SPACING_EXTRA_LARGE: &str = "extraLarge";
pub const SPACING_PADDING: &str = "padding";

pub const CONTAINER_STYLE_DEFAULT: &str = "default";
pub const CONTAINER_STYLE_EMPHASIS: &str = "emphasis";
pub const CONTAINER_STYLE_GOOD: &str = "good";
pub const CONTAINER_STYLE_ATTENTION: &str = "attention";
pub const CONTAINER_STYLE_WARNING: &str = "warning";
pub const CONTAINER_STYLE_ACCENT: &str = "accent";

pub const TEXT_BLOCK_STYLE_DEFAULT: &str = "default";
pub const TEXT_BLOCK_STYLE_HEADING: &str = "heading";

pub const HORIZONTAL_ALIGNMENT_LEFT: &str = "left";
pub const HORIZONTAL_ALIGNMENT_CENTER: &str = "center";
pub const HORIZONTAL_ALIGNMENT_RIGHT: &str = "right";

pub const VERTICAL_CONTENT_ALIGNMENT_TOP: &str = "top";
pub const VERTICAL_CONTENT_ALIGNMENT_CENTER: &str = "center";
pub const VERTICAL_CONTENT_ALIGNMENT_BOTTOM: &str = "bottom";

pub const IMAGE_SIZE_AUTO: &str = "auto";
pub const IMAGE_SIZE_STRETCH: &str = "stretch";
pub const IMAGE_SIZE_SMALL: &str = "small";
pub const IMAGE_SIZE_MEDIUM: &str = "medium";
pub const IMAGE_SIZE_LARGE: &str = "large";

pub const MSTEAMS_WIDTH_FULL: &str = "Full";

pub const TYPE_ACTION_EXECUTE: &str = "Action.Execute";
pub const TYPE_ACTION_SUBMIT: &str = "Action.Submit";
pub const TYPE_ACTION_OPEN_URL: &str = "Action.OpenUrl";
pub const TYPE_ACTION_SHOW_CARD: &str = "Action.ShowCard";
pub const TYPE_ACTION_TOGGLE_VISIBILITY: &str = "Action.ToggleVisibility";

/// First schema version that knows about `Action.Execute`.
pub const ACTION_EXECUTE_MIN_CARD_VERSION: f64 = 1.4;

/// Drop the element instead of bubbling the unknown element up.
pub const FALLBACK_OPTION_DROP: &str = "drop";

pub const TYPE_ELEMENT_ACTION_SET: &str = "ActionSet";
pub const TYPE_ELEMENT_CODE_BLOCK: &str = "CodeBlock";
pub const TYPE_ELEMENT_COLUMN_SET: &str = "ColumnSet";
pub const TYPE_ELEMENT_CONTAINER: &str = "Container";
pub const TYPE_ELEMENT_FACT_SET: &str = "FactSet";
pub const TYPE_ELEMENT_IMAGE: &str = "Image";
pub const TYPE_ELEMENT_IMAGE_SET: &str = "ImageSet";
pub const TYPE_ELEMENT_INPUT_CHOICE_SET: &str = "Input.ChoiceSet";
pub const TYPE_ELEMENT_INPUT_DATE: &str = "Input.Date";
pub const TYPE_ELEMENT_INPUT_NUMBER: &str = "Input.Number";
pub const TYPE_ELEMENT_INPUT_TEXT: &str = "Input.Text";
pub const TYPE_ELEMENT_INPUT_TIME: &str = "Input.Time";
pub const TYPE_ELEMENT_INPUT_TOGGLE: &str = "Input.Toggle";
pub const TYPE_ELEMENT_MEDIA: &str = "Media";
pub const TYPE_ELEMENT_RICH_TEXT_BLOCK: &str = "RichTextBlock";
pub const TYPE_ELEMENT_TABLE: &str = "Table";
pub const TYPE_ELEMENT_TEXT_BLOCK: &str = "TextBlock";
pub const TYPE_ELEMENT_TEXT_RUN: &str = "TextRun";

/// Renders a schema version the way cards declare it (`1.5`, never `1.50`).
pub fn format_version(version: f64) -> String {
    format!("{version:.1}")
}

/// Parses a declared schema version; `None` when blank or not numeric.
pub fn parse_version(version: &str) -> Option<f64> {
    let trimmed = version.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Wraps a display name in the mention delimiters Teams looks for.
pub fn mention_text(display_name: &str) -> String {
    format!("{MENTION_TEXT_OPEN}{display_name}{MENTION_TEXT_CLOSE}")
}
