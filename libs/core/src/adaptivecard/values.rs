//! Legal value sets for every constrained Adaptive Card field.
//!
//! Plain functions rather than cached tables: the sets are tiny and only the
//! action-related ones depend on the schema version.

use super::*;

pub fn supported_element_types() -> &'static [&'static str] {
    &[
        TYPE_ELEMENT_ACTION_SET,
        TYPE_ELEMENT_CODE_BLOCK,
        TYPE_ELEMENT_COLUMN_SET,
        TYPE_ELEMENT_CONTAINER,
        TYPE_ELEMENT_FACT_SET,
        TYPE_ELEMENT_IMAGE,
        TYPE_ELEMENT_IMAGE_SET,
        TYPE_ELEMENT_INPUT_CHOICE_SET,
        TYPE_ELEMENT_INPUT_DATE,
        TYPE_ELEMENT_INPUT_NUMBER,
        TYPE_ELEMENT_INPUT_TEXT,
        TYPE_ELEMENT_INPUT_TIME,
        TYPE_ELEMENT_INPUT_TOGGLE,
        TYPE_ELEMENT_MEDIA,
        TYPE_ELEMENT_RICH_TEXT_BLOCK,
        TYPE_ELEMENT_TABLE,
        TYPE_ELEMENT_TEXT_BLOCK,
        TYPE_ELEMENT_TEXT_RUN,
    ]
}

pub fn supported_size_values() -> &'static [&'static str] {
    &[SIZE_SMALL, SIZE_DEFAULT, SIZE_MEDIUM, SIZE_LARGE, SIZE_EXTRA_LARGE]
}

pub fn supported_weight_values() -> &'static [&'static str] {
    &[WEIGHT_BOLDER, WEIGHT_LIGHTER, WEIGHT_DEFAULT]
}

pub fn supported_color_values() -> &'static [&'static str] {
    &[
        COLOR_DEFAULT,
        COLOR_DARK,
        COLOR_LIGHT,
        COLOR_ACCENT,
        COLOR_GOOD,
        COLOR_WARNING,
        COLOR_ATTENTION,
    ]
}

pub fn supported_spacing_values() -> &'static [&'static str] {
    &[
        SPACING_DEFAULT,
        SPACING_NONE,
        SPACING_SMALL,
        SPACING_MEDIUM,
        SPACING_LARGE,
        SPACING_EXTRA_LARGE,
        SPACING_PADDING,
    ]
}

/// Styles accepted by Container, Column, ColumnSet and the Table grid.
pub fn supported_container_style_values() -> &'static [&'static str] {
    &[
        CONTAINER_STYLE_DEFAULT,
        CONTAINER_STYLE_EMPHASIS,
        CONTAINER_STYLE_GOOD,
        CONTAINER_STYLE_ATTENTION,
        CONTAINER_STYLE_WARNING,
        CONTAINER_STYLE_ACCENT,
    ]
}

pub fn supported_text_block_style_values() -> &'static [&'static str] {
    &[TEXT_BLOCK_STYLE_DEFAULT, TEXT_BLOCK_STYLE_HEADING]
}

pub fn supported_horizontal_alignment_values() -> &'static [&'static str] {
    &[
        HORIZONTAL_ALIGNMENT_LEFT,
        HORIZONTAL_ALIGNMENT_CENTER,
        HORIZONTAL_ALIGNMENT_RIGHT,
    ]
}

pub fn supported_vertical_content_alignment_values() -> &'static [&'static str] {
    &[
        VERTICAL_CONTENT_ALIGNMENT_TOP,
        VERTICAL_CONTENT_ALIGNMENT_CENTER,
        VERTICAL_CONTENT_ALIGNMENT_BOTTOM,
    ]
}

pub fn supported_image_size_values() -> &'static [&'static str] {
    &[
        IMAGE_SIZE_AUTO,
        IMAGE_SIZE_STRETCH,
        IMAGE_SIZE_SMALL,
        IMAGE_SIZE_MEDIUM,
        IMAGE_SIZE_LARGE,
    ]
}

pub fn supported_msteams_width_values() -> &'static [&'static str] {
    &[MSTEAMS_WIDTH_FULL]
}

pub fn supported_attachment_layout_values() -> &'static [&'static str] {
    &[ATTACHMENT_LAYOUT_LIST, ATTACHMENT_LAYOUT_CAROUSEL]
}

/// Action types legal in a card's action bar or an ActionSet.
///
/// `Action.Execute` only exists from schema 1.4 onwards.
pub fn supported_action_values(version: f64) -> Vec<&'static str> {
    let mut values = vec![
        TYPE_ACTION_OPEN_URL,
        TYPE_ACTION_SHOW_CARD,
        TYPE_ACTION_SUBMIT,
        TYPE_ACTION_TOGGLE_VISIBILITY,
    ];
    if version >= ACTION_EXECUTE_MIN_CARD_VERSION {
        values.insert(0, TYPE_ACTION_EXECUTE);
    }
    values
}

/// Action types legal as a `selectAction`; `Action.ShowCard` is never allowed.
pub fn supported_select_action_values(version: f64) -> Vec<&'static str> {
    supported_action_values(version)
        .into_iter()
        .filter(|value| *value != TYPE_ACTION_SHOW_CARD)
        .collect()
}

pub fn supported_fallback_values(version: f64) -> Vec<&'static str> {
    let mut values = supported_action_values(version);
    values.push(FALLBACK_OPTION_DROP);
    values
}
