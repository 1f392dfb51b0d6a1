use serde::{Deserialize, Serialize};

use super::action::{Action, SelectAction};
use super::check::{Validate, check_optional_in, require_items, require_type, require_value};
use super::fact::Fact;
use super::mention::Mention;
use super::table::TableRow;
use super::values::*;
use super::width::ColumnWidth;
use super::*;
use crate::error::{ValidationError, ValidationResult};

/// One building block of a card body.
///
/// The struct carries the union of the fields used by every element kind;
/// `kind` decides which of them are required and validated. Unset fields are
/// left out of the serialized payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Required by TextBlock and TextRun.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Required by Image.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub alt_text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub size: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub weight: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub color: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub spacing: String,
    /// Text style for TextBlock, container style for everything else.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub style: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub horizontal_alignment: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_subtle: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_lines: Option<u32>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub wrap: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub separator: bool,
    /// Children of a Container.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Element>,
    /// Columns of a ColumnSet, or column definitions of a Table.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<Column>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<TableRow>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub grid_style: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_grid_lines: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_row_as_headers: Option<bool>,
    /// Buttons of an ActionSet.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub facts: Vec<Fact>,
    /// Image elements of an ImageSet.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<Element>,
    /// TextRun elements of a RichTextBlock.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inlines: Vec<Element>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<MediaSource>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub poster: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub code_snippet: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_line_number: Option<u32>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub placeholder: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select_action: Option<SelectAction>,
}

impl Element {
    /// Empty element of the given kind.
    pub fn of_kind(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            ..Default::default()
        }
    }

    fn is_input(&self) -> bool {
        self.kind.starts_with("Input.")
    }

    /// Whether this node's own text carries the mention token.
    ///
    /// Only TextBlock text and FactSet titles/values count; children are not
    /// inspected, see [`Element::contains_mention_text`] for that.
    pub fn has_mention_text(&self, mention: &Mention) -> bool {
        if mention.text.is_empty() {
            return false;
        }
        match self.kind.as_str() {
            TYPE_ELEMENT_TEXT_BLOCK => self.text.contains(&mention.text),
            TYPE_ELEMENT_FACT_SET => self.facts.iter().any(|fact| fact.contains(&mention.text)),
            _ => false,
        }
    }

    /// Depth-first search of this element and its Container, ColumnSet and
    /// Table descendants for the mention token.
    pub fn contains_mention_text(&self, mention: &Mention) -> bool {
        if self.has_mention_text(mention) {
            return true;
        }
        self.items
            .iter()
            .chain(self.columns.iter().flat_map(|column| column.items.iter()))
            .chain(
                self.rows
                    .iter()
                    .flat_map(|row| row.cells.iter())
                    .flat_map(|cell| cell.items.iter()),
            )
            .any(|child| child.contains_mention_text(mention))
    }

    /// Appends facts to a FactSet. Nothing is added if any fact is invalid.
    pub fn add_fact(&mut self, facts: impl IntoIterator<Item = Fact>) -> ValidationResult {
        require_type(&self.kind, TYPE_ELEMENT_FACT_SET, "element")?;
        let facts: Vec<Fact> = facts.into_iter().collect();
        facts.validate()?;
        self.facts.extend(facts);
        Ok(())
    }

    /// Adds child elements to a Container at the front or back.
    pub fn add_item(&mut self, prepend: bool, items: Vec<Element>) -> ValidationResult {
        require_type(&self.kind, TYPE_ELEMENT_CONTAINER, "element")?;
        items.validate()?;
        if prepend {
            self.items.splice(0..0, items);
        } else {
            self.items.extend(items);
        }
        Ok(())
    }

    pub fn add_column(&mut self, column: Column) -> ValidationResult {
        require_type(&self.kind, TYPE_ELEMENT_COLUMN_SET, "element")?;
        column.validate()?;
        self.columns.push(column);
        Ok(())
    }

    pub fn add_action(&mut self, actions: Vec<Action>) -> ValidationResult {
        require_type(&self.kind, TYPE_ELEMENT_ACTION_SET, "element")?;
        actions.validate()?;
        self.actions.extend(actions);
        Ok(())
    }

    fn check_kind(&self) -> ValidationResult {
        if supported_element_types().contains(&self.kind.as_str()) {
            Ok(())
        } else {
            Err(ValidationError::InvalidType(format!(
                "invalid element type {:?}; expected one of {:?}",
                self.kind,
                supported_element_types()
            )))
        }
    }

    fn check_required(&self) -> ValidationResult {
        let kind = self.kind.as_str();
        match kind {
            TYPE_ELEMENT_TEXT_BLOCK | TYPE_ELEMENT_TEXT_RUN => require_value(&self.text, "Text", kind),
            TYPE_ELEMENT_IMAGE => require_value(&self.url, "URL", kind),
            TYPE_ELEMENT_CODE_BLOCK => require_value(&self.code_snippet, "CodeSnippet", kind),
            TYPE_ELEMENT_CONTAINER => require_items(&self.items, "Items", kind),
            TYPE_ELEMENT_ACTION_SET => require_items(&self.actions, "Actions", kind),
            TYPE_ELEMENT_FACT_SET => require_items(&self.facts, "Facts", kind),
            TYPE_ELEMENT_IMAGE_SET => require_items(&self.images, "Images", kind),
            TYPE_ELEMENT_MEDIA => require_items(&self.sources, "Sources", kind),
            TYPE_ELEMENT_RICH_TEXT_BLOCK => require_items(&self.inlines, "Inlines", kind),
            _ if self.is_input() => require_value(&self.id, "ID", kind),
            _ => Ok(()),
        }
    }

    fn check_optional(&self) -> ValidationResult {
        let kind = self.kind.as_str();
        let sizes = if kind == TYPE_ELEMENT_IMAGE {
            supported_image_size_values()
        } else {
            supported_size_values()
        };
        let styles = if kind == TYPE_ELEMENT_TEXT_BLOCK {
            supported_text_block_style_values()
        } else {
            supported_container_style_values()
        };

        check_optional_in(&self.size, "Size", kind, sizes)?;
        check_optional_in(&self.weight, "Weight", kind, supported_weight_values())?;
        check_optional_in(&self.color, "Color", kind, supported_color_values())?;
        check_optional_in(&self.spacing, "Spacing", kind, supported_spacing_values())?;
        check_optional_in(&self.style, "Style", kind, styles)?;
        check_optional_in(
            &self.horizontal_alignment,
            "HorizontalAlignment",
            kind,
            supported_horizontal_alignment_values(),
        )?;
        check_optional_in(
            &self.grid_style,
            "GridStyle",
            kind,
            supported_container_style_values(),
        )
    }

    fn check_children(&self) -> ValidationResult {
        self.items.validate()?;

        if self.kind == TYPE_ELEMENT_TABLE {
            for column in &self.columns {
                column.validate_table_definition()?;
            }
        } else {
            self.columns.validate()?;
        }
        self.rows.validate()?;

        self.actions.validate()?;
        self.facts.validate()?;

        for image in &self.images {
            require_type(&image.kind, TYPE_ELEMENT_IMAGE, "ImageSet image")?;
            image.validate()?;
        }
        for inline in &self.inlines {
            require_type(&inline.kind, TYPE_ELEMENT_TEXT_RUN, "RichTextBlock inline")?;
            inline.validate()?;
        }

        self.sources.validate()?;
        self.select_action.validate()
    }
}

impl Validate for Element {
    fn validate(&self) -> ValidationResult {
        self.check_kind()?;
        self.check_required()?;
        self.check_optional()?;
        self.check_children()
    }
}

/// A column of a ColumnSet, or a column definition of a Table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<ColumnWidth>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Element>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub style: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vertical_content_alignment: String,
    /// `Action.ShowCard` is not allowed here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select_action: Option<SelectAction>,
}

impl Column {
    pub fn new() -> Self {
        Self {
            kind: TYPE_COLUMN.to_string(),
            ..Default::default()
        }
    }

    pub fn with_width(mut self, width: ColumnWidth) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_items(mut self, items: Vec<Element>) -> Self {
        self.items = items;
        self
    }

    /// Column definition used by Table; only the width matters.
    pub fn table_definition(width: ColumnWidth) -> Self {
        Self {
            kind: TYPE_TABLE_COLUMN_DEFINITION.to_string(),
            width: Some(width),
            ..Default::default()
        }
    }

    pub(crate) fn validate_table_definition(&self) -> ValidationResult {
        if !self.kind.is_empty() {
            require_type(&self.kind, TYPE_TABLE_COLUMN_DEFINITION, "table column")?;
        }
        self.width.as_ref().map_or(Ok(()), ColumnWidth::validate)
    }
}

impl Validate for Column {
    fn validate(&self) -> ValidationResult {
        require_type(&self.kind, TYPE_COLUMN, "column")?;
        if let Some(width) = &self.width {
            width.validate()?;
        }
        check_optional_in(
            &self.style,
            "Style",
            TYPE_COLUMN,
            supported_container_style_values(),
        )?;
        check_optional_in(
            &self.vertical_content_alignment,
            "VerticalContentAlignment",
            TYPE_COLUMN,
            supported_vertical_content_alignment_values(),
        )?;
        self.items.validate()?;
        self.select_action.validate()
    }
}

/// A playable source of a Media element.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSource {
    pub mime_type: String,
    pub url: String,
}

impl Validate for MediaSource {
    fn validate(&self) -> ValidationResult {
        require_value(&self.mime_type, "MimeType", "MediaSource")?;
        require_value(&self.url, "URL", "MediaSource")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adaptivecard::{TableCell, new_fact_set, new_table, new_text_block};
    use crate::error::ErrorKind;
    use serde_json::json;

    fn mention(name: &str) -> Mention {
        Mention::new(name, "id-1").unwrap()
    }

    #[test]
    fn whitespace_only_size_is_rejected() {
        let mut block = new_text_block("x", true);
        block.size = "   ".into();
        assert_eq!(
            block.validate().unwrap_err().kind(),
            ErrorKind::InvalidFieldValue
        );
    }

    #[test]
    fn unknown_type_fails_first() {
        let mut element = Element::of_kind("Carousel");
        element.size = "gigantic".into();
        let err = element.validate().expect_err("unknown type");
        assert_eq!(err.kind(), ErrorKind::InvalidType);
    }

    #[test]
    fn required_fields_per_kind() {
        let cases = [
            (TYPE_ELEMENT_IMAGE, "URL"),
            (TYPE_ELEMENT_CONTAINER, "Items"),
            (TYPE_ELEMENT_ACTION_SET, "Actions"),
            (TYPE_ELEMENT_FACT_SET, "Facts"),
            (TYPE_ELEMENT_TEXT_BLOCK, "Text"),
            (TYPE_ELEMENT_CODE_BLOCK, "CodeSnippet"),
            (TYPE_ELEMENT_INPUT_TEXT, "ID"),
        ];
        for (kind, field) in cases {
            let err = Element::of_kind(kind).validate().expect_err(kind);
            assert_eq!(err.kind(), ErrorKind::MissingValue, "{kind}");
            assert!(err.detail().contains(field), "{kind}: {}", err.detail());
        }
    }

    #[test]
    fn column_set_without_columns_is_fine() {
        Element::of_kind(TYPE_ELEMENT_COLUMN_SET).validate().unwrap();
    }

    #[test]
    fn optional_fields_checked_independently() {
        let mut block = new_text_block("hello", true);
        block.weight = "heavy".into();
        let err = block.validate().expect_err("bad weight");
        assert_eq!(err.kind(), ErrorKind::InvalidFieldValue);
        assert!(err.detail().contains("Weight"));

        let mut block = new_text_block("hello", true);
        block.style = TEXT_BLOCK_STYLE_HEADING.into();
        block.validate().unwrap();

        let mut container = Element::of_kind(TYPE_ELEMENT_CONTAINER);
        container.items.push(new_text_block("x", false));
        container.style = TEXT_BLOCK_STYLE_HEADING.into();
        assert!(container.validate().is_err());
        container.style = CONTAINER_STYLE_EMPHASIS.into();
        container.validate().unwrap();
    }

    #[test]
    fn fact_set_reports_first_bad_fact() {
        let mut facts = new_fact_set();
        facts.facts = vec![
            Fact::new("a", "1"),
            Fact::new("", "2"),
            Fact::new("c", ""),
        ];
        let err = facts.validate().expect_err("bad fact");
        assert_eq!(err, Fact::new("", "2").validate().unwrap_err());
    }

    #[test]
    fn nested_failures_propagate_verbatim() {
        let mut bad = new_text_block("x", false);
        bad.color = "purple".into();
        let expected = bad.validate().unwrap_err();

        let mut container = Element::of_kind(TYPE_ELEMENT_CONTAINER);
        container.items = vec![new_text_block("ok", false), bad];
        assert_eq!(container.validate().unwrap_err(), expected);
    }

    #[test]
    fn column_set_checks_column_type_and_width() {
        let mut set = Element::of_kind(TYPE_ELEMENT_COLUMN_SET);
        set.columns.push(Column::new().with_width(ColumnWidth::Weight(2)));
        set.validate().unwrap();

        set.columns.push(Column::new().with_width(ColumnWidth::Pixels("wide".into())));
        assert_eq!(
            set.validate().unwrap_err().kind(),
            ErrorKind::InvalidFieldValue
        );

        let mut untyped = Element::of_kind(TYPE_ELEMENT_COLUMN_SET);
        untyped.columns.push(Column::default());
        assert_eq!(
            untyped.validate().unwrap_err().kind(),
            ErrorKind::InvalidType
        );
    }

    #[test]
    fn table_accepts_untyped_column_definitions() {
        let mut table = new_table(&[vec!["a", "b"]], true);
        table.columns[0].kind.clear();
        table.validate().unwrap();

        table.rows[0].cells.push(TableCell::default());
        assert!(table.validate().is_err());
    }

    #[test]
    fn image_set_only_holds_images() {
        let mut set = Element::of_kind(TYPE_ELEMENT_IMAGE_SET);
        set.images.push(new_text_block("not an image", false));
        assert_eq!(set.validate().unwrap_err().kind(), ErrorKind::InvalidType);

        let mut image = Element::of_kind(TYPE_ELEMENT_IMAGE);
        image.url = "https://example.com/a.png".into();
        image.size = IMAGE_SIZE_STRETCH.into();
        set.images = vec![image];
        set.validate().unwrap();
    }

    #[test]
    fn has_mention_text_looks_at_own_fields_only() {
        let bob = mention("Bob");
        assert!(new_text_block("<at>Bob</at> hi", true).has_mention_text(&bob));
        assert!(!new_text_block("Bob hi", true).has_mention_text(&bob));

        let mut facts = new_fact_set();
        facts.facts.push(Fact::new("Owner", "<at>Bob</at>"));
        assert!(facts.has_mention_text(&bob));

        let mut container = Element::of_kind(TYPE_ELEMENT_CONTAINER);
        container.items.push(new_text_block("<at>Bob</at>", true));
        assert!(!container.has_mention_text(&bob));
        assert!(container.contains_mention_text(&bob));
    }

    #[test]
    fn contains_mention_text_descends_into_columns_and_tables() {
        let bob = mention("Bob");
        let mut set = Element::of_kind(TYPE_ELEMENT_COLUMN_SET);
        set.columns
            .push(Column::new().with_items(vec![new_text_block("hey <at>Bob</at>", true)]));
        assert!(set.contains_mention_text(&bob));

        let table = new_table(&[vec!["x", "<at>Bob</at>"]], false);
        assert!(table.contains_mention_text(&bob));
        assert!(!table.contains_mention_text(&mention("Alice")));
    }

    #[test]
    fn add_fact_is_all_or_nothing() {
        let mut facts = new_fact_set();
        let err = facts
            .add_fact([Fact::new("a", "1"), Fact::new("b", "")])
            .expect_err("second fact invalid");
        assert_eq!(err.kind(), ErrorKind::MissingValue);
        assert!(facts.facts.is_empty());

        facts.add_fact([Fact::new("a", "1")]).unwrap();
        assert_eq!(facts.facts.len(), 1);

        let mut block = new_text_block("x", false);
        assert_eq!(
            block.add_fact([Fact::new("a", "1")]).unwrap_err().kind(),
            ErrorKind::InvalidType
        );
    }

    #[test]
    fn add_item_honours_prepend() {
        let mut container = Element::of_kind(TYPE_ELEMENT_CONTAINER);
        container.add_item(false, vec![new_text_block("second", false)]).unwrap();
        container.add_item(true, vec![new_text_block("first", false)]).unwrap();
        assert_eq!(container.items[0].text, "first");
        assert_eq!(container.items[1].text, "second");

        assert!(container
            .add_item(false, vec![Element::of_kind(TYPE_ELEMENT_IMAGE)])
            .is_err());
        assert_eq!(container.items.len(), 2);
    }

    #[test]
    fn serializes_only_populated_fields() {
        let mut block = new_text_block("hello", true);
        block.max_lines = Some(2);
        assert_eq!(
            serde_json::to_value(&block).unwrap(),
            json!({ "type": "TextBlock", "text": "hello", "wrap": true, "maxLines": 2 })
        );
    }
}
