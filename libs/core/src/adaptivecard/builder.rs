//! Constructors for the common card shapes.
//!
//! Functions that can only produce valid output return plain values; the ones
//! that take caller-provided identities or cards return a [`ValidationResult`].

use super::action::Action;
use super::card::Card;
use super::check::Validate;
use super::element::{Column, Element};
use super::fact::Fact;
use super::mention::Mention;
use super::message::Message;
use super::table::{TableCell, TableRow};
use super::width::ColumnWidth;
use super::*;
use crate::error::ValidationResult;

pub fn new_message() -> Message {
    Message::new()
}

/// A message holding one card with a single wrapped TextBlock.
pub fn new_simple_message(text: &str) -> ValidationResult<Message> {
    new_message_from_card(new_text_block_card(text, ""))
}

pub fn new_message_from_card(card: Card) -> ValidationResult<Message> {
    let mut message = Message::new();
    message.attach(vec![card])?;
    Ok(message)
}

/// Card with the text as a wrapped TextBlock, preceded by a heading when
/// `title` is not empty.
pub fn new_text_block_card(text: &str, title: &str) -> Card {
    let mut card = Card::new();
    if !title.is_empty() {
        card.body.push(new_title_text_block(title, true));
    }
    card.body.push(new_text_block(text, true));
    card
}

/// Card whose only body element mentions `display_name`.
pub fn new_mention_card(display_name: &str, id: &str, text: &str) -> ValidationResult<Card> {
    let mut card = Card::new();
    card.mention(false, display_name, id, text)?;
    Ok(card)
}

pub fn new_mention(display_name: &str, id: &str) -> ValidationResult<Mention> {
    Mention::new(display_name, id)
}

pub fn new_text_block(text: &str, wrap: bool) -> Element {
    Element {
        text: text.to_string(),
        wrap,
        ..Element::of_kind(TYPE_ELEMENT_TEXT_BLOCK)
    }
}

pub fn new_title_text_block(title: &str, wrap: bool) -> Element {
    Element {
        style: TEXT_BLOCK_STYLE_HEADING.to_string(),
        size: SIZE_LARGE.to_string(),
        weight: WEIGHT_BOLDER.to_string(),
        ..new_text_block(title, wrap)
    }
}

pub fn new_fact(title: &str, value: &str) -> Fact {
    Fact::new(title, value)
}

/// Empty FactSet; it only validates once facts are added.
pub fn new_fact_set() -> Element {
    Element::of_kind(TYPE_ELEMENT_FACT_SET)
}

pub fn new_container() -> Element {
    Element::of_kind(TYPE_ELEMENT_CONTAINER)
}

pub fn new_column_set() -> Element {
    Element::of_kind(TYPE_ELEMENT_COLUMN_SET)
}

pub fn new_column() -> Column {
    Column::new()
}

pub fn new_action_open_url(url: &str, title: &str) -> ValidationResult<Action> {
    let action = Action::open_url(url, title);
    action.validate()?;
    Ok(action)
}

pub fn new_action_show_card(card: Card, title: &str) -> ValidationResult<Action> {
    let action = Action::show_card(card, title);
    action.validate()?;
    Ok(action)
}

pub fn new_action_set_from_actions(actions: Vec<Action>) -> ValidationResult<Element> {
    let mut set = Element::of_kind(TYPE_ELEMENT_ACTION_SET);
    set.add_action(actions)?;
    Ok(set)
}

/// Teams CodeBlock. `start_line` of zero leaves the line number unset.
pub fn new_code_block(snippet: &str, language: &str, start_line: u32) -> Element {
    Element {
        code_snippet: snippet.to_string(),
        language: language.to_string(),
        start_line_number: (start_line > 0).then_some(start_line),
        ..Element::of_kind(TYPE_ELEMENT_CODE_BLOCK)
    }
}

/// Table with one TextBlock per cell and one equally weighted column per
/// cell of the widest row. Shorter rows are left as they are.
pub fn new_table<S: AsRef<str>>(rows: &[Vec<S>], first_row_as_headers: bool) -> Element {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    Element {
        columns: (0..width)
            .map(|_| Column::table_definition(ColumnWidth::Weight(1)))
            .collect(),
        rows: rows
            .iter()
            .map(|row| {
                TableRow::new(
                    row.iter()
                        .map(|cell| TableCell::new(vec![new_text_block(cell.as_ref(), true)]))
                        .collect(),
                )
            })
            .collect(),
        first_row_as_headers: Some(first_row_as_headers),
        show_grid_lines: Some(true),
        ..Element::of_kind(TYPE_ELEMENT_TABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn text_block_card_with_and_without_title() {
        let card = new_text_block_card("body", "");
        assert_eq!(card.body.len(), 1);
        assert_eq!(card.version, "1.5");

        let card = new_text_block_card("body", "Heads up");
        assert_eq!(card.body.len(), 2);
        assert_eq!(card.body[0].style, TEXT_BLOCK_STYLE_HEADING);
        assert_eq!(card.body[0].text, "Heads up");
        assert!(card.body[1].wrap);
        card.validate().unwrap();
    }

    #[test]
    fn simple_message_is_valid() {
        let msg = new_simple_message("hello").unwrap();
        msg.validate().unwrap();
        assert_eq!(msg.attachments[0].content.body[0].text, "hello");
    }

    #[test]
    fn mention_card_round_trip() {
        let card = new_mention_card("Ann", "ann@example.com", "ping").unwrap();
        assert_eq!(card.body[0].text, "<at>Ann</at> ping");
        let msg = new_message_from_card(card).unwrap();
        msg.validate().unwrap();

        let err = new_mention_card("", "ann", "ping").expect_err("no name");
        assert_eq!(err.kind(), ErrorKind::MissingValue);
    }

    #[test]
    fn open_url_requires_url() {
        assert!(new_action_open_url("https://example.com", "Open").is_ok());
        let err = new_action_open_url("", "Open").expect_err("empty url");
        assert_eq!(err.kind(), ErrorKind::MissingValue);
    }

    #[test]
    fn action_set_rejects_bad_actions() {
        let err = new_action_set_from_actions(vec![Action::default()]).expect_err("untyped");
        assert_eq!(err.kind(), ErrorKind::InvalidType);

        let set = new_action_set_from_actions(vec![Action::open_url("https://a.b", "A")]).unwrap();
        set.validate().unwrap();
    }

    #[test]
    fn code_block_shape() {
        let block = new_code_block("fn main() {}", "Rust", 1);
        assert_eq!(
            serde_json::to_value(&block).unwrap(),
            json!({
                "type": "CodeBlock",
                "codeSnippet": "fn main() {}",
                "language": "Rust",
                "startLineNumber": 1
            })
        );
        assert!(new_code_block("x", "", 0).start_line_number.is_none());
    }

    #[test]
    fn table_has_one_column_per_widest_row_cell() {
        let table = new_table(&[vec!["a", "b", "c"], vec!["d"]], true);
        assert_eq!(table.columns.len(), 3);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].cells.len(), 1);
        assert_eq!(table.first_row_as_headers, Some(true));
        table.validate().unwrap();
    }

    #[test]
    fn fact_set_needs_facts() {
        let mut facts = new_fact_set();
        assert!(facts.validate().is_err());
        facts.add_fact([new_fact("k", "v")]).unwrap();
        facts.validate().unwrap();
    }
}
