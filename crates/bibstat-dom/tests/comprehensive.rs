//! Comprehensive tests for bibstat-dom
//!
//! Page construction, queries and event delivery through the public API.

use std::cell::RefCell;
use std::rc::Rc;

use bibstat_dom::{Document, EventType, Selector, handler};

fn survey_table(doc: &mut Document, rows: usize) -> Vec<bibstat_dom::NodeId> {
    let root = doc.root();
    let table = doc.append_element(root, "table", &[("class", "table survey_responses")]);
    (0..rows)
        .map(|i| {
            let tr = doc.append_element(table, "tr", &[]);
            let td = doc.append_element(tr, "td", &[]);
            let value = i.to_string();
            doc.append_element(
                td,
                "input",
                &[("type", "checkbox"), ("class", "select-one"), ("value", value.as_str())],
            )
        })
        .collect()
}

#[test]
fn test_nested_rows_found_in_order() {
    let mut doc = Document::new();
    let rows = survey_table(&mut doc, 4);

    assert_eq!(doc.select(".select-one").unwrap(), rows);
    assert_eq!(doc.select("input[type=checkbox]").unwrap(), rows);
    assert_eq!(doc.value(rows[2]), Some("2"));
}

#[test]
fn test_checked_pseudo_tracks_live_state() {
    let mut doc = Document::new();
    let rows = survey_table(&mut doc, 3);
    let checked = Selector::parse(".select-one:checked").unwrap();

    assert!(doc.query_all(&checked).is_empty());
    doc.set_checked(rows[0], true);
    doc.set_checked(rows[2], true);
    assert_eq!(doc.query_all(&checked), vec![rows[0], rows[2]]);
}

#[test]
fn test_class_updates_visible_to_queries() {
    let mut doc = Document::new();
    let root = doc.root();
    let span = doc.append_element(root, "span", &[("class", "selected-single hidden")]);
    let hidden = Selector::class("hidden");

    assert_eq!(doc.query(&hidden), Some(span));
    doc.remove_class(span, "hidden");
    assert_eq!(doc.query(&hidden), None);
    assert_eq!(doc.attr(span, "class"), Some("selected-single hidden"));
}

#[test]
fn test_text_content_of_label() {
    let mut doc = Document::new();
    let root = doc.root();
    let label = doc.append_element(root, "span", &[("class", "selected-count")]);
    doc.append_text(label, "0");

    assert_eq!(doc.text_content(label), "0");
    assert!(doc.set_text_content(label, "12"));
    assert_eq!(doc.text_content(label), "12");
}

#[test]
fn test_user_typing_fires_keyup_per_key() {
    let mut doc = Document::new();
    let root = doc.root();
    let input = doc.append_element(root, "input", &[("name", "visits")]);
    let seen = Rc::new(RefCell::new(Vec::new()));

    let s = Rc::clone(&seen);
    doc.add_listener(
        input,
        EventType::KeyUp,
        handler(move |doc, event| {
            s.borrow_mut().push(doc.value(event.target).unwrap_or_default().to_string());
        }),
    );

    assert!(doc.user_type(input, "123"));
    assert_eq!(*seen.borrow(), vec!["1", "12", "123"]);
}

#[test]
fn test_handler_can_mutate_other_elements() {
    let mut doc = Document::new();
    let root = doc.root();
    let source = doc.append_element(root, "input", &[("type", "checkbox")]);
    let mirror = doc.append_element(root, "input", &[("type", "checkbox")]);

    doc.add_listener(
        source,
        EventType::Change,
        handler(move |doc, event| {
            let checked = doc.is_checked(event.target);
            doc.set_checked(mirror, checked);
        }),
    );

    doc.user_set_checked(source, true);
    assert!(doc.is_checked(mirror));
    doc.user_set_checked(source, false);
    assert!(!doc.is_checked(mirror));
}
