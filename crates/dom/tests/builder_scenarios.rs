//! Recovery and structure scenarios for the tree builder.

use dom::{NodeKind, ParseEvent, build_document};
use dom_test_support::snapshot::{assert_tree_eq, snapshot_lines};

#[test]
fn new_list_item_implicitly_closes_the_open_one() {
    let doc = build_document(&[
        ParseEvent::start("ul"),
        ParseEvent::start("li"),
        ParseEvent::text("a"),
        ParseEvent::start("li"),
        ParseEvent::text("b"),
        ParseEvent::end("ul"),
    ])
    .expect("build");

    assert_tree_eq(
        &doc,
        &[
            "#document",
            "  <ul>",
            "    <li>",
            "      \"a\"",
            "    <li>",
            "      \"b\"",
        ],
    );
}

#[test]
fn second_paragraph_becomes_a_sibling_not_a_child() {
    let doc = build_document(&[
        ParseEvent::start("p"),
        ParseEvent::start("p"),
        ParseEvent::end("p"),
    ])
    .expect("build");

    assert_tree_eq(&doc, &["#document", "  <p>", "  <p>"]);
}

#[test]
fn block_start_closes_an_open_paragraph() {
    let doc = build_document(&[
        ParseEvent::start("p"),
        ParseEvent::text("intro"),
        ParseEvent::start("div"),
        ParseEvent::text("block"),
    ])
    .expect("build");

    assert_tree_eq(
        &doc,
        &[
            "#document",
            "  <p>",
            "    \"intro\"",
            "  <div>",
            "    \"block\"",
        ],
    );
}

#[test]
fn comment_appends_without_touching_open_elements() {
    let doc = build_document(&[
        ParseEvent::start("div"),
        ParseEvent::Comment("note".to_string()),
        ParseEvent::text("after"),
        ParseEvent::end("div"),
    ])
    .expect("build");

    assert_tree_eq(
        &doc,
        &[
            "#document",
            "  <div>",
            "    <!-- note -->",
            "    \"after\"",
        ],
    );
}

#[test]
fn unmatched_end_tag_is_a_true_no_op() {
    let events = [
        ParseEvent::start("div"),
        ParseEvent::start("span"),
        ParseEvent::text("x"),
    ];
    let mut with_stray = events.to_vec();
    with_stray.insert(2, ParseEvent::end("table"));
    with_stray.push(ParseEvent::end("never-opened"));

    let plain = build_document(&events).expect("build");
    let stray = build_document(&with_stray).expect("build");
    assert_eq!(snapshot_lines(&plain), snapshot_lines(&stray));
}

#[test]
fn end_tag_matching_is_case_insensitive() {
    let doc = build_document(&[
        ParseEvent::start("DIV"),
        ParseEvent::text("x"),
        ParseEvent::end("div"),
        ParseEvent::text("y"),
    ])
    .expect("build");

    assert_tree_eq(&doc, &["#document", "  <div>", "    \"x\"", "  \"y\""]);
}

#[test]
fn void_elements_never_acquire_children() {
    let doc = build_document(&[
        ParseEvent::start("p"),
        ParseEvent::start("br"),
        ParseEvent::text("tail"),
        ParseEvent::start("img"),
        ParseEvent::start("b"),
        ParseEvent::text("bold"),
    ])
    .expect("build");

    assert_tree_eq(
        &doc,
        &[
            "#document",
            "  <p>",
            "    <br>",
            "    \"tail\"",
            "    <img>",
            "    <b>",
            "      \"bold\"",
        ],
    );
}

#[test]
fn adjacent_text_events_coalesce_into_one_node() {
    let doc = build_document(&[
        ParseEvent::start("p"),
        ParseEvent::text("one "),
        ParseEvent::text("two "),
        ParseEvent::text("three"),
    ])
    .expect("build");

    let p = doc.root().first_child().expect("p");
    assert_eq!(p.children().count(), 1);
    assert_eq!(p.first_child().and_then(|node| node.text()), Some("one two three"));
}

#[test]
fn raw_text_content_is_stored_verbatim_as_one_text_child() {
    // The tokenizer delivers script bodies as literal text events; the
    // builder must keep tag-like sequences as character data.
    let doc = build_document(&[
        ParseEvent::start("script"),
        ParseEvent::text("if (a < b) { "),
        ParseEvent::text("document.write(\"<div>\"); }"),
        ParseEvent::end("script"),
    ])
    .expect("build");

    let script = doc.root().first_child().expect("script");
    assert_eq!(script.children().count(), 1);
    let body = script.first_child().expect("body");
    assert_eq!(body.kind(), NodeKind::Text);
    assert_eq!(
        body.text(),
        Some("if (a < b) { document.write(\"<div>\"); }")
    );
}

#[test]
fn end_of_stream_closes_everything_without_error() {
    let doc = build_document(&[
        ParseEvent::start("html"),
        ParseEvent::start("body"),
        ParseEvent::start("div"),
        ParseEvent::text("dangling"),
    ])
    .expect("build");

    assert_tree_eq(
        &doc,
        &[
            "#document",
            "  <html>",
            "    <body>",
            "      <div>",
            "        \"dangling\"",
        ],
    );
    assert_eq!(doc.max_open_depth(), 3);
}

#[test]
fn doctype_before_and_after_root_is_kept_on_the_document() {
    let doc = build_document(&[
        ParseEvent::Doctype {
            name: Some("html".to_string()),
            public_id: None,
            system_id: None,
        },
        ParseEvent::start("html"),
        ParseEvent::end("html"),
        ParseEvent::Doctype {
            name: Some("late".to_string()),
            public_id: Some("pub".to_string()),
            system_id: Some("sys".to_string()),
        },
    ])
    .expect("build");

    assert_tree_eq(
        &doc,
        &[
            "#document",
            "  <!DOCTYPE html>",
            "  <html>",
            "  <!DOCTYPE late PUBLIC \"pub\" SYSTEM \"sys\">",
        ],
    );
}

#[test]
fn text_outside_any_container_attaches_to_the_document() {
    let doc = build_document(&[
        ParseEvent::text("stray"),
        ParseEvent::start("p"),
        ParseEvent::end("p"),
        ParseEvent::text("tail"),
    ])
    .expect("build");

    assert_tree_eq(
        &doc,
        &["#document", "  \"stray\"", "  <p>", "  \"tail\""],
    );
}

#[test]
fn balanced_sequence_round_trips_through_preorder() {
    let events = [
        ParseEvent::start("html"),
        ParseEvent::start("head"),
        ParseEvent::start("title"),
        ParseEvent::text("t"),
        ParseEvent::end("title"),
        ParseEvent::end("head"),
        ParseEvent::start("body"),
        ParseEvent::start("div"),
        ParseEvent::start("span"),
        ParseEvent::text("s"),
        ParseEvent::end("span"),
        ParseEvent::end("div"),
        ParseEvent::end("body"),
        ParseEvent::end("html"),
    ];
    let doc = build_document(&events).expect("build");

    let visited: Vec<String> = doc
        .root()
        .descendants()
        .skip(1)
        .map(|node| match node.kind() {
            NodeKind::Element => node.tag_name().unwrap_or("").to_string(),
            NodeKind::Text => format!("\"{}\"", node.text().unwrap_or("")),
            other => format!("{other:?}"),
        })
        .collect();
    assert_eq!(
        visited,
        [
            "html", "head", "title", "\"t\"", "body", "div", "span", "\"s\""
        ]
    );
}
