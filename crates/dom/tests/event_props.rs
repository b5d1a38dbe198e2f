//! Property-based structural invariants over random event sequences.

use dom::{NodeKind, ParseEvent, TagPolicy, build_document};
use dom_test_support::snapshot::snapshot_lines;
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

const TAGS: &[&str] = &[
    "div", "p", "ul", "li", "span", "br", "img", "b", "pre", "table", "tr", "td", "script",
];
const TEXTS: &[&str] = &["", " ", "a", "hello", "x y", "<", "&amp;"];
const ATTR_NAMES: &[&str] = &["id", "class", "href", "ID"];

#[derive(Clone, Debug)]
struct EventSoup(Vec<ParseEvent>);

fn pick<'a>(g: &mut Gen, choices: &[&'a str]) -> &'a str {
    g.choose(choices).copied().unwrap_or("div")
}

impl Arbitrary for EventSoup {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 48;
        let mut events = Vec::with_capacity(len);
        for _ in 0..len {
            let event = match u8::arbitrary(g) % 8 {
                0 | 1 | 2 => {
                    let mut attrs = Vec::new();
                    for _ in 0..(usize::arbitrary(g) % 3) {
                        attrs.push((
                            pick(g, ATTR_NAMES).to_string(),
                            pick(g, TEXTS).to_string(),
                        ));
                    }
                    ParseEvent::StartTag {
                        name: pick(g, TAGS).to_string(),
                        attrs,
                    }
                }
                3 | 4 => ParseEvent::EndTag {
                    name: pick(g, TAGS).to_string(),
                },
                5 | 6 => ParseEvent::Text(pick(g, TEXTS).to_string()),
                _ => ParseEvent::Comment(pick(g, TEXTS).to_string()),
            };
            events.push(event);
        }
        EventSoup(events)
    }

    // Shrink by dropping one event at a time; `ParseEvent` itself has no
    // `Arbitrary` impl, so the derived `Vec` shrinker is unavailable.
    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let events = self.0.clone();
        let shorter: Vec<EventSoup> = (0..events.len())
            .map(|skip| {
                let mut rest = events.clone();
                rest.remove(skip);
                EventSoup(rest)
            })
            .collect();
        Box::new(shorter.into_iter())
    }
}

#[quickcheck]
fn every_non_root_node_has_exactly_one_parent(soup: EventSoup) -> bool {
    let doc = match build_document(&soup.0) {
        Ok(doc) => doc,
        Err(_) => return false,
    };
    // Pre-order from the root reaches every stored node exactly once, so
    // the parent/child relation is a tree: acyclic, single-parented.
    let visited = doc.root().descendants().count();
    if visited != doc.node_count() {
        return false;
    }
    doc.root().descendants().all(|node| {
        node.children().all(|child| child.parent() == Some(node))
            && (node == doc.root() || node.parent().is_some())
    })
}

#[quickcheck]
fn adjacent_text_siblings_never_occur(soup: EventSoup) -> bool {
    let Ok(doc) = build_document(&soup.0) else {
        return false;
    };
    doc.root().descendants().all(|node| {
        let kinds: Vec<NodeKind> = node.children().map(|child| child.kind()).collect();
        kinds
            .windows(2)
            .all(|pair| !(pair[0] == NodeKind::Text && pair[1] == NodeKind::Text))
    })
}

#[quickcheck]
fn void_elements_are_always_childless(soup: EventSoup) -> bool {
    let Ok(doc) = build_document(&soup.0) else {
        return false;
    };
    let policy = TagPolicy::html();
    doc.root()
        .descendants()
        .filter(|node| node.kind() == NodeKind::Element)
        .all(|node| {
            let name = node.tag_name().unwrap_or("");
            !policy.is_void(name) || node.children().count() == 0
        })
}

#[quickcheck]
fn trailing_unmatched_end_tag_changes_nothing(soup: EventSoup) -> bool {
    let Ok(plain) = build_document(&soup.0) else {
        return false;
    };
    let mut extended = soup.0.clone();
    // This name is never generated, so the end tag can match nothing open.
    extended.push(ParseEvent::end("never-opened"));
    let Ok(with_stray) = build_document(&extended) else {
        return false;
    };
    snapshot_lines(&plain) == snapshot_lines(&with_stray)
}

#[quickcheck]
fn text_nodes_are_never_empty(soup: EventSoup) -> bool {
    let Ok(doc) = build_document(&soup.0) else {
        return false;
    };
    doc.root()
        .descendants()
        .filter(|node| node.kind() == NodeKind::Text)
        .all(|node| !node.text().unwrap_or("").is_empty())
}
