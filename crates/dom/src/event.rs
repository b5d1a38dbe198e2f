//! Parse events: the boundary contract with an external tokenizer.

/// A single parse event, in document order.
///
/// Attribute pairs preserve the tokenizer's order; the builder folds names
/// to ASCII lowercase and keeps the first occurrence of a duplicate name.
/// Raw-text content (script/style bodies) arrives as ordinary [`Text`]
/// events that the tokenizer has already kept literal; the builder stores
/// them verbatim.
///
/// [`Text`]: ParseEvent::Text
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseEvent {
    StartTag {
        name: String,
        attrs: Vec<(String, String)>,
    },
    EndTag {
        name: String,
    },
    Text(String),
    Comment(String),
    Doctype {
        name: Option<String>,
        public_id: Option<String>,
        system_id: Option<String>,
    },
}

impl ParseEvent {
    /// Convenience constructor for an attribute-less start tag.
    pub fn start(name: &str) -> Self {
        ParseEvent::StartTag {
            name: name.to_string(),
            attrs: Vec::new(),
        }
    }

    pub fn end(name: &str) -> Self {
        ParseEvent::EndTag {
            name: name.to_string(),
        }
    }

    pub fn text(data: &str) -> Self {
        ParseEvent::Text(data.to_string())
    }
}
