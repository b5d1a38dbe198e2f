//! JSON event scripts for golden-tree tests.
//!
//! A script is a JSON array of event objects, tagged by `"ev"`:
//!
//! ```json
//! [
//!   {"ev": "start", "name": "ul"},
//!   {"ev": "start", "name": "li", "attrs": [["id", "a"]]},
//!   {"ev": "text", "data": "one"},
//!   {"ev": "end", "name": "ul"}
//! ]
//! ```

use dom::{BuildError, Document, ParseEvent, TreeBuilder};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "ev", rename_all = "snake_case")]
pub enum Step {
    Start {
        name: String,
        #[serde(default)]
        attrs: Vec<(String, String)>,
    },
    End {
        name: String,
    },
    Text {
        data: String,
    },
    Comment {
        data: String,
    },
    Doctype {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        public_id: Option<String>,
        #[serde(default)]
        system_id: Option<String>,
    },
}

impl Step {
    pub fn to_event(&self) -> ParseEvent {
        match self {
            Step::Start { name, attrs } => ParseEvent::StartTag {
                name: name.clone(),
                attrs: attrs.clone(),
            },
            Step::End { name } => ParseEvent::EndTag { name: name.clone() },
            Step::Text { data } => ParseEvent::Text(data.clone()),
            Step::Comment { data } => ParseEvent::Comment(data.clone()),
            Step::Doctype {
                name,
                public_id,
                system_id,
            } => ParseEvent::Doctype {
                name: name.clone(),
                public_id: public_id.clone(),
                system_id: system_id.clone(),
            },
        }
    }
}

pub fn parse_script(json: &str) -> Result<Vec<Step>, serde_json::Error> {
    serde_json::from_str(json)
}

pub fn run_script(steps: &[Step]) -> Result<Document, BuildError> {
    let mut builder = TreeBuilder::with_capacity(steps.len() + 1);
    for step in steps {
        builder.apply(&step.to_event())?;
    }
    Ok(builder.finish())
}

/// Parse and run a JSON script in one call; panics on malformed JSON since
/// scripts are test fixtures.
pub fn run_json(json: &str) -> Result<Document, BuildError> {
    let steps = parse_script(json).expect("event script fixture should be valid JSON");
    run_script(&steps)
}
