//! Per-tag-name rules consulted during tree construction.

/// Static per-tag knowledge: void elements, raw-text elements, and which
/// open tags a new start tag implicitly closes.
///
/// Pure lookup over `'static` rule tables; unknown tag names behave as
/// normal elements (non-void, parsed content, close nothing). All lookups
/// expect case-folded names — the builder interns names lowercased before
/// consulting the policy. The tables are configuration data, not logic:
/// [`TagPolicy::from_rules`] accepts any dialect's tables.
#[derive(Clone, Copy, Debug)]
pub struct TagPolicy {
    void: &'static [&'static str],
    raw_text: &'static [&'static str],
    implicit_close: &'static [(&'static str, &'static [&'static str])],
}

/// Tags that never have children or a matching end tag.
const HTML_VOID: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Tags whose content is literal text up to the matching end tag.
const HTML_RAW_TEXT: &[&str] = &["script", "style"];

/// `(incoming tag, open tags it implicitly closes)`.
///
/// Conservative sibling-closing rules: list items, definition pairs, table
/// sections/rows/cells, select options, and the block-level tags that close
/// an open paragraph.
const HTML_IMPLICIT_CLOSE: &[(&str, &[&str])] = &[
    ("address", &["p"]),
    ("article", &["p"]),
    ("aside", &["p"]),
    ("blockquote", &["p"]),
    ("caption", &["caption"]),
    ("colgroup", &["colgroup"]),
    ("dd", &["dd", "dt"]),
    ("div", &["p"]),
    ("dl", &["p"]),
    ("dt", &["dd", "dt"]),
    ("fieldset", &["p"]),
    ("footer", &["p"]),
    ("form", &["p"]),
    ("h1", &["p"]),
    ("h2", &["p"]),
    ("h3", &["p"]),
    ("h4", &["p"]),
    ("h5", &["p"]),
    ("h6", &["p"]),
    ("header", &["p"]),
    ("hr", &["p"]),
    ("li", &["li"]),
    ("main", &["p"]),
    ("nav", &["p"]),
    ("ol", &["p"]),
    ("optgroup", &["optgroup", "option"]),
    ("option", &["option"]),
    ("p", &["p"]),
    ("pre", &["p"]),
    ("section", &["p"]),
    ("table", &["p"]),
    ("tbody", &["tbody", "td", "tfoot", "th", "thead", "tr"]),
    ("td", &["td", "th"]),
    ("tfoot", &["tbody", "td", "tfoot", "th", "thead", "tr"]),
    ("th", &["td", "th"]),
    ("thead", &["tbody", "td", "tfoot", "th", "thead", "tr"]),
    ("tr", &["td", "th", "tr"]),
    ("ul", &["p"]),
];

impl TagPolicy {
    /// The default HTML rule tables.
    pub const fn html() -> Self {
        Self::from_rules(HTML_VOID, HTML_RAW_TEXT, HTML_IMPLICIT_CLOSE)
    }

    /// Build a policy from caller-supplied rule tables.
    pub const fn from_rules(
        void: &'static [&'static str],
        raw_text: &'static [&'static str],
        implicit_close: &'static [(&'static str, &'static [&'static str])],
    ) -> Self {
        Self {
            void,
            raw_text,
            implicit_close,
        }
    }

    /// Whether `name` is a void element (appended, never pushed, no children).
    pub fn is_void(&self, name: &str) -> bool {
        self.void.iter().any(|tag| *tag == name)
    }

    /// Whether `name`'s content is literal text until its matching end tag.
    pub fn is_raw_text(&self, name: &str) -> bool {
        self.raw_text.iter().any(|tag| *tag == name)
    }

    /// Whether opening `incoming` implicitly closes a currently-open `open`.
    pub fn implicitly_closes(&self, incoming: &str, open: &str) -> bool {
        self.implicit_close
            .iter()
            .find(|(tag, _)| *tag == incoming)
            .is_some_and(|(_, closes)| closes.iter().any(|tag| *tag == open))
    }
}

impl Default for TagPolicy {
    fn default() -> Self {
        Self::html()
    }
}
