// Title tag handling: due date tags and context/project tags

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// `due:<value>` with its optional leading space
static DUE_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s?due:([A-Za-z0-9-]+)").expect("valid due tag regex"));

/// Context (`@home`) and project (`+garden`) tags
static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\s?)([@+][\w-]+)").expect("valid tag regex"));

/// Strip the first `due:<value>` tag from a title.
///
/// Returns the remaining title and the tag value. The tag is removed together
/// with its leading space; nothing else in the title is touched.
pub fn extract_due_tag(text: &str) -> (String, Option<String>) {
    match DUE_TAG_RE.captures(text) {
        Some(caps) => {
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            let value = caps.get(1).map(|m| m.as_str().to_string());
            let mut title = String::with_capacity(text.len());
            title.push_str(&text[..whole.start]);
            title.push_str(&text[whole.end..]);
            (title, value)
        }
        None => (text.to_string(), None),
    }
}

/// Rewrite every tag token with `paint`, keeping surrounding whitespace as is
pub fn highlight_tags<F>(title: &str, paint: F) -> String
where
    F: Fn(&str) -> String,
{
    TAG_RE
        .replace_all(title, |caps: &Captures| format!("{}{}", &caps[1], paint(&caps[2])))
        .into_owned()
}
