//! Text normalization shared by the table locator and the grid reconstructor.
//!
//! Wikipedia cells carry decoration that is meaningless in a CSV field:
//! footnote callouts, hidden sort keys, `[edit]` links and line breaks.
//! [`clean_cell`] reduces a cell (or a heading/caption) to a single line of
//! text with that decoration removed.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Node};
use scraper::node::Element as NodeElement;

use crate::parse::Element;

/// Elements removed with their whole subtree before text is extracted,
/// as `(tag, class)` pairs.
const DECORATIONS: [(&str, &str); 4] = [
    // Tooltip references with mouse-over effects
    ("sup", "reference"),
    // Hidden keys for table sorting
    ("sup", "sortkey"),
    ("span", "sortkey"),
    // `[edit]` buttons next to section headings
    ("span", "mw-editsection"),
];

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]").expect("valid search key regex"));

/// Text nodes and surviving elements of a cell, in document order.
#[derive(Default)]
struct CellParts<'a> {
    text: String,
    elements: Vec<&'a NodeElement>,
}

/// Returns the cleaned text value of a cell, caption or heading.
///
/// Decoration subtrees are dropped, `<br>` becomes `line_break`, text nodes
/// starting with `[` (footnote callouts such as `[1]`) are skipped, and the
/// remainder is whitespace-collapsed. A cell whose only element is an `<img>`
/// yields the image's alt text instead.
///
/// # Example
///
/// ```rust
/// use wikitable_core::parse::Document;
/// use wikitable_core::text::clean_cell;
///
/// let doc = Document::parse(r#"<table><tr><td>Mt. Fuji<sup class="reference">[1]</sup></td></tr></table>"#).unwrap();
/// let cell = doc.select("td").unwrap()[0];
/// assert_eq!(clean_cell(&cell, " "), "Mt. Fuji");
/// ```
pub fn clean_cell(cell: &Element<'_>, line_break: &str) -> String {
    let mut parts = CellParts::default();
    collect(cell.element_ref(), line_break, &mut parts);

    if let [only] = parts.elements.as_slice()
        && only.name() == "img"
    {
        return spaces_only(only.attr("alt").unwrap_or_default());
    }

    spaces_only(&parts.text)
}

fn collect<'a>(element: ElementRef<'a>, line_break: &str, parts: &mut CellParts<'a>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                if !text.starts_with('[') {
                    parts.text.push_str(text);
                }
            }
            Node::Element(node) => {
                if is_decoration(node) {
                    continue;
                }

                parts.elements.push(node);
                if node.name() == "br" {
                    parts.text.push_str(line_break);
                } else if let Some(nested) = ElementRef::wrap(child) {
                    collect(nested, line_break, parts);
                }
            }
            _ => {}
        }
    }
}

fn is_decoration(element: &NodeElement) -> bool {
    DECORATIONS
        .iter()
        .any(|(tag, class)| element.name() == *tag && element.classes().any(|c| c == *class))
}

/// Returns text with every whitespace run reduced to one space, trimmed.
///
/// Non-breaking spaces and newlines count as whitespace.
pub fn spaces_only(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Returns the key used to compare a table title with a search string:
/// lowercase ASCII letters and digits only.
pub fn search_key(text: &str) -> String {
    NON_ALPHANUMERIC.replace_all(&text.to_lowercase(), "").into_owned()
}
