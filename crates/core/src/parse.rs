//! HTML parsing and DOM navigation.
//!
//! This module provides the [`Document`] and [`Element`] types for parsing
//! HTML and navigating the DOM tree using CSS selectors. Parsing is lenient:
//! unclosed tags and other malformed markup are repaired by the parser and
//! never produce an error.
//!
//! # Example
//!
//! ```rust
//! use wikitable_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <h2>Volcanoes</h2>
//!             <table class="wikitable"><tr><th>Name</th></tr></table>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! let tables = doc.select("table.wikitable").unwrap();
//! assert_eq!(tables.len(), 1);
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::{Result, WikitableError};

/// Represents a parsed HTML document.
///
/// A Document wraps an HTML page and provides methods for querying elements
/// using CSS selectors.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// # Example
    ///
    /// ```rust
    /// use wikitable_core::parse::Document;
    ///
    /// let html = "<html><body><table><tr><td>1</td></tr></table></body></html>";
    /// let doc = Document::parse(html).unwrap();
    /// ```
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html })
    }

    /// Gets the root `<html>` element.
    pub fn root(&self) -> Element<'_> {
        Element { element: self.html.root_element() }
    }

    /// Selects elements using a CSS selector, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`WikitableError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use wikitable_core::parse::Document;
    ///
    /// let html = r#"<h2>First</h2><h2>Second</h2>"#;
    /// let doc = Document::parse(html).unwrap();
    /// let headings = doc.select("h2").unwrap();
    /// assert_eq!(headings.len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }
}

/// A wrapper around scraper's ElementRef for easier DOM navigation.
///
/// Element is `Copy`: it is a cheap handle into the owning [`Document`], so
/// the same cell can be referenced from several grid positions.
///
/// # Example
///
/// ```rust
/// use wikitable_core::parse::Document;
///
/// let html = r#"<table><tr><td colspan="2">Wide</td></tr></table>"#;
/// let doc = Document::parse(html).unwrap();
/// let cell = doc.select("td").unwrap()[0];
///
/// assert_eq!(cell.tag_name(), "td");
/// assert_eq!(cell.attr("colspan"), Some("2"));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the value of an attribute.
    ///
    /// Returns `None` if the attribute is not present.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Gets the tag name of this element.
    ///
    /// Returns the lowercase tag name (e.g., "table", "td", "h2").
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Whether the element carries the given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.element.value().classes().any(|c| c == class)
    }

    /// Iterates over the direct child elements, skipping text and comments.
    pub fn child_elements(&self) -> impl Iterator<Item = Element<'a>> + use<'a> {
        self.element
            .children()
            .filter_map(ElementRef::wrap)
            .map(|element| Element { element })
    }

    /// Iterates over this element and all descendant elements in document order.
    pub fn descendant_elements(&self) -> impl Iterator<Item = Element<'a>> + use<'a> {
        self.element
            .descendants()
            .filter_map(ElementRef::wrap)
            .map(|element| Element { element })
    }

    /// Gets the underlying scraper handle.
    pub fn element_ref(&self) -> ElementRef<'a> {
        self.element
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| WikitableError::HtmlParseError(format!("Invalid selector: {}", e)))
}
