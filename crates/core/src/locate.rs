//! Finding data tables in a document and naming them.
//!
//! A `<table>` qualifies when it holds at least two `<tr>` rows of its own (a
//! header and one data row); rows of tables nested in its cells do not count. Its title comes from its `<caption>` when there is one,
//! otherwise from the nearest `<h2>` before it, suffixed with the nearest
//! `<h3>` between that heading and the table. Headings are never taken from
//! before an earlier table.

use tracing::debug;

use crate::config::ScrapeConfig;
use crate::grid::table_rows;
use crate::parse::{Document, Element};
use crate::text::clean_cell;

/// A `<table>` selected for reconstruction, with its position and title.
#[derive(Debug, Clone)]
pub struct HtmlTable<'a> {
    element: Element<'a>,
    index: usize,
    title: Option<String>,
    line_break: String,
}

impl<'a> HtmlTable<'a> {
    pub(crate) fn new(element: Element<'a>, index: usize, title: Option<String>, line_break: &str) -> Self {
        Self { element, index, title, line_break: line_break.to_string() }
    }

    /// The underlying `<table>` element.
    pub fn element(&self) -> Element<'a> {
        self.element
    }

    /// 1-based position among the located tables of the document.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The resolved title, if the table has a caption or a preceding `<h2>`.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The title, or `table_<index>` when the table has none.
    pub fn name(&self) -> String {
        self.title.clone().unwrap_or_else(|| format!("table_{}", self.index))
    }

    pub(crate) fn line_break(&self) -> &str {
        &self.line_break
    }
}

/// Headings seen since the last table boundary.
#[derive(Default)]
struct Headings<'a> {
    h2: Option<Element<'a>>,
    h3: Option<Element<'a>>,
}

/// Returns every data table in `doc`, in document order, with its title.
///
/// # Example
///
/// ```rust
/// use wikitable_core::ScrapeConfig;
/// use wikitable_core::locate::locate_tables;
/// use wikitable_core::parse::Document;
///
/// let html = r#"
///     <h2>Volcanoes</h2><h3>6000 metres</h3>
///     <table><tr><th>Name</th></tr><tr><td>Ojos del Salado</td></tr></table>
///     <table><tr><th>Header only</th></tr></table>
/// "#;
/// let doc = Document::parse(html).unwrap();
/// let tables = locate_tables(&doc, &ScrapeConfig::default());
///
/// assert_eq!(tables.len(), 1);
/// assert_eq!(tables[0].title(), Some("Volcanoes - 6000 metres"));
/// ```
pub fn locate_tables<'a>(doc: &'a Document, config: &ScrapeConfig) -> Vec<HtmlTable<'a>> {
    let mut tables = Vec::new();
    let mut headings = Headings::default();

    for element in doc.root().descendant_elements() {
        match element.tag_name().as_str() {
            "h2" => headings = Headings { h2: Some(element), h3: None },
            "h3" => headings.h3 = Some(element),
            "table" => {
                let preceding = std::mem::take(&mut headings);
                let rows = table_rows(&element).len();
                if rows <= 1 {
                    debug!(rows, "Skipping table without data rows");
                    continue;
                }

                let title = resolve_title(&element, &preceding, &config.line_break);
                debug!(index = tables.len() + 1, rows, title = ?title, "Located table");
                tables.push(HtmlTable::new(element, tables.len() + 1, title, &config.line_break));
            }
            _ => {}
        }
    }

    tables
}

fn resolve_title(table: &Element<'_>, headings: &Headings<'_>, line_break: &str) -> Option<String> {
    if let Some(caption) = table.child_elements().find(|el| el.tag_name() == "caption") {
        let caption = clean_cell(&caption, line_break);
        if !caption.is_empty() {
            return Some(caption);
        }
    }

    let h2 = headings.h2.map(|h| clean_cell(&h, line_break)).filter(|h| !h.is_empty())?;

    let title = match headings.h3.map(|h| clean_cell(&h, line_break)).filter(|h| !h.is_empty()) {
        Some(h3) => format!("{} - {}", h2, h3),
        None => h2,
    };
    Some(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(html: &str) -> Vec<Option<String>> {
        let doc = Document::parse(html).unwrap();
        locate_tables(&doc, &ScrapeConfig::default())
            .iter()
            .map(|t| t.title().map(str::to_string))
            .collect()
    }

    const TWO_ROWS: &str = "<tr><th>A</th></tr><tr><td>1</td></tr>";

    #[test]
    fn test_tables_need_more_than_one_row() {
        let html = format!(
            "<table></table><table><tr><td>x</td></tr></table><table>{}</table><table>{}<tr><td>2</td></tr></table>",
            TWO_ROWS, TWO_ROWS
        );
        let doc = Document::parse(&html).unwrap();
        let tables = locate_tables(&doc, &ScrapeConfig::default());

        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].index(), 1);
        assert_eq!(tables[1].index(), 2);
    }

    #[test]
    fn test_caption_wins_over_headings() {
        let html = format!(
            "<h2>Volcanoes</h2><h3>6000 metres</h3><table><caption>Highest volcanoes<sup class=\"reference\">[1]</sup></caption>{}</table>",
            TWO_ROWS
        );
        assert_eq!(titles(&html), vec![Some("Highest volcanoes".to_string())]);
    }

    #[test]
    fn test_h2_and_h3_title() {
        let html = format!("<h2>Volcanoes</h2><h3>6000 metres</h3><table>{}</table>", TWO_ROWS);
        assert_eq!(titles(&html), vec![Some("Volcanoes - 6000 metres".to_string())]);
    }

    #[test]
    fn test_nearest_headings_are_used() {
        let html = format!(
            "<h2>Mountains</h2><h3>Asia</h3><h2>Volcanoes</h2><p>intro</p><table>{}</table>",
            TWO_ROWS
        );
        assert_eq!(titles(&html), vec![Some("Volcanoes".to_string())]);

        let html = format!(
            "<h2>Volcanoes</h2><h3>5000 metres</h3><h3>6000 metres</h3><table>{}</table>",
            TWO_ROWS
        );
        assert_eq!(titles(&html), vec![Some("Volcanoes - 6000 metres".to_string())]);
    }

    #[test]
    fn test_h3_without_h2_gives_no_title() {
        let html = format!("<h3>Orphan</h3><table>{}</table>", TWO_ROWS);
        assert_eq!(titles(&html), vec![None]);
    }

    #[test]
    fn test_headings_do_not_cross_tables() {
        let html = format!(
            "<h2>Volcanoes</h2><table>{}</table><table>{}</table><h2>Lakes</h2><table>{}</table>",
            TWO_ROWS, TWO_ROWS, TWO_ROWS
        );
        assert_eq!(
            titles(&html),
            vec![Some("Volcanoes".to_string()), None, Some("Lakes".to_string())]
        );
    }

    #[test]
    fn test_skipped_tables_still_bound_headings() {
        let html = format!(
            "<h2>Volcanoes</h2><table><tr><td>navbox</td></tr></table><table>{}</table>",
            TWO_ROWS
        );
        assert_eq!(titles(&html), vec![None]);
    }

    #[test]
    fn test_heading_edit_links_are_stripped() {
        let html = format!(
            "<div class=\"mw-heading\"><h2 id=\"Peaks\">Peaks</h2><span class=\"mw-editsection\">[<a>edit</a>]</span></div>\
             <h3>By height<span class=\"mw-editsection\">[edit]</span></h3><table>{}</table>",
            TWO_ROWS
        );
        assert_eq!(titles(&html), vec![Some("Peaks - By height".to_string())]);
    }

    #[test]
    fn test_empty_caption_falls_back_to_heading() {
        let html = format!("<h2>Rivers</h2><table><caption> </caption>{}</table>", TWO_ROWS);
        assert_eq!(titles(&html), vec![Some("Rivers".to_string())]);
    }

    #[test]
    fn test_new_h3_after_table_is_not_enough() {
        let html = format!(
            "<h2>Volcanoes</h2><h3>6000 metres</h3><table>{}</table><h3>5000 metres</h3><table>{}</table>",
            TWO_ROWS, TWO_ROWS
        );
        assert_eq!(titles(&html), vec![Some("Volcanoes - 6000 metres".to_string()), None]);
    }

    #[test]
    fn test_nested_table_rows_do_not_qualify_outer_table() {
        let html = "<h2>Layout</h2><table><tr><td><table><caption>Inner</caption>\
                    <tr><td>a</td></tr><tr><td>b</td></tr></table></td></tr></table>";
        let doc = Document::parse(html).unwrap();
        let tables = locate_tables(&doc, &ScrapeConfig::default());

        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].title(), Some("Inner"));
        assert_eq!(table_rows(&tables[0].element()).len(), 2);
    }

    #[test]
    fn test_nested_caption_does_not_title_outer_table() {
        let html = "<h2>Volcanoes</h2><table><tr><th>A</th></tr><tr><td>\
                    <table><caption>Inner</caption><tr><td>x</td></tr></table></td></tr></table>";
        assert_eq!(titles(html), vec![Some("Volcanoes".to_string())]);
    }

    #[test]
    fn test_name_falls_back_to_position() {
        let html = format!("<table>{}</table><h2>Lakes</h2><table>{}</table>", TWO_ROWS, TWO_ROWS);
        let doc = Document::parse(&html).unwrap();
        let tables = locate_tables(&doc, &ScrapeConfig::default());

        assert_eq!(tables[0].name(), "table_1");
        assert_eq!(tables[1].name(), "Lakes");
    }
}
