//! CSV serialization and output filenames.
//!
//! Every field is quoted and every record ends with a bare `\n`, on every
//! platform.

use std::io;
use std::sync::LazyLock;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use regex::Regex;

use crate::Result;
use crate::grid::LogicalRow;

static STRIPPED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[,'"/]"#).expect("valid filename regex"));
static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[()\-]").expect("valid filename regex"));

/// Writes rows as quote-all, `\n`-terminated CSV. Returns the number of rows written.
///
/// # Example
///
/// ```rust
/// use wikitable_core::output::write_csv;
///
/// let rows = vec![vec!["Name".to_string(), "Height".to_string()], vec!["Say \"K2\"".to_string(), "8611".to_string()]];
/// let mut out = Vec::new();
/// write_csv(&rows, &mut out).unwrap();
///
/// assert_eq!(String::from_utf8(out).unwrap(), "\"Name\",\"Height\"\n\"Say \"\"K2\"\"\",\"8611\"\n");
/// ```
pub fn write_csv<W: io::Write>(rows: &[LogicalRow], writer: W) -> Result<usize> {
    let mut csv = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    for row in rows {
        csv.write_record(row)?;
    }
    csv.flush()?;

    Ok(rows.len())
}

/// Derives a `.csv` filename from a table title.
///
/// The title is lowercased, `, ' " /` are removed, `( ) -` become spaces and
/// whitespace runs become single underscores. Names longer than `max_len`
/// are cut back to the last underscore at or before `max_len`.
///
/// # Example
///
/// ```rust
/// use wikitable_core::output::csv_filename;
///
/// assert_eq!(csv_filename("Volcanoes - 6000 metres", 250), "volcanoes_6000_metres.csv");
/// assert_eq!(csv_filename("Volcanoes - 6000 metres", 12), "volcanoes.csv");
/// ```
pub fn csv_filename(title: &str, max_len: usize) -> String {
    let lowered = title.to_lowercase();
    let stripped = STRIPPED.replace_all(&lowered, "");
    let spaced = SEPARATORS.replace_all(&stripped, " ");
    let stem = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    format!("{}.csv", truncate_at_word(&stem, max_len))
}

/// Cuts `stem` to at most `max_len` bytes, ending on an underscore boundary.
///
/// A single word longer than `max_len` has no boundary to cut at and is cut
/// at the last character boundary instead.
fn truncate_at_word(stem: &str, max_len: usize) -> &str {
    if stem.len() <= max_len {
        return stem;
    }

    let window = &stem[..stem.floor_char_boundary(max_len + 1)];
    match window.rfind('_') {
        Some(cut) if cut > 0 => &stem[..cut],
        _ => &stem[..stem.floor_char_boundary(max_len)],
    }
}
