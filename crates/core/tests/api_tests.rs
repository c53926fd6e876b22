//! Library API integration tests
use wikitable_core::*;

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn fixture(name: &str) -> String {
    std::fs::read_to_string(get_fixture_path(name)).unwrap()
}

fn owned(rows: &[&[&str]]) -> Vec<LogicalRow> {
    rows.iter().map(|row| row.iter().map(|v| v.to_string()).collect()).collect()
}

#[test]
fn test_locates_data_tables_with_titles() {
    let scraper = TableScraper::parse(&fixture("volcanoes.html")).expect("should parse");
    let tables = scraper.tables();

    let titles: Vec<Option<&str>> = tables.iter().map(|t| t.title()).collect();
    assert_eq!(
        titles,
        vec![
            Some("Volcanoes - 6000 metres"),
            Some("Volcanoes between 5000 and 6000 metres"),
            None,
        ]
    );
}

#[test]
fn test_rebuilds_spans_and_cleans_cells() {
    let scraper = TableScraper::parse(&fixture("volcanoes.html")).expect("should parse");
    let tables = scraper.tables();

    assert_eq!(
        tables[0].to_rows().unwrap(),
        owned(&[
            &["Volcano", "Height (m)", "Range", "Country"],
            &["Ojos del Salado", "6,893", "Andes", "Argentina Chile"],
            &["Llullaillaco", "6,739", "Andes", "Argentina / Chile"],
            &["Tipas", "6,660", "unknown", "unknown"],
        ])
    );
}

#[test]
fn test_pads_missing_trailing_cells_and_uses_alt_text() {
    let scraper = TableScraper::parse(&fixture("volcanoes.html")).expect("should parse");
    let tables = scraper.tables();
    let rows = tables[1].to_rows().unwrap();

    assert_eq!(rows[1], vec!["Kilimanjaro", "5,895", "Tanzania", "Highest in Africa", "Unknown"]);
    assert_eq!(rows[2], vec!["Elbrus", "5,642", "Russia", "", ""]);
    assert!(rows.iter().all(|row| row.len() == 5));
}

#[test]
fn test_find_table_by_title() {
    let scraper = TableScraper::parse(&fixture("volcanoes.html")).expect("should parse");

    let table = scraper.find_table_by_title("VOLCANOES - 6000").unwrap();
    assert_eq!(table.index(), 1);

    let err = scraper.find_table_by_title("volcanoes").unwrap_err();
    assert!(matches!(err, WikitableError::AmbiguousTable { count: 2, .. }));
    assert!(err.to_string().contains("Volcanoes between 5000 and 6000 metres"));
}

#[test]
fn test_write_table_as_csv() {
    let scraper = TableScraper::parse(&fixture("volcanoes.html")).expect("should parse");
    let tables = scraper.tables();

    let mut out = Vec::new();
    let written = scraper.write_table(&tables[2], &mut out).unwrap();

    assert_eq!(written, 2);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "\"Name\",\"Quote\"\n\"Popocatépetl\",\"\"\"Smoking mountain\"\"\"\n"
    );
}

#[test]
fn test_write_to_dir() {
    let tmp = tempfile::TempDir::new().unwrap();
    let scraper = TableScraper::parse(&fixture("volcanoes.html")).expect("should parse");

    let outcomes = scraper.write_to_dir(tmp.path()).unwrap();
    assert!(outcomes.iter().all(|o| o.is_ok()));

    let mut names: Vec<String> = std::fs::read_dir(tmp.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();

    assert_eq!(
        names,
        vec![
            "table_3.csv",
            "volcanoes_6000_metres.csv",
            "volcanoes_between_5000_and_6000_metres.csv",
        ]
    );
}

#[test]
fn test_custom_config() {
    let config = ScrapeConfig::builder().line_break(" | ").max_filename_len(9).build();
    let scraper = TableScraper::with_config(&fixture("volcanoes.html"), config).expect("should parse");
    let tables = scraper.tables();

    assert_eq!(tables[0].to_rows().unwrap()[1][3], "Argentina | Chile");
    assert_eq!(scraper.filename(&tables[0]), "volcanoes.csv");
}

#[test]
fn test_edge_case_malformed() {
    let scraper = TableScraper::parse(&fixture("malformed.html")).expect("should parse malformed HTML");
    let tables = scraper.tables();
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].title(), Some("Lakes"));

    assert_eq!(
        tables[0].to_rows().unwrap(),
        owned(&[
            &["Lake", "Area", "Depth"],
            &["Titicaca", "8,372", "281"],
            &["Poopó", "1,000", ""],
            &["Salar", "0", ""],
        ])
    );

    let err = tables[1].to_rows().unwrap_err();
    assert!(matches!(err, WikitableError::InconsistentRow { row: 2, expected: 2, found: 3 }));
}

#[test]
fn test_failed_table_does_not_block_siblings() {
    let tmp = tempfile::TempDir::new().unwrap();
    let scraper = TableScraper::parse(&fixture("malformed.html")).expect("should parse");

    let outcomes = scraper.write_to_dir(tmp.path()).unwrap();
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes[0].is_ok());
    assert!(!outcomes[1].is_ok());
    assert!(tmp.path().join("lakes.csv").exists());
    assert!(!tmp.path().join("broken.csv").exists());
}

#[test]
fn test_summaries() {
    let scraper = TableScraper::parse(&fixture("volcanoes.html")).expect("should parse");
    let summaries = scraper.summaries();

    assert_eq!(summaries.len(), 3);
    assert_eq!(summaries[0].rows, 4);
    assert_eq!(summaries[0].columns, 4);
    assert_eq!(summaries[1].filename, "volcanoes_between_5000_and_6000_metres.csv");
}

#[test]
fn test_summaries_report_failures_per_table() {
    let scraper = TableScraper::parse(&fixture("malformed.html")).expect("should parse");
    let summaries = scraper.summaries();

    assert_eq!(summaries.len(), 2);
    assert!(summaries[0].is_ok());
    assert_eq!((summaries[0].rows, summaries[0].columns), (4, 3));
    assert!(!summaries[1].is_ok());
    assert!(summaries[1].error.as_deref().unwrap().contains("Row 2"));
}

#[test]
fn test_no_tables() {
    let scraper = TableScraper::parse("<p>No tables here</p>").expect("should parse");
    assert!(scraper.tables().is_empty());
    assert!(matches!(
        scraper.find_table_by_title("anything"),
        Err(WikitableError::NoMatchingTable { ref titles, .. }) if titles.is_empty()
    ));
}
