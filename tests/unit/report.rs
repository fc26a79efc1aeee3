//! Unit tests for table rendering

use market_scout::report::{
    format_percent, format_price, format_ratio, format_rsi, legend, render_row, render_table,
};
use market_scout::ScanResult;

use crate::fixtures::result;

#[test]
fn test_formatters() {
    assert_eq!(format_price(189.456), "$189.46");
    assert_eq!(format_percent(0.253), "25.3%");
    assert_eq!(format_percent(-0.05), "-5.0%");
    assert_eq!(format_ratio(1.5), "1.5x");
    assert_eq!(format_rsi(Some(63.27)), "63.3");
    assert_eq!(format_rsi(None), "-");
}

#[test]
fn test_table_ranks_start_at_one() {
    let scan = ScanResult::ranked(vec![result("AAA", 40), result("BBB", 90)]);
    let table = render_table(&scan);
    let lines: Vec<&str> = table.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Rank"));
    assert!(lines[1].starts_with("1 "));
    assert!(lines[1].contains("BBB"));
    assert!(lines[2].starts_with("2 "));
    assert!(lines[2].contains("AAA"));
}

#[test]
fn test_row_contents() {
    let mut row = result("NVDA", 85);
    row.name = "NVIDIA Cor".to_string();
    row.price = 120.0;
    row.rsi = None;
    let rendered = render_row(3, &row);

    assert!(rendered.starts_with("3 "));
    assert!(rendered.contains("NVIDIA Cor"));
    assert!(rendered.contains("$120.00"));
    assert!(rendered.contains("Hold"));
    assert!(rendered.trim_end().ends_with('-'));
}

#[test]
fn test_empty_scan_message() {
    assert_eq!(
        render_table(&ScanResult::default()),
        "No tickers produced a usable analysis.\n"
    );
}

#[test]
fn test_legend_mentions_bands() {
    let legend = legend();
    assert!(legend.contains("Strong Buy"));
    assert!(legend.contains("overbought"));
}
