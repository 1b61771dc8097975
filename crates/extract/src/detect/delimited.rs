//! Spreadsheet exports: CSV, TSV and semicolon-separated text.

use super::{Detected, found, looks_url_like};
use csv::{ReaderBuilder, Trim};

/// Delimiter candidates, in tie-break order.
const DELIMITERS: [u8; 3] = [b',', b'\t', b';'];
/// Bytes of input inspected when sniffing the delimiter.
const SNIFF_SAMPLE: usize = 8000;
/// Rows (after the first) inspected when scoring columns.
const SCORE_SAMPLE: usize = 12;
/// Header labels that name the URL column, in priority order.
const HEADER_KEYS: [&str; 5] = ["url", "link", "href", "website", "homepage"];

/// Pick the URL column of delimited text and return its URL-like cells.
pub(crate) fn detect(text: &str) -> Option<Detected> {
    if text.trim().is_empty() {
        return None;
    }
    let rows = parse_rows(text, sniff_delimiter(text));
    if rows.is_empty() {
        return None;
    }
    let column = url_column(&rows);
    let start = usize::from(has_header_row(&rows));
    tracing::debug!(rows = rows.len(), column, header = start == 1, "Delimited URL column chosen");
    found(
        rows[start..]
            .iter()
            .filter_map(|row| row.get(column))
            .filter(|cell| looks_url_like(cell))
            .cloned()
            .collect(),
    )
}

/// The candidate occurring most often outside quotes; ties keep the earlier one.
pub(crate) fn sniff_delimiter(text: &str) -> u8 {
    let sample = &text[..text.floor_char_boundary(SNIFF_SAMPLE)];
    let mut best = (DELIMITERS[0], 0);
    for delimiter in DELIMITERS {
        let count = count_unquoted(sample.as_bytes(), delimiter);
        if count > best.1 {
            best = (delimiter, count);
        }
    }
    best.0
}

fn count_unquoted(bytes: &[u8], delimiter: u8) -> usize {
    let mut in_quotes = false;
    let mut count = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            // Escaped quote inside a quoted field.
            b'"' if in_quotes && bytes.get(i + 1) == Some(&b'"') => i += 1,
            b'"' => in_quotes = !in_quotes,
            b if b == delimiter && !in_quotes => count += 1,
            _ => {},
        }
        i += 1;
    }
    count
}

/// Quote-aware parse. Cells are trimmed and rows with only blank cells dropped.
fn parse_rows(text: &str, delimiter: u8) -> Vec<Vec<String>> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .delimiter(delimiter)
        .from_reader(text.as_bytes())
        .records()
        .filter_map(|record| {
            record.inspect_err(|err| tracing::debug!(error = %err, "Skipping unreadable delimited row")).ok()
        })
        .map(|record| record.iter().map(str::to_string).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .collect()
}

/// The first row is a header if it has no URL-like cell and the second does.
fn has_header_row(rows: &[Vec<String>]) -> bool {
    let url_like = |row: &Vec<String>| row.iter().any(|cell| looks_url_like(cell));
    rows.len() > 1 && !url_like(&rows[0]) && url_like(&rows[1])
}

fn url_column(rows: &[Vec<String>]) -> usize {
    let header: Vec<String> = rows[0].iter().map(|cell| cell.to_lowercase()).collect();
    for key in HEADER_KEYS {
        if let Some(index) = header.iter().position(|label| label.contains(key)) {
            return index;
        }
    }

    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let sample = &rows[1.min(rows.len())..rows.len().min(SCORE_SAMPLE)];
    let mut best = (0, 0);
    for column in 0..columns {
        let score = sample.iter().filter(|row| row.get(column).is_some_and(|cell| looks_url_like(cell))).count();
        if score > best.1 {
            best = (column, score);
        }
    }
    best.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn urls(text: &str) -> Vec<String> {
        match detect(text) {
            Some(Detected::Urls(urls)) => urls,
            _ => vec![],
        }
    }

    #[rstest]
    #[case("a,b,c\n1,2,3", b',')]
    #[case("a\tb\tc\n1\t2\t3", b'\t')]
    #[case("a;b;c\n1;2;3", b';')]
    #[case("\"x;y;z\",b\n\"1;2;3\",c", b',')]
    #[case("no delimiters here", b',')]
    #[case("a,b;c", b',')]
    #[case("\"say \"\"hi;there\"\"\";x;y", b';')]
    fn test_sniff_delimiter(#[case] text: &str, #[case] expected: u8) {
        assert_eq!(sniff_delimiter(text), expected);
    }

    #[test]
    fn test_picks_column_without_matching_header() {
        assert_eq!(urls("name,site\nAcme,acme.com"), ["acme.com"]);
    }

    #[test]
    fn test_header_label_wins() {
        let csv = "Title,Homepage URL,Mirror\n\
                   Rust,https://rust-lang.org,https://mirror.example\n\
                   Go,https://go.dev,https://mirror2.example\n";
        assert_eq!(urls(csv), ["https://rust-lang.org", "https://go.dev"]);
    }

    #[test]
    fn test_header_key_priority() {
        let csv = "website,link\nhttps://a.com,https://b.com\n";
        assert_eq!(urls(csv), ["https://b.com"]);
    }

    #[test]
    fn test_headerless() {
        let csv = "Rust;https://rust-lang.org\nGo;https://go.dev\n";
        assert_eq!(urls(csv), ["https://rust-lang.org", "https://go.dev"]);
    }

    #[test]
    fn test_quoted_cells() {
        let csv = "title,url\n\"Hello, \"\"world\"\"\",\"https://a.com/?x=1,2\"\n\"multi\nline\",  b.com  \n";
        assert_eq!(urls(csv), ["https://a.com/?x=1,2", "b.com"]);
    }

    #[test]
    fn test_blank_rows_and_non_urls_skipped() {
        let csv = "url\r\n\r\n,\r\nhttps://a.com\r\nnot a url\r\n\r\nwww.b.org\r\n";
        assert_eq!(urls(csv), ["https://a.com", "www.b.org"]);
    }

    #[test]
    fn test_ragged_rows() {
        let csv = "a,b\nx\ny,https://c.com,extra\n";
        assert_eq!(urls(csv), ["https://c.com"]);
    }

    #[rstest]
    #[case("")]
    #[case("  \n ")]
    #[case("name,age\nAlice,30\n")]
    fn test_no_match(#[case] text: &str) {
        assert_eq!(detect(text), None);
    }
}
