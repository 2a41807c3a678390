//! Markdown utilities shared by every analysis check
//!
//! Analysis documents are hand-edited. Pipe tables are split on `|`,
//! sections end at the next ATX heading of level 2-6, and table cells may
//! wrap IDs in bold, code spans or links.

use regex::Regex;
use std::sync::LazyLock;

/// Wrappers stripped from the edges of a cell, longest first
const WRAPPER_MARKERS: [&str; 5] = ["**", "__", "`", "*", "_"];

static BARE_CLAIM_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]+-\d{4}-\d{3})$").unwrap());

static LINKED_CLAIM_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([A-Z]+-\d{4}-\d{3})\]\([^)]+\)$").unwrap());

static NEXT_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*#{2,6}\s+").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strip symmetric markdown wrappers (`**x**`, `` `x` ``, `_x_`, ...) from a cell
///
/// Wrappers are removed repeatedly until none remains or what is left would
/// be too short to hold one.
///
/// # Examples
///
/// ```
/// use realitycheck_analysis::markdown::strip_markdown_wrappers;
///
/// assert_eq!(strip_markdown_wrappers(" **`TECH-2026-001`** "), "TECH-2026-001");
/// assert_eq!(strip_markdown_wrappers("**"), "**");
/// ```
pub fn strip_markdown_wrappers(text: &str) -> &str {
    let mut cleaned = text.trim();
    'outer: while !cleaned.is_empty() {
        for marker in WRAPPER_MARKERS {
            if cleaned.len() > marker.len() * 2
                && cleaned.starts_with(marker)
                && cleaned.ends_with(marker)
            {
                cleaned = cleaned[marker.len()..cleaned.len() - marker.len()].trim();
                continue 'outer;
            }
        }
        break;
    }
    cleaned
}

/// Recover a claim ID from a table cell
///
/// Accepts bare IDs and markdown links, optionally wrapped in emphasis or
/// code spans.
///
/// # Examples
///
/// ```
/// use realitycheck_analysis::markdown::extract_claim_id;
///
/// assert_eq!(extract_claim_id("TECH-2026-001"), Some("TECH-2026-001"));
/// assert_eq!(
///     extract_claim_id("[TECH-2026-001](../reasoning/TECH-2026-001.md)"),
///     Some("TECH-2026-001")
/// );
/// assert_eq!(extract_claim_id("`TECH-2026-001`"), Some("TECH-2026-001"));
/// assert_eq!(extract_claim_id("see TECH-2026-001"), None);
/// ```
pub fn extract_claim_id(cell: &str) -> Option<&str> {
    let text = strip_markdown_wrappers(cell);

    BARE_CLAIM_ID_RE
        .captures(text)
        .or_else(|| LINKED_CLAIM_ID_RE.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Split a pipe-table row into trimmed cells; non-table lines yield nothing
pub fn split_table_row(line: &str) -> Vec<&str> {
    let line = line.trim();
    if !line.starts_with('|') {
        return Vec::new();
    }
    line.trim_matches('|').split('|').map(str::trim).collect()
}

/// Whether the cells form a `|---|:--:|` separator row
pub fn is_separator_row(cells: &[&str]) -> bool {
    !cells.is_empty()
        && cells
            .iter()
            .all(|cell| cell.chars().all(|c| c == ':' || c == '-' || c.is_whitespace()))
}

/// Body of the section whose heading line is `header`
///
/// The heading must occupy a whole line (case-insensitive). The body runs to
/// the next heading of level 2-6 or the end of the document. Returns `None`
/// when the heading is absent.
pub fn section_body<'a>(content: &'a str, header: &str) -> Option<&'a str> {
    let pattern = format!(r"(?im)^\s*{}\s*$", regex::escape(header));
    let heading = Regex::new(&pattern).ok()?;
    let start = heading.find(content)?.end();

    let remainder = &content[start..];
    let end = NEXT_HEADING_RE
        .find(remainder)
        .map_or(content.len(), |m| start + m.start());
    Some(&content[start..end])
}

/// Lowercase a column name and collapse inner whitespace
pub fn normalize_column_name(name: &str) -> String {
    WHITESPACE_RE
        .replace_all(name.trim(), " ")
        .to_lowercase()
}

/// A parsed pipe table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkdownTable {
    /// Header cells, as written
    pub headers: Vec<String>,
    /// Body rows; separator rows are dropped
    pub rows: Vec<Vec<String>>,
}

impl MarkdownTable {
    /// Parse the first table (header row directly followed by a separator) in `text`
    pub fn first_in(text: &str) -> Option<Self> {
        let lines: Vec<&str> = text.lines().collect();

        for (index, pair) in lines.windows(2).enumerate() {
            let headers = split_table_row(pair[0]);
            if headers.is_empty() || !is_separator_row(&split_table_row(pair[1])) {
                continue;
            }

            let rows = lines[index + 2..]
                .iter()
                .map(|line| split_table_row(line))
                .take_while(|cells| !cells.is_empty())
                .filter(|cells| !is_separator_row(cells))
                .map(|cells| cells.into_iter().map(String::from).collect())
                .collect();

            return Some(Self {
                headers: headers.into_iter().map(String::from).collect(),
                rows,
            });
        }

        None
    }

    /// Index of the first candidate column present (names compared normalized)
    ///
    /// If a header is repeated, the rightmost occurrence wins.
    pub fn column_index(&self, candidates: &[&str]) -> Option<usize> {
        let normalized: Vec<String> =
            self.headers.iter().map(|h| normalize_column_name(h)).collect();
        candidates
            .iter()
            .find_map(|candidate| normalized.iter().rposition(|name| name == candidate))
    }

    /// Trimmed cell text, or `""` when the column is unknown or the row is short
    pub fn cell(row: &[String], index: Option<usize>) -> &str {
        index
            .and_then(|i| row.get(i))
            .map_or("", |cell| cell.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_wrappers() {
        assert_eq!(strip_markdown_wrappers("**TECH-2026-001**"), "TECH-2026-001");
        assert_eq!(strip_markdown_wrappers("__x__"), "x");
        assert_eq!(strip_markdown_wrappers("*`[F]`*"), "[F]");
        assert_eq!(strip_markdown_wrappers("**a"), "**a");
        assert_eq!(strip_markdown_wrappers("``"), "``");
        assert_eq!(strip_markdown_wrappers("  "), "");
    }

    #[test]
    fn test_extract_claim_id_rejects() {
        assert_eq!(extract_claim_id(""), None);
        assert_eq!(extract_claim_id("tech-2026-001"), None);
        assert_eq!(extract_claim_id("TECH-2026-01"), None);
        assert_eq!(extract_claim_id("[TECH-2026-001]()"), None);
        assert_eq!(extract_claim_id("**[TECH-2026-001](x.md)**"), Some("TECH-2026-001"));
    }

    #[test]
    fn test_split_table_row() {
        assert_eq!(split_table_row("| a | b |"), ["a", "b"]);
        assert_eq!(split_table_row("  |a|  b  |c"), ["a", "b", "c"]);
        assert!(split_table_row("a | b").is_empty());
        assert!(split_table_row("").is_empty());
    }

    #[test]
    fn test_separator_row() {
        assert!(is_separator_row(&["---", ":--:", "--:"]));
        assert!(!is_separator_row(&["---", "x"]));
        assert!(!is_separator_row(&[]));
    }

    #[test]
    fn test_section_body() {
        let doc = "# Title\n\n## Metadata\n\n| a | b |\n\n### Sub\n\nafter\n";
        assert_eq!(section_body(doc, "## Metadata").map(str::trim), Some("| a | b |"));
        assert_eq!(section_body(doc, "### sub").map(str::trim), Some("after"));
        assert_eq!(section_body(doc, "## Summary"), None);
    }

    #[test]
    fn test_section_heading_must_be_whole_line() {
        let doc = "See ## Metadata inline\n";
        assert_eq!(section_body(doc, "## Metadata"), None);
    }

    #[test]
    fn test_first_table() {
        let text = "intro\n\n| ID | Claim  ID |\n|---|---|\n| 1 | x |\n|---|---|\n| 2 |\nafter\n| 3 | y |\n";
        let table = MarkdownTable::first_in(text).unwrap();
        assert_eq!(table.headers, ["ID", "Claim  ID"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.column_index(&["claim id"]), Some(1));
        assert_eq!(table.column_index(&["missing", "id"]), Some(0));
        assert_eq!(MarkdownTable::cell(&table.rows[1], Some(1)), "");
        assert_eq!(MarkdownTable::cell(&table.rows[0], None), "");
    }

    #[test]
    fn test_no_table_without_separator() {
        assert!(MarkdownTable::first_in("| a | b |\n| c | d |\n").is_none());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn wrap(id: &str, link: bool, marker: Option<&str>) -> String {
        let inner = if link {
            format!("[{id}](../reasoning/{id}.md)")
        } else {
            id.to_string()
        };
        match marker {
            Some(m) => format!("{m}{inner}{m}"),
            None => inner,
        }
    }

    proptest! {
        /// Property: any wrapped or linked ID extracts back to itself
        #[test]
        fn test_claim_id_roundtrip(
            id in "[A-Z]{1,8}-[0-9]{4}-[0-9]{3}",
            link: bool,
            marker in proptest::option::of(proptest::sample::select(WRAPPER_MARKERS.to_vec())),
        ) {
            let wrapped = wrap(&id, link, marker);
            prop_assert_eq!(extract_claim_id(&wrapped), Some(id.as_str()));
        }

        /// Property: stripping is idempotent
        #[test]
        fn test_strip_idempotent(text in "[*_` a-z]{0,12}") {
            let once = strip_markdown_wrappers(&text);
            prop_assert_eq!(strip_markdown_wrappers(once), once);
        }
    }
}
