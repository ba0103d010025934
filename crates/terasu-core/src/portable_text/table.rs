//! Tables authored as comma- or tab-separated text.
//!
//! There is no quoting: a delimiter always splits a cell.

/// Cell separator of a table source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    fn as_char(self) -> char {
        match self {
            Self::Comma => ',',
            Self::Tab => '\t',
        }
    }
}

/// A parsed table: first line as headers, the rest as rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Tab-delimited only when the first line has a tab and no comma.
pub fn sniff_delimiter(first_line: &str) -> Delimiter {
    if first_line.contains('\t') && !first_line.contains(',') {
        Delimiter::Tab
    } else {
        Delimiter::Comma
    }
}

/// Parses table source text. Returns `None` when there are no lines.
///
/// Blank lines are skipped.
pub fn parse_table(input: &str) -> Option<Table> {
    let mut lines = input
        .trim()
        .lines()
        .filter(|line| !line.trim().is_empty());
    let first = lines.next()?;
    let delimiter = sniff_delimiter(first);
    let split = |line: &str| -> Vec<String> {
        line.split(delimiter.as_char())
            .map(|cell| cell.trim().to_string())
            .collect()
    };

    Some(Table {
        headers: split(first),
        rows: lines.map(split).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sniffing() {
        assert_eq!(sniff_delimiter("a\tb\tc"), Delimiter::Tab);
        assert_eq!(sniff_delimiter("a,b,c"), Delimiter::Comma);
        assert_eq!(sniff_delimiter("a\tb,c"), Delimiter::Comma);
        assert_eq!(sniff_delimiter("single"), Delimiter::Comma);
    }

    #[test]
    fn parses_comma_table() {
        let table = parse_table("  Name, Age\nAlice , 30\nBob,25  \n").unwrap();
        assert_eq!(
            table,
            Table {
                headers: vec!["Name".into(), "Age".into()],
                rows: vec![
                    vec!["Alice".into(), "30".into()],
                    vec!["Bob".into(), "25".into()],
                ],
            }
        );
    }

    #[test]
    fn parses_tab_table() {
        let table = parse_table("言語\t用途\nRust\tCLI, サーバー").unwrap();
        assert_eq!(table.headers, vec!["言語", "用途"]);
        // Later lines keep the sniffed delimiter even if they contain commas.
        assert_eq!(table.rows, vec![vec!["Rust", "CLI, サーバー"]]);
    }

    #[test]
    fn header_only() {
        let table = parse_table("a,b").unwrap();
        assert_eq!(table.headers, vec!["a", "b"]);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn empty_input_is_none() {
        assert!(parse_table("").is_none());
        assert!(parse_table("  \n\t\n ").is_none());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let table = parse_table("a,b\n\n1,2\n   \n3,4").unwrap();
        assert_eq!(table.rows.len(), 2);
    }
}
