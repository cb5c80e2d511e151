use std::fmt::Display;
use std::path::Path;

use itertools::Itertools;
use log::debug;

use crate::data_structs::RawTable;
use crate::error::IngestError;
use crate::utils::is_na;

/// Number of non-blank lines inspected when sniffing a delimiter.
const SNIFF_LINES: usize = 20;

/// Field delimiters understood by the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    Comma,
    Tab,
    Semicolon,
    Pipe,
}

impl Display for Delimiter {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        let str = match self {
            Delimiter::Comma => "comma",
            Delimiter::Tab => "tab",
            Delimiter::Semicolon => "semicolon",
            Delimiter::Pipe => "pipe",
        };
        write!(f, "{}", str)
    }
}

impl Delimiter {
    /// Candidates tried by [`Delimiter::sniff`], highest priority first.
    pub const CANDIDATES: [Delimiter; 4] = [
        Delimiter::Comma,
        Delimiter::Tab,
        Delimiter::Semicolon,
        Delimiter::Pipe,
    ];

    pub const fn as_byte(&self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
            Delimiter::Semicolon => b';',
            Delimiter::Pipe => b'|',
        }
    }

    /// Delimiter implied by the file extension: `.tsv` is tab separated,
    /// `.csv` comma separated. Anything else has to be sniffed.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())?
            .to_ascii_lowercase();
        match extension.as_str() {
            "tsv" => Some(Delimiter::Tab),
            "csv" => Some(Delimiter::Comma),
            _ => None,
        }
    }

    /// Guesses the delimiter from the leading lines of `text`.
    ///
    /// A candidate is consistent when the header and every sampled line split
    /// into the same number of fields, more than one. The first consistent
    /// candidate wins. Otherwise the candidate occurring most often in the
    /// header is taken, and comma if none occurs at all.
    pub fn sniff(text: &str) -> Self {
        let sample = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .take(SNIFF_LINES)
            .join("\n");

        if let Some(consistent) = Self::CANDIDATES
            .into_iter()
            .find(|d| d.field_count(&sample).is_some_and(|n| n > 1))
        {
            return consistent;
        }

        let header = sample.lines().next().unwrap_or_default();
        Self::CANDIDATES
            .into_iter()
            .map(|d| (d, header.bytes().filter(|b| *b == d.as_byte()).count()))
            .filter(|(_, count)| *count > 0)
            .max_by(|(da, a), (db, b)| {
                // Earlier candidates win ties.
                a.cmp(b).then_with(|| {
                    let rank = |d: &Delimiter| {
                        Self::CANDIDATES.iter().position(|c| c == d)
                    };
                    rank(db).cmp(&rank(da))
                })
            })
            .map(|(d, _)| d)
            .unwrap_or(Delimiter::Comma)
    }

    /// Field count shared by every line of `sample`, if there is one.
    fn field_count(
        &self,
        sample: &str,
    ) -> Option<usize> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.as_byte())
            .from_reader(sample.as_bytes());

        let counts: Vec<usize> = reader
            .records()
            .map(|r| r.map(|record| record.len()))
            .collect::<Result<_, _>>()
            .ok()?;

        if counts.iter().all_equal() {
            counts.first().copied()
        }
        else {
            None
        }
    }
}

/// Parses raw upload bytes into a [`RawTable`].
///
/// Blank and whitespace-only lines are skipped; the first remaining line is
/// the header. Cells are trimmed and kept as
/// text; missing-value markers become null. A record whose width differs
/// from the header fails the whole read.
pub fn read_table(
    raw_bytes: &[u8],
    filename: Option<&str>,
) -> Result<RawTable, IngestError> {
    let raw_bytes = raw_bytes
        .strip_prefix(b"\xEF\xBB\xBF".as_slice())
        .unwrap_or(raw_bytes);
    let text = std::str::from_utf8(raw_bytes).map_err(|e| {
        let line = raw_bytes[..e.valid_up_to()]
            .iter()
            .filter(|b| **b == b'\n')
            .count() as u64
            + 1;
        IngestError::parse(line, "file is not valid UTF-8 text")
    })?;

    if text.trim().is_empty() {
        return Err(IngestError::EmptyInput);
    }

    let delimiter = match filename.and_then(Delimiter::from_filename) {
        Some(delimiter) => delimiter,
        None => {
            let sniffed = Delimiter::sniff(text);
            debug!("Sniffed {} delimiter", sniffed);
            sniffed
        },
    };
    debug!(
        "Reading {} with {} delimiter",
        filename.unwrap_or("<unnamed>"),
        delimiter
    );

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(delimiter.as_byte())
        .from_reader(text.as_bytes());

    // Whitespace-only lines trim down to a single empty field.
    let mut records = reader.records().filter(|result| {
        !matches!(result, Ok(record) if record.len() == 1 && record[0].is_empty())
    });

    let header = match records.next() {
        Some(result) => result
            .map_err(|e| IngestError::parse(csv_line(&e), e.to_string()))?
            .iter()
            .enumerate()
            .map(|(i, name)| {
                if name.is_empty() {
                    format!("Unnamed: {i}")
                }
                else {
                    name.to_string()
                }
            })
            .collect_vec(),
        None => return Err(IngestError::EmptyInput),
    };

    let width = header.len();
    let mut rows = Vec::new();
    for result in records {
        let record =
            result.map_err(|e| IngestError::parse(csv_line(&e), e.to_string()))?;
        if record.len() != width {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(IngestError::parse(
                line,
                format!("found {} fields, expected {}", record.len(), width),
            ));
        }

        rows.push(
            record
                .iter()
                .map(|cell| (!is_na(cell)).then(|| cell.to_string()))
                .collect_vec(),
        );
    }

    if rows.is_empty() {
        return Err(IngestError::EmptyInput);
    }

    debug!("Read {} rows x {} columns", rows.len(), width);
    RawTable::try_from_records(header, rows)
        .map_err(|e| IngestError::parse(1, e.to_string()))
}

fn csv_line(err: &csv::Error) -> u64 {
    err.position().map(|p| p.line()).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::tsv("data.tsv", Some(Delimiter::Tab))]
    #[case::tsv_upper("DATA.TSV", Some(Delimiter::Tab))]
    #[case::csv("dir/data.csv", Some(Delimiter::Comma))]
    #[case::txt("data.txt", None)]
    #[case::none("data", None)]
    fn test_from_filename(
        #[case] name: &str,
        #[case] expected: Option<Delimiter>,
    ) {
        assert_eq!(Delimiter::from_filename(name), expected);
    }

    #[rstest]
    #[case::comma("a,b,c\n1,2,3\n", Delimiter::Comma)]
    #[case::tab("a\tb\n1\t2\n", Delimiter::Tab)]
    #[case::semicolon("a;b\n1,5;2,5\n", Delimiter::Semicolon)]
    #[case::pipe("a|b\n1|2\n", Delimiter::Pipe)]
    #[case::single_column("beta\n0.1\n", Delimiter::Comma)]
    fn test_sniff(
        #[case] text: &str,
        #[case] expected: Delimiter,
    ) {
        assert_eq!(Delimiter::sniff(text), expected);
    }

    #[test]
    fn test_sniff_falls_back_to_header_frequency() {
        // Rows disagree, header has two tabs.
        let text = "a\tb\tc\n1\t2\n";
        assert_eq!(Delimiter::sniff(text), Delimiter::Tab);
    }

    #[test]
    fn test_read_csv() {
        let table =
            read_table(b"cpg_id,beta\ncg1,0.1\ncg2, 0.2 \n", Some("x.csv")).unwrap();
        assert_eq!(table.height(), 2);
        assert_eq!(table.column_names(), vec!["cpg_id", "beta"]);
        let beta = table.text_column("beta").unwrap();
        assert_eq!(beta.get(1), Some("0.2"));
    }

    #[test]
    fn test_tsv_extension_wins_over_content() {
        // Commas inside cells would confuse a sniffer.
        let payload = b"cpg_id\tbeta\tgene\ncg1\t0.1\tA,B\ncg2\t0.9\tC,D\n";
        let table = read_table(payload, Some("sample.tsv")).unwrap();
        assert_eq!(table.width(), 3);
        assert_eq!(table.text_column("gene").unwrap().get(0), Some("A,B"));
    }

    #[test]
    fn test_missing_markers_are_null() {
        let table =
            read_table(b"cpg_id,beta\ncg1,\ncg2,NA\ncg3,0.5\n", None).unwrap();
        let beta = table.text_column("beta").unwrap();
        assert_eq!(beta.null_count(), 2);
    }

    #[test]
    fn test_duplicate_header_names() {
        let table = read_table(b"beta,beta,cpg\n1,2,cg1\n", None).unwrap();
        assert_eq!(table.column_names(), vec!["beta", "beta.1", "cpg"]);
    }

    #[test]
    fn test_blank_lines_skipped_and_bom_stripped() {
        let table =
            read_table(b"\xEF\xBB\xBFcpg_id,beta\n\ncg1,0.1\n   \ncg2,0.2\n", None)
                .unwrap();
        assert_eq!(table.column_names(), vec!["cpg_id", "beta"]);
        assert_eq!(table.height(), 2);
    }

    #[test]
    fn test_leading_whitespace_line_is_not_header() {
        let table = read_table(b"   \ncpg_id,beta\ncg1,0.1\n", Some("a.csv")).unwrap();
        assert_eq!(table.column_names(), vec!["cpg_id", "beta"]);
        assert_eq!(table.height(), 1);
    }

    #[test]
    fn test_single_column_skips_whitespace_lines() {
        let table = read_table(b"cpg_id\ncg1\n  \t \ncg2\n", Some("ids.csv")).unwrap();
        assert_eq!(table.height(), 2);
        assert_eq!(table.text_column("cpg_id").unwrap().null_count(), 0);
    }

    #[rstest]
    #[case::empty(b"".as_slice())]
    #[case::whitespace(b" \n\n ".as_slice())]
    #[case::header_only(b"cpg_id,beta\n".as_slice())]
    fn test_empty_input(#[case] payload: &[u8]) {
        assert_eq!(read_table(payload, Some("a.csv")), Err(IngestError::EmptyInput));
    }

    #[test]
    fn test_ragged_row_fails_whole_read() {
        let err = read_table(b"cpg_id,beta\ncg1,0.1\ncg2,0.2,extra\n", Some("a.csv"))
            .unwrap_err();
        match err {
            IngestError::Parse { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("found 3 fields, expected 2"));
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_utf8() {
        let err = read_table(b"cpg_id,beta\ncg1,\xff\n", None).unwrap_err();
        assert!(matches!(err, IngestError::Parse { line: 2, .. }));
    }
}
