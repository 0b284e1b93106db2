use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::error::LoadError;
use super::model::PackageTable;
use super::pipeline;

pub const CARRIER: &str = "Carrier";
pub const ROUTED: &str = "Routed Date Time";
pub const STORED: &str = "Stored Date Time";
pub const DELIVERED: &str = "Delivered Date Time";

/// Columns every package export must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = [CARRIER, ROUTED, STORED, DELIVERED];

/// Cell texts read as missing, matched exactly.  These are the tokens
/// spreadsheet and dataframe exports write for an absent value.
pub const NA_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a package CSV and run it through the normalisation pipeline.
pub fn load_file(path: &Path) -> Result<PackageTable, LoadError> {
    let raw = read_path(path)?;
    log::debug!(
        "Read {} rows with columns {:?} from {}",
        raw.rows.len(),
        raw.headers,
        path.display()
    );
    pipeline::build_table(raw)
}

// ---------------------------------------------------------------------------
// Raw CSV table
// ---------------------------------------------------------------------------

/// The file as read: header names in file order and one row per data line.
/// A cell is `None` when it is blank or an NA token; other cells are kept
/// exactly as read.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Position of a header, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Position of a required header.
    pub fn require(&self, name: &'static str) -> Result<usize, LoadError> {
        self.column_index(name).ok_or(LoadError::MissingColumn(name))
    }
}

fn read_path(path: &Path) -> Result<RawTable, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv(file)
}

/// CSV layout: header row with column names, one package per line.
/// Short rows are padded with missing cells; rows longer than the header
/// fail the load.
pub fn read_csv<R: Read>(reader: R) -> Result<RawTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() > headers.len() {
            return Err(LoadError::TooManyFields {
                row: row_no + 1,
                found: record.len(),
                expected: headers.len(),
            });
        }
        let mut cells: Vec<Option<String>> = record.iter().map(cell).collect();
        cells.resize(headers.len(), None);
        rows.push(cells);
    }

    let raw = RawTable { headers, rows };
    for name in REQUIRED_COLUMNS {
        raw.require(name)?;
    }
    Ok(raw)
}

/// Blank cells and NA tokens are missing; anything else is kept as read.
fn cell(s: &str) -> Option<String> {
    if s.trim().is_empty() || NA_TOKENS.contains(&s) {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const HEADER: &str = "Carrier,Routed Date Time,Stored Date Time,Delivered Date Time,County\n";

    #[test]
    fn reads_headers_and_blank_cells() {
        let text = format!("{HEADER}UPS,01/01/2024 08:00,,01/01/2024 14:00, Kent \n");
        let raw = read_csv(text.as_bytes()).unwrap();

        assert_eq!(raw.headers.len(), 5);
        assert_eq!(raw.column_index("County"), Some(4));
        assert_eq!(raw.rows.len(), 1);
        assert_eq!(raw.rows[0][2], None);
        assert_eq!(raw.rows[0][4].as_deref(), Some(" Kent "));
    }

    #[test]
    fn strips_byte_order_mark_from_first_header() {
        let text = format!("\u{feff}{HEADER}");
        let raw = read_csv(text.as_bytes()).unwrap();
        assert_eq!(raw.column_index("Carrier"), Some(0));
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let text = "Carrier,Routed Date Time,Delivered Date Time\nUPS,a,b\n";
        let err = read_csv(text.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(STORED)));
    }

    #[test]
    fn short_row_is_padded_with_missing_cells() {
        let text = format!(
            "{HEADER}UPS,01/01/2024 08:00,01/01/2024 10:00,01/01/2024 14:00,Kent\n\
             FedEx,01/01/2024 08:00,,01/01/2024 09:00\n"
        );
        let raw = read_csv(text.as_bytes()).unwrap();
        assert_eq!(raw.rows[1].len(), 5);
        assert_eq!(raw.rows[1][4], None);

        let table = pipeline::build_table(raw).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[1].passthrough, vec!["0".to_string()]);
    }

    #[test]
    fn long_row_is_an_error() {
        let text = format!("{HEADER}UPS,01/01/2024 08:00,,01/01/2024 14:00,Kent,extra\n");
        let err = read_csv(text.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::TooManyFields { row: 1, found: 6, expected: 5 }
        ));
    }

    #[test]
    fn na_tokens_are_missing() {
        let text = format!(
            "{HEADER}N/A,01/01/2024 08:00,NaN,01/01/2024 14:00,null\n\
             UPS,01/01/2024 08:00,,01/01/2024 14:00,NAME\n"
        );
        let raw = read_csv(text.as_bytes()).unwrap();
        assert_eq!(raw.rows[0][0], None);
        assert_eq!(raw.rows[0][2], None);
        assert_eq!(raw.rows[0][4], None);
        assert_eq!(raw.rows[1][4].as_deref(), Some("NAME"));

        let table = pipeline::build_table(raw).unwrap();
        assert_eq!(table.records[0].carrier, "0");
        assert_eq!(table.records[0].passthrough, vec!["0".to_string()]);
        // Tokens are missing, not unparseable.
        assert_eq!(table.report.unparsed[STORED], 0);
    }

    #[test]
    fn absent_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("nope.csv"));
    }

    #[test]
    fn load_file_builds_the_package_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{HEADER}\
             UPS,01/01/2024 08:00,01/01/2024 10:00,01/01/2024 14:00,Kent\n\
             FedEx,not-a-date,01/01/2024 10:00,01/01/2024 14:00,Sussex\n"
        )
        .unwrap();

        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records[0].carrier, "UPS");
        assert_eq!(table.passthrough_columns, vec!["County".to_string()]);
        assert_eq!(table.report.rows_read, 2);
        assert_eq!(table.report.rows_dropped, 1);
    }
}
