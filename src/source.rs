//! Row sources feeding the sampler.
//!
//! The sampler only sees [`RowSource`]: a list of column names followed by
//! rows of [`RawValue`]s. Delimited text, spreadsheet sheets and in-memory
//! rows each implement it.

use std::{
    io::Read,
    path::Path,
};

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use log::debug;

use crate::{io_utils, memory::MemoryGuard, value::RawValue};

pub trait RowSource {
    /// Declared or synthesized column names.
    fn headers(&self) -> &[String];

    /// Next row, or `None` once the source is exhausted or stopped early.
    fn next_row(&mut self) -> Result<Option<Vec<RawValue>>>;

    /// Name the default table name is derived from (usually the file stem).
    fn logical_name(&self) -> Option<&str> {
        None
    }

    /// Why the source stopped before its end, if it did.
    fn truncation(&self) -> Option<&str> {
        None
    }

    /// Fields that could not be decoded and were read as null.
    fn decode_errors(&self) -> usize {
        0
    }
}

pub fn synthesize_names(count: usize) -> Vec<String> {
    (1..=count).map(|idx| format!("column_{idx}")).collect()
}

/// Replaces blank header cells with the synthesized name for their position.
pub fn complete_headers(raw: Vec<String>) -> Vec<String> {
    raw.into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                format!("column_{}", idx + 1)
            } else {
                trimmed.to_string()
            }
        })
        .collect()
}

fn logical_name_from_path(path: &Path) -> Option<String> {
    if io_utils::is_dash(path) {
        return None;
    }
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(|stem| stem.to_string())
}

/// Rows held in memory, for library callers and tests.
#[derive(Debug, Clone)]
pub struct VecSource {
    headers: Vec<String>,
    rows: std::vec::IntoIter<Vec<RawValue>>,
    logical_name: Option<String>,
}

impl VecSource {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<RawValue>>) -> Self {
        Self {
            headers: complete_headers(headers),
            rows: rows.into_iter(),
            logical_name: None,
        }
    }

    /// Builds a source from text rows. With `has_header` the first row
    /// supplies the names; otherwise names are synthesized.
    pub fn from_text_rows<S: AsRef<str>>(rows: &[Vec<S>], has_header: bool) -> Self {
        let mut iter = rows.iter();
        let headers = if has_header {
            iter.next()
                .map(|row| row.iter().map(|v| v.as_ref().to_string()).collect())
                .unwrap_or_default()
        } else {
            synthesize_names(rows.first().map(Vec::len).unwrap_or(0))
        };
        let data = iter
            .map(|row| row.iter().map(|v| RawValue::from_field(v.as_ref())).collect())
            .collect();
        Self::new(headers, data)
    }

    pub fn with_logical_name(mut self, name: impl Into<String>) -> Self {
        self.logical_name = Some(name.into());
        self
    }
}

impl RowSource for VecSource {
    fn headers(&self) -> &[String] {
        &self.headers
    }

    fn next_row(&mut self) -> Result<Option<Vec<RawValue>>> {
        Ok(self.rows.next())
    }

    fn logical_name(&self) -> Option<&str> {
        self.logical_name.as_deref()
    }
}

/// Streams a delimited text file, decoding each field with the configured
/// encoding and trimming surrounding whitespace.
pub struct CsvSource {
    reader: csv::Reader<Box<dyn Read>>,
    encoding: &'static Encoding,
    headers: Vec<String>,
    pending: Option<Vec<RawValue>>,
    record: csv::ByteRecord,
    guard: MemoryGuard,
    logical_name: Option<String>,
    truncated: Option<String>,
    decode_errors: usize,
    finished: bool,
}

impl CsvSource {
    pub fn open(
        path: &Path,
        delimiter: u8,
        encoding: &'static Encoding,
        has_header: bool,
    ) -> Result<Self> {
        let reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
        let mut source = Self::from_csv_reader(reader, encoding, has_header)
            .with_context(|| format!("Reading header from {path:?}"))?;
        source.logical_name = logical_name_from_path(path);
        Ok(source)
    }

    pub fn from_reader<R>(
        reader: R,
        delimiter: u8,
        encoding: &'static Encoding,
        has_header: bool,
    ) -> Result<Self>
    where
        R: Read + 'static,
    {
        let boxed: Box<dyn Read> = Box::new(reader);
        Self::from_csv_reader(io_utils::open_csv_reader(boxed, delimiter), encoding, has_header)
    }

    fn from_csv_reader(
        reader: csv::Reader<Box<dyn Read>>,
        encoding: &'static Encoding,
        has_header: bool,
    ) -> Result<Self> {
        let mut source = Self {
            reader,
            encoding,
            headers: Vec::new(),
            pending: None,
            record: csv::ByteRecord::new(),
            guard: MemoryGuard::disabled(),
            logical_name: None,
            truncated: None,
            decode_errors: 0,
            finished: false,
        };
        if !source.reader.read_byte_record(&mut source.record)? {
            source.finished = true;
            return Ok(source);
        }
        if has_header {
            let names = io_utils::decode_record(&source.record, encoding)?;
            source.headers = complete_headers(names);
        } else {
            source.headers = synthesize_names(source.record.len());
            source.pending = Some(source.decode_current());
        }
        debug!("Delimited source columns: {:?}", source.headers);
        Ok(source)
    }

    pub fn with_memory_guard(mut self, guard: MemoryGuard) -> Self {
        self.guard = guard;
        self
    }

    pub fn with_logical_name(mut self, name: impl Into<String>) -> Self {
        self.logical_name = Some(name.into());
        self
    }

    fn decode_current(&mut self) -> Vec<RawValue> {
        let mut row = Vec::with_capacity(self.record.len());
        for field in self.record.iter() {
            if field.is_empty() {
                row.push(RawValue::Null);
                continue;
            }
            match io_utils::decode_bytes(field, self.encoding) {
                Ok(decoded) => row.push(RawValue::from_field(&decoded)),
                Err(_) => {
                    self.decode_errors += 1;
                    row.push(RawValue::Null);
                }
            }
        }
        row
    }
}

impl RowSource for CsvSource {
    fn headers(&self) -> &[String] {
        &self.headers
    }

    fn next_row(&mut self) -> Result<Option<Vec<RawValue>>> {
        if let Some(row) = self.pending.take() {
            return Ok(Some(row));
        }
        if self.finished {
            return Ok(None);
        }
        if let Some(reason) = self.guard.check() {
            self.truncated = Some(reason);
            self.finished = true;
            return Ok(None);
        }
        if !self.reader.read_byte_record(&mut self.record)? {
            self.finished = true;
            return Ok(None);
        }
        Ok(Some(self.decode_current()))
    }

    fn logical_name(&self) -> Option<&str> {
        self.logical_name.as_deref()
    }

    fn truncation(&self) -> Option<&str> {
        self.truncated.as_deref()
    }

    fn decode_errors(&self) -> usize {
        self.decode_errors
    }
}

#[cfg(feature = "excel")]
pub use sheet::{SheetSelector, SheetSource};

#[cfg(feature = "excel")]
mod sheet {
    use std::{path::Path, str::FromStr};

    use anyhow::{Context, Result, anyhow};
    use calamine::{Data, Range, Reader, open_workbook_auto};
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use log::debug;

    use super::{RowSource, complete_headers, logical_name_from_path, synthesize_names};
    use crate::{memory::MemoryGuard, value::RawValue};

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum SheetSelector {
        First,
        Name(String),
        Index(usize),
    }

    impl SheetSelector {
        /// Digits select by zero-based index, anything else by name.
        pub fn parse(value: &str) -> Self {
            match value.trim().parse::<usize>() {
                Ok(idx) => SheetSelector::Index(idx),
                Err(_) => SheetSelector::Name(value.trim().to_string()),
            }
        }
    }

    /// Reads one worksheet; cells keep their native scalar kind.
    pub struct SheetSource {
        range: Range<Data>,
        headers: Vec<String>,
        next_row: usize,
        height: usize,
        width: usize,
        guard: MemoryGuard,
        logical_name: Option<String>,
        truncated: Option<String>,
    }

    impl SheetSource {
        pub fn open(path: &Path, selector: &SheetSelector, has_header: bool) -> Result<Self> {
            let mut workbook = open_workbook_auto(path)
                .with_context(|| format!("Opening workbook {path:?}"))?;
            let names = workbook.sheet_names();
            let sheet_name = match selector {
                SheetSelector::First => names.first().cloned(),
                SheetSelector::Index(idx) => names.get(*idx).cloned(),
                SheetSelector::Name(name) => names.iter().find(|n| *n == name).cloned(),
            }
            .ok_or_else(|| {
                anyhow!(
                    "Sheet {selector:?} not found in {path:?}. Available sheets: {}",
                    names.join(", ")
                )
            })?;
            let range = workbook
                .worksheet_range(&sheet_name)
                .with_context(|| format!("Reading sheet '{sheet_name}' from {path:?}"))?;
            debug!("Reading sheet '{sheet_name}' from {path:?}");
            let mut source = Self::from_range(range, has_header);
            source.logical_name = logical_name_from_path(path);
            Ok(source)
        }

        pub fn from_range(range: Range<Data>, has_header: bool) -> Self {
            let (height, width) = range.get_size();
            let mut source = Self {
                range,
                headers: Vec::new(),
                next_row: 0,
                height,
                width,
                guard: MemoryGuard::disabled(),
                logical_name: None,
                truncated: None,
            };
            if has_header && height > 0 {
                let names = (0..width)
                    .map(|col| source.cell(0, col).render().into_owned())
                    .collect();
                source.headers = complete_headers(names);
                source.next_row = 1;
            } else {
                source.headers = synthesize_names(width);
            }
            source
        }

        pub fn with_memory_guard(mut self, guard: MemoryGuard) -> Self {
            self.guard = guard;
            self
        }

        pub fn with_logical_name(mut self, name: impl Into<String>) -> Self {
            self.logical_name = Some(name.into());
            self
        }

        fn cell(&self, row: usize, col: usize) -> RawValue {
            self.range
                .get((row, col))
                .map(cell_value)
                .unwrap_or(RawValue::Null)
        }
    }

    impl RowSource for SheetSource {
        fn headers(&self) -> &[String] {
            &self.headers
        }

        fn next_row(&mut self) -> Result<Option<Vec<RawValue>>> {
            if self.next_row >= self.height || self.truncated.is_some() {
                return Ok(None);
            }
            if let Some(reason) = self.guard.check() {
                self.truncated = Some(reason);
                return Ok(None);
            }
            let row = (0..self.width)
                .map(|col| self.cell(self.next_row, col))
                .collect();
            self.next_row += 1;
            Ok(Some(row))
        }

        fn logical_name(&self) -> Option<&str> {
            self.logical_name.as_deref()
        }

        fn truncation(&self) -> Option<&str> {
            self.truncated.as_deref()
        }
    }

    fn temporal(value: NaiveDateTime) -> RawValue {
        if value.time() == NaiveTime::MIN {
            RawValue::Date(value.date())
        } else {
            RawValue::Timestamp(value)
        }
    }

    pub(crate) fn cell_value(cell: &Data) -> RawValue {
        match cell {
            Data::Empty | Data::Error(_) => RawValue::Null,
            Data::Int(i) => RawValue::Integer(*i),
            Data::Float(f) => RawValue::Float(*f),
            Data::Bool(b) => RawValue::Boolean(*b),
            Data::String(s) => RawValue::from_field(s),
            Data::DateTime(dt) if dt.is_datetime() => dt
                .as_datetime()
                .map(temporal)
                .unwrap_or(RawValue::Float(dt.as_f64())),
            Data::DateTime(dt) => RawValue::Float(dt.as_f64()),
            Data::DateTimeIso(s) => NaiveDateTime::from_str(s)
                .map(temporal)
                .or_else(|_| NaiveDate::from_str(s).map(RawValue::Date))
                .unwrap_or_else(|_| RawValue::from_field(s)),
            Data::DurationIso(s) => RawValue::from_field(s),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn sample_range() -> Range<Data> {
            let mut range = Range::new((0, 0), (3, 2));
            range.set_value((0, 0), Data::String("id".to_string()));
            range.set_value((0, 1), Data::String("amount".to_string()));
            range.set_value((0, 2), Data::String(String::new()));
            range.set_value((1, 0), Data::Float(1.0));
            range.set_value((1, 1), Data::Float(9.5));
            range.set_value((1, 2), Data::String("north".to_string()));
            range.set_value((2, 0), Data::Int(2));
            range.set_value((2, 1), Data::Float(10.25));
            range.set_value((3, 1), Data::Bool(true));
            range
        }

        #[test]
        fn header_row_supplies_names_and_blanks_are_synthesized() {
            let source = SheetSource::from_range(sample_range(), true);
            assert_eq!(source.headers(), ["id", "amount", "column_3"]);
        }

        #[test]
        fn rows_carry_native_scalars() {
            let mut source = SheetSource::from_range(sample_range(), true);
            let first = source.next_row().unwrap().unwrap();
            assert_eq!(first[0], RawValue::Float(1.0));
            assert_eq!(first[2], RawValue::text("north"));
            let second = source.next_row().unwrap().unwrap();
            assert_eq!(second[0], RawValue::Integer(2));
            assert_eq!(second[2], RawValue::Null);
            let third = source.next_row().unwrap().unwrap();
            assert_eq!(third[1], RawValue::Boolean(true));
            assert!(source.next_row().unwrap().is_none());
        }

        #[test]
        fn without_header_every_row_is_data() {
            let mut source = SheetSource::from_range(sample_range(), false);
            assert_eq!(source.headers(), ["column_1", "column_2", "column_3"]);
            let first = source.next_row().unwrap().unwrap();
            assert_eq!(first[0], RawValue::text("id"));
        }

        #[test]
        fn iso_cells_become_temporal_values() {
            let date = cell_value(&Data::DateTimeIso("2024-03-01".to_string()));
            assert!(matches!(date, RawValue::Date(_)));
            let ts = cell_value(&Data::DateTimeIso("2024-03-01T10:15:00".to_string()));
            assert!(matches!(ts, RawValue::Timestamp(_)));
        }

        #[test]
        fn memory_guard_stops_sheet_reads() {
            let mut source = SheetSource::from_range(sample_range(), true)
                .with_memory_guard(MemoryGuard::with_probe(1, 1, || 0));
            assert!(source.next_row().unwrap().is_none());
            assert!(source.truncation().is_some());
        }

        #[test]
        fn selector_parses_index_or_name() {
            assert_eq!(SheetSelector::parse("2"), SheetSelector::Index(2));
            assert_eq!(
                SheetSelector::parse("Orders"),
                SheetSelector::Name("Orders".to_string())
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use encoding_rs::{UTF_8, WINDOWS_1252};

    use super::*;

    fn drain(source: &mut dyn RowSource) -> Vec<Vec<RawValue>> {
        let mut rows = Vec::new();
        while let Some(row) = source.next_row().unwrap() {
            rows.push(row);
        }
        rows
    }

    #[test]
    fn csv_source_reads_header_and_trims_fields() {
        let input = Cursor::new("id, name \n1, Alice \n2,\n");
        let mut source = CsvSource::from_reader(input, b',', UTF_8, true).unwrap();
        assert_eq!(source.headers(), ["id", "name"]);
        let rows = drain(&mut source);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][1], RawValue::text("Alice"));
        assert_eq!(rows[1][1], RawValue::Null);
    }

    #[test]
    fn csv_source_without_header_synthesizes_names() {
        let input = Cursor::new("1,2,3\n4,5,6\n");
        let mut source = CsvSource::from_reader(input, b',', UTF_8, false).unwrap();
        assert_eq!(source.headers(), ["column_1", "column_2", "column_3"]);
        assert_eq!(drain(&mut source).len(), 2);
    }

    #[test]
    fn csv_source_counts_decode_errors() {
        let bytes = b"name\nCaf\xe9\nok\n".to_vec();
        let mut source = CsvSource::from_reader(Cursor::new(bytes.clone()), b',', UTF_8, true)
            .unwrap();
        let rows = drain(&mut source);
        assert_eq!(rows[0][0], RawValue::Null);
        assert_eq!(source.decode_errors(), 1);

        let mut latin = CsvSource::from_reader(Cursor::new(bytes), b',', WINDOWS_1252, true)
            .unwrap();
        let rows = drain(&mut latin);
        assert_eq!(rows[0][0], RawValue::text("Café"));
        assert_eq!(latin.decode_errors(), 0);
    }

    #[test]
    fn csv_source_stops_when_memory_runs_low() {
        let input = Cursor::new("a\n1\n2\n3\n");
        let mut source = CsvSource::from_reader(input, b',', UTF_8, true)
            .unwrap()
            .with_memory_guard(MemoryGuard::with_probe(8, 2, || 0));
        let rows = drain(&mut source);
        assert_eq!(rows.len(), 1);
        assert!(source.truncation().unwrap().contains("below"));
    }

    #[test]
    fn empty_input_has_no_columns() {
        let mut source = CsvSource::from_reader(Cursor::new(""), b',', UTF_8, true).unwrap();
        assert!(source.headers().is_empty());
        assert!(source.next_row().unwrap().is_none());
    }

    #[test]
    fn vec_source_from_text_rows() {
        let rows = vec![vec!["id", ""], vec!["1", "x"]];
        let mut source = VecSource::from_text_rows(&rows, true).with_logical_name("people");
        assert_eq!(source.headers(), ["id", "column_2"]);
        assert_eq!(source.logical_name(), Some("people"));
        assert_eq!(drain(&mut source).len(), 1);
    }
}
