use crate::{
    FIELD_DELIMITER,
    codec::serialize_line,
    error::StoreError,
    parse::parse_line,
    record::ProductRecord,
    view::{SortMode, ViewQuery, sort_records},
};
use log::debug;
use std::{fs, path::Path};

///
/// Catalog
///
/// The full parsed record set in the baseline (default) order. Mutations do
/// not go through the in-memory set: each one re-reads the raw line list
/// from disk, edits it, and rewrites the whole file. That makes concurrent
/// writers unsafe by design; the contract is a single user on a desktop.
///
/// `source_line` indices on the records refer to the raw line list as it
/// stood at load time. They go stale after any mutation (or any external
/// edit) and must be refreshed by reloading.
///

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    records: Vec<ProductRecord>,
}

impl Catalog {
    /// Load and parse the backing file. An unreadable file is an error; an
    /// empty-but-readable file is a catalog with zero records.
    ///
    /// Blank lines produce no record and consume no `source_line` index:
    /// the index is the ordinal among successfully parsed records, which
    /// matches the raw line list the mutation paths operate on (blank
    /// lines are dropped there too).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| StoreError::read(path, source))?;

        let mut records = Vec::new();
        for line in text.lines() {
            if let Some(mut record) = parse_line(line) {
                record.source_line = Some(records.len());
                records.push(record);
            }
        }

        // Baseline ordering consumed by any view that has not applied an
        // explicit sort mode.
        sort_records(&mut records, SortMode::Default);

        debug!("loaded {} catalog records from {}", records.len(), path.display());

        Ok(Self { records })
    }

    ///
    /// ACCESSORS
    ///

    #[must_use]
    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Derive a filtered, ordered view over the loaded records.
    #[must_use]
    pub fn view(&self, query: &ViewQuery) -> Vec<ProductRecord> {
        query.apply(&self.records)
    }

    ///
    /// MUTATIONS
    ///
    /// All of these rewrite the file in full and leave both disk and the
    /// in-memory set untouched on failure. No retry is attempted.
    ///

    /// Append one record in the canonical layout. A missing file is
    /// created.
    pub fn append(path: impl AsRef<Path>, record: &ProductRecord) -> Result<(), StoreError> {
        let path = path.as_ref();

        let mut lines = match read_raw_lines(path) {
            Ok(lines) => lines,
            Err(err) if err.is_not_found() => Vec::new(),
            Err(err) => return Err(err),
        };

        lines.push(serialize_line(record));
        write_raw_lines(path, &lines)
    }

    /// Delete every line whose name token equals `name` exactly. Returns
    /// `Ok(false)` without rewriting when nothing matched.
    pub fn delete_by_name(path: impl AsRef<Path>, name: &str) -> Result<bool, StoreError> {
        let path = path.as_ref();

        let mut lines = read_raw_lines(path)?;
        let before = lines.len();
        lines.retain(|line| line.split(FIELD_DELIMITER).next() != Some(name));

        if lines.len() == before {
            return Ok(false);
        }

        debug!("deleting {} line(s) named {name:?} from {}", before - lines.len(), path.display());

        write_raw_lines(path, &lines)?;
        Ok(true)
    }

    /// Replace the raw line at `index` (a `source_line` from the last
    /// load) with the canonical serialization of `record`.
    pub fn replace_line(
        path: impl AsRef<Path>,
        index: usize,
        record: &ProductRecord,
    ) -> Result<(), StoreError> {
        let path = path.as_ref();

        let mut lines = read_raw_lines(path)?;
        if index >= lines.len() {
            return Err(StoreError::LineOutOfRange {
                index,
                len: lines.len(),
            });
        }

        lines[index] = serialize_line(record);
        write_raw_lines(path, &lines)
    }
}

/// The raw line list the mutation paths operate on: file lines minus blank
/// ones, so positions stay aligned with `source_line` indices.
fn read_raw_lines(path: &Path) -> Result<Vec<String>, StoreError> {
    let text = fs::read_to_string(path).map_err(|source| StoreError::read(path, source))?;

    Ok(text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect())
}

// Truncate-and-rewrite; a crash mid-write can corrupt the file. Known gap,
// accepted for the single-user contract.
fn write_raw_lines(path: &Path, lines: &[String]) -> Result<(), StoreError> {
    let mut text = lines.join("\n");
    if !text.is_empty() {
        text.push('\n');
    }

    fs::write(path, text).map_err(|source| StoreError::write(path, source))
}

///
/// TESTS
///
