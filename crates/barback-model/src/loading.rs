// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Collection loader for the ingredient-shelf domain.
//!
//! This module turns CSV rows of the form `label,element,element,...` into a
//! validated `Model`. Rows may have any number of fields; the first field is
//! the item label and every following non-blank field is an element label.
//! There is no header row by default.
//!
//! The loader accepts any `Read`, a file path, or a string slice. Fields are
//! trimmed, blank element fields are skipped, and rows whose element sets
//! coincide collapse into a single item (first label wins). A row without any
//! elements is either rejected with a descriptive error or skipped, depending
//! on `skip_empty_items`.

use crate::model::{Model, ModelBuilder, ModelError};
use std::{fmt::Display, fs::File, io::Read, path::Path};

/// The error type for the collection loading process.
#[derive(Debug)]
pub enum ItemLoaderError {
    /// An I/O error occurred while opening or reading the input.
    Io(std::io::Error),
    /// The CSV reader rejected the input.
    Csv(csv::Error),
    /// A row has no label (the first field is missing or blank).
    MissingLabel {
        /// The 1-based line number of the row.
        line: u64,
    },
    /// The row could not be turned into an item.
    Model(ModelError),
}

impl Display for ItemLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Csv(e) => write!(f, "CSV error: {e}"),
            Self::MissingLabel { line } => write!(f, "Row on line {} has no label", line),
            Self::Model(e) => write!(f, "Model error: {}", e),
        }
    }
}

impl std::error::Error for ItemLoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Csv(e) => Some(e),
            Self::MissingLabel { .. } => None,
            Self::Model(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ItemLoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<csv::Error> for ItemLoaderError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}

impl From<ModelError> for ItemLoaderError {
    fn from(e: ModelError) -> Self {
        Self::Model(e)
    }
}

/// A configurable loader for item collections.
///
/// # Configuration
/// * `has_headers`: Treat the first row as a header and skip it.
/// * `skip_empty_items`: Silently drop rows that list no elements instead of
///   failing with `ModelError::EmptyItem`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemLoader {
    has_headers: bool,
    skip_empty_items: bool,
}

impl ItemLoader {
    /// Creates a new `ItemLoader` with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures whether the first row is a header.
    #[inline]
    pub fn has_headers(mut self, yes: bool) -> Self {
        self.has_headers = yes;
        self
    }

    /// Configures whether rows without elements are skipped.
    #[inline]
    pub fn skip_empty_items(mut self, yes: bool) -> Self {
        self.skip_empty_items = yes;
        self
    }

    /// Loads a collection from a generic reader.
    pub fn from_reader<R: Read>(&self, rdr: R) -> Result<Model, ItemLoaderError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(self.has_headers)
            .trim(csv::Trim::All)
            .from_reader(rdr);

        let mut builder = ModelBuilder::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line());

            let mut fields = record.iter();
            let label = match fields.next() {
                Some(label) if !label.is_empty() => label,
                _ => return Err(ItemLoaderError::MissingLabel { line }),
            };

            match builder.add_item(label, fields.filter(|f| !f.is_empty())) {
                Ok(_) => {}
                Err(ModelError::EmptyItem { .. }) if self.skip_empty_items => {}
                Err(e) => return Err(e.into()),
            }
        }

        Ok(builder.build())
    }

    /// Loads a collection from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Model, ItemLoaderError> {
        let file = File::open(path)?;
        self.from_reader(file)
    }

    /// Loads a collection from a string slice.
    #[inline]
    pub fn from_str(&self, s: &str) -> Result<Model, ItemLoaderError> {
        self.from_reader(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::ItemIndex;

    const SMALL_COLLECTION: &str = "\
Gin and Tonic,gin,tonic,lime
Martini, gin , vermouth
Negroni,gin,campari,vermouth,,
Vermouth Martini,vermouth,gin
";

    #[test]
    fn test_loads_and_maps_correctly() {
        let model = ItemLoader::new()
            .from_str(SMALL_COLLECTION)
            .expect("Failed to load");

        // The last row duplicates the Martini and collapses into it.
        assert_eq!(model.num_items(), 3);
        assert_eq!(model.num_elements(), 5);
        assert_eq!(model.item_label(ItemIndex::new(1)), "Martini");

        let negroni: Vec<&str> = model
            .elements_of(ItemIndex::new(2))
            .map(|e| model.element_label(e))
            .collect();
        assert_eq!(negroni, vec!["gin", "vermouth", "campari"]);
    }

    #[test]
    fn test_row_without_elements_fails_by_default() {
        let data = "Sparkling Water\nGimlet,gin,lime\n";
        match ItemLoader::new().from_str(data) {
            Err(ItemLoaderError::Model(ModelError::EmptyItem { label })) => {
                assert_eq!(label, "Sparkling Water");
            }
            other => panic!("Expected EmptyItem error, got {:?}", other),
        }
    }

    #[test]
    fn test_row_without_elements_can_be_skipped() {
        let data = "Sparkling Water\nGimlet,gin,lime\n";
        let model = ItemLoader::new()
            .skip_empty_items(true)
            .from_str(data)
            .expect("Failed to load");
        assert_eq!(model.num_items(), 1);
        assert_eq!(model.item_label(ItemIndex::new(0)), "Gimlet");
    }

    #[test]
    fn test_missing_label_reports_line() {
        let data = "Gimlet,gin,lime\n,rum,lime\n";
        match ItemLoader::new().from_str(data) {
            Err(ItemLoaderError::MissingLabel { line }) => assert_eq!(line, 2),
            other => panic!("Expected MissingLabel error, got {:?}", other),
        }
    }

    #[test]
    fn test_headers_are_skipped_when_configured() {
        let data = "name,ingredients\nGimlet,gin,lime\n";
        let model = ItemLoader::new()
            .has_headers(true)
            .from_str(data)
            .expect("Failed to load");
        assert_eq!(model.num_items(), 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let res = ItemLoader::new().from_path("/definitely/not/here.csv");
        assert!(matches!(res, Err(ItemLoaderError::Io(_))));
    }
}
