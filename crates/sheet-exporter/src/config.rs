//! Exporter configuration

use std::path::{Path, PathBuf};

use sheet_exporter_csv::CsvWriteOptions;

use crate::binder::ValueBinder;

/// Default size of the chunks handed to an output sink
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Settings fixed when an [`crate::Exporter`] is created
#[derive(Debug, Clone)]
pub struct ExporterConfig {
    /// Directory the generated file is written to
    pub temp_path: PathBuf,
    /// Number of worksheets the document starts with (at least 1)
    pub initial_sheets: usize,
    /// Size of the chunks streamed by `output_file`
    pub chunk_size: usize,
    /// File stem used when no file name is given
    pub default_filename: String,
    /// Format used when none is given
    pub default_format: String,
    /// Typing of buffered values at generation time; `Advanced` unless set
    pub value_binder: ValueBinder,
    /// Options for CSV output
    pub csv: CsvWriteOptions,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            temp_path: std::env::temp_dir(),
            initial_sheets: 1,
            chunk_size: DEFAULT_CHUNK_SIZE,
            default_filename: "export".to_string(),
            default_format: "Xlsx".to_string(),
            value_binder: ValueBinder::Advanced,
            csv: CsvWriteOptions::default(),
        }
    }
}

impl ExporterConfig {
    /// Configuration writing into `temp_path`
    pub fn new<P: Into<PathBuf>>(temp_path: P) -> Self {
        Self {
            temp_path: temp_path.into(),
            ..Self::default()
        }
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    #[must_use]
    pub fn with_initial_sheets(mut self, initial_sheets: usize) -> Self {
        self.initial_sheets = initial_sheets.max(1);
        self
    }

    /// Chunk size for streaming; 0 is raised to 1
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    #[must_use]
    pub fn with_default_filename<S: Into<String>>(mut self, default_filename: S) -> Self {
        self.default_filename = default_filename.into();
        self
    }

    #[must_use]
    pub fn with_default_format<S: Into<String>>(mut self, default_format: S) -> Self {
        self.default_format = default_format.into();
        self
    }

    #[must_use]
    pub fn with_value_binder(mut self, value_binder: ValueBinder) -> Self {
        self.value_binder = value_binder;
        self
    }

    #[must_use]
    pub fn with_csv_options(mut self, csv: CsvWriteOptions) -> Self {
        self.csv = csv;
        self
    }
}
