//! The exporter: buffered rows in, a generated file out

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use sheet_exporter_core::{CellValue, Workbook};

use crate::config::ExporterConfig;
use crate::cursor::Cursor;
use crate::document::DocumentState;
use crate::error::{ExportError, ExportResult};
use crate::format::ExportFormat;
use crate::hook::{FormatContext, FormatHook};
use crate::output::{OutputSink, TransferMetadata};
use crate::sheet::Sheet;

/// The file produced by the last generation
#[derive(Debug, Clone)]
struct Artifact {
    file_name: String,
    file_path: PathBuf,
    format: ExportFormat,
}

/// Builds a spreadsheet from buffered rows and writes it to a file.
///
/// Rows are buffered per sheet by [`Exporter::write_row`] and only loaded
/// into the document by [`Exporter::generate_file`], which then runs the
/// format hook and writes `{temp_path}/{filename}`.
///
/// ```no_run
/// use sheet_exporter::{Exporter, ExporterConfig};
///
/// let mut exporter = Exporter::new(ExporterConfig::new("/tmp")).unwrap();
/// exporter.write_row(["name", "qty"], 0).unwrap();
/// exporter.write_row(["apples", "3"], 0).unwrap();
///
/// let (path, name) = exporter.generate_file("fruit.xlsx", "Xlsx", true).unwrap();
/// assert_eq!(name, "fruit.xlsx");
/// assert!(path.ends_with("fruit.xlsx"));
/// ```
pub struct Exporter {
    config: ExporterConfig,
    document: DocumentState,
    cursors: Vec<Cursor>,
    buffer: BTreeMap<usize, Vec<Vec<CellValue>>>,
    format_hook: Option<Box<dyn FormatHook>>,
    generated: bool,
    artifact: Option<Artifact>,
}

impl Exporter {
    /// Create an exporter whose document has `config.initial_sheets` sheets
    pub fn new(config: ExporterConfig) -> ExportResult<Self> {
        let mut workbook = Workbook::new();
        for _ in 1..config.initial_sheets.max(1) {
            workbook.add_worksheet()?;
        }
        let cursors = vec![Cursor::new(); workbook.sheet_count()];

        Ok(Self {
            config,
            document: DocumentState::Attached(workbook),
            cursors,
            buffer: BTreeMap::new(),
            format_hook: None,
            generated: false,
            artifact: None,
        })
    }

    /// Append a worksheet, named `title` or `SheetN`; returns its index
    pub fn add_sheet(&mut self, title: Option<&str>) -> ExportResult<usize> {
        let workbook = self.document.workbook_mut("add a sheet")?;
        let index = match title {
            Some(title) => workbook.add_worksheet_with_name(title)?,
            None => workbook.add_worksheet()?,
        };
        self.cursors.push(Cursor::new());
        Ok(index)
    }

    /// Buffer a row for `sheet_index`.
    ///
    /// Nothing is written to the document until generation. The sheet index
    /// is checked here.
    pub fn write_row<I, V>(&mut self, data: I, sheet_index: usize) -> ExportResult<&mut Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        if !self.document.is_attached() {
            return Err(ExportError::Disconnected {
                operation: "write a row",
            });
        }
        self.check_index(sheet_index)?;

        let row: Vec<CellValue> = data.into_iter().map(Into::into).collect();
        self.buffer.entry(sheet_index).or_default().push(row);
        Ok(self)
    }

    /// Buffer several rows for `sheet_index`
    pub fn write_rows<R, I, V>(&mut self, rows: R, sheet_index: usize) -> ExportResult<&mut Self>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        for row in rows {
            self.write_row(row, sheet_index)?;
        }
        Ok(self)
    }

    /// Number of rows buffered for a sheet
    pub fn buffered_rows(&self, sheet_index: usize) -> usize {
        self.buffer.get(&sheet_index).map_or(0, Vec::len)
    }

    /// Load the buffered rows, format the document and write it to
    /// `{temp_path}/{filename}`.
    ///
    /// An empty `filename` falls back to the configured default name plus
    /// the format's extension, and an empty `format` to the configured
    /// default format. With `disconnect` the document is released once the
    /// file is written; generating again afterwards fails with
    /// [`ExportError::Disconnected`].
    pub fn generate_file(
        &mut self,
        filename: &str,
        format: &str,
        disconnect: bool,
    ) -> ExportResult<(PathBuf, String)> {
        let format = if format.is_empty() {
            ExportFormat::from_name(&self.config.default_format)?
        } else {
            ExportFormat::from_name(format)?
        };
        let workbook = self.document.workbook_mut("generate a file")?;

        for (&index, rows) in &self.buffer {
            let count = self.cursors.len();
            let cursor = self
                .cursors
                .get_mut(index)
                .ok_or(ExportError::InvalidSheetIndex { index, count })?;
            let worksheet = workbook
                .worksheet_mut(index)
                .ok_or(ExportError::InvalidSheetIndex { index, count })?;

            log::debug!("loading {} buffered row(s) into sheet {}", rows.len(), index);
            Sheet::new(index, cursor, worksheet).write_data(rows, self.config.value_binder)?;
        }

        if let Some(hook) = self.format_hook.as_mut() {
            hook.format(&mut FormatContext::new(workbook, &mut self.cursors))?;
        }

        // The first sheet is the one shown when the file is opened
        workbook.set_active_sheet(0)?;

        let file_name = if filename.is_empty() {
            format!("{}.{}", self.config.default_filename, format.extension())
        } else {
            filename.to_string()
        };
        let file_path = self.config.temp_path.join(&file_name);

        format.write_file(workbook, &file_path, &self.config.csv)?;
        log::info!("generated {} file {}", format, file_path.display());

        if disconnect {
            self.document.disconnect();
            log::debug!("document released after generation");
        }

        self.artifact = Some(Artifact {
            file_name: file_name.clone(),
            file_path: file_path.clone(),
            format,
        });
        self.generated = true;

        Ok((file_path, file_name))
    }

    /// Stream the generated file into `sink`, generating it first if needed.
    ///
    /// The sink receives the transfer metadata, then the file in chunks of
    /// at most `config.chunk_size` bytes. `filename` is the download name;
    /// when empty, the generated file's name is used. Returns the number of
    /// bytes streamed.
    ///
    /// `format` and `disconnect` only apply when a file has to be generated.
    /// Once one exists it is streamed as it is, in the format it was
    /// generated in; call [`Exporter::set_generated`] with `false` to build a
    /// new one.
    pub fn output_file<S>(
        &mut self,
        sink: &mut S,
        filename: &str,
        format: &str,
        disconnect: bool,
    ) -> ExportResult<u64>
    where
        S: OutputSink + ?Sized,
    {
        if !self.generated || self.artifact.is_none() {
            self.generate_file(filename, format, disconnect)?;
        }
        let Some(artifact) = self.artifact.as_ref() else {
            return Err(ExportError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                "no generated file to output",
            )));
        };

        let download_name = if filename.is_empty() {
            artifact.file_name.clone()
        } else {
            filename.to_string()
        };

        let mut file = File::open(&artifact.file_path)?;
        let metadata = TransferMetadata {
            content_type: artifact.format.content_type().to_string(),
            filename: download_name,
            content_length: file.metadata()?.len(),
        };

        sink.begin(&metadata).map_err(ExportError::Output)?;

        let mut chunk = vec![0u8; self.config.chunk_size.max(1)];
        let mut streamed = 0u64;
        loop {
            let read = read_chunk(&mut file, &mut chunk)?;
            if read == 0 {
                break;
            }
            sink.write_chunk(&chunk[..read])
                .map_err(ExportError::Output)?;
            streamed += read as u64;
        }

        sink.finish().map_err(ExportError::Output)?;
        log::debug!("streamed {} byte(s) of {}", streamed, metadata.filename);
        Ok(streamed)
    }

    /// View of one sheet
    pub fn sheet(&mut self, index: usize) -> ExportResult<Sheet<'_>> {
        self.check_index(index)?;
        let count = self.cursors.len();
        let workbook = self.document.workbook_mut("access a sheet")?;
        let worksheet = workbook
            .worksheet_mut(index)
            .ok_or(ExportError::InvalidSheetIndex { index, count })?;
        Ok(Sheet::new(index, &mut self.cursors[index], worksheet))
    }

    pub fn sheet_count(&self) -> usize {
        self.cursors.len()
    }

    /// Rename a worksheet
    pub fn set_worksheet_title(&mut self, title: &str, index: usize) -> ExportResult<&mut Self> {
        self.check_index(index)?;
        self.document
            .workbook_mut("set a worksheet title")?
            .rename_worksheet(index, title)?;
        Ok(self)
    }

    /// The document, until it is disconnected
    pub fn workbook(&self) -> ExportResult<&Workbook> {
        self.document.workbook("access the document")
    }

    /// Select the sheet shown when the file is opened.
    ///
    /// Generation selects the first sheet again after the format hook.
    pub fn set_active_sheet(&mut self, index: usize) -> ExportResult<&mut Self> {
        self.check_index(index)?;
        self.document
            .workbook_mut("set the active sheet")?
            .set_active_sheet(index)?;
        Ok(self)
    }

    /// Install the hook run between loading the rows and writing the file
    pub fn set_format_hook<H: FormatHook + 'static>(&mut self, hook: H) -> &mut Self {
        self.format_hook = Some(Box::new(hook));
        self
    }

    pub fn is_generated(&self) -> bool {
        self.generated
    }

    /// Mark the file as generated or not; `false` makes the next
    /// `output_file` generate again
    pub fn set_generated(&mut self, generated: bool) -> &mut Self {
        self.generated = generated;
        self
    }

    pub fn is_disconnected(&self) -> bool {
        !self.document.is_attached()
    }

    /// Name of the generated file
    pub fn file_name(&self) -> Option<&str> {
        self.artifact.as_ref().map(|a| a.file_name.as_str())
    }

    /// Path of the generated file
    pub fn file_path(&self) -> Option<&Path> {
        self.artifact.as_ref().map(|a| a.file_path.as_path())
    }

    pub fn temp_path(&self) -> &Path {
        &self.config.temp_path
    }

    pub fn config(&self) -> &ExporterConfig {
        &self.config
    }

    fn check_index(&self, index: usize) -> ExportResult<()> {
        if index < self.cursors.len() {
            Ok(())
        } else {
            Err(ExportError::InvalidSheetIndex {
                index,
                count: self.cursors.len(),
            })
        }
    }
}

/// Fill `buf` as far as the reader allows; 0 means end of file
fn read_chunk<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
