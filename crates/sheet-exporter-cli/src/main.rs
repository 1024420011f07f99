//! sheet-export CLI - turn CSV data into spreadsheet files

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use sheet_exporter::prelude::*;
use sheet_exporter::{index_to_label, ExportFormat};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sheet-export")]
#[command(author, version, about = "Build XLSX, ODS or CSV files from CSV data")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert CSV inputs (one sheet each) into a spreadsheet file
    Convert {
        /// Input CSV files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file; the format follows its extension unless --format is given
        #[arg(short, long)]
        output: PathBuf,

        /// Output format (Xlsx, Ods, Csv or a legacy name such as Excel2007)
        #[arg(short, long)]
        format: Option<String>,

        /// Sheet titles, in input order
        #[arg(long, value_delimiter = ',')]
        titles: Vec<String>,

        /// Size columns to their content
        #[arg(long)]
        autosize: bool,

        /// Keep every input field as text instead of detecting numbers,
        /// booleans and percentages
        #[arg(long)]
        raw: bool,

        /// Input field delimiter
        #[arg(short, long, default_value = ",")]
        delimiter: char,
    },

    /// Build a spreadsheet from CSV inputs and write it to stdout
    Stream {
        /// Input CSV files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "Xlsx")]
        format: String,

        /// Download name announced in the headers
        #[arg(long)]
        filename: Option<String>,

        /// Prefix the body with download headers (CGI response)
        #[arg(long)]
        headers: bool,

        /// Input field delimiter
        #[arg(short, long, default_value = ",")]
        delimiter: char,
    },

    /// Convert between a column number and its letter label
    Column {
        /// A 1-based column number (28) or a label (AB)
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            inputs,
            output,
            format,
            titles,
            autosize,
            raw,
            delimiter,
        } => convert(
            &inputs,
            &output,
            format.as_deref(),
            &titles,
            autosize,
            raw,
            delimiter,
        ),
        Commands::Stream {
            inputs,
            format,
            filename,
            headers,
            delimiter,
        } => stream(&inputs, &format, filename.as_deref(), headers, delimiter),
        Commands::Column { value } => column(&value),
    }
}

fn convert(
    inputs: &[PathBuf],
    output: &Path,
    format: Option<&str>,
    titles: &[String],
    autosize: bool,
    raw: bool,
    delimiter: char,
) -> Result<()> {
    let format = match format {
        Some(name) => ExportFormat::from_name(name)?,
        None => {
            let extension = output
                .extension()
                .and_then(|e| e.to_str())
                .with_context(|| {
                    format!("Cannot tell the format of '{}'; pass --format", output.display())
                })?;
            ExportFormat::from_name(extension)?
        }
    };
    if titles.len() > inputs.len() {
        bail!("{} titles given for {} inputs", titles.len(), inputs.len());
    }

    let file_name = output
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Invalid output path '{}'", output.display()))?;
    let directory = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let binder = if raw {
        ValueBinder::Default
    } else {
        ValueBinder::Advanced
    };
    let config = ExporterConfig::new(directory)
        .with_initial_sheets(inputs.len())
        .with_value_binder(binder);
    let mut exporter = Exporter::new(config)?;

    if autosize {
        exporter.set_format_hook(AutoSizeColumns::default());
    }
    for (index, title) in titles.iter().enumerate() {
        exporter
            .set_worksheet_title(title, index)
            .with_context(|| format!("Invalid sheet title '{}'", title))?;
    }

    let mut total_rows = 0;
    for (index, input) in inputs.iter().enumerate() {
        total_rows += load_csv(&mut exporter, input, index, delimiter)?;
    }

    let (path, _) = exporter
        .generate_file(file_name, format.name(), true)
        .with_context(|| format!("Failed to write '{}'", output.display()))?;

    eprintln!(
        "Wrote {} rows in {} sheet(s) to '{}'",
        total_rows,
        inputs.len(),
        path.display()
    );
    Ok(())
}

fn stream(
    inputs: &[PathBuf],
    format: &str,
    filename: Option<&str>,
    headers: bool,
    delimiter: char,
) -> Result<()> {
    let format = ExportFormat::from_name(format)?;
    let work_dir = tempfile::tempdir().context("Failed to create a temporary directory")?;

    let config = ExporterConfig::new(work_dir.path()).with_initial_sheets(inputs.len());
    let mut exporter = Exporter::new(config)?;
    for (index, input) in inputs.iter().enumerate() {
        load_csv(&mut exporter, input, index, delimiter)?;
    }

    exporter.generate_file("", format.name(), true)?;

    let download_name = filename.unwrap_or("");
    let stdout = io::stdout();
    let streamed = if headers {
        let mut sink = HeaderSink::new(stdout.lock());
        exporter.output_file(&mut sink, download_name, format.name(), true)?
    } else {
        let mut sink = WriterSink::new(stdout.lock());
        exporter.output_file(&mut sink, download_name, format.name(), true)?
    };

    eprintln!("Streamed {} bytes", streamed);
    Ok(())
}

fn column(value: &str) -> Result<()> {
    let value = value.trim();
    if let Ok(index) = value.parse::<u64>() {
        if index == 0 {
            bail!("Column numbers start at 1");
        }
        println!("{}", index_to_label(index));
    } else {
        let label = ColumnLabel::parse(value)
            .with_context(|| format!("'{}' is neither a column number nor a label", value))?;
        if label.is_empty() {
            bail!("Empty column label");
        }
        println!("{}", label.index());
    }
    Ok(())
}

/// Buffer every record of a CSV file as a row of `sheet_index`
fn load_csv(
    exporter: &mut Exporter,
    input: &Path,
    sheet_index: usize,
    delimiter: char,
) -> Result<usize> {
    let delimiter = u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .with_context(|| format!("Delimiter '{}' is not an ASCII character", delimiter))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(input)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;

    let mut rows = 0;
    for record in reader.records() {
        let record =
            record.with_context(|| format!("Failed to read '{}'", input.display()))?;
        exporter.write_row(record.iter(), sheet_index)?;
        rows += 1;
    }

    Ok(rows)
}
