//! Output sinks for streaming a generated file

use std::io::{self, Write};

/// Metadata announced before the file body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferMetadata {
    /// MIME type of the artifact
    pub content_type: String,
    /// Download name offered to the receiver
    pub filename: String,
    /// Size of the body in bytes
    pub content_length: u64,
}

impl TransferMetadata {
    /// Download headers, in the order they are sent
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Content-Description", "File Transfer".to_string()),
            ("Content-Type", self.content_type.clone()),
            (
                "Content-Disposition",
                format!("attachment; filename={}", self.filename),
            ),
            ("Content-Transfer-Encoding", "binary".to_string()),
            ("Expires", "0".to_string()),
            (
                "Cache-Control",
                "must-revalidate, post-check=0, pre-check=0".to_string(),
            ),
            ("Pragma", "public".to_string()),
            ("Content-Length", self.content_length.to_string()),
        ]
    }
}

/// Receiver of a streamed file.
///
/// `begin` is called once, then `write_chunk` for every chunk in order,
/// then `finish`.
pub trait OutputSink {
    fn begin(&mut self, metadata: &TransferMetadata) -> io::Result<()>;

    fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()>;

    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn begin(&mut self, metadata: &TransferMetadata) -> io::Result<()> {
        (**self).begin(metadata)
    }

    fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        (**self).write_chunk(chunk)
    }

    fn finish(&mut self) -> io::Result<()> {
        (**self).finish()
    }
}

/// Collects the whole transfer in memory
#[derive(Debug, Default)]
pub struct BufferSink {
    metadata: Option<TransferMetadata>,
    bytes: Vec<u8>,
    chunk_sizes: Vec<usize>,
    finished: bool,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn metadata(&self) -> Option<&TransferMetadata> {
        self.metadata.as_ref()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size of every chunk received, in order
    pub fn chunk_sizes(&self) -> &[usize] {
        &self.chunk_sizes
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl OutputSink for BufferSink {
    fn begin(&mut self, metadata: &TransferMetadata) -> io::Result<()> {
        self.metadata = Some(metadata.clone());
        self.bytes.clear();
        self.chunk_sizes.clear();
        self.finished = false;
        Ok(())
    }

    fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.bytes.extend_from_slice(chunk);
        self.chunk_sizes.push(chunk.len());
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.finished = true;
        Ok(())
    }
}

/// Writes the body to any writer and drops the metadata
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    inner: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> OutputSink for WriterSink<W> {
    fn begin(&mut self, _metadata: &TransferMetadata) -> io::Result<()> {
        Ok(())
    }

    fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.inner.write_all(chunk)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Writes the download headers, a blank line, then the body
/// (a CGI-style response)
#[derive(Debug)]
pub struct HeaderSink<W: Write> {
    inner: W,
}

impl<W: Write> HeaderSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> OutputSink for HeaderSink<W> {
    fn begin(&mut self, metadata: &TransferMetadata) -> io::Result<()> {
        for (name, value) in metadata.headers() {
            write!(self.inner, "{}: {}\r\n", name, value)?;
        }
        self.inner.write_all(b"\r\n")
    }

    fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.inner.write_all(chunk)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
