//! # Output Aggregator
//!
//! Every scan worker writes its results through a shared [`Output`]. Each call
//! hands the sink one contiguous buffer while holding the lock, so lines from
//! concurrent hosts may interleave with each other but never inside a line.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

type Sink = Box<dyn Write + Send>;

#[derive(Clone)]
pub struct Output {
    sink: Arc<Mutex<Sink>>,
}

impl Output {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            sink: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Writes `text` followed by a newline as a single write.
    pub fn line(&self, text: &str) {
        let mut buffer: String = String::with_capacity(text.len() + 1);
        buffer.push_str(text);
        buffer.push('\n');
        self.write_block(&buffer);
    }

    /// Writes `block` verbatim as a single write.
    pub fn write_block(&self, block: &str) {
        let mut sink = self.lock();
        if let Err(e) = sink.write_all(block.as_bytes()).and_then(|_| sink.flush()) {
            debug!("Failed to write output: {e}");
        }
    }

    fn lock(&self) -> MutexGuard<'_, Sink> {
        self.sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// An in-memory sink that records every write as a separate chunk.
///
/// Used to observe exactly what was written, and in how many writes.
#[derive(Clone, Default)]
pub struct Capture {
    chunks: Arc<Mutex<Vec<String>>>,
}

impl Capture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chunks(&self) -> Vec<String> {
        self.chunks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Everything written so far, concatenated.
    pub fn contents(&self) -> String {
        self.chunks().concat()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.chunks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(String::from_utf8_lossy(buf).into_owned());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
