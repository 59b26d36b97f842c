use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::hand::Hand;

/// Writes parsed hands as JSONL, one hand per line.
///
/// This is the hand-off to whatever persists the hands; nothing is added to
/// or removed from the records on the way out.
pub struct HandLogger<W: Write> {
    writer: W,
    written: usize,
}

impl HandLogger<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self::new(BufWriter::new(f)))
    }
}

impl<W: Write> HandLogger<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn write(&mut self, hand: &Hand) -> std::io::Result<()> {
        let line = serde_json::to_string(hand).map_err(std::io::Error::other)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    pub fn write_all(&mut self, hands: &[Hand]) -> std::io::Result<()> {
        for hand in hands {
            self.write(hand)?;
        }
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Reads hands back from JSONL text, skipping blank lines.
pub fn read_jsonl(content: &str) -> Result<Vec<Hand>, serde_json::Error> {
    content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str::<Hand>(l))
        .collect()
}
