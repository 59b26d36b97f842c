//! File helpers shared by the commands.
//!
//! - Reading exported logs, with automatic `.zst` decompression
//! - Ensuring parent directories exist before file writes
//! - Sending command output to a file or to stdout
//!
//! ## Compressed File Support
//!
//! `read_text_auto` decompresses `.zst` inputs based on the file extension.
//! A leading UTF-8 BOM is stripped so the first CSV header cell matches.

use std::io::Write;
use std::path::Path;

/// Read text file with automatic .zst decompression detection.
///
/// # Example
///
/// ```rust,no_run
/// # use riverlog_cli::io_utils::read_text_auto;
///
/// let csv = read_text_auto("poker_now_log.csv").unwrap();
/// let compressed = read_text_auto("poker_now_log.csv.zst").unwrap();
/// ```
pub fn read_text_auto(path: &str) -> Result<String, String> {
    let mut content = if path.ends_with(".zst") {
        let comp = std::fs::read(path).map_err(|e| e.to_string())?;
        let dec = zstd::stream::decode_all(comp.as_slice()).map_err(|e| e.to_string())?;
        String::from_utf8(dec).map_err(|e| e.to_string())?
    } else {
        std::fs::read_to_string(path).map_err(|e| e.to_string())?
    };
    strip_utf8_bom(&mut content);
    Ok(content)
}

/// Ensure parent directory exists for given path, creating if needed.
pub fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
    }
    Ok(())
}

/// Writes `content` to `output` when given, otherwise to `out`.
pub fn write_output(output: Option<&str>, content: &str, out: &mut dyn Write) -> std::io::Result<()> {
    match output {
        Some(path) => {
            let path = Path::new(path);
            ensure_parent_dir(path).map_err(std::io::Error::other)?;
            std::fs::write(path, content)
        }
        None => out.write_all(content.as_bytes()),
    }
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}
