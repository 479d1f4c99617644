//! Delimited text to a row/column matrix, and bounded previews of it.

mod parse;
mod preview;

pub use parse::parse_rows;
pub use preview::{DEFAULT_PREVIEW_ROWS, build_preview, preview_to_markdown};

/// Decodes file bytes for [`parse_rows`]: lossy UTF-8, leading BOM removed.
pub fn decode_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_prefix('\u{feff}').unwrap_or(&*text).to_string()
}
