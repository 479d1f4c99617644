use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::{PreviewArgs, PreviewFormat};
use crate::tabular::{build_preview, decode_text, parse_rows, preview_to_markdown};
use crate::util::{read_input, to_json_pretty};

pub fn run(args: PreviewArgs) -> Result<()> {
    let raw = read_input(&args.csv)?;
    let rows = parse_rows(&decode_text(&raw));

    let Some(preview) = build_preview(&rows, args.max_rows) else {
        warn!(path = %args.csv.display(), "no rows to preview");
        return Ok(());
    };

    info!(
        path = %args.csv.display(),
        columns = preview.header.len(),
        rows = preview.total_rows,
        shown = preview.rows.len(),
        "parsed table"
    );

    let rendered = match args.format {
        PreviewFormat::Markdown => format!("{}\n", preview_to_markdown(&preview)).into_bytes(),
        PreviewFormat::Json => to_json_pretty(&preview)?,
    };
    io::stdout()
        .write_all(&rendered)
        .context("failed to write preview to stdout")?;

    Ok(())
}
