use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::warn;

use crate::cli::QuarterArgs;
use crate::commands::session::{load_dashboard, resolve_quarter};
use crate::render::write_transcript;

pub fn run(args: QuarterArgs) -> Result<()> {
    let dashboard = load_dashboard(&args.source)?;
    let quarter = resolve_quarter(&dashboard, args.quarter.as_deref())?;
    let view = dashboard
        .select(quarter)
        .with_context(|| format!("failed to assemble transcript view for {quarter}"))?;

    if view.transcript.is_none() {
        warn!(quarter, "transcript document has no entry for quarter");
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    if args.json {
        serde_json::to_writer_pretty(&mut output, &view.transcript)
            .context("failed to serialize transcript json output")?;
        writeln!(output)?;
    } else {
        write_transcript(&mut output, view.quarter, view.transcript)?;
    }
    output.flush()?;
    Ok(())
}
