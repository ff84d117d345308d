use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::QuarterArgs;
use crate::commands::session::{load_dashboard, resolve_quarter};
use crate::render::write_overview;

pub fn run(args: QuarterArgs) -> Result<()> {
    let dashboard = load_dashboard(&args.source)?;
    let quarter = resolve_quarter(&dashboard, args.quarter.as_deref())?;
    let view = dashboard
        .select(quarter)
        .with_context(|| format!("failed to assemble overview for {quarter}"))?;

    info!(
        quarter,
        management_tone = view.management_tone.category.as_str(),
        qa_tone = view.qa_tone.category.as_str(),
        "assembled overview"
    );

    let mut output = io::BufWriter::new(io::stdout().lock());
    if args.json {
        serde_json::to_writer_pretty(&mut output, &view)
            .context("failed to serialize overview json output")?;
        writeln!(output)?;
    } else {
        write_overview(&mut output, &args.source.entity, &view)?;
    }
    output.flush()?;
    Ok(())
}
