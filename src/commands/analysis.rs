use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::AnalysisArgs;
use crate::commands::session::load_dashboard;
use crate::engine::{ChartPoint, QoQPoint};
use crate::render::write_analysis;

#[derive(Debug, Serialize)]
struct AnalysisResponse<'a> {
    entity: &'a str,
    chart_series: &'a [ChartPoint],
    qoq_series: &'a [QoQPoint],
}

pub fn run(args: AnalysisArgs) -> Result<()> {
    let dashboard = load_dashboard(&args.source)?;

    let mut output = io::BufWriter::new(io::stdout().lock());
    if args.json {
        let response = AnalysisResponse {
            entity: &args.source.entity,
            chart_series: dashboard.chart_series(),
            qoq_series: dashboard.qoq_series(),
        };
        serde_json::to_writer_pretty(&mut output, &response)
            .context("failed to serialize analysis json output")?;
        writeln!(output)?;
    } else {
        write_analysis(&mut output, dashboard.chart_series(), dashboard.qoq_series())?;
    }
    output.flush()?;
    Ok(())
}
