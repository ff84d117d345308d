use std::io::{self, Write};

use anyhow::Result;

use crate::cli::SourceArgs;
use crate::commands::session::load_dashboard;

pub fn run(args: SourceArgs) -> Result<()> {
    let dashboard = load_dashboard(&args)?;

    let mut output = io::BufWriter::new(io::stdout().lock());
    for quarter in dashboard.quarters() {
        writeln!(output, "{quarter}")?;
    }
    output.flush()?;
    Ok(())
}
