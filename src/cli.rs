use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "earnings-signals",
    version,
    about = "Earnings call sentiment signals and transcripts for one entity"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download both documents and store them in the cache.
    Fetch(FetchArgs),
    /// List quarters in declared order.
    Quarters(SourceArgs),
    /// Tone and sentiment breakdown for one quarter.
    Overview(QuarterArgs),
    /// Sentiment trend series and quarter-over-quarter tone changes.
    Analysis(AnalysisArgs),
    /// Prepared remarks and Q&A for one quarter.
    Transcript(QuarterArgs),
    /// Report what the cache holds for an entity.
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    #[arg(long, env = "EARNINGS_ENTITY", default_value = "nvda")]
    pub entity: String,

    #[arg(long, default_value = ".cache/earnings")]
    pub cache_root: PathBuf,

    /// Read documents from the analysis service instead of the cache.
    #[arg(long, env = "EARNINGS_BASE_URL")]
    pub base_url: Option<String>,

    #[arg(long, default_value_t = 10_000)]
    pub timeout_ms: u64,
}

impl SourceArgs {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Args, Debug, Clone)]
pub struct QuarterArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Defaults to the first declared quarter.
    #[arg(long)]
    pub quarter: Option<String>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct AnalysisArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// `--base-url` is required here; documents are read from the service
    /// and written to `--cache-root`.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Fetch and validate without writing to the cache.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, env = "EARNINGS_ENTITY", default_value = "nvda")]
    pub entity: String,

    #[arg(long, default_value = ".cache/earnings")]
    pub cache_root: PathBuf,
}
