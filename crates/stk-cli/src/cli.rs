use clap::Parser;

/// Top-level CLI parser for the `stk` binary.
#[derive(Debug, Parser)]
#[command(
    name = "stk",
    version,
    about = "stocktake - audit every repository of a GitHub user or org into a spreadsheet"
)]
pub struct Cli {
    /// GitHub user or organization to audit
    pub owner: String,

    /// Treat the owner as an organization
    #[arg(long)]
    pub org: bool,

    /// Chapter (university) label written into every row
    #[arg(long)]
    pub chapter: Option<String>,

    /// Spreadsheet sink POST endpoint (falls back to configuration)
    #[arg(long)]
    pub sheet_url: Option<String>,

    /// Spreadsheet sink bearer token (falls back to configuration)
    #[arg(long)]
    pub sheet_token: Option<String>,

    /// Pause between repositories, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}
