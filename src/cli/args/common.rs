//! Common argument types

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON with metadata
    Json,
    /// Rounded table plus status counts
    #[default]
    Table,
    /// Status counts and totals only
    Summary,
    /// One block per record with coloured status
    Detailed,
    /// CSV file (see --csv-path)
    Csv,
}
