//! CLI definition and command handlers

use std::path::PathBuf;

use clap::Parser;

pub mod args;
pub mod cache;
pub mod context;
pub mod progress;
pub mod report;

pub use args::{CacheArgs, FilterArgs, OutputFormat, PaginationArgs};
pub use context::CommandContext;

/// Default CSV export file
pub const DEFAULT_CSV_PATH: &str = "report_results.csv";

/// rpalert - query ReportPortal launches and failed tests
#[derive(Parser, Debug)]
#[command(name = "rpalert")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// ReportPortal project name (e.g. PROW)
    #[arg(required_unless_present_any = ["cache_info", "reset_cache"])]
    pub project: Option<String>,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub pagination: PaginationArgs,

    /// Output format
    #[arg(
        long,
        short = 'o',
        value_enum,
        default_value = "table",
        env = "RPALERT_OUTPUT",
        hide_env = true
    )]
    pub output: OutputFormat,

    /// List failed tests of the matching launches instead of the launches
    #[arg(long)]
    pub failed_tests: bool,

    /// Only inspect this launch (implies --failed-tests)
    #[arg(long)]
    pub launch_id: Option<String>,

    /// Failed test name contains (case-insensitive)
    #[arg(long, visible_alias = "tn")]
    pub test_name: Option<String>,

    #[command(flatten)]
    pub cache: CacheArgs,

    /// Disable TLS certificate verification
    #[arg(long)]
    pub no_verify: bool,

    /// Config file (JSON or YAML; defaults to ./config.json)
    #[arg(long, env = "RPALERT_CONFIG", hide_env = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, env = "RPALERT_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Destination of --output csv
    #[arg(long, default_value = DEFAULT_CSV_PATH)]
    pub csv_path: PathBuf,
}

impl Cli {
    /// Whether failed tests (rather than launches) are reported
    pub fn failed_tests_mode(&self) -> bool {
        self.failed_tests || self.launch_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::LaunchFilters;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_full_invocation() {
        let cli = Cli::try_parse_from([
            "rpalert",
            "PROW",
            "-n",
            "nightly",
            "-s",
            "failed",
            "--attr",
            "env=prod",
            "--attr",
            "team=core,os=linux",
            "-p",
            "2",
            "-l",
            "20",
            "-o",
            "csv",
            "--tn",
            "login",
            "--cache-hours",
            "1.5",
        ])
        .unwrap();

        assert_eq!(cli.project.as_deref(), Some("PROW"));
        assert_eq!(cli.filters.name_excludes.as_deref(), Some("nightly"));
        assert_eq!(cli.filters.attributes, vec!["env=prod", "team=core", "os=linux"]);
        assert_eq!(cli.pagination.page, 2);
        assert_eq!(cli.pagination.limit, 20);
        assert_eq!(cli.output, OutputFormat::Csv);
        assert_eq!(cli.test_name.as_deref(), Some("login"));
        assert_eq!(cli.cache.cache_hours, 1.5);
        assert_eq!(cli.csv_path, PathBuf::from(DEFAULT_CSV_PATH));
        assert!(!cli.failed_tests_mode());
    }

    #[test]
    fn test_project_optional_for_cache_info() {
        let cli = Cli::try_parse_from(["rpalert", "--cache-info"]).unwrap();
        assert!(cli.project.is_none());

        assert!(Cli::try_parse_from(["rpalert"]).is_err());
    }

    #[test]
    fn test_launch_id_implies_failed_tests() {
        let cli = Cli::try_parse_from(["rpalert", "PROW", "--launch-id", "42"]).unwrap();
        assert!(cli.failed_tests_mode());
    }

    #[test]
    fn test_short_name_flag_excludes() {
        let cli = Cli::try_parse_from(["rpalert", "PROW", "-n", "nightly"]).unwrap();
        let params = LaunchFilters::from_intents(&cli.filters.to_intents())
            .unwrap()
            .to_query_params();

        assert_eq!(
            params,
            vec![("filter.!cnt.name".to_string(), "nightly".to_string())]
        );
    }

    #[test]
    fn test_name_contains_flag() {
        let cli = Cli::try_parse_from([
            "rpalert",
            "PROW",
            "--name-contains",
            "regression",
            "--name",
            "flaky",
        ])
        .unwrap();
        let params = LaunchFilters::from_intents(&cli.filters.to_intents())
            .unwrap()
            .to_query_params();

        assert_eq!(
            params,
            vec![
                ("filter.cnt.name".to_string(), "regression".to_string()),
                ("filter.!cnt.name".to_string(), "flaky".to_string()),
            ]
        );
    }
}
