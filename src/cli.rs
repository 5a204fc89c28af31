use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::dataset::{DatasetKind, TerritoryMetric};
use crate::filter::{FilterSelection, FocusArea};

#[derive(Parser, Debug)]
#[command(name = "drom-dashboard")]
#[command(version, about = "Alcohol consumption statistics for the French overseas territories")]
pub struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long, global = true, env = "DROM_DASHBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive terminal dashboard
    Dashboard {
        #[command(flatten)]
        filters: FilterArgs,

        /// Rebuild the dashboard every N seconds
        #[arg(long, value_name = "SECS")]
        refresh: Option<u64>,
    },

    /// Print every dashboard section as plain text
    Report {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Print a single dataset
    Show {
        #[arg(value_enum)]
        dataset: DatasetKind,

        /// Only the record for this year
        #[arg(short, long)]
        year: Option<i32>,

        /// Rank territories by this metric (territories dataset only)
        #[arg(short, long, value_enum)]
        sort_by: Option<TerritoryMetric>,

        /// Sort in descending order
        #[arg(long, requires = "sort_by")]
        desc: bool,

        /// Output JSON instead of a text table
        #[arg(long)]
        json: bool,
    },

    /// List all available dataset names
    ListDatasets,
}

/// Filters shared by the dashboard and the report
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// First year of the analysis period
    #[arg(long)]
    pub from: Option<i32>,

    /// Last year of the analysis period
    #[arg(long)]
    pub to: Option<i32>,

    /// Territories to include (comma-separated names or slugs)
    #[arg(short, long, value_delimiter = ',')]
    pub territories: Option<Vec<String>>,

    /// Focus areas to display (comma-separated)
    #[arg(short, long, value_enum, value_delimiter = ',')]
    pub focus: Option<Vec<FocusArea>>,

    /// Hide the 2030 projection chart
    #[arg(long)]
    pub no_projections: bool,
}

impl FilterArgs {
    pub fn selection(&self) -> FilterSelection {
        FilterSelection {
            from: self.from,
            to: self.to,
            territories: self.territories.clone(),
            focus: self.focus.clone(),
            show_projections: if self.no_projections { Some(false) } else { None },
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dashboard_filters() {
        let cli = Cli::try_parse_from([
            "drom-dashboard",
            "dashboard",
            "--from",
            "2010",
            "--territories",
            "guadeloupe,mayotte",
            "--focus",
            "health,policies",
            "--no-projections",
            "--refresh",
            "60",
        ])
        .unwrap();

        match cli.command {
            Commands::Dashboard { filters, refresh } => {
                let selection = filters.selection();
                assert_eq!(selection.from, Some(2010));
                assert_eq!(selection.to, None);
                assert_eq!(
                    selection.territories,
                    Some(vec!["guadeloupe".to_string(), "mayotte".to_string()])
                );
                assert_eq!(
                    selection.focus,
                    Some(vec![FocusArea::Health, FocusArea::Policies])
                );
                assert_eq!(selection.show_projections, Some(false));
                assert_eq!(refresh, Some(60));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_show() {
        let cli = Cli::try_parse_from([
            "drom-dashboard",
            "-vv",
            "show",
            "territories",
            "--sort-by",
            "binge",
            "--desc",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Show {
                dataset,
                sort_by,
                desc,
                json,
                year,
            } => {
                assert_eq!(dataset, DatasetKind::Territories);
                assert_eq!(sort_by, Some(TerritoryMetric::Binge));
                assert!(desc);
                assert!(!json);
                assert_eq!(year, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_desc_requires_sort_by() {
        assert!(Cli::try_parse_from(["drom-dashboard", "show", "trend", "--desc"]).is_err());
    }

    #[test]
    fn test_no_projections_flag_absent() {
        let cli = Cli::try_parse_from(["drom-dashboard", "report"]).unwrap();
        match cli.command {
            Commands::Report { filters } => {
                assert_eq!(filters.selection(), FilterSelection::default());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
