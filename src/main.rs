use anyhow::Result;
use drom_dashboard::{
    cli::{Cli, Commands},
    config::Config,
    dataset::{DatasetAssembler, DatasetKind},
    filter::resolve_filter,
    logging,
    report::{self, ShowOptions},
    ui::{DashboardApp, DashboardState},
};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info};

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let config = Config::load(cli.config.as_deref())?;

    let interactive = matches!(cli.command, Commands::Dashboard { .. });
    logging::init(&config.logging, cli.verbose, interactive)?;
    match &config.source {
        Some(path) => info!("Loaded configuration from {:?}", path),
        None => debug!("No configuration file, using defaults"),
    }

    match cli.command {
        Commands::Dashboard { filters, refresh } => {
            let selection = config.filters.clone().merged_with(filters.selection());
            let filter = resolve_filter(selection)?;

            // An explicit --refresh 0 disables the timer set in the config
            let refresh = match refresh {
                Some(secs) => (secs > 0).then(|| Duration::from_secs(secs)),
                None => config.dashboard.refresh_interval(),
            };

            let state = DashboardState::new(filter, refresh)?;
            DashboardApp::new(state)?.run()?;
        }

        Commands::Report { filters } => {
            let start = Instant::now();
            let selection = config.filters.clone().merged_with(filters.selection());
            let filter = resolve_filter(selection)?;

            let data = DatasetAssembler::build();
            let mut stdout = io::stdout().lock();
            report::write_report(&mut stdout, &data, &filter)?;
            stdout.flush()?;

            info!("Report written in {:.1}ms", start.elapsed().as_secs_f64() * 1000.0);
        }

        Commands::Show {
            dataset,
            year,
            sort_by,
            desc,
            json,
        } => {
            let data = DatasetAssembler::build();
            let options = ShowOptions {
                year,
                sort_by,
                descending: desc,
                json,
            };
            let mut stdout = io::stdout().lock();
            report::show_dataset(&mut stdout, &data, dataset, options)?;
            stdout.flush()?;
        }

        Commands::ListDatasets => {
            println!("Available datasets:\n");
            for kind in DatasetKind::ALL {
                println!("  {:<12} {}", kind.name(), kind.description());
            }
        }
    }

    Ok(())
}
