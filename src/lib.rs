pub mod cli;
pub mod config;
pub mod dataset;
pub mod filter;
pub mod logging;
pub mod report;
pub mod ui;
pub mod view;

pub use cli::{Cli, Commands};
pub use dataset::DatasetAssembler;
pub use filter::{resolve_filter, DashboardFilter, FilterSelection};
pub use ui::{DashboardApp, DashboardState};
