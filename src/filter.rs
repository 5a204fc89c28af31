use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::{debug, info};

use crate::dataset::{filter_years, TerritorySnapshot, Territory, YearKeyed, TREND_YEARS};

/// Dashboard domains a user can choose to display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FocusArea {
    Consumption,
    Health,
    Social,
    Policies,
    Territories,
}

impl FocusArea {
    pub const ALL: [FocusArea; 5] = [
        FocusArea::Consumption,
        FocusArea::Health,
        FocusArea::Social,
        FocusArea::Policies,
        FocusArea::Territories,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FocusArea::Consumption => "Consommation",
            FocusArea::Health => "Santé",
            FocusArea::Social => "Social",
            FocusArea::Policies => "Politiques",
            FocusArea::Territories => "Territoires",
        }
    }
}

/// Raw, unvalidated filter choices merged from the config file and the command line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    pub from: Option<i32>,
    pub to: Option<i32>,
    pub territories: Option<Vec<String>>,
    pub focus: Option<Vec<FocusArea>>,
    pub show_projections: Option<bool>,
}

impl FilterSelection {
    /// Values set in `other` win over values set in `self`
    pub fn merged_with(self, other: FilterSelection) -> FilterSelection {
        FilterSelection {
            from: other.from.or(self.from),
            to: other.to.or(self.to),
            territories: other.territories.or(self.territories),
            focus: other.focus.or(self.focus),
            show_projections: other.show_projections.or(self.show_projections),
        }
    }
}

/// Validated filter applied to every dashboard view
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardFilter {
    pub years: RangeInclusive<i32>,
    /// Selected territories in canonical order
    pub territories: Vec<Territory>,
    pub focus: Vec<FocusArea>,
    pub show_projections: bool,
}

impl Default for DashboardFilter {
    fn default() -> Self {
        Self {
            years: TREND_YEARS.0..=TREND_YEARS.1,
            territories: Territory::ALL.to_vec(),
            focus: FocusArea::ALL.to_vec(),
            show_projections: true,
        }
    }
}

impl DashboardFilter {
    pub fn first_year(&self) -> i32 {
        *self.years.start()
    }

    pub fn last_year(&self) -> i32 {
        *self.years.end()
    }

    pub fn has_focus(&self, area: FocusArea) -> bool {
        self.focus.contains(&area)
    }

    pub fn includes_territory(&self, territory: Territory) -> bool {
        self.territories.contains(&territory)
    }

    /// Restrict a year-keyed dataset to the selected period
    pub fn years_of<T: YearKeyed + Clone>(&self, rows: &[T]) -> Vec<T> {
        filter_years(rows, &self.years)
    }

    /// Restrict territory snapshots to the selected territories
    pub fn territories_of(&self, rows: &[TerritorySnapshot]) -> Vec<TerritorySnapshot> {
        rows.iter()
            .filter(|row| self.includes_territory(row.territory))
            .cloned()
            .collect()
    }
}

/// Validates a filter selection, filling unset choices with defaults
pub fn resolve_filter(selection: FilterSelection) -> Result<DashboardFilter> {
    let defaults = DashboardFilter::default();
    let (min_year, max_year) = TREND_YEARS;

    let from = selection.from.unwrap_or(min_year);
    let to = selection.to.unwrap_or(max_year);
    for year in [from, to] {
        if !(min_year..=max_year).contains(&year) {
            bail!(
                "Year {} is outside the available period {}-{}",
                year,
                min_year,
                max_year
            );
        }
    }
    if from > to {
        bail!("Start year {} is after end year {}", from, to);
    }

    let territories = match selection.territories {
        None => defaults.territories,
        Some(names) if names.is_empty() => {
            bail!("At least one territory must be selected");
        }
        Some(names) => {
            let mut selected = Vec::with_capacity(names.len());
            for name in &names {
                selected.push(name.parse::<Territory>().map_err(|e| anyhow!(e))?);
            }
            selected.sort();
            selected.dedup();
            info!("Including {} territories", selected.len());
            for t in &selected {
                debug!("  - {}", t);
            }
            selected
        }
    };

    let focus = match selection.focus {
        None => defaults.focus,
        Some(areas) if areas.is_empty() => {
            bail!("At least one focus area must be selected");
        }
        Some(areas) => FocusArea::ALL
            .iter()
            .copied()
            .filter(|area| areas.contains(area))
            .collect(),
    };

    Ok(DashboardFilter {
        years: from..=to,
        territories,
        focus,
        show_projections: selection.show_projections.unwrap_or(defaults.show_projections),
    })
}
