//! Integration tests over the assembled datasets and the views built from them.
//!
//! These tests:
//! 1. Check the shape of every fixed dataset (lengths, keys, ordering)
//! 2. Exercise the keyed lookup, the stable sort and the policy join
//! 3. Render the full report under several filters
//!
//! Run with:
//! ```sh
//! cargo test --test integration_test
//! ```

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashSet;
use std::io::Write;
use tempfile::NamedTempFile;

use drom_dashboard::config::Config;
use drom_dashboard::dataset::*;
use drom_dashboard::filter::{resolve_filter, DashboardFilter, FilterSelection, FocusArea};
use drom_dashboard::report::write_report;
use drom_dashboard::view::{build_sections, Panel};

// =============================================================================
// Test Configuration
// =============================================================================

/// Random seed for reproducible shuffles
const RANDOM_SEED: u64 = 42;

/// Number of shuffled permutations checked per property
const SHUFFLE_ROUNDS: usize = 20;

/// Shared assembler - built once and reused for all tests
static DATA: Lazy<DatasetAssembler> = Lazy::new(DatasetAssembler::build);

fn render(filter: &DashboardFilter) -> String {
    let mut out = Vec::new();
    write_report(&mut out, &DATA, filter).expect("Failed to write report");
    String::from_utf8(out).expect("Report is valid UTF-8")
}

// =============================================================================
// Dataset Shape
// =============================================================================

#[test]
fn test_dataset_lengths() {
    assert_eq!(DATA.trend().len(), 24);
    assert_eq!(DATA.territories().len(), 9);
    assert_eq!(DATA.health().len(), 14);
    assert_eq!(DATA.social().len(), 14);
    assert_eq!(DATA.policies().len(), 8);
}

#[test]
fn test_keys_unique() {
    fn unique_years<T: YearKeyed>(rows: &[T]) -> usize {
        rows.iter().map(|r| r.year()).collect::<HashSet<_>>().len()
    }

    assert_eq!(unique_years(DATA.trend()), 24);
    assert_eq!(unique_years(DATA.health()), 14);
    assert_eq!(unique_years(DATA.social()), 14);

    let names: HashSet<_> = DATA.territories().iter().map(|t| t.name()).collect();
    assert_eq!(names.len(), 9);
}

#[test]
fn test_trend_ascending_without_gaps() {
    let years: Vec<i32> = DATA.trend().iter().map(|r| r.year).collect();
    assert_eq!(years, (2000..=2023).collect::<Vec<_>>());
}

#[test]
fn test_builds_are_value_equal() {
    assert_eq!(*DATA, DatasetAssembler::build());
    assert_eq!(build_yearly_trend(), build_yearly_trend());
    assert_eq!(build_territory_snapshot(), build_territory_snapshot());
    assert_eq!(build_health_impact(), build_health_impact());
    assert_eq!(build_social_indicators(), build_social_indicators());
    assert_eq!(build_policy_timeline(), build_policy_timeline());
}

// =============================================================================
// Queries
// =============================================================================

#[test]
fn test_select_health_by_year() {
    assert_eq!(select_by_year(DATA.health(), 2023).unwrap().death_count, 990);
    assert!(matches!(
        select_by_year(DATA.health(), 2009),
        Err(DatasetError::NotFound { year: 2009, .. })
    ));
}

#[test]
fn test_select_every_trend_year() {
    for year in 2000..=2023 {
        assert_eq!(select_by_year(DATA.trend(), year).unwrap().year, year);
    }
    assert!(select_by_year(DATA.trend(), 2024).is_err());
}

#[test]
fn test_territory_ranking_by_consumption() {
    let metric = TerritoryMetric::Consumption;
    let sorted = sort_by_column(DATA.territories(), |s| metric.value(s), true);
    assert_eq!(sorted.first().unwrap().name(), "Mayotte");
    assert_eq!(sorted.first().unwrap().consumption, 9.8);
    assert_eq!(sorted.last().unwrap().name(), "Saint-Barthélemy");
    assert_eq!(sorted.last().unwrap().consumption, 16.8);
}

#[test]
fn test_ranking_independent_of_input_order() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(RANDOM_SEED);
    let expected: Vec<&str> = sort_by_column(
        DATA.territories(),
        |s| TerritoryMetric::Mortality.value(s),
        false,
    )
    .iter()
    .map(|s| s.name())
    .collect();

    for _ in 0..SHUFFLE_ROUNDS {
        let mut shuffled = DATA.territories().to_vec();
        shuffled.shuffle(&mut rng);
        let sorted = sort_by_column(&shuffled, |s| TerritoryMetric::Mortality.value(s), false);
        let names: Vec<&str> = sorted.iter().map(|s| s.name()).collect();
        assert_eq!(names, expected);
    }
}

#[test]
fn test_select_independent_of_input_order() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(RANDOM_SEED);
    for _ in 0..SHUFFLE_ROUNDS {
        let mut shuffled = DATA.social().to_vec();
        shuffled.shuffle(&mut rng);
        let record = select_by_year(&shuffled, 2015).unwrap();
        assert_eq!(record.domestic_violence_count, 1750);
    }
}

#[test]
fn test_join_trend_with_policies() {
    let joined = DATA.trend_with_policies();

    let first = joined.first().unwrap();
    assert_eq!(first.0.year, 2000);
    assert!(first.1.is_none());

    let last = joined.iter().rfind(|(r, _)| r.year == 2023).unwrap();
    assert_eq!(last.1.unwrap().title, "Renforcement contrôles alcoolémie");

    let with_event = joined.iter().filter(|(_, e)| e.is_some()).count();
    assert_eq!(with_event, 8);

    let years: Vec<i32> = joined.iter().map(|(r, _)| r.year).collect();
    assert!(years.windows(2).all(|w| w[0] <= w[1]));
}

// =============================================================================
// Filters and Report
// =============================================================================

#[test]
fn test_full_report() {
    let text = render(&DashboardFilter::default());
    assert!(text.contains("Période 2000-2023 | 9 territoire(s)"));
    assert!(text.contains("Consommation d'alcool: 10.6L/pers/an (-0.4L vs moyenne nationale)"));
    assert!(text.contains("Renforcement contrôles alcoolémie"));
    assert!(text.contains("[Recommandations par territoire]"));
    assert!(text.contains("Objectif 2030: 8.5"));
}

#[test]
fn test_report_honors_filters() {
    let filter = resolve_filter(FilterSelection {
        from: Some(2010),
        to: Some(2015),
        territories: Some(vec!["Guyane".to_string(), "la-reunion".to_string()]),
        focus: Some(vec![FocusArea::Territories, FocusArea::Policies]),
        show_projections: Some(false),
    })
    .unwrap();
    let text = render(&filter);

    assert!(text.contains("Période 2010-2015 | 2 territoire(s)"));
    assert!(!text.contains("=== ÉVOLUTION ==="));
    assert!(text.contains("=== TERRITOIRES ==="));
    assert!(!text.contains("Mayotte"));
    assert!(!text.contains("Projection de la consommation"));
    // 2017 campaign is outside the period
    assert!(!text.contains("Alcool, parlons-en"));
    assert!(text.contains("Centres addictologie outre-mer"));
}

#[test]
fn test_sections_only_hold_selected_years() {
    let filter = resolve_filter(FilterSelection {
        from: Some(2005),
        to: Some(2008),
        ..Default::default()
    })
    .unwrap();

    for section in build_sections(&DATA, &filter) {
        if section.title != "Évolution" && section.title != "Politiques" {
            continue;
        }
        for tab in &section.tabs {
            for panel in &tab.panels {
                if let Panel::Chart(chart) = panel {
                    if chart.x_label != "Année" {
                        continue;
                    }
                    for series in &chart.series {
                        assert!(
                            series.points.iter().all(|(x, _)| (2005.0..=2008.0).contains(x)),
                            "{} / {}",
                            chart.title,
                            series.name
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_config_file_drives_filter() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(
        file,
        "[filters]\nfrom = 2012\nterritories = [\"Martinique\"]\nfocus = [\"health\"]\n"
    )
    .unwrap();

    let config = Config::load(Some(file.path())).unwrap();
    let cli = FilterSelection {
        to: Some(2020),
        ..Default::default()
    };
    let filter = resolve_filter(config.filters.merged_with(cli)).unwrap();

    assert_eq!(filter.years, 2012..=2020);
    assert_eq!(filter.territories, vec![Territory::Martinique]);
    assert_eq!(filter.focus, vec![FocusArea::Health]);

    let titles: Vec<String> = build_sections(&DATA, &filter)
        .into_iter()
        .map(|s| s.title)
        .collect();
    assert_eq!(titles, vec!["Évolution", "Stratégie", "Synthèse"]);
}
