//! Plain-text output: the full dashboard report and single-dataset printing

use anyhow::{bail, Result};
use serde::Serialize;
use std::io::Write;
use tracing::debug;

use crate::dataset::*;
use crate::filter::DashboardFilter;
use crate::view::{self, format_number, format_thousands, Metric, Panel, Section};

const BAR_WIDTH: usize = 30;

/// Left-aligned text table with a header separator
pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| {
                let pad = width - cell.chars().count().min(width);
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = line(headers);
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    out.push('\n');
    for row in rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out
}

fn write_metrics(out: &mut impl Write, metrics: &[Metric]) -> Result<()> {
    writeln!(out, "INDICATEURS CLÉS")?;
    for m in metrics {
        writeln!(out, "  {}: {} ({})", m.label, m.value, m.delta)?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_panel(out: &mut impl Write, panel: &Panel) -> Result<()> {
    writeln!(out, "[{}]", panel.title())?;
    match panel {
        Panel::Chart(chart) => {
            if chart.is_empty() {
                writeln!(out, "  (aucune donnée sur la période)")?;
            }
            for series in chart.series.iter().filter(|s| !s.points.is_empty()) {
                let values: Vec<String> = series
                    .points
                    .iter()
                    .map(|(x, y)| format!("{}={}", format_number(*x), format_number(*y)))
                    .collect();
                writeln!(out, "  {}: {}", series.name, values.join(", "))?;
            }
            if let Some(guide) = &chart.guide {
                writeln!(out, "  {}: {}", guide.label, format_number(guide.value))?;
            }
        }
        Panel::Bars(bars) => {
            let max = bars.bars.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
            let label_width = bars
                .bars
                .iter()
                .map(|(l, _)| l.chars().count())
                .max()
                .unwrap_or(0);
            for (label, value) in &bars.bars {
                let len = if max > 0.0 {
                    ((value / max) * BAR_WIDTH as f64).round() as usize
                } else {
                    0
                };
                let pad = label_width - label.chars().count();
                writeln!(
                    out,
                    "  {}{} {} {} {}",
                    label,
                    " ".repeat(pad),
                    "█".repeat(len),
                    format_number(*value),
                    bars.unit
                )?;
            }
        }
        Panel::Map(map) => {
            let headers = vec![
                "Territoire".to_string(),
                "Latitude".to_string(),
                "Longitude".to_string(),
                map.unit.clone(),
            ];
            let rows: Vec<Vec<String>> = map
                .markers
                .iter()
                .map(|m| {
                    vec![
                        m.label.clone(),
                        format!("{:.3}", m.lat),
                        format!("{:.3}", m.lon),
                        format_number(m.value),
                    ]
                })
                .collect();
            write!(out, "{}", render_table(&headers, &rows))?;
        }
        Panel::Table(table) => {
            write!(out, "{}", render_table(&table.headers, &table.rows))?;
        }
        Panel::Text(text) => {
            for section in &text.sections {
                writeln!(out, "  {}", section.heading)?;
                for item in &section.items {
                    writeln!(out, "    • {}", item)?;
                }
            }
        }
    }
    writeln!(out)?;
    Ok(())
}

pub fn write_sections(out: &mut impl Write, sections: &[Section]) -> Result<()> {
    for section in sections {
        writeln!(out, "=== {} ===", section.title.to_uppercase())?;
        for tab in &section.tabs {
            writeln!(out, "--- {} ---", tab.title)?;
            for panel in &tab.panels {
                write_panel(out, panel)?;
            }
        }
    }
    Ok(())
}

/// Write the key metrics and every visible section
pub fn write_report(
    out: &mut impl Write,
    data: &DatasetAssembler,
    filter: &DashboardFilter,
) -> Result<()> {
    writeln!(out, "ALCOOLISME DANS LES DROM-COM - DASHBOARD STRATÉGIQUE")?;
    writeln!(
        out,
        "Période {}-{} | {} territoire(s)\n",
        filter.first_year(),
        filter.last_year(),
        filter.territories.len()
    )?;
    write_metrics(out, &view::key_metrics(data, filter)?)?;
    let sections = view::build_sections(data, filter);
    debug!("Rendering {} sections", sections.len());
    write_sections(out, &sections)
}

// =============================================================================
// Dataset printing
// =============================================================================

/// Records that can be printed as a text table
pub trait TabularRecord {
    fn headers() -> Vec<&'static str>;
    fn cells(&self) -> Vec<String>;
}

impl TabularRecord for YearlyTrendRecord {
    fn headers() -> Vec<&'static str> {
        vec![
            "year",
            "consumption",
            "binge_rate",
            "dependence_rate",
            "first_intoxication_age",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.year.to_string(),
            format!("{:.1}", self.consumption),
            format!("{:.1}", self.binge_rate),
            format!("{:.1}", self.dependence_rate),
            format!("{:.1}", self.first_intoxication_age),
        ]
    }
}

impl TabularRecord for TerritorySnapshot {
    fn headers() -> Vec<&'static str> {
        vec![
            "territory",
            "consumption",
            "binge_rate",
            "dependence_rate",
            "occasional_intoxication_rate",
            "mortality_per_100k",
            "treatment_access_rate",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name().to_string(),
            format!("{:.1}", self.consumption),
            format!("{:.1}", self.binge_rate),
            format!("{:.1}", self.dependence_rate),
            format!("{:.1}", self.occasional_intoxication_rate),
            format!("{:.1}", self.mortality_per_100k),
            format!("{:.1}", self.treatment_access_rate),
        ]
    }
}

impl TabularRecord for HealthImpactRecord {
    fn headers() -> Vec<&'static str> {
        vec![
            "year",
            "deaths",
            "hospitalizations",
            "digestive_cancers",
            "cirrhoses",
            "road_accidents",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.year.to_string(),
            format_thousands(self.death_count as i64),
            format_thousands(self.hospitalization_count as i64),
            format_thousands(self.digestive_cancer_count as i64),
            format_thousands(self.cirrhosis_count as i64),
            format_thousands(self.road_accident_count as i64),
        ]
    }
}

impl TabularRecord for SocialIndicatorRecord {
    fn headers() -> Vec<&'static str> {
        vec![
            "year",
            "domestic_violence",
            "intoxication_arrests",
            "work_absenteeism_rate",
            "school_problem_rate",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.year.to_string(),
            format_thousands(self.domestic_violence_count as i64),
            format_thousands(self.intoxication_arrest_count as i64),
            format!("{:.1}", self.work_absenteeism_rate),
            format!("{:.1}", self.school_problem_rate),
        ]
    }
}

impl TabularRecord for PolicyEvent {
    fn headers() -> Vec<&'static str> {
        vec!["date", "category", "title", "description"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.date.to_string(),
            self.category.label().to_string(),
            self.title.to_string(),
            self.description.to_string(),
        ]
    }
}

impl TabularRecord for ProjectionPoint {
    fn headers() -> Vec<&'static str> {
        vec!["year", "consumption"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.year.to_string(), format!("{:.1}", self.consumption)]
    }
}

impl TabularRecord for StrategyAssessment {
    fn headers() -> Vec<&'static str> {
        vec!["strategy", "efficacy", "cost", "acceptability"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.to_string(),
            format!("{:.1}", self.efficacy),
            self.cost.to_string(),
            self.acceptability.to_string(),
        ]
    }
}

impl TabularRecord for IndicatorTarget {
    fn headers() -> Vec<&'static str> {
        vec!["indicator", "target_2025", "target_2030"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.indicator.to_string(),
            format_number(self.target_2025),
            format_number(self.target_2030),
        ]
    }
}

fn emit<T: TabularRecord + Serialize>(out: &mut impl Write, rows: &[T], json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, rows)?;
        writeln!(out)?;
    } else {
        let headers: Vec<String> = T::headers().iter().map(|h| h.to_string()).collect();
        let cells: Vec<Vec<String>> = rows.iter().map(|r| r.cells()).collect();
        write!(out, "{}", render_table(&headers, &cells))?;
    }
    Ok(())
}

/// Rows of a year-keyed dataset, or the single record of `year`
fn by_year<T: YearKeyed + Clone>(rows: Vec<T>, year: Option<i32>) -> Result<Vec<T>> {
    match year {
        None => Ok(rows),
        Some(year) => Ok(vec![select_by_year(&rows, year)?.clone()]),
    }
}

/// Options of the `show` command
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowOptions {
    pub year: Option<i32>,
    pub sort_by: Option<TerritoryMetric>,
    pub descending: bool,
    pub json: bool,
}

pub fn show_dataset(
    out: &mut impl Write,
    data: &DatasetAssembler,
    kind: DatasetKind,
    options: ShowOptions,
) -> Result<()> {
    if options.year.is_some() && !kind.is_year_keyed() {
        bail!("Dataset '{}' is not indexed by year", kind.name());
    }
    if options.sort_by.is_some() && kind != DatasetKind::Territories {
        bail!("--sort-by only applies to the territories dataset");
    }
    let json = options.json;

    match kind {
        DatasetKind::Trend => emit(out, &by_year(data.trend().to_vec(), options.year)?, json),
        DatasetKind::Health => emit(out, &by_year(data.health().to_vec(), options.year)?, json),
        DatasetKind::Social => emit(out, &by_year(data.social().to_vec(), options.year)?, json),
        DatasetKind::Projection => emit(
            out,
            &by_year(build_consumption_projection(), options.year)?,
            json,
        ),
        DatasetKind::Policies => {
            let events = match options.year {
                None => data.policies().to_vec(),
                Some(year) => {
                    // Several events may share a year
                    let events = filter_years(data.policies(), &(year..=year));
                    if events.is_empty() {
                        return Err(DatasetError::NotFound {
                            dataset: PolicyEvent::DATASET,
                            year,
                        }
                        .into());
                    }
                    events
                }
            };
            emit(out, &events, json)
        }
        DatasetKind::Territories => {
            let rows = match options.sort_by {
                Some(metric) => {
                    sort_by_column(data.territories(), |s| metric.value(s), !options.descending)
                }
                None => data.territories().to_vec(),
            };
            emit(out, &rows, json)
        }
        DatasetKind::Strategies => emit(out, &build_strategy_assessments(), json),
        DatasetKind::Targets => emit(out, &build_indicator_targets(), json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(kind: DatasetKind, options: ShowOptions) -> Result<String> {
        let mut out = Vec::new();
        show_dataset(&mut out, &DatasetAssembler::build(), kind, options)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_render_table_aligns_unicode() {
        let table = render_table(
            &["Nom".to_string(), "Valeur".to_string()],
            &[
                vec!["Réunion".to_string(), "1".to_string()],
                vec!["Mayotte-long".to_string(), "22".to_string()],
            ],
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Nom           Valeur");
        assert_eq!(lines[1], "------------  ------");
        assert_eq!(lines[2], "Réunion       1");
        assert_eq!(lines[3], "Mayotte-long  22");
    }

    #[test]
    fn test_show_health_year() {
        let out = show(
            DatasetKind::Health,
            ShowOptions {
                year: Some(2023),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(out.lines().count(), 3);
        assert!(out.contains("990"));
        assert!(out.contains("15 900"));
    }

    #[test]
    fn test_show_missing_year() {
        let err = show(
            DatasetKind::Health,
            ShowOptions {
                year: Some(2009),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(err.downcast_ref::<DatasetError>().is_some());
    }

    #[test]
    fn test_show_policies_json() {
        let out = show(
            DatasetKind::Policies,
            ShowOptions {
                year: Some(2023),
                json: true,
                ..Default::default()
            },
        )
        .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["date"], "2023-01-01");
        assert_eq!(parsed[0]["category"], "regulation");
        assert_eq!(parsed[0]["title"], "Renforcement contrôles alcoolémie");
    }

    #[test]
    fn test_show_territories_sorted_desc() {
        let out = show(
            DatasetKind::Territories,
            ShowOptions {
                sort_by: Some(TerritoryMetric::Consumption),
                descending: true,
                ..Default::default()
            },
        )
        .unwrap();
        let first_row = out.lines().nth(2).unwrap();
        assert!(first_row.starts_with("Saint-Barthélemy"));
        assert!(out.lines().last().unwrap().starts_with("Mayotte"));
    }

    #[test]
    fn test_show_rejects_invalid_options() {
        let year_on_territories = ShowOptions {
            year: Some(2023),
            ..Default::default()
        };
        assert!(show(DatasetKind::Territories, year_on_territories).is_err());

        let sort_on_trend = ShowOptions {
            sort_by: Some(TerritoryMetric::Binge),
            ..Default::default()
        };
        assert!(show(DatasetKind::Trend, sort_on_trend).is_err());
    }

    #[test]
    fn test_report_lists_sections() {
        let mut out = Vec::new();
        write_report(
            &mut out,
            &DatasetAssembler::build(),
            &DashboardFilter::default(),
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        for title in ["ÉVOLUTION", "TERRITOIRES", "POLITIQUES", "STRATÉGIE", "SYNTHÈSE"] {
            assert!(text.contains(&format!("=== {} ===", title)), "{}", title);
        }
        assert!(text.contains("Décès liés à l'alcool: 990 (-260 vs 2010)"));
        assert!(text.contains("Seuil de vigilance: 13.5"));
    }
}
