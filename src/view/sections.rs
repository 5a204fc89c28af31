use super::text;
use super::*;
use crate::dataset::*;
use crate::filter::{DashboardFilter, FocusArea};

fn points<T>(rows: &[T], f: impl Fn(&T) -> (f64, f64)) -> Vec<(f64, f64)> {
    rows.iter().map(f).collect()
}

fn line_chart(title: &str, y_label: &str, series: Vec<Series>) -> Panel {
    Panel::Chart(ChartView {
        title: title.to_string(),
        x_label: "Année".to_string(),
        y_label: y_label.to_string(),
        series,
        guide: None,
    })
}

/// Years of the selection covered by a dataset starting at `first_available`
fn period(filter: &DashboardFilter, first_available: i32) -> String {
    if filter.last_year() < first_available {
        return "aucune donnée sur la période".to_string();
    }
    format!(
        "{}-{}",
        filter.first_year().max(first_available),
        filter.last_year()
    )
}

// =============================================================================
// Évolution
// =============================================================================

fn consumption_tab(data: &DatasetAssembler, filter: &DashboardFilter) -> Tab {
    let trend = filter.years_of(data.trend());
    let span = period(filter, TREND_YEARS.0);

    let indicators = line_chart(
        &format!("Évolution des indicateurs de consommation - {}", span),
        "Pourcentage (%) / Litres",
        vec![
            Series::new(
                "Consommation (L)",
                SeriesKind::Line,
                points(&trend, |r| (r.year as f64, r.consumption)),
            ),
            Series::new(
                "Binge drinking (%)",
                SeriesKind::Line,
                points(&trend, |r| (r.year as f64, r.binge_rate)),
            ),
            Series::new(
                "Dépendance (%)",
                SeriesKind::Line,
                points(&trend, |r| (r.year as f64, r.dependence_rate)),
            ),
        ],
    );

    let age = Panel::Chart(ChartView {
        title: format!("Évolution de l'âge de première ivresse - {}", span),
        x_label: "Année".to_string(),
        y_label: "Âge (années)".to_string(),
        series: vec![Series::new(
            "Âge 1ère ivresse",
            SeriesKind::Line,
            points(&trend, |r| (r.year as f64, r.first_intoxication_age)),
        )],
        guide: Some(Guide {
            value: VIGILANCE_FIRST_INTOXICATION_AGE,
            label: "Seuil de vigilance".to_string(),
        }),
    });

    Tab {
        title: "Consommation".to_string(),
        panels: vec![indicators, age],
    }
}

fn health_tab(data: &DatasetAssembler, filter: &DashboardFilter) -> Tab {
    let health = filter.years_of(data.health());
    let span = period(filter, IMPACT_YEARS.0);
    let count = |f: fn(&HealthImpactRecord) -> u32| {
        points(&health, |r| (r.year as f64, f(r) as f64))
    };

    let mortality = line_chart(
        &format!("Évolution de la mortalité liée à l'alcool - {}", span),
        "Nombre de cas",
        vec![
            Series::new("Décès", SeriesKind::Line, count(|r| r.death_count)),
            Series::new(
                "Cancers digestifs",
                SeriesKind::Line,
                count(|r| r.digestive_cancer_count),
            ),
            Series::new("Cirrhoses", SeriesKind::Line, count(|r| r.cirrhosis_count)),
        ],
    );

    let hospital = line_chart(
        &format!("Hospitalisations et accidents de la route - {}", span),
        "Nombre",
        vec![
            Series::new(
                "Hospitalisations",
                SeriesKind::Area,
                count(|r| r.hospitalization_count),
            ),
            Series::new(
                "Accidents de la route",
                SeriesKind::Area,
                count(|r| r.road_accident_count),
            ),
        ],
    );

    Tab {
        title: "Impacts santé".to_string(),
        panels: vec![mortality, hospital],
    }
}

fn social_tab(data: &DatasetAssembler, filter: &DashboardFilter) -> Tab {
    let social = filter.years_of(data.social());
    let span = period(filter, IMPACT_YEARS.0);

    let incidents = line_chart(
        &format!("Violences familiales et arrestations pour ivresse - {}", span),
        "Nombre",
        vec![
            Series::new(
                "Violences familiales",
                SeriesKind::Line,
                points(&social, |r| {
                    (r.year as f64, r.domestic_violence_count as f64)
                }),
            ),
            Series::new(
                "Arrestations ivresse",
                SeriesKind::Line,
                points(&social, |r| {
                    (r.year as f64, r.intoxication_arrest_count as f64)
                }),
            ),
        ],
    );

    let rates = line_chart(
        &format!("Absentéisme et problèmes scolaires - {}", span),
        "Pourcentage (%)",
        vec![
            Series::new(
                "Absentéisme travail",
                SeriesKind::Line,
                points(&social, |r| (r.year as f64, r.work_absenteeism_rate)),
            ),
            Series::new(
                "Problèmes scolaires",
                SeriesKind::Line,
                points(&social, |r| (r.year as f64, r.school_problem_rate)),
            ),
        ],
    );

    Tab {
        title: "Impacts sociaux".to_string(),
        panels: vec![incidents, rates],
    }
}

fn evolution_section(data: &DatasetAssembler, filter: &DashboardFilter) -> Option<Section> {
    let mut tabs = Vec::new();
    if filter.has_focus(FocusArea::Consumption) {
        tabs.push(consumption_tab(data, filter));
    }
    if filter.has_focus(FocusArea::Health) {
        tabs.push(health_tab(data, filter));
    }
    if filter.has_focus(FocusArea::Social) {
        tabs.push(social_tab(data, filter));
    }
    if tabs.is_empty() {
        return None;
    }
    Some(Section {
        title: "Évolution".to_string(),
        tabs,
    })
}

// =============================================================================
// Territoires
// =============================================================================

fn ranking(territories: &[TerritorySnapshot], metric: TerritoryMetric) -> Panel {
    let sorted = sort_by_column(territories, |s| metric.value(s), true);
    Panel::Bars(BarView {
        title: format!("{} par territoire ({})", metric.label(), metric.unit()),
        unit: metric.unit().to_string(),
        bars: sorted
            .iter()
            .map(|s| (s.name().to_string(), metric.value(s)))
            .collect(),
    })
}

fn territories_section(data: &DatasetAssembler, filter: &DashboardFilter) -> Section {
    let territories = filter.territories_of(data.territories());

    let map = Panel::Map(MapView {
        title: "Consommation d'alcool par territoire (litres/pers/an) - 2023".to_string(),
        unit: TerritoryMetric::Consumption.unit().to_string(),
        markers: territories
            .iter()
            .map(|s| {
                let (lat, lon) = s.territory.coordinates();
                MapMarker {
                    label: s.name().to_string(),
                    lat,
                    lon,
                    value: s.consumption,
                }
            })
            .collect(),
    });

    let details = Panel::Table(TableView {
        title: "Indicateurs par territoire - 2023".to_string(),
        headers: [
            "Territoire",
            "Conso. (L)",
            "Binge (%)",
            "Dépendance (%)",
            "Ivresse occ. (%)",
            "Mortalité /100k",
            "Prise en charge (%)",
        ]
        .iter()
        .map(|h| h.to_string())
        .collect(),
        rows: territories
            .iter()
            .map(|s| {
                vec![
                    s.name().to_string(),
                    format!("{:.1}", s.consumption),
                    format!("{:.1}", s.binge_rate),
                    format!("{:.1}", s.dependence_rate),
                    format!("{:.1}", s.occasional_intoxication_rate),
                    format!("{:.1}", s.mortality_per_100k),
                    format!("{:.1}", s.treatment_access_rate),
                ]
            })
            .collect(),
    });

    Section {
        title: "Territoires".to_string(),
        tabs: vec![
            Tab {
                title: "Cartographie".to_string(),
                panels: vec![map],
            },
            Tab {
                title: "Comparaisons".to_string(),
                panels: vec![
                    ranking(&territories, TerritoryMetric::Consumption),
                    ranking(&territories, TerritoryMetric::Binge),
                    details,
                ],
            },
            Tab {
                title: "Facteurs contextuels".to_string(),
                panels: text::contextual_factors()
                    .into_iter()
                    .map(Panel::Text)
                    .collect(),
            },
        ],
    }
}

// =============================================================================
// Politiques
// =============================================================================

fn policies_section(data: &DatasetAssembler, filter: &DashboardFilter) -> Section {
    let trend = filter.years_of(data.trend());
    let policies = filter.years_of(data.policies());
    let joined = join_trend_with_policy(&trend, &policies);

    let mut series = vec![Series::new(
        "Consommation alcool",
        SeriesKind::Line,
        points(&trend, |r| (r.year as f64, r.consumption)),
    )];
    for category in PolicyCategory::ALL {
        series.push(Series::new(
            category.label(),
            SeriesKind::Scatter,
            joined
                .iter()
                .filter(|(_, event)| event.map(|e| e.category) == Some(category))
                .map(|(record, _)| (record.year as f64, record.consumption))
                .collect(),
        ));
    }

    let impact = Panel::Chart(ChartView {
        title: "Impact des politiques sur la consommation d'alcool".to_string(),
        x_label: "Année".to_string(),
        y_label: "L/pers/an".to_string(),
        series,
        guide: None,
    });

    let timeline = Panel::Table(TableView {
        title: "Chronologie des politiques".to_string(),
        headers: vec![
            "Date".to_string(),
            "Type".to_string(),
            "Mesure".to_string(),
            "Description".to_string(),
        ],
        rows: joined
            .iter()
            .filter_map(|(_, event)| *event)
            .map(|e| {
                vec![
                    e.date.format("%d/%m/%Y").to_string(),
                    e.category.label().to_string(),
                    e.title.to_string(),
                    e.description.to_string(),
                ]
            })
            .collect(),
    });

    let strategies = build_strategy_assessments();
    let efficacy = Panel::Chart(ChartView {
        title: "Efficacité vs coût des stratégies".to_string(),
        x_label: "Coût".to_string(),
        y_label: "Efficacité".to_string(),
        series: strategies
            .iter()
            .map(|s| {
                Series::new(s.name, SeriesKind::Scatter, vec![(s.cost as f64, s.efficacy)])
            })
            .collect(),
        guide: None,
    });
    let ranked = sort_by_column(&strategies, |s| s.efficacy, false);
    let efficacy_table = Panel::Table(TableView {
        title: "Stratégies de prévention".to_string(),
        headers: vec![
            "Stratégie".to_string(),
            "Efficacité".to_string(),
            "Coût".to_string(),
            "Acceptabilité".to_string(),
        ],
        rows: ranked
            .iter()
            .map(|s| {
                vec![
                    s.name.to_string(),
                    format!("{:.1}", s.efficacy),
                    s.cost.to_string(),
                    s.acceptability.to_string(),
                ]
            })
            .collect(),
    });

    let recommendations = Panel::Text(TextBlock {
        title: "Recommandations par territoire".to_string(),
        sections: filter
            .territories
            .iter()
            .map(|t| TextSection {
                heading: t.name().to_string(),
                items: t
                    .recommendations()
                    .iter()
                    .enumerate()
                    .map(|(i, r)| format!("{}. {}", i + 1, r))
                    .collect(),
            })
            .collect(),
    });

    Section {
        title: "Politiques".to_string(),
        tabs: vec![
            Tab {
                title: "Timeline".to_string(),
                panels: vec![impact, timeline],
            },
            Tab {
                title: "Efficacité".to_string(),
                panels: vec![efficacy, efficacy_table],
            },
            Tab {
                title: "Recommandations".to_string(),
                panels: vec![recommendations],
            },
        ],
    }
}

// =============================================================================
// Stratégie and Synthèse
// =============================================================================

fn strategy_section(filter: &DashboardFilter) -> Section {
    let roadmap = Panel::Text(TextBlock {
        title: "Plan d'action prioritaire".to_string(),
        sections: build_roadmap()
            .iter()
            .map(|step| TextSection {
                heading: step.period.to_string(),
                items: step.actions.iter().map(|a| a.to_string()).collect(),
            })
            .collect(),
    });

    let targets = Panel::Table(TableView {
        title: "Tableau de bord de suivi".to_string(),
        headers: vec![
            "Indicateur".to_string(),
            "Cible 2025".to_string(),
            "Cible 2030".to_string(),
        ],
        rows: build_indicator_targets()
            .iter()
            .map(|t| {
                vec![
                    t.indicator.to_string(),
                    t.target_2025.to_string(),
                    t.target_2030.to_string(),
                ]
            })
            .collect(),
    });

    let mut indicators = vec![targets];
    if filter.show_projections {
        let projection = build_consumption_projection();
        indicators.push(Panel::Chart(ChartView {
            title: "Projection de la consommation d'alcool 2020-2030".to_string(),
            x_label: "Année".to_string(),
            y_label: "Consommation (L/pers/an)".to_string(),
            series: vec![Series::new(
                "Projection",
                SeriesKind::Line,
                points(&projection, |p| (p.year as f64, p.consumption)),
            )],
            guide: Some(Guide {
                value: CONSUMPTION_OBJECTIVE_2030,
                label: "Objectif 2030".to_string(),
            }),
        }));
    }

    Section {
        title: "Stratégie".to_string(),
        tabs: vec![
            Tab {
                title: "Objectifs 2030".to_string(),
                panels: text::objectives_2030().into_iter().map(Panel::Text).collect(),
            },
            Tab {
                title: "Plan d'action".to_string(),
                panels: vec![roadmap],
            },
            Tab {
                title: "Indicateurs".to_string(),
                panels: indicators,
            },
        ],
    }
}

fn synthesis_section() -> Section {
    Section {
        title: "Synthèse".to_string(),
        tabs: vec![Tab {
            title: "Synthèse stratégique".to_string(),
            panels: text::synthesis().into_iter().map(Panel::Text).collect(),
        }],
    }
}

/// Every dashboard section visible under `filter`, in display order
pub fn build_sections(data: &DatasetAssembler, filter: &DashboardFilter) -> Vec<Section> {
    let mut sections = Vec::with_capacity(5);
    sections.extend(evolution_section(data, filter));
    if filter.has_focus(FocusArea::Territories) {
        sections.push(territories_section(data, filter));
    }
    if filter.has_focus(FocusArea::Policies) {
        sections.push(policies_section(data, filter));
    }
    sections.push(strategy_section(filter));
    sections.push(synthesis_section());
    sections
}
