use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// First and last year of the national trend dataset
pub const TREND_YEARS: (i32, i32) = (2000, 2023);

/// First and last year of the health and social datasets
pub const IMPACT_YEARS: (i32, i32) = (2010, 2023);

/// Metropolitan France reference values used by the key metrics
pub const NATIONAL_AVERAGE_CONSUMPTION: f64 = 11.0;
pub const METROPOLE_BINGE_RATE: f64 = 25.4;
pub const METROPOLE_FIRST_INTOXICATION_AGE: f64 = 13.1;

/// Age below which first intoxication is considered a warning sign
pub const VIGILANCE_FIRST_INTOXICATION_AGE: f64 = 13.5;

/// Consumption objective of the 2024-2030 national strategy (L/person/year)
pub const CONSUMPTION_OBJECTIVE_2030: f64 = 8.5;

/// Records that carry a calendar year
pub trait YearKeyed {
    /// Name of the dataset the record belongs to, used in error messages
    const DATASET: &'static str;

    fn year(&self) -> i32;
}

/// One year of the national DROM-COM trend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyTrendRecord {
    pub year: i32,
    /// Litres of pure alcohol per person per year
    pub consumption: f64,
    pub binge_rate: f64,
    pub dependence_rate: f64,
    /// Mean age of first intoxication, in years
    pub first_intoxication_age: f64,
}

/// 2023 snapshot for a single territory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerritorySnapshot {
    pub territory: Territory,
    pub consumption: f64,
    pub binge_rate: f64,
    pub dependence_rate: f64,
    pub occasional_intoxication_rate: f64,
    pub mortality_per_100k: f64,
    pub treatment_access_rate: f64,
}

impl TerritorySnapshot {
    pub fn name(&self) -> &'static str {
        self.territory.name()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthImpactRecord {
    pub year: i32,
    pub death_count: u32,
    pub hospitalization_count: u32,
    pub digestive_cancer_count: u32,
    pub cirrhosis_count: u32,
    pub road_accident_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocialIndicatorRecord {
    pub year: i32,
    pub domestic_violence_count: u32,
    pub intoxication_arrest_count: u32,
    pub work_absenteeism_rate: f64,
    pub school_problem_rate: f64,
}

/// Kind of public policy measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyCategory {
    Prevention,
    Regulation,
    Treatment,
}

impl PolicyCategory {
    pub const ALL: [PolicyCategory; 3] = [
        PolicyCategory::Prevention,
        PolicyCategory::Regulation,
        PolicyCategory::Treatment,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PolicyCategory::Prevention => "Prévention",
            PolicyCategory::Regulation => "Régulation",
            PolicyCategory::Treatment => "Prise en charge",
        }
    }
}

impl fmt::Display for PolicyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyEvent {
    pub date: NaiveDate,
    pub category: PolicyCategory,
    pub title: &'static str,
    pub description: &'static str,
}

impl YearKeyed for YearlyTrendRecord {
    const DATASET: &'static str = "trend";

    fn year(&self) -> i32 {
        self.year
    }
}

impl YearKeyed for HealthImpactRecord {
    const DATASET: &'static str = "health";

    fn year(&self) -> i32 {
        self.year
    }
}

impl YearKeyed for SocialIndicatorRecord {
    const DATASET: &'static str = "social";

    fn year(&self) -> i32 {
        self.year
    }
}

/// Several events may share a year, so lookups return the earliest one
impl YearKeyed for PolicyEvent {
    const DATASET: &'static str = "policies";

    fn year(&self) -> i32 {
        self.date.year()
    }
}

/// The nine overseas territories covered by the datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Territory {
    Guadeloupe,
    Martinique,
    Guyane,
    LaReunion,
    Mayotte,
    SaintMartin,
    SaintBarthelemy,
    PolynesieFrancaise,
    NouvelleCaledonie,
}

impl Territory {
    pub const ALL: [Territory; 9] = [
        Territory::Guadeloupe,
        Territory::Martinique,
        Territory::Guyane,
        Territory::LaReunion,
        Territory::Mayotte,
        Territory::SaintMartin,
        Territory::SaintBarthelemy,
        Territory::PolynesieFrancaise,
        Territory::NouvelleCaledonie,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Territory::Guadeloupe => "Guadeloupe",
            Territory::Martinique => "Martinique",
            Territory::Guyane => "Guyane",
            Territory::LaReunion => "La Réunion",
            Territory::Mayotte => "Mayotte",
            Territory::SaintMartin => "Saint-Martin",
            Territory::SaintBarthelemy => "Saint-Barthélemy",
            Territory::PolynesieFrancaise => "Polynésie française",
            Territory::NouvelleCaledonie => "Nouvelle-Calédonie",
        }
    }

    /// ASCII identifier accepted on the command line
    pub fn slug(&self) -> &'static str {
        match self {
            Territory::Guadeloupe => "guadeloupe",
            Territory::Martinique => "martinique",
            Territory::Guyane => "guyane",
            Territory::LaReunion => "la-reunion",
            Territory::Mayotte => "mayotte",
            Territory::SaintMartin => "saint-martin",
            Territory::SaintBarthelemy => "saint-barthelemy",
            Territory::PolynesieFrancaise => "polynesie-francaise",
            Territory::NouvelleCaledonie => "nouvelle-caledonie",
        }
    }

    /// Approximate (latitude, longitude) of the territory
    pub fn coordinates(&self) -> (f64, f64) {
        match self {
            Territory::Guadeloupe => (16.265, -61.551),
            Territory::Martinique => (14.641, -61.024),
            Territory::Guyane => (3.933, -53.125),
            Territory::LaReunion => (-21.115, 55.536),
            Territory::Mayotte => (-12.827, 45.166),
            Territory::SaintMartin => (18.070, -63.050),
            Territory::SaintBarthelemy => (17.900, -62.850),
            Territory::PolynesieFrancaise => (-17.679, -149.407),
            Territory::NouvelleCaledonie => (-21.300, 165.300),
        }
    }

    /// Priority actions recommended for the territory
    pub fn recommendations(&self) -> [&'static str; 3] {
        match self {
            Territory::Guadeloupe => [
                "Renforcer prévention jeunes",
                "Développer CSAPA",
                "Contrôles renforcés",
            ],
            Territory::Martinique => [
                "Campagne média",
                "Formation professionnels",
                "Prévention périnatale",
            ],
            Territory::Guyane => [
                "Adaptation culturelle",
                "Prévention communautaire",
                "Renforcement soins",
            ],
            Territory::LaReunion => [
                "Prévention scolaire",
                "Dépistage systématique",
                "Soins de suite",
            ],
            Territory::Mayotte => [
                "Sensibilisation précoce",
                "Formation tradipraticiens",
                "Accès aux soins",
            ],
            Territory::SaintMartin => [
                "Régulation vente",
                "Prévention touristique",
                "Soins urgents",
            ],
            Territory::SaintBarthelemy => [
                "Prévention luxury",
                "Contrôles événements",
                "Soins privés",
            ],
            Territory::PolynesieFrancaise => [
                "Prévention traditionnelle",
                "Soins insulaires",
                "Télémédecine",
            ],
            Territory::NouvelleCaledonie => [
                "Prévention minière",
                "Soins ruraux",
                "Programmes workplace",
            ],
        }
    }
}

impl fmt::Display for Territory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Territory {
    type Err = String;

    /// Accepts the display name or the slug, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Territory::ALL
            .iter()
            .copied()
            .find(|t| t.slug() == wanted || t.name().to_lowercase() == wanted)
            .ok_or_else(|| format!("Unknown territory: {}", s))
    }
}

/// Column selector over territory snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TerritoryMetric {
    Consumption,
    Binge,
    Dependence,
    OccasionalIntoxication,
    Mortality,
    TreatmentAccess,
}

impl TerritoryMetric {
    pub fn value(&self, snapshot: &TerritorySnapshot) -> f64 {
        match self {
            TerritoryMetric::Consumption => snapshot.consumption,
            TerritoryMetric::Binge => snapshot.binge_rate,
            TerritoryMetric::Dependence => snapshot.dependence_rate,
            TerritoryMetric::OccasionalIntoxication => snapshot.occasional_intoxication_rate,
            TerritoryMetric::Mortality => snapshot.mortality_per_100k,
            TerritoryMetric::TreatmentAccess => snapshot.treatment_access_rate,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TerritoryMetric::Consumption => "Consommation d'alcool",
            TerritoryMetric::Binge => "Binge drinking",
            TerritoryMetric::Dependence => "Dépendance alcool",
            TerritoryMetric::OccasionalIntoxication => "Ivresse occasionnelle",
            TerritoryMetric::Mortality => "Mortalité liée à l'alcool",
            TerritoryMetric::TreatmentAccess => "Prise en charge addicto",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            TerritoryMetric::Consumption => "L/pers/an",
            TerritoryMetric::Mortality => "/100k hab.",
            _ => "%",
        }
    }
}

/// Point of the 2020-2030 consumption projection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionPoint {
    pub year: i32,
    pub consumption: f64,
}

impl YearKeyed for ProjectionPoint {
    const DATASET: &'static str = "projection";

    fn year(&self) -> i32 {
        self.year
    }
}

/// Expert scoring of a prevention strategy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyAssessment {
    pub name: &'static str,
    /// Efficacy score out of 10
    pub efficacy: f64,
    /// Relative cost, 1 (cheap) to 10
    pub cost: u8,
    pub acceptability: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadmapStep {
    pub period: &'static str,
    pub actions: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorTarget {
    pub indicator: &'static str,
    pub target_2025: f64,
    pub target_2030: f64,
}
