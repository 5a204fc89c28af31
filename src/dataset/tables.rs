//! Fixed datasets of the dashboard.
//!
//! Every table is authored as column literals and assembled into records on
//! demand; nothing here is mutable or cached.

use chrono::NaiveDate;

use super::types::*;

// =============================================================================
// National trend, 2000-2023
// =============================================================================

const TREND_CONSUMPTION: [f64; 24] = [
    15.2, 15.0, 14.8, 14.6, 14.4, 14.2, 14.0, 13.8, 13.6, 13.4, // 2000-2009
    13.2, 13.0, 12.8, 12.6, 12.4, 12.2, 12.0, 11.8, 11.6, 11.4, // 2010-2019
    11.2, 11.0, 10.8, 10.6, // 2020-2023
];

const TREND_BINGE: [f64; 24] = [
    25.8, 26.1, 26.4, 26.7, 27.0, 27.3, 27.6, 27.9, 28.2, 28.5, //
    28.8, 29.1, 29.4, 29.7, 30.0, 30.3, 30.6, 30.9, 31.2, 31.5, //
    31.8, 32.1, 32.4, 32.7,
];

const TREND_DEPENDENCE: [f64; 24] = [
    12.5, 12.3, 12.1, 11.9, 11.7, 11.5, 11.3, 11.1, 10.9, 10.7, //
    10.5, 10.3, 10.1, 9.9, 9.7, 9.5, 9.3, 9.1, 8.9, 8.7, //
    8.5, 8.3, 8.1, 7.9,
];

const TREND_FIRST_INTOXICATION_AGE: [f64; 24] = [
    14.1, 14.0, 13.9, 13.8, 13.7, 13.6, 13.5, 13.4, 13.3, 13.2, //
    13.1, 13.0, 12.9, 12.8, 12.7, 12.6, 12.5, 12.4, 12.3, 12.2, //
    12.1, 12.0, 11.9, 11.8,
];

/// National trend records, one per year from 2000 to 2023
pub fn build_yearly_trend() -> Vec<YearlyTrendRecord> {
    (0..TREND_CONSUMPTION.len())
        .map(|i| YearlyTrendRecord {
            year: TREND_YEARS.0 + i as i32,
            consumption: TREND_CONSUMPTION[i],
            binge_rate: TREND_BINGE[i],
            dependence_rate: TREND_DEPENDENCE[i],
            first_intoxication_age: TREND_FIRST_INTOXICATION_AGE[i],
        })
        .collect()
}

// =============================================================================
// Territory snapshot, 2023
// =============================================================================

/// (consumption, binge, dependence, occasional intoxication, mortality, treatment access)
/// in `Territory::ALL` order
const TERRITORY_ROWS: [(f64, f64, f64, f64, f64, f64); 9] = [
    (12.8, 35.2, 9.2, 45.8, 28.5, 68.5),
    (11.5, 32.8, 8.4, 42.3, 25.8, 72.3),
    (14.2, 38.5, 11.8, 48.9, 32.4, 61.8),
    (13.1, 34.1, 10.1, 44.2, 29.1, 70.4),
    (9.8, 28.7, 7.3, 36.7, 22.6, 54.2),
    (15.6, 42.3, 13.5, 52.4, 35.8, 65.7),
    (16.8, 45.1, 14.8, 55.1, 38.2, 78.9),
    (10.9, 31.6, 8.7, 41.8, 26.3, 69.8),
    (11.3, 33.4, 9.5, 43.6, 27.9, 71.5),
];

/// One snapshot per territory, in `Territory::ALL` order
pub fn build_territory_snapshot() -> Vec<TerritorySnapshot> {
    Territory::ALL
        .iter()
        .zip(TERRITORY_ROWS.iter())
        .map(
            |(&territory, &(consumption, binge, dependence, occasional, mortality, access))| {
                TerritorySnapshot {
                    territory,
                    consumption,
                    binge_rate: binge,
                    dependence_rate: dependence,
                    occasional_intoxication_rate: occasional,
                    mortality_per_100k: mortality,
                    treatment_access_rate: access,
                }
            },
        )
        .collect()
}

// =============================================================================
// Health and social impacts, 2010-2023
// =============================================================================

const HEALTH_DEATHS: [u32; 14] = [
    1250, 1230, 1210, 1190, 1170, 1150, 1130, 1110, 1090, 1070, 1050, 1030, 1010, 990,
];
const HEALTH_HOSPITALIZATIONS: [u32; 14] = [
    18500, 18300, 18100, 17900, 17700, 17500, 17300, 17100, 16900, 16700, 16500, 16300, 16100,
    15900,
];
const HEALTH_DIGESTIVE_CANCERS: [u32; 14] = [
    420, 430, 440, 450, 460, 470, 480, 490, 500, 510, 520, 530, 540, 550,
];
const HEALTH_CIRRHOSES: [u32; 14] = [
    680, 670, 660, 650, 640, 630, 620, 610, 600, 590, 580, 570, 560, 550,
];
const HEALTH_ROAD_ACCIDENTS: [u32; 14] = [
    285, 280, 275, 270, 265, 260, 255, 250, 245, 240, 235, 230, 225, 220,
];

pub fn build_health_impact() -> Vec<HealthImpactRecord> {
    (0..HEALTH_DEATHS.len())
        .map(|i| HealthImpactRecord {
            year: IMPACT_YEARS.0 + i as i32,
            death_count: HEALTH_DEATHS[i],
            hospitalization_count: HEALTH_HOSPITALIZATIONS[i],
            digestive_cancer_count: HEALTH_DIGESTIVE_CANCERS[i],
            cirrhosis_count: HEALTH_CIRRHOSES[i],
            road_accident_count: HEALTH_ROAD_ACCIDENTS[i],
        })
        .collect()
}

const SOCIAL_DOMESTIC_VIOLENCE: [u32; 14] = [
    1850, 1830, 1810, 1790, 1770, 1750, 1730, 1710, 1690, 1670, 1650, 1630, 1610, 1590,
];
const SOCIAL_INTOXICATION_ARRESTS: [u32; 14] = [
    4250, 4220, 4190, 4160, 4130, 4100, 4070, 4040, 4010, 3980, 3950, 3920, 3890, 3860,
];
const SOCIAL_WORK_ABSENTEEISM: [f64; 14] = [
    8.5, 8.4, 8.3, 8.2, 8.1, 8.0, 7.9, 7.8, 7.7, 7.6, 7.5, 7.4, 7.3, 7.2,
];
const SOCIAL_SCHOOL_PROBLEMS: [f64; 14] = [
    12.8, 12.6, 12.4, 12.2, 12.0, 11.8, 11.6, 11.4, 11.2, 11.0, 10.8, 10.6, 10.4, 10.2,
];

pub fn build_social_indicators() -> Vec<SocialIndicatorRecord> {
    (0..SOCIAL_DOMESTIC_VIOLENCE.len())
        .map(|i| SocialIndicatorRecord {
            year: IMPACT_YEARS.0 + i as i32,
            domestic_violence_count: SOCIAL_DOMESTIC_VIOLENCE[i],
            intoxication_arrest_count: SOCIAL_INTOXICATION_ARRESTS[i],
            work_absenteeism_rate: SOCIAL_WORK_ABSENTEEISM[i],
            school_problem_rate: SOCIAL_SCHOOL_PROBLEMS[i],
        })
        .collect()
}

// =============================================================================
// Policy timeline
// =============================================================================

/// (date, category, title, description), ascending by date
const POLICY_ROWS: [((i32, u32, u32), PolicyCategory, &str, &str); 8] = [
    (
        (2005, 3, 15),
        PolicyCategory::Prevention,
        "Plan alcool outre-mer",
        "Premier plan spécifique de prévention de l'alcoolisme dans les DROM-COM",
    ),
    (
        (2010, 9, 1),
        PolicyCategory::Regulation,
        "Encadrement des débits de boissons",
        "Renforcement de la régulation de la vente d'alcool dans les outre-mer",
    ),
    (
        (2014, 1, 1),
        PolicyCategory::Treatment,
        "Centres addictologie outre-mer",
        "Création de centres spécialisés dans les territoires ultramarins",
    ),
    (
        (2017, 6, 20),
        PolicyCategory::Prevention,
        "Campagne \"Alcool, parlons-en\"",
        "Campagne de prévention adaptée aux cultures locales",
    ),
    (
        (2019, 11, 1),
        PolicyCategory::Regulation,
        "Interdiction publicité proximité écoles",
        "Interdiction de la publicité pour l'alcool près des établissements scolaires",
    ),
    (
        (2021, 3, 1),
        PolicyCategory::Treatment,
        "Télémédecine addictologique",
        "Déploiement de la téléconsultation pour les addictions",
    ),
    (
        (2022, 9, 1),
        PolicyCategory::Prevention,
        "Programme \"Jeunesse sans alcool\"",
        "Prévention ciblée sur les jeunes des outre-mer",
    ),
    (
        (2023, 1, 1),
        PolicyCategory::Regulation,
        "Renforcement contrôles alcoolémie",
        "Multiplication des contrôles routiers dans les territoires",
    ),
];

fn literal_date((year, month, day): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("policy literal holds a valid calendar date")
}

/// Policy events in ascending date order
pub fn build_policy_timeline() -> Vec<PolicyEvent> {
    POLICY_ROWS
        .iter()
        .map(|&(date, category, title, description)| PolicyEvent {
            date: literal_date(date),
            category,
            title,
            description,
        })
        .collect()
}

// =============================================================================
// Strategy reference data
// =============================================================================

const PROJECTION_CONSUMPTION: [f64; 11] = [
    11.2, 11.0, 10.8, 10.6, 10.2, 9.8, 9.5, 9.2, 8.9, 8.7, 8.5, // 2020-2030
];

/// Consumption trajectory 2020-2030 towards the 2030 objective
pub fn build_consumption_projection() -> Vec<ProjectionPoint> {
    PROJECTION_CONSUMPTION
        .iter()
        .enumerate()
        .map(|(i, &consumption)| ProjectionPoint {
            year: 2020 + i as i32,
            consumption,
        })
        .collect()
}

pub fn build_strategy_assessments() -> Vec<StrategyAssessment> {
    [
        ("Prévention scolaire", 7.8, 4, 9),
        ("Contrôles d'alcoolémie", 8.5, 6, 6),
        ("Limitation publicité", 6.2, 3, 7),
        ("Augmentation des prix", 8.9, 2, 4),
        ("Dépistage précoce", 7.1, 5, 8),
        ("CSAPA spécialisés", 8.2, 7, 8),
    ]
    .into_iter()
    .map(|(name, efficacy, cost, acceptability)| StrategyAssessment {
        name,
        efficacy,
        cost,
        acceptability,
    })
    .collect()
}

pub fn build_roadmap() -> Vec<RoadmapStep> {
    vec![
        RoadmapStep {
            period: "2024-2025",
            actions: &[
                "Cartographie des besoins",
                "Formation des professionnels",
                "Campagne média territoriale",
            ],
        },
        RoadmapStep {
            period: "2026-2027",
            actions: &[
                "Déploiement CSAPA",
                "Programme scolaire unifié",
                "Système de dépistage",
            ],
        },
        RoadmapStep {
            period: "2028-2030",
            actions: &[
                "Évaluation stratégique",
                "Ajustement des programmes",
                "Généralisation des bonnes pratiques",
            ],
        },
    ]
}

pub fn build_indicator_targets() -> Vec<IndicatorTarget> {
    [
        ("Consommation alcool (L/pers/an)", 9.5, 8.5),
        ("Binge drinking (%)", 28.0, 25.0),
        ("Âge 1ère ivresse (ans)", 12.5, 13.0),
        ("Décès liés à l'alcool", 950.0, 850.0),
        ("Couverture CSAPA (%)", 85.0, 95.0),
    ]
    .into_iter()
    .map(|(indicator, target_2025, target_2030)| IndicatorTarget {
        indicator,
        target_2025,
        target_2030,
    })
    .collect()
}
