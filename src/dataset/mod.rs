//! Dataset assembler: the fixed DROM-COM statistics and the queries run on them.

pub mod query;
pub mod tables;
pub mod types;

pub use query::*;
pub use tables::*;
pub use types::*;

use tracing::debug;

/// Kinds of dataset that can be printed on their own
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DatasetKind {
    Trend,
    Territories,
    Health,
    Social,
    Policies,
    Projection,
    Strategies,
    Targets,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 8] = [
        DatasetKind::Trend,
        DatasetKind::Territories,
        DatasetKind::Health,
        DatasetKind::Social,
        DatasetKind::Policies,
        DatasetKind::Projection,
        DatasetKind::Strategies,
        DatasetKind::Targets,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DatasetKind::Trend => "trend",
            DatasetKind::Territories => "territories",
            DatasetKind::Health => "health",
            DatasetKind::Social => "social",
            DatasetKind::Policies => "policies",
            DatasetKind::Projection => "projection",
            DatasetKind::Strategies => "strategies",
            DatasetKind::Targets => "targets",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DatasetKind::Trend => "National consumption trend, 2000-2023",
            DatasetKind::Territories => "Per-territory snapshot, 2023",
            DatasetKind::Health => "Health impact counts, 2010-2023",
            DatasetKind::Social => "Social indicators, 2010-2023",
            DatasetKind::Policies => "Policy timeline",
            DatasetKind::Projection => "Consumption projection, 2020-2030",
            DatasetKind::Strategies => "Prevention strategy assessments",
            DatasetKind::Targets => "Monitoring indicator targets",
        }
    }

    /// Whether rows of this dataset carry a year usable with `--year`
    pub fn is_year_keyed(&self) -> bool {
        matches!(
            self,
            DatasetKind::Trend
                | DatasetKind::Health
                | DatasetKind::Social
                | DatasetKind::Policies
                | DatasetKind::Projection
        )
    }
}

/// The five core datasets, built once and read-only afterwards
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetAssembler {
    trend: Vec<YearlyTrendRecord>,
    territories: Vec<TerritorySnapshot>,
    health: Vec<HealthImpactRecord>,
    social: Vec<SocialIndicatorRecord>,
    policies: Vec<PolicyEvent>,
}

impl DatasetAssembler {
    pub fn build() -> Self {
        let assembler = Self {
            trend: build_yearly_trend(),
            territories: build_territory_snapshot(),
            health: build_health_impact(),
            social: build_social_indicators(),
            policies: build_policy_timeline(),
        };
        debug!(
            trend = assembler.trend.len(),
            territories = assembler.territories.len(),
            health = assembler.health.len(),
            social = assembler.social.len(),
            policies = assembler.policies.len(),
            "Assembled datasets"
        );
        assembler
    }

    pub fn trend(&self) -> &[YearlyTrendRecord] {
        &self.trend
    }

    pub fn territories(&self) -> &[TerritorySnapshot] {
        &self.territories
    }

    pub fn health(&self) -> &[HealthImpactRecord] {
        &self.health
    }

    pub fn social(&self) -> &[SocialIndicatorRecord] {
        &self.social
    }

    pub fn policies(&self) -> &[PolicyEvent] {
        &self.policies
    }

    /// Trend rows paired with the policy events of their year
    pub fn trend_with_policies(&self) -> Vec<(&YearlyTrendRecord, Option<&PolicyEvent>)> {
        join_trend_with_policy(&self.trend, &self.policies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_is_idempotent() {
        assert_eq!(DatasetAssembler::build(), DatasetAssembler::build());
        assert_eq!(build_policy_timeline(), build_policy_timeline());
    }

    #[test]
    fn test_year_keyed_kinds() {
        assert!(DatasetKind::Health.is_year_keyed());
        assert!(!DatasetKind::Territories.is_year_keyed());
        assert!(!DatasetKind::Strategies.is_year_keyed());
    }
}
