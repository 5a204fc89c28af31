use tracing::warn;

use super::{Metric, Tone};
use crate::dataset::{
    select_by_year, DatasetAssembler, DatasetError, IMPACT_YEARS, METROPOLE_BINGE_RATE,
    METROPOLE_FIRST_INTOXICATION_AGE, NATIONAL_AVERAGE_CONSUMPTION,
};
use crate::filter::DashboardFilter;

/// Format a number without a trailing ".0" for whole values
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

/// Format an integer with spaces as thousands separators ("15 900")
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Higher values are bad news for every indicator shown here
fn tone_for_increase(delta: f64) -> Tone {
    if delta > 0.0 {
        Tone::Worsening
    } else if delta < 0.0 {
        Tone::Improving
    } else {
        Tone::Neutral
    }
}

/// Headline indicators for the last year of the selected period
pub fn key_metrics(
    data: &DatasetAssembler,
    filter: &DashboardFilter,
) -> Result<Vec<Metric>, DatasetError> {
    let year = filter.last_year();
    let trend = select_by_year(data.trend(), year)?;

    let health = match select_by_year(data.health(), year) {
        Ok(record) => record,
        Err(e) => {
            let latest = data.health().last().ok_or(e.clone())?;
            warn!("{}, using {} instead", e, latest.year);
            latest
        }
    };
    let baseline = select_by_year(data.health(), IMPACT_YEARS.0)?;

    let consumption_delta = trend.consumption - NATIONAL_AVERAGE_CONSUMPTION;
    let binge_delta = trend.binge_rate - METROPOLE_BINGE_RATE;
    let deaths_delta = health.death_count as i64 - baseline.death_count as i64;
    let age_delta = trend.first_intoxication_age - METROPOLE_FIRST_INTOXICATION_AGE;

    let deaths_label = if health.year == year {
        "Décès liés à l'alcool".to_string()
    } else {
        format!("Décès liés à l'alcool ({})", health.year)
    };

    Ok(vec![
        Metric {
            label: "Consommation d'alcool".to_string(),
            value: format!("{:.1}L/pers/an", trend.consumption),
            delta: format!("{:+.1}L vs moyenne nationale", consumption_delta),
            tone: tone_for_increase(consumption_delta),
        },
        Metric {
            label: "Binge Drinking".to_string(),
            value: format!("{:.1}%", trend.binge_rate),
            delta: format!("{:+.1}% vs métropole", binge_delta),
            tone: tone_for_increase(binge_delta),
        },
        Metric {
            label: deaths_label,
            value: format_thousands(health.death_count as i64),
            delta: format!(
                "{}{} vs {}",
                if deaths_delta > 0 { "+" } else { "" },
                format_thousands(deaths_delta),
                baseline.year
            ),
            tone: tone_for_increase(deaths_delta as f64),
        },
        Metric {
            label: "Âge 1ère ivresse".to_string(),
            value: format!("{:.1} ans", trend.first_intoxication_age),
            delta: format!("{:+.1} ans vs métropole", age_delta),
            // An earlier first intoxication is the worrying direction
            tone: tone_for_increase(-age_delta),
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{resolve_filter, FilterSelection};

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(2010.0), "2010");
        assert_eq!(format_number(12.75), "12.8");
        assert_eq!(format_number(9.8), "9.8");
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(990), "990");
        assert_eq!(format_thousands(15900), "15 900");
        assert_eq!(format_thousands(1234567), "1 234 567");
        assert_eq!(format_thousands(-260), "-260");
        assert_eq!(format_thousands(-1250), "-1 250");
    }

    #[test]
    fn test_metrics_for_2023() {
        let data = DatasetAssembler::build();
        let metrics = key_metrics(&data, &DashboardFilter::default()).unwrap();
        assert_eq!(metrics.len(), 4);

        assert_eq!(metrics[0].value, "10.6L/pers/an");
        assert_eq!(metrics[0].delta, "-0.4L vs moyenne nationale");
        assert_eq!(metrics[0].tone, Tone::Improving);

        assert_eq!(metrics[1].value, "32.7%");
        assert_eq!(metrics[1].tone, Tone::Worsening);

        assert_eq!(metrics[2].label, "Décès liés à l'alcool");
        assert_eq!(metrics[2].value, "990");
        assert_eq!(metrics[2].delta, "-260 vs 2010");

        assert_eq!(metrics[3].value, "11.8 ans");
        assert_eq!(metrics[3].delta, "-1.3 ans vs métropole");
        assert_eq!(metrics[3].tone, Tone::Worsening);
    }

    #[test]
    fn test_health_falls_back_to_latest_before_2010() {
        let data = DatasetAssembler::build();
        let filter = resolve_filter(FilterSelection {
            to: Some(2005),
            ..Default::default()
        })
        .unwrap();
        let metrics = key_metrics(&data, &filter).unwrap();
        assert_eq!(metrics[0].value, "14.2L/pers/an");
        assert_eq!(metrics[2].label, "Décès liés à l'alcool (2023)");
        assert_eq!(metrics[2].value, "990");
    }
}
