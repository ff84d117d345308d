use serde::Serialize;

use super::error::EngineError;
use super::tone::ensure_finite;
use crate::decimal::percent;
use crate::model::SentimentDataset;

/// One quarter of the multi-series chart, every field a rounded percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub quarter: String,
    pub management_pos: i64,
    pub management_neu: i64,
    pub management_neg: i64,
    pub qa_pos: i64,
    pub qa_neu: i64,
    pub qa_neg: i64,
}

/// Projects every declared quarter into a chart point, in declared order.
pub fn build_series(dataset: &SentimentDataset) -> Result<Vec<ChartPoint>, EngineError> {
    let mut points = Vec::with_capacity(dataset.signals.len());

    for (quarter, signals) in dataset.signals.iter() {
        let management = &signals.management_sentiment;
        let qa = &signals.qa_sentiment;
        ensure_finite(management)?;
        ensure_finite(qa)?;

        points.push(ChartPoint {
            quarter: quarter.to_string(),
            management_pos: percent(management.positive_avg),
            management_neu: percent(management.neutral_avg),
            management_neg: percent(management.negative_avg),
            qa_pos: percent(qa.positive_avg),
            qa_neu: percent(qa.neutral_avg),
            qa_neg: percent(qa.negative_avg),
        });
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuarterSignals, SentimentSnapshot};
    use crate::ordered::OrderedMap;

    fn signals(management: [f64; 3], qa: [f64; 3]) -> QuarterSignals {
        let snap = |[positive_avg, neutral_avg, negative_avg]: [f64; 3]| SentimentSnapshot {
            positive_avg,
            neutral_avg,
            negative_avg,
        };
        QuarterSignals {
            management_sentiment: snap(management),
            qa_sentiment: snap(qa),
            strategic_focuses: Vec::new(),
        }
    }

    fn dataset(entries: Vec<(&str, QuarterSignals)>) -> SentimentDataset {
        SentimentDataset {
            signals: OrderedMap::from_entries(
                entries
                    .into_iter()
                    .map(|(quarter, value)| (quarter.to_string(), value)),
            )
            .expect("unique quarters"),
            qoq_tone_change: OrderedMap::default(),
        }
    }

    #[test]
    fn series_follows_declared_quarter_order() {
        let data = dataset(vec![
            ("2025Q1", signals([0.5, 0.4, 0.1], [0.3, 0.6, 0.1])),
            ("2024Q3", signals([0.6, 0.3, 0.1], [0.4, 0.5, 0.1])),
            ("2024Q4", signals([0.7, 0.2, 0.1], [0.2, 0.7, 0.1])),
        ]);

        let series = build_series(&data).expect("finite values");
        let quarters: Vec<&str> = series.iter().map(|point| point.quarter.as_str()).collect();
        assert_eq!(quarters, vec!["2025Q1", "2024Q3", "2024Q4"]);
    }

    #[test]
    fn series_rounds_each_field_half_up() {
        let data = dataset(vec![(
            "Q1",
            signals([0.455, 0.12, 0.425], [0.005, 0.994, 0.001]),
        )]);

        let point = &build_series(&data).expect("finite values")[0];
        assert_eq!(point.management_pos, 46);
        assert_eq!(point.management_neu, 12);
        assert_eq!(point.management_neg, 43);
        assert_eq!(point.qa_pos, 1);
        assert_eq!(point.qa_neu, 99);
        assert_eq!(point.qa_neg, 0);
    }

    #[test]
    fn series_propagates_out_of_range_values() {
        let data = dataset(vec![("Q1", signals([1.5, -0.2, 0.0], [0.0, 0.0, 0.0]))]);

        let point = &build_series(&data).expect("finite values")[0];
        assert_eq!(point.management_pos, 150);
        assert_eq!(point.management_neu, -20);
    }

    #[test]
    fn series_is_idempotent() {
        let data = dataset(vec![
            ("Q1", signals([0.5, 0.4, 0.1], [0.3, 0.6, 0.1])),
            ("Q2", signals([0.6, 0.3, 0.1], [0.4, 0.5, 0.1])),
        ]);

        assert_eq!(
            build_series(&data).expect("first"),
            build_series(&data).expect("second")
        );
    }

    #[test]
    fn series_rejects_non_finite_values() {
        let data = dataset(vec![("Q1", signals([0.5, 0.4, 0.1], [f64::NAN, 0.6, 0.1]))]);
        assert!(matches!(
            build_series(&data),
            Err(EngineError::InvalidSnapshot { .. })
        ));
    }

    #[test]
    fn empty_dataset_yields_empty_series() {
        let data = dataset(Vec::new());
        assert!(build_series(&data).expect("empty").is_empty());
    }
}
