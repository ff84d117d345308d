use serde::Serialize;
use tracing::debug;

use super::delta::{QoQPoint, build_deltas};
use super::error::EngineError;
use super::series::{ChartPoint, build_series};
use super::tone::{ToneVerdict, classify};
use crate::model::{
    QuarterSignals, SentimentDataset, SentimentSnapshot, TranscriptCollection, TranscriptRecord,
};

/// Everything the presentation layer needs for one selected quarter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel<'a> {
    pub quarter: &'a str,
    pub current_snapshot: &'a QuarterSignals,
    pub management_tone: ToneVerdict,
    pub qa_tone: ToneVerdict,
    pub chart_series: &'a [ChartPoint],
    pub qoq_series: &'a [QoQPoint],
    pub strategic_focuses: &'a [String],
    pub transcript: Option<&'a TranscriptRecord>,
}

/// One session over an immutable pair of documents.
///
/// Chart and QoQ series are derived once here; `select` only looks up and
/// classifies the chosen quarter.
#[derive(Debug)]
pub struct Dashboard {
    dataset: SentimentDataset,
    transcripts: TranscriptCollection,
    chart_series: Vec<ChartPoint>,
    qoq_series: Vec<QoQPoint>,
}

impl Dashboard {
    pub fn new(
        dataset: SentimentDataset,
        transcripts: TranscriptCollection,
    ) -> Result<Self, EngineError> {
        let chart_series = build_series(&dataset)?;
        let qoq_series = build_deltas(&dataset)?;
        debug!(
            quarters = chart_series.len(),
            transitions = qoq_series.len(),
            "derived dashboard series"
        );

        Ok(Self {
            dataset,
            transcripts,
            chart_series,
            qoq_series,
        })
    }

    pub fn quarters(&self) -> &[String] {
        self.dataset.signals.keys()
    }

    /// Initial selection a caller can use when none was requested.
    pub fn default_quarter(&self) -> Option<&str> {
        self.dataset.signals.first_key()
    }

    pub fn chart_series(&self) -> &[ChartPoint] {
        &self.chart_series
    }

    pub fn qoq_series(&self) -> &[QoQPoint] {
        &self.qoq_series
    }

    pub fn select(&self, quarter: &str) -> Result<ViewModel<'_>, EngineError> {
        let (quarter, signals) = lookup(&self.dataset, quarter)?;
        let (management_tone, qa_tone) = classify_channels(signals)?;

        Ok(ViewModel {
            quarter,
            current_snapshot: signals,
            management_tone,
            qa_tone,
            chart_series: &self.chart_series,
            qoq_series: &self.qoq_series,
            strategic_focuses: &signals.strategic_focuses,
            transcript: self.transcripts.get(quarter),
        })
    }
}

/// Owned view model produced by the one-shot [`assemble`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssembledView {
    pub quarter: String,
    pub current_snapshot: QuarterSignals,
    pub management_tone: ToneVerdict,
    pub qa_tone: ToneVerdict,
    pub chart_series: Vec<ChartPoint>,
    pub qoq_series: Vec<QoQPoint>,
    pub strategic_focuses: Vec<String>,
    pub transcript: Option<TranscriptRecord>,
}

/// Validates `selected_quarter` before any series are derived, then builds
/// the full view.
pub fn assemble(
    dataset: &SentimentDataset,
    transcripts: &TranscriptCollection,
    selected_quarter: &str,
) -> Result<AssembledView, EngineError> {
    let (quarter, signals) = lookup(dataset, selected_quarter)?;
    let (management_tone, qa_tone) = classify_channels(signals)?;
    let chart_series = build_series(dataset)?;
    let qoq_series = build_deltas(dataset)?;

    Ok(AssembledView {
        quarter: quarter.to_string(),
        current_snapshot: signals.clone(),
        management_tone,
        qa_tone,
        chart_series,
        qoq_series,
        strategic_focuses: signals.strategic_focuses.clone(),
        transcript: transcripts.get(quarter).cloned(),
    })
}

fn lookup<'a>(
    dataset: &'a SentimentDataset,
    quarter: &str,
) -> Result<(&'a str, &'a QuarterSignals), EngineError> {
    dataset
        .signals
        .get_key_value(quarter)
        .ok_or_else(|| EngineError::MissingQuarter {
            quarter: quarter.to_string(),
        })
}

fn classify_channels(signals: &QuarterSignals) -> Result<(ToneVerdict, ToneVerdict), EngineError> {
    Ok((
        classify(&signals.management_sentiment)?,
        classify(&signals.qa_sentiment)?,
    ))
}

impl ViewModel<'_> {
    pub fn management(&self) -> &SentimentSnapshot {
        &self.current_snapshot.management_sentiment
    }

    pub fn qa(&self) -> &SentimentSnapshot {
        &self.current_snapshot.qa_sentiment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tone::Tone;

    const SENTIMENT: &str = r#"
    {
      "signals": {
        "Q1": {
          "management_sentiment": {"positive_avg": 0.82, "neutral_avg": 0.12, "negative_avg": 0.06},
          "qa_sentiment": {"positive_avg": 0.3, "neutral_avg": 0.3, "negative_avg": 0.4},
          "strategic_focuses": ["AI infrastructure"]
        },
        "Q3": {
          "management_sentiment": {"positive_avg": 0.4, "neutral_avg": 0.4, "negative_avg": 0.2},
          "qa_sentiment": {"positive_avg": 0.455, "neutral_avg": 0.445, "negative_avg": 0.1},
          "strategic_focuses": []
        }
      },
      "qoq_tone_change": {
        "Q1_to_Q3": {"management_tone_shift": -0.1234565, "qa_tone_shift": 0.02}
      }
    }
    "#;

    const TRANSCRIPTS: &str = r#"
    {
      "Q1": {
        "date": "2024-05-22",
        "preparedRemarks": [{"speaker": "CEO", "text": "Record quarter."}],
        "qanda": []
      }
    }
    "#;

    fn documents() -> (SentimentDataset, TranscriptCollection) {
        (
            serde_json::from_str(SENTIMENT).expect("sentiment fixture"),
            serde_json::from_str(TRANSCRIPTS).expect("transcript fixture"),
        )
    }

    #[test]
    fn assemble_classifies_selected_quarter() {
        let (dataset, transcripts) = documents();
        let view = assemble(&dataset, &transcripts, "Q1").expect("quarter present");

        assert_eq!(view.quarter, "Q1");
        assert_eq!(view.management_tone.category, Tone::Positive);
        assert_eq!(view.qa_tone.category, Tone::Negative);
        assert_eq!(view.strategic_focuses, vec!["AI infrastructure".to_string()]);
        assert_eq!(view.chart_series.len(), 2);
        assert_eq!(view.qoq_series[0].label, "Q3");
        assert_eq!(view.qoq_series[0].management_delta, "-0.123457");
        assert_eq!(
            view.transcript.as_ref().map(|record| record.date.as_str()),
            Some("2024-05-22")
        );
    }

    #[test]
    fn assemble_rejects_absent_quarter() {
        let (dataset, transcripts) = documents();
        let err = assemble(&dataset, &transcripts, "Q2").expect_err("Q2 is absent");
        assert_eq!(
            err,
            EngineError::MissingQuarter {
                quarter: "Q2".to_string()
            }
        );
    }

    #[test]
    fn missing_quarter_wins_over_malformed_transitions() {
        let raw = SENTIMENT.replace("Q1_to_Q3", "Q1Q3");
        let dataset: SentimentDataset = serde_json::from_str(&raw).expect("fixture");
        let transcripts = TranscriptCollection::default();

        assert!(matches!(
            assemble(&dataset, &transcripts, "Q2"),
            Err(EngineError::MissingQuarter { .. })
        ));
        assert!(matches!(
            assemble(&dataset, &transcripts, "Q1"),
            Err(EngineError::MalformedTransitionKey { .. })
        ));
    }

    #[test]
    fn dashboard_reselection_reuses_series() {
        let (dataset, transcripts) = documents();
        let dashboard = Dashboard::new(dataset, transcripts).expect("valid dataset");
        assert_eq!(dashboard.default_quarter(), Some("Q1"));

        let first = dashboard.select("Q1").expect("Q1 present");
        let second = dashboard.select("Q3").expect("Q3 present");

        assert!(std::ptr::eq(first.chart_series, second.chart_series));
        assert!(std::ptr::eq(first.qoq_series, second.qoq_series));
        assert_eq!(second.management_tone.category, Tone::Neutral);
        assert_eq!(second.qa_tone.category, Tone::Positive);
        assert!(second.strategic_focuses.is_empty());
        assert!(second.transcript.is_none());
        assert_eq!(second.qa().positive_avg, 0.455);
        assert_eq!(dashboard.chart_series()[1].qa_pos, 46);
    }

    #[test]
    fn dashboard_select_rejects_absent_quarter() {
        let (dataset, transcripts) = documents();
        let dashboard = Dashboard::new(dataset, transcripts).expect("valid dataset");
        assert!(matches!(
            dashboard.select("2024Q3"),
            Err(EngineError::MissingQuarter { .. })
        ));
    }

    #[test]
    fn view_model_serializes_for_presentation() {
        let (dataset, transcripts) = documents();
        let dashboard = Dashboard::new(dataset, transcripts).expect("valid dataset");
        let view = dashboard.select("Q1").expect("Q1 present");

        let json = serde_json::to_value(&view).expect("serialize");
        assert_eq!(json["management_tone"]["category"], "Positive");
        assert_eq!(json["qoq_series"][0]["fullLabel"], "Q1 → Q3");
        assert_eq!(json["chart_series"][0]["management_pos"], 82);
    }
}
