use serde::{Deserialize, Serialize};

use crate::ordered::OrderedMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentSnapshot {
    pub positive_avg: f64,
    pub neutral_avg: f64,
    pub negative_avg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterSignals {
    pub management_sentiment: SentimentSnapshot,
    pub qa_sentiment: SentimentSnapshot,
    #[serde(default)]
    pub strategic_focuses: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneShift {
    pub management_tone_shift: f64,
    pub qa_tone_shift: f64,
}

/// Sentiment document for one entity: per-quarter signals plus
/// quarter-over-quarter tone shifts keyed by transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentDataset {
    pub signals: OrderedMap<QuarterSignals>,
    #[serde(default)]
    pub qoq_tone_change: OrderedMap<ToneShift>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptRecord {
    pub date: String,
    #[serde(default)]
    pub prepared_remarks: Vec<TranscriptEntry>,
    #[serde(default)]
    pub qanda: Vec<TranscriptEntry>,
}

pub type TranscriptCollection = OrderedMap<TranscriptRecord>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedDocument {
    pub path: String,
    pub sha256: String,
    pub bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchManifest {
    pub manifest_version: u32,
    pub entity: String,
    pub fetched_at: String,
    pub base_url: String,
    pub quarter_count: usize,
    pub transition_count: usize,
    pub transcript_count: usize,
    pub sentiment: CachedDocument,
    pub transcripts: CachedDocument,
}

#[cfg(test)]
mod tests {
    use super::{SentimentDataset, TranscriptCollection};

    #[test]
    fn sentiment_document_deserializes_in_declared_order() {
        let raw = r#"
        {
          "signals": {
            "2024Q4": {
              "management_sentiment": {"positive_avg": 0.7, "neutral_avg": 0.2, "negative_avg": 0.1},
              "qa_sentiment": {"positive_avg": 0.4, "neutral_avg": 0.5, "negative_avg": 0.1},
              "strategic_focuses": ["Data center", "Networking"]
            },
            "2024Q3": {
              "management_sentiment": {"positive_avg": 0.6, "neutral_avg": 0.3, "negative_avg": 0.1},
              "qa_sentiment": {"positive_avg": 0.3, "neutral_avg": 0.6, "negative_avg": 0.1}
            }
          },
          "qoq_tone_change": {
            "2024Q4_to_2024Q3": {"management_tone_shift": -0.1, "qa_tone_shift": 0.05}
          }
        }
        "#;

        let dataset: SentimentDataset = serde_json::from_str(raw).expect("document should parse");
        assert_eq!(dataset.signals.keys(), ["2024Q4", "2024Q3"]);
        let q3 = dataset.signals.get("2024Q3").expect("quarter present");
        assert!(q3.strategic_focuses.is_empty());
        assert_eq!(dataset.qoq_tone_change.len(), 1);
    }

    #[test]
    fn transcript_document_uses_camel_case_fields() {
        let raw = r#"
        {
          "2024Q3": {
            "date": "2024-08-28",
            "preparedRemarks": [{"speaker": "CFO", "text": "Revenue grew."}],
            "qanda": [{"speaker": "Analyst", "text": "Margins?"}]
          }
        }
        "#;

        let transcripts: TranscriptCollection = serde_json::from_str(raw).expect("should parse");
        let record = transcripts.get("2024Q3").expect("quarter present");
        assert_eq!(record.date, "2024-08-28");
        assert_eq!(record.prepared_remarks[0].speaker, "CFO");
        assert_eq!(record.qanda[0].text, "Margins?");
    }
}
