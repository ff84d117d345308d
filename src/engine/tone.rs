use serde::Serialize;

use super::error::EngineError;
use crate::model::SentimentSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

impl Tone {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToneVerdict {
    pub category: Tone,
}

/// Picks the strictly dominant polarity of a snapshot.
///
/// Any tie for the maximum, two-way or three-way, is `Neutral`.
pub fn classify(snapshot: &SentimentSnapshot) -> Result<ToneVerdict, EngineError> {
    ensure_finite(snapshot)?;

    let positive = snapshot.positive_avg;
    let neutral = snapshot.neutral_avg;
    let negative = snapshot.negative_avg;

    let category = if positive > negative && positive > neutral {
        Tone::Positive
    } else if negative > positive && negative > neutral {
        Tone::Negative
    } else {
        Tone::Neutral
    };

    Ok(ToneVerdict { category })
}

pub(crate) fn ensure_finite(snapshot: &SentimentSnapshot) -> Result<(), EngineError> {
    let fields = [
        ("positive_avg", snapshot.positive_avg),
        ("neutral_avg", snapshot.neutral_avg),
        ("negative_avg", snapshot.negative_avg),
    ];

    for (field, value) in fields {
        if !value.is_finite() {
            return Err(EngineError::InvalidSnapshot { field, value });
        }
    }
    Ok(())
}
