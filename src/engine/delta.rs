use std::collections::HashMap;

use serde::Serialize;

use super::error::EngineError;
use crate::decimal::round_half_up;
use crate::model::SentimentDataset;

pub const TRANSITION_SEPARATOR: &str = "_to_";
pub const LABEL_ARROW: &str = " → ";
const DELTA_PLACES: u32 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QoQPoint {
    pub label: String,
    pub full_label: String,
    pub management_delta: String,
    pub qa_delta: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<'a> {
    pub from: &'a str,
    pub to: &'a str,
}

impl Transition<'_> {
    pub fn full_label(&self) -> String {
        format!("{}{LABEL_ARROW}{}", self.from, self.to)
    }
}

/// Splits a transition key on the separator token.
///
/// The separator must occur exactly once (overlapping matches count) and
/// both sides must be non-empty.
pub fn parse_transition_key(key: &str) -> Result<Transition<'_>, EngineError> {
    let positions: Vec<usize> = key
        .char_indices()
        .filter(|(index, _)| key[*index..].starts_with(TRANSITION_SEPARATOR))
        .map(|(index, _)| index)
        .collect();

    let malformed = || EngineError::MalformedTransitionKey {
        key: key.to_string(),
        separator: TRANSITION_SEPARATOR,
        occurrences: positions.len(),
    };

    let [position] = positions.as_slice() else {
        return Err(malformed());
    };

    let from = &key[..*position];
    let to = &key[*position + TRANSITION_SEPARATOR.len()..];
    if from.is_empty() || to.is_empty() {
        return Err(malformed());
    }

    Ok(Transition { from, to })
}

/// Builds one QoQ point per transition key, in declared order.
///
/// The compact label drops the origin quarter when that quarter is already
/// on the chart axis (a declared quarter of `dataset`), leaving the target
/// quarter. When two transitions would share a compact label, or the origin
/// is unknown, the full arrow label is used instead.
pub fn build_deltas(dataset: &SentimentDataset) -> Result<Vec<QoQPoint>, EngineError> {
    let mut parsed = Vec::with_capacity(dataset.qoq_tone_change.len());
    for (key, shift) in dataset.qoq_tone_change.iter() {
        parsed.push((parse_transition_key(key)?, shift));
    }

    let compact: Vec<Option<&str>> = parsed
        .iter()
        .map(|(transition, _)| {
            dataset
                .signals
                .contains_key(transition.from)
                .then_some(transition.to)
        })
        .collect();

    let mut label_uses: HashMap<&str, usize> = HashMap::new();
    for label in compact.iter().flatten() {
        *label_uses.entry(*label).or_default() += 1;
    }

    let points = parsed
        .iter()
        .zip(compact)
        .map(|((transition, shift), compact)| {
            let full_label = transition.full_label();
            let label = match compact {
                Some(label) if label_uses.get(label) == Some(&1) => label.to_string(),
                _ => full_label.clone(),
            };

            QoQPoint {
                label,
                full_label,
                management_delta: round_half_up(shift.management_tone_shift, DELTA_PLACES),
                qa_delta: round_half_up(shift.qa_tone_shift, DELTA_PLACES),
            }
        })
        .collect();

    Ok(points)
}
