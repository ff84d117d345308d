/// Precondition failures raised by the analytics engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("sentiment snapshot has non-finite {field}: {value}")]
    InvalidSnapshot { field: &'static str, value: f64 },
    #[error("transition key {key:?} must contain {separator:?} exactly once, found {occurrences}")]
    MalformedTransitionKey {
        key: String,
        separator: &'static str,
        occurrences: usize,
    },
    #[error("quarter {quarter:?} is not present in the dataset")]
    MissingQuarter { quarter: String },
}
