//! Numeric scores from `"<score>. <explanation>"` labels

use serde::Serialize;
use std::sync::LazyLock;

static SCORE_PATTERN: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(-?\d\.?\d*)\.").expect("score pattern is valid")
});

/// Sentiment bucket of a parsed score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentCategory {
    Negative,
    Neutral,
    Positive,
}

/// A score parsed out of a label
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentScore(pub f64);

impl SentimentScore {
    /// Parse the first number followed by a period.
    ///
    /// Returns `None` for the sentinel label and for answers that do not
    /// follow the requested format.
    pub fn parse(label: &str) -> Option<Self> {
        let captures = SCORE_PATTERN.captures(label)?;
        captures
            .get(1)?
            .as_str()
            .parse::<f64>()
            .ok()
            .map(SentimentScore)
    }

    pub fn category(&self) -> SentimentCategory {
        if self.0 < 0.0 {
            SentimentCategory::Negative
        } else if self.0 == 0.0 {
            SentimentCategory::Neutral
        } else {
            SentimentCategory::Positive
        }
    }
}
