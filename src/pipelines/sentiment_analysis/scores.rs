use serde::{Deserialize, Serialize};

use super::Error;

/// Label for optimistic financial text
pub const POSITIVE: &str = "positive";

/// Label for pessimistic financial text
pub const NEGATIVE: &str = "negative";

/// Label for text without a clear direction
pub const NEUTRAL: &str = "neutral";

/// Suffix marking a shortened echo of the input
pub const ELLIPSIS: &str = "...";

/// A raw model probability for one label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    /// The class name label
    pub label: String,

    /// Probability in [0, 1]
    pub score: f32,
}

impl LabelScore {
    /// Pair a label with its probability
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Rounded probabilities for the three FinBERT labels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    /// Rounded `positive` probability
    pub positive: f64,

    /// Rounded `negative` probability
    pub negative: f64,

    /// Rounded `neutral` probability
    pub neutral: f64,
}

/// The analysis of a single input text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Display echo of the input, shortened with an ellipsis when long
    pub text: String,

    /// The label with the highest score
    pub sentiment: String,

    /// The rounded score of `sentiment`
    pub confidence: f64,

    /// Rounded scores for every label
    pub scores: Scores,
}

/// Character limits applied to each text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Characters kept before inference; the rest are dropped
    pub max_input_chars: usize,

    /// Characters echoed back before the ellipsis
    pub preview_chars: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_chars: 512,
            preview_chars: 100,
        }
    }
}

/// The longest prefix of `text` holding at most `max` characters
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Echo `text` back, cut to `max` characters plus an ellipsis if it is longer than that
pub fn preview(text: &str, max: usize) -> String {
    let head = truncate_chars(text, max);

    if head.len() < text.len() {
        format!("{head}{ELLIPSIS}")
    } else {
        text.to_string()
    }
}

/// Round a probability to 3 decimal places, sending exact halves to the even neighbour
pub fn round_score(score: f32) -> f64 {
    (f64::from(score) * 1000.0).round_ties_even() / 1000.0
}

/// The first label holding the maximum score
pub fn primary(label_scores: &[LabelScore]) -> Option<&LabelScore> {
    let mut iter = label_scores.iter();
    let mut best = iter.next()?;

    for candidate in iter {
        if candidate.score > best.score {
            best = candidate;
        }
    }

    Some(best)
}

fn rounded(label_scores: &[LabelScore], label: &str) -> f64 {
    label_scores
        .iter()
        .find(|s| s.label == label)
        .map(|s| round_score(s.score))
        .unwrap_or(0.0)
}

/// Shape the raw model output for one text into a result
pub fn summarize(
    text: &str,
    label_scores: &[LabelScore],
    preview_chars: usize,
) -> Result<SentimentResult, Error> {
    let top = primary(label_scores)
        .ok_or_else(|| Error::Inference("model returned no scores".to_string()))?;

    Ok(SentimentResult {
        text: preview(text, preview_chars),
        sentiment: top.label.clone(),
        confidence: round_score(top.score),
        scores: Scores {
            positive: rounded(label_scores, POSITIVE),
            negative: rounded(label_scores, NEGATIVE),
            neutral: rounded(label_scores, NEUTRAL),
        },
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn finbert(positive: f32, negative: f32, neutral: f32) -> Vec<LabelScore> {
        vec![
            LabelScore::new(POSITIVE, positive),
            LabelScore::new(NEGATIVE, negative),
            LabelScore::new(NEUTRAL, neutral),
        ]
    }

    #[test]
    fn test_truncate_chars_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("€€€€", 2), "€€");
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn test_preview_keeps_short_text() {
        let exact = "x".repeat(100);

        assert_eq!(preview(&exact, 100), exact);
        assert_eq!(preview("", 100), "");
    }

    #[test]
    fn test_preview_shortens_long_text() {
        let long = "y".repeat(101);

        assert_eq!(preview(&long, 100), format!("{}...", "y".repeat(100)));
    }

    #[test]
    fn test_round_score() {
        assert_eq!(round_score(0.123_456), 0.123);
        assert_eq!(round_score(0.9996), 1.0);
        assert_eq!(round_score(0.0004), 0.0);
    }

    #[test]
    fn test_round_score_sends_halves_to_even() {
        assert_eq!(round_score(0.0625), 0.062);
        assert_eq!(round_score(0.3125), 0.312);
        assert_eq!(round_score(0.5625), 0.562);
        assert_eq!(round_score(0.1875), 0.188);
    }

    #[test]
    fn test_primary_breaks_ties_by_first_label() {
        let scores = finbert(0.4, 0.4, 0.2);

        assert_eq!(primary(&scores).map(|s| s.label.as_str()), Some(POSITIVE));
        assert_eq!(primary(&[]), None);
    }

    #[test]
    fn test_summarize_picks_the_highest_label() {
        let result = summarize(
            "Shares slumped",
            &finbert(0.012_34, 0.955_55, 0.032_11),
            100,
        )
        .expect("scores should summarize");

        assert_eq!(
            result,
            SentimentResult {
                text: "Shares slumped".to_string(),
                sentiment: NEGATIVE.to_string(),
                confidence: 0.956,
                scores: Scores {
                    positive: 0.012,
                    negative: 0.956,
                    neutral: 0.032,
                },
            }
        );
    }

    #[test]
    fn test_summarize_defaults_missing_labels_to_zero() {
        let scores = vec![
            LabelScore::new(POSITIVE, 0.7),
            LabelScore::new("other", 0.3),
        ];

        let result = summarize("text", &scores, 100).expect("scores should summarize");

        assert_eq!(result.sentiment, POSITIVE);
        assert_eq!(result.scores.negative, 0.0);
        assert_eq!(result.scores.neutral, 0.0);
    }

    #[test]
    fn test_summarize_does_not_renormalize() {
        let result = summarize("text", &finbert(0.3334, 0.3334, 0.3332), 100)
            .expect("scores should summarize");

        let total = result.scores.positive + result.scores.negative + result.scores.neutral;

        assert!((total - 1.0).abs() > 1e-9);
    }

    #[test]
    fn test_summarize_rejects_empty_output() {
        assert_eq!(
            summarize("text", &[], 100),
            Err(Error::Inference("model returned no scores".to_string()))
        );
    }
}
