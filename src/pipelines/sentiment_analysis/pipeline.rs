use super::{
    scores::{summarize, truncate_chars},
    Classifier, Error, Limits, SentimentResult,
};

/// Analyze each text in order. The first failure aborts the whole batch.
pub fn analyze(
    classifier: &dyn Classifier,
    texts: &[String],
    limits: Limits,
) -> Result<Vec<SentimentResult>, Error> {
    texts
        .iter()
        .map(|text| {
            let input = truncate_chars(text, limits.max_input_chars);

            let label_scores = classifier.classify(input)?;

            summarize(text, &label_scores, limits.preview_chars)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::pipelines::sentiment_analysis::{LabelScore, NEGATIVE, NEUTRAL, POSITIVE};

    /// Scores by keyword and remembers what it was asked to classify
    struct Keywords {
        labels: Vec<String>,
        seen: Mutex<Vec<String>>,
    }

    impl Keywords {
        fn new() -> Self {
            Self {
                labels: vec![POSITIVE.into(), NEGATIVE.into(), NEUTRAL.into()],
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl Classifier for Keywords {
        fn labels(&self) -> &[String] {
            &self.labels
        }

        fn classify(&self, text: &str) -> Result<Vec<LabelScore>, Error> {
            self.seen.lock().expect("seen").push(text.to_string());

            if text.contains("boom") {
                return Err(Error::Inference("tensor shape mismatch".to_string()));
            }

            let (p, n, u) = if text.contains("beat") {
                (0.9, 0.05, 0.05)
            } else if text.contains("miss") {
                (0.1, 0.8, 0.1)
            } else {
                (0.1, 0.1, 0.8)
            };

            Ok(vec![
                LabelScore::new(POSITIVE, p),
                LabelScore::new(NEGATIVE, n),
                LabelScore::new(NEUTRAL, u),
            ])
        }
    }

    #[test]
    fn test_analyze_preserves_order() {
        let texts = vec![
            "Earnings beat".to_string(),
            "Revenue miss".to_string(),
            "Board meets Tuesday".to_string(),
        ];

        let results = analyze(&Keywords::new(), &texts, Limits::default()).expect("analysis");

        assert_eq!(
            results.iter().map(|r| r.sentiment.as_str()).collect::<Vec<_>>(),
            vec![POSITIVE, NEGATIVE, NEUTRAL]
        );
        assert_eq!(
            results.iter().map(|r| r.text.as_str()).collect::<Vec<_>>(),
            texts.iter().map(String::as_str).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_analyze_truncates_model_input_but_previews_original() {
        let classifier = Keywords::new();
        let text = "a".repeat(600);

        let results = analyze(&classifier, &[text.clone()], Limits::default()).expect("analysis");

        let seen = classifier.seen.lock().expect("seen");
        assert_eq!(seen[0].chars().count(), 512);
        assert_eq!(results[0].text, format!("{}...", "a".repeat(100)));
    }

    #[test]
    fn test_analyze_fails_the_whole_batch() {
        let texts = vec!["Earnings beat".to_string(), "boom".to_string()];

        assert_eq!(
            analyze(&Keywords::new(), &texts, Limits::default()),
            Err(Error::Inference("tensor shape mismatch".to_string()))
        );
    }
}
