/// Sequence Classification building blocks shared by classification pipelines
pub mod sequence_classification;

/// Sentiment Analysis
pub mod sentiment_analysis;
