/// BERT for Sequence Classification (such as sentiment analysis)
pub mod sequence_classification;
