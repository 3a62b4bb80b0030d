use std::path::Path;

use tokenizers::{
    models::wordpiece::WordPiece,
    normalizers::{BertNormalizer, NormalizerWrapper},
    pre_tokenizers::{bert::BertPreTokenizer, PreTokenizerWrapper},
    processors::{bert::BertProcessing, PostProcessorWrapper},
    Model as _, Tokenizer, TruncationParams,
};

/// Token used for out-of-vocabulary pieces
pub const UNK_TOKEN: &str = "[UNK]";

/// Token prepended to every sequence
pub const CLS_TOKEN: &str = "[CLS]";

/// Token appended to every sequence
pub const SEP_TOKEN: &str = "[SEP]";

/// Load a serialized `tokenizer.json` and cap encodings at `max_len` tokens
pub fn from_file(path: &Path, max_len: usize) -> anyhow::Result<Tokenizer> {
    let tokenizer = Tokenizer::from_file(path)
        .map_err(|e| anyhow!("Unable to load tokenizer from {}: {}", path.display(), e))?;

    with_truncation(tokenizer, max_len)
}

/// Build a BERT WordPiece tokenizer from a `vocab.txt` file, for model repos that predate
/// `tokenizer.json`
pub fn from_vocab(path: &Path, lowercase: bool, max_len: usize) -> anyhow::Result<Tokenizer> {
    let vocab = path
        .to_str()
        .ok_or_else(|| anyhow!("Vocabulary path is not valid UTF-8: {}", path.display()))?;

    let wordpiece = WordPiece::from_file(vocab)
        .unk_token(UNK_TOKEN.to_string())
        .build()
        .map_err(|e| anyhow!("Unable to load vocabulary from {}: {}", vocab, e))?;

    assemble(wordpiece, lowercase, max_len)
}

/// Wire up the BERT normalizer, pre-tokenizer, and `[CLS] ... [SEP]` post-processor
pub fn assemble(
    wordpiece: WordPiece,
    lowercase: bool,
    max_len: usize,
) -> anyhow::Result<Tokenizer> {
    let cls_id = wordpiece
        .token_to_id(CLS_TOKEN)
        .ok_or_else(|| anyhow!("Vocabulary is missing the {} token", CLS_TOKEN))?;

    let sep_id = wordpiece
        .token_to_id(SEP_TOKEN)
        .ok_or_else(|| anyhow!("Vocabulary is missing the {} token", SEP_TOKEN))?;

    let mut tokenizer = Tokenizer::new(wordpiece);

    tokenizer
        .with_normalizer(NormalizerWrapper::BertNormalizer(BertNormalizer::new(
            true, true, None, lowercase,
        )))
        .with_pre_tokenizer(PreTokenizerWrapper::BertPreTokenizer(BertPreTokenizer))
        .with_post_processor(PostProcessorWrapper::Bert(BertProcessing::new(
            (SEP_TOKEN.to_string(), sep_id),
            (CLS_TOKEN.to_string(), cls_id),
        )));

    with_truncation(tokenizer, max_len)
}

fn with_truncation(mut tokenizer: Tokenizer, max_len: usize) -> anyhow::Result<Tokenizer> {
    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length: max_len,
            ..Default::default()
        }))
        .map_err(|e| anyhow!("Unable to configure tokenizer truncation: {}", e))?;

    Ok(tokenizer)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    /// A tokenizer over a handful of financial words, for tests that need real encodings
    pub(crate) fn tiny_tokenizer(max_len: usize) -> Tokenizer {
        let vocab: HashMap<String, u32> = [
            "[PAD]", "[UNK]", "[CLS]", "[SEP]", "profits", "rose", "losses", "fell",
        ]
        .iter()
        .enumerate()
        .map(|(i, token)| (token.to_string(), i as u32))
        .collect();

        let wordpiece = WordPiece::builder()
            .vocab(vocab)
            .unk_token(UNK_TOKEN.to_string())
            .build()
            .expect("wordpiece should build");

        assemble(wordpiece, true, max_len).expect("tokenizer should assemble")
    }

    #[test]
    fn test_lowercases_and_maps_unknown_words() {
        let encoding = tiny_tokenizer(16)
            .encode("Losses widened", true)
            .expect("text should encode");

        assert_eq!(encoding.get_ids(), &[2, 6, 1, 3]);
    }

    #[test]
    fn test_truncates_to_max_len() {
        let encoding = tiny_tokenizer(4)
            .encode("profits rose losses fell", true)
            .expect("text should encode");

        assert_eq!(encoding.get_ids().len(), 4);
        assert_eq!(encoding.get_ids().first(), Some(&2));
        assert_eq!(encoding.get_ids().last(), Some(&3));
    }
}
