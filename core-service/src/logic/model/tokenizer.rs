//! WordPiece Tokenizer
//!
//! Uncased BERT-style tokenization for the sentiment model:
//! lowercase, split on whitespace and punctuation, then greedy
//! longest-match-first WordPiece with `##` continuations.

use std::collections::HashMap;
use std::path::Path;

use super::ModelError;

pub const UNK_TOKEN: &str = "[UNK]";
pub const CLS_TOKEN: &str = "[CLS]";
pub const SEP_TOKEN: &str = "[SEP]";

/// Words longer than this become [UNK]
const MAX_CHARS_PER_WORD: usize = 100;

#[derive(Debug, Clone)]
pub struct WordPieceTokenizer {
    vocab: HashMap<String, i64>,
    unk_id: i64,
    cls_id: i64,
    sep_id: i64,
}

impl WordPieceTokenizer {
    /// One token per line, id = line number
    pub fn from_vocab_file(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::NotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_tokens(content.lines())
    }

    pub fn from_tokens<'a, I>(tokens: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let vocab: HashMap<String, i64> = tokens
            .into_iter()
            .enumerate()
            .map(|(i, t)| (t.trim_end().to_string(), i as i64))
            .collect();

        let special = |t: &str| {
            vocab
                .get(t)
                .copied()
                .ok_or_else(|| ModelError::Load(format!("vocab is missing {}", t)))
        };

        Ok(Self {
            unk_id: special(UNK_TOKEN)?,
            cls_id: special(CLS_TOKEN)?,
            sep_id: special(SEP_TOKEN)?,
            vocab,
        })
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// [CLS] tokens... [SEP], at most `max_len` ids in total
    pub fn encode(&self, text: &str, max_len: usize) -> Vec<i64> {
        let budget = max_len.saturating_sub(2);
        let mut ids = Vec::with_capacity(budget.min(64) + 2);
        ids.push(self.cls_id);

        'words: for word in basic_tokenize(text) {
            for id in self.word_piece(&word) {
                if ids.len() > budget {
                    break 'words;
                }
                ids.push(id);
            }
        }

        ids.push(self.sep_id);
        ids
    }

    fn word_piece(&self, word: &str) -> Vec<i64> {
        let chars: Vec<char> = word.chars().collect();
        if chars.len() > MAX_CHARS_PER_WORD {
            return vec![self.unk_id];
        }

        let mut pieces = Vec::new();
        let mut start = 0;
        while start < chars.len() {
            let mut end = chars.len();
            let mut found = None;

            while start < end {
                let mut candidate: String = chars[start..end].iter().collect();
                if start > 0 {
                    candidate.insert_str(0, "##");
                }
                if let Some(&id) = self.vocab.get(&candidate) {
                    found = Some(id);
                    break;
                }
                end -= 1;
            }

            match found {
                Some(id) => {
                    pieces.push(id);
                    start = end;
                }
                None => return vec![self.unk_id],
            }
        }

        pieces
    }
}

/// Lowercase, split on whitespace, punctuation becomes its own token,
/// control characters are dropped.
pub fn basic_tokenize(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else if c.is_ascii_punctuation() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            words.push(c.to_string());
        } else if !c.is_control() {
            current.push(c);
        }
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}
