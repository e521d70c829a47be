//! Text normalization: stop words and tokenization.
//!
//! - [`StopWords`] - the excluded vocabulary, loaded once per run
//! - [`tokenize`] - splits a message into normalized word tokens

pub mod stopwords;
pub mod tokenizer;

pub use stopwords::{StopWordMatch, StopWords};
pub use tokenizer::{Tokens, longest_word_run, tokenize};
