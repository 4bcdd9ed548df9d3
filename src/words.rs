use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use futures::future::BoxFuture;
use rand::seq::SliceRandom;

/// Lifecycle of the single outstanding word fetch.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FetchStatus {
    /// No fetch has been issued yet.
    #[default]
    Idle,
    Pending,
    Resolved,
    Rejected,
}

/// Something that can produce a random word.
///
/// The built-in implementation is [`Dictionary`]; tests plug in scripted
/// sources. A source makes no promise about word length, the caller has
/// to reject unsuitable words itself.
pub trait WordSource: Send + Sync {
    fn fetch(&self) -> BoxFuture<'static, Result<String>>;
}

static BUILTIN_WORDS: &str = include_str!("../data/words.txt");

/// A word list backed by a plain text file, one word per line.
#[derive(Clone, Debug)]
pub struct Dictionary {
    words: Vec<String>,
}

impl Dictionary {
    /// The word list shipped with the binary.
    pub fn builtin() -> Dictionary {
        Dictionary {
            words: parse_word_list(BUILTIN_WORDS),
        }
    }

    /// Load a user-supplied word list. Blank lines and `#` comments are
    /// skipped; words are uppercased.
    pub fn from_file(path: &Path) -> Result<Dictionary> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Couldn't read word list {}", path.display()))?;
        let words = parse_word_list(&text);
        if words.is_empty() {
            bail!("Word list {} contains no words", path.display());
        }
        Ok(Dictionary { words })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordSource for Dictionary {
    fn fetch(&self) -> BoxFuture<'static, Result<String>> {
        let word = self.words.choose(&mut rand::thread_rng()).cloned();
        Box::pin(async move {
            match word {
                Some(word) => Ok(word),
                None => bail!("The word list is empty"),
            }
        })
    }
}

fn parse_word_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_uppercase)
        .collect()
}
