use std::fmt;

/// Words longer than this are rejected and trigger a refetch.
pub const MAX_WORD_LENGTH: usize = 5;

/// Number of misses that completes the gallows figure and loses the round.
pub const MAX_MISSED_LETTERS: usize = 11;

/// A single round of hangman: the word to find and the letters
/// the player has pressed so far, in press order.
///
/// Everything else (missed letters, guessed letters, the outcome) is
/// derived from those two on demand.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Round {
    word: String,
    used: Vec<char>,
}

impl Round {
    /// Start a round for `word`. The word is stored uppercased.
    pub fn new(word: &str) -> Round {
        Round {
            word: word.to_uppercase(),
            used: Vec::new(),
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    /// All letters pressed this round, in insertion order.
    pub fn used_letters(&self) -> &[char] {
        &self.used
    }

    /// Register a key press.
    ///
    /// Only single ASCII-alphabetic characters that have not been used
    /// yet are accepted, and only while the round is undecided. The
    /// letter is uppercased before it is recorded. Returns whether the
    /// key was accepted; a rejected key leaves the round untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use hangtui::game::Round;
    /// let mut round = Round::new("apple");
    /// assert!(round.guess('a'));
    /// assert!(!round.guess('A'));
    /// assert!(!round.guess('!'));
    /// assert_eq!(round.used_letters(), ['A']);
    /// ```
    pub fn guess(&mut self, key: char) -> bool {
        if !key.is_ascii_alphabetic() || self.is_over() {
            return false;
        }
        let letter = key.to_ascii_uppercase();
        if self.used.contains(&letter) {
            return false;
        }
        self.used.push(letter);
        true
    }

    /// Used letters that do not appear in the word.
    pub fn missed_letters(&self) -> Vec<char> {
        self.used
            .iter()
            .copied()
            .filter(|l| !self.word.contains(*l))
            .collect()
    }

    /// Used letters that appear in the word.
    pub fn guessed_letters(&self) -> Vec<char> {
        self.used
            .iter()
            .copied()
            .filter(|l| self.word.contains(*l))
            .collect()
    }

    /// Whether a character of the word should be shown to the player.
    /// Guessed letters are revealed, and so is anything that cannot be
    /// guessed at all (a hyphen, for instance).
    pub fn is_revealed(&self, c: char) -> bool {
        !c.is_ascii_alphabetic() || self.used.contains(&c)
    }

    /// The round is lost when the misses have reached the limit.
    pub fn is_lost(&self) -> bool {
        self.missed_letters().len() == MAX_MISSED_LETTERS
    }

    /// The round is won when every letter of the word has been guessed.
    /// An empty round (no word yet) is never won.
    pub fn is_won(&self) -> bool {
        !self.word.is_empty()
            && self
                .word
                .chars()
                .filter(|c| c.is_ascii_alphabetic())
                .all(|c| self.used.contains(&c))
    }

    pub fn is_over(&self) -> bool {
        self.is_lost() || self.is_won()
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.word.chars().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            if self.is_revealed(c) {
                write!(f, "{}", c)?;
            } else {
                write!(f, "_")?;
            }
        }
        Ok(())
    }
}

/// The screen currently presented to the player. Exactly one is active
/// at any time; letter input is only accepted while `Playing`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Screen {
    /// Initial screen, shown once until the player starts the first game.
    #[default]
    FirstGame,
    /// A word fetch is outstanding.
    Loading,
    /// The word fetch failed.
    Error,
    Playing,
    GameWon,
    GameOver,
}

impl Screen {
    pub fn accepts_letters(self) -> bool {
        matches!(self, Screen::Playing)
    }

    /// Screens that wait for the explicit start/new-game action.
    pub fn accepts_confirm(self) -> bool {
        matches!(
            self,
            Screen::FirstGame | Screen::Error | Screen::GameWon | Screen::GameOver
        )
    }
}
