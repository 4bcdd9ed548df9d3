use std::sync::Arc;

use anyhow::Result;

use super::*;
use crate::game::MAX_WORD_LENGTH;

#[derive(Debug)]
pub enum Action {
    Exit,
    /// Start the first game, or a new one from a finished round or a
    /// failed fetch. Ignored on every other screen.
    Confirm,
    Guess(char),
    FetchWord,
    WordFetched(Result<String>),
}

impl App {
    pub fn update(&mut self, msg: Option<Action>) {
        if let Some(msg) = msg {
            match msg {
                Action::Exit => {
                    self.token.cancel();
                    self.exit = true;
                }
                Action::Confirm => {
                    if self.screen.accepts_confirm() {
                        self.start_new_game();
                    }
                }
                Action::Guess(key) => {
                    self.guess(key);
                }
                Action::FetchWord => {
                    self.fetch_word();
                }
                Action::WordFetched(result) => {
                    self.word_fetched(result);
                }
            }
        }
    }

    /// Clear the round and request a fresh word.
    fn start_new_game(&mut self) {
        self.round = Round::default();
        self.error = None;
        self.fetch_attempts = 0;
        self.screen = Screen::Loading;
        self.action_tx.send(Some(Action::FetchWord)).unwrap();
    }

    fn guess(&mut self, key: char) {
        if !self.screen.accepts_letters() || !self.round.guess(key) {
            return;
        }
        if self.round.is_lost() {
            self.screen = Screen::GameOver;
        } else if self.round.is_won() {
            self.screen = Screen::GameWon;
        }
    }

    /// Kick off a word fetch in the background. A new fetch supersedes
    /// any fetch still in flight, the superseded one never delivers.
    fn fetch_word(&mut self) {
        self.screen = Screen::Loading;
        self.fetch = FetchStatus::Pending;

        if let Some(token) = self.fetch_token.take() {
            token.cancel();
        }
        let child = self.token.child_token();
        self.fetch_token = Some(child.clone());

        let source = Arc::clone(&self.source);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = tokio::select! {
                biased;
                _ = child.cancelled() => {
                    // The fetch was superseded or the app is exiting
                    None
                }
                result = source.fetch() => {
                    Some(result)
                }
            };
            if let Some(result) = result {
                // The receiver is only gone when the app is shutting down
                let _ = tx.send(Some(Action::WordFetched(result)));
            }
        });
    }

    fn word_fetched(&mut self, result: Result<String>) {
        self.fetch_token = None;
        match result {
            Ok(word) => {
                self.fetch = FetchStatus::Resolved;
                if word.chars().count() > MAX_WORD_LENGTH {
                    // The source violated the length contract, try again
                    self.retry_fetch();
                } else {
                    self.round = Round::new(&word);
                    self.fetch_attempts = 0;
                    self.screen = Screen::Playing;
                }
            }
            Err(err) => {
                self.fetch = FetchStatus::Rejected;
                self.error = Some(format!("{err:#}"));
                self.screen = Screen::Error;
            }
        }
    }

    fn retry_fetch(&mut self) {
        self.fetch_attempts += 1;
        if self.fetch_attempts >= MAX_FETCH_ATTEMPTS {
            self.fetch = FetchStatus::Rejected;
            self.error = Some(format!(
                "The word source keeps returning words longer than {} letters",
                MAX_WORD_LENGTH
            ));
            self.screen = Screen::Error;
        } else {
            self.action_tx.send(Some(Action::FetchWord)).unwrap();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use anyhow::anyhow;
    use futures::future::BoxFuture;

    use super::*;
    use crate::words::WordSource;

    struct FixedSource(&'static str);

    impl WordSource for FixedSource {
        fn fetch(&self) -> BoxFuture<'static, Result<String>> {
            let word = self.0.to_string();
            Box::pin(async move { Ok(word) })
        }
    }

    fn app() -> App {
        App::init(Arc::new(FixedSource("apple")))
    }

    fn playing_app(word: &str) -> App {
        let mut app = app();
        app.update(Some(Action::WordFetched(Ok(word.to_string()))));
        assert_eq!(app.screen, Screen::Playing);
        app
    }

    fn next_action(app: &mut App) -> Option<Action> {
        app.action_rx.try_recv().expect("no action queued")
    }

    #[test]
    fn confirm_on_first_game_requests_a_word() {
        let mut app = app();
        app.update(Some(Action::Confirm));
        assert_eq!(app.screen, Screen::Loading);
        assert!(matches!(next_action(&mut app), Some(Action::FetchWord)));
    }

    #[test]
    fn resolved_word_starts_playing() {
        let mut app = app();
        app.update(Some(Action::WordFetched(Ok("apple".to_string()))));
        assert_eq!(app.screen, Screen::Playing);
        assert_eq!(app.fetch, FetchStatus::Resolved);
        assert_eq!(app.round.word(), "APPLE");
    }

    #[test]
    fn letters_are_ignored_outside_playing() {
        let mut app = app();
        app.update(Some(Action::Guess('a')));
        assert!(app.round.used_letters().is_empty());

        app.screen = Screen::Loading;
        app.update(Some(Action::Guess('a')));
        assert!(app.round.used_letters().is_empty());
    }

    #[test]
    fn confirm_is_ignored_while_playing_or_loading() {
        let mut app = playing_app("apple");
        app.update(Some(Action::Confirm));
        assert_eq!(app.screen, Screen::Playing);

        app.screen = Screen::Loading;
        app.update(Some(Action::Confirm));
        assert!(app.action_rx.try_recv().is_err());
    }

    #[test]
    fn eleven_misses_end_the_round() {
        let mut app = playing_app("apple");
        for key in "bcdfghijkmn".chars() {
            app.update(Some(Action::Guess(key)));
        }
        assert_eq!(app.round.missed_letters().len(), 11);
        assert_eq!(app.screen, Screen::GameOver);

        // Round is over, further letters change nothing
        app.update(Some(Action::Guess('o')));
        assert_eq!(app.round.used_letters().len(), 11);
    }

    #[test]
    fn guessing_every_letter_wins() {
        let mut app = playing_app("apple");
        for key in "aple".chars() {
            app.update(Some(Action::Guess(key)));
        }
        assert_eq!(app.screen, Screen::GameWon);
    }

    #[test]
    fn new_game_resets_the_round() {
        let mut app = playing_app("apple");
        for key in "aple".chars() {
            app.update(Some(Action::Guess(key)));
        }
        app.update(Some(Action::Confirm));
        assert_eq!(app.screen, Screen::Loading);
        assert!(app.round.used_letters().is_empty());
        assert_eq!(app.fetch_attempts, 0);
        assert!(matches!(next_action(&mut app), Some(Action::FetchWord)));
    }

    #[test]
    fn too_long_words_trigger_a_refetch() {
        let mut app = app();
        app.update(Some(Action::WordFetched(Ok("bananas".to_string()))));
        assert_eq!(app.fetch_attempts, 1);
        assert_eq!(app.screen, Screen::Loading);
        assert!(matches!(next_action(&mut app), Some(Action::FetchWord)));
    }

    #[test]
    fn refetching_gives_up_after_the_attempt_limit() {
        let mut app = app();
        for _ in 0..MAX_FETCH_ATTEMPTS {
            app.update(Some(Action::WordFetched(Ok("bananas".to_string()))));
        }
        assert_eq!(app.screen, Screen::Error);
        assert_eq!(app.fetch, FetchStatus::Rejected);
        assert!(app.error.is_some());
    }

    #[test]
    fn failed_fetch_shows_the_error_screen() {
        let mut app = app();
        app.update(Some(Action::WordFetched(Err(anyhow!("connection reset")))));
        assert_eq!(app.screen, Screen::Error);
        assert_eq!(app.fetch, FetchStatus::Rejected);
        assert_eq!(app.error.as_deref(), Some("connection reset"));

        // The player can recover with a new game
        app.update(Some(Action::Confirm));
        assert_eq!(app.screen, Screen::Loading);
        assert!(app.error.is_none());
    }

    #[tokio::test]
    async fn fetch_word_delivers_the_fetched_word() {
        let mut app = app();
        app.update(Some(Action::FetchWord));
        assert_eq!(app.fetch, FetchStatus::Pending);

        let action = app.action_rx.recv().await.unwrap();
        assert!(matches!(action, Some(Action::WordFetched(Ok(ref w))) if w == "apple"));
    }

    /// First fetch never resolves, the second one supersedes it.
    struct SlowThenFast {
        first: AtomicBool,
    }

    impl WordSource for SlowThenFast {
        fn fetch(&self) -> BoxFuture<'static, Result<String>> {
            if self.first.swap(false, Ordering::SeqCst) {
                Box::pin(futures::future::pending())
            } else {
                Box::pin(async { Ok("quick".to_string()) })
            }
        }
    }

    #[tokio::test]
    async fn a_new_fetch_supersedes_the_old_one() {
        let source = SlowThenFast {
            first: AtomicBool::new(true),
        };
        let mut app = App::init(Arc::new(source));

        app.update(Some(Action::FetchWord));
        app.update(Some(Action::FetchWord));

        let action = app.action_rx.recv().await.unwrap();
        assert!(matches!(action, Some(Action::WordFetched(Ok(ref w))) if w == "quick"));
        assert!(app.action_rx.try_recv().is_err());
    }
}
