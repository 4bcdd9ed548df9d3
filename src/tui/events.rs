use futures::StreamExt;
use tokio::sync::mpsc;

use super::actions::Action;
use super::App;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind};

impl App {
    /// Spawn the task that turns terminal events into actions. Events
    /// that carry no action (a resize, say) send `None` so the main
    /// loop still redraws.
    pub fn handle_events(
        &mut self,
        tx: mpsc::UnboundedSender<Option<Action>>,
    ) -> tokio::task::JoinHandle<()> {
        let token = self.token.clone();
        tokio::spawn(async move {
            let mut events = EventStream::new();
            loop {
                let event = tokio::select! {
                    _ = token.cancelled() => break,
                    event = events.next() => event,
                };
                let action = match event {
                    Some(Ok(Event::Key(key))) => handle_key_event(key),
                    Some(Ok(_)) => None,
                    Some(Err(_)) | None => break,
                };
                if tx.send(action).is_err() {
                    break;
                }
            }
        })
    }
}

fn handle_key_event(key: KeyEvent) -> Option<Action> {
    // Only key presses count, crossterm also emits release and repeat
    // events on Windows.
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let action = match key.code {
        KeyCode::Esc => Action::Exit,
        KeyCode::Enter => Action::Confirm,
        KeyCode::Char(x) if x.is_ascii_alphabetic() => Action::Guess(x),
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn letters_map_to_guesses() {
        assert!(matches!(
            handle_key_event(press(KeyCode::Char('a'))),
            Some(Action::Guess('a'))
        ));
        assert!(matches!(
            handle_key_event(press(KeyCode::Char('Z'))),
            Some(Action::Guess('Z'))
        ));
    }

    #[test]
    fn non_alphabetic_keys_map_to_nothing() {
        assert!(handle_key_event(press(KeyCode::Char('1'))).is_none());
        assert!(handle_key_event(press(KeyCode::Char('-'))).is_none());
        assert!(handle_key_event(press(KeyCode::Tab)).is_none());
    }

    #[test]
    fn key_releases_are_ignored() {
        let mut release = press(KeyCode::Char('a'));
        release.kind = KeyEventKind::Release;
        release.state = KeyEventState::NONE;
        assert!(handle_key_event(release).is_none());
    }
}
