//! Hangman in the terminal.
//!
//! The [`game`] module holds the round state and the screen machine,
//! [`words`] provides random words, and [`tui`] wires both to a
//! ratatui interface.

pub mod game;
pub mod tui;
pub mod words;
