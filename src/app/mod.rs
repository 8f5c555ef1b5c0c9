pub mod terminal_game;

pub use terminal_game::TerminalGame;
