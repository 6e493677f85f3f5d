// Chat session module
pub mod commands;
pub mod display;
mod input;
mod interrupt;
mod io;
mod session;
mod terminal;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main structures and functions
pub use commands::{COMMANDS, EXIT_COMMAND, MULTILINE_COMMAND, START_OVER_COMMAND};
pub use input::{classify, read_user_input, ClassifiedInput};
pub use interrupt::InterruptGuard;
pub use io::ChatIo;
pub use session::{run_interactive_session, ChatSession, SessionOutcome, SessionState};
pub use terminal::TerminalIo;
