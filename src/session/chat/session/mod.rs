// Session controller and outer conversation driver
mod core;
mod runner;

pub use self::core::{ChatSession, SessionOutcome, SessionState};
pub use runner::run_interactive_session;
