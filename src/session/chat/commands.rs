// Chat control tokens

pub const EXIT_COMMAND: &str = "#exit";
pub const START_OVER_COMMAND: &str = "#startover";
pub const MULTILINE_COMMAND: &str = "#multiline";

// List of all available commands for autocomplete
pub const COMMANDS: [&str; 3] = [EXIT_COMMAND, START_OVER_COMMAND, MULTILINE_COMMAND];
