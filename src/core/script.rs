//! Session script parser
//!
//! The CLI drives the engine with one command per line, in interactive
//! mode and from script files. Grammar:
//!
//! ```text
//! start                begin the attempt
//! turn <delta>         feed a crown rotation (aliases: t, crank)
//! commit               lock in the active stage (aliases: c, set)
//! back                 step the cursor back one stage
//! reset                return the active stage to rest
//! wait <secs>          advance the clock in 100 ms ticks (alias: w)
//! hr <bpm>             set the simulated heart rate
//! status               print the session status
//! quit                 end the run (aliases: exit, q)
//! ```
//!
//! Blank lines and `#` comments are skipped.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_TURN: Regex =
        Regex::new(r"(?i)^(?:turn|t|crank)\s+([+-]?(?:\d+(?:\.\d*)?|\.\d+))$").unwrap();
    static ref RE_WAIT: Regex =
        Regex::new(r"(?i)^(?:wait|w)\s+(\d+(?:\.\d*)?|\.\d+)$").unwrap();
    static ref RE_HR: Regex = Regex::new(r"(?i)^hr\s+(\d+(?:\.\d+)?)$").unwrap();

    // Prefix forms, matched only to produce a better error
    static ref RE_TURN_PREFIX: Regex = Regex::new(r"(?i)^(?:turn|t|crank)\b").unwrap();
    static ref RE_WAIT_PREFIX: Regex = Regex::new(r"(?i)^(?:wait|w)\b").unwrap();
    static ref RE_HR_PREFIX: Regex = Regex::new(r"(?i)^hr\b").unwrap();
}

/// One parsed driver command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Start,
    Turn(f64),
    Commit,
    Back,
    Reset,
    Wait(f64),
    HeartRate(f64),
    Status,
    Quit,
}

/// Why a line did not parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// Blank line or comment; callers skip these silently
    Empty,
    /// Command recognized but its numeric argument was not
    BadArgument(String),
    /// Line matched no command
    Unknown(String),
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptError::Empty => write!(f, "empty line"),
            ScriptError::BadArgument(line) => {
                write!(f, "bad argument in '{}' (expected a number)", line)
            }
            ScriptError::Unknown(line) => write!(
                f,
                "unknown command '{}' (try: start, turn <delta>, commit, back, reset, wait <secs>, hr <bpm>, status, quit)",
                line
            ),
        }
    }
}

/// Parse one line into a command
pub fn parse_command(line: &str) -> Result<Command, ScriptError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Err(ScriptError::Empty);
    }

    if let Some(caps) = RE_TURN.captures(line) {
        return number(&caps[1], line).map(Command::Turn);
    }
    if let Some(caps) = RE_WAIT.captures(line) {
        return number(&caps[1], line).map(Command::Wait);
    }
    if let Some(caps) = RE_HR.captures(line) {
        return number(&caps[1], line).map(Command::HeartRate);
    }

    match line.to_ascii_lowercase().as_str() {
        "start" => return Ok(Command::Start),
        "commit" | "c" | "set" => return Ok(Command::Commit),
        "back" | "b" => return Ok(Command::Back),
        "reset" => return Ok(Command::Reset),
        "status" | "s" => return Ok(Command::Status),
        "quit" | "exit" | "q" => return Ok(Command::Quit),
        _ => {}
    }

    if RE_TURN_PREFIX.is_match(line) || RE_WAIT_PREFIX.is_match(line) || RE_HR_PREFIX.is_match(line)
    {
        return Err(ScriptError::BadArgument(line.to_string()));
    }

    Err(ScriptError::Unknown(line.to_string()))
}

fn number(text: &str, line: &str) -> Result<f64, ScriptError> {
    text.parse::<f64>()
        .map_err(|_| ScriptError::BadArgument(line.to_string()))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_turn_forms() {
        assert_eq!(parse_command("turn 0.25").unwrap(), Command::Turn(0.25));
        assert_eq!(parse_command("t -0.1").unwrap(), Command::Turn(-0.1));
        assert_eq!(parse_command("CRANK +.5").unwrap(), Command::Turn(0.5));
    }

    #[test]
    fn test_parse_bare_commands() {
        assert_eq!(parse_command("start").unwrap(), Command::Start);
        assert_eq!(parse_command("commit").unwrap(), Command::Commit);
        assert_eq!(parse_command("SET").unwrap(), Command::Commit);
        assert_eq!(parse_command("back").unwrap(), Command::Back);
        assert_eq!(parse_command("reset").unwrap(), Command::Reset);
        assert_eq!(parse_command("status").unwrap(), Command::Status);
        assert_eq!(parse_command("q").unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_wait_and_hr() {
        assert_eq!(parse_command("wait 1.5").unwrap(), Command::Wait(1.5));
        assert_eq!(parse_command("w 0.1").unwrap(), Command::Wait(0.1));
        assert_eq!(parse_command("hr 130").unwrap(), Command::HeartRate(130.0));
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(parse_command(""), Err(ScriptError::Empty));
        assert_eq!(parse_command("   "), Err(ScriptError::Empty));
        assert_eq!(parse_command("# a note"), Err(ScriptError::Empty));
    }

    #[test]
    fn test_bad_argument() {
        assert!(matches!(
            parse_command("turn fast"),
            Err(ScriptError::BadArgument(_))
        ));
        assert!(matches!(
            parse_command("wait"),
            Err(ScriptError::BadArgument(_))
        ));
        assert!(matches!(
            parse_command("hr high"),
            Err(ScriptError::BadArgument(_))
        ));
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_command("wiggle 3").unwrap_err();
        assert!(matches!(err, ScriptError::Unknown(_)));
        assert!(err.to_string().contains("unknown command"));
    }
}
