//! Interactive-mode input lines.
//!
//! Plain lines are search queries, sent verbatim (including blank ones).
//! Lines starting with `:` are commands.

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit the line as a search query.
    Search(String),
    /// `:open <id>` - toggle expansion of a card.
    Toggle(String),
    /// `:dismiss` - close the error panel.
    Dismiss,
    /// `:help`
    Help,
    /// `:quit` / `:q`
    Quit,
    /// Unrecognized `:` command.
    Unknown(String),
}

/// Usage text printed by `:help` and at startup.
pub const HELP: &str = "\
Type a query and press Enter to search. Commands:
  :open <id>   expand or collapse a result
  :dismiss     close the error panel
  :help        show this help
  :quit        exit";

/// Parse a line read from the terminal (without its newline).
pub fn parse_command(line: &str) -> Command {
    let Some(rest) = line.strip_prefix(':') else {
        return Command::Search(line.to_string());
    };

    let mut parts = rest.trim().splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).unwrap_or_default();

    match name {
        "open" | "toggle" | "o" if !arg.is_empty() => Command::Toggle(arg.to_string()),
        "dismiss" | "d" => Command::Dismiss,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_line_is_search() {
        assert_eq!(parse_command("weather"), Command::Search("weather".into()));
    }

    #[test]
    fn blank_line_is_still_a_search() {
        assert_eq!(parse_command(""), Command::Search(String::new()));
        assert_eq!(parse_command("   "), Command::Search("   ".into()));
    }

    #[test]
    fn open_takes_an_id() {
        assert_eq!(parse_command(":open abc123"), Command::Toggle("abc123".into()));
        assert_eq!(parse_command(":o  x "), Command::Toggle("x".into()));
    }

    #[test]
    fn open_without_id_is_unknown() {
        assert_eq!(parse_command(":open"), Command::Unknown(":open".into()));
    }

    #[test]
    fn simple_commands() {
        assert_eq!(parse_command(":dismiss"), Command::Dismiss);
        assert_eq!(parse_command(":help"), Command::Help);
        assert_eq!(parse_command(":q"), Command::Quit);
        assert_eq!(parse_command(":quit"), Command::Quit);
    }

    #[test]
    fn unknown_command_is_reported() {
        assert_eq!(parse_command(":frobnicate"), Command::Unknown(":frobnicate".into()));
    }
}
