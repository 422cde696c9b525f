//! Console commands

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Amount(String),
    Recipient(String),
    Transfer,
    Mint,
    Refresh,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line. `None` for blank or unknown input.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim().to_string();

        match word.to_ascii_lowercase().as_str() {
            "amount" => Some(Command::Amount(rest)),
            "to" | "recipient" => Some(Command::Recipient(rest)),
            "transfer" | "send" => Some(Command::Transfer),
            "mint" => Some(Command::Mint),
            "refresh" | "balance" => Some(Command::Refresh),
            "help" | "?" => Some(Command::Help),
            "quit" | "exit" | "q" => Some(Command::Quit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("amount 5"), Some(Command::Amount("5".into())));
        assert_eq!(Command::parse("  AMOUNT   0.5 "), Some(Command::Amount("0.5".into())));
        assert_eq!(
            Command::parse("to 0x837DEb7B906fbcE871E80CF833f76f8562f598B3"),
            Some(Command::Recipient("0x837DEb7B906fbcE871E80CF833f76f8562f598B3".into()))
        );
        assert_eq!(Command::parse("transfer"), Some(Command::Transfer));
        assert_eq!(Command::parse("mint"), Some(Command::Mint));
        assert_eq!(Command::parse("refresh"), Some(Command::Refresh));
        assert_eq!(Command::parse("q"), Some(Command::Quit));
    }

    #[test]
    fn test_bare_amount_clears_field() {
        assert_eq!(Command::parse("amount"), Some(Command::Amount(String::new())));
    }

    #[test]
    fn test_unknown_input() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("burn 5"), None);
    }
}
