// SPDX-License-Identifier: MIT
// Copyright (c) 2020 Austin Goudge
// Copyright (c) 2026 StarTuz

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Verb used for the VCI toggle, typed either as `// <fid>` or `//<fid>`.
pub const VCI_VERB: &str = "//";

/// A message typed into the message compose area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub verb: String,
    pub args: Vec<String>,
    /// Text as the controller typed it, echoed back in some responses.
    pub raw: String,
}

impl Command {
    pub fn parse(text: &str) -> Self {
        static VCI_RE: OnceLock<Regex> = OnceLock::new();
        let vci_re = VCI_RE.get_or_init(|| Regex::new(r"^//(\w+)").unwrap());

        let mut tokens = text.split_whitespace().map(|s| s.to_uppercase());
        let first = tokens.next().unwrap_or_default();

        // `//N123` is shorthand for `// N123`; anything after the first token is ignored.
        if vci_re.is_match(&first) {
            return Self {
                verb: VCI_VERB.to_string(),
                args: vec![first[VCI_VERB.len()..].to_string()],
                raw: text.to_string(),
            };
        }

        Self {
            verb: first,
            args: tokens.collect(),
            raw: text.to_string(),
        }
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uppercases_and_splits() {
        let cmd = Command::parse("  qu  abcfx\tn123 ");
        assert_eq!(cmd.verb, "QU");
        assert_eq!(cmd.args, vec!["ABCFX", "N123"]);
        assert_eq!(cmd.raw, "  qu  abcfx\tn123 ");
        assert_eq!(cmd.arity(), 2);
    }

    #[test]
    fn test_parse_vci_shorthand() {
        let cmd = Command::parse("//n123");
        assert_eq!(cmd.verb, "//");
        assert_eq!(cmd.args, vec!["N123"]);

        let spaced = Command::parse("// N123");
        assert_eq!(spaced.verb, "//");
        assert_eq!(spaced.args, vec!["N123"]);
    }

    #[test]
    fn test_parse_empty() {
        let cmd = Command::parse("   ");
        assert_eq!(cmd.verb, "");
        assert!(cmd.args.is_empty());
    }
}
