// SPDX-License-Identifier: MIT
// Copyright (c) 2020 Austin Goudge
// Copyright (c) 2026 StarTuz

//! Dot-delimited route strings and the fix sequences derived from them.
//!
//! A raw route looks like `..OAK.J5.SAC.SAC5.KRNO`: fixes and airways
//! separated by one or more dots. A leading `..` marks "present position
//! direct", and routes fed from the flight-data source may start with a
//! fix-radial-distance placeholder (e.g. `OAK090012..`) that is not a fix.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteFix {
    pub name: String,
    #[serde(default)]
    pub pos: Option<Position>,
}

impl RouteFix {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pos: None,
        }
    }
}

/// Fix name to position lookup supplied by the caller (adaptation data).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixTable {
    fixes: HashMap<String, Position>,
}

impl FixTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, pos: Position) {
        self.fixes.insert(name.into().to_uppercase(), pos);
    }

    pub fn get(&self, name: &str) -> Option<Position> {
        self.fixes.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }
}

impl FromIterator<(String, Position)> for FixTable {
    fn from_iter<I: IntoIterator<Item = (String, Position)>>(iter: I) -> Self {
        let mut table = FixTable::new();
        for (name, pos) in iter {
            table.insert(name, pos);
        }
        table
    }
}

fn separator_re() -> &'static Regex {
    static SEP_RE: OnceLock<Regex> = OnceLock::new();
    SEP_RE.get_or_init(|| Regex::new(r"\.+").unwrap())
}

/// Fix-radial-distance placeholders: fix identifier followed by radial and distance.
fn is_position_marker(token: &str) -> bool {
    static FRD_RE: OnceLock<Regex> = OnceLock::new();
    FRD_RE
        .get_or_init(|| Regex::new(r"^[A-Z]{2,5}\d{6}$").unwrap())
        .is_match(token)
}

/// Splits a raw route into its fix sequence.
///
/// Empty tokens are dropped, as are placeholder tokens at the head of the
/// route. Names missing from `table` are kept without a position.
pub fn parse_route(raw: &str, table: &FixTable) -> Vec<RouteFix> {
    separator_re()
        .split(raw.trim())
        .filter(|token| !token.is_empty())
        .skip_while(|token| is_position_marker(token))
        .map(|token| RouteFix {
            name: token.to_string(),
            pos: table.get(token),
        })
        .collect()
}

/// Same as [`parse_route`] after removing a trailing destination, which is
/// how an entry's stored fix sequence is derived from its route.
pub fn parse_route_with_destination(
    raw: &str,
    destination: &str,
    table: &FixTable,
) -> Vec<RouteFix> {
    parse_route(&strip_destination(raw, destination), table)
}

/// Joins fix names with single dots. Callers add the leading `..` themselves.
pub fn serialize_route(fixes: &[RouteFix]) -> String {
    fixes
        .iter()
        .map(|fix| fix.name.as_str())
        .collect::<Vec<_>>()
        .join(".")
}

/// Removes one trailing occurrence of `destination` for display.
pub fn strip_destination(route: &str, destination: &str) -> String {
    if destination.is_empty() {
        return route.to_string();
    }
    match route.strip_suffix(destination) {
        Some(rest) => rest.to_string(),
        None => route.to_string(),
    }
}

pub fn strip_leading_dots(route: &str) -> &str {
    route.trim_start_matches('.')
}

/// The form sent to the flight-data server: dot runs become single spaces.
pub fn route_to_amendment_text(route: &str) -> String {
    separator_re()
        .split(route)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

pub fn fix_names(fixes: &[RouteFix]) -> Vec<String> {
    fixes.iter().map(|fix| fix.name.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> FixTable {
        let mut table = FixTable::new();
        table.insert(
            "OAK",
            Position {
                lat: 37.7258,
                lon: -122.2236,
            },
        );
        table.insert(
            "SAC",
            Position {
                lat: 38.4438,
                lon: -121.5519,
            },
        );
        table
    }

    #[test]
    fn test_parse_route_resolves_known_fixes() {
        let fixes = parse_route("OAK.J5.SAC", &table());
        assert_eq!(fix_names(&fixes), vec!["OAK", "J5", "SAC"]);
        assert!(fixes[0].pos.is_some());
        assert!(fixes[1].pos.is_none(), "airway has no position");
        assert!(fixes[2].pos.is_some());
    }

    #[test]
    fn test_parse_route_skips_leading_markers() {
        let fixes = parse_route("OAK090012..OAK.J5..SAC", &table());
        assert_eq!(fix_names(&fixes), vec!["OAK", "J5", "SAC"]);

        let fixes = parse_route("..SAC.J5", &table());
        assert_eq!(fix_names(&fixes), vec!["SAC", "J5"]);
    }

    #[test]
    fn test_placeholder_only_skipped_at_head() {
        let fixes = parse_route("SAC.OAK090012", &FixTable::new());
        assert_eq!(fix_names(&fixes), vec!["SAC", "OAK090012"]);
    }

    #[test]
    fn test_destination_excluded() {
        let fixes = parse_route_with_destination("OAK.J5.SAC.KRNO", "KRNO", &table());
        assert_eq!(fix_names(&fixes), vec!["OAK", "J5", "SAC"]);
    }

    #[test]
    fn test_strip_destination_only_trailing() {
        assert_eq!(strip_destination("OAK.J5.SACKRNO", "KRNO"), "OAK.J5.SAC");
        assert_eq!(strip_destination("KRNO.OAK", "KRNO"), "KRNO.OAK");
        assert_eq!(strip_destination("OAK", ""), "OAK");
    }

    #[test]
    fn test_serialize_round_trip_on_fix_names() {
        let raw = "..OAK...J5.SAC";
        let fixes = parse_route(raw, &table());
        let again = parse_route(&serialize_route(&fixes), &table());
        assert_eq!(fix_names(&fixes), fix_names(&again));
        assert_eq!(serialize_route(&fixes), "OAK.J5.SAC");
    }

    #[test]
    fn test_amendment_text() {
        assert_eq!(route_to_amendment_text("..ABCFX.J5..XYZ"), "ABCFX J5 XYZ");
        assert_eq!(strip_leading_dots("..ABCFX.J5"), "ABCFX.J5");
    }
}
