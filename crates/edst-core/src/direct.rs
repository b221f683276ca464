// SPDX-License-Identifier: MIT
// Copyright (c) 2020 Austin Goudge
// Copyright (c) 2026 StarTuz

use serde::{Deserialize, Serialize};

use crate::entry::{EntryPatch, FlightEntry};
use crate::route::RouteFix;

/// Route resulting from "cleared direct to fix".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectToFix {
    pub fix: String,
    pub route: String,
    pub route_fixes: Vec<RouteFix>,
}

impl DirectToFix {
    /// Patch for the entry store; the replaced route is kept as the previous route.
    pub fn patch(&self, entry: &FlightEntry) -> EntryPatch {
        EntryPatch {
            current_route: Some(self.route.clone()),
            current_route_fixes: Some(self.route_fixes.clone()),
            previous_route: Some(entry.current_route().to_string()),
            previous_route_fixes: Some(entry.current_fixes().to_vec()),
            ..Default::default()
        }
    }
}

/// Truncates a route so that it starts at `fix`.
///
/// The raw text and the resolved fix names do not always agree (airways,
/// abbreviated segments), so the cut point in the raw text is the last
/// fix at or before `fix` whose name appears literally in it. Returns
/// `None` when `fix` is not part of the sequence.
pub fn cleared_direct_to_fix(fix: &str, raw_route: &str, fixes: &[RouteFix]) -> Option<DirectToFix> {
    let index = fixes.iter().position(|f| f.name == fix)?;

    let mut tail = raw_route;
    for name in fixes[..=index].iter().rev().map(|f| f.name.as_str()) {
        if let Some(offset) = raw_route.find(name) {
            tail = &raw_route[offset + name.len()..];
            break;
        }
    }

    log::debug!(
        "[DirectToFix] {} at index {} of {} fixes, tail '{}'",
        fix,
        index,
        fixes.len(),
        tail
    );

    Some(DirectToFix {
        fix: fix.to_string(),
        route: format!("..{}{}", fix, tail),
        route_fixes: fixes[index..].to_vec(),
    })
}

/// [`cleared_direct_to_fix`] against an entry's current route.
pub fn direct_for_entry(entry: &FlightEntry, fix: &str) -> Option<DirectToFix> {
    cleared_direct_to_fix(fix, entry.current_route(), entry.current_fixes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{fix_names, parse_route, FixTable};

    fn fixes(raw: &str) -> Vec<RouteFix> {
        parse_route(raw, &FixTable::new())
    }

    #[test]
    fn test_direct_truncates_before_fix() {
        let raw = "OAK.J5.SAC.J65.RNO";
        let result = cleared_direct_to_fix("SAC", raw, &fixes(raw)).unwrap();
        assert_eq!(result.route, "..SAC.J65.RNO");
        assert_eq!(fix_names(&result.route_fixes), vec!["SAC", "J65", "RNO"]);
    }

    #[test]
    fn test_direct_unknown_fix() {
        let raw = "OAK.J5.SAC";
        assert!(cleared_direct_to_fix("LIN", raw, &fixes(raw)).is_none());
    }

    #[test]
    fn test_direct_walks_back_when_name_missing_from_text() {
        // Expanded airway fixes are not in the raw text; cut after the last one that is.
        let raw = "OAK.J5.RNO";
        let seq: Vec<RouteFix> = ["OAK", "MOD", "LIN", "RNO"]
            .into_iter()
            .map(RouteFix::named)
            .collect();
        let result = cleared_direct_to_fix("LIN", raw, &seq).unwrap();
        assert_eq!(result.route, "..LIN.J5.RNO");
        assert_eq!(fix_names(&result.route_fixes), vec!["LIN", "RNO"]);
    }

    #[test]
    fn test_direct_keeps_whole_text_when_nothing_matches() {
        let seq = vec![RouteFix::named("ZZZ")];
        let result = cleared_direct_to_fix("ZZZ", "J5.J7", &seq).unwrap();
        assert_eq!(result.route, "..ZZZJ5.J7");
    }

    #[test]
    fn test_direct_is_idempotent() {
        let raw = "..OAK.J5.SAC.J65.RNO";
        let first = cleared_direct_to_fix("SAC", raw, &fixes(raw)).unwrap();
        let second = cleared_direct_to_fix("SAC", &first.route, &first.route_fixes).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_patch_records_previous_route() {
        let raw = "OAK.J5.SAC";
        let entry = FlightEntry {
            route: raw.to_string(),
            route_fixes: fixes(raw),
            ..Default::default()
        };
        let patch = direct_for_entry(&entry, "SAC").unwrap().patch(&entry);
        assert_eq!(patch.current_route.as_deref(), Some("..SAC"));
        assert_eq!(patch.previous_route.as_deref(), Some(raw));
    }
}
