// SPDX-License-Identifier: MIT
// Copyright (c) 2020 Austin Goudge
// Copyright (c) 2026 StarTuz

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::preferential::PreferentialRouteCandidate;
use crate::route::{fix_names, Position, RouteFix};

/// A flight as held by the external entry store.
///
/// The engine only reads entries and proposes [`EntryPatch`]es.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlightEntry {
    pub aircraft_id: String,
    pub cid: String,
    pub assigned_beacon_code: Option<u16>,
    pub equipment: String,
    pub speed: u32,
    pub altitude: String,
    pub departure: String,
    pub destination: String,
    /// Filed route as received from the flight-data source.
    pub route: String,
    pub route_fixes: Vec<RouteFix>,
    /// Route after amendments, if any were made.
    pub current_route: Option<String>,
    pub current_route_fixes: Option<Vec<RouteFix>>,
    pub formatted_route: String,
    pub previous_route: Option<String>,
    pub previous_route_fixes: Option<Vec<RouteFix>>,
    pub preferential_arrival_routes: Vec<PreferentialRouteCandidate>,
    pub preferential_departure_routes: Vec<PreferentialRouteCandidate>,
    pub vci: bool,
    pub acl_display: bool,
    pub dep_display: bool,
    pub acl_highlighted: bool,
    pub dep_highlighted: bool,
    pub pending_removal: Option<DateTime<Utc>>,
    pub position: Option<Position>,
}

impl FlightEntry {
    pub fn current_route(&self) -> &str {
        self.current_route.as_deref().unwrap_or(&self.route)
    }

    pub fn current_fixes(&self) -> &[RouteFix] {
        self.current_route_fixes
            .as_deref()
            .unwrap_or(&self.route_fixes)
    }

    pub fn current_fix_names(&self) -> Vec<String> {
        fix_names(self.current_fixes())
    }

    pub fn beacon_string(&self) -> String {
        beacon_code_string(self.assigned_beacon_code)
    }

    /// The route as shown in list rows: no leading dots, no destination.
    pub fn display_route(&self) -> String {
        let route = self
            .current_route
            .as_deref()
            .map(crate::route::strip_leading_dots)
            .unwrap_or(&self.formatted_route);
        crate::route::strip_destination(route, &self.destination)
    }
}

/// Partial update for one entry. `None` fields are left untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_route: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_route_fixes: Option<Vec<RouteFix>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_route: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_route_fixes: Option<Vec<RouteFix>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vci: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acl_display: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dep_display: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acl_highlighted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dep_highlighted: Option<bool>,
}

impl EntryPatch {
    pub fn is_empty(&self) -> bool {
        *self == EntryPatch::default()
    }

    /// Merges this patch into `entry`, last writer wins.
    pub fn apply_to(&self, entry: &mut FlightEntry) {
        if let Some(route) = &self.current_route {
            entry.current_route = Some(route.clone());
        }
        if let Some(fixes) = &self.current_route_fixes {
            entry.current_route_fixes = Some(fixes.clone());
        }
        if let Some(route) = &self.previous_route {
            entry.previous_route = Some(route.clone());
        }
        if let Some(fixes) = &self.previous_route_fixes {
            entry.previous_route_fixes = Some(fixes.clone());
        }
        if let Some(vci) = self.vci {
            entry.vci = vci;
        }
        if let Some(display) = self.acl_display {
            entry.acl_display = display;
        }
        if let Some(display) = self.dep_display {
            entry.dep_display = display;
        }
        if let Some(highlighted) = self.acl_highlighted {
            entry.acl_highlighted = highlighted;
        }
        if let Some(highlighted) = self.dep_highlighted {
            entry.dep_highlighted = highlighted;
        }
    }
}

/// Read-only view over the entry store handed to the interpreter.
#[derive(Debug, Clone, Copy)]
pub struct EntrySnapshot<'a> {
    entries: &'a [FlightEntry],
}

impl<'a> EntrySnapshot<'a> {
    pub fn new(entries: &'a [FlightEntry]) -> Self {
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a FlightEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn resolve(&self, fid: &str) -> Option<&'a FlightEntry> {
        resolve(self.entries, fid)
    }
}

/// Four digit, zero padded. Entries without a code render as `0000`.
pub fn beacon_code_string(code: Option<u16>) -> String {
    format!("{:04}", code.unwrap_or(0))
}

/// Finds the entry addressed by a flight identifier.
///
/// Criteria are tried in order across the whole snapshot: cid, then
/// aircraft id, then assigned beacon code. Entries without a beacon code
/// never match on beacon.
pub fn resolve<'a>(entries: &'a [FlightEntry], fid: &str) -> Option<&'a FlightEntry> {
    entries
        .iter()
        .find(|entry| entry.cid == fid)
        .or_else(|| entries.iter().find(|entry| entry.aircraft_id == fid))
        .or_else(|| {
            entries.iter().find(|entry| {
                entry
                    .assigned_beacon_code
                    .map(|code| beacon_code_string(Some(code)) == fid)
                    .unwrap_or(false)
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(aircraft_id: &str, cid: &str, beacon: Option<u16>) -> FlightEntry {
        FlightEntry {
            aircraft_id: aircraft_id.to_string(),
            cid: cid.to_string(),
            assigned_beacon_code: beacon,
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_order() {
        // "123" is both a cid and another flight's callsign; cid wins.
        let entries = vec![entry("123", "900", Some(1200)), entry("N5", "123", None)];
        assert_eq!(resolve(&entries, "123").unwrap().aircraft_id, "N5");
        assert_eq!(resolve(&entries, "N5").unwrap().cid, "123");
        assert_eq!(resolve(&entries, "1200").unwrap().aircraft_id, "123");
    }

    #[test]
    fn test_resolve_beacon_padding() {
        let entries = vec![entry("N1", "001", Some(45))];
        assert!(resolve(&entries, "0045").is_some());
        assert!(resolve(&entries, "45").is_none());
    }

    #[test]
    fn test_resolve_miss_and_missing_beacon() {
        let entries = vec![entry("N1", "001", None)];
        assert!(resolve(&entries, "0000").is_none());
        assert!(resolve(&entries, "N999").is_none());
    }

    #[test]
    fn test_patch_apply() {
        let mut e = entry("N1", "001", None);
        let patch = EntryPatch {
            vci: Some(true),
            current_route: Some("..SAC".to_string()),
            ..Default::default()
        };
        patch.apply_to(&mut e);
        assert!(e.vci);
        assert_eq!(e.current_route(), "..SAC");
        assert!(!e.acl_display);
    }

    #[test]
    fn test_display_route() {
        let mut e = entry("N1", "001", None);
        e.formatted_route = "OAK.J5.SACKRNO".to_string();
        e.destination = "KRNO".to_string();
        assert_eq!(e.display_route(), "OAK.J5.SAC");
        e.current_route = Some("..SAC.KRNO".to_string());
        assert_eq!(e.display_route(), "SAC.");
    }
}
