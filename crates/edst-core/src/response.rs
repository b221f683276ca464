// SPDX-License-Identifier: MIT
// Copyright (c) 2020 Austin Goudge
// Copyright (c) 2026 StarTuz

//! Accept/reject feedback and the side effects a command asks the host to perform.
//!
//! The message strings are what the controller sees in the response area
//! and must be reproduced exactly, embedded newlines included.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::{EntryPatch, FlightEntry};
use crate::route::strip_leading_dots;

pub const D_POS_KEYBD: &str = "ACCEPT\nD POS KEYBD";
pub const CLEARED_DIRECT: &str = "ACCEPT\nCLEARED DIRECT";
pub const REJECT_FORMAT: &str = "REJECT\nFORMAT";
pub const ALTIMETER_REQ: &str = "ACCEPT\nALTIMETER REQ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Accept,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectKind {
    UnknownCommand,
    MalformedArity,
    /// Cleared-direct target is not on the flight's current route (or the
    /// flight could not be addressed).
    NoRouteMembership,
    /// A preferential route shares no fix with the current route.
    ComposeFailure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Window {
    Acl,
    Dep,
    Altimeter,
    Metar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AircraftList {
    Acl,
    Dep,
}

/// Flight plan amendment for the transport to send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amendment {
    pub aircraft_id: String,
    pub cid: String,
    /// Route in transport form: fixes separated by single spaces.
    pub route: String,
    /// Fix-radial-distance of the aircraft when the amendment was issued.
    pub frd: Option<String>,
    pub patch: EntryPatch,
}

/// An amendment staged for review instead of applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialPlan {
    pub aircraft_id: String,
    pub cid: String,
    pub patch: EntryPatch,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Intent {
    OpenWindow(Window),
    CloseAllWindows,
    SetManualPosting(bool),
    AddEntryByFid(String),
    MutateEntry {
        aircraft_id: String,
        patch: EntryPatch,
    },
    Delete {
        aircraft_id: String,
        list: AircraftList,
    },
    ToggleAltimeterWatch(Vec<String>),
    ToggleWeatherWatch(Vec<String>),
    /// Text for the message response area.
    ShowReadout(String),
    PrintFlightStrip {
        aircraft_id: String,
    },
    SubmitAmendment(Amendment),
    TrialPlan(TrialPlan),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResult {
    pub status: Status,
    pub reject_kind: Option<RejectKind>,
    pub message: String,
    pub intents: Vec<Intent>,
}

impl CommandResult {
    pub fn accept(message: impl Into<String>, intents: Vec<Intent>) -> Self {
        Self {
            status: Status::Accept,
            reject_kind: None,
            message: message.into(),
            intents,
        }
    }

    pub fn reject(kind: RejectKind, message: impl Into<String>) -> Self {
        Self {
            status: Status::Reject,
            reject_kind: Some(kind),
            message: message.into(),
            intents: Vec::new(),
        }
    }

    pub fn is_accept(&self) -> bool {
        self.status == Status::Accept
    }

    /// The response area shows everything in capitals.
    pub fn display_text(&self) -> String {
        self.message.to_uppercase()
    }
}

pub fn unknown_command(raw: &str) -> CommandResult {
    CommandResult::reject(RejectKind::UnknownCommand, format!("REJECT\n\n{}", raw))
}

pub fn malformed(raw: &str) -> CommandResult {
    CommandResult::reject(RejectKind::MalformedArity, format!("REJECT\n{}", raw))
}

pub fn readout_too_long(raw: &str) -> CommandResult {
    CommandResult::reject(
        RejectKind::MalformedArity,
        format!("REJECT: MESSAGE TOO LONG\nREADOUT\n{}", raw),
    )
}

pub fn readout_accepted(raw: &str, intents: Vec<Intent>) -> CommandResult {
    CommandResult::accept(format!("ACCEPT\nREADOUT\n{}", raw), intents)
}

pub fn weather_accepted(raw: &str, intents: Vec<Intent>) -> CommandResult {
    CommandResult::accept(format!("ACCEPT\nWEATHER STAT REQ\n{}", raw), intents)
}

pub fn format_utc_hhmm(now: DateTime<Utc>) -> String {
    format!("{:02}{:02}", now.hour(), now.minute())
}

/// Flight plan readout shown for `FR`.
pub fn flightplan_readout(entry: &FlightEntry, now: DateTime<Utc>) -> String {
    format!(
        "{}\n{} {} {} {} {} EXX00 {} {}./.{}{}",
        format_utc_hhmm(now),
        entry.aircraft_id,
        entry.aircraft_id,
        entry.equipment,
        entry.beacon_string(),
        entry.speed,
        entry.altitude,
        entry.departure,
        strip_leading_dots(entry.current_route()),
        entry.destination
    )
}

/// Message recorded with a trial plan, e.g. `AM 123 RTE ..SAC.J65.RNOKRNO`.
pub fn trial_plan_message(entry: &FlightEntry, route: &str) -> String {
    format!("AM {} RTE {}{}", entry.cid, route, entry.destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_readout_format() {
        let entry = FlightEntry {
            aircraft_id: "N123".to_string(),
            cid: "456".to_string(),
            assigned_beacon_code: Some(415),
            equipment: "B738/L".to_string(),
            speed: 450,
            altitude: "350".to_string(),
            departure: "KOAK".to_string(),
            destination: "KRNO".to_string(),
            route: "OAK.J5.SAC".to_string(),
            current_route: Some("..SAC".to_string()),
            ..Default::default()
        };
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 7, 5, 0).unwrap();
        assert_eq!(
            flightplan_readout(&entry, now),
            "0705\nN123 N123 B738/L 0415 450 EXX00 350 KOAK./.SACKRNO"
        );
    }

    #[test]
    fn test_reject_templates() {
        assert_eq!(unknown_command("ZZ").message, "REJECT\n\nZZ");
        assert_eq!(malformed("uu a b").message, "REJECT\nuu a b");
        assert_eq!(
            readout_too_long("FR").message,
            "REJECT: MESSAGE TOO LONG\nREADOUT\nFR"
        );
        assert!(!unknown_command("ZZ").is_accept());
    }

    #[test]
    fn test_display_uppercases() {
        let result = readout_accepted("fr n123", Vec::new());
        assert_eq!(result.display_text(), "ACCEPT\nREADOUT\nFR N123");
    }
}
