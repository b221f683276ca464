// SPDX-License-Identifier: MIT
// Copyright (c) 2020 Austin Goudge
// Copyright (c) 2026 StarTuz

use edst_core::response::{AircraftList, Window};
use edst_core::{EntrySnapshot, FlightEntry, Intent};
use log::{info, warn};
use std::collections::BTreeSet;

/// In-memory stand-in for the client's entry store and window manager.
/// Applies intents in order; later writes win.
#[derive(Debug, Default)]
pub struct EntryStore {
    pub entries: Vec<FlightEntry>,
    pub open_windows: BTreeSet<String>,
    pub manual_posting: bool,
    pub altimeter_watch: BTreeSet<String>,
    pub weather_watch: BTreeSet<String>,
    pub readout: Option<String>,
}

fn toggle_all(set: &mut BTreeSet<String>, stations: &[String]) {
    for station in stations {
        if !set.remove(station) {
            set.insert(station.clone());
        }
    }
}

fn window_name(window: Window) -> String {
    format!("{:?}", window).to_uppercase()
}

impl EntryStore {
    pub fn new(entries: Vec<FlightEntry>) -> Self {
        Self {
            entries,
            ..Default::default()
        }
    }

    pub fn snapshot(&self) -> EntrySnapshot<'_> {
        EntrySnapshot::new(&self.entries)
    }

    fn entry_mut(&mut self, aircraft_id: &str) -> Option<&mut FlightEntry> {
        self.entries.iter_mut().find(|e| e.aircraft_id == aircraft_id)
    }

    pub fn apply(&mut self, intent: &Intent) {
        match intent {
            Intent::OpenWindow(window) => {
                self.open_windows.insert(window_name(*window));
            }
            Intent::CloseAllWindows => self.open_windows.clear(),
            Intent::SetManualPosting(enabled) => self.manual_posting = *enabled,
            Intent::AddEntryByFid(fid) => {
                let aircraft_id = self.snapshot().resolve(fid).map(|e| e.aircraft_id.clone());
                let Some(aircraft_id) = aircraft_id else {
                    warn!("No entry matches {}", fid);
                    return;
                };
                if let Some(entry) = self.entry_mut(&aircraft_id) {
                    entry.acl_display = true;
                    entry.pending_removal = None;
                }
            }
            Intent::MutateEntry { aircraft_id, patch } => match self.entry_mut(aircraft_id) {
                Some(entry) => patch.apply_to(entry),
                None => warn!("Entry {} vanished before update", aircraft_id),
            },
            Intent::Delete { aircraft_id, list } => {
                if let Some(entry) = self.entry_mut(aircraft_id) {
                    match list {
                        AircraftList::Acl => entry.acl_display = false,
                        AircraftList::Dep => entry.dep_display = false,
                    }
                }
            }
            Intent::ToggleAltimeterWatch(stations) => toggle_all(&mut self.altimeter_watch, stations),
            Intent::ToggleWeatherWatch(stations) => toggle_all(&mut self.weather_watch, stations),
            Intent::ShowReadout(text) => self.readout = Some(text.clone()),
            Intent::PrintFlightStrip { aircraft_id } => {
                info!("Printing flight strip for {}", aircraft_id);
                self.open_windows.insert(format!("STRIP {}", aircraft_id));
            }
            Intent::SubmitAmendment(amendment) => {
                // The transport accepted the amendment; fold it back in.
                if let Some(entry) = self.entry_mut(&amendment.aircraft_id) {
                    amendment.patch.apply_to(entry);
                }
            }
            Intent::TrialPlan(plan) => info!("Trial plan staged: {}", plan.message),
        }
    }

    pub fn apply_all(&mut self, intents: &[Intent]) {
        for intent in intents {
            self.apply(intent);
        }
    }
}
