// SPDX-License-Identifier: MIT
// Copyright (c) 2020 Austin Goudge
// Copyright (c) 2026 StarTuz

//! Preferential arrival/departure route amendments.
//!
//! A candidate carries the full preferential route, the amendment text to
//! append and the transition fix where it diverges from the filed route.
//! [`compose`] splices the candidate onto what is left of the flight's
//! current route.

use serde::{Deserialize, Serialize};

use crate::entry::{EntryPatch, FlightEntry};
use crate::route::{parse_route_with_destination, FixTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransitionInfo {
    /// The transition fix is not part of the amendment text and must be prepended.
    Prepend,
    #[default]
    Append,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferentialRouteCandidate {
    pub amendment: String,
    pub route: String,
    pub transition_fix: String,
    pub transition_info: TransitionInfo,
    pub eligible: bool,
    pub route_fixes: Vec<String>,
    /// Ranking from adaptation, lower is preferred.
    pub order: u32,
    pub rnav: bool,
}

impl PreferentialRouteCandidate {
    pub fn effective_amendment(&self) -> String {
        match self.transition_info {
            TransitionInfo::Prepend => format!("{}{}", self.transition_fix, self.amendment),
            TransitionInfo::Append => self.amendment.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedRoute {
    pub amendment: String,
    pub amended_route: String,
    pub amended_route_fixes: Vec<String>,
}

impl ComposedRoute {
    pub fn patch(&self, entry: &FlightEntry, table: &FixTable) -> EntryPatch {
        EntryPatch {
            current_route: Some(self.amended_route.clone()),
            current_route_fixes: Some(parse_route_with_destination(
                &self.amended_route,
                &entry.destination,
                table,
            )),
            previous_route: Some(entry.current_route().to_string()),
            previous_route_fixes: Some(entry.current_fixes().to_vec()),
            ..Default::default()
        }
    }
}

/// Builds the amended route for `candidate` given the flight's current fix names.
///
/// Returns `None` when the amended body shares no fix with either the
/// current route or the candidate's declared fixes.
///
/// Matching is by substring, so a fix name repeated along the route (or
/// contained in a longer identifier) can move the splice point.
pub fn compose(
    candidate: &PreferentialRouteCandidate,
    current_fix_names: &[String],
) -> Option<ComposedRoute> {
    let amendment = candidate.effective_amendment();
    let tfix = candidate.transition_fix.as_str();

    let mut body = match current_fix_names.first() {
        Some(first) => match candidate.route.find(first.as_str()) {
            Some(offset) => &candidate.route[offset..],
            None => candidate.route.as_str(),
        },
        None => candidate.route.as_str(),
    };

    if !tfix.is_empty() && body.contains(tfix) && amendment.contains(tfix) {
        if let Some(offset) = body.find(tfix) {
            body = &body[..offset];
        }
    }

    let amended_body = format!("{}{}", body, amendment);

    let mut remaining: Vec<(usize, &str)> = Vec::new();
    for name in current_fix_names
        .iter()
        .chain(candidate.route_fixes.iter())
        .map(String::as_str)
    {
        if name.is_empty() || remaining.iter().any(|(_, seen)| *seen == name) {
            continue;
        }
        if let Some(offset) = amended_body.find(name) {
            remaining.push((offset, name));
        }
    }
    remaining.sort_by_key(|(offset, _)| *offset);

    let (splice_at, first_common) = remaining.first().copied()?;

    log::debug!(
        "[Preferential] splicing '{}' at common fix {} ({} shared fixes)",
        amendment,
        first_common,
        remaining.len()
    );

    Some(ComposedRoute {
        amendment,
        amended_route: format!("..{}", &amended_body[splice_at..]),
        amended_route_fixes: remaining
            .into_iter()
            .map(|(_, name)| name.to_string())
            .collect(),
    })
}

/// Which candidate, if any, is flagged as awaiting application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingRule {
    /// Arrival routes: only a single eligible candidate whose transition fix
    /// is still ahead of the flight.
    Arrival,
    /// Departure routes: RNAV-capable candidates first, then lowest order.
    Departure,
}

impl PendingRule {
    pub fn candidates<'a>(&self, entry: &'a FlightEntry) -> &'a [PreferentialRouteCandidate] {
        match self {
            PendingRule::Arrival => &entry.preferential_arrival_routes,
            PendingRule::Departure => &entry.preferential_departure_routes,
        }
    }

    fn select<'a>(
        &self,
        candidates: &'a [PreferentialRouteCandidate],
        current_fix_names: &[String],
    ) -> Option<&'a PreferentialRouteCandidate> {
        let eligible: Vec<&PreferentialRouteCandidate> =
            candidates.iter().filter(|c| c.eligible).collect();
        match self {
            PendingRule::Arrival => match eligible.as_slice() {
                [only] if current_fix_names.contains(&only.transition_fix) => Some(*only),
                _ => None,
            },
            PendingRule::Departure => {
                let pool: Vec<&PreferentialRouteCandidate> = if eligible.iter().any(|c| c.rnav) {
                    eligible.into_iter().filter(|c| c.rnav).collect()
                } else {
                    eligible
                };
                pool.into_iter().min_by_key(|c| c.order)
            }
        }
    }

    fn is_applied(&self, candidate: &PreferentialRouteCandidate, entry: &FlightEntry) -> bool {
        let amendment = candidate.effective_amendment();
        match self {
            PendingRule::Arrival => entry.display_route().contains(&amendment),
            PendingRule::Departure => entry.display_route().starts_with(&amendment),
        }
    }
}

/// The candidate to badge as pending for `entry`, or `None`.
pub fn pending_amendment(entry: &FlightEntry, rule: PendingRule) -> Option<&PreferentialRouteCandidate> {
    let names = entry.current_fix_names();
    rule.select(rule.candidates(entry), &names)
        .filter(|candidate| !rule.is_applied(candidate, entry))
}

/// Whether the entry is already flying one of its preferential routes.
pub fn is_on_amendment(entry: &FlightEntry, rule: PendingRule) -> bool {
    let names = entry.current_fix_names();
    rule.candidates(entry).iter().any(|candidate| {
        let relevant = match rule {
            PendingRule::Arrival => {
                candidate.eligible && names.contains(&candidate.transition_fix)
            }
            PendingRule::Departure => true,
        };
        relevant && rule.is_applied(candidate, entry)
    })
}
