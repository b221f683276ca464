// SPDX-License-Identifier: MIT
// Copyright (c) 2020 Austin Goudge
// Copyright (c) 2026 StarTuz

//! Route menu gestures: clicking a fix for direct-to, picking a
//! preferential route, or reverting to the previous route.

use serde::{Deserialize, Serialize};

use crate::direct::direct_for_entry;
use crate::entry::{EntryPatch, FlightEntry};
use crate::preferential::{compose, PreferentialRouteCandidate};
use crate::response::{trial_plan_message, Intent, RejectKind, TrialPlan};
use crate::route::{parse_route_with_destination, FixTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RouteAction {
    /// Stage the change for review (ACL default).
    #[default]
    TrialPlan,
    /// Apply immediately (DEP, or when the controller selects Amend).
    Amend,
}

fn finish(entry: &FlightEntry, route: &str, patch: EntryPatch, action: RouteAction) -> Intent {
    match action {
        RouteAction::Amend => Intent::MutateEntry {
            aircraft_id: entry.aircraft_id.clone(),
            patch,
        },
        RouteAction::TrialPlan => Intent::TrialPlan(TrialPlan {
            aircraft_id: entry.aircraft_id.clone(),
            cid: entry.cid.clone(),
            message: trial_plan_message(entry, route),
            patch,
        }),
    }
}

pub fn clear_direct(entry: &FlightEntry, fix: &str, action: RouteAction) -> Result<Intent, RejectKind> {
    let direct = direct_for_entry(entry, fix).ok_or(RejectKind::NoRouteMembership)?;
    Ok(finish(entry, &direct.route, direct.patch(entry), action))
}

pub fn apply_preferential(
    entry: &FlightEntry,
    candidate: &PreferentialRouteCandidate,
    table: &FixTable,
    action: RouteAction,
) -> Result<Intent, RejectKind> {
    let composed = compose(candidate, &entry.current_fix_names()).ok_or_else(|| {
        log::debug!(
            "[Gesture] {} shares no fix with {}",
            candidate.amendment,
            entry.aircraft_id
        );
        RejectKind::ComposeFailure
    })?;
    Ok(finish(
        entry,
        &composed.amended_route,
        composed.patch(entry, table),
        action,
    ))
}

/// Swaps the current and previous routes. `None` if there is no previous route.
pub fn restore_previous_route(entry: &FlightEntry, table: &FixTable) -> Option<Intent> {
    let previous = entry.previous_route.as_ref()?;
    let fixes = entry
        .previous_route_fixes
        .clone()
        .unwrap_or_else(|| parse_route_with_destination(previous, &entry.destination, table));
    Some(Intent::MutateEntry {
        aircraft_id: entry.aircraft_id.clone(),
        patch: EntryPatch {
            current_route: Some(previous.clone()),
            current_route_fixes: Some(fixes),
            previous_route: Some(entry.current_route().to_string()),
            previous_route_fixes: Some(entry.current_fixes().to_vec()),
            ..Default::default()
        },
    })
}
