// SPDX-License-Identifier: MIT
// Copyright (c) 2020 Austin Goudge
// Copyright (c) 2026 StarTuz

//! Message compose area command dispatch.
//!
//! Every accepted shape of every verb is one row in [`DISPATCH_TABLE`]:
//! verb, argument count and an optional literal first argument. Rows are
//! tried top to bottom and the first match handles the command, so the
//! catch-all rows for a verb come after its specific ones.

use chrono::{DateTime, Duration, Utc};
use log::{debug, info, warn};

use crate::command::{Command, VCI_VERB};
use crate::direct::direct_for_entry;
use crate::entry::{EntryPatch, EntrySnapshot, FlightEntry};
use crate::frd::FrdResolver;
use crate::response::{self, AircraftList, Amendment, CommandResult, Intent, RejectKind, Window};
use crate::route::route_to_amendment_text;

pub const DEFAULT_REMOVAL_TIMEOUT_SECS: i64 = 120;

/// Host state a command may depend on.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub manual_posting: bool,
    pub artcc_id: String,
    pub now: DateTime<Utc>,
    /// How long an ACL entry marked for removal lingers before `UU C` drops it.
    pub removal_timeout: Duration,
}

impl CommandContext {
    pub fn new(artcc_id: impl Into<String>) -> Self {
        Self {
            manual_posting: false,
            artcc_id: artcc_id.into(),
            now: Utc::now(),
            removal_timeout: Duration::seconds(DEFAULT_REMOVAL_TIMEOUT_SECS),
        }
    }

    pub fn with_manual_posting(mut self, manual_posting: bool) -> Self {
        self.manual_posting = manual_posting;
        self
    }

    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arity {
    Exactly(usize),
    AtLeast(usize),
    Any,
}

impl Arity {
    fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
            Arity::Any => true,
        }
    }
}

struct Request<'a> {
    command: &'a Command,
    snapshot: EntrySnapshot<'a>,
    context: &'a CommandContext,
    frd: Option<&'a dyn FrdResolver>,
}

type Handler = fn(&Request<'_>) -> CommandResult;

struct Pattern {
    verb: &'static str,
    arity: Arity,
    /// Required value of the first argument.
    literal: Option<&'static str>,
    handler: Handler,
}

impl Pattern {
    fn matches(&self, command: &Command) -> bool {
        self.verb == command.verb
            && self.arity.accepts(command.arity())
            && self
                .literal
                .map_or(true, |literal| command.arg(0) == Some(literal))
    }
}

const fn row(verb: &'static str, arity: Arity, literal: Option<&'static str>, handler: Handler) -> Pattern {
    Pattern {
        verb,
        arity,
        literal,
        handler,
    }
}

static DISPATCH_TABLE: &[Pattern] = &[
    row(VCI_VERB, Arity::Any, None, toggle_vci),
    row("UU", Arity::Exactly(0), None, open_acl),
    row("UU", Arity::Exactly(1), Some("C"), acl_cleanup),
    row("UU", Arity::Exactly(1), Some("D"), open_dep),
    row("UU", Arity::Exactly(1), Some("P"), toggle_manual_posting),
    row("UU", Arity::Exactly(1), Some("X"), close_all_windows),
    row("UU", Arity::Exactly(1), None, add_entry_by_fid),
    row("UU", Arity::Exactly(2), Some("H"), toggle_highlight),
    row("UU", Arity::Any, None, reject_malformed),
    row("QU", Arity::Any, None, cleared_direct),
    row("QD", Arity::AtLeast(1), None, altimeter_request),
    row("QD", Arity::Any, None, reject_malformed),
    row("WR", Arity::AtLeast(1), None, weather_request),
    row("WR", Arity::Any, None, reject_malformed),
    row("FR", Arity::Exactly(1), None, flightplan_readout),
    row("FR", Arity::Any, None, readout_too_long),
    row("SR", Arity::Exactly(1), None, print_flight_strip),
    row("SR", Arity::Any, None, reject_malformed),
];

/// Turns typed messages into results. Holds the optional FRD collaborator
/// needed by cleared-direct amendments.
#[derive(Default)]
pub struct Interpreter {
    frd: Option<Box<dyn FrdResolver>>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frd_resolver(mut self, resolver: impl FrdResolver + 'static) -> Self {
        self.frd = Some(Box::new(resolver));
        self
    }

    pub fn interpret(
        &self,
        text: &str,
        snapshot: EntrySnapshot<'_>,
        context: &CommandContext,
    ) -> CommandResult {
        let command = Command::parse(text);
        self.dispatch(&command, snapshot, context)
    }

    pub fn dispatch(
        &self,
        command: &Command,
        snapshot: EntrySnapshot<'_>,
        context: &CommandContext,
    ) -> CommandResult {
        let request = Request {
            command,
            snapshot,
            context,
            frd: self.frd.as_deref(),
        };

        let result = match DISPATCH_TABLE.iter().find(|p| p.matches(command)) {
            Some(pattern) => (pattern.handler)(&request),
            None => response::unknown_command(&command.raw),
        };

        debug!(
            "[Dispatch] {} {:?} -> {:?} ({} intents)",
            command.verb,
            command.args,
            result.status,
            result.intents.len()
        );
        result
    }
}

/// Interprets `text` without an FRD resolver.
pub fn interpret(text: &str, entries: &[FlightEntry], context: &CommandContext) -> CommandResult {
    Interpreter::new().interpret(text, EntrySnapshot::new(entries), context)
}

fn accepted(intents: Vec<Intent>) -> CommandResult {
    CommandResult::accept(response::D_POS_KEYBD, intents)
}

fn mutate(entry: &FlightEntry, patch: EntryPatch) -> Vec<Intent> {
    if patch.is_empty() {
        return Vec::new();
    }
    vec![Intent::MutateEntry {
        aircraft_id: entry.aircraft_id.clone(),
        patch,
    }]
}

fn reject_malformed(req: &Request<'_>) -> CommandResult {
    response::malformed(&req.command.raw)
}

fn toggle_vci(req: &Request<'_>) -> CommandResult {
    let intents = req
        .command
        .arg(0)
        .and_then(|fid| req.snapshot.resolve(fid))
        .map(|entry| {
            mutate(
                entry,
                EntryPatch {
                    vci: Some(!entry.vci),
                    ..Default::default()
                },
            )
        })
        .unwrap_or_default();
    accepted(intents)
}

fn open_acl(_req: &Request<'_>) -> CommandResult {
    accepted(vec![Intent::OpenWindow(Window::Acl)])
}

fn open_dep(_req: &Request<'_>) -> CommandResult {
    accepted(vec![Intent::OpenWindow(Window::Dep)])
}

fn close_all_windows(_req: &Request<'_>) -> CommandResult {
    accepted(vec![Intent::CloseAllWindows])
}

fn toggle_manual_posting(req: &Request<'_>) -> CommandResult {
    accepted(vec![
        Intent::OpenWindow(Window::Acl),
        Intent::SetManualPosting(!req.context.manual_posting),
    ])
}

fn acl_cleanup(req: &Request<'_>) -> CommandResult {
    let ctx = req.context;
    let intents: Vec<Intent> = req
        .snapshot
        .iter()
        .filter(|entry| entry.acl_display)
        .filter(|entry| {
            entry
                .pending_removal
                .map_or(false, |since| ctx.now - since > ctx.removal_timeout)
        })
        .map(|entry| Intent::Delete {
            aircraft_id: entry.aircraft_id.clone(),
            list: AircraftList::Acl,
        })
        .collect();
    info!("[Dispatch] ACL cleanup removes {} entries", intents.len());
    accepted(intents)
}

fn add_entry_by_fid(req: &Request<'_>) -> CommandResult {
    let fid = req.command.arg(0).unwrap_or_default().to_string();
    accepted(vec![Intent::AddEntryByFid(fid)])
}

fn toggle_highlight(req: &Request<'_>) -> CommandResult {
    let intents = req
        .command
        .arg(1)
        .and_then(|fid| req.snapshot.resolve(fid))
        .map(|entry| {
            let patch = EntryPatch {
                acl_highlighted: entry.acl_display.then(|| !entry.acl_highlighted),
                dep_highlighted: entry.dep_display.then(|| !entry.dep_highlighted),
                ..Default::default()
            };
            mutate(entry, patch)
        })
        .unwrap_or_default();
    accepted(intents)
}

fn cleared_direct(req: &Request<'_>) -> CommandResult {
    let reject = || CommandResult::reject(RejectKind::NoRouteMembership, response::REJECT_FORMAT);

    let (fix, fid) = match req.command.args.as_slice() {
        [fix, fid] => (fix.as_str(), fid.as_str()),
        _ => return CommandResult::reject(RejectKind::MalformedArity, response::REJECT_FORMAT),
    };

    let entry = match req.snapshot.resolve(fid) {
        Some(entry) if entry.acl_display => entry,
        _ => return reject(),
    };
    if !entry.current_fixes().iter().any(|f| f.name == fix) {
        return reject();
    }

    let frd = match (req.frd, entry.position) {
        (Some(resolver), Some(position)) => {
            match resolver.resolve_frd(&req.context.artcc_id, position) {
                Ok(frd) => Some(frd),
                Err(e) => {
                    warn!(
                        "[Dispatch] FRD lookup failed for {}; rejecting QU: {}",
                        entry.aircraft_id, e
                    );
                    return reject();
                }
            }
        }
        _ => None,
    };

    let direct = match direct_for_entry(entry, fix) {
        Some(direct) => direct,
        None => return reject(),
    };

    info!(
        "[Dispatch] {} cleared direct {}: {}",
        entry.aircraft_id, fix, direct.route
    );

    let amendment = Amendment {
        aircraft_id: entry.aircraft_id.clone(),
        cid: entry.cid.clone(),
        route: route_to_amendment_text(&direct.route),
        frd,
        patch: direct.patch(entry),
    };
    CommandResult::accept(response::CLEARED_DIRECT, vec![Intent::SubmitAmendment(amendment)])
}

fn altimeter_request(req: &Request<'_>) -> CommandResult {
    CommandResult::accept(
        response::ALTIMETER_REQ,
        vec![
            Intent::ToggleAltimeterWatch(req.command.args.clone()),
            Intent::OpenWindow(Window::Altimeter),
        ],
    )
}

fn weather_request(req: &Request<'_>) -> CommandResult {
    response::weather_accepted(
        &req.command.raw,
        vec![
            Intent::ToggleWeatherWatch(req.command.args.clone()),
            Intent::OpenWindow(Window::Metar),
        ],
    )
}

// An unknown fid still accepts, with nothing to show.
fn flightplan_readout(req: &Request<'_>) -> CommandResult {
    let intents = req
        .command
        .arg(0)
        .and_then(|fid| req.snapshot.resolve(fid))
        .map(|entry| {
            vec![Intent::ShowReadout(response::flightplan_readout(
                entry,
                req.context.now,
            ))]
        })
        .unwrap_or_default();
    response::readout_accepted(&req.command.raw, intents)
}

fn readout_too_long(req: &Request<'_>) -> CommandResult {
    response::readout_too_long(&req.command.raw)
}

fn print_flight_strip(req: &Request<'_>) -> CommandResult {
    let intents = req
        .command
        .arg(0)
        .and_then(|fid| req.snapshot.resolve(fid))
        .map(|entry| {
            vec![Intent::PrintFlightStrip {
                aircraft_id: entry.aircraft_id.clone(),
            }]
        })
        .unwrap_or_default();
    accepted(intents)
}
