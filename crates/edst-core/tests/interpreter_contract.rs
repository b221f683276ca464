// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz
//
// End-to-end checks of the message compose area contract: exact response
// strings (newlines included) and the intents each verb produces.

use chrono::{TimeZone, Utc};
use edst_core::response::{Window, D_POS_KEYBD};
use edst_core::route::{parse_route_with_destination, FixTable};
use edst_core::{interpret, CommandContext, FlightEntry, Intent, RejectKind, Status};

fn init_logging() {
    let _ = simplelog::TestLogger::init(log::LevelFilter::Debug, simplelog::Config::default());
}

fn entry(aircraft_id: &str, cid: &str, beacon: Option<u16>, route: &str) -> FlightEntry {
    FlightEntry {
        aircraft_id: aircraft_id.to_string(),
        cid: cid.to_string(),
        assigned_beacon_code: beacon,
        equipment: "B738/L".to_string(),
        speed: 450,
        altitude: "350".to_string(),
        departure: "KSFO".to_string(),
        destination: "KRNO".to_string(),
        route: route.to_string(),
        route_fixes: parse_route_with_destination(route, "KRNO", &FixTable::new()),
        formatted_route: route.to_string(),
        acl_display: true,
        ..Default::default()
    }
}

fn entries() -> Vec<FlightEntry> {
    vec![
        entry("N123", "101", Some(1200), "OAK.J5.ABCFX.J65.RNO.KRNO"),
        entry("UAL9", "102", Some(4521), "SFO.PORTE3.SAC.KRNO"),
    ]
}

fn ctx() -> CommandContext {
    CommandContext::new("ZOA")
}

#[test]
fn test_uu_opens_acl() {
    init_logging();
    let r = interpret("UU", &entries(), &ctx());
    assert_eq!(r.status, Status::Accept);
    assert_eq!(r.message, "ACCEPT\nD POS KEYBD");
    assert_eq!(r.intents, vec![Intent::OpenWindow(Window::Acl)]);
}

#[test]
fn test_uu_single_unknown_arg_adds_entry() {
    let r = interpret("UU 1200", &entries(), &ctx());
    assert_eq!(r.message, D_POS_KEYBD);
    assert_eq!(r.intents, vec![Intent::AddEntryByFid("1200".to_string())]);

    // A lone "H" is not the highlight form; it is a fid like any other.
    let h = interpret("UU H", &entries(), &ctx());
    assert!(h.is_accept());
    assert_eq!(h.intents, vec![Intent::AddEntryByFid("H".to_string())]);
}

#[test]
fn test_qu_cleared_direct() {
    init_logging();
    let r = interpret("QU ABCFX N123", &entries(), &ctx());
    assert_eq!(r.message, "ACCEPT\nCLEARED DIRECT");
    match &r.intents[..] {
        [Intent::SubmitAmendment(amendment)] => {
            assert_eq!(amendment.aircraft_id, "N123");
            let patched = amendment.patch.current_route.as_deref().unwrap();
            assert!(patched.starts_with("..ABCFX"), "got {}", patched);
            assert_eq!(amendment.route, "ABCFX J65 RNO KRNO");
            assert_eq!(amendment.frd, None);
        }
        other => panic!("unexpected intents {:?}", other),
    }
}

#[test]
fn test_qu_by_beacon_and_lowercase() {
    let r = interpret("qu abcfx 1200", &entries(), &ctx());
    assert!(r.is_accept());
}

#[test]
fn test_qu_rejections() {
    for (text, kind) in [
        ("QU ABCFX N999", RejectKind::NoRouteMembership),
        ("QU PORTE3 N123", RejectKind::NoRouteMembership),
        ("QU ABCFX", RejectKind::MalformedArity),
        ("QU ABCFX N123 EXTRA", RejectKind::MalformedArity),
    ] {
        let r = interpret(text, &entries(), &ctx());
        assert_eq!(r.status, Status::Reject, "{}", text);
        assert_eq!(r.message, "REJECT\nFORMAT", "{}", text);
        assert_eq!(r.reject_kind, Some(kind), "{}", text);
        assert!(r.intents.is_empty());
    }
}

#[test]
fn test_unknown_verb() {
    let r = interpret("ZZ", &entries(), &ctx());
    assert_eq!(r.status, Status::Reject);
    assert_eq!(r.message, "REJECT\n\nZZ");
    assert_eq!(r.reject_kind, Some(RejectKind::UnknownCommand));
}

#[test]
fn test_weather_and_altimeter() {
    let r = interpret("WR KOAK KSFO", &entries(), &ctx());
    assert_eq!(r.message, "ACCEPT\nWEATHER STAT REQ\nWR KOAK KSFO");
    assert_eq!(
        r.intents,
        vec![
            Intent::ToggleWeatherWatch(vec!["KOAK".to_string(), "KSFO".to_string()]),
            Intent::OpenWindow(Window::Metar),
        ]
    );

    let r = interpret("qd koak", &entries(), &ctx());
    assert_eq!(r.message, "ACCEPT\nALTIMETER REQ");
    assert_eq!(
        r.intents,
        vec![
            Intent::ToggleAltimeterWatch(vec!["KOAK".to_string()]),
            Intent::OpenWindow(Window::Altimeter),
        ]
    );

    assert_eq!(interpret("QD", &entries(), &ctx()).message, "REJECT\nQD");
}

#[test]
fn test_flightplan_readout() {
    let now = Utc.with_ymd_and_hms(2026, 10, 17, 23, 9, 0).unwrap();
    let r = interpret("FR UAL9", &entries(), &ctx().at(now));
    assert_eq!(r.message, "ACCEPT\nREADOUT\nFR UAL9");
    assert_eq!(
        r.intents,
        vec![Intent::ShowReadout(
            "2309\nUAL9 UAL9 B738/L 4521 450 EXX00 350 KSFO./.SFO.PORTE3.SAC.KRNOKRNO".to_string()
        )]
    );

    let long = interpret("FR UAL9 N123", &entries(), &ctx());
    assert_eq!(long.message, "REJECT: MESSAGE TOO LONG\nREADOUT\nFR UAL9 N123");
}

#[test]
fn test_flightplan_readout_miss_still_accepts() {
    let r = interpret("FR N999", &entries(), &ctx());
    assert_eq!(r.status, Status::Accept);
    assert!(r.intents.is_empty());
}

#[test]
fn test_strip_print() {
    let r = interpret("SR 102", &entries(), &ctx());
    assert_eq!(r.message, "ACCEPT\nD POS KEYBD");
    assert_eq!(
        r.intents,
        vec![Intent::PrintFlightStrip {
            aircraft_id: "UAL9".to_string()
        }]
    );
    assert_eq!(interpret("SR", &entries(), &ctx()).message, "REJECT\nSR");
}

#[test]
fn test_intents_serialize_tagged() {
    let r = interpret("UU", &entries(), &ctx());
    let json = serde_json::to_string(&r.intents).unwrap();
    assert_eq!(json, r#"[{"type":"OpenWindow","data":"Acl"}]"#);
}
