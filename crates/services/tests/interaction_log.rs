use std::sync::Arc;

use chrono::Duration;
use host::{InMemoryHost, Primitive, SharedHostApi};
use sco_core::model::{InteractionResult, ItemId, Weighting};
use sco_core::time::fixed_clock;
use services::{InteractionRecorder, SessionManager, record};

fn open_session(host: &InMemoryHost) -> SessionManager {
    let api: SharedHostApi = Arc::new(host.clone());
    let mut session = SessionManager::with_api(api);
    assert!(session.init());
    session
}

#[test]
fn record_writes_five_fields_per_slot() {
    let host = InMemoryHost::new();
    let mut session = open_session(&host);
    let half = Weighting::new(0.5).unwrap();

    for index in 0..3 {
        let item = ItemId::question(index as usize);
        assert!(record(&mut session, index, &item, "b", InteractionResult::Correct, half, 4));
    }

    assert_eq!(host.calls().set_value, 15);
    for index in 0..3 {
        let prefix = format!("cmi.interactions.{index}");
        assert_eq!(host.value(&format!("{prefix}.id")), Some(format!("q{index}")));
        assert_eq!(host.value(&format!("{prefix}.student_response")).as_deref(), Some("b"));
        assert_eq!(host.value(&format!("{prefix}.latency")).as_deref(), Some("00:00:04"));
    }
}

#[test]
fn recorded_fields_read_back_through_session() {
    let host = InMemoryHost::new();
    let mut session = open_session(&host);
    let item = ItemId::new("formula-1");

    assert!(record(
        &mut session,
        0,
        &item,
        "=SUM(A1:A3)",
        InteractionResult::Correct,
        Weighting::new(0.5).unwrap(),
        12,
    ));

    assert_eq!(session.get("cmi.interactions.0.id"), "formula-1");
    assert_eq!(session.get("cmi.interactions.0.student_response"), "=SUM(A1:A3)");
    assert_eq!(session.get("cmi.interactions.0.result"), "correct");
    assert_eq!(session.get("cmi.interactions.0.weighting"), "0.5");
    assert_eq!(session.get("cmi.interactions.0.latency"), "00:00:12");
}

#[test]
fn recorder_assigns_consecutive_indices_and_latency() {
    let host = InMemoryHost::new();
    let mut session = open_session(&host);
    let mut recorder = InteractionRecorder::new(fixed_clock());

    let first = ItemId::question(0);
    let second = ItemId::question(1);
    recorder.mark_presented(&first);
    recorder.mark_presented(&second);
    recorder.clock_mut().advance(Duration::seconds(9));

    assert!(recorder.push(&mut session, first, "2", InteractionResult::Wrong, Weighting::ONE));
    recorder.clock_mut().advance(Duration::seconds(6));
    assert!(recorder.push(&mut session, second, "0", InteractionResult::Correct, Weighting::ONE));

    let records = recorder.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].index, 0);
    assert_eq!(records[0].latency_seconds, 9);
    assert_eq!(records[1].index, 1);
    assert_eq!(records[1].latency_seconds, 15);
    assert_eq!(recorder.next_index(), 2);
    assert_eq!(host.value("cmi.interactions.1.latency").as_deref(), Some("00:00:15"));
    assert_eq!(host.value("cmi.interactions.0.result").as_deref(), Some("wrong"));
}

#[test]
fn failed_writes_still_consume_the_slot() {
    let host = InMemoryHost::new();
    let mut session = open_session(&host);
    let mut recorder = InteractionRecorder::new(fixed_clock());

    host.reject(Primitive::SetValue);
    assert!(!recorder.push(
        &mut session,
        ItemId::question(0),
        "1",
        InteractionResult::Neutral,
        Weighting::ONE,
    ));
    assert_eq!(host.calls().set_value, 5);

    host.accept(Primitive::SetValue);
    assert!(recorder.push(
        &mut session,
        ItemId::question(1),
        "1",
        InteractionResult::Neutral,
        Weighting::ONE,
    ));
    assert_eq!(host.value("cmi.interactions.0.id"), None);
    assert_eq!(host.value("cmi.interactions.1.id").as_deref(), Some("q1"));
    assert_eq!(host.value("cmi.interactions.1.latency").as_deref(), Some("00:00:00"));
}

#[test]
fn record_without_session_writes_nothing() {
    let mut session = SessionManager::detached();
    assert!(!record(
        &mut session,
        0,
        &ItemId::question(0),
        "",
        InteractionResult::Neutral,
        Weighting::ONE,
        0,
    ));
}
