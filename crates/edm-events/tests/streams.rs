//! Behaviour shared by every event stream.

use std::borrow::Cow;

use edm_events::{Event, EventReplay, EventStream, JsonReader, ReadErrorKind, Span};
use facet_testhelpers::test;

fn drain<'src>(mut stream: impl EventStream<'src>) -> Vec<Event<'src>> {
    let mut events = Vec::new();
    while stream.has_next() {
        events.push(stream.next_event().expect("well-formed input"));
    }
    events
}

fn drain_one<'src>(mut stream: impl EventStream<'src>) -> Event<'src> {
    stream.next_event().unwrap()
}

#[test]
fn test_replay_matches_reader() {
    let source = r#"{"name": "Ann", "tags": ["a", "b"], "address": {"city": "Oslo"}}"#;
    let events = edm_events::read(source).unwrap();
    let replayed = drain(EventReplay::new(events.clone()));
    assert_eq!(events, replayed);
}

#[test]
fn test_replay_past_end_is_eof() {
    let mut replay = EventReplay::new([Event::StartObject {
        span: Span::new(0, 1),
    }]);
    replay.next_event().unwrap();
    assert!(!replay.has_next());
    let error = replay.next_event().unwrap_err();
    assert_eq!(error.kind, ReadErrorKind::UnexpectedEof);
    assert_eq!(error.span, Span::empty(1));
}

#[test]
fn test_stream_through_mut_reference() {
    let mut reader = JsonReader::new(r#"{"a": 1}"#);
    let first = drain_one(&mut reader);
    assert!(matches!(first, Event::StartObject { .. }));
    assert!(matches!(
        reader.next_event().unwrap(),
        Event::StartProperty { name: Cow::Borrowed("a"), .. }
    ));
}

#[test]
fn test_owned_events_outlive_source() {
    let events: Vec<Event<'static>> = {
        let source = String::from(r#"{"k": "v"}"#);
        edm_events::read(&source)
            .unwrap()
            .into_iter()
            .map(Event::into_owned)
            .collect()
    };
    assert_eq!(events.len(), 4);
}

#[test]
fn test_root_scalar() {
    let events = drain(JsonReader::new("42"));
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], Event::EndProperty { value: Some(v), .. } if v == "42"));
}

#[test]
fn test_error_display() {
    let error = edm_events::read(r#"{"a": [1"#).unwrap_err();
    insta::assert_snapshot!(error.to_string(), @"unclosed array at offset 6");
}

#[test]
fn test_raw_tab_in_string_rejected() {
    let error = edm_events::read("{\"a\": \"x\ty\"}").unwrap_err();
    assert_eq!(error.kind, edm_events::ReadErrorKind::UnterminatedString);
}
