use crate::command::handlers::search::streaming::FramedEvent;

#[test]
fn data_event_is_prefixed_and_terminated() {
    assert_eq!(FramedEvent::data("hello").encode(), "data: hello\n\n");
}

#[test]
fn blank_line_becomes_single_space() {
    let event = FramedEvent::data("");
    assert_eq!(event, FramedEvent::Data(" ".to_string()));
    assert_eq!(event.encode(), "data:  \n\n");
}

#[test]
fn error_event_carries_json_payload() {
    let event = FramedEvent::error("worker \"7\" went away");
    assert!(event.is_error());
    assert_eq!(
        event.encode(),
        "data: {\"error\":\"worker \\\"7\\\" went away\"}\n\n"
    );
}
