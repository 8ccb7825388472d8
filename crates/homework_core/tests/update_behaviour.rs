use std::sync::Once;

use chrono::{TimeZone, Utc};
use homework_core::{
    update, Disposition, Effect, ErrorKind, HomeworkRecord, Msg, NotifyOutcome, PipelineError,
    PollState, TransportFailure,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(bot_logging::initialize_for_tests);
}

fn response(status: &str, current_date: i64) -> Value {
    json!({
        "homeworks": [{
            "homework_name": "hw1",
            "status": status,
            "date_updated": "2022-01-01T00:00:00Z"
        }],
        "current_date": current_date
    })
}

fn poll(state: PollState, raw: Value) -> (PollState, Vec<Effect>) {
    update(state, Msg::Polled(Ok(raw)))
}

/// Simulates the notifier delivering every `Notify` effect.
fn deliver_all(mut state: PollState, effects: &[Effect]) -> PollState {
    for effect in effects {
        if let Effect::Notify { text, observed } = effect {
            let (next, follow_up) = update(
                state,
                Msg::Notified {
                    outcome: NotifyOutcome {
                        sent: true,
                        last_sent: text.clone(),
                    },
                    observed: observed.clone(),
                },
            );
            assert!(follow_up.is_empty());
            state = next;
        }
    }
    state
}

fn notify_texts(effects: &[Effect]) -> Vec<&str> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Notify { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn first_status_notifies_and_advances_cursor() {
    init_logging();
    let (state, effects) = poll(PollState::new(0), response("reviewing", 1000));

    assert_eq!(state.last_poll_timestamp(), 1000);
    assert_eq!(
        effects,
        vec![Effect::Notify {
            text: "Status changed for submission \"hw1\". Submitted for review.".to_string(),
            observed: Some(HomeworkRecord {
                id: None,
                name: "hw1".to_string(),
                status: "reviewing".to_string(),
                date_updated: Some("2022-01-01T00:00:00Z".to_string()),
            }),
        }]
    );
    // Not committed until the notifier settles.
    assert!(state.last_observed().is_none());

    let state = deliver_all(state, &effects);
    assert_eq!(
        state.last_sent(),
        Some("Status changed for submission \"hw1\". Submitted for review.")
    );
    assert_eq!(state.last_observed().unwrap().status, "reviewing");
}

#[test]
fn repeated_status_is_unchanged() {
    init_logging();
    let (state, effects) = poll(PollState::new(0), response("reviewing", 1000));
    let state = deliver_all(state, &effects);

    let (state, effects) = poll(state, response("reviewing", 1600));
    assert_eq!(
        effects,
        vec![Effect::Unchanged {
            name: "hw1".to_string(),
            updated_at: Some(Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap()),
        }]
    );
    assert_eq!(state.last_poll_timestamp(), 1600);
}

#[test]
fn unchanged_status_without_parseable_date_carries_none() {
    init_logging();
    let raw = |date: &str| {
        json!({
            "homeworks": [{"id": 5, "homework_name": "hw1", "status": "rejected", "date_updated": date}],
            "current_date": 1000
        })
    };
    let (state, effects) = poll(PollState::new(0), raw("2022-01-01T00:00:00Z"));
    let state = deliver_all(state, &effects);

    let (_state, effects) = poll(state, raw("not a date"));
    assert_eq!(
        effects,
        vec![Effect::Unchanged {
            name: "hw1".to_string(),
            updated_at: None,
        }]
    );
}

#[test]
fn status_transition_notifies_with_new_text() {
    init_logging();
    let (state, effects) = poll(PollState::new(0), response("reviewing", 1000));
    let first = notify_texts(&effects)[0].to_string();
    let state = deliver_all(state, &effects);

    let (_state, effects) = poll(state, response("approved", 1600));
    let texts = notify_texts(&effects);
    assert_eq!(texts.len(), 1);
    assert_ne!(texts[0], first);
    assert!(texts[0].ends_with("Reviewed: the reviewer liked everything. Hooray!"));
}

#[test]
fn missing_current_date_is_suppressed_and_state_unchanged() {
    init_logging();
    let state = PollState::new(500);
    let raw = json!({"homeworks": [{"homework_name": "hw1", "status": "reviewing"}]});

    let (next, effects) = poll(state.clone(), raw);
    assert_eq!(next, state);
    assert_eq!(effects.len(), 1);
    match &effects[0] {
        Effect::Report(classified) => {
            assert_eq!(classified.kind, ErrorKind::Schema);
            assert_eq!(classified.disposition, Disposition::Suppressible);
        }
        other => panic!("expected report, got {other:?}"),
    }
}

#[test]
fn undocumented_status_is_reported_without_notification() {
    init_logging();
    let (state, effects) = poll(PollState::new(0), response("in_review_extra", 1000));

    assert!(notify_texts(&effects).is_empty());
    assert!(matches!(
        &effects[..],
        [Effect::Report(c)] if c.kind == ErrorKind::UnknownStatus
    ));
    assert_eq!(state.last_poll_timestamp(), 1000);
    assert!(state.last_observed().is_none());
}

#[test]
fn unauthorized_aborts() {
    init_logging();
    let (state, effects) = update(
        PollState::new(10),
        Msg::Polled(Err(PipelineError::Auth("status code 401".into()))),
    );
    assert_eq!(state.last_poll_timestamp(), 10);
    assert!(matches!(
        &effects[..],
        [Effect::Abort(c)] if c.kind == ErrorKind::Auth && c.is_fatal()
    ));
}

#[test]
fn transport_failure_is_reported_only() {
    init_logging();
    let err = PipelineError::transport(TransportFailure::HttpStatus(503), "503 Service Unavailable");
    let (_state, effects) = update(PollState::new(0), Msg::Polled(Err(err)));
    assert!(matches!(
        &effects[..],
        [Effect::Report(c)] if c.kind == ErrorKind::Transport
    ));
}

#[test]
fn unexpected_failure_reports_and_notifies_operator() {
    init_logging();
    let err = PipelineError::Unexpected("request could not be built".into());
    let (_state, effects) = update(PollState::new(0), Msg::Polled(Err(err)));

    assert_eq!(effects.len(), 2);
    assert!(matches!(&effects[0], Effect::Report(c) if c.kind == ErrorKind::Unexpected));
    assert_eq!(
        effects[1],
        Effect::Notify {
            text: "Bot failure: request could not be built".to_string(),
            observed: None,
        }
    );
}

#[test]
fn failed_delivery_keeps_status_pending() {
    init_logging();
    let (state, effects) = poll(PollState::new(0), response("reviewing", 1000));
    assert_eq!(notify_texts(&effects).len(), 1);

    let (state, reported) = update(
        state,
        Msg::NotifyFailed(PipelineError::Delivery("connection reset".into())),
    );
    assert!(matches!(&reported[..], [Effect::Report(c)] if c.kind == ErrorKind::Delivery));
    assert!(state.last_sent().is_none());
    assert!(state.last_observed().is_none());

    // Same status again: still counts as a change, so delivery is retried.
    let (_state, effects) = poll(state, response("reviewing", 1600));
    assert_eq!(notify_texts(&effects).len(), 1);
}

#[test]
fn cursor_never_moves_backwards() {
    init_logging();
    let (state, effects) = poll(PollState::new(0), response("reviewing", 2000));
    let state = deliver_all(state, &effects);

    let (state, _effects) = poll(state, response("reviewing", 1500));
    assert_eq!(state.last_poll_timestamp(), 2000);
}

#[test]
fn skipped_duplicate_still_commits_observation() {
    init_logging();
    let text = "Status changed for submission \"hw1\". Submitted for review.".to_string();
    let (state, effects) = poll(PollState::new(0), response("reviewing", 1000));
    let observed = match &effects[..] {
        [Effect::Notify { observed, .. }] => observed.clone(),
        other => panic!("expected notify, got {other:?}"),
    };

    let (state, _) = update(
        state,
        Msg::Notified {
            outcome: NotifyOutcome {
                sent: false,
                last_sent: text.clone(),
            },
            observed,
        },
    );
    assert_eq!(state.last_sent(), Some(text.as_str()));
    assert!(state.last_observed().is_some());
}
