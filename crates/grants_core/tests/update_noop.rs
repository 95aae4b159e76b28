use std::time::Duration;

use grants_core::{update, AppState, Msg, NotificationKind, RequestFailure, NOTIFICATION_TTL};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn confirm_without_pending_prompt_does_nothing() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::ConfirmAccepted);
    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn toasts_expire_after_three_seconds() {
    let (state, _) = update(
        AppState::new(),
        Msg::GrantsLoaded(Err(RequestFailure::default())),
    );
    let toast = &state.view().notifications[0];
    assert_eq!(toast.kind, NotificationKind::Error);

    let (mut state, _) = update(
        state,
        Msg::Tick {
            elapsed: Duration::from_millis(2900),
        },
    );
    assert_eq!(state.view().notifications.len(), 1);
    state.consume_dirty();

    let (mut state, _) = update(
        state,
        Msg::Tick {
            elapsed: Duration::from_millis(100),
        },
    );
    assert!(state.view().notifications.is_empty());
    assert!(state.consume_dirty());

    let (mut state, _) = update(
        state,
        Msg::Tick {
            elapsed: NOTIFICATION_TTL,
        },
    );
    assert!(!state.consume_dirty(), "idle ticks do not trigger renders");
}
