use ownlib_core::{update, AppState, Msg};

#[test]
fn noop_does_not_change_state_or_emit_effects() {
    let state = AppState::new();
    let before = state.view();
    let (next, effects) = update(state, Msg::NoOp);
    assert_eq!(next.view(), before);
    assert!(effects.is_empty());
}
