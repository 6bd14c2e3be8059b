use responder_core::{EventSource, GestureResponder, InputEvent, ResponderError, ResponderOptions};
use responder_testing::{CallbackLog, Hook, ResponderTestRule, FRAME_MILLIS, TEST_TARGET};

#[test]
fn drag_reports_full_lifecycle_with_frame_timing() {
    let mut rule = ResponderTestRule::new();
    let log = CallbackLog::new();
    let card = rule.attach("card", log.record("card", ResponderOptions::draggable()));

    rule.drag((0.0, 0.0), (30.0, 0.0), 3);

    assert_eq!(
        log.hooks_for("card"),
        vec!["grant", "move", "move", "move", "release"]
    );
    let moves = log.states_for("card", Hook::Move);
    assert_eq!(moves[2].time, 3 * FRAME_MILLIS);
    assert!((moves[0].velocity - 10.0 / FRAME_MILLIS as f32).abs() < 1e-4);
    assert_eq!(rule.responder(card).state().last_local.x, 30.0);
    assert_eq!(rule.holder_name(), None);
}

#[test]
fn press_reports_prevented_start_and_holder() {
    let mut rule = ResponderTestRule::new();
    rule.attach("outer", ResponderOptions::draggable());
    rule.attach("inner", ResponderOptions::draggable());

    let start = rule.press(2.0, 2.0);

    assert!(start.is_default_prevented());
    assert_eq!(rule.holder_name(), Some("inner"));
    assert_eq!(rule.holder_count(), 1);
}

#[test]
fn hub_without_target_rejects_attach() {
    let rule = ResponderTestRule::new();
    rule.hub().set_target(None);
    let responder = GestureResponder::new(rule.context().clone(), ResponderOptions::new());

    assert_eq!(
        responder.attach(rule.hub().clone()),
        Err(ResponderError::MissingTarget)
    );
    assert_eq!(rule.hub().listener_count(), 0);

    rule.hub().set_target(Some(TEST_TARGET));
    assert_eq!(rule.hub().target(), Some(TEST_TARGET));
    assert!(responder.attach(rule.hub().clone()).is_ok());
    assert_eq!(rule.hub().listener_count(), 5);
}

#[test]
fn dropping_a_holder_terminates_its_claim() {
    let rule = ResponderTestRule::new();
    let log = CallbackLog::new();
    let options = log.record("temp", ResponderOptions::draggable());
    let responder = GestureResponder::new(rule.context().clone(), options);
    responder.attach(rule.hub().clone()).unwrap();

    rule.hub().dispatch(InputEvent::start(TEST_TARGET, 0.0, 0.0));
    assert!(rule.context().is_held_by(responder.id()));

    drop(responder);
    assert_eq!(rule.context().holder(), None);
    assert_eq!(rule.hub().listener_count(), 0);
    assert_eq!(log.sequence(), vec!["temp:grant", "temp:terminate"]);
}
