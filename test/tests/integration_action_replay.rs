/// Integration tests for action submission and replay
///
/// A remote action must draw exactly the random numbers on the host that it
/// would have drawn on the peer that submitted it.
use hostsync_runtime::{RuntimeError, ACTION_SEED_START};
use hostsync_shared::{
    ActionPayload, DeterministicRng, EnvelopeBody, EnvelopeKind, PeerId, Value, WireContext,
    WireEnvelope,
};
use hostsync_test::{host_and_peer, init_logging, pump, ROLL_COUNT};

fn expected_rolls(seed: u64) -> Value {
    let mut random = DeterministicRng::new(seed as i64);
    let rolls: Vec<i64> = (0..ROLL_COUNT).map(|_| random.range(1, 7)).collect();
    Value::from(rolls)
}

#[test]
fn remote_roll_matches_requester_seed() {
    init_logging();
    let (_hub, mut host, mut alice) = host_and_peer(true);

    alice.submit_action("roll", Value::Null, None).unwrap();
    pump(&mut [&mut host, &mut alice]).unwrap();

    assert_eq!(
        host.state()
            .get_path(&["rolls".into(), "alice".into()]),
        Some(&expected_rolls(ACTION_SEED_START))
    );
    assert_eq!(alice.state(), host.state());
}

#[test]
fn seeds_advance_per_submission() {
    let (_hub, mut host, mut alice) = host_and_peer(true);

    alice.submit_action("roll", Value::Null, None).unwrap();
    alice.submit_action("roll", Value::Null, None).unwrap();
    pump(&mut [&mut host, &mut alice]).unwrap();

    // the second roll overwrote the first
    assert_eq!(
        host.state()
            .get_path(&["rolls".into(), "alice".into()]),
        Some(&expected_rolls(ACTION_SEED_START + 1))
    );
}

#[test]
fn host_and_peer_counters_are_independent() {
    let (_hub, mut host, mut alice) = host_and_peer(true);

    host.submit_action("roll", Value::Null, None).unwrap();
    alice.submit_action("roll", Value::Null, None).unwrap();
    pump(&mut [&mut host, &mut alice]).unwrap();

    let rolls = host.state().get("rolls").unwrap();
    assert_eq!(rolls.get("host"), rolls.get("alice"));
}

#[test]
fn requester_is_taken_from_transport_sender() {
    init_logging();
    let (hub, mut host, _alice) = host_and_peer(true);

    let spoofed = WireEnvelope::new(
        EnvelopeBody::Action(ActionPayload {
            action_name: "roll".to_string(),
            input: Value::Null,
            context: WireContext {
                requester_id: PeerId::from("mallory"),
                target_id: PeerId::from("mallory"),
                is_host: true,
            },
            action_seed: 77,
        }),
        &PeerId::from("mallory"),
    );
    hub.inject("host", "alice", &spoofed);
    host.update().unwrap();

    let rolls = host.state().get("rolls").unwrap();
    assert_eq!(rolls.get("alice"), Some(&expected_rolls(77)));
    assert_eq!(rolls.get("mallory"), None);
}

#[test]
fn remote_move_targets_requester() {
    let (_hub, mut host, mut alice) = host_and_peer(true);

    let input: Value = [("dx", 2), ("dy", -3)].into_iter().collect();
    alice.submit_action("move", input, None).unwrap();
    pump(&mut [&mut host, &mut alice]).unwrap();

    let position = host
        .state()
        .get_path(&["players".into(), "alice".into()])
        .unwrap();
    assert_eq!(position.get("x"), Some(&Value::from(2)));
    assert_eq!(position.get("y"), Some(&Value::from(-3)));
    assert_eq!(alice.state(), host.state());
}

#[test]
fn host_move_can_target_another_player() {
    let (_hub, mut host, _alice) = host_and_peer(true);

    let input: Value = [("dx", 1), ("dy", 1)].into_iter().collect();
    host.submit_action("move", input, Some(PeerId::from("alice")))
        .unwrap();

    let players = host.state().get("players").unwrap();
    assert_eq!(
        players.get("alice").and_then(|player| player.get("x")),
        Some(&Value::from(1))
    );
    assert_eq!(
        players.get("host").and_then(|player| player.get("x")),
        Some(&Value::from(0))
    );
}

#[test]
fn unknown_action_suggests_closest_name() {
    let (_hub, _host, mut alice) = host_and_peer(true);

    let error = alice
        .submit_action("mvoe", Value::Null, None)
        .unwrap_err();

    assert_eq!(
        error,
        RuntimeError::UnknownAction {
            name: "mvoe".to_string(),
            suggestion: Some("move".to_string()),
        }
    );
    assert_eq!(
        format!("{}", error),
        "Unknown action 'mvoe'. Did you mean 'move'?"
    );
}

#[test]
fn unknown_action_without_close_match() {
    let (_hub, _host, mut alice) = host_and_peer(true);

    let error = alice
        .submit_action("teleport_everyone", Value::Null, None)
        .unwrap_err();
    assert_eq!(format!("{}", error), "Unknown action 'teleport_everyone'");
}

#[test]
fn unknown_action_is_dropped_when_not_strict() {
    let (hub, _host, mut alice) = host_and_peer(false);
    let sent_before = hub.sent_by("alice").len();

    assert_eq!(alice.submit_action("mvoe", Value::Null, None), Ok(()));
    assert_eq!(hub.sent_by("alice").len(), sent_before);
}

#[test]
fn invalid_input_never_leaves_the_peer() {
    let (hub, mut host, _alice) = host_and_peer(true);

    let result = host.submit_action("set_score", -1, None);
    assert!(matches!(
        result,
        Err(RuntimeError::InvalidInput { ref action, .. }) if action == "set_score"
    ));
    assert_eq!(host.state().get("score"), Some(&Value::from(0)));
    assert!(hub
        .sent_by("host")
        .iter()
        .all(|record| record.kind != EnvelopeKind::Action));
}

#[test]
fn typed_input_with_wrong_shape_is_invalid() {
    let (_hub, _host, mut alice) = host_and_peer(true);
    let result = alice.submit_action("move", "north", None);
    assert!(matches!(result, Err(RuntimeError::InvalidInput { .. })));
}

#[test]
fn remote_unknown_action_is_logged_by_lenient_host() {
    let (hub, mut host, _alice) = host_and_peer(false);

    let envelope = WireEnvelope::new(
        EnvelopeBody::Action(ActionPayload {
            action_name: "fly".to_string(),
            input: Value::Null,
            context: WireContext {
                requester_id: PeerId::from("alice"),
                target_id: PeerId::from("alice"),
                is_host: false,
            },
            action_seed: ACTION_SEED_START,
        }),
        &PeerId::from("alice"),
    );
    hub.inject("host", "alice", &envelope);

    let before = host.state().clone();
    assert_eq!(host.update(), Ok(()));
    assert_eq!(host.state(), &before);
}
