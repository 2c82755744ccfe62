/// Integration tests for host authority
///
/// Only the host writes canonical state. Every write attempted elsewhere is
/// refused, and the mirror only moves when the host says so.
use hostsync_runtime::RuntimeError;
use hostsync_shared::Value;
use hostsync_test::{host_and_peer, init_logging, pump};

#[test]
fn peer_mutation_leaves_state_unchanged() {
    init_logging();
    let (_hub, _host, mut alice) = host_and_peer(false);

    let before = alice.state().clone();
    let result = alice.mutate_state(|state| {
        state.insert("score", 99);
    });

    assert_eq!(result, Ok(()));
    assert_eq!(alice.state(), &before);
}

#[test]
fn peer_mutation_errors_in_strict_mode() {
    let (_hub, _host, mut alice) = host_and_peer(true);

    let result = alice.mutate_state(|state| {
        state.insert("score", 99);
    });

    assert_eq!(
        result,
        Err(RuntimeError::PrivilegeViolation {
            operation: "mutate state"
        })
    );
    assert_eq!(alice.state().get("score"), Some(&Value::from(0)));
}

#[test]
fn host_mutation_reaches_peer() {
    init_logging();
    let (_hub, mut host, mut alice) = host_and_peer(true);

    host.mutate_state(|state| {
        state.insert("score", 7);
    })
    .unwrap();
    assert_eq!(host.state().get("score"), Some(&Value::from(7)));
    assert_eq!(alice.state().get("score"), Some(&Value::from(0)));

    pump(&mut [&mut host, &mut alice]).unwrap();
    assert_eq!(alice.state(), host.state());
}

#[test]
fn only_host_reports_is_host() {
    let (_hub, host, alice) = host_and_peer(false);
    assert!(host.is_host());
    assert!(!alice.is_host());
    assert_eq!(host.local_id().as_str(), "host");
    assert_eq!(alice.local_id().as_str(), "alice");
}

#[test]
fn peer_cannot_flush_sync() {
    let (_hub, _host, mut alice) = host_and_peer(true);
    assert_eq!(
        alice.flush_sync(),
        Err(RuntimeError::PrivilegeViolation {
            operation: "flush sync"
        })
    );
}

#[test]
fn host_rejection_keeps_partial_writes() {
    let (hub, mut host, _alice) = host_and_peer(false);
    let sent_before = hub.sent_by("host").len();

    assert_eq!(host.submit_action("half_apply", Value::Null, None), Ok(()));

    assert_eq!(host.state().get("touched"), Some(&Value::from(true)));
    // the action envelope still goes out
    assert_eq!(hub.sent_by("host").len(), sent_before + 1);
}

#[test]
fn host_rejection_errors_in_strict_mode() {
    let (_hub, mut host, _alice) = host_and_peer(true);

    assert_eq!(
        host.submit_action("half_apply", Value::Null, None),
        Err(RuntimeError::ActionRejected {
            action: "half_apply".to_string(),
            reason: "rejected: gave up halfway".to_string(),
        })
    );
}

#[test]
fn peer_action_is_not_applied_locally() {
    let (_hub, _host, mut alice) = host_and_peer(true);
    let before = alice.state().clone();

    alice.submit_action("set_score", 12, None).unwrap();

    assert_eq!(alice.state(), &before);
}
