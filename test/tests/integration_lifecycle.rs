/// Integration tests for peer departure and runtime destruction
use std::{cell::RefCell, rc::Rc};

use hostsync_runtime::RuntimeError;
use hostsync_shared::{PeerId, Value};
use hostsync_test::{host_and_peer, init_logging, pump};

#[test]
fn departure_runs_leave_hook_everywhere() {
    init_logging();
    let (hub, mut host, mut alice) = host_and_peer(true);
    let mut bob = hostsync_test::TestPeer::peer(&hub, "bob", true);
    pump(&mut [&mut host, &mut alice, &mut bob]).unwrap();

    bob.destroy();
    pump(&mut [&mut host, &mut alice]).unwrap();

    let players = host.state().get("players").unwrap();
    assert!(players.get("bob").is_none());
    assert_eq!(alice.state(), host.state());
    assert!(!host.peer_ids().any(|peer_id| peer_id == &PeerId::from("bob")));
}

#[test]
fn destroy_disconnects_transport() {
    let (hub, _host, mut alice) = host_and_peer(true);
    assert!(hub.is_connected("alice"));

    alice.destroy();

    assert!(alice.is_destroyed());
    assert!(!hub.is_connected("alice"));
}

#[test]
fn destroyed_runtime_rejects_operations_in_strict_mode() {
    let (_hub, _host, mut alice) = host_and_peer(true);
    alice.destroy();

    assert_eq!(
        alice.submit_action("roll", Value::Null, None),
        Err(RuntimeError::Destroyed {
            operation: "submit an action"
        })
    );
    assert_eq!(
        alice.broadcast_event("chat", "hi"),
        Err(RuntimeError::Destroyed {
            operation: "broadcast an event"
        })
    );
    assert_eq!(alice.update(), Ok(()));
}

#[test]
fn destroyed_runtime_is_inert_when_lenient() {
    let (hub, mut host, mut alice) = host_and_peer(false);
    alice.destroy();
    let sent_before = hub.sent().len();

    assert_eq!(alice.submit_action("roll", Value::Null, None), Ok(()));
    assert_eq!(
        alice.mutate_state(|state| {
            state.insert("score", 1);
        }),
        Ok(())
    );
    assert_eq!(hub.sent().len(), sent_before);

    host.destroy();
    assert_eq!(host.flush_sync(), Ok(()));
    assert_eq!(host.update(), Ok(()));
}

#[test]
fn destroy_drops_listeners_and_is_idempotent() {
    let (_hub, mut host, mut alice) = host_and_peer(true);

    let calls = Rc::new(RefCell::new(0));
    let counter = calls.clone();
    host.on_change(move |_| *counter.borrow_mut() += 1);

    host.destroy();
    host.destroy();

    let _ = host.mutate_state(|state| {
        state.insert("score", 1);
    });
    pump(&mut [&mut host, &mut alice]).unwrap();

    assert_eq!(*calls.borrow(), 0);
    assert_eq!(host.state().get("score"), Some(&Value::from(0)));
}
