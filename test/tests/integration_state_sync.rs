/// Integration tests for periodic state replication
use std::{cell::RefCell, rc::Rc, time::Duration};

use hostsync_runtime::{Runtime, SessionConfig};
use hostsync_shared::{EnvelopeKind, Patch, PeerId, Value};
use hostsync_test::{host_and_peer, init_logging, pump, pump_n_times, test_session, LocalHub, TestPeer};

fn broadcast_syncs(hub: &LocalHub) -> usize {
    hub.sent_by("host")
        .iter()
        .filter(|record| record.kind == EnvelopeKind::StateSync && record.target.is_none())
        .count()
}

#[test]
fn peer_replays_host_patches() {
    init_logging();
    let (_hub, mut host, mut alice) = host_and_peer(true);

    let received = Rc::new(RefCell::new(Vec::new()));
    let sink = received.clone();
    alice.on_patch(move |patches| sink.borrow_mut().push(patches.to_vec()));

    host.submit_action("set_score", 5, None).unwrap();
    pump(&mut [&mut host, &mut alice]).unwrap();

    assert_eq!(alice.state(), host.state());
    assert_eq!(
        *received.borrow(),
        vec![vec![Patch::replace(vec!["score".into()], 5.into())]]
    );
}

#[test]
fn host_patch_listeners_see_broadcast_patches() {
    let (_hub, mut host, mut alice) = host_and_peer(true);

    let received = Rc::new(RefCell::new(Vec::new()));
    let sink = received.clone();
    host.on_patch(move |patches| sink.borrow_mut().extend(patches.iter().cloned()));

    host.mutate_state(|state| {
        state.insert("score", 3);
    })
    .unwrap();
    pump(&mut [&mut host, &mut alice]).unwrap();

    assert_eq!(
        *received.borrow(),
        vec![Patch::replace(vec!["score".into()], 3.into())]
    );
}

#[test]
fn unchanged_state_is_not_broadcast() {
    let (hub, mut host, mut alice) = host_and_peer(true);
    let syncs = broadcast_syncs(&hub);

    pump_n_times(&mut [&mut host, &mut alice], 5).unwrap();

    assert_eq!(broadcast_syncs(&hub), syncs);
}

#[test]
fn many_mutations_collapse_into_one_tick() {
    let (hub, mut host, mut alice) = host_and_peer(true);
    let syncs = broadcast_syncs(&hub);

    for score in 1..=10 {
        host.mutate_state(|state| {
            state.insert("score", score);
        })
        .unwrap();
    }
    pump(&mut [&mut host, &mut alice]).unwrap();

    assert_eq!(broadcast_syncs(&hub), syncs + 1);
    assert_eq!(alice.state().get("score"), Some(&Value::from(10)));
}

#[test]
fn change_listeners_fire_on_both_sides() {
    let (_hub, mut host, mut alice) = host_and_peer(true);

    let host_changes = Rc::new(RefCell::new(0));
    let alice_changes = Rc::new(RefCell::new(0));
    let counter = host_changes.clone();
    host.on_change(move |_| *counter.borrow_mut() += 1);
    let counter = alice_changes.clone();
    alice.on_change(move |state| {
        assert!(state.get("score").is_some());
        *counter.borrow_mut() += 1;
    });

    host.submit_action("set_score", 1, None).unwrap();
    pump(&mut [&mut host, &mut alice]).unwrap();

    assert_eq!(*host_changes.borrow(), 1);
    assert_eq!(*alice_changes.borrow(), 1);
}

#[test]
fn unsubscribed_listener_is_silent() {
    let (_hub, mut host, mut alice) = host_and_peer(true);

    let calls = Rc::new(RefCell::new(0));
    let counter = calls.clone();
    let key = alice.on_change(move |_| *counter.borrow_mut() += 1);

    assert!(alice.unsubscribe(key));
    assert!(!alice.unsubscribe(key));

    host.submit_action("set_score", 2, None).unwrap();
    pump(&mut [&mut host, &mut alice]).unwrap();

    assert_eq!(*calls.borrow(), 0);
}

#[test]
fn flush_sync_ignores_the_timer() {
    let hub = LocalHub::new();
    let config = SessionConfig::host()
        .with_initial_peers(["host"])
        .with_sync_interval(Duration::from_secs(3600))
        .with_strict(true);
    let mut host = Runtime::new(test_session(), hub.connect("host", true), config).unwrap();
    let mut alice = TestPeer::peer(&hub, "alice", true);
    pump(&mut [&mut host, &mut alice]).unwrap();

    // only the targeted bootstrap went out; the interval has not elapsed
    assert_eq!(broadcast_syncs(&hub), 0);
    assert_eq!(alice.state(), host.state());

    host.submit_action("set_score", 9, None).unwrap();
    pump(&mut [&mut host, &mut alice]).unwrap();
    assert_eq!(alice.state().get("score"), Some(&Value::from(0)));

    host.flush_sync().unwrap();
    pump(&mut [&mut host, &mut alice]).unwrap();
    assert_eq!(broadcast_syncs(&hub), 1);
    assert_eq!(alice.state(), host.state());
}

#[test]
fn root_replacement_is_sent_as_full_state() {
    let (_hub, mut host, mut alice) = host_and_peer(true);

    host.mutate_state(|state| *state = Value::from(vec![1, 2, 3]))
        .unwrap();
    pump(&mut [&mut host, &mut alice]).unwrap();

    assert_eq!(alice.state(), &Value::from(vec![1, 2, 3]));
}

#[test]
fn list_length_change_replaces_list() {
    let (_hub, mut host, mut alice) = host_and_peer(true);

    let received = Rc::new(RefCell::new(Vec::new()));
    let sink = received.clone();
    alice.on_patch(move |patches| sink.borrow_mut().extend(patches.iter().cloned()));

    host.mutate_state(|state| {
        state.insert("log", vec!["start"]);
    })
    .unwrap();
    pump(&mut [&mut host, &mut alice]).unwrap();
    host.mutate_state(|state| {
        state.insert("log", vec!["start", "move"]);
    })
    .unwrap();
    pump(&mut [&mut host, &mut alice]).unwrap();

    assert_eq!(
        received.borrow().last(),
        Some(&Patch::replace(
            vec!["log".into()],
            Value::from(vec!["start", "move"])
        ))
    );
    assert_eq!(alice.state(), host.state());
}

#[test]
fn peer_ids_track_the_session() {
    let (_hub, host, _alice) = host_and_peer(true);
    let peers: Vec<&PeerId> = host.peer_ids().collect();
    assert_eq!(peers, vec![&PeerId::from("alice"), &PeerId::from("host")]);
}
