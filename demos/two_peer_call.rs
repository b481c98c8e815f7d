//! Two-peer signaling walkthrough
//!
//! Run with: cargo run --example two_peer_call
//!
//! Drives a complete offer/answer/candidate exchange between two peers
//! through the in-process registry. A spawned task plays the role of the
//! transport layer: it subscribes to `signal` events and routes each one
//! by its `to` hint, exactly the way a WebSocket gateway would push to a
//! live socket.
//!
//! ## What to look for
//!
//! - The `demo` room is created implicitly when alice connects
//! - Every relayed signal reaches the router task, which does its own
//!   routing; the registry never looks at `to`
//! - The room disappears (room:closed) the instant the last peer leaves

use std::sync::Arc;

use serde_json::json;

use rtc_rs::{Metadata, RegistryConfig, Signal, SignalingRegistry};

fn meta(value: serde_json::Value) -> Metadata {
    value.as_object().cloned().unwrap_or_default()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rtc_rs=debug".parse()?)
                .add_directive("two_peer_call=info".parse()?),
        )
        .init();

    let registry = Arc::new(SignalingRegistry::with_config(
        RegistryConfig::new()
            .ice_server("stun:stun.example.org:3478")
            .max_peers_per_room(2)
            .heartbeat_interval_ms(5_000),
    )?);

    // Transport stand-in: drain signal events and route by the `to` hint
    let mut signals = registry.on_signal();
    let mut closed = registry.on_room_closed();
    let router = tokio::spawn(async move {
        let mut routed = 0usize;
        while let Ok(event) = signals.recv().await {
            let target = event.signal.to.as_deref().unwrap_or("<room>");
            println!(
                "route: {} -> {} [{}]",
                event.from_peer_id,
                target,
                serde_json::to_string(&event.signal).unwrap_or_default()
            );
            routed += 1;
        }
        routed
    });

    // Alice dials in; the room is created implicitly
    let alice = registry
        .connect_peer("demo", "alice", meta(json!({ "role": "caller" })))
        .await?;
    println!(
        "alice joined {} (heartbeat every {}ms, ice: {:?})",
        alice.room_id, alice.heartbeat_interval_ms, alice.ice_servers
    );

    let bob = registry
        .connect_peer("demo", "bob", meta(json!({ "role": "callee" })))
        .await?;
    println!("bob joined {}", bob.room_id);

    // Offer/answer exchange, then trickle a candidate each way
    registry
        .relay("demo", "alice", Signal::offer(json!({ "sdp": "v=0 offer" })).to("bob"))
        .await?;
    registry
        .relay("demo", "bob", Signal::answer(json!({ "sdp": "v=0 answer" })).to("alice"))
        .await?;
    registry
        .relay(
            "demo",
            "alice",
            Signal::candidate(json!({ "candidate": "candidate:1 1 udp ..." })).to("bob"),
        )
        .await?;
    registry
        .relay(
            "demo",
            "bob",
            Signal::candidate(json!({ "candidate": "candidate:2 1 udp ..." })).to("alice"),
        )
        .await?;

    registry.heartbeat("demo", "alice").await?;
    registry.heartbeat("demo", "bob").await?;

    let snapshot = registry
        .get_room_snapshot("demo")
        .await
        .expect("room is live");
    println!(
        "room {}: {}/{} peers connected",
        snapshot.id,
        snapshot.peers.len(),
        snapshot.max_peers
    );

    // Hang up; the emptied room is removed immediately
    registry.relay("demo", "alice", Signal::bye(json!(null)).to("bob")).await?;
    registry.disconnect_peer("demo", "alice").await;
    registry.disconnect_peer("demo", "bob").await;

    println!("room closed: {}", closed.recv().await?.room_id);
    assert!(registry.get_room_snapshot("demo").await.is_none());

    // Dropping the registry ends the subscription; the router task drains
    drop(registry);
    let routed = router.await?;
    println!("router saw {} signals", routed);

    Ok(())
}
