//! Loopback bus demo.
//!
//! Produces one envelope of each kind the control plane exchanges, consumes
//! them back on a separate task and checks every received envelope against
//! what was sent. Runs entirely in process over a memory transport.
//!
//!   cargo run -p actorbus-demo-loopback
//!   cargo run -p actorbus-demo-loopback -- --config demos/loopback/bus.toml

mod fixtures;

use actorbus_client::{BusConfig, Consumer, MemoryTransport, Producer};
use actorbus_core::{Message, MessageType};
use clap::Parser;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "loopback", about = "Round-trip every envelope through an in-memory bus")]
struct Args {
    /// Bus configuration file (TOML).
    #[arg(long, env = "ACTORBUS_CONFIG")]
    config: Option<PathBuf>,

    /// How long to wait for the consumer to catch up.
    #[arg(long, default_value_t = 10_000)]
    wait_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("loopback=info".parse()?))
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => BusConfig::load(path)?,
        None => BusConfig {
            topics: vec![
                "fabric-mb-public-test1".into(),
                "fabric-mb-public-test2".into(),
            ],
            ..Default::default()
        },
    };
    config.validate()?;
    tracing::info!("Using topics {:?}", config.topics);

    let bus = Arc::new(MemoryTransport::new());
    let producer = Producer::new(Arc::clone(&bus), &config);
    let outgoing = fixtures::outgoing();

    let mut expected: HashMap<(MessageType, String), Message> = HashMap::new();
    for (i, message) in outgoing.into_iter().enumerate() {
        let topic = &config.topics[i % config.topics.len()];
        let id = producer.produce_sync(topic, &message).await?;
        tracing::debug!("Produced {} ({})", message.discriminator(), id);
        expected.insert(
            (message.message_type(), message.message_id().to_string()),
            message,
        );
    }
    tracing::info!("Produced {} messages", expected.len());

    let (tx, mut rx) = mpsc::unbounded_channel();
    let consumer = Consumer::new(Arc::clone(&bus), &config).spawn(
        move |_: &str, message: Message| {
            let _ = tx.send(message);
        },
    );

    let mut mismatches = 0;
    let wait = tokio::time::sleep(Duration::from_millis(args.wait_ms));
    tokio::pin!(wait);
    while !expected.is_empty() {
        let incoming = tokio::select! {
            incoming = rx.recv() => incoming,
            _ = &mut wait => break,
        };
        let Some(incoming) = incoming else { break };
        let key = (incoming.message_type(), incoming.message_id().to_string());
        match expected.remove(&key) {
            Some(outgoing) if outgoing == incoming => {
                tracing::info!("{} {} matches", key.0, key.1);
            }
            Some(outgoing) => {
                mismatches += 1;
                tracing::warn!("{} {} differs\n sent: {:?}\n got:  {:?}", key.0, key.1, outgoing, incoming);
            }
            None => {
                mismatches += 1;
                tracing::warn!("Unexpected {} {}", key.0, key.1);
            }
        }
    }

    let stats = consumer.shutdown().await?;
    tracing::info!(
        "Consumer delivered {} and rejected {}",
        stats.delivered,
        stats.rejected
    );

    if !expected.is_empty() {
        anyhow::bail!("{} messages never arrived", expected.len());
    }
    if mismatches > 0 {
        anyhow::bail!("{mismatches} messages did not survive the round trip");
    }
    tracing::info!("All messages round-tripped");
    Ok(())
}
