//! One-shot TCP/UDP message sender.
//!
//! Dials a single outbound connection, writes one message, closes the
//! connection. `--count` switches to the repeated mode, which spawns one
//! task per message but funnels every socket write through a single
//! writer owning the connection.

mod net;

use anyhow::Result;
use bytes::Bytes;
use clap::Parser;
use log::info;
use tokio::sync::mpsc;

pub use net::Connection;

/// Payload of the default one-shot send.
pub const MESSAGE: &str = "Hello Gophers!";

#[derive(Parser, Debug)]
#[command(name = "netsend", about = "Send a message over TCP or UDP")]
pub struct Config {
    /// Network to dial (tcp, udp).
    #[arg(short, long, default_value = "tcp")]
    pub net: String,
    /// Destination host.
    #[arg(short, long, default_value = "localhost")]
    pub ip: String,
    /// Destination port.
    #[arg(short, long, default_value_t = 1234)]
    pub port: u16,
    /// Number of numbered messages to send over the one connection.
    #[arg(short, long, default_value_t = 1)]
    pub count: usize,
}

impl Config {
    /// The dial target, `<ip>:<port>`.
    pub fn target(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}

/// Connect, send, close. Every failure is terminal for the caller.
pub async fn run(config: &Config) -> Result<()> {
    let mut conn = Connection::connect(config).await?;
    info!("connected to {} over {}", config.target(), config.net);

    if config.count == 1 {
        conn.send(MESSAGE.as_bytes()).await?;
    } else {
        send_many(&mut conn, config.count).await?;
    }

    conn.close().await
}

/// Sends `count` numbered messages produced by independently spawned tasks.
///
/// The tasks only format their payload; all socket writes happen here, one
/// at a time, so messages never interleave on the wire.
pub async fn send_many(conn: &mut Connection, count: usize) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<Bytes>(count.max(1));
    for i in 0..count {
        let tx = tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(Bytes::from(format!("{MESSAGE}: {i}"))).await;
        });
    }
    drop(tx);

    while let Some(payload) = rx.recv().await {
        conn.send(&payload).await?;
    }
    Ok(())
}
