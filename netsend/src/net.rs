use anyhow::{bail, Context, Result};
use log::debug;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpStream, UdpSocket};

use crate::Config;

/// An established outbound connection over one of the supported transports.
#[derive(Debug)]
pub enum Connection {
    Tcp(TcpStream),
    Udp(UdpSocket),
}

impl Connection {
    /// Dials `config.target()` once over the configured network.
    ///
    /// Unknown network names fail here, not at argument parsing.
    pub async fn connect(config: &Config) -> Result<Self> {
        let target = config.target();
        match config.net.as_str() {
            "tcp" => {
                let stream = TcpStream::connect(&target)
                    .await
                    .with_context(|| format!("failed to connect to tcp://{target}"))?;
                Ok(Self::Tcp(stream))
            }
            "udp" => {
                let socket = UdpSocket::bind("0.0.0.0:0")
                    .await
                    .context("failed to bind a local udp socket")?;
                socket
                    .connect(&target)
                    .await
                    .with_context(|| format!("failed to connect to udp://{target}"))?;
                Ok(Self::Udp(socket))
            }
            other => bail!("unknown network {other:?} (expected tcp or udp)"),
        }
    }

    /// Writes the whole payload to the connection.
    ///
    /// TCP loops until every byte is accepted. UDP sends one datagram and
    /// treats a short send as an error.
    pub async fn send(&mut self, payload: &[u8]) -> Result<()> {
        match self {
            Self::Tcp(stream) => {
                stream
                    .write_all(payload)
                    .await
                    .context("failed to write message")?;
            }
            Self::Udp(socket) => {
                let sent = socket
                    .send(payload)
                    .await
                    .context("failed to send datagram")?;
                if sent != payload.len() {
                    bail!("short datagram send: {sent} of {} bytes", payload.len());
                }
            }
        }
        debug!("sent {} bytes", payload.len());
        Ok(())
    }

    /// Releases the connection, reporting transport close failures.
    ///
    /// A UDP socket has nothing to tear down; dropping it is the close.
    pub async fn close(self) -> Result<()> {
        match self {
            Self::Tcp(mut stream) => stream
                .shutdown()
                .await
                .context("failed to close the connection"),
            Self::Udp(_) => Ok(()),
        }
    }
}
