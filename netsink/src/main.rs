use clap::Parser;
use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, UdpSocket};

#[derive(Parser, Debug)]
#[command(name = "netsink", about = "Print everything received on a TCP or UDP port")]
struct Args {
    /// Network to listen on (tcp, udp).
    #[arg(short, long, default_value = "tcp")]
    net: String,
    /// Bind address.
    #[arg(short, long, default_value = "0.0.0.0")]
    ip: String,
    /// Bind port.
    #[arg(short, long, default_value_t = 1234)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Args { net, ip, port } = Args::parse();
    let local = format!("{ip}:{port}");

    match net.as_str() {
        "tcp" => {
            let listener = TcpListener::bind(&local).await?;
            loop {
                let (mut peer, addr) = listener.accept().await?;
                let mut payload = Vec::new();
                peer.read_to_end(&mut payload).await?;
                println!(
                    "{} bytes from {addr}: {}",
                    payload.len(),
                    String::from_utf8_lossy(&payload)
                );
            }
        }
        "udp" => {
            let socket = UdpSocket::bind(&local).await?;
            let mut buff = [0u8; 65535];
            loop {
                let (n, addr) = socket.recv_from(&mut buff).await?;
                println!("{n} bytes from {addr}: {}", String::from_utf8_lossy(&buff[..n]));
            }
        }
        other => anyhow::bail!("unknown network {other:?} (expected tcp or udp)"),
    }
}
