use clap::Parser;
use netsend::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    netsend::run(&Config::parse()).await
}
