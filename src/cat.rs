use anyhow::{bail, Result};
use clap::Parser;
use dvrip_core::client::DvripClient;
use dvrip_core::dvrip::monitor::StreamKind;
use std::net::SocketAddr;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

/// Stream a recording or a live monitor to standard output.
#[derive(Parser, Debug)]
pub struct Opt {
    /// A file path from `find`, or `monitor:<channel>[;hd|sd]`
    pub name: String,
}

pub async fn main(opt: Opt, client: &mut DvripClient, addr: SocketAddr) -> Result<()> {
    let stream = TcpStream::connect(addr).await?;

    let mut reader = if opt.name.starts_with('/') {
        client.download(stream, &opt.name).await?
    } else if let Some(target) = opt.name.strip_prefix("monitor:") {
        let (channel, kind) = match target.split_once(';') {
            None => (target, StreamKind::Hd),
            Some((channel, "hd")) => (channel, StreamKind::Hd),
            Some((channel, "sd")) => (channel, StreamKind::Sd),
            Some((_, other)) => bail!("unknown stream {:?}, expected hd or sd", other),
        };
        let channel: u32 = channel.parse()?;
        client.monitor(stream, channel, kind).await?
    } else {
        bail!("expected a file path or monitor:<channel>[;hd|sd]");
    };

    let mut stdout = tokio::io::stdout();
    while let Some(chunk) = reader.read_chunk().await? {
        stdout.write_all(&chunk).await?;
    }
    stdout.flush().await?;
    Ok(())
}
