use anyhow::Result;
use clap::Parser;
use std::net::Ipv4Addr;
use tokio::time::Duration;

/// Search the local network for devices.
#[derive(Parser, Debug)]
pub struct Opt {
    /// Local interface address to send the broadcast from
    #[arg(short, long, default_value = "0.0.0.0")]
    pub interface: Ipv4Addr,
    /// How many seconds to wait for announcements
    #[arg(short, long, default_value_t = 1.0)]
    pub timeout: f64,
}

pub async fn main(opt: Opt) -> Result<()> {
    let hosts = dvrip_core::client::discover(opt.interface, Duration::from_secs_f64(opt.timeout))
        .await?;
    for host in hosts {
        println!(
            "{} {} {} {}/{} via {} port {} channels {}",
            host.serial,
            host.mac,
            host.name,
            host.host,
            host.mask,
            host.router,
            host.tcp_port,
            host.channels
        );
    }
    Ok(())
}
