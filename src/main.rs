#![warn(missing_docs)]
#![warn(clippy::todo)]
//!
//! # dvrip
//!
//! Command line tools for DVRIP digital video recorders: discover devices
//! on the local network, inspect their state, search and download
//! recordings, watch live streams and reboot them.
//!
//! The device address and credentials come from the command line or from
//! the `DVR_HOST`, `DVR_SERV`, `DVR_USERNAME` and `DVR_PASSWORD`
//! environment variables.

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::warn;

mod cat;
mod clock;
mod cmdline;
mod discover;
mod find;
mod info;
mod logs;

use cmdline::{Command, Opt};
use dvrip_core::client::DvripClient;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let Opt {
        host,
        port,
        username,
        password,
        cmd,
    } = Opt::parse();

    match cmd {
        Command::Discover(cmd) => discover::main(cmd).await,
        cmd => {
            let host = host.context("no device given; use --host or DVR_HOST")?;
            let addr = tokio::net::lookup_host((host.as_str(), port))
                .await?
                .next()
                .with_context(|| format!("{} resolves to no address", host))?;

            let mut client = DvripClient::connect(addr)
                .await
                .with_context(|| format!("cannot connect to {}", addr))?;
            client
                .login(&username, &password)
                .await
                .with_context(|| format!("cannot log in to {} as {}", host, username))?;

            match cmd {
                Command::Discover(_) => unreachable!(),
                Command::Reboot => {
                    // No logout: the device is gone once it acknowledges.
                    client.reboot().await?;
                    Ok(())
                }
                cmd => {
                    let result = match cmd {
                        Command::Info => info::main(&mut client).await,
                        Command::Time(cmd) => clock::main(cmd, &mut client).await,
                        Command::Find(cmd) => find::main(cmd, &mut client).await,
                        Command::Log(cmd) => logs::main(cmd, &mut client).await,
                        Command::Cat(cmd) => cat::main(cmd, &mut client, addr).await,
                        Command::Discover(_) | Command::Reboot => unreachable!(),
                    };
                    if let Err(error) = client.logout().await {
                        warn!("logout failed: {}", error);
                    }
                    result
                }
            }
        }
    }
}
