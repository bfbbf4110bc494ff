use anyhow::{Context, Result};
use clap::Parser;
use dvrip_core::client::DvripClient;
use time::{format_description::FormatItem, macros::format_description, PrimitiveDateTime};

pub(crate) const TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

pub(crate) fn parse_time(text: &str) -> Result<PrimitiveDateTime> {
    PrimitiveDateTime::parse(text, TIME_FORMAT)
        .with_context(|| format!("{:?} is not a YYYY-MM-DD hh:mm:ss time", text))
}

/// Print the device clock, or set it.
#[derive(Parser, Debug)]
pub struct Opt {
    /// New clock value as `YYYY-MM-DD hh:mm:ss`; prints the current one
    /// when left out
    pub set: Option<String>,
}

pub async fn main(opt: Opt, client: &mut DvripClient) -> Result<()> {
    match client.time().await? {
        Some(now) => println!("{}", now.format(TIME_FORMAT)?),
        None => println!("-"),
    }
    if let Some(text) = opt.set {
        client.set_time(parse_time(&text)?).await?;
    }
    Ok(())
}
