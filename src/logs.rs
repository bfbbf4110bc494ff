use crate::clock::parse_time;
use anyhow::Result;
use clap::Parser;
use dvrip_core::client::DvripClient;
use dvrip_core::dvrip::convert::{DvrTime, EPOCH};
use dvrip_core::dvrip::log::LogQuery;

/// Print the device log.
#[derive(Parser, Debug)]
pub struct Opt {
    /// Start of the queried interval as `YYYY-MM-DD hh:mm:ss`
    #[arg(short, long)]
    pub start: Option<String>,
    /// End of the queried interval as `YYYY-MM-DD hh:mm:ss`
    #[arg(short, long)]
    pub end: Option<String>,
    /// First log position to fetch
    #[arg(short, long, default_value_t = 0)]
    pub offset: u32,
}

pub async fn main(opt: Opt, client: &mut DvripClient) -> Result<()> {
    let start = match &opt.start {
        Some(text) => DvrTime(Some(parse_time(text)?)),
        None => DvrTime(Some(EPOCH)),
    };
    let end = match &opt.end {
        Some(text) => DvrTime(Some(parse_time(text)?)),
        None => DvrTime(None),
    };

    let entries = client
        .log(LogQuery {
            start,
            end,
            offset: opt.offset,
            kind: Default::default(),
        })
        .await?;

    for entry in entries {
        println!(
            "{:>8}  {}  {:?}  {}",
            entry.number, entry.time, entry.kind, entry.data
        );
    }
    Ok(())
}
