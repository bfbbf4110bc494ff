use crate::clock::parse_time;
use anyhow::Result;
use clap::Parser;
use dvrip_core::client::DvripClient;
use dvrip_core::dvrip::convert::{DvrTime, EPOCH};
use dvrip_core::dvrip::files::{FileKind, FileQuery};

/// Search the recorded file index.
#[derive(Parser, Debug)]
pub struct Opt {
    /// Channel to search
    #[arg(short, long)]
    pub channel: u32,
    /// Search for JPEG snapshots instead of video recordings
    #[arg(short, long)]
    pub images: bool,
    /// Start of the searched interval as `YYYY-MM-DD hh:mm:ss`
    #[arg(short, long)]
    pub start: Option<String>,
    /// End of the searched interval as `YYYY-MM-DD hh:mm:ss`
    #[arg(short, long)]
    pub end: Option<String>,
    /// Long listing: length and recording times along with the name
    #[arg(short, long)]
    pub long: bool,
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
    let kind = if opt.images {
        FileKind::Image
    } else {
        FileKind::Video
    };

    let files = client
        .files(FileQuery {
            start,
            end,
            channel: opt.channel,
            event: Default::default(),
            kind,
        })
        .await?;

    for file in files {
        if opt.long {
            println!(
                "{}K\t{}\t{}\t{}",
                file.length, file.start, file.end, file.name
            );
        } else {
            println!("{}", file.name);
        }
    }
    Ok(())
}
