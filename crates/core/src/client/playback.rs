use super::{DvripClient, Reader};
use crate::dvrip::convert::{DvrTime, EPOCH};
use crate::dvrip::playback::{
    DoPlayback, Playback, PlaybackAction, PlaybackClaim, PlaybackParams,
};
use crate::Result;
use time::macros::datetime;
use tokio::net::TcpStream;

impl DvripClient {
    /// Downloads the recorded file `name` (a path from a file search); the
    /// bytes arrive on `stream`, a second socket connected to the same
    /// device.
    pub async fn download(&mut self, stream: TcpStream, name: &str) -> Result<Reader> {
        let playback = Playback {
            action: PlaybackAction::DownloadStart,
            params: PlaybackParams {
                name: name.to_owned(),
                transport: Default::default(),
            },
            // The device slices by file name; the interval just has to
            // cover everything.
            start: DvrTime(Some(EPOCH)),
            end: DvrTime(Some(datetime!(9999-12-31 23:59:59))),
        };
        let claim = PlaybackClaim {
            command: Default::default(),
            session: self.session(),
            playback: playback.clone(),
        };
        let request = DoPlayback {
            command: Default::default(),
            session: self.session(),
            playback,
        };
        self.reader(stream, &claim, &request).await
    }
}
