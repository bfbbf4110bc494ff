//! Playback and download messages.
//!
//! Downloads use the same claim/data pairing as monitoring: a
//! [`PlaybackClaim`] on a secondary connection, then a [`DoPlayback`] on the
//! control connection.

use super::convert::{fixed_member, DvrTime};
use super::message::{Claim, Message, Reply, Request, Session};
use super::model::*;
use super::monitor::TcpTransport;
use super::status::Status;
use serde::{Deserialize, Serialize};

/// What to do with a playback stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackAction {
    /// Nominate this connection as the stream recipient.
    Claim,
    /// Start playing.
    Start,
    /// Pause playback.
    Pause,
    /// Play faster.
    Fast,
    /// Play slower.
    Slow,
    /// Stop playing.
    Stop,
    /// Start downloading the named file.
    DownloadStart,
    /// Stop the download.
    DownloadStop,
}

/// Which recording to play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaybackParams {
    /// Path of the file on the device, as reported by a file search.
    #[serde(rename = "FileName")]
    pub name: String,
    /// Transport selector.
    #[serde(rename = "TransMode")]
    pub transport: TcpTransport,
}

/// A playback command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Playback {
    /// What to do.
    #[serde(rename = "Action")]
    pub action: PlaybackAction,
    /// On which file.
    #[serde(rename = "Parameter")]
    pub params: PlaybackParams,
    /// Start of the played interval.
    #[serde(rename = "StartTime")]
    pub start: DvrTime,
    /// End of the played interval.
    #[serde(rename = "EndTime")]
    pub end: DvrTime,
}

fixed_member!(
    /// The `OPPlayBack` command discriminator.
    PlaybackName,
    "OPPlayBack"
);

/// Starts, stops or adjusts playback on the control connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DoPlayback {
    /// Command discriminator.
    #[serde(rename = "Name")]
    pub command: PlaybackName,
    /// Current session.
    #[serde(rename = "SessionID")]
    pub session: Session,
    /// The playback command.
    #[serde(rename = "OPPlayBack")]
    pub playback: Playback,
}

impl Message for DoPlayback {
    const TYPE: u16 = MSG_ID_PLAYBACK;
}

impl Request for DoPlayback {
    type Reply = DoPlaybackReply;
}

/// Acknowledgement of a [`DoPlayback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DoPlaybackReply {
    /// Result code.
    #[serde(rename = "Ret")]
    pub status: Status,
    /// Command discriminator echoed back.
    #[serde(rename = "Name")]
    pub command: PlaybackName,
    /// Current session.
    #[serde(rename = "SessionID")]
    pub session: Session,
}

impl Message for DoPlaybackReply {
    const TYPE: u16 = MSG_ID_PLAYBACK_REPLY;
}

impl Reply for DoPlaybackReply {
    fn status(&self) -> Status {
        self.status
    }
}

/// Nominates the connection it is sent on as the stream recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaybackClaim {
    /// Command discriminator.
    #[serde(rename = "Name")]
    pub command: PlaybackName,
    /// Current session.
    #[serde(rename = "SessionID")]
    pub session: Session,
    /// The playback command, mirroring the paired [`DoPlayback`].
    #[serde(rename = "OPPlayBack")]
    pub playback: Playback,
}

impl Message for PlaybackClaim {
    const TYPE: u16 = MSG_ID_PLAYBACK_CLAIM;
}

impl Request for PlaybackClaim {
    type Reply = PlaybackClaimReply;
}

impl Claim for PlaybackClaim {
    const DATA: u16 = MSG_ID_PLAYBACK_DATA;
}

/// Acknowledgement of a [`PlaybackClaim`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaybackClaimReply {
    /// Result code.
    #[serde(rename = "Ret")]
    pub status: Status,
    /// Command discriminator echoed back.
    #[serde(rename = "Name")]
    pub command: PlaybackName,
    /// Current session.
    #[serde(rename = "SessionID")]
    pub session: Session,
}

impl Message for PlaybackClaimReply {
    const TYPE: u16 = MSG_ID_PLAYBACK_CLAIM_REPLY;
}

impl Reply for PlaybackClaimReply {
    fn status(&self) -> Status {
        self.status
    }
}
