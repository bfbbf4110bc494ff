//! Device information queries.

use super::convert::{HexInt, Maybe, Version};
use super::message::{Message, Reply, Request, Session};
use super::model::*;
use super::status::Status;
use serde::{Deserialize, Serialize};

/// Categories of device information that can be queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Info {
    /// The general system description block.
    #[serde(rename = "SystemInfo")]
    System,
}

/// The `SystemInfo` block.
///
/// The misspelled `Updata*` keys are the vendor's, not ours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemInfo {
    /// Alarm trigger inputs.
    #[serde(rename = "AlarmInChannel")]
    pub trigger_in: u32,
    /// Alarm trigger outputs.
    #[serde(rename = "AlarmOutChannel")]
    pub trigger_out: u32,
    /// Firmware build time.
    #[serde(rename = "BuildTime")]
    pub build: String,
    /// Encryption support version.
    #[serde(rename = "EncryptVersion")]
    pub crypto_version: Version,
    /// Hardware revision.
    #[serde(rename = "HardWareVersion")]
    pub hardware_version: Version,
    /// Serial number.
    #[serde(rename = "SerialNo")]
    pub serial: String,
    /// Firmware revision.
    #[serde(rename = "SoftWareVersion")]
    pub software_version: Version,
    /// Intercom inputs.
    #[serde(rename = "TalkInChannel")]
    pub talk_in: u32,
    /// Intercom outputs.
    #[serde(rename = "TalkOutChannel")]
    pub talk_out: u32,
    /// Video inputs.
    #[serde(rename = "VideoInChannel")]
    pub video_in: u32,
    /// Video outputs.
    #[serde(rename = "VideoOutChannel")]
    pub video_out: u32,
    /// Extra view channels.
    #[serde(rename = "ExtraChannel")]
    pub views: u32,
    /// Audio inputs.
    #[serde(rename = "AudioInChannel")]
    pub audio_in: u32,
    /// Uptime in minutes.
    #[serde(rename = "DeviceRunTime")]
    pub uptime: HexInt,
    #[serde(
        rename = "DigChannel",
        default,
        skip_serializing_if = "Maybe::is_absent"
    )]
    #[allow(missing_docs)]
    pub digital_in: Maybe<u32>,
    #[serde(
        rename = "UpdataTime",
        default,
        skip_serializing_if = "Maybe::is_absent"
    )]
    #[allow(missing_docs)]
    pub updata_time: Maybe<String>,
    /// Hardware model name.
    #[serde(rename = "HardWare", default, skip_serializing_if = "Maybe::is_absent")]
    pub hardware: Maybe<String>,
    #[serde(
        rename = "CombineSwitch",
        default,
        skip_serializing_if = "Maybe::is_absent"
    )]
    #[allow(missing_docs)]
    pub combine: Maybe<u32>,
    #[serde(
        rename = "UpdataType",
        default,
        skip_serializing_if = "Maybe::is_absent"
    )]
    #[allow(missing_docs)]
    pub updata_type: Maybe<HexInt>,
    /// Chassis type. Not on the wire here; backfilled from the login reply.
    #[serde(skip)]
    pub chassis: Option<String>,
}

/// Information query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetInfo {
    /// Which information block to fetch.
    #[serde(rename = "Name")]
    pub category: Info,
    /// Current session.
    #[serde(rename = "SessionID")]
    pub session: Session,
}

impl Message for GetInfo {
    const TYPE: u16 = MSG_ID_GET_INFO;
}

impl Request for GetInfo {
    type Reply = GetInfoReply;
}

/// Information reply; carries the block matching the queried category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetInfoReply {
    /// Result code.
    #[serde(rename = "Ret")]
    pub status: Status,
    /// Queried category echoed back.
    #[serde(rename = "Name")]
    pub category: Info,
    /// Current session.
    #[serde(rename = "SessionID")]
    pub session: Session,
    /// The system block, when `SystemInfo` was asked for.
    #[serde(
        rename = "SystemInfo",
        default,
        skip_serializing_if = "Maybe::is_absent"
    )]
    pub system: Maybe<SystemInfo>,
}

impl Message for GetInfoReply {
    const TYPE: u16 = MSG_ID_GET_INFO_REPLY;
}

impl Reply for GetInfoReply {
    fn status(&self) -> Status {
        self.status
    }
}
