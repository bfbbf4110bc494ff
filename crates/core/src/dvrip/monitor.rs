//! Live monitoring messages.
//!
//! Monitoring is a paired exchange: a [`MonitorClaim`] on a secondary
//! connection nominates it as the stream recipient, then a [`DoMonitor`] on
//! the control connection starts the data flowing.

use super::convert::fixed_member;
use super::message::{Claim, Message, Reply, Request, Session};
use super::model::*;
use super::status::Status;
use serde::{Deserialize, Serialize};

/// What to do with a monitor stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonitorAction {
    /// Nominate this connection as the stream recipient.
    Claim,
    /// Start streaming.
    Start,
    /// Stop streaming.
    Stop,
}

/// Stream quality selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamKind {
    /// The full resolution stream.
    #[serde(rename = "Main")]
    Hd,
    /// The reduced bandwidth stream.
    #[serde(rename = "Extra")]
    Sd,
}

fixed_member!(
    /// The only transport devices offer.
    TcpTransport,
    "TCP"
);

/// Which stream to monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorParams {
    /// Camera channel.
    #[serde(rename = "Channel")]
    pub channel: u32,
    /// Stream quality.
    #[serde(rename = "StreamType")]
    pub stream: StreamKind,
    /// Transport selector.
    #[serde(rename = "TransMode")]
    pub transport: TcpTransport,
}

/// A monitor command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Monitor {
    /// What to do.
    #[serde(rename = "Action")]
    pub action: MonitorAction,
    /// On which stream.
    #[serde(rename = "Parameter")]
    pub params: MonitorParams,
}

fixed_member!(
    /// The `OPMonitor` command discriminator.
    MonitorName,
    "OPMonitor"
);

/// Starts or stops monitoring on the control connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DoMonitor {
    /// Current session.
    #[serde(rename = "SessionID")]
    pub session: Session,
    /// Command discriminator.
    #[serde(rename = "Name")]
    pub command: MonitorName,
    /// The monitor command.
    #[serde(rename = "OPMonitor")]
    pub monitor: Monitor,
}

impl Message for DoMonitor {
    const TYPE: u16 = MSG_ID_MONITOR;
}

impl Request for DoMonitor {
    type Reply = DoMonitorReply;
}

/// Acknowledgement of a [`DoMonitor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DoMonitorReply {
    /// Result code.
    #[serde(rename = "Ret")]
    pub status: Status,
    /// Current session.
    #[serde(rename = "SessionID")]
    pub session: Session,
    /// Command discriminator echoed back.
    #[serde(rename = "Name")]
    pub command: MonitorName,
}

impl Message for DoMonitorReply {
    const TYPE: u16 = MSG_ID_MONITOR_REPLY;
}

impl Reply for DoMonitorReply {
    fn status(&self) -> Status {
        self.status
    }
}

/// Nominates the connection it is sent on as the stream recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorClaim {
    /// Current session.
    #[serde(rename = "SessionID")]
    pub session: Session,
    /// Command discriminator.
    #[serde(rename = "Name")]
    pub command: MonitorName,
    /// The monitor command, mirroring the paired [`DoMonitor`].
    #[serde(rename = "OPMonitor")]
    pub monitor: Monitor,
}

impl Message for MonitorClaim {
    const TYPE: u16 = MSG_ID_MONITOR_CLAIM;
}

impl Request for MonitorClaim {
    type Reply = MonitorClaimReply;
}

impl Claim for MonitorClaim {
    const DATA: u16 = MSG_ID_MONITOR_DATA;
}

/// Acknowledgement of a [`MonitorClaim`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorClaimReply {
    /// Result code.
    #[serde(rename = "Ret")]
    pub status: Status,
    /// Current session.
    #[serde(rename = "SessionID")]
    pub session: Session,
    /// Command discriminator echoed back.
    #[serde(rename = "Name")]
    pub command: MonitorName,
}

impl Message for MonitorClaimReply {
    const TYPE: u16 = MSG_ID_MONITOR_CLAIM_REPLY;
}

impl Reply for MonitorClaimReply {
    fn status(&self) -> Status {
        self.status
    }
}
