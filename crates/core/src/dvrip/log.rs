//! Device log query messages.

use super::convert::{fixed_member, DvrTime};
use super::message::{Message, Reply, Request, Session};
use super::model::*;
use super::status::Status;
use serde::{Deserialize, Serialize};

/// The kinds of events the device logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// The device rebooted.
    Reboot,
    /// The device was shut down.
    #[serde(rename = "ShutDown")]
    Shutdown,
    /// A user signed in.
    #[serde(rename = "LogIn")]
    Login,
    /// A user signed out.
    #[serde(rename = "LogOut")]
    Logout,
    /// An alarm event began.
    EventStart,
    /// An alarm event ended.
    #[serde(rename = "EventStop")]
    EventEnd,
    /// The clock was set.
    SetTime,
    /// The device saved its running state.
    #[serde(rename = "SaveSystemState")]
    SaveState,
    /// The configuration was saved.
    SaveConfig,
}

fixed_member!(
    /// The only user the log ever names.
    SystemUser,
    "System"
);

/// One log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogEntry {
    /// Position in the log; pagination resumes after the last one seen.
    #[serde(rename = "Position")]
    pub number: u32,
    /// When it happened.
    #[serde(rename = "Time")]
    pub time: DvrTime,
    /// What happened.
    #[serde(rename = "Type")]
    pub kind: EntryKind,
    /// Who did it.
    #[serde(rename = "User")]
    pub user: SystemUser,
    /// Free form detail.
    #[serde(rename = "Data")]
    pub data: String,
}

fixed_member!(
    /// The `OPLogQuery` command discriminator.
    LogQueryName,
    "OPLogQuery"
);

fixed_member!(
    /// The only log category selector devices accept.
    AllLogs,
    "LogAll"
);

/// Log search parameters for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogQuery {
    /// Start of the searched interval.
    #[serde(rename = "BeginTime")]
    pub start: DvrTime,
    /// End of the searched interval.
    #[serde(rename = "EndTime")]
    pub end: DvrTime,
    /// Position to resume from.
    #[serde(rename = "LogPosition")]
    pub offset: u32,
    /// Category selector.
    #[serde(rename = "Type")]
    pub kind: AllLogs,
}

/// One page of a log query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetLog {
    /// Current session.
    #[serde(rename = "SessionID")]
    pub session: Session,
    /// Command discriminator.
    #[serde(rename = "Name")]
    pub command: LogQueryName,
    /// Search parameters.
    #[serde(rename = "OPLogQuery")]
    pub query: LogQuery,
}

impl Message for GetLog {
    const TYPE: u16 = MSG_ID_GET_LOG;
}

impl Request for GetLog {
    type Reply = GetLogReply;
}

/// One page of log entries; the member is null once the log is exhausted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetLogReply {
    /// Result code.
    #[serde(rename = "Ret")]
    pub status: Status,
    /// Current session.
    #[serde(rename = "SessionID")]
    pub session: Session,
    /// Command discriminator echoed back.
    #[serde(rename = "Name")]
    pub command: LogQueryName,
    /// The page of entries, or null at the end of the log.
    #[serde(rename = "OPLogQuery")]
    pub entries: Option<Vec<LogEntry>>,
}

impl Message for GetLogReply {
    const TYPE: u16 = MSG_ID_GET_LOG_REPLY;
}

impl Reply for GetLogReply {
    fn status(&self) -> Status {
        self.status
    }
}
