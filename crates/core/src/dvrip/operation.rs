//! Maintenance operations and the device clock.

use super::convert::{fixed_member, DvrTime, Maybe};
use super::message::{Message, Reply, Request, Session};
use super::model::*;
use super::status::Status;
use serde::{Deserialize, Serialize};

/// Operation selector carried under `Name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// No operation; some replies use the empty name.
    #[serde(rename = "")]
    Unknown,
    /// Machine control (reboot).
    #[serde(rename = "OPMachine")]
    Machine,
    /// Log maintenance.
    #[serde(rename = "OPLogManager")]
    Log,
    /// Factory reset of selected configuration areas.
    #[serde(rename = "OPDefaultConfig")]
    Reset,
    /// Set the device clock.
    #[serde(rename = "OPTimeSetting")]
    SetTime,
}

/// Machine control actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Machine {
    /// Restart the device.
    Reboot,
}

/// The machine control block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MachineOperation {
    /// What to do.
    #[serde(rename = "Action")]
    pub action: Machine,
}

/// Log maintenance actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogAction {
    /// Wipe the log.
    #[serde(rename = "RemoveAll")]
    Clear,
}

/// The log maintenance block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogOperation {
    /// What to do.
    #[serde(rename = "Action")]
    pub action: LogAction,
}

/// Which configuration areas a factory reset should touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResetOperation {
    /// User accounts.
    #[serde(rename = "Account")]
    pub accounts: bool,
    /// Alarm triggers.
    #[serde(rename = "Alarm")]
    pub triggers: bool,
    /// PTZ wiring.
    #[serde(rename = "CommPtz")]
    pub ptz: bool,
    /// Encoder settings.
    #[serde(rename = "Encode")]
    pub encoding: bool,
    /// General settings.
    #[serde(rename = "General")]
    pub general: bool,
    /// Network settings.
    #[serde(rename = "NetCommon")]
    pub network: bool,
    /// Network service settings.
    #[serde(rename = "NetServer")]
    pub server: bool,
    /// Preview settings.
    #[serde(rename = "Preview")]
    pub preview: bool,
    /// Recording settings.
    #[serde(rename = "Record")]
    pub recording: bool,
}

/// Performs one maintenance operation; exactly one of the optional blocks
/// should match `command`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DoOperation {
    /// Which operation.
    #[serde(rename = "Name")]
    pub command: Operation,
    /// Current session.
    #[serde(rename = "SessionID")]
    pub session: Session,
    /// Machine control block.
    #[serde(
        rename = "OPMachine",
        default,
        skip_serializing_if = "Maybe::is_absent"
    )]
    pub machine: Maybe<MachineOperation>,
    /// Log maintenance block.
    #[serde(
        rename = "OPLogManager",
        default,
        skip_serializing_if = "Maybe::is_absent"
    )]
    pub log: Maybe<LogOperation>,
    /// Factory reset block.
    #[serde(
        rename = "OPDefaultConfig",
        default,
        skip_serializing_if = "Maybe::is_absent"
    )]
    pub reset: Maybe<ResetOperation>,
    /// New clock value.
    #[serde(
        rename = "OPTimeSetting",
        default,
        skip_serializing_if = "Maybe::is_absent"
    )]
    pub set_time: Maybe<DvrTime>,
}

impl DoOperation {
    /// An operation request with all blocks absent.
    pub fn new(command: Operation, session: Session) -> DoOperation {
        DoOperation {
            command,
            session,
            machine: Maybe::Absent,
            log: Maybe::Absent,
            reset: Maybe::Absent,
            set_time: Maybe::Absent,
        }
    }
}

impl Message for DoOperation {
    const TYPE: u16 = MSG_ID_OPERATION;
}

impl Request for DoOperation {
    type Reply = DoOperationReply;
}

/// Acknowledgement of a [`DoOperation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DoOperationReply {
    /// Result code.
    #[serde(rename = "Ret")]
    pub status: Status,
    /// Operation echoed back.
    #[serde(rename = "Name")]
    pub command: Operation,
    /// Current session.
    #[serde(rename = "SessionID")]
    pub session: Session,
}

impl Message for DoOperationReply {
    const TYPE: u16 = MSG_ID_OPERATION_REPLY;
}

impl Reply for DoOperationReply {
    fn status(&self) -> Status {
        self.status
    }
}

fixed_member!(
    /// The `OPTimeQuery` command discriminator.
    TimeQueryName,
    "OPTimeQuery"
);

/// Reads the device clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetTime {
    /// Command discriminator.
    #[serde(rename = "Name")]
    pub command: TimeQueryName,
    /// Current session.
    #[serde(rename = "SessionID")]
    pub session: Session,
}

impl Message for GetTime {
    const TYPE: u16 = MSG_ID_GET_TIME;
}

impl Request for GetTime {
    type Reply = GetTimeReply;
}

/// The device clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetTimeReply {
    /// Result code.
    #[serde(rename = "Ret")]
    pub status: Status,
    /// Command discriminator echoed back.
    #[serde(rename = "Name")]
    pub command: TimeQueryName,
    /// Current session.
    #[serde(rename = "SessionID")]
    pub session: Session,
    /// The clock reading.
    #[serde(rename = "OPTimeQuery")]
    pub time: DvrTime,
}

impl Message for GetTimeReply {
    const TYPE: u16 = MSG_ID_GET_TIME_REPLY;
}

impl Reply for GetTimeReply {
    fn status(&self) -> Status {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reboot_wire_form() {
        let mut request = DoOperation::new(Operation::Machine, Session(0x57));
        request.machine = Maybe::Present(MachineOperation {
            action: Machine::Reboot,
        });
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            serde_json::json!({
                "Name": "OPMachine",
                "SessionID": "0x00000057",
                "OPMachine": { "Action": "Reboot" },
            })
        );
    }

    #[test]
    fn test_time_reply() {
        let json = serde_json::json!({
            "Ret": 100,
            "Name": "OPTimeQuery",
            "SessionID": "0x00000057",
            "OPTimeQuery": "2019-07-30 21:24:16",
        });
        let reply: GetTimeReply = serde_json::from_value(json).unwrap();
        assert!(reply.time.0.is_some());
    }
}
