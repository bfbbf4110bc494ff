//! Recorded file search messages.

use super::convert::{fixed_member, DvrTime, HexInt, Maybe};
use super::message::{Message, Reply, Request, Session};
use super::model::*;
use super::status::Status;
use serde::{Deserialize, Serialize};

/// One entry of the recorded file index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct File {
    /// Path of the file on the device.
    #[serde(rename = "FileName")]
    pub name: String,
    /// Disk holding the file.
    #[serde(rename = "DiskNo")]
    pub disk: u32,
    /// Partition holding the file.
    #[serde(rename = "SerialNo")]
    pub part: u32,
    /// Length in KiB.
    #[serde(rename = "FileLength")]
    pub length: HexInt,
    /// First recorded instant.
    #[serde(rename = "BeginTime")]
    pub start: DvrTime,
    /// Last recorded instant.
    #[serde(rename = "EndTime")]
    pub end: DvrTime,
}

/// What kind of recording to search for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileKind {
    /// H.264 video recordings.
    #[serde(rename = "h264")]
    Video,
    /// JPEG snapshots.
    #[serde(rename = "jpg")]
    Image,
}

fixed_member!(
    /// The wildcard event selector.
    AnyEvent,
    "*"
);

/// Search parameters for one page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileQuery {
    /// Start of the searched interval; pagination advances this.
    #[serde(rename = "BeginTime")]
    pub start: DvrTime,
    /// End of the searched interval.
    #[serde(rename = "EndTime")]
    pub end: DvrTime,
    /// Channel to search.
    #[serde(rename = "Channel")]
    pub channel: u32,
    /// Event selector; devices only honour the wildcard.
    #[serde(rename = "Event")]
    pub event: AnyEvent,
    /// Kind of recording.
    #[serde(rename = "Type")]
    pub kind: FileKind,
}

fixed_member!(
    /// The `OPFileQuery` command discriminator.
    FileQueryName,
    "OPFileQuery"
);

/// One page of a file search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetFiles {
    /// Command discriminator.
    #[serde(rename = "Name")]
    pub command: FileQueryName,
    /// Current session.
    #[serde(rename = "SessionID")]
    pub session: Session,
    /// Search parameters.
    #[serde(rename = "OPFileQuery")]
    pub query: FileQuery,
}

impl Message for GetFiles {
    const TYPE: u16 = MSG_ID_GET_FILES;
}

impl Request for GetFiles {
    type Reply = GetFilesReply;
}

/// One page of search results.
///
/// `status` distinguishes a partial page (more to fetch) from the final one;
/// consecutive pages overlap by one echoed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetFilesReply {
    /// Result code; one of the search completeness codes on success.
    #[serde(rename = "Ret")]
    pub status: Status,
    /// Command discriminator echoed back.
    #[serde(rename = "Name")]
    pub command: String,
    /// Current session.
    #[serde(rename = "SessionID")]
    pub session: Session,
    /// The page of entries; missing when the search came up empty.
    #[serde(
        rename = "OPFileQuery",
        default,
        skip_serializing_if = "Maybe::is_absent"
    )]
    pub files: Maybe<Vec<File>>,
}

impl Message for GetFilesReply {
    const TYPE: u16 = MSG_ID_GET_FILES_REPLY;
}

impl Reply for GetFilesReply {
    fn status(&self) -> Status {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dvrip::convert::EPOCH;

    #[test]
    fn test_query_wire_form() {
        let query = FileQuery {
            start: DvrTime(Some(EPOCH)),
            end: DvrTime(None),
            channel: 0,
            event: AnyEvent,
            kind: FileKind::Video,
        };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "BeginTime": "2000-00-00 00:00:00",
                "EndTime": "0000-00-00 00:00:00",
                "Channel": 0,
                "Event": "*",
                "Type": "h264",
            })
        );
    }

    #[test]
    fn test_reply_without_results() {
        let json = serde_json::json!({
            "Name": "OPFileQuery",
            "Ret": 119,
            "SessionID": "0x00000057",
        });
        let reply: GetFilesReply = serde_json::from_value(json).unwrap();
        assert_eq!(reply.status, Status::SearchNone);
        assert!(reply.status.success());
        assert_eq!(reply.files, Maybe::Absent);
    }
}
