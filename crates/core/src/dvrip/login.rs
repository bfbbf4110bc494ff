//! Session management messages: login, logout and keep alive.

use super::convert::fixed_member;
use super::message::{Message, Reply, Request, Session};
use super::model::*;
use super::status::Status;
use serde::{Deserialize, Serialize};

const MD5_ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// The eight character password fingerprint DVRIP devices expect.
///
/// Adjacent bytes of the password's MD5 are summed modulo 62 and used to
/// index the alphabet `0-9A-Za-z`. This is an opaque credential encoding,
/// not a cryptographic proof of anything.
pub fn xmmd5(password: &str) -> String {
    let digest = md5::compute(password.as_bytes());
    digest
        .0
        .chunks(2)
        .map(|pair| MD5_ALPHABET[(usize::from(pair[0]) + usize::from(pair[1])) % 62] as char)
        .take(8)
        .collect()
}

/// Hash functions the login request can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hash {
    /// The MD5 based fingerprint, the only function devices use.
    #[serde(rename = "MD5")]
    XmMd5,
}

impl Hash {
    /// Hashes `password` for the wire.
    pub fn digest(self, password: &str) -> String {
        match self {
            Hash::XmMd5 => xmmd5(password),
        }
    }
}

/// Authentication request, sent under session 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientLogin {
    /// Account name.
    #[serde(rename = "UserName")]
    pub username: String,
    /// Password fingerprint, normally [`xmmd5`] of the password.
    #[serde(rename = "PassWord")]
    pub passhash: String,
    /// How `passhash` was derived.
    #[serde(rename = "EncryptType")]
    pub hash: Hash,
    /// Client service name, `DVRIP-Web` in practice.
    #[serde(rename = "LoginType")]
    pub service: String,
}

impl Message for ClientLogin {
    const TYPE: u16 = MSG_ID_LOGIN;
}

impl Request for ClientLogin {
    type Reply = ClientLoginReply;
}

/// The login reply, carrying the assigned session and connection limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientLoginReply {
    /// Result code.
    #[serde(rename = "Ret")]
    pub status: Status,
    /// The session the server assigned; echoed in all later requests.
    #[serde(rename = "SessionID")]
    pub session: Session,
    /// Keep alive interval in seconds.
    #[serde(rename = "AliveInterval")]
    pub timeout: u32,
    /// Number of camera channels.
    #[serde(rename = "ChannelNum")]
    pub channels: u32,
    /// Number of extra view channels.
    #[serde(rename = "ExtraChannel")]
    pub views: u32,
    /// Chassis type, e.g. `HVR`. The key really does end in a space.
    #[serde(rename = "DeviceType ")]
    pub chassis: String,
    /// Whether the device would like AES payload encryption.
    #[serde(rename = "DataUseAES", default)]
    pub encrypt: bool,
}

impl Message for ClientLoginReply {
    const TYPE: u16 = MSG_ID_LOGIN_REPLY;
}

impl Reply for ClientLoginReply {
    fn status(&self) -> Status {
        self.status
    }
}

/// Sign-off request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientLogout {
    /// Account name used at login.
    #[serde(rename = "Name")]
    pub username: String,
    /// Current session.
    #[serde(rename = "SessionID")]
    pub session: Session,
}

impl Message for ClientLogout {
    const TYPE: u16 = MSG_ID_LOGOUT;
}

impl Request for ClientLogout {
    type Reply = ClientLogoutReply;
}

/// Sign-off acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientLogoutReply {
    /// Result code.
    #[serde(rename = "Ret")]
    pub status: Status,
    /// Account name echoed back.
    #[serde(rename = "Name")]
    pub username: String,
    /// The session that was closed.
    #[serde(rename = "SessionID")]
    pub session: Session,
}

impl Message for ClientLogoutReply {
    const TYPE: u16 = MSG_ID_LOGOUT_REPLY;
}

impl Reply for ClientLogoutReply {
    fn status(&self) -> Status {
        self.status
    }
}

fixed_member!(
    /// The `KeepAlive` command discriminator.
    KeepAliveName,
    "KeepAlive"
);

/// Periodic liveness request; the server forgets the session when these
/// stop arriving within the advertised interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeepAlive {
    /// Command discriminator.
    #[serde(rename = "Name")]
    pub command: KeepAliveName,
    /// Current session.
    #[serde(rename = "SessionID")]
    pub session: Session,
}

impl Message for KeepAlive {
    const TYPE: u16 = MSG_ID_KEEPALIVE;
}

impl Request for KeepAlive {
    type Reply = KeepAliveReply;
}

/// Liveness acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeepAliveReply {
    /// Result code.
    #[serde(rename = "Ret")]
    pub status: Status,
    /// Command discriminator echoed back.
    #[serde(rename = "Name")]
    pub command: KeepAliveName,
    /// Current session.
    #[serde(rename = "SessionID")]
    pub session: Session,
}

impl Message for KeepAliveReply {
    const TYPE: u16 = MSG_ID_KEEPALIVE_REPLY;
}

impl Reply for KeepAliveReply {
    fn status(&self) -> Status {
        self.status
    }
}
