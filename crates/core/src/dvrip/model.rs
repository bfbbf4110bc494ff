use bytes::Bytes;

pub(super) const MAGIC: u8 = 0xFF;
pub(super) const VERSION: u8 = 0x01;

/// Size of the fixed packet header in bytes.
pub const HEADER_LEN: usize = 20;
/// Largest payload one packet may carry.
pub const MAX_PAYLOAD: usize = 16384;

/// Login requests have this type
pub const MSG_ID_LOGIN: u16 = 1000;
/// Login replies have this type
pub const MSG_ID_LOGIN_REPLY: u16 = 1001;
/// Logout requests have this type
pub const MSG_ID_LOGOUT: u16 = 1002;
/// Logout replies have this type
pub const MSG_ID_LOGOUT_REPLY: u16 = 1003;
/// Keep alive requests have this type
pub const MSG_ID_KEEPALIVE: u16 = 1006;
/// Keep alive replies have this type
pub const MSG_ID_KEEPALIVE_REPLY: u16 = 1007;
/// Device information requests have this type
pub const MSG_ID_GET_INFO: u16 = 1020;
/// Device information replies have this type
pub const MSG_ID_GET_INFO_REPLY: u16 = 1021;
/// PTZ control requests have this type
pub const MSG_ID_PTZ: u16 = 1400;
/// PTZ control replies have this type
pub const MSG_ID_PTZ_REPLY: u16 = 1401;
/// Monitor (live view) requests have this type
pub const MSG_ID_MONITOR: u16 = 1410;
/// Monitor replies have this type
pub const MSG_ID_MONITOR_REPLY: u16 = 1411;
/// Monitor stream data packets have this type
pub const MSG_ID_MONITOR_DATA: u16 = 1412;
/// Monitor claims (on the data connection) have this type
pub const MSG_ID_MONITOR_CLAIM: u16 = 1413;
/// Monitor claim replies have this type
pub const MSG_ID_MONITOR_CLAIM_REPLY: u16 = 1414;
/// Playback requests have this type
pub const MSG_ID_PLAYBACK: u16 = 1420;
/// Playback replies have this type
pub const MSG_ID_PLAYBACK_REPLY: u16 = 1421;
/// Playback claims (on the data connection) have this type
pub const MSG_ID_PLAYBACK_CLAIM: u16 = 1424;
/// Playback claim replies have this type
pub const MSG_ID_PLAYBACK_CLAIM_REPLY: u16 = 1425;
/// Playback stream data packets have this type
pub const MSG_ID_PLAYBACK_DATA: u16 = 1426;
/// File search requests have this type
pub const MSG_ID_GET_FILES: u16 = 1440;
/// File search replies have this type
pub const MSG_ID_GET_FILES_REPLY: u16 = 1441;
/// Log query requests have this type
pub const MSG_ID_GET_LOG: u16 = 1442;
/// Log query replies have this type
pub const MSG_ID_GET_LOG_REPLY: u16 = 1443;
/// Maintenance operation requests have this type
pub const MSG_ID_OPERATION: u16 = 1450;
/// Maintenance operation replies have this type
pub const MSG_ID_OPERATION_REPLY: u16 = 1451;
/// Clock queries have this type
pub const MSG_ID_GET_TIME: u16 = 1452;
/// Clock query replies have this type
pub const MSG_ID_GET_TIME_REPLY: u16 = 1453;
/// Discovery probes have this type
pub const MSG_ID_DISCOVER: u16 = 1530;
/// Discovery announcements have this type
pub const MSG_ID_DISCOVER_REPLY: u16 = 1531;

/// One framed DVRIP unit: a fixed 20 byte header followed by at most
/// [`MAX_PAYLOAD`] bytes of payload.
///
/// Two header bytes change meaning with the packet's role. On control
/// packets (JSON requests and replies) they are the fragment count and the
/// fragment index; on stream data packets they are the channel and the
/// end-of-stream flag. The [`Packet::control`] and [`Packet::stream`]
/// constructors and the paired accessors keep the two readings apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// Session id echoed in every packet after login.
    pub session: u32,
    /// Request scoped sequence number.
    pub number: u32,
    fragment0: u8,
    fragment1: u8,
    /// Wire message type.
    pub ty: u16,
    /// A JSON document (or a fragment of one), or raw stream bytes.
    pub payload: Bytes,
}

impl Packet {
    /// A control packet carrying (a fragment of) a JSON document.
    pub fn control(
        session: u32,
        number: u32,
        ty: u16,
        payload: Bytes,
        fragments: u8,
        fragment: u8,
    ) -> Packet {
        Packet {
            session,
            number,
            fragment0: fragments,
            fragment1: fragment,
            ty,
            payload,
        }
    }

    /// A stream data packet.
    pub fn stream(
        session: u32,
        number: u32,
        ty: u16,
        payload: Bytes,
        channel: u8,
        end: bool,
    ) -> Packet {
        Packet {
            session,
            number,
            fragment0: channel,
            fragment1: end as u8,
            ty,
            payload,
        }
    }

    pub(crate) fn from_wire(
        session: u32,
        number: u32,
        fragment0: u8,
        fragment1: u8,
        ty: u16,
        payload: Bytes,
    ) -> Packet {
        Packet {
            session,
            number,
            fragment0,
            fragment1,
            ty,
            payload,
        }
    }

    /// Total fragment count, 0 when the message fits in one packet
    /// (control reading).
    pub fn fragments(&self) -> u8 {
        self.fragment0
    }

    /// Zero based fragment index (control reading).
    pub fn fragment(&self) -> u8 {
        self.fragment1
    }

    /// Device assigned channel (stream reading).
    pub fn channel(&self) -> u8 {
        self.fragment0
    }

    /// Whether this is the final chunk of a stream (stream reading).
    pub fn end(&self) -> bool {
        self.fragment1 != 0
    }

    /// Payload length in bytes.
    pub fn length(&self) -> usize {
        self.payload.len()
    }

    /// On-wire size, header included.
    pub fn size(&self) -> usize {
        HEADER_LEN + self.payload.len()
    }

    pub(super) fn raw_fragments(&self) -> (u8, u8) {
        (self.fragment0, self.fragment1)
    }
}
