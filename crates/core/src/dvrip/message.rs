//! The typed message model.
//!
//! Every request, reply and stream control command is a plain struct with
//! `serde` derives; [`Message`] adds the wire type constant and the
//! packet (dis)assembly shared by all of them. [`Request`] names the reply
//! a request is answered with, and [`Claim`] additionally names the wire
//! type of the stream data packets that follow on a claimed connection.

use super::convert::{hex_for_json, json_to_hex};
use super::model::{Packet, MAX_PAYLOAD};
use super::status::Status;
use crate::{DecodeError, Result};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A session identity, assigned by the device at login and echoed in every
/// subsequent packet header and JSON body until logout.
///
/// On the wire it is the string `0x` followed by exactly eight upper case
/// hex digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Session(pub u32);

impl Session {
    /// The pre-login session.
    pub const NONE: Session = Session(0);
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

impl Serialize for Session {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex_for_json(self.0))
    }
}

impl<'de> Deserialize<'de> for Session {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Session, D::Error> {
        let datum = String::deserialize(deserializer)?;
        json_to_hex(&datum)
            .map(Session)
            .map_err(|_| D::Error::custom("not a session ID"))
    }
}

/// A typed DVRIP message: one JSON document travelling under a fixed wire
/// type, split over several packets when it outgrows [`MAX_PAYLOAD`].
pub trait Message: Serialize + DeserializeOwned {
    /// The wire message type used for this direction.
    const TYPE: u16;

    /// The serialized JSON document, split into payload sized chunks.
    fn chunks(&self) -> Result<Vec<Bytes>> {
        let json = serde_json::to_vec(self).map_err(DecodeError::from)?;
        Ok(json.chunks(MAX_PAYLOAD).map(Bytes::copy_from_slice).collect())
    }

    /// Frames the message for the wire under the given session and request
    /// number. A message that fits in one packet goes out with a fragment
    /// count of zero.
    fn to_packets(&self, session: Session, number: u32) -> Result<Vec<Packet>> {
        let chunks = self.chunks()?;
        assert!(!chunks.is_empty() && chunks.len() <= usize::from(u8::MAX));
        let total = if chunks.len() > 1 { chunks.len() as u8 } else { 0 };
        Ok(chunks
            .into_iter()
            .enumerate()
            .map(|(index, chunk)| {
                Packet::control(session.0, number, Self::TYPE, chunk, total, index as u8)
            })
            .collect())
    }

    /// Reassembles the message from payload chunks in fragment order.
    ///
    /// Devices terminate the JSON with a stray `\x00` or `\\` now and then;
    /// both are stripped from the tail before parsing.
    fn from_chunks<I>(chunks: I) -> Result<Self>
    where
        I: IntoIterator<Item = Bytes>,
    {
        let mut data = Vec::new();
        for chunk in chunks {
            data.extend_from_slice(&chunk);
        }
        if data.is_empty() {
            return Err(DecodeError::EmptyMessage.into());
        }
        while let Some(&byte) = data.last() {
            if byte == 0 || byte == b'\\' {
                data.pop();
            } else {
                break;
            }
        }
        serde_json::from_slice(&data).map_err(|e| DecodeError::Json(e).into())
    }

    /// Reassembles the message from its packets, skipping empty payloads.
    fn from_packets(packets: &[Packet]) -> Result<Self> {
        Self::from_chunks(
            packets
                .iter()
                .filter(|p| !p.payload.is_empty())
                .map(|p| p.payload.clone()),
        )
    }
}

/// A reply message; every reply carries a [`Status`] under the key `Ret`.
pub trait Reply: Message {
    /// The device's result code for the transaction.
    fn status(&self) -> Status;
}

/// A request names the reply type the device answers it with.
pub trait Request: Message {
    /// The expected reply.
    type Reply: Reply;
}

/// A claim nominates a secondary connection as the recipient of a data
/// stream.
pub trait Claim: Request {
    /// The wire type of the stream data packets that follow the claim's
    /// reply.
    const DATA: u16;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Probe {
        #[serde(rename = "Name")]
        name: String,
    }

    impl Message for Probe {
        const TYPE: u16 = 0x5757;
    }

    #[test]
    fn test_session_json() {
        let json = serde_json::json!("0x00000057");
        let session: Session = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(session, Session(0x57));
        assert_eq!(serde_json::to_value(session).unwrap(), json);
        assert_eq!(session.to_string(), "0x00000057");
    }

    #[test]
    fn test_single_packet() {
        let probe = Probe {
            name: "x".to_owned(),
        };
        let packets = probe.to_packets(Session(0x57), 4).unwrap();
        assert_eq!(packets.len(), 1);
        assert_eq!(packets[0].session, 0x57);
        assert_eq!(packets[0].number, 4);
        assert_eq!(packets[0].ty, 0x5757);
        assert_eq!(packets[0].fragments(), 0);
        assert_eq!(packets[0].fragment(), 0);
        assert_eq!(&packets[0].payload[..], br#"{"Name":"x"}"#);
    }

    #[test]
    fn test_fragmentation() {
        let probe = Probe {
            name: "n".repeat(2 * MAX_PAYLOAD),
        };
        let packets = probe.to_packets(Session::NONE, 0).unwrap();
        assert!(packets.len() > 1);
        for (index, packet) in packets.iter().enumerate() {
            assert_eq!(packet.fragments() as usize, packets.len());
            assert_eq!(packet.fragment() as usize, index);
            assert!(packet.length() <= MAX_PAYLOAD);
        }
        let back = Probe::from_packets(&packets).unwrap();
        assert_eq!(back, probe);
    }

    #[test]
    fn test_trailing_junk_stripped() {
        let chunks = [Bytes::from_static(b"{\"Name\":\"x\"}\n\x00\\")];
        let probe = Probe::from_chunks(chunks).unwrap();
        assert_eq!(probe.name, "x");
    }

    #[test]
    fn test_extra_member_rejected() {
        let chunks = [Bytes::from_static(b"{\"Name\":\"x\",\"Extra\":1}")];
        assert!(Probe::from_chunks(chunks).is_err());
    }

    #[test]
    fn test_missing_member_rejected() {
        let chunks = [Bytes::from_static(b"{}")];
        assert!(Probe::from_chunks(chunks).is_err());
    }

    #[test]
    fn test_empty_message_rejected() {
        assert!(Probe::from_chunks(Vec::<Bytes>::new()).is_err());
    }
}
