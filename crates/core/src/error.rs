use crate::dvrip::status::Status;
use serde::Serialize;
use serde_json::Value;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Anything that can go wrong while talking to a device.
#[derive(Debug, Error)]
pub enum Error {
    /// The peer sent bytes that do not conform to the protocol. Never
    /// retried; after a decode error on the reply path the connection state
    /// is undefined and the caller should drop it.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// The exchange itself worked but the device refused the request.
    #[error(transparent)]
    Request(#[from] RequestError),
    /// The socket failed underneath us.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// A malformed packet, JSON document or message sequence.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The first header byte was not `0xFF`.
    #[error("invalid DVRIP magic")]
    BadMagic,
    /// The second header byte was not `0x01`.
    #[error("unknown DVRIP version")]
    BadVersion,
    /// The declared payload length exceeds the protocol maximum.
    #[error("DVRIP packet too long")]
    OverlongPayload,
    /// A datagram ended in the middle of a packet.
    #[error("truncated DVRIP packet")]
    Truncated,
    /// A message arrived with no payload bytes at all.
    #[error("no data in DVRIP packet")]
    EmptyMessage,
    /// The payload was not the JSON document the message type calls for.
    #[error("bad payload: {0}")]
    Json(#[from] serde_json::Error),
    /// Fragments of one reply disagree about the fragment count.
    #[error("conflicting fragment counts")]
    ConflictingFragments,
    /// A fragment index at or beyond the declared count.
    #[error("invalid fragment number")]
    InvalidFragmentIndex,
    /// Two fragments claimed the same slot.
    #[error("overlapping fragments")]
    OverlappingFragments,
    /// A packet that belongs to no active transaction.
    #[error("stray packet")]
    StrayPacket,
    /// A discovery reply announcing an address other than its source.
    #[error("wrong IP address reported: {claimed} sent from {actual}")]
    SpoofedReply {
        /// The address the reply body announces.
        claimed: Ipv4Addr,
        /// The datagram's actual source address.
        actual: IpAddr,
    },
    /// A structurally valid reply that does not carry what it should.
    #[error("unintelligible reply: {why}")]
    UnintelligibleReply {
        /// What was missing.
        why: &'static str,
    },
}

/// The device answered with a failing [`Status`] code.
///
/// Carries the JSON forms of both the refused request and the reply so that
/// callers (and logs) can see the whole exchange.
#[derive(Debug, Error)]
#[error("{status}")]
pub struct RequestError {
    /// The failing status code.
    pub status: Status,
    /// JSON form of the request the device refused.
    pub request: Value,
    /// JSON form of the reply that carried the failure.
    pub reply: Value,
}

impl RequestError {
    pub(crate) fn new<Q, R>(status: Status, request: &Q, reply: &R) -> RequestError
    where
        Q: Serialize,
        R: Serialize,
    {
        RequestError {
            status,
            request: serde_json::to_value(request).unwrap_or(Value::Null),
            reply: serde_json::to_value(reply).unwrap_or(Value::Null),
        }
    }

    /// The numeric status code.
    pub fn code(&self) -> u32 {
        self.status.code()
    }

    /// The human readable status message.
    pub fn message(&self) -> &'static str {
        self.status.message()
    }
}
