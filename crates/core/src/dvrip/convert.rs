//! The vendor specific JSON value encodings.
//!
//! Devices put several non JSON shapes into JSON strings: 32 bit integers
//! as upper case hex with an `0x` prefix, IPv4 addresses as the hex form of
//! their little endian word, netmasks as a contiguous bit run in the same
//! form, timestamps with two magic sentinel spellings, and version strings
//! where the literal `Unknown` stands for no value. Each encoding gets a
//! newtype here so that `serde` derives on the message structs stay plain.

use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::net::Ipv4Addr;
use time::macros::{datetime, format_description};
use time::{format_description::FormatItem, PrimitiveDateTime};

pub(crate) fn hex_for_json(value: u32) -> String {
    format!("0x{:08X}", value)
}

pub(crate) fn json_to_hex(datum: &str) -> Result<u32, &'static str> {
    const BAD: &str = "not a hex integer";
    let digits = datum.strip_prefix("0x").ok_or(BAD)?;
    if digits.is_empty() || digits.len() > 8 {
        return Err(BAD);
    }
    u32::from_str_radix(digits, 16).map_err(|_| BAD)
}

/// A 32 bit integer carried as `0x` plus eight upper case hex digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HexInt(pub u32);

impl fmt::Display for HexInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u32> for HexInt {
    fn from(value: u32) -> HexInt {
        HexInt(value)
    }
}

impl Serialize for HexInt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex_for_json(self.0))
    }
}

impl<'de> Deserialize<'de> for HexInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<HexInt, D::Error> {
        let datum = String::deserialize(deserializer)?;
        json_to_hex(&datum).map(HexInt).map_err(D::Error::custom)
    }
}

/// An IPv4 address carried as the hex form of its little endian word, so
/// the textual digits read byte reversed relative to the dotted quad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexIpv4(pub Ipv4Addr);

impl fmt::Display for HexIpv4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for HexIpv4 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let [a, b, c, d] = self.0.octets();
        let word =
            (u32::from(d) << 24) | (u32::from(c) << 16) | (u32::from(b) << 8) | u32::from(a);
        serializer.serialize_str(&hex_for_json(word))
    }
}

impl<'de> Deserialize<'de> for HexIpv4 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<HexIpv4, D::Error> {
        let datum = String::deserialize(deserializer)?;
        let word = json_to_hex(&datum).map_err(D::Error::custom)?;
        Ok(HexIpv4(Ipv4Addr::new(
            (word & 0xFF) as u8,
            (word >> 8 & 0xFF) as u8,
            (word >> 16 & 0xFF) as u8,
            (word >> 24 & 0xFF) as u8,
        )))
    }
}

/// A network prefix length carried as a contiguous little endian hex mask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Netmask(pub u8);

impl fmt::Display for Netmask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for Netmask {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        assert!(self.0 <= 32);
        let mask = match self.0 {
            0 => 0,
            n => 0xFFFF_FFFFu32 >> (32 - u32::from(n)),
        };
        serializer.serialize_str(&hex_for_json(mask))
    }
}

impl<'de> Deserialize<'de> for Netmask {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Netmask, D::Error> {
        let datum = String::deserialize(deserializer)?;
        let mask = json_to_hex(&datum).map_err(D::Error::custom)?;
        // A contiguous low bit run plus one is a power of two.
        if mask.wrapping_add(1) & mask != 0 {
            return Err(D::Error::custom("not a netmask"));
        }
        Ok(Netmask((32 - mask.leading_zeros()) as u8))
    }
}

/// The DVRIP time origin, 2000-01-01 00:00:00 device local time.
pub const EPOCH: PrimitiveDateTime = datetime!(2000-01-01 00:00:00);

const NO_STRING: &str = "0000-00-00 00:00:00";
const EPOCH_STRING: &str = "2000-00-00 00:00:00";
const DT_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// A device timestamp.
///
/// Two sentinel spellings exist on the wire: the all zero string stands for
/// no timestamp at all (`None` here) and `2000-00-00 00:00:00` for the
/// [`EPOCH`] itself. Anything else at or before the epoch is rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DvrTime(pub Option<PrimitiveDateTime>);

impl From<PrimitiveDateTime> for DvrTime {
    fn from(value: PrimitiveDateTime) -> DvrTime {
        DvrTime(Some(value))
    }
}

impl fmt::Display for DvrTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            None => f.write_str("-"),
            Some(value) => {
                let text = value.format(DT_FORMAT).map_err(|_| fmt::Error)?;
                f.write_str(&text)
            }
        }
    }
}

impl Serialize for DvrTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            None => serializer.serialize_str(NO_STRING),
            Some(value) if value == EPOCH => serializer.serialize_str(EPOCH_STRING),
            Some(value) => {
                if value < EPOCH {
                    return Err(S::Error::custom("datetime not after the epoch"));
                }
                let text = value.format(DT_FORMAT).map_err(S::Error::custom)?;
                serializer.serialize_str(&text)
            }
        }
    }
}

impl<'de> Deserialize<'de> for DvrTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<DvrTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        if text == NO_STRING {
            return Ok(DvrTime(None));
        }
        if text == EPOCH_STRING {
            return Ok(DvrTime(Some(EPOCH)));
        }
        let value = PrimitiveDateTime::parse(&text, DT_FORMAT)
            .map_err(|_| D::Error::custom("not a datetime string"))?;
        if value <= EPOCH {
            return Err(D::Error::custom("datetime not after the epoch"));
        }
        Ok(DvrTime(Some(value)))
    }
}

/// A version string where the literal `Unknown` stands for no value and is
/// never a legal value of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Version(pub Option<String>);

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            None => f.write_str("Unknown"),
            Some(value) => f.write_str(value),
        }
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            None => serializer.serialize_str("Unknown"),
            Some(value) => {
                assert!(value != "Unknown");
                serializer.serialize_str(value)
            }
        }
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Version, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Version(if text == "Unknown" { None } else { Some(text) }))
    }
}

/// Presence marker for members that may be missing from the wire entirely.
///
/// Unlike `Option`, `Absent` never serialises (the field carries
/// `#[serde(default, skip_serializing_if = "Maybe::is_absent")]`) and a wire
/// `null` does not deserialise into it, so "the key was not there" stays
/// distinct from "the key held null".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Maybe<T> {
    /// The member was not present.
    Absent,
    /// The member was present with this value.
    Present(T),
}

impl<T> Maybe<T> {
    /// True when no value is present.
    pub fn is_absent(&self) -> bool {
        matches!(self, Maybe::Absent)
    }

    /// Borrows the value, if any.
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Maybe::Absent => None,
            Maybe::Present(value) => Some(value),
        }
    }

    /// Converts into a plain `Option`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Maybe::Absent => None,
            Maybe::Present(value) => Some(value),
        }
    }
}

impl<T> Default for Maybe<T> {
    fn default() -> Maybe<T> {
        Maybe::Absent
    }
}

impl<T> From<T> for Maybe<T> {
    fn from(value: T) -> Maybe<T> {
        Maybe::Present(value)
    }
}

impl<T: Serialize> Serialize for Maybe<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Only reachable when a field is missing its skip attribute.
            Maybe::Absent => Err(S::Error::custom("absent member")),
            Maybe::Present(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Maybe<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Maybe<T>, D::Error> {
        T::deserialize(deserializer).map(Maybe::Present)
    }
}

/// Declares a unit type that always serialises to one fixed JSON value and
/// refuses anything else on decode. Used for the sub command discriminators
/// and the handful of parameters devices expect but never vary.
macro_rules! fixed_member {
    ($(#[$meta:meta])* $name:ident, $value:tt) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl $name {
            fn value() -> serde_json::Value {
                serde_json::json!($value)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> Result<S::Ok, S::Error> {
                Self::value().serialize(serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> Result<Self, D::Error> {
                let datum = serde_json::Value::deserialize(deserializer)?;
                if datum != Self::value() {
                    return Err(serde::de::Error::custom(concat!(
                        "unexpected value for fixed member `",
                        stringify!($name),
                        "`"
                    )));
                }
                Ok($name)
            }
        }
    };
}

pub(crate) use fixed_member;
