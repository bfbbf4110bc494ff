#![warn(missing_docs)]
//!
//! # dvrip_core
//!
//! Client support for the DVRIP protocol spoken by a widespread family of
//! digital video recorders and network video recorders.
//!
//! DVRIP is a length prefixed request/reply protocol over TCP (with a UDP
//! broadcast variant for discovery) whose payloads are JSON documents. This
//! crate provides the three layers a client needs:
//!
//! - [`dvrip`]: the 20 byte packet framing, the typed message model with its
//!   vendor specific value encodings, and the reply reassembly filters;
//! - [`client`]: connection and session handling, including login and keep
//!   alive, short request/reply exchanges, long lived data stream readers
//!   and UDP device discovery.
//!
//! The crate implements the client side only. Payload encryption, which
//! devices merely advertise through the `DataUseAES` login flag, is not
//! supported.

pub mod client;
pub mod dvrip;
mod error;

pub use client::DvripClient;
pub use error::{DecodeError, Error, RequestError, Result};
