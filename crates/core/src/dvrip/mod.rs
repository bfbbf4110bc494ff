//! The DVRIP wire protocol.
//!
//! [`model`] holds the packet framing unit and the wire message type
//! constants; `de`/`ser` implement its binary form and [`codec`] adapts both
//! to a framed socket. [`message`] defines the typed JSON message model,
//! [`filter`] the reply reassembly state machines, and the remaining modules
//! declare the concrete messages, one module per device feature.

pub mod codec;
pub mod convert;
mod de;
pub mod discover;
pub mod files;
pub mod filter;
pub mod info;
pub mod log;
pub mod login;
pub mod message;
pub mod model;
pub mod monitor;
pub mod operation;
pub mod playback;
pub mod ptz;
mod ser;
pub mod status;
