//! The high level client: connect, authenticate, run request/reply
//! exchanges, read data streams and discover devices.
//!
//! One file per device operation, all of them methods on [`DvripClient`].

mod connection;
mod discover;
mod files;
mod info;
mod log;
mod login;
mod monitor;
mod operation;
mod playback;
mod ptz;
mod reader;
mod time;

pub use connection::Connection;
pub use discover::discover;
pub use reader::Reader;

use crate::dvrip::message::Session;
use crate::Result;
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::Instant;

/// Default TCP control port.
pub const PORT: u16 = 34567;
/// UDP discovery port.
pub const DISCOVER_PORT: u16 = 34569;

/// A DVRIP client over one control connection.
///
/// Freshly constructed clients speak under session zero; [`login`] adopts
/// the session the device assigns and starts the keep alive clock.
///
/// [`login`]: DvripClient::login
#[derive(Debug)]
pub struct DvripClient {
    connection: Connection,
    login: Option<LoginState>,
}

#[derive(Debug)]
struct LoginState {
    username: String,
    interval: tokio::time::Duration,
    last: Instant,
    chassis: String,
}

impl DvripClient {
    /// Wraps a connected control socket.
    pub fn new(stream: TcpStream) -> DvripClient {
        DvripClient {
            connection: Connection::new(stream, Session::NONE),
            login: None,
        }
    }

    /// Connects to `addr` (normally port [`PORT`]).
    pub async fn connect<A: ToSocketAddrs>(addr: A) -> Result<DvripClient> {
        Ok(DvripClient::new(TcpStream::connect(addr).await?))
    }

    /// The current session, zero before login.
    pub fn session(&self) -> Session {
        self.connection.session()
    }

    /// The chassis type the device reported at login.
    pub fn chassis(&self) -> Option<&str> {
        self.login.as_ref().map(|state| state.chassis.as_str())
    }
}
