use crate::dvrip::codec::PacketCodec;
use crate::dvrip::filter::{ControlFilter, Verdict};
use crate::dvrip::message::{Message, Reply as _, Request, Session};
use crate::dvrip::model::Packet;
use crate::{DecodeError, Error, RequestError, Result};
use futures::{SinkExt, StreamExt};
use log::{log_enabled, trace, Level};
use tokio::net::TcpStream;
use tokio_util::codec::Framed;

/// One DVRIP connection: the socket, the session echoed in every packet,
/// and the monotone request number counter.
///
/// A connection is owned by exactly one caller and runs a strict ping-pong:
/// at most one request is in flight at a time. Hosts that want concurrency
/// open more connections.
#[derive(Debug)]
pub struct Connection {
    io: Framed<TcpStream, PacketCodec>,
    session: Session,
    number: u32,
}

impl Connection {
    /// Wraps a connected control socket. `session` is [`Session::NONE`]
    /// before login.
    pub fn new(stream: TcpStream, session: Session) -> Connection {
        Connection {
            io: Framed::new(stream, PacketCodec),
            session,
            number: 0,
        }
    }

    /// The session stamped on outgoing packets.
    pub fn session(&self) -> Session {
        self.session
    }

    pub(crate) fn set_session(&mut self, session: Session) {
        self.session = session;
    }

    /// The request number the next exchange will claim.
    pub(crate) fn number(&self) -> u32 {
        self.number
    }

    /// Claims the current request number and moves the counter on by one
    /// transaction, keeping the low bit pairing convention intact.
    pub(crate) fn advance(&mut self) -> u32 {
        let number = self.number;
        self.number = number.wrapping_add(2);
        number
    }

    /// Writes every fragment of `message` back to back under the given
    /// request number, then flushes.
    pub async fn send<M: Message>(&mut self, number: u32, message: &M) -> Result<()> {
        for packet in message.to_packets(self.session, number)? {
            trace!(
                "send type {} number {} fragment {}/{}",
                packet.ty,
                packet.number,
                packet.fragment(),
                packet.fragments()
            );
            self.io.feed(packet).await?;
        }
        self.io.flush().await?;
        Ok(())
    }

    /// Reads one packet off the socket, keeping the number counter ahead of
    /// anything the peer has seen.
    pub(crate) async fn recv_packet(&mut self) -> Result<Packet> {
        match self.io.next().await {
            Some(packet) => {
                let packet = packet?;
                self.number = self.number.max(packet.number & !1);
                Ok(packet)
            }
            None => Err(Error::Io(std::io::Error::from(
                std::io::ErrorKind::UnexpectedEof,
            ))),
        }
    }

    /// Feeds incoming packets to `filter` until it assembles a reply.
    ///
    /// A packet the filter does not recognise is a protocol error here;
    /// nothing else may talk during a transaction.
    pub async fn recv<R: Message>(&mut self, filter: &mut ControlFilter<R>) -> Result<R> {
        loop {
            let packet = self.recv_packet().await?;
            match filter.accept(packet)? {
                Verdict::Ready(reply) => return Ok(reply),
                Verdict::Consumed => continue,
                Verdict::Foreign(packet) => {
                    trace!("stray packet type {} number {}", packet.ty, packet.number);
                    return Err(DecodeError::StrayPacket.into());
                }
            }
        }
    }

    /// Sends `request` and awaits its matching reply, converting a failing
    /// status code into a [`RequestError`].
    pub async fn request<R: Request>(&mut self, request: &R) -> Result<R::Reply> {
        let number = self.advance();
        if log_enabled!(Level::Trace) {
            trace!(
                "request {}",
                serde_json::to_string(request).unwrap_or_default()
            );
        }
        self.send(number, request).await?;
        let mut filter = ControlFilter::<R::Reply>::new(number);
        let reply = self.recv(&mut filter).await?;
        let status = reply.status();
        if !status.success() {
            return Err(RequestError::new(status, request, &reply).into());
        }
        Ok(reply)
    }
}
