use super::DISCOVER_PORT;
use crate::dvrip::discover::{DiscoverReply, Host};
use crate::dvrip::message::Message as _;
use crate::dvrip::model::{Packet, HEADER_LEN, MAX_PAYLOAD, MSG_ID_DISCOVER};
use crate::{DecodeError, Result};
use bytes::Bytes;
use log::{debug, trace};
use socket2::{Domain, Protocol, Socket, Type};
use std::net::{IpAddr, Ipv4Addr, SocketAddrV4};
use tokio::net::UdpSocket;
use tokio::time::Duration;

/// Broadcasts a discovery probe and collects device announcements until
/// `timeout` passes without a new one.
///
/// `bind` picks the local interface; `Ipv4Addr::UNSPECIFIED` listens on all
/// of them. Every announcement must name its own source address, anything
/// else is treated as spoofed and aborts the collection.
pub async fn discover(bind: Ipv4Addr, timeout: Duration) -> Result<Vec<Host>> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_reuse_address(true)?;
    socket.set_broadcast(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&SocketAddrV4::new(bind, DISCOVER_PORT).into())?;
    let socket = UdpSocket::from_std(socket.into())?;

    let probe = Packet::control(0, 0, MSG_ID_DISCOVER, Bytes::new(), 0, 0);
    socket
        .send_to(
            &probe.encode()?,
            (Ipv4Addr::BROADCAST, DISCOVER_PORT),
        )
        .await?;

    let mut hosts = Vec::new();
    let mut buffer = vec![0u8; HEADER_LEN + MAX_PAYLOAD];
    loop {
        let (length, source) =
            match tokio::time::timeout(timeout, socket.recv_from(&mut buffer)).await {
                Ok(received) => received?,
                Err(_) => break,
            };
        trace!("discovery datagram of {} bytes from {}", length, source);

        let packet = Packet::decode(&buffer[..length])?;
        if packet.payload.is_empty() {
            // Our own probe, or somebody else's.
            continue;
        }
        let reply = DiscoverReply::from_packets(std::slice::from_ref(&packet))?;
        let announced = reply.host.host.0;
        if IpAddr::V4(announced) != source.ip() {
            return Err(DecodeError::SpoofedReply {
                claimed: announced,
                actual: source.ip(),
            }
            .into());
        }
        debug!("discovered {} at {}", reply.host.name, reply.host.host);
        hosts.push(reply.host);
    }
    Ok(hosts)
}
