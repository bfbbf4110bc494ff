use super::model::Packet;
use crate::Error;
use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

/// Frames [`Packet`]s over a byte stream for use with
/// [`tokio_util::codec::Framed`].
///
/// Decoding hands back `None` until a whole packet has arrived, so partial
/// reads are simply retried by the transport; at most one packet is consumed
/// per call.
#[derive(Debug, Default)]
pub struct PacketCodec;

impl Decoder for PacketCodec {
    type Item = Packet;
    type Error = Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Packet>, Error> {
        Packet::deserialize(src).map_err(Error::from)
    }
}

impl Encoder<Packet> for PacketCodec {
    type Error = Error;

    fn encode(&mut self, packet: Packet, dst: &mut BytesMut) -> Result<(), Error> {
        dst.reserve(packet.size());
        let encoded = packet.encode()?;
        dst.extend_from_slice(&encoded);
        Ok(())
    }
}
