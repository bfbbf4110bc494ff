use super::model::*;
use crate::Error;
use cookie_factory::{
    bytes::{le_u16, le_u32, le_u8},
    combinator::slice,
    gen_simple,
    sequence::tuple,
    GenError, SerializeFn,
};
use std::io::Write;

impl Packet {
    /// Serializes the packet, header then payload, into `writer`.
    pub fn serialize<W: Write>(&self, writer: W) -> Result<W, Error> {
        assert!(self.payload.len() <= MAX_PAYLOAD);
        gen_simple(packet(self), writer).map_err(gen_error)
    }

    /// The packet's complete wire form.
    pub fn encode(&self) -> Result<Vec<u8>, Error> {
        self.serialize(Vec::with_capacity(self.size()))
    }
}

fn packet<'a, W: Write + 'a>(p: &'a Packet) -> impl SerializeFn<W> + 'a {
    let (fragment0, fragment1) = p.raw_fragments();
    tuple((
        le_u8(MAGIC),
        le_u8(VERSION),
        le_u16(0),
        le_u32(p.session),
        le_u32(p.number),
        le_u8(fragment0),
        le_u8(fragment1),
        le_u16(p.ty),
        le_u32(p.payload.len() as u32),
        slice(&p.payload),
    ))
}

fn gen_error(error: GenError) -> Error {
    match error {
        GenError::IoError(e) => Error::Io(e),
        other => Error::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("packet serialization failed: {:?}", other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_encode() {
        let packet = Packet::control(0xabcd, 0xdefa, 0x7856, Bytes::from_static(b"hello"), 0x12, 0x34);
        let encoded = packet.encode().unwrap();
        assert_eq!(
            hex(&encoded),
            "ff010000cdab0000fade0000123456780500000068656c6c6f"
        );
        assert_eq!(encoded.len(), packet.size());
    }

    #[test]
    fn test_roundtrip() {
        let packet = Packet::control(0x57, 2, 1001, Bytes::from_static(b"{}"), 2, 1);
        let decoded = Packet::decode(&packet.encode().unwrap()).unwrap();
        assert_eq!(decoded, packet);
    }

    fn hex(data: &[u8]) -> String {
        data.iter().map(|b| format!("{:02x}", b)).collect()
    }
}
