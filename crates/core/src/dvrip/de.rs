use super::model::*;
use crate::DecodeError;
use bytes::{Buf, Bytes, BytesMut};
use nom::{
    bytes::streaming::take,
    combinator::{consumed, verify},
    error::{context as error_context, VerboseError, VerboseErrorKind},
    number::streaming::{le_u16, le_u32, le_u8},
};

type IResult<I, O, E = VerboseError<I>> = Result<(I, O), nom::Err<E>>;

impl Packet {
    /// Consumes one whole packet from the front of `buf`, or returns
    /// `Ok(None)` when the buffer does not yet hold one.
    pub(crate) fn deserialize(buf: &mut BytesMut) -> Result<Option<Packet>, DecodeError> {
        let outcome = match consumed(packet)(&buf[..]) {
            Ok((_, (parsed, result))) => Ok(Some((parsed.len(), result))),
            Err(nom::Err::Incomplete(_)) => Ok(None),
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(classify(&e)),
        };
        match outcome? {
            Some((amount, result)) => {
                buf.advance(amount);
                Ok(Some(result))
            }
            None => Ok(None),
        }
    }

    /// Decodes a packet from a complete buffer, such as one UDP datagram.
    pub fn decode(data: &[u8]) -> Result<Packet, DecodeError> {
        match packet(data) {
            Ok((rest, result)) => {
                debug_assert!(rest.is_empty());
                Ok(result)
            }
            Err(nom::Err::Incomplete(_)) => Err(DecodeError::Truncated),
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(classify(&e)),
        }
    }
}

fn packet(buf: &[u8]) -> IResult<&[u8], Packet> {
    let (buf, _magic) = error_context("magic", verify(le_u8, |b| *b == MAGIC))(buf)?;
    let (buf, _version) = error_context("version", verify(le_u8, |b| *b == VERSION))(buf)?;
    let (buf, _reserved) = take(2usize)(buf)?;
    let (buf, session) = le_u32(buf)?;
    let (buf, number) = le_u32(buf)?;
    let (buf, fragment0) = le_u8(buf)?;
    let (buf, fragment1) = le_u8(buf)?;
    let (buf, ty) = le_u16(buf)?;
    let (buf, length) = error_context(
        "length",
        verify(le_u32, |n| *n as usize <= MAX_PAYLOAD),
    )(buf)?;
    let (buf, payload) = take(length)(buf)?;

    Ok((
        buf,
        Packet::from_wire(
            session,
            number,
            fragment0,
            fragment1,
            ty,
            Bytes::copy_from_slice(payload),
        ),
    ))
}

fn classify(error: &VerboseError<&[u8]>) -> DecodeError {
    for (_, kind) in &error.errors {
        if let VerboseErrorKind::Context(label) = kind {
            return match *label {
                "magic" => DecodeError::BadMagic,
                "version" => DecodeError::BadVersion,
                "length" => DecodeError::OverlongPayload,
                _ => DecodeError::Truncated,
            };
        }
    }
    DecodeError::Truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn sample() -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&[
            0xff, 0x01, 0x00, 0x00, 0xcd, 0xab, 0x00, 0x00, 0xfa, 0xde, 0x00, 0x00, 0x12, 0x34,
            0x56, 0x78, 0x05, 0x00, 0x00, 0x00,
        ]);
        data.extend_from_slice(b"hello");
        data
    }

    #[test]
    fn test_decode() {
        let packet = Packet::decode(&sample()).unwrap();
        assert_eq!(packet.session, 0xabcd);
        assert_eq!(packet.number, 0xdefa);
        assert_eq!(packet.fragments(), 0x12);
        assert_eq!(packet.fragment(), 0x34);
        assert_eq!(packet.ty, 0x7856);
        assert_eq!(&packet.payload[..], b"hello");
    }

    #[test]
    fn test_decode_bad_magic() {
        let mut data = sample();
        data[0] = 0xfe;
        assert_matches!(Packet::decode(&data), Err(DecodeError::BadMagic));
    }

    #[test]
    fn test_decode_bad_version() {
        let mut data = sample();
        data[1] = 0x02;
        assert_matches!(Packet::decode(&data), Err(DecodeError::BadVersion));
    }

    #[test]
    fn test_decode_overlong() {
        let mut data = sample();
        data[16..20].copy_from_slice(&(MAX_PAYLOAD as u32 + 1).to_le_bytes());
        assert_matches!(Packet::decode(&data), Err(DecodeError::OverlongPayload));
    }

    #[test]
    fn test_deserialize_incremental() {
        let data = sample();
        // No prefix short of the whole packet may produce a result.
        for split in 0..data.len() {
            let mut buf = BytesMut::from(&data[..split]);
            assert_matches!(Packet::deserialize(&mut buf), Ok(None));
        }
        let mut buf = BytesMut::from(&data[..]);
        let packet = Packet::deserialize(&mut buf).unwrap().unwrap();
        assert_eq!(packet.ty, 0x7856);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_deserialize_leaves_next_packet() {
        let mut data = sample();
        data.extend_from_slice(&sample());
        let mut buf = BytesMut::from(&data[..]);
        let first = Packet::deserialize(&mut buf).unwrap().unwrap();
        assert_eq!(buf.len(), first.size());
        let second = Packet::deserialize(&mut buf).unwrap().unwrap();
        assert_eq!(first, second);
        assert!(buf.is_empty());
    }
}
