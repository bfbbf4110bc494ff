//! Reply reassembly, written as explicit state machines.
//!
//! A filter is fed one packet at a time and answers with a [`Verdict`]:
//! either it kept the packet, or it finished assembling a result, or the
//! packet belongs to somebody else and is handed back untouched. The
//! connection decides what a foreign packet means; the filters never block
//! and never reorder.

use super::message::Message;
use super::model::Packet;
use crate::{DecodeError, Result};
use bytes::Bytes;
use std::marker::PhantomData;

/// What a filter did with one packet.
#[derive(Debug)]
pub enum Verdict<T> {
    /// Accepted; the transaction is still incomplete.
    Consumed,
    /// A fully assembled result.
    Ready(T),
    /// The packet belongs to some other transaction; it is returned
    /// untouched.
    Foreign(Packet),
}

/// Collects the fragments of one control reply of type `R` and request
/// number `number`.
///
/// Fragments may arrive in any order, interleaved with unrelated traffic;
/// each is slotted by its fragment index. Request numbers are compared with
/// the low bit masked off, tolerating the claim/data pairing convention.
#[derive(Debug)]
pub struct ControlFilter<R> {
    number: u32,
    limit: usize,
    count: usize,
    slots: Vec<Option<Packet>>,
    done: bool,
    _reply: PhantomData<R>,
}

impl<R: Message> ControlFilter<R> {
    /// A filter for the reply to request number `number`.
    pub fn new(number: u32) -> ControlFilter<R> {
        ControlFilter {
            number,
            limit: 0,
            count: 0,
            slots: Vec::new(),
            done: false,
            _reply: PhantomData,
        }
    }

    /// Offers one packet to the filter. Must not be called again once a
    /// reply has been produced.
    pub fn accept(&mut self, packet: Packet) -> Result<Verdict<R>> {
        assert!(!self.done, "packet offered to a finished filter");
        if packet.ty != R::TYPE {
            return Ok(Verdict::Foreign(packet));
        }
        if packet.number & !1 != self.number & !1 {
            return Ok(Verdict::Foreign(packet));
        }

        if self.limit == 0 {
            self.limit = usize::from(packet.fragments().max(1));
            self.slots = vec![None; self.limit];
        }
        if usize::from(packet.fragments().max(1)) != self.limit {
            return Err(DecodeError::ConflictingFragments.into());
        }
        let index = usize::from(packet.fragment());
        if index >= self.limit {
            return Err(DecodeError::InvalidFragmentIndex.into());
        }
        if self.slots[index].is_some() {
            return Err(DecodeError::OverlappingFragments.into());
        }

        self.slots[index] = Some(packet);
        self.count += 1;
        if self.count < self.limit {
            return Ok(Verdict::Consumed);
        }
        self.done = true;
        let packets: Vec<Packet> = self.slots.drain(..).flatten().collect();
        Ok(Verdict::Ready(R::from_packets(&packets)?))
    }
}

/// Extracts the payload bytes of a data stream of packet type `ty` until a
/// packet with the end flag arrives.
#[derive(Debug)]
pub struct StreamFilter {
    ty: u16,
    done: bool,
}

impl StreamFilter {
    /// A filter for stream data packets of type `ty`.
    pub fn new(ty: u16) -> StreamFilter {
        StreamFilter { ty, done: false }
    }

    /// Whether the end-of-stream packet has been seen.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Offers one packet; `Ready` carries a chunk of stream bytes. Data
    /// packets with empty payloads are no-ops.
    pub fn accept(&mut self, packet: Packet) -> Verdict<Bytes> {
        if packet.ty != self.ty {
            return Verdict::Foreign(packet);
        }
        if packet.end() {
            self.done = true;
        }
        if packet.payload.is_empty() {
            Verdict::Consumed
        } else {
            Verdict::Ready(packet.payload)
        }
    }
}
