use crate::{header::to_be_trimmed, Header, EMPTY_STRING_CODE};
use bytes::BufMut;
use ingot_primitives::{Address, Bytes, Signature, TxKind, B256, U256};

/// A type serializable to RLP.
pub trait Encodable {
    /// Appends the encoding of `self` to `out`.
    fn encode(&self, out: &mut dyn BufMut);

    /// Length of the encoding in bytes.
    fn length(&self) -> usize {
        let mut out = Vec::new();
        self.encode(&mut out);
        out.len()
    }
}

impl<T: Encodable + ?Sized> Encodable for &T {
    fn encode(&self, out: &mut dyn BufMut) {
        (**self).encode(out)
    }

    fn length(&self) -> usize {
        (**self).length()
    }
}

fn encode_bytes(payload: &[u8], out: &mut dyn BufMut) {
    match payload {
        [byte] if *byte < EMPTY_STRING_CODE => out.put_u8(*byte),
        _ => {
            Header { list: false, payload_length: payload.len() }.encode(out);
            out.put_slice(payload);
        }
    }
}

fn bytes_length(payload: &[u8]) -> usize {
    match payload {
        [byte] if *byte < EMPTY_STRING_CODE => 1,
        _ => Header { list: false, payload_length: payload.len() }.length() + payload.len(),
    }
}

/// Byte strings travel as [`Bytes`]; a `Vec<T>` is always an RLP *list*,
/// so a `Vec<u8>` would encode as a list of integers, not a string.
impl Encodable for Bytes {
    fn encode(&self, out: &mut dyn BufMut) {
        encode_bytes(self, out)
    }

    fn length(&self) -> usize {
        bytes_length(self)
    }
}

macro_rules! uint_encodable {
    ($($ty:ty),*) => {$(
        impl Encodable for $ty {
            fn encode(&self, out: &mut dyn BufMut) {
                // integers are minimal big-endian strings; zero is empty
                encode_bytes(&to_be_trimmed(*self as u64), out)
            }

            fn length(&self) -> usize {
                if *self < EMPTY_STRING_CODE as $ty {
                    1
                } else {
                    1 + (<$ty>::BITS as usize / 8)
                        - (*self).leading_zeros() as usize / 8
                }
            }
        }
    )*};
}

uint_encodable!(u8, u16, u32, u64, usize);

impl Encodable for u128 {
    fn encode(&self, out: &mut dyn BufMut) {
        let bytes = self.to_be_bytes();
        let first = bytes.iter().position(|b| *b != 0).unwrap_or(16);
        encode_bytes(&bytes[first..], out)
    }

    fn length(&self) -> usize {
        if *self < EMPTY_STRING_CODE as u128 {
            1
        } else {
            1 + 16 - self.leading_zeros() as usize / 8
        }
    }
}

impl Encodable for U256 {
    fn encode(&self, out: &mut dyn BufMut) {
        encode_bytes(&self.to_be_bytes_trimmed(), out)
    }

    fn length(&self) -> usize {
        if *self < U256::from(EMPTY_STRING_CODE) {
            1
        } else {
            1 + self.byte_len()
        }
    }
}

impl Encodable for B256 {
    fn encode(&self, out: &mut dyn BufMut) {
        // always the full 32-byte string, leading zeros included
        Header { list: false, payload_length: 32 }.encode(out);
        out.put_slice(self.as_slice());
    }

    fn length(&self) -> usize {
        33
    }
}

impl Encodable for Address {
    fn encode(&self, out: &mut dyn BufMut) {
        // always the full 20-byte string
        Header { list: false, payload_length: 20 }.encode(out);
        out.put_slice(self.as_slice());
    }

    fn length(&self) -> usize {
        21
    }
}

impl Encodable for TxKind {
    fn encode(&self, out: &mut dyn BufMut) {
        match self {
            // an absent recipient is the empty string
            Self::Create => out.put_u8(EMPTY_STRING_CODE),
            Self::Call(to) => to.encode(out),
        }
    }

    fn length(&self) -> usize {
        match self {
            Self::Create => 1,
            Self::Call(to) => to.length(),
        }
    }
}

impl<T: Encodable> Encodable for Vec<T> {
    fn encode(&self, out: &mut dyn BufMut) {
        encode_list(self, out)
    }

    fn length(&self) -> usize {
        list_length(self)
    }
}

/// Writes `items` as an RLP list.
pub fn encode_list<T: Encodable>(items: &[T], out: &mut dyn BufMut) {
    let payload_length = items.iter().map(Encodable::length).sum();
    Header { list: true, payload_length }.encode(out);
    for item in items {
        item.encode(out);
    }
}

/// Length of `items` encoded as an RLP list.
pub fn list_length<T: Encodable>(items: &[T]) -> usize {
    let payload_length: usize = items.iter().map(Encodable::length).sum();
    Header { list: true, payload_length }.length() + payload_length
}

/// Encodes a value into a fresh buffer.
pub fn encode<T: Encodable>(value: T) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.length());
    value.encode(&mut out);
    out
}

/// Writes a signature's `v, r, s` tail with the given wire `v`.
///
/// Which encoding `v` uses (27 + r, EIP-155, or the bare bit) is the
/// transaction variant's decision; the scalars are minimal integers.
pub fn encode_signature_vrs(signature: &Signature, v: u64, out: &mut dyn BufMut) {
    v.encode(out);
    signature.r().encode(out);
    signature.s().encode(out);
}

/// Length of the `v, r, s` tail written by [`encode_signature_vrs`].
pub fn signature_vrs_length(signature: &Signature, v: u64) -> usize {
    v.length() + signature.r().length() + signature.s().length()
}
