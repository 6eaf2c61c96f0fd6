use crate::{Error, Header, Result};
use ingot_primitives::{Address, Bytes, TxKind, B256, U256};

/// A type deserializable from RLP.
pub trait Decodable: Sized {
    /// Decodes the next item from `buf`, advancing it.
    fn decode(buf: &mut &[u8]) -> Result<Self>;
}

fn decode_payload<'a>(buf: &mut &'a [u8]) -> Result<&'a [u8]> {
    let header = Header::decode(buf)?;
    if header.list {
        return Err(Error::UnexpectedList);
    }
    let (payload, rest) = buf.split_at(header.payload_length);
    *buf = rest;
    Ok(payload)
}

fn decode_integer_payload<'a>(buf: &mut &'a [u8], max_len: usize) -> Result<&'a [u8]> {
    let payload = decode_payload(buf)?;
    if payload.len() > max_len {
        return Err(Error::Overflow);
    }
    // canonical integers have no leading zero byte
    if payload.first() == Some(&0) {
        return Err(Error::LeadingZero);
    }
    Ok(payload)
}

macro_rules! uint_decodable {
    ($($ty:ty),*) => {$(
        impl Decodable for $ty {
            fn decode(buf: &mut &[u8]) -> Result<Self> {
                let payload = decode_integer_payload(buf, core::mem::size_of::<$ty>())?;
                let mut value: $ty = 0;
                for &byte in payload {
                    value = value.wrapping_shl(8) | byte as $ty;
                }
                Ok(value)
            }
        }
    )*};
}

uint_decodable!(u8, u16, u32, u64, u128, usize);

impl Decodable for U256 {
    fn decode(buf: &mut &[u8]) -> Result<Self> {
        let payload = decode_integer_payload(buf, 32)?;
        Self::from_be_slice(payload).map_err(|_| Error::Overflow)
    }
}

impl Decodable for B256 {
    fn decode(buf: &mut &[u8]) -> Result<Self> {
        let payload = decode_payload(buf)?;
        if payload.len() != 32 {
            return Err(Error::UnexpectedLength);
        }
        Ok(Self::from_slice(payload))
    }
}

impl Decodable for Address {
    fn decode(buf: &mut &[u8]) -> Result<Self> {
        let payload = decode_payload(buf)?;
        if payload.len() != 20 {
            return Err(Error::UnexpectedLength);
        }
        Ok(Self::from_slice(payload))
    }
}

impl Decodable for TxKind {
    fn decode(buf: &mut &[u8]) -> Result<Self> {
        let payload = decode_payload(buf)?;
        match payload.len() {
            0 => Ok(Self::Create),
            20 => Ok(Self::Call(Address::from_slice(payload))),
            _ => Err(Error::UnexpectedLength),
        }
    }
}

impl Decodable for Bytes {
    fn decode(buf: &mut &[u8]) -> Result<Self> {
        decode_payload(buf).map(Self::from)
    }
}

impl<T: Decodable> Decodable for Vec<T> {
    fn decode(buf: &mut &[u8]) -> Result<Self> {
        let header = Header::decode(buf)?;
        if !header.list {
            return Err(Error::UnexpectedString);
        }
        let (mut payload, rest) = buf.split_at(header.payload_length);
        *buf = rest;
        let mut items = Vec::new();
        while !payload.is_empty() {
            items.push(T::decode(&mut payload)?);
        }
        Ok(items)
    }
}

/// Decodes a value that must consume the entire buffer.
pub fn decode_exact<T: Decodable>(mut buf: &[u8]) -> Result<T> {
    let value = T::decode(&mut buf)?;
    if !buf.is_empty() {
        return Err(Error::UnexpectedLength);
    }
    Ok(value)
}
