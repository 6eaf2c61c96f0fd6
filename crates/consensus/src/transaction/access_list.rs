use ingot_primitives::{Address, B256};
use ingot_rlp::{BufMut, Decodable, Encodable, Header};

/// An address with the storage keys it expects to touch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AccessListItem {
    /// The account being pre-warmed.
    pub address: Address,
    /// Its declared storage slots, in declaration order.
    pub storage_keys: Vec<B256>,
}

impl Encodable for AccessListItem {
    fn encode(&self, out: &mut dyn BufMut) {
        let payload_length = self.address.length() + self.storage_keys.length();
        Header { list: true, payload_length }.encode(out);
        self.address.encode(out);
        self.storage_keys.encode(out);
    }

    fn length(&self) -> usize {
        let payload_length = self.address.length() + self.storage_keys.length();
        Header { list: true, payload_length }.length() + payload_length
    }
}

impl Decodable for AccessListItem {
    fn decode(buf: &mut &[u8]) -> ingot_rlp::Result<Self> {
        let header = Header::decode(buf)?;
        if !header.list {
            return Err(ingot_rlp::Error::UnexpectedString);
        }
        let original_len = buf.len();
        let item = Self {
            address: Decodable::decode(buf)?,
            storage_keys: Decodable::decode(buf)?,
        };
        if original_len - buf.len() != header.payload_length {
            return Err(ingot_rlp::Error::ListLengthMismatch {
                expected: header.payload_length,
                got: original_len - buf.len(),
            });
        }
        Ok(item)
    }
}

/// The ordered access list of a fee-market transaction. May be empty, but
/// is always present in the serialization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccessList(pub Vec<AccessListItem>);

impl AccessList {
    /// Whether no accounts are declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Encodable for AccessList {
    fn encode(&self, out: &mut dyn BufMut) {
        self.0.encode(out)
    }

    fn length(&self) -> usize {
        self.0.length()
    }
}

impl Decodable for AccessList {
    fn decode(buf: &mut &[u8]) -> ingot_rlp::Result<Self> {
        Decodable::decode(buf).map(Self)
    }
}

impl From<Vec<AccessListItem>> for AccessList {
    fn from(items: Vec<AccessListItem>) -> Self {
        Self(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_is_c0() {
        assert_eq!(ingot_rlp::encode(AccessList::default()), vec![0xc0]);
    }

    #[test]
    fn item_round_trip() {
        let item = AccessListItem {
            address: "0x0000000000000000000000000000000000000011".parse().unwrap(),
            storage_keys: vec![
                "0x000000000000000000000000000000000000000000000000000000000000dead"
                    .parse()
                    .unwrap(),
            ],
        };
        let list = AccessList(vec![item]);
        let encoded = ingot_rlp::encode(&list);
        assert_eq!(ingot_rlp::decode_exact::<AccessList>(&encoded).unwrap(), list);
    }
}
