use crate::{AccessList, SignableTransaction, Signed, Transaction};
use ingot_primitives::{Bytes, ChainId, Signature, TxKind, U256};
use ingot_rlp::{BufMut, Decodable, Encodable, Header};

/// Fee-market (type 2) transaction.
///
/// Serialized as `0x02 || rlp(fields)`; the type byte is a literal prefix,
/// not part of the RLP payload. The recovery bit travels as the bare
/// y-parity integer inside the list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TxEip1559 {
    /// The chain this transaction is bound to. Required to sign; zero
    /// means unset.
    pub chain_id: ChainId,
    /// The sender's sequence number.
    pub nonce: u64,
    /// Wei per gas paid to the block producer, on top of the base fee.
    pub max_priority_fee_per_gas: u128,
    /// Total wei per gas the sender is willing to pay.
    pub max_fee_per_gas: u128,
    /// Gas ceiling for execution.
    pub gas_limit: u64,
    /// Recipient, or [`TxKind::Create`] for contract creation.
    pub to: TxKind,
    /// Wei transferred.
    pub value: U256,
    /// Call data, or initcode for contract creation.
    pub input: Bytes,
    /// Pre-warmed accounts and storage keys; always serialized, possibly
    /// empty.
    pub access_list: AccessList,
}

impl TxEip1559 {
    /// The EIP-2718 type byte.
    pub const TX_TYPE: u8 = 0x02;

    fn fields_len(&self) -> usize {
        self.chain_id.length()
            + self.nonce.length()
            + self.max_priority_fee_per_gas.length()
            + self.max_fee_per_gas.length()
            + self.gas_limit.length()
            + self.to.length()
            + self.value.length()
            + self.input.length()
            + self.access_list.length()
    }

    fn encode_fields(&self, out: &mut dyn BufMut) {
        self.chain_id.encode(out);
        self.nonce.encode(out);
        self.max_priority_fee_per_gas.encode(out);
        self.max_fee_per_gas.encode(out);
        self.gas_limit.encode(out);
        self.to.encode(out);
        self.value.encode(out);
        self.input.encode(out);
        self.access_list.encode(out);
    }

    /// The y-parity bit for the wire form. A signature whose `v` does not
    /// decode in this transaction's context falls back to its low bit.
    fn y_parity(&self, signature: &Signature) -> u64 {
        signature
            .recovery_id(Transaction::chain_id(self))
            .map(u64::from)
            .unwrap_or(signature.v() & 1)
    }

    /// Decodes the payload of a signed type-2 transaction: the RLP list
    /// after the type byte, with `y_parity, r, s` at the tail.
    pub fn decode_signed_fields(buf: &mut &[u8]) -> ingot_rlp::Result<Signed<Self>> {
        let header = Header::decode(buf)?;
        if !header.list {
            return Err(ingot_rlp::Error::UnexpectedString);
        }
        let original_len = buf.len();

        let tx = Self {
            chain_id: Decodable::decode(buf)?,
            nonce: Decodable::decode(buf)?,
            max_priority_fee_per_gas: Decodable::decode(buf)?,
            max_fee_per_gas: Decodable::decode(buf)?,
            gas_limit: Decodable::decode(buf)?,
            to: Decodable::decode(buf)?,
            value: Decodable::decode(buf)?,
            input: Decodable::decode(buf)?,
            access_list: Decodable::decode(buf)?,
        };
        let y_parity = u64::decode(buf)?;
        if y_parity > 1 {
            return Err(ingot_rlp::Error::Custom("y parity must be 0 or 1"));
        }
        let r = U256::decode(buf)?;
        let s = U256::decode(buf)?;

        let consumed = original_len - buf.len();
        if consumed != header.payload_length {
            return Err(ingot_rlp::Error::ListLengthMismatch {
                expected: header.payload_length,
                got: consumed,
            });
        }
        Ok(tx.into_signed(Signature::new(r, s, y_parity)))
    }
}

impl Transaction for TxEip1559 {
    fn chain_id(&self) -> Option<ChainId> {
        (self.chain_id != 0).then_some(self.chain_id)
    }

    fn nonce(&self) -> u64 {
        self.nonce
    }

    fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    fn gas_price(&self) -> Option<u128> {
        None
    }

    fn to(&self) -> TxKind {
        self.to
    }

    fn value(&self) -> U256 {
        self.value
    }

    fn input(&self) -> &[u8] {
        &self.input
    }
}

impl SignableTransaction for TxEip1559 {
    fn set_chain_id(&mut self, chain_id: ChainId) {
        self.chain_id = chain_id;
    }

    fn requires_chain_id(&self) -> bool {
        true
    }

    fn encode_for_signing(&self, out: &mut dyn BufMut) {
        out.put_u8(Self::TX_TYPE);
        Header { list: true, payload_length: self.fields_len() }.encode(out);
        self.encode_fields(out);
    }

    fn payload_len_for_signature(&self) -> usize {
        let payload_length = self.fields_len();
        1 + Header { list: true, payload_length }.length() + payload_length
    }

    fn encode_signed(&self, signature: &Signature, out: &mut dyn BufMut) {
        let y_parity = self.y_parity(signature);
        let payload_length =
            self.fields_len() + ingot_rlp::signature_vrs_length(signature, y_parity);
        out.put_u8(Self::TX_TYPE);
        Header { list: true, payload_length }.encode(out);
        self.encode_fields(out);
        ingot_rlp::encode_signature_vrs(signature, y_parity, out);
    }
}

impl Encodable for TxEip1559 {
    fn encode(&self, out: &mut dyn BufMut) {
        self.encode_for_signing(out)
    }

    fn length(&self) -> usize {
        self.payload_len_for_signature()
    }
}
