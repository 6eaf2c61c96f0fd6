use crate::{SignableTransaction, Signed, Transaction};
use ingot_primitives::{parity, Bytes, ChainId, Signature, TxKind, U256};
use ingot_rlp::{BufMut, Decodable, Encodable, Header};

/// Legacy transaction.
///
/// The chain id is not a wire field of the unsigned transaction; it selects
/// the signing image. `Some(c)` with `c > 0` produces the replay-protected
/// nine-item image of [EIP-155], `None` (or zero) the original six-item
/// image. The caller chooses the variant explicitly; nothing is inferred
/// from the signature.
///
/// [EIP-155]: https://eips.ethereum.org/EIPS/eip-155
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TxLegacy {
    /// EIP-155 replay protection chain id, if any.
    pub chain_id: Option<ChainId>,
    /// The sender's sequence number.
    pub nonce: u64,
    /// Wei paid per unit of gas.
    pub gas_price: u128,
    /// Gas ceiling for execution.
    pub gas_limit: u64,
    /// Recipient, or [`TxKind::Create`] for contract creation.
    pub to: TxKind,
    /// Wei transferred.
    pub value: U256,
    /// Call data, or initcode for contract creation.
    pub input: Bytes,
}

impl TxLegacy {
    /// The chain id, with zero normalized to "unset".
    fn effective_chain_id(&self) -> Option<ChainId> {
        self.chain_id.filter(|c| *c > 0)
    }

    /// Length of the six base fields, without the list header and without
    /// the EIP-155 suffix.
    fn fields_len(&self) -> usize {
        self.nonce.length()
            + self.gas_price.length()
            + self.gas_limit.length()
            + self.to.length()
            + self.value.length()
            + self.input.length()
    }

    /// Writes the six base fields.
    fn encode_fields(&self, out: &mut dyn BufMut) {
        self.nonce.encode(out);
        self.gas_price.encode(out);
        self.gas_limit.encode(out);
        self.to.encode(out);
        self.value.encode(out);
        self.input.encode(out);
    }

    /// Length of the EIP-155 suffix: the chain id and two empty strings.
    fn eip155_fields_len(&self) -> usize {
        match self.effective_chain_id() {
            Some(chain_id) => chain_id.length() + 2,
            None => 0,
        }
    }

    /// The wire `v` for this transaction's variant: EIP-155 when a chain id
    /// is set, the `27 + r` pair otherwise. A `v` that does not decode in
    /// this context is written through unchanged.
    fn wire_v(&self, signature: &Signature) -> u64 {
        match signature.recovery_id(self.effective_chain_id()) {
            Ok(recovery_id) => match self.effective_chain_id() {
                Some(chain_id) => parity::eip155_v(recovery_id, chain_id),
                None => parity::legacy_v(recovery_id),
            },
            Err(_) => signature.v(),
        }
    }

    /// Decodes the signed wire form: a list of the six fields followed by
    /// `v, r, s`. The chain id is recovered from `v` when present.
    pub fn decode_signed_fields(buf: &mut &[u8]) -> ingot_rlp::Result<Signed<Self>> {
        let header = Header::decode(buf)?;
        if !header.list {
            return Err(ingot_rlp::Error::UnexpectedString);
        }
        let original_len = buf.len();

        let mut tx = Self {
            chain_id: None,
            nonce: Decodable::decode(buf)?,
            gas_price: Decodable::decode(buf)?,
            gas_limit: Decodable::decode(buf)?,
            to: Decodable::decode(buf)?,
            value: Decodable::decode(buf)?,
            input: Decodable::decode(buf)?,
        };
        let v = u64::decode(buf)?;
        let r = U256::decode(buf)?;
        let s = U256::decode(buf)?;
        if v >= 35 {
            tx.chain_id = Some((v - 35) / 2);
        }

        let consumed = original_len - buf.len();
        if consumed != header.payload_length {
            return Err(ingot_rlp::Error::ListLengthMismatch {
                expected: header.payload_length,
                got: consumed,
            });
        }
        Ok(tx.into_signed(Signature::new(r, s, v)))
    }
}

impl Transaction for TxLegacy {
    fn chain_id(&self) -> Option<ChainId> {
        self.effective_chain_id()
    }

    fn nonce(&self) -> u64 {
        self.nonce
    }

    fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    fn gas_price(&self) -> Option<u128> {
        Some(self.gas_price)
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

impl SignableTransaction for TxLegacy {
    fn set_chain_id(&mut self, chain_id: ChainId) {
        self.chain_id = Some(chain_id);
    }

    fn encode_for_signing(&self, out: &mut dyn BufMut) {
        let payload_length = self.fields_len() + self.eip155_fields_len();
        Header { list: true, payload_length }.encode(out);
        self.encode_fields(out);
        if let Some(chain_id) = self.effective_chain_id() {
            chain_id.encode(out);
            0u8.encode(out);
            0u8.encode(out);
        }
    }

    fn payload_len_for_signature(&self) -> usize {
        let payload_length = self.fields_len() + self.eip155_fields_len();
        Header { list: true, payload_length }.length() + payload_length
    }

    fn encode_signed(&self, signature: &Signature, out: &mut dyn BufMut) {
        let v = self.wire_v(signature);
        let payload_length =
            self.fields_len() + ingot_rlp::signature_vrs_length(signature, v);
        Header { list: true, payload_length }.encode(out);
        self.encode_fields(out);
        ingot_rlp::encode_signature_vrs(signature, v, out);
    }
}

impl Encodable for TxLegacy {
    fn encode(&self, out: &mut dyn BufMut) {
        self.encode_for_signing(out)
    }

    fn length(&self) -> usize {
        self.payload_len_for_signature()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ingot_primitives::Address;

    /// The example transaction from the EIP-155 text: chain 1, nonce 9,
    /// 20 gwei gas price, 21000 gas, 1 ether to 0x3535…35.
    fn eip155_example() -> TxLegacy {
        TxLegacy {
            chain_id: Some(1),
            nonce: 9,
            gas_price: 20_000_000_000,
            gas_limit: 21_000,
            to: TxKind::Call("0x3535353535353535353535353535353535353535".parse().unwrap()),
            value: U256::from(1_000_000_000_000_000_000u64),
            input: Bytes::new(),
        }
    }

    #[test]
    fn eip155_signing_image() {
        let tx = eip155_example();
        assert_eq!(
            hex::encode(tx.encoded_for_signing()),
            "ec098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a764000080018080"
        );
        assert_eq!(
            tx.signature_hash().to_string(),
            "0xdaf5a779ae972f972197303d7b574746c7ef83eadac0f2791ad23db92e4c8e53"
        );
        assert_eq!(tx.payload_len_for_signature(), tx.encoded_for_signing().len());
    }

    #[test]
    fn pre_replay_protection_image_has_six_items() {
        let mut tx = eip155_example();
        tx.chain_id = None;
        let image = tx.encoded_for_signing();
        // a list of the six fields only
        assert_eq!(
            hex::encode(&image),
            "e9098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a764000080"
        );
        // zero chain id selects the same variant
        tx.chain_id = Some(0);
        assert_eq!(tx.encoded_for_signing(), image);
    }

    #[test]
    fn signed_wire_form() {
        let signature = Signature::new(
            "0x28ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276".parse().unwrap(),
            "0x67cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83".parse().unwrap(),
            0,
        );
        let signed = eip155_example().into_signed(signature);
        assert_eq!(
            hex::encode(signed.wire_bytes()),
            "f86c098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a76400008025a028ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276a067cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83"
        );
        assert_eq!(
            signed.hash().to_string(),
            "0x33469b22e9f636356c4160a87eb19df52b7412e8eac32a4a55ffe88ea8350788"
        );
    }

    #[test]
    fn attaching_a_signature_does_not_mutate() {
        let tx = eip155_example();
        let copy = tx.clone();
        let signed = tx.into_signed(Signature::new(U256::ONE, U256::ONE, 37));
        assert_eq!(signed.tx(), &copy);
    }

    #[test]
    fn decode_signed_round_trip() {
        let signature = Signature::new(
            "0x28ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276".parse().unwrap(),
            "0x67cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83".parse().unwrap(),
            0,
        );
        let signed = eip155_example().into_signed(signature);
        let wire = signed.wire_bytes();
        let decoded = TxLegacy::decode_signed_fields(&mut wire.as_slice()).unwrap();
        assert_eq!(decoded.tx(), signed.tx());
        assert_eq!(decoded.hash(), signed.hash());
        assert_eq!(decoded.signature().v(), 37);
    }

    #[test]
    fn recovers_the_eip155_signer() {
        let raw = hex::decode(
            "f86c098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a76400008025a028ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276a067cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83",
        )
        .unwrap();
        let signed = TxLegacy::decode_signed_fields(&mut raw.as_slice()).unwrap();
        let expected: Address = "0x9d8A62f656a8d1615C1294fd71e9CFb3E4855A4F".parse().unwrap();
        assert_eq!(signed.recover_signer().unwrap(), expected);
    }

    #[test]
    fn contract_creation_encodes_an_empty_recipient() {
        let tx = TxLegacy {
            chain_id: Some(1),
            nonce: 0,
            gas_price: 1_000_000_000,
            gas_limit: 100_000,
            to: TxKind::Create,
            value: U256::ZERO,
            input: Bytes::from(vec![0x60, 0x00]),
        };
        assert!(tx.is_contract_creation());
        assert_eq!(
            hex::encode(tx.encoded_for_signing()),
            "d280843b9aca00830186a08080826000018080"
        );
    }
}
