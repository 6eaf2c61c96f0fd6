use ingot_primitives::{Address, Bytes, Log, LogData, B256};
use ingot_rlp::{BufMut, Decodable, Encodable, Header};

/// The execution result of a transaction, as recorded in the block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Receipt {
    /// Whether execution succeeded.
    pub status: bool,
    /// Cumulative gas used in the block after this transaction.
    pub cumulative_gas_used: u128,
    /// The logs emitted during execution.
    pub logs: Vec<Log>,
}

impl Receipt {
    fn payload_length(&self) -> usize {
        (self.status as u8).length()
            + self.cumulative_gas_used.length()
            + logs_length(&self.logs)
    }
}

fn log_payload_length(log: &Log) -> usize {
    log.address.length() + ingot_rlp::list_length(log.topics()) + log.data.data.length()
}

fn encode_log(log: &Log, out: &mut dyn BufMut) {
    Header { list: true, payload_length: log_payload_length(log) }.encode(out);
    log.address.encode(out);
    ingot_rlp::encode_list(log.topics(), out);
    log.data.data.encode(out);
}

fn log_length(log: &Log) -> usize {
    let payload_length = log_payload_length(log);
    Header { list: true, payload_length }.length() + payload_length
}

fn logs_length(logs: &[Log]) -> usize {
    let payload_length: usize = logs.iter().map(log_length).sum();
    Header { list: true, payload_length }.length() + payload_length
}

fn decode_log(buf: &mut &[u8]) -> ingot_rlp::Result<Log> {
    let header = Header::decode(buf)?;
    if !header.list {
        return Err(ingot_rlp::Error::UnexpectedString);
    }
    let address = Address::decode(buf)?;
    let topics = Vec::<B256>::decode(buf)?;
    let data = Bytes::decode(buf)?;
    Ok(Log { address, data: LogData::new_unchecked(topics, data) })
}

impl Encodable for Receipt {
    fn encode(&self, out: &mut dyn BufMut) {
        Header { list: true, payload_length: self.payload_length() }.encode(out);
        (self.status as u8).encode(out);
        self.cumulative_gas_used.encode(out);
        let payload_length: usize = self.logs.iter().map(log_length).sum();
        Header { list: true, payload_length }.encode(out);
        for log in &self.logs {
            encode_log(log, out);
        }
    }

    fn length(&self) -> usize {
        let payload_length = self.payload_length();
        Header { list: true, payload_length }.length() + payload_length
    }
}

impl Decodable for Receipt {
    fn decode(buf: &mut &[u8]) -> ingot_rlp::Result<Self> {
        let header = Header::decode(buf)?;
        if !header.list {
            return Err(ingot_rlp::Error::UnexpectedString);
        }
        let original_len = buf.len();
        let status = u8::decode(buf)? != 0;
        let cumulative_gas_used = u128::decode(buf)?;

        let logs_header = Header::decode(buf)?;
        if !logs_header.list {
            return Err(ingot_rlp::Error::UnexpectedString);
        }
        let (mut logs_payload, rest) = buf.split_at(logs_header.payload_length);
        *buf = rest;
        let mut logs = Vec::new();
        while !logs_payload.is_empty() {
            logs.push(decode_log(&mut logs_payload)?);
        }

        let consumed = original_len - buf.len();
        if consumed != header.payload_length {
            return Err(ingot_rlp::Error::ListLengthMismatch {
                expected: header.payload_length,
                got: consumed,
            });
        }
        Ok(Self { status, cumulative_gas_used, logs })
    }
}
