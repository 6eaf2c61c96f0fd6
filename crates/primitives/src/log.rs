use crate::{Address, Bytes, B256};

/// The topics and data of a log record, without the emitting address.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogData {
    topics: Vec<B256>,
    /// The non-indexed payload.
    pub data: Bytes,
}

impl LogData {
    /// Creates log data without validating the topic count.
    pub const fn new_unchecked(topics: Vec<B256>, data: Bytes) -> Self {
        Self { topics, data }
    }

    /// The indexed topics. The first topic of a non-anonymous event is the
    /// hash of its canonical signature.
    pub fn topics(&self) -> &[B256] {
        &self.topics
    }
}

/// A log record emitted during transaction execution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Log {
    /// The account that emitted the log.
    pub address: Address,
    /// Topics and data.
    pub data: LogData,
}

impl Log {
    /// Shorthand for the inner topics.
    pub fn topics(&self) -> &[B256] {
        self.data.topics()
    }
}

impl AsRef<LogData> for Log {
    fn as_ref(&self) -> &LogData {
        &self.data
    }
}
