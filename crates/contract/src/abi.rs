use ingot_primitives::{Bytes, B256};

/// Errors from the ABI collaborator.
#[derive(Debug, thiserror::Error)]
pub enum AbiError {
    /// Unknown function referenced.
    #[error("unknown function: function {0} does not exist")]
    UnknownFunction(String),
    /// Unknown event referenced.
    #[error("unknown event: event {0} does not exist")]
    UnknownEvent(String),
    /// The codec could not encode or decode a value.
    #[error(transparent)]
    Codec(#[from] Box<dyn std::error::Error + Send + Sync + 'static>),
}

/// An event decoded from a log record: the indexed fields recovered from
/// topics and the remaining fields recovered from the data section, both
/// in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedEvent<V> {
    /// `(parameter name, value)` for each indexed parameter.
    pub indexed: Vec<(String, V)>,
    /// `(parameter name, value)` for each non-indexed parameter.
    pub body: Vec<(String, V)>,
}

/// The ABI collaborator: turns function calls into call data and log
/// records back into values.
///
/// The ABI type system itself lives outside this crate; implementations
/// bring their own argument and value representation through
/// [`Value`](AbiCodec::Value), and this crate only moves byte strings.
pub trait AbiCodec: Send + Sync {
    /// The host representation of argument and decoded values.
    type Value: Send + Sync;

    /// Produces the call-data byte string for `function` applied to
    /// `args`.
    fn call_data(&self, function: &str, args: &[Self::Value]) -> Result<Bytes, AbiError>;

    /// The canonical signature of `event`, `Name(type1,type2,…)`, whose
    /// Keccak-256 digest is the log's first topic.
    fn event_signature(&self, event: &str) -> Result<String, AbiError>;

    /// Number of indexed parameters `event` declares.
    fn indexed_count(&self, event: &str) -> Result<usize, AbiError>;

    /// Decodes a log's remaining topics and data section.
    fn decode_event(
        &self,
        event: &str,
        indexed_topics: &[B256],
        data: &[u8],
    ) -> Result<DecodedEvent<Self::Value>, AbiError>;
}
