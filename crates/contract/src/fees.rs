/// Fee inputs for a write call.
///
/// The variant picks the transaction shape. Suggesting values belongs to
/// higher layers; the pipeline consumes them as given.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fees {
    /// A legacy transaction with a single gas price.
    Legacy {
        /// Wei per unit of gas.
        gas_price: u128,
        /// Gas ceiling.
        gas_limit: u64,
    },
    /// A fee-market transaction with separate fee caps.
    Eip1559 {
        /// Total wei per gas the sender will pay.
        max_fee_per_gas: u128,
        /// Wei per gas paid to the block producer.
        max_priority_fee_per_gas: u128,
        /// Gas ceiling.
        gas_limit: u64,
    },
}

impl Fees {
    /// The gas ceiling, independent of variant.
    pub const fn gas_limit(&self) -> u64 {
        match self {
            Self::Legacy { gas_limit, .. } | Self::Eip1559 { gas_limit, .. } => *gas_limit,
        }
    }
}
