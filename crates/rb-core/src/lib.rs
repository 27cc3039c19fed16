pub mod types;
pub mod error;
pub mod frequency;
pub mod histogram;
pub mod entropy;
pub mod hexstream;
pub mod reduce;

pub use types::*;
pub use error::{Error, NotReducibleReason, Result};
pub use frequency::{analyze, blocks, select_mode, BlockStats, FrequencyTable};
pub use histogram::ByteHistogram;
pub use entropy::{block_entropies, shannon_entropy, EntropyProfile};
pub use hexstream::{strip_hex_occurrences, to_hex, Stripped};
pub use reduce::{reduce, ReduceOptions, Reducer, ReductionResult, ReductionSummary};
