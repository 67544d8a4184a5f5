//! Transforms between the structure graph and the engine's flat arrays.
//!
//! [`forward`] flattens a [`Structure`](crate::model::structure::Structure)
//! into per-atom property records, compressed adjacency lists, and packed
//! stereo records. [`reverse`] rebuilds a validated structure from the
//! engine's dense output matrices. Both directions enforce the index and
//! consistency invariants the engine assumes but does not verify.

pub mod forward;
pub mod reverse;

use thiserror::Error;

use crate::model::structure::StructureError;
use crate::model::MAX_NEIGHBORS;

/// Marshaling failures, forward or reverse. None of these are
/// recoverable mid-call: no partial payload and no partial structure is
/// ever produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarshalError {
    /// An origin atom accumulated more bonds than the engine's
    /// per-atom adjacency array can hold.
    #[error("atom {atom} has more than {MAX_NEIGHBORS} bonds")]
    TooManyBonds { atom: usize },

    /// The two readings of one bond's type disagreed between the dense
    /// output matrices. Engine-contract violation or an indexing bug;
    /// never repaired.
    #[error("bond type mismatch between atoms {origin} and {target}: {forward} vs {reverse}")]
    BondTypeMismatch {
        origin: usize,
        target: usize,
        forward: i32,
        reverse: i32,
    },

    /// The two readings of one bond's 2D stereo disagreed.
    #[error("bond stereo mismatch between atoms {origin} and {target}: {forward} vs {reverse}")]
    BondStereoMismatch {
        origin: usize,
        target: usize,
        forward: i32,
        reverse: i32,
    },

    /// A bond-type code outside the closed table.
    #[error("unknown bond type code {code} between atoms {origin} and {target}")]
    UnknownBondType {
        origin: usize,
        target: usize,
        code: i32,
    },

    /// A bond-stereo code outside the closed table.
    #[error("unknown bond stereo code {code} between atoms {origin} and {target}")]
    UnknownBondStereo {
        origin: usize,
        target: usize,
        code: i32,
    },

    /// The engine reported an element symbol we cannot resolve.
    #[error("unknown element '{symbol}' for atom {atom}")]
    UnknownElement { atom: usize, symbol: String },

    /// A radical code outside the closed table.
    #[error("unknown radical code {code} for atom {atom}")]
    UnknownRadical { atom: usize, code: i32 },

    /// A stereo-kind code outside the closed table.
    #[error("unknown stereo kind code {code} in stereo record {index}")]
    UnknownStereoKind { index: usize, code: i32 },

    /// A packed parity byte whose halves are outside the parity table.
    #[error("unknown parity byte {byte:#04x} in stereo record {index}")]
    UnknownParity { index: usize, byte: u8 },

    /// A stereo record named a central atom that is neither the sentinel
    /// nor a valid index.
    #[error("invalid central atom code {code} in stereo record {index}")]
    InvalidStereoCentral { index: usize, code: i32 },

    /// Structural invariant violated while rebuilding (bad index from
    /// the engine, or atom count past the limit).
    #[error("invalid structure from engine output: {0}")]
    Structure(#[from] StructureError),
}
