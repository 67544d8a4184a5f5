//! Core data structures for the structure graph exchanged with the engine.
//!
//! This module provides the intermediate model that every other component
//! of `canon-bridge` speaks:
//!
//! - [`atom`] – Per-atom properties: coordinates, element, charge, isotope,
//!   radical state, implicit hydrogen counts.
//! - [`types`] – Periodic table elements and the closed wire-code tables
//!   (bond type, 2D bond stereo, radical, stereo kind, parity).
//! - [`structure`] – The validated atom/bond/stereo graph built once per
//!   conversion call.
//!
//! The model deliberately carries nothing toolkit-specific and nothing
//! engine-session-specific: adapters build it from toolkit graphs, the
//! marshalers flatten it into the engine's arrays and reconstruct it from
//! them, and it is discarded when the call completes.

pub mod atom;
pub mod structure;
pub mod types;

/// Engine limit on the number of atoms in one structure.
pub const MAX_ATOMS: usize = 1024;

/// Engine limit on the length of one atom's neighbor (bond) array.
pub const MAX_NEIGHBORS: usize = 20;

/// A 0D stereo descriptor always names exactly four neighbors.
pub const STEREO_NEIGHBORS: usize = 4;
