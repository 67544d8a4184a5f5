//! A bidirectional marshaling layer between chemistry-graph toolkits and a
//! native canonical-identifier engine.
//!
//! The engine itself (canonical labeling, stereo perception, identifier
//! layout) is an external black box reachable only through a flat-array
//! call contract. This crate owns everything around that contract:
//!
//! - **Structure model** — The intermediate atom/bond/stereo graph every
//!   other component speaks ([`model`]).
//! - **Marshalers** — The forward transform into per-atom property
//!   records, compressed adjacency lists, and packed stereo records, and
//!   the reverse transform from the engine's dense output matrices back
//!   into a validated graph ([`marshal`]).
//! - **Option canonicalizer** — The engine's closed option vocabulary,
//!   normalized to canonical case and the platform switch character
//!   ([`options`]).
//! - **Engine handle** — Session lifecycle, the return-status taxonomy,
//!   and a bounded-wait gate serializing every call to the one shared,
//!   non-reentrant native resource ([`engine`]).
//! - **Adapters** — One generic conversion algorithm between toolkit
//!   molecules and the structure model, bound to two toolkit APIs
//!   ([`adapter`]).
//!
//! # Quick start
//!
//! Convert a toolkit molecule into the intermediate structure and prepare
//! engine options:
//!
//! ```
//! use canon_bridge::adapter::structure_from_molecule;
//! use canon_bridge::adapter::table::{TableAtom, TableBond, TableMolecule};
//! use canon_bridge::model::types::Element;
//! use canon_bridge::options;
//!
//! // Methanol with all hydrogens implicit in the stored totals.
//! let mut mol = TableMolecule::new();
//! mol.atoms.push(TableAtom::new(Element::C).with_total_h(3));
//! mol.atoms.push(TableAtom::new(Element::O).with_total_h(1));
//! mol.bonds.push(TableBond::new(0, 1, 1));
//!
//! let structure = structure_from_molecule(&mol)?;
//! assert_eq!(structure.atom_count(), 2);
//! assert_eq!(structure.atom(0).implicit_h, 3);
//!
//! // Free-form options normalize to canonical case, idempotently.
//! let opts = options::canonicalize("-snon /FIXEDH")?;
//! assert_eq!(options::canonicalize(&opts)?, opts);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! With a backend implementing the session contracts in
//! [`engine::session`], the full path is
//! [`Engine::generate`](engine::Engine::generate) /
//! [`Engine::parse`](engine::Engine::parse): canonicalize options, take
//! the gate, marshal, run, validate, release. Engine-held state is freed
//! on every exit path.
//!
//! # What this crate never does
//!
//! It does not load native libraries, reimplement any part of the
//! engine's algorithm, or repair inconsistent data. A bond matrix that
//! disagrees with its transpose or a code outside a closed table is a
//! typed, fatal error, never a guess.

pub mod adapter;
pub mod engine;
pub mod marshal;
pub mod model;
pub mod options;

pub use adapter::{
    molecule_from_structure, structure_from_molecule, AdapterError, MoleculeSink, MoleculeSource,
};
pub use engine::{
    Engine, EngineBackend, EngineError, GenerateOutput, ParseOutput, ReturnStatus, WarningFlags,
};
pub use marshal::MarshalError;
pub use model::atom::Atom;
pub use model::structure::{Bond, StereoParity, Structure, StructureError};
pub use model::types::{BondStereo, BondType, Element, Parity, Radical, StereoKind};
pub use options::{EngineOption, OptionError};
