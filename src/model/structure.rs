//! The intermediate structure graph handed to the marshalers.
//!
//! A [`Structure`] is built once per conversion call, validated as it
//! grows, and never mutated after it reaches a marshaler. Atom identity
//! is positional: bonds and stereo descriptors hold indexes into the
//! atom list, and those indexes are checked at insertion time so the
//! marshalers can rely on them unconditionally.

use thiserror::Error;

use super::atom::Atom;
use super::types::{BondStereo, BondType, Parity, StereoKind};
use super::{MAX_ATOMS, STEREO_NEIGHBORS};

/// Structural invariant violations caught while building a [`Structure`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    /// The engine cannot accept more than [`MAX_ATOMS`] atoms.
    #[error("structure exceeds the engine limit of {MAX_ATOMS} atoms")]
    TooManyAtoms,

    /// A bond or stereo descriptor referenced an atom index that does not
    /// exist in this structure.
    #[error("atom reference {index} out of range (structure has {atom_count} atoms)")]
    AtomOutOfRange { index: usize, atom_count: usize },
}

/// A bond between two atoms, referenced by index.
///
/// `origin`/`target` order is meaningful: the 2D wedge codes encode
/// which endpoint carries the sharp end, so endpoints are never
/// normalized or swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bond {
    pub origin: usize,
    pub target: usize,
    pub bond_type: BondType,
    pub stereo: BondStereo,
}

impl Bond {
    pub fn new(origin: usize, target: usize, bond_type: BondType) -> Self {
        Self {
            origin,
            target,
            bond_type,
            stereo: BondStereo::None,
        }
    }

    pub fn with_stereo(mut self, stereo: BondStereo) -> Self {
        self.stereo = stereo;
        self
    }
}

/// A 0D stereo descriptor: a central atom (absent for double-bond
/// entries), four ordered neighbor references, and a parity pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StereoParity {
    pub central_atom: Option<usize>,
    pub neighbors: [usize; STEREO_NEIGHBORS],
    pub kind: StereoKind,
    pub parity: Parity,
    /// Parity in the disconnected layer; stays `None` unless set.
    pub disconnected_parity: Parity,
}

impl StereoParity {
    pub fn tetrahedral(central: usize, neighbors: [usize; STEREO_NEIGHBORS], parity: Parity) -> Self {
        Self {
            central_atom: Some(central),
            neighbors,
            kind: StereoKind::Tetrahedral,
            parity,
            disconnected_parity: Parity::None,
        }
    }

    pub fn double_bond(neighbors: [usize; STEREO_NEIGHBORS], parity: Parity) -> Self {
        Self {
            central_atom: None,
            neighbors,
            kind: StereoKind::DoubleBond,
            parity,
            disconnected_parity: Parity::None,
        }
    }

    pub fn allene(central: usize, neighbors: [usize; STEREO_NEIGHBORS], parity: Parity) -> Self {
        Self {
            central_atom: Some(central),
            neighbors,
            kind: StereoKind::Allene,
            parity,
            disconnected_parity: Parity::None,
        }
    }

    pub fn with_disconnected_parity(mut self, parity: Parity) -> Self {
        self.disconnected_parity = parity;
        self
    }
}

/// An ordered atom list plus the bonds and stereo descriptors over it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    stereo: Vec<StereoParity>,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an atom and returns its index.
    pub fn add_atom(&mut self, atom: Atom) -> Result<usize, StructureError> {
        if self.atoms.len() >= MAX_ATOMS {
            return Err(StructureError::TooManyAtoms);
        }
        self.atoms.push(atom);
        Ok(self.atoms.len() - 1)
    }

    pub fn add_bond(&mut self, bond: Bond) -> Result<(), StructureError> {
        self.check_index(bond.origin)?;
        self.check_index(bond.target)?;
        self.bonds.push(bond);
        Ok(())
    }

    pub fn add_stereo(&mut self, stereo: StereoParity) -> Result<(), StructureError> {
        if let Some(central) = stereo.central_atom {
            self.check_index(central)?;
        }
        for &n in &stereo.neighbors {
            self.check_index(n)?;
        }
        self.stereo.push(stereo);
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), StructureError> {
        if index < self.atoms.len() {
            Ok(())
        } else {
            Err(StructureError::AtomOutOfRange {
                index,
                atom_count: self.atoms.len(),
            })
        }
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    #[inline]
    pub fn stereo_count(&self) -> usize {
        self.stereo.len()
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn stereo(&self) -> &[StereoParity] {
        &self.stereo
    }

    pub fn atom(&self, index: usize) -> &Atom {
        &self.atoms[index]
    }
}
