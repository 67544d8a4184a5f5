//! Toolkit graph ↔ structure conversion.
//!
//! Different chemistry toolkits disagree on surface API but not on what
//! the engine needs from them. The conversion is therefore written once,
//! against the minimal capability traits [`MoleculeSource`] and
//! [`MoleculeSink`]; a toolkit binding only answers property reads and
//! constructs its native atoms and bonds. Two bindings ship in this
//! crate: a petgraph molecule ([`graph`]) and a flat atom/bond table
//! ([`table`]).
//!
//! Three rules of the shared algorithm, all enforced here and nowhere
//! else:
//!
//! - **Coordinates are all-or-nothing.** 3D is used only when every atom
//!   has it, else 2D (z = 0) only when every atom has that, else zeros
//!   for the whole graph. One incomplete atom demotes every atom; there
//!   is no per-atom fallback.
//! - **Hydrogen counts never double-count.** A toolkit storing combined
//!   totals has the explicit H neighbors subtracted on the way in and
//!   added back on the way out; a negative difference is an input error.
//! - **Bond vocabularies are closed.** Orders outside
//!   {single, double, triple, aromatic} and unknown wedge markers do not
//!   pass; they fail, they are not guessed.

pub mod graph;
pub mod table;

use std::collections::HashMap;
use std::hash::Hash;

use thiserror::Error;

use crate::model::atom::Atom;
use crate::model::structure::{Bond, Structure, StructureError};
use crate::model::types::{BondStereo, BondType, Element, Radical};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    /// A stored total hydrogen count was smaller than the number of
    /// explicitly modeled H neighbors.
    #[error(
        "inconsistent hydrogen count on atom {atom}: stored total {total} \
         is less than {explicit} explicit hydrogen neighbor(s)"
    )]
    InconsistentHydrogenCount {
        atom: usize,
        total: u32,
        explicit: u32,
    },

    /// A bond order outside the closed {single, double, triple,
    /// aromatic} table.
    #[error("unsupported bond order: {0}")]
    UnsupportedBondOrder(String),

    /// The converted graph violated a structural limit.
    #[error("structure limit violated: {0}")]
    Structure(#[from] StructureError),
}

/// How a source toolkit stores per-atom hydrogen counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrogenCount {
    /// Count of hydrogens that are not graph nodes; taken as-is.
    Implicit(u32),
    /// Combined count including explicitly modeled H neighbors; the
    /// explicit ones are subtracted before marshaling.
    Total(u32),
    /// Nothing stored; treated as zero implicit hydrogens.
    Unspecified,
}

/// Toolkit bond order, normalized to the closed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceBondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
}

impl From<SourceBondOrder> for BondType {
    fn from(order: SourceBondOrder) -> Self {
        match order {
            SourceBondOrder::Single => BondType::Single,
            SourceBondOrder::Double => BondType::Double,
            SourceBondOrder::Triple => BondType::Triple,
            SourceBondOrder::Aromatic => BondType::Alternating,
        }
    }
}

impl From<BondType> for SourceBondOrder {
    fn from(bond_type: BondType) -> Self {
        match bond_type {
            BondType::Single => SourceBondOrder::Single,
            BondType::Double => SourceBondOrder::Double,
            BondType::Triple => SourceBondOrder::Triple,
            BondType::Alternating => SourceBondOrder::Aromatic,
        }
    }
}

/// Toolkit wedge/hatch marker on a bond, as drawn.
///
/// `Inverted` variants put the sharp end of the wedge on the second
/// endpoint instead of the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Wedge {
    #[default]
    None,
    Up,
    Down,
    UpInverted,
    DownInverted,
    Either,
}

/// Maps a wedge marker onto the engine's 2D stereo vocabulary.
///
/// "Either" is order-sensitive: undefined stereo on a double bond is a
/// different wire code than on a single-bond stereocenter, and other
/// orders carry no marker at all.
fn wedge_to_stereo(wedge: Wedge, order: SourceBondOrder) -> BondStereo {
    match wedge {
        Wedge::None => BondStereo::None,
        Wedge::Up => BondStereo::OneUp,
        Wedge::Down => BondStereo::OneDown,
        Wedge::UpInverted => BondStereo::TwoUp,
        Wedge::DownInverted => BondStereo::TwoDown,
        Wedge::Either => match order {
            SourceBondOrder::Single => BondStereo::OneEither,
            SourceBondOrder::Double => BondStereo::DoubleEither,
            _ => BondStereo::None,
        },
    }
}

fn stereo_to_wedge(stereo: BondStereo) -> Wedge {
    match stereo {
        BondStereo::None => Wedge::None,
        BondStereo::OneUp => Wedge::Up,
        BondStereo::OneDown => Wedge::Down,
        BondStereo::TwoUp => Wedge::UpInverted,
        BondStereo::TwoDown => Wedge::DownInverted,
        BondStereo::OneEither | BondStereo::TwoEither | BondStereo::DoubleEither => Wedge::Either,
    }
}

/// A bond read from a source toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceBond<Id> {
    pub origin: Id,
    pub target: Id,
    pub order: SourceBondOrder,
    pub wedge: Wedge,
}

/// Read capability over a toolkit molecule.
pub trait MoleculeSource {
    type AtomId: Copy + Eq + Hash;

    /// Atoms in a stable order; positions in this list become the
    /// structure's atom indices.
    fn atom_ids(&self) -> Vec<Self::AtomId>;

    fn element(&self, atom: Self::AtomId) -> Element;
    fn charge(&self, atom: Self::AtomId) -> i32;
    fn isotopic_mass(&self, atom: Self::AtomId) -> i32;
    fn radical(&self, atom: Self::AtomId) -> Radical;
    fn hydrogen_count(&self, atom: Self::AtomId) -> HydrogenCount;

    fn position_3d(&self, atom: Self::AtomId) -> Option<[f64; 3]>;
    fn position_2d(&self, atom: Self::AtomId) -> Option<[f64; 2]>;

    /// All bonds, with orders already normalized to the closed
    /// vocabulary; a binding fails here on anything it cannot map.
    fn bonds(&self) -> Result<Vec<SourceBond<Self::AtomId>>, AdapterError>;
}

/// Construction capability over a toolkit molecule.
pub trait MoleculeSink {
    type AtomId: Copy;

    fn add_atom(
        &mut self,
        element: Element,
        charge: i32,
        isotopic_mass: i32,
        radical: Radical,
        implicit_h: u32,
    ) -> Self::AtomId;

    fn add_bond(
        &mut self,
        origin: Self::AtomId,
        target: Self::AtomId,
        order: SourceBondOrder,
        wedge: Wedge,
    );

    /// Second pass after all bonds exist: fold `explicit_h` explicitly
    /// modeled hydrogen neighbors back into the atom's stored count.
    /// Bindings that store implicit-only counts ignore this.
    fn absorb_explicit_hydrogens(&mut self, atom: Self::AtomId, explicit_h: u32);
}

/// Builds a [`Structure`] from any [`MoleculeSource`].
pub fn structure_from_molecule<M: MoleculeSource>(mol: &M) -> Result<Structure, AdapterError> {
    let ids = mol.atom_ids();
    let bonds = mol.bonds()?;

    let all_3d = ids.iter().all(|&a| mol.position_3d(a).is_some());
    let all_2d = ids.iter().all(|&a| mol.position_2d(a).is_some());

    let mut explicit_h: HashMap<M::AtomId, u32> = HashMap::new();
    for bond in &bonds {
        if mol.element(bond.target).is_hydrogen() {
            *explicit_h.entry(bond.origin).or_default() += 1;
        }
        if mol.element(bond.origin).is_hydrogen() {
            *explicit_h.entry(bond.target).or_default() += 1;
        }
    }

    let mut structure = Structure::new();
    let mut index: HashMap<M::AtomId, usize> = HashMap::with_capacity(ids.len());

    for (i, &id) in ids.iter().enumerate() {
        let (x, y, z) = if all_3d {
            let [x, y, z] = mol.position_3d(id).unwrap_or([0.0, 0.0, 0.0]);
            (x, y, z)
        } else if all_2d {
            let [x, y] = mol.position_2d(id).unwrap_or([0.0, 0.0]);
            (x, y, 0.0)
        } else {
            (0.0, 0.0, 0.0)
        };

        let mut atom = Atom::new(mol.element(id), x, y, z);
        atom.charge = mol.charge(id);
        atom.isotopic_mass = mol.isotopic_mass(id);
        atom.radical = mol.radical(id);
        atom.implicit_h = match mol.hydrogen_count(id) {
            HydrogenCount::Implicit(n) => n,
            HydrogenCount::Total(total) => {
                let explicit = explicit_h.get(&id).copied().unwrap_or(0);
                total.checked_sub(explicit).ok_or(
                    AdapterError::InconsistentHydrogenCount {
                        atom: i,
                        total,
                        explicit,
                    },
                )?
            }
            HydrogenCount::Unspecified => 0,
        };

        let assigned = structure.add_atom(atom)?;
        index.insert(id, assigned);
    }

    for bond in bonds {
        let origin = index[&bond.origin];
        let target = index[&bond.target];
        let stereo = wedge_to_stereo(bond.wedge, bond.order);
        structure.add_bond(Bond::new(origin, target, BondType::from(bond.order)).with_stereo(stereo))?;
    }

    Ok(structure)
}

/// Materializes a [`Structure`] into any [`MoleculeSink`].
///
/// Returns the sink's atom handles in structure-index order. The
/// explicit-hydrogen add-back mirrors the subtraction done on the way
/// in, so a round trip preserves the chemistry even though the objects
/// differ.
pub fn molecule_from_structure<M: MoleculeSink>(
    structure: &Structure,
    sink: &mut M,
) -> Vec<M::AtomId> {
    let mut handles = Vec::with_capacity(structure.atom_count());
    for atom in structure.atoms() {
        handles.push(sink.add_atom(
            atom.element,
            atom.charge,
            atom.isotopic_mass,
            atom.radical,
            atom.implicit_h,
        ));
    }

    let mut explicit_h = vec![0u32; structure.atom_count()];
    for bond in structure.bonds() {
        sink.add_bond(
            handles[bond.origin],
            handles[bond.target],
            SourceBondOrder::from(bond.bond_type),
            stereo_to_wedge(bond.stereo),
        );
        if structure.atom(bond.target).element.is_hydrogen() {
            explicit_h[bond.origin] += 1;
        }
        if structure.atom(bond.origin).element.is_hydrogen() {
            explicit_h[bond.target] += 1;
        }
    }

    for (i, &count) in explicit_h.iter().enumerate() {
        if count > 0 {
            sink.absorb_explicit_hydrogens(handles[i], count);
        }
    }

    handles
}
