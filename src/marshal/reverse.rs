//! Flat engine output → validated structure.
//!
//! The engine reports every bond from both endpoints. The two readings
//! are spread into dense `[atom][atom]` matrices and compared pairwise;
//! any disagreement is fatal. A mismatch means either the engine broke
//! its own contract or an index was corrupted in transit; both are
//! bugs, never data to be repaired.

use std::str::FromStr;

use crate::engine::session::{ParseSession, NO_ATOM};
use crate::model::atom::Atom;
use crate::model::structure::{Bond, StereoParity, Structure};
use crate::model::types::{BondStereo, BondType, Element, Parity, Radical, StereoKind};
use crate::model::STEREO_NEIGHBORS;

use super::MarshalError;

/// Rebuilds a structure from a parse session's per-index getters.
///
/// Coordinates are zero-filled: the reverse direction of the engine
/// carries no geometry.
pub fn unmarshal<S: ParseSession + ?Sized>(session: &S) -> Result<Structure, MarshalError> {
    let atom_count = session.atom_count();
    let mut structure = Structure::new();

    for index in 0..atom_count {
        structure.add_atom(read_atom(session, index)?)?;
    }

    let (bond_types, bond_stereo) = spread_matrices(session, atom_count)?;
    for bond in validate_bonds(&bond_types, &bond_stereo)? {
        structure.add_bond(bond)?;
    }

    for index in 0..session.stereo_count() {
        structure.add_stereo(read_stereo(session, index)?)?;
    }

    Ok(structure)
}

fn read_atom<S: ParseSession + ?Sized>(session: &S, index: usize) -> Result<Atom, MarshalError> {
    let symbol = session.atom_element(index);
    let element = Element::from_str(&symbol).map_err(|_| MarshalError::UnknownElement {
        atom: index,
        symbol,
    })?;

    let radical_code = session.atom_radical(index);
    let radical = Radical::from_code(radical_code).ok_or(MarshalError::UnknownRadical {
        atom: index,
        code: radical_code,
    })?;

    let mut atom = Atom::without_coordinates(element);
    atom.charge = session.atom_charge(index);
    atom.isotopic_mass = session.atom_isotopic_mass(index);
    atom.radical = radical;
    atom.implicit_h = session.atom_implicit_h(index);
    atom.implicit_protium = session.atom_implicit_protium(index);
    atom.implicit_deuterium = session.atom_implicit_deuterium(index);
    atom.implicit_tritium = session.atom_implicit_tritium(index);
    Ok(atom)
}

type Matrix = Vec<Vec<i32>>;

/// Spreads the per-atom adjacency getters into dense matrices, one cell
/// per directed reading.
fn spread_matrices<S: ParseSession + ?Sized>(
    session: &S,
    atom_count: usize,
) -> Result<(Matrix, Matrix), MarshalError> {
    let mut bond_types = vec![vec![0i32; atom_count]; atom_count];
    let mut bond_stereo = vec![vec![0i32; atom_count]; atom_count];

    for i in 0..atom_count {
        for slot in 0..session.atom_neighbor_count(i) {
            let j = session.atom_neighbor(i, slot);
            if j >= atom_count {
                return Err(MarshalError::Structure(
                    crate::model::structure::StructureError::AtomOutOfRange {
                        index: j,
                        atom_count,
                    },
                ));
            }
            bond_types[i][j] = session.bond_type(i, slot);
            bond_stereo[i][j] = session.bond_stereo(i, slot);
        }
    }

    Ok((bond_types, bond_stereo))
}

/// Checks both matrices for symmetry and emits one bond per validated
/// pair, oriented from the smaller index to the larger.
fn validate_bonds(bond_types: &Matrix, bond_stereo: &Matrix) -> Result<Vec<Bond>, MarshalError> {
    let n = bond_types.len();
    let mut bonds = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            let forward = bond_types[i][j];
            let reverse = bond_types[j][i];
            if forward != reverse {
                return Err(MarshalError::BondTypeMismatch {
                    origin: i,
                    target: j,
                    forward,
                    reverse,
                });
            }

            let stereo_forward = bond_stereo[i][j];
            let stereo_reverse = bond_stereo[j][i];
            if stereo_forward != stereo_reverse {
                return Err(MarshalError::BondStereoMismatch {
                    origin: i,
                    target: j,
                    forward: stereo_forward,
                    reverse: stereo_reverse,
                });
            }

            if forward == 0 {
                continue;
            }

            let bond_type = BondType::from_code(forward).ok_or(MarshalError::UnknownBondType {
                origin: i,
                target: j,
                code: forward,
            })?;
            let stereo =
                BondStereo::from_code(stereo_forward).ok_or(MarshalError::UnknownBondStereo {
                    origin: i,
                    target: j,
                    code: stereo_forward,
                })?;

            bonds.push(Bond::new(i, j, bond_type).with_stereo(stereo));
        }
    }

    Ok(bonds)
}

fn read_stereo<S: ParseSession + ?Sized>(
    session: &S,
    index: usize,
) -> Result<StereoParity, MarshalError> {
    let kind_code = session.stereo_kind(index);
    let kind = StereoKind::from_code(kind_code).ok_or(MarshalError::UnknownStereoKind {
        index,
        code: kind_code,
    })?;

    let byte = session.stereo_parity(index);
    let (parity, disconnected_parity) =
        Parity::unpack(byte).ok_or(MarshalError::UnknownParity { index, byte })?;

    let central_code = session.stereo_central_atom(index);
    let central_atom = if central_code == NO_ATOM {
        None
    } else {
        Some(
            usize::try_from(central_code)
                .map_err(|_| MarshalError::InvalidStereoCentral {
                    index,
                    code: central_code,
                })?,
        )
    };

    let mut neighbors = [0usize; STEREO_NEIGHBORS];
    for (slot, neighbor) in neighbors.iter_mut().enumerate() {
        *neighbor = session.stereo_neighbor(index, slot);
    }

    Ok(StereoParity {
        central_atom,
        neighbors,
        kind,
        parity,
        disconnected_parity,
    })
}
