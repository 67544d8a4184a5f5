//! Structure → flat-array payload.
//!
//! Bonds are compressed into per-atom adjacency: each bond is recorded
//! exactly once, in its origin atom's neighbor slot, never mirrored.
//! That halves the payload against a symmetric matrix and is the
//! adjacency convention the engine's input arrays expect.

use crate::engine::session::{AtomRecord, GenerateSession, NO_ATOM};
use crate::model::structure::Structure;
use crate::model::types::Parity;
use crate::model::MAX_NEIGHBORS;

use super::MarshalError;

/// Drives the forward session contract for one structure.
///
/// `options` must already be in canonical form. The session is left
/// populated, ready for `generate`; releasing it is the caller's
/// responsibility (see
/// [`ScopedSession`](crate::engine::session::ScopedSession)).
pub fn marshal<S: GenerateSession + ?Sized>(
    structure: &Structure,
    options: &str,
    session: &mut S,
) -> Result<(), MarshalError> {
    // The engine treats a zero-length option string as malformed input;
    // a single space means "no options".
    let options = if options.is_empty() { " " } else { options };
    session.start_input(structure.atom_count(), structure.stereo_count(), options);

    for (index, atom) in structure.atoms().iter().enumerate() {
        session.set_atom(
            index,
            &AtomRecord {
                x: atom.x,
                y: atom.y,
                z: atom.z,
                element: atom.element.symbol(),
                isotopic_mass: atom.isotopic_mass,
                implicit_h: atom.implicit_h,
                implicit_protium: atom.implicit_protium,
                implicit_deuterium: atom.implicit_deuterium,
                implicit_tritium: atom.implicit_tritium,
                radical: atom.radical.code(),
                charge: atom.charge,
            },
        );
    }

    let adjacency = compress_bonds(structure)?;
    for (index, slots) in adjacency.iter().enumerate() {
        let neighbors: Vec<usize> = slots.iter().map(|s| s.neighbor).collect();
        let bond_types: Vec<i32> = slots.iter().map(|s| s.bond_type).collect();
        let bond_stereo: Vec<i32> = slots.iter().map(|s| s.stereo).collect();
        session.set_atom_bonds(index, &neighbors, &bond_types, &bond_stereo);
    }

    for (index, stereo) in structure.stereo().iter().enumerate() {
        let central = match stereo.central_atom {
            Some(atom) => atom as i32,
            None => NO_ATOM,
        };
        session.set_stereo(
            index,
            central,
            stereo.neighbors,
            stereo.kind.code(),
            Parity::pack(stereo.parity, stereo.disconnected_parity),
        );
    }

    Ok(())
}

struct AdjacencySlot {
    neighbor: usize,
    bond_type: i32,
    stereo: i32,
}

/// One adjacency list per atom; each bond lands only in its origin's
/// list.
fn compress_bonds(structure: &Structure) -> Result<Vec<Vec<AdjacencySlot>>, MarshalError> {
    let mut adjacency: Vec<Vec<AdjacencySlot>> = Vec::new();
    adjacency.resize_with(structure.atom_count(), Vec::new);

    for bond in structure.bonds() {
        let slots = &mut adjacency[bond.origin];
        if slots.len() >= MAX_NEIGHBORS {
            return Err(MarshalError::TooManyBonds { atom: bond.origin });
        }
        slots.push(AdjacencySlot {
            neighbor: bond.target,
            bond_type: bond.bond_type.code(),
            stereo: bond.stereo.code(),
        });
    }

    Ok(adjacency)
}
