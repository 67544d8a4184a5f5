//! Binding for a flat atom/bond-table molecule.
//!
//! This toolkit keeps a molecule as two plain vectors, the way file-
//! format readers produce them: bond orders are raw connection-table
//! codes, positions are one optional Cartesian triple, and the per-atom
//! hydrogen attribute is a *combined* total that counts explicitly
//! modeled H atoms too. That last convention is what the shared
//! algorithm's subtraction/add-back exists for.

use crate::model::types::{Element, Radical};

use super::{
    AdapterError, HydrogenCount, MoleculeSink, MoleculeSource, SourceBond, SourceBondOrder, Wedge,
};

#[derive(Debug, Clone, PartialEq)]
pub struct TableAtom {
    pub element: Element,
    pub position: Option<[f64; 3]>,
    pub charge: i32,
    pub isotopic_mass: i32,
    pub radical: Radical,
    /// Combined hydrogen count, explicit neighbors included. `None`
    /// when the source never stored one.
    pub total_h: Option<u32>,
}

impl TableAtom {
    pub fn new(element: Element) -> Self {
        Self {
            element,
            position: None,
            charge: 0,
            isotopic_mass: 0,
            radical: Radical::None,
            total_h: None,
        }
    }

    pub fn with_total_h(mut self, n: u32) -> Self {
        self.total_h = Some(n);
        self
    }

    pub fn at(mut self, position: [f64; 3]) -> Self {
        self.position = Some(position);
        self
    }
}

/// Bond row: endpoint indices plus a raw connection-table order code
/// (1 = single, 2 = double, 3 = triple, 4 = aromatic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableBond {
    pub i: usize,
    pub j: usize,
    pub order: u8,
    pub wedge: Wedge,
}

impl TableBond {
    pub fn new(i: usize, j: usize, order: u8) -> Self {
        Self {
            i,
            j,
            order,
            wedge: Wedge::None,
        }
    }

    pub fn with_wedge(mut self, wedge: Wedge) -> Self {
        self.wedge = wedge;
        self
    }
}

/// A molecule in the table toolkit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableMolecule {
    pub atoms: Vec<TableAtom>,
    pub bonds: Vec<TableBond>,
}

impl TableMolecule {
    pub fn new() -> Self {
        Self::default()
    }
}

fn order_from_code(code: u8) -> Result<SourceBondOrder, AdapterError> {
    match code {
        1 => Ok(SourceBondOrder::Single),
        2 => Ok(SourceBondOrder::Double),
        3 => Ok(SourceBondOrder::Triple),
        4 => Ok(SourceBondOrder::Aromatic),
        other => Err(AdapterError::UnsupportedBondOrder(format!(
            "connection-table order code {other}"
        ))),
    }
}

fn order_to_code(order: SourceBondOrder) -> u8 {
    match order {
        SourceBondOrder::Single => 1,
        SourceBondOrder::Double => 2,
        SourceBondOrder::Triple => 3,
        SourceBondOrder::Aromatic => 4,
    }
}

impl MoleculeSource for TableMolecule {
    type AtomId = usize;

    fn atom_ids(&self) -> Vec<usize> {
        (0..self.atoms.len()).collect()
    }

    fn element(&self, atom: usize) -> Element {
        self.atoms[atom].element
    }

    fn charge(&self, atom: usize) -> i32 {
        self.atoms[atom].charge
    }

    fn isotopic_mass(&self, atom: usize) -> i32 {
        self.atoms[atom].isotopic_mass
    }

    fn radical(&self, atom: usize) -> Radical {
        self.atoms[atom].radical
    }

    fn hydrogen_count(&self, atom: usize) -> HydrogenCount {
        match self.atoms[atom].total_h {
            Some(total) => HydrogenCount::Total(total),
            None => HydrogenCount::Unspecified,
        }
    }

    fn position_3d(&self, atom: usize) -> Option<[f64; 3]> {
        self.atoms[atom].position
    }

    fn position_2d(&self, atom: usize) -> Option<[f64; 2]> {
        self.atoms[atom].position.map(|[x, y, _]| [x, y])
    }

    fn bonds(&self) -> Result<Vec<SourceBond<usize>>, AdapterError> {
        self.bonds
            .iter()
            .map(|bond| {
                Ok(SourceBond {
                    origin: bond.i,
                    target: bond.j,
                    order: order_from_code(bond.order)?,
                    wedge: bond.wedge,
                })
            })
            .collect()
    }
}

impl MoleculeSink for TableMolecule {
    type AtomId = usize;

    fn add_atom(
        &mut self,
        element: Element,
        charge: i32,
        isotopic_mass: i32,
        radical: Radical,
        implicit_h: u32,
    ) -> usize {
        self.atoms.push(TableAtom {
            element,
            position: None,
            charge,
            isotopic_mass,
            radical,
            total_h: Some(implicit_h),
        });
        self.atoms.len() - 1
    }

    fn add_bond(&mut self, origin: usize, target: usize, order: SourceBondOrder, wedge: Wedge) {
        self.bonds.push(TableBond {
            i: origin,
            j: target,
            order: order_to_code(order),
            wedge,
        });
    }

    fn absorb_explicit_hydrogens(&mut self, atom: usize, explicit_h: u32) {
        let stored = self.atoms[atom].total_h.unwrap_or(0);
        self.atoms[atom].total_h = Some(stored + explicit_h);
    }
}
