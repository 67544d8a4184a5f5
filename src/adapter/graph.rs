//! Binding for a petgraph-backed molecular graph.
//!
//! This toolkit models a molecule as an undirected graph with typed
//! node and edge weights. Hydrogen counts are stored implicit-only
//! (explicitly modeled H atoms are their own nodes and are *not*
//! included in the count), and 2D/3D positions are carried separately,
//! either of which may be absent per atom.

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::model::types::{Element, Radical};

use super::{
    AdapterError, HydrogenCount, MoleculeSink, MoleculeSource, SourceBond, SourceBondOrder, Wedge,
};

/// Bond order vocabulary of this toolkit. Wider than the engine's:
/// quadruple bonds exist here but cannot be marshaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphBondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Aromatic,
    Quadruple,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphAtom {
    pub element: Element,
    pub charge: i32,
    pub isotopic_mass: i32,
    pub radical: Radical,
    /// Hydrogens implied by valence; never counts explicit H nodes.
    pub implicit_h: u32,
    pub position_2d: Option<[f64; 2]>,
    pub position_3d: Option<[f64; 3]>,
}

impl GraphAtom {
    pub fn new(element: Element) -> Self {
        Self {
            element,
            charge: 0,
            isotopic_mass: 0,
            radical: Radical::None,
            implicit_h: 0,
            position_2d: None,
            position_3d: None,
        }
    }

    pub fn with_implicit_h(mut self, n: u32) -> Self {
        self.implicit_h = n;
        self
    }

    pub fn at_3d(mut self, position: [f64; 3]) -> Self {
        self.position_3d = Some(position);
        self
    }

    pub fn at_2d(mut self, position: [f64; 2]) -> Self {
        self.position_2d = Some(position);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GraphBond {
    pub order: GraphBondOrder,
    pub wedge: Wedge,
}

impl GraphBond {
    pub fn new(order: GraphBondOrder) -> Self {
        Self {
            order,
            wedge: Wedge::None,
        }
    }

    pub fn with_wedge(mut self, wedge: Wedge) -> Self {
        self.wedge = wedge;
        self
    }
}

/// A molecule in the petgraph toolkit.
#[derive(Debug, Clone, Default)]
pub struct GraphMolecule {
    graph: UnGraph<GraphAtom, GraphBond>,
}

impl GraphMolecule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_atom(&mut self, atom: GraphAtom) -> NodeIndex {
        self.graph.add_node(atom)
    }

    pub fn add_bond(&mut self, a: NodeIndex, b: NodeIndex, bond: GraphBond) -> EdgeIndex {
        self.graph.add_edge(a, b, bond)
    }

    pub fn atom(&self, idx: NodeIndex) -> &GraphAtom {
        &self.graph[idx]
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn graph(&self) -> &UnGraph<GraphAtom, GraphBond> {
        &self.graph
    }
}

impl MoleculeSource for GraphMolecule {
    type AtomId = NodeIndex;

    fn atom_ids(&self) -> Vec<NodeIndex> {
        self.graph.node_indices().collect()
    }

    fn element(&self, atom: NodeIndex) -> Element {
        self.graph[atom].element
    }

    fn charge(&self, atom: NodeIndex) -> i32 {
        self.graph[atom].charge
    }

    fn isotopic_mass(&self, atom: NodeIndex) -> i32 {
        self.graph[atom].isotopic_mass
    }

    fn radical(&self, atom: NodeIndex) -> Radical {
        self.graph[atom].radical
    }

    fn hydrogen_count(&self, atom: NodeIndex) -> HydrogenCount {
        HydrogenCount::Implicit(self.graph[atom].implicit_h)
    }

    fn position_3d(&self, atom: NodeIndex) -> Option<[f64; 3]> {
        self.graph[atom].position_3d
    }

    fn position_2d(&self, atom: NodeIndex) -> Option<[f64; 2]> {
        self.graph[atom].position_2d
    }

    fn bonds(&self) -> Result<Vec<SourceBond<NodeIndex>>, AdapterError> {
        self.graph
            .edge_references()
            .map(|edge| {
                let order = match edge.weight().order {
                    GraphBondOrder::Single => SourceBondOrder::Single,
                    GraphBondOrder::Double => SourceBondOrder::Double,
                    GraphBondOrder::Triple => SourceBondOrder::Triple,
                    GraphBondOrder::Aromatic => SourceBondOrder::Aromatic,
                    GraphBondOrder::Quadruple => {
                        return Err(AdapterError::UnsupportedBondOrder(
                            "quadruple bond".to_string(),
                        ))
                    }
                };
                Ok(SourceBond {
                    origin: edge.source(),
                    target: edge.target(),
                    order,
                    wedge: edge.weight().wedge,
                })
            })
            .collect()
    }
}

impl MoleculeSink for GraphMolecule {
    type AtomId = NodeIndex;

    fn add_atom(
        &mut self,
        element: Element,
        charge: i32,
        isotopic_mass: i32,
        radical: Radical,
        implicit_h: u32,
    ) -> NodeIndex {
        self.graph.add_node(GraphAtom {
            element,
            charge,
            isotopic_mass,
            radical,
            implicit_h,
            position_2d: None,
            position_3d: None,
        })
    }

    fn add_bond(
        &mut self,
        origin: NodeIndex,
        target: NodeIndex,
        order: SourceBondOrder,
        wedge: Wedge,
    ) {
        let order = match order {
            SourceBondOrder::Single => GraphBondOrder::Single,
            SourceBondOrder::Double => GraphBondOrder::Double,
            SourceBondOrder::Triple => GraphBondOrder::Triple,
            SourceBondOrder::Aromatic => GraphBondOrder::Aromatic,
        };
        self.graph.add_edge(origin, target, GraphBond { order, wedge });
    }

    fn absorb_explicit_hydrogens(&mut self, _atom: NodeIndex, _explicit_h: u32) {
        // Counts here are implicit-only; explicit H atoms stay separate
        // nodes and are never folded in.
    }
}
