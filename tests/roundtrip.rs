//! Full-path tests through the engine handle with the mock backend:
//! adapter/marshaler behavior as observed from outside the crate.

mod common;

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use canon_bridge::engine::{Engine, EngineError, HydrogenLayer, ReturnStatus, StructureLayer};
use canon_bridge::model::atom::Atom;
use canon_bridge::model::structure::{Bond, StereoParity, Structure};
use canon_bridge::model::types::{BondType, Element, Parity, Radical, StereoKind};
use canon_bridge::options::{EngineOption, SWITCH_CHAR};

use common::MockBackend;

/// Unordered adjacency fingerprint: one sorted (element, element, bond
/// type) triple per bond.
fn adjacency_multiset(structure: &Structure) -> Vec<(String, String, i32)> {
    let mut entries: Vec<(String, String, i32)> = structure
        .bonds()
        .iter()
        .map(|bond| {
            let a = structure.atom(bond.origin).element.symbol().to_string();
            let b = structure.atom(bond.target).element.symbol().to_string();
            let (a, b) = if a <= b { (a, b) } else { (b, a) };
            (a, b, bond.bond_type.code())
        })
        .collect();
    entries.sort();
    entries
}

/// Three singly bonded atoms in the given order, hydrogens implicit.
fn chain(order: [Element; 3]) -> Structure {
    let mut st = Structure::new();
    for el in order {
        let h = if el == Element::O { 1 } else { 2 };
        st.add_atom(Atom::without_coordinates(el).with_implicit_h(h))
            .unwrap();
    }
    st.add_bond(Bond::new(0, 1, BondType::Single)).unwrap();
    st.add_bond(Bond::new(1, 2, BondType::Single)).unwrap();
    st
}

#[test]
fn round_trip_preserves_adjacency_multiset() {
    let backend = MockBackend::new();
    let engine = Engine::new(backend);

    let st = chain([Element::C, Element::C, Element::O]);
    let generated = engine.generate(&st, &[]).unwrap();
    assert_eq!(generated.status, ReturnStatus::Ok);
    assert!(generated.identifier.starts_with("MOCK-"));

    let parsed = engine.parse(&generated.identifier, &[]).unwrap();
    assert_eq!(adjacency_multiset(&parsed.structure), adjacency_multiset(&st));
    assert_eq!(parsed.structure.atom_count(), 3);
}

#[test]
fn atom_ordering_does_not_change_the_multiset() {
    let engine = Engine::new(MockBackend::new());

    let a = chain([Element::C, Element::C, Element::O]);
    let b = chain([Element::O, Element::C, Element::C]);

    let out_a = engine.generate(&a, &[]).unwrap();
    let out_b = engine.generate(&b, &[]).unwrap();
    let parsed_a = engine.parse(&out_a.identifier, &[]).unwrap();
    let parsed_b = engine.parse(&out_b.identifier, &[]).unwrap();

    assert_eq!(
        adjacency_multiset(&parsed_a.structure),
        adjacency_multiset(&parsed_b.structure)
    );
}

#[test]
fn atom_scalars_survive_the_round_trip() {
    let engine = Engine::new(MockBackend::new());

    let mut st = Structure::new();
    let mut carbon = Atom::without_coordinates(Element::C).with_charge(-1);
    carbon.set_isotopic_mass(13);
    carbon.radical = Radical::Doublet;
    carbon.implicit_deuterium = 1;
    st.add_atom(carbon).unwrap();

    let out = engine.generate(&st, &[]).unwrap();
    let parsed = engine.parse(&out.identifier, &[]).unwrap();
    let atom = parsed.structure.atom(0);
    assert_eq!(atom.element, Element::C);
    assert_eq!(atom.charge, -1);
    assert_eq!(atom.isotopic_mass, 13);
    assert_eq!(atom.radical, Radical::Doublet);
    assert_eq!(atom.implicit_deuterium, 1);
    // The reverse direction carries no geometry.
    assert_eq!((atom.x, atom.y, atom.z), (0.0, 0.0, 0.0));
}

#[test]
fn benzene_payload_has_six_atoms_and_six_adjacency_entries() {
    let backend = MockBackend::new();
    let engine = Engine::new(backend.clone());

    let mut st = Structure::new();
    for _ in 0..6 {
        st.add_atom(Atom::without_coordinates(Element::C).with_implicit_h(1))
            .unwrap();
    }
    for i in 0..6 {
        let ty = if i % 2 == 0 {
            BondType::Single
        } else {
            BondType::Double
        };
        st.add_bond(Bond::new(i, (i + 1) % 6, ty)).unwrap();
    }

    engine.generate(&st, &[]).unwrap();

    let payload = backend.payload(0);
    assert_eq!(payload.atoms.len(), 6);
    assert_eq!(payload.adjacency_entries(), 6);
    assert!(payload.atoms.iter().all(|a| a.implicit_h == 1));
}

#[test]
fn stereocenter_round_trip_is_exact() {
    let backend = MockBackend::new();
    let engine = Engine::new(backend.clone());

    let mut st = Structure::new();
    for el in [Element::C, Element::H, Element::C, Element::C, Element::N] {
        st.add_atom(Atom::without_coordinates(el)).unwrap();
    }
    st.add_stereo(StereoParity::tetrahedral(0, [1, 2, 3, 4], Parity::Odd))
        .unwrap();

    let out = engine.generate(&st, &[]).unwrap();

    // Primary Odd with disconnected None packs to exactly 1.
    assert_eq!(backend.payload(0).stereo[0].3, 1);

    let parsed = engine.parse(&out.identifier, &[]).unwrap();
    assert_eq!(parsed.structure.stereo_count(), 1);
    let stereo = parsed.structure.stereo()[0];
    assert_eq!(stereo.central_atom, Some(0));
    assert_eq!(stereo.neighbors, [1, 2, 3, 4]);
    assert_eq!(stereo.kind, StereoKind::Tetrahedral);
    assert_eq!(stereo.parity, Parity::Odd);
    assert_eq!(stereo.disconnected_parity, Parity::None);
}

#[test]
fn typed_options_reach_the_engine_in_canonical_form() {
    let backend = MockBackend::new();
    let engine = Engine::new(backend.clone());

    let st = chain([Element::C, Element::C, Element::O]);
    engine
        .generate(&st, &[EngineOption::SNon, EngineOption::FixedH])
        .unwrap();
    assert_eq!(
        backend.payload(0).options,
        format!("{SWITCH_CHAR}SNon {SWITCH_CHAR}FixedH")
    );

    // No options degrade to the single-space quirk the engine expects.
    engine.generate(&st, &[]).unwrap();
    assert_eq!(backend.payload(1).options, " ");
}

#[test]
fn free_form_options_are_canonicalized_or_rejected() {
    let backend = MockBackend::new();
    let engine = Engine::new(backend.clone());
    let st = chain([Element::C, Element::C, Element::O]);

    engine.generate_with_options(&st, "/donotaddh").unwrap();
    assert_eq!(
        backend.payload(0).options,
        format!("{SWITCH_CHAR}DoNotAddH")
    );

    let err = engine
        .generate_with_options(&st, "-BogusOption")
        .unwrap_err();
    assert!(matches!(err, EngineError::Options(_)));
    // The engine was never touched for the bad options.
    assert_eq!(backend.payload_count(), 1);
}

#[test]
fn warning_status_still_yields_a_result() {
    let mut backend = MockBackend::new();
    backend.generate_status = 1;
    let engine = Engine::new(backend);

    let st = chain([Element::C, Element::C, Element::O]);
    let out = engine.generate(&st, &[]).unwrap();
    assert_eq!(out.status, ReturnStatus::Warning);
    assert_eq!(out.message, "mock warning");
    assert!(!out.identifier.is_empty());
}

#[test]
fn failure_status_materializes_nothing_but_still_releases() {
    let mut backend = MockBackend::new();
    backend.generate_status = 3;
    let engine = Engine::new(backend.clone());

    let st = chain([Element::C, Element::C, Element::O]);
    let err = engine.generate(&st, &[]).unwrap_err();
    match err {
        EngineError::Status { status, .. } => assert_eq!(status, ReturnStatus::Fatal),
        other => panic!("expected status error, got {other:?}"),
    }
    assert_eq!(backend.payload_count(), 0);
    // Session state was freed on the failure path.
    assert_eq!(backend.release_count(), 1);
}

#[test]
fn unknown_identifier_fails_the_parse() {
    let backend = MockBackend::new();
    let engine = Engine::new(backend.clone());

    let err = engine.parse("MOCK-99", &[]).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Status {
            status: ReturnStatus::Error,
            ..
        }
    ));
    assert_eq!(backend.release_count(), 1);
}

#[test]
fn warning_flags_surface_through_parse() {
    let mut backend = MockBackend::new();
    backend.warning_flags = [[1, 0], [0, 2]];
    let engine = Engine::new(backend);

    let st = chain([Element::C, Element::C, Element::O]);
    let out = engine.generate(&st, &[]).unwrap();
    let parsed = engine.parse(&out.identifier, &[]).unwrap();

    let flags = parsed.warning_flags;
    assert_eq!(flags.get(StructureLayer::Reconnected, HydrogenLayer::MobileH), 1);
    assert_eq!(flags.get(StructureLayer::Reconnected, HydrogenLayer::FixedH), 0);
    assert_eq!(flags.get(StructureLayer::Disconnected, HydrogenLayer::FixedH), 2);
}

#[test]
fn gate_contention_times_out_with_its_own_error_kind() {
    let mut backend = MockBackend::new();
    backend.call_delay = Duration::from_millis(200);
    let engine = Arc::new(Engine::with_gate_timeout(
        backend,
        Duration::from_millis(20),
    ));

    let slow = {
        let engine = Arc::clone(&engine);
        thread::spawn(move || {
            let st = chain([Element::C, Element::C, Element::O]);
            engine.generate(&st, &[]).map(|_| ())
        })
    };

    // Let the slow call take the gate, then contend.
    thread::sleep(Duration::from_millis(50));
    let st = chain([Element::C, Element::C, Element::O]);
    let err = engine.generate(&st, &[]).unwrap_err();
    assert!(matches!(err, EngineError::Gate(_)));

    slow.join().unwrap().unwrap();
}

#[test]
fn toolkit_to_toolkit_through_the_engine() {
    use canon_bridge::adapter::graph::{GraphAtom, GraphBond, GraphBondOrder, GraphMolecule};
    use canon_bridge::adapter::table::TableMolecule;
    use canon_bridge::adapter::{molecule_from_structure, structure_from_molecule};

    // Formaldehyde in the graph toolkit: C(=O) with both hydrogens
    // explicit, implicit counts zero.
    let mut source = GraphMolecule::new();
    let c = source.add_atom(GraphAtom::new(Element::C));
    let o = source.add_atom(GraphAtom::new(Element::O));
    let h1 = source.add_atom(GraphAtom::new(Element::H));
    let h2 = source.add_atom(GraphAtom::new(Element::H));
    source.add_bond(c, o, GraphBond::new(GraphBondOrder::Double));
    source.add_bond(c, h1, GraphBond::new(GraphBondOrder::Single));
    source.add_bond(c, h2, GraphBond::new(GraphBondOrder::Single));

    let engine = Engine::new(MockBackend::new());
    let structure = structure_from_molecule(&source).unwrap();
    let out = engine.generate(&structure, &[]).unwrap();
    let parsed = engine.parse(&out.identifier, &[]).unwrap();

    let mut target = TableMolecule::new();
    molecule_from_structure(&parsed.structure, &mut target);

    assert_eq!(target.atoms.len(), 4);
    assert_eq!(target.bonds.len(), 3);
    // The table toolkit stores combined totals: the carbon regains its
    // two explicit hydrogen neighbors on top of zero implicit ones.
    assert_eq!(target.atoms[0].total_h, Some(2));
    assert_eq!(target.atoms[1].total_h, Some(0));
    assert_eq!(
        target.bonds.iter().map(|b| b.order).max(),
        Some(2)
    );
}
