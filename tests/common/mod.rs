//! In-memory engine double for integration tests.
//!
//! The mock records the exact forward payload a generate session
//! receives and hands out `MOCK-n` identifiers. A parse session looks
//! the payload up again and replays it through the reverse getters the
//! way the real engine would: every bond reported from both endpoints,
//! coordinates dropped, stereo bytes untouched.

// Not every test binary touches every helper.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use canon_bridge::engine::session::{
    AtomRecord, GenerateSession, ParseSession, SessionLifecycle,
};
use canon_bridge::engine::{EngineBackend, EngineError};

#[derive(Debug, Clone, Default)]
pub struct AtomFields {
    pub element: String,
    pub isotopic_mass: i32,
    pub implicit_h: u32,
    pub implicit_protium: u32,
    pub implicit_deuterium: u32,
    pub implicit_tritium: u32,
    pub radical: i32,
    pub charge: i32,
}

/// Everything one generate call handed to the engine.
#[derive(Debug, Clone, Default)]
pub struct Payload {
    pub options: String,
    pub atoms: Vec<AtomFields>,
    /// Origin-side adjacency exactly as marshaled: one entry per bond.
    pub adjacency: Vec<Vec<(usize, i32, i32)>>,
    pub stereo: Vec<(i32, [usize; 4], i32, u8)>,
}

impl Payload {
    /// Total number of filled adjacency slots across all atoms.
    pub fn adjacency_entries(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }
}

#[derive(Default)]
struct Shared {
    payloads: Mutex<Vec<Payload>>,
    releases: AtomicUsize,
}

/// Test engine backend: records payloads, replays them on parse.
#[derive(Clone, Default)]
pub struct MockBackend {
    shared: Arc<Shared>,
    /// Status code `generate` reports (default 0 = Ok).
    pub generate_status: i32,
    /// Status code `parse_identifier` reports for known identifiers.
    pub parse_status: i32,
    pub warning_flags: [[u32; 2]; 2],
    /// Artificial work time per call, for gate-contention tests.
    pub call_delay: Duration,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payload(&self, index: usize) -> Payload {
        self.shared.payloads.lock().unwrap()[index].clone()
    }

    pub fn payload_count(&self) -> usize {
        self.shared.payloads.lock().unwrap().len()
    }

    pub fn release_count(&self) -> usize {
        self.shared.releases.load(Ordering::SeqCst)
    }
}

impl EngineBackend for MockBackend {
    type Generate = MockGenerateSession;
    type Parse = MockParseSession;

    fn open_generate(&mut self) -> Result<MockGenerateSession, EngineError> {
        Ok(MockGenerateSession {
            shared: Arc::clone(&self.shared),
            payload: Payload::default(),
            identifier: None,
            status: self.generate_status,
            delay: self.call_delay,
        })
    }

    fn open_parse(&mut self) -> Result<MockParseSession, EngineError> {
        Ok(MockParseSession {
            shared: Arc::clone(&self.shared),
            payload: None,
            neighbors: Vec::new(),
            status: self.parse_status,
            warning_flags: self.warning_flags,
            delay: self.call_delay,
        })
    }
}

pub struct MockGenerateSession {
    shared: Arc<Shared>,
    payload: Payload,
    identifier: Option<String>,
    status: i32,
    delay: Duration,
}

impl SessionLifecycle for MockGenerateSession {
    fn release(&mut self) {
        self.shared.releases.fetch_add(1, Ordering::SeqCst);
    }
}

impl GenerateSession for MockGenerateSession {
    fn start_input(&mut self, atom_count: usize, stereo_count: usize, options: &str) {
        self.payload.options = options.to_string();
        self.payload.atoms = vec![AtomFields::default(); atom_count];
        self.payload.adjacency = vec![Vec::new(); atom_count];
        self.payload.stereo.reserve(stereo_count);
    }

    fn set_atom(&mut self, index: usize, record: &AtomRecord<'_>) {
        self.payload.atoms[index] = AtomFields {
            element: record.element.to_string(),
            isotopic_mass: record.isotopic_mass,
            implicit_h: record.implicit_h,
            implicit_protium: record.implicit_protium,
            implicit_deuterium: record.implicit_deuterium,
            implicit_tritium: record.implicit_tritium,
            radical: record.radical,
            charge: record.charge,
        };
    }

    fn set_atom_bonds(
        &mut self,
        index: usize,
        neighbors: &[usize],
        bond_types: &[i32],
        bond_stereo: &[i32],
    ) {
        self.payload.adjacency[index] = neighbors
            .iter()
            .zip(bond_types)
            .zip(bond_stereo)
            .map(|((&n, &ty), &st)| (n, ty, st))
            .collect();
    }

    fn set_stereo(
        &mut self,
        _index: usize,
        central_atom: i32,
        neighbors: [usize; 4],
        kind: i32,
        parity: u8,
    ) {
        self.payload.stereo.push((central_atom, neighbors, kind, parity));
    }

    fn generate(&mut self) -> i32 {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        if self.status == 0 || self.status == 1 {
            let mut payloads = self.shared.payloads.lock().unwrap();
            payloads.push(self.payload.clone());
            self.identifier = Some(format!("MOCK-{}", payloads.len() - 1));
        }
        self.status
    }

    fn identifier(&self) -> String {
        self.identifier.clone().unwrap_or_default()
    }

    fn aux_info(&self) -> String {
        String::new()
    }

    fn message(&self) -> String {
        match self.status {
            0 => String::new(),
            1 => "mock warning".to_string(),
            _ => "mock failure".to_string(),
        }
    }

    fn log(&self) -> String {
        String::new()
    }
}

pub struct MockParseSession {
    shared: Arc<Shared>,
    payload: Option<Payload>,
    /// Symmetric adjacency: each recorded bond visible from both ends.
    neighbors: Vec<Vec<(usize, i32, i32)>>,
    status: i32,
    warning_flags: [[u32; 2]; 2],
    delay: Duration,
}

impl MockParseSession {
    fn payload(&self) -> &Payload {
        self.payload.as_ref().expect("parse_identifier not called")
    }
}

impl SessionLifecycle for MockParseSession {
    fn release(&mut self) {
        self.shared.releases.fetch_add(1, Ordering::SeqCst);
    }
}

impl ParseSession for MockParseSession {
    fn parse_identifier(&mut self, identifier: &str, _options: &str) -> i32 {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        let payload = identifier
            .strip_prefix("MOCK-")
            .and_then(|n| n.parse::<usize>().ok())
            .and_then(|n| self.shared.payloads.lock().unwrap().get(n).cloned());
        match payload {
            Some(payload) => {
                let mut neighbors = vec![Vec::new(); payload.atoms.len()];
                for (i, slots) in payload.adjacency.iter().enumerate() {
                    for &(j, ty, st) in slots {
                        neighbors[i].push((j, ty, st));
                        neighbors[j].push((i, ty, st));
                    }
                }
                self.neighbors = neighbors;
                self.payload = Some(payload);
                self.status
            }
            // Unknown identifier: engine-style hard error.
            None => 2,
        }
    }

    fn message(&self) -> String {
        if self.payload.is_none() {
            "unknown identifier".to_string()
        } else {
            String::new()
        }
    }

    fn log(&self) -> String {
        String::new()
    }

    fn atom_count(&self) -> usize {
        self.payload().atoms.len()
    }

    fn stereo_count(&self) -> usize {
        self.payload().stereo.len()
    }

    fn atom_element(&self, index: usize) -> String {
        self.payload().atoms[index].element.clone()
    }

    fn atom_charge(&self, index: usize) -> i32 {
        self.payload().atoms[index].charge
    }

    fn atom_isotopic_mass(&self, index: usize) -> i32 {
        self.payload().atoms[index].isotopic_mass
    }

    fn atom_radical(&self, index: usize) -> i32 {
        self.payload().atoms[index].radical
    }

    fn atom_implicit_h(&self, index: usize) -> u32 {
        self.payload().atoms[index].implicit_h
    }

    fn atom_implicit_protium(&self, index: usize) -> u32 {
        self.payload().atoms[index].implicit_protium
    }

    fn atom_implicit_deuterium(&self, index: usize) -> u32 {
        self.payload().atoms[index].implicit_deuterium
    }

    fn atom_implicit_tritium(&self, index: usize) -> u32 {
        self.payload().atoms[index].implicit_tritium
    }

    fn atom_neighbor_count(&self, index: usize) -> usize {
        self.neighbors[index].len()
    }

    fn atom_neighbor(&self, index: usize, slot: usize) -> usize {
        self.neighbors[index][slot].0
    }

    fn bond_type(&self, index: usize, slot: usize) -> i32 {
        self.neighbors[index][slot].1
    }

    fn bond_stereo(&self, index: usize, slot: usize) -> i32 {
        self.neighbors[index][slot].2
    }

    fn stereo_central_atom(&self, index: usize) -> i32 {
        self.payload().stereo[index].0
    }

    fn stereo_neighbor(&self, index: usize, slot: usize) -> usize {
        self.payload().stereo[index].1[slot]
    }

    fn stereo_kind(&self, index: usize) -> i32 {
        self.payload().stereo[index].2
    }

    fn stereo_parity(&self, index: usize) -> u8 {
        self.payload().stereo[index].3
    }

    fn warning_flags(&self) -> [[u32; 2]; 2] {
        self.warning_flags
    }
}
