use super::types::{Element, Radical};

/// Reserved offset marking an isotopic mass stored as a shift from the
/// element's standard mass rather than an absolute value. Engine wire
/// convention.
pub const ISOTOPIC_SHIFT_FLAG: i32 = 10_000;

/// A single atom of a [`Structure`](super::structure::Structure).
///
/// Coordinates are always present and zero-filled when unknown; the
/// coordinate-dimensionality policy lives in the adapters, not here.
/// An atom has no identity of its own: bonds and stereo descriptors
/// refer to it by its position in the owning structure's atom list.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub element: Element,
    /// Formal charge in elementary charge units.
    pub charge: i32,
    /// `0` = non-isotopic; otherwise an absolute mass number, or a shift
    /// from the standard mass offset by [`ISOTOPIC_SHIFT_FLAG`].
    pub isotopic_mass: i32,
    pub radical: Radical,
    /// Implicit hydrogens of unspecified isotope.
    pub implicit_h: u32,
    /// Implicit protium (1H).
    pub implicit_protium: u32,
    /// Implicit deuterium (2H).
    pub implicit_deuterium: u32,
    /// Implicit tritium (3H).
    pub implicit_tritium: u32,
}

impl Atom {
    pub fn new(element: Element, x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            element,
            charge: 0,
            isotopic_mass: 0,
            radical: Radical::None,
            implicit_h: 0,
            implicit_protium: 0,
            implicit_deuterium: 0,
            implicit_tritium: 0,
        }
    }

    /// Atom at the origin, for sources without geometry.
    pub fn without_coordinates(element: Element) -> Self {
        Self::new(element, 0.0, 0.0, 0.0)
    }

    /// Sets an absolute isotopic mass number.
    pub fn set_isotopic_mass(&mut self, mass: i32) {
        self.isotopic_mass = mass;
    }

    /// Sets the isotopic mass as a shift relative to the element's
    /// standard mass, using the reserved offset encoding.
    pub fn set_isotopic_mass_shift(&mut self, shift: i32) {
        self.isotopic_mass = ISOTOPIC_SHIFT_FLAG + shift;
    }

    pub fn with_charge(mut self, charge: i32) -> Self {
        self.charge = charge;
        self
    }

    pub fn with_implicit_h(mut self, n: u32) -> Self {
        self.implicit_h = n;
        self
    }

    pub fn with_radical(mut self, radical: Radical) -> Self {
        self.radical = radical;
        self
    }
}
