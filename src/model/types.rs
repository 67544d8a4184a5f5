//! Periodic table elements and the closed wire-code vocabularies.
//!
//! Every enum that crosses the engine boundary carries the engine's
//! integer code. The `code`/`from_code` pairs are exhaustive in both
//! directions so that an added variant fails to compile rather than
//! silently falling through a decode path.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or unsupported element symbol: '{0}'")]
pub struct ParseElementError(pub String);

/// Chemical element, discriminant = atomic number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Element {
    H = 1,
    He,
    Li,
    Be,
    B,
    C,
    N,
    O,
    F,
    Ne,
    Na,
    Mg,
    Al,
    Si,
    P,
    S,
    Cl,
    Ar,
    K,
    Ca,
    Sc,
    Ti,
    V,
    Cr,
    Mn,
    Fe,
    Co,
    Ni,
    Cu,
    Zn,
    Ga,
    Ge,
    As,
    Se,
    Br,
    Kr,
    Rb,
    Sr,
    Y,
    Zr,
    Nb,
    Mo,
    Tc,
    Ru,
    Rh,
    Pd,
    Ag,
    Cd,
    In,
    Sn,
    Sb,
    Te,
    I,
    Xe,
    Cs,
    Ba,
    La,
    Ce,
    Pr,
    Nd,
    Pm,
    Sm,
    Eu,
    Gd,
    Tb,
    Dy,
    Ho,
    Er,
    Tm,
    Yb,
    Lu,
    Hf,
    Ta,
    W,
    Re,
    Os,
    Ir,
    Pt,
    Au,
    Hg,
    Tl,
    Pb,
    Bi,
    Po,
    At,
    Rn,
    Fr,
    Ra,
    Ac,
    Th,
    Pa,
    U,
    Np,
    Pu,
    Am,
    Cm,
    Bk,
    Cf,
    Es,
    Fm,
    Md,
    No,
    Lr,
    Rf,
    Db,
    Sg,
    Bh,
    Hs,
    Mt,
    Ds,
    Rg,
    Cn,
    Nh,
    Fl,
    Mc,
    Lv,
    Ts,
    Og = 118,
}

/// Symbols indexed by atomic number - 1.
const SYMBOLS: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As",
    "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb",
    "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl",
    "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk",
    "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn",
    "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

impl Element {
    #[inline]
    pub fn atomic_number(&self) -> u8 {
        *self as u8
    }

    pub fn symbol(&self) -> &'static str {
        SYMBOLS[(*self as u8 - 1) as usize]
    }

    pub fn from_atomic_number(n: u8) -> Option<Self> {
        if (1..=118).contains(&n) {
            // Discriminants are contiguous in 1..=118.
            Some(unsafe { std::mem::transmute::<u8, Element>(n) })
        } else {
            None
        }
    }

    /// True for hydrogen, the one element the adapters treat specially.
    #[inline]
    pub fn is_hydrogen(&self) -> bool {
        matches!(self, Element::H)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Element {
    type Err = ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SYMBOLS
            .iter()
            .position(|sym| *sym == s)
            .and_then(|i| Element::from_atomic_number((i + 1) as u8))
            .ok_or_else(|| ParseElementError(s.to_string()))
    }
}

/// Bond order as the engine encodes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondType {
    #[default]
    Single,
    Double,
    Triple,
    /// Alternating single/double (aromatic) bond.
    Alternating,
}

impl BondType {
    pub fn code(self) -> i32 {
        match self {
            BondType::Single => 1,
            BondType::Double => 2,
            BondType::Triple => 3,
            BondType::Alternating => 4,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(BondType::Single),
            2 => Some(BondType::Double),
            3 => Some(BondType::Triple),
            4 => Some(BondType::Alternating),
            _ => None,
        }
    }
}

/// 2D stereo marker on a bond.
///
/// The `One`/`Two` prefixes encode which endpoint the sharp (pointy) end
/// of the wedge sits on; the engine distinguishes them by sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondStereo {
    #[default]
    None,
    OneUp,
    OneEither,
    OneDown,
    TwoUp,
    TwoEither,
    TwoDown,
    DoubleEither,
}

impl BondStereo {
    pub fn code(self) -> i32 {
        match self {
            BondStereo::None => 0,
            BondStereo::OneUp => 1,
            BondStereo::OneEither => 4,
            BondStereo::OneDown => 6,
            BondStereo::TwoUp => -1,
            BondStereo::TwoEither => -4,
            BondStereo::TwoDown => -6,
            BondStereo::DoubleEither => 3,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(BondStereo::None),
            1 => Some(BondStereo::OneUp),
            4 => Some(BondStereo::OneEither),
            6 => Some(BondStereo::OneDown),
            -1 => Some(BondStereo::TwoUp),
            -4 => Some(BondStereo::TwoEither),
            -6 => Some(BondStereo::TwoDown),
            3 => Some(BondStereo::DoubleEither),
            _ => None,
        }
    }
}

/// Radical (spin multiplicity) state of an atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Radical {
    #[default]
    None,
    Singlet,
    Doublet,
    Triplet,
}

impl Radical {
    pub fn code(self) -> i32 {
        match self {
            Radical::None => 0,
            Radical::Singlet => 1,
            Radical::Doublet => 2,
            Radical::Triplet => 3,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Radical::None),
            1 => Some(Radical::Singlet),
            2 => Some(Radical::Doublet),
            3 => Some(Radical::Triplet),
            _ => None,
        }
    }
}

/// Kind of 0D stereo descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StereoKind {
    None,
    DoubleBond,
    Tetrahedral,
    Allene,
}

impl StereoKind {
    pub fn code(self) -> i32 {
        match self {
            StereoKind::None => 0,
            StereoKind::DoubleBond => 1,
            StereoKind::Tetrahedral => 2,
            StereoKind::Allene => 3,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(StereoKind::None),
            1 => Some(StereoKind::DoubleBond),
            2 => Some(StereoKind::Tetrahedral),
            3 => Some(StereoKind::Allene),
            _ => None,
        }
    }
}

/// Parity sign of a 0D stereo descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Parity {
    #[default]
    None,
    Odd,
    Even,
    Unknown,
    Undefined,
}

impl Parity {
    pub fn code(self) -> i32 {
        match self {
            Parity::None => 0,
            Parity::Odd => 1,
            Parity::Even => 2,
            Parity::Unknown => 3,
            Parity::Undefined => 4,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Parity::None),
            1 => Some(Parity::Odd),
            2 => Some(Parity::Even),
            3 => Some(Parity::Unknown),
            4 => Some(Parity::Undefined),
            _ => None,
        }
    }

    /// Packs a primary and a disconnected-layer parity into the engine's
    /// single wire byte. Opaque convention owned by the engine; preserved
    /// bit-for-bit.
    pub fn pack(primary: Parity, disconnected: Parity) -> u8 {
        (primary.code() | (disconnected.code() << 3)) as u8
    }

    /// Splits the wire byte back into (primary, disconnected).
    ///
    /// Returns `None` if either half is outside the parity vocabulary.
    pub fn unpack(byte: u8) -> Option<(Parity, Parity)> {
        let primary = Parity::from_code((byte & 0x07) as i32)?;
        let disconnected = Parity::from_code((byte >> 3) as i32)?;
        Some((primary, disconnected))
    }
}
