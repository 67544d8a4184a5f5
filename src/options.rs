//! Engine option tokens and their canonical command-line form.
//!
//! The engine accepts a fixed vocabulary of option switches. Callers may
//! hand them over as typed values or as a free-form string in which each
//! token optionally carries a `-` or `/` prefix in any letter case. Both
//! forms normalize to the same canonical string: recognized casing, each
//! token prefixed with the switch character of the running platform.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Switch character the engine expects on this platform.
#[cfg(windows)]
pub const SWITCH_CHAR: char = '/';
/// Switch character the engine expects on this platform.
#[cfg(not(windows))]
pub const SWITCH_CHAR: char = '-';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    /// A token was not in the engine's option vocabulary.
    #[error("unrecognized engine option: '{0}'")]
    UnrecognizedOption(String),
}

/// One option from the engine's closed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineOption {
    /// Use chiral flag when drawn.
    Sucf,
    ChiralFlagOn,
    ChiralFlagOff,
    /// Exclude stereo information.
    SNon,
    /// Absolute stereo.
    SAbs,
    /// Relative stereo.
    SRel,
    /// Racemic stereo.
    SRac,
    /// Include omitted undefined/unknown stereo.
    Suu,
    NewPs,
    /// Include reconnected metals.
    RecMet,
    /// Include the fixed-hydrogen layer.
    FixedH,
    /// Omit auxiliary information.
    AuxNone,
    /// Disable aggressive (de)protonation.
    NoAdp,
    Compress,
    /// Never add hydrogens the caller did not supply.
    DoNotAddH,
    WNumber,
    OutputSdf,
    WarnOnEmptyStructure,
    FixSp3Bug,
    SpXyz,
}

impl EngineOption {
    /// All options, in vocabulary order.
    pub const ALL: [EngineOption; 20] = [
        EngineOption::Sucf,
        EngineOption::ChiralFlagOn,
        EngineOption::ChiralFlagOff,
        EngineOption::SNon,
        EngineOption::SAbs,
        EngineOption::SRel,
        EngineOption::SRac,
        EngineOption::Suu,
        EngineOption::NewPs,
        EngineOption::RecMet,
        EngineOption::FixedH,
        EngineOption::AuxNone,
        EngineOption::NoAdp,
        EngineOption::Compress,
        EngineOption::DoNotAddH,
        EngineOption::WNumber,
        EngineOption::OutputSdf,
        EngineOption::WarnOnEmptyStructure,
        EngineOption::FixSp3Bug,
        EngineOption::SpXyz,
    ];

    /// Canonical token as the engine spells it.
    pub fn name(self) -> &'static str {
        match self {
            EngineOption::Sucf => "SUCF",
            EngineOption::ChiralFlagOn => "ChiralFlagON",
            EngineOption::ChiralFlagOff => "ChiralFlagOFF",
            EngineOption::SNon => "SNon",
            EngineOption::SAbs => "SAbs",
            EngineOption::SRel => "SRel",
            EngineOption::SRac => "SRac",
            EngineOption::Suu => "SUU",
            EngineOption::NewPs => "NEWPS",
            EngineOption::RecMet => "RecMet",
            EngineOption::FixedH => "FixedH",
            EngineOption::AuxNone => "AuxNone",
            EngineOption::NoAdp => "NoADP",
            EngineOption::Compress => "Compress",
            EngineOption::DoNotAddH => "DoNotAddH",
            EngineOption::WNumber => "Wnumber",
            EngineOption::OutputSdf => "OutputSDF",
            EngineOption::WarnOnEmptyStructure => "WarnOnEmptyStructure",
            EngineOption::FixSp3Bug => "FixSp3Bug",
            EngineOption::SpXyz => "SPXYZ",
        }
    }
}

impl fmt::Display for EngineOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EngineOption {
    type Err = OptionError;

    /// Case-insensitive lookup of a bare token (no switch prefix).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EngineOption::ALL
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| OptionError::UnrecognizedOption(s.to_string()))
    }
}

/// Normalizes a space-delimited option string into canonical form.
///
/// Each token may carry a leading `-` or `/`, stripped before lookup.
/// Fails on the first unrecognized token; nothing is ever partially
/// normalized. Canonical output fed back in reproduces itself.
pub fn canonicalize(options: &str) -> Result<String, OptionError> {
    let mut parsed = Vec::new();
    for token in options.split_whitespace() {
        let bare = token
            .strip_prefix(['-', '/'])
            .unwrap_or(token);
        parsed.push(EngineOption::from_str(bare)?);
    }
    Ok(canonicalize_list(&parsed))
}

/// Renders typed options in canonical command-line form.
pub fn canonicalize_list(options: &[EngineOption]) -> String {
    let mut out = String::new();
    for op in options {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push(SWITCH_CHAR);
        out.push_str(op.name());
    }
    out
}
