//! The engine handle: one serialized door to the native canonicalizer.
//!
//! [`Engine`] owns a backend implementing the session contracts in
//! [`session`] and funnels every call through a [`ConcurrencyGate`].
//! Backend initialization is lazy and happens at most once, under the
//! same gate, so concurrent first callers cannot race it. Each call
//! opens a session, marshals, runs the engine, and releases the
//! session's native state before the gate opens again, on success and
//! on every failure path alike.

pub mod gate;
pub mod session;

use thiserror::Error;

use crate::marshal::{self, MarshalError};
use crate::model::structure::Structure;
use crate::options::{self, EngineOption, OptionError};
use gate::{ConcurrencyGate, GateTimeout};
use session::{GenerateSession, ParseSession, ScopedSession};

/// Integer-coded return taxonomy shared by both call directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnStatus {
    Skip,
    Eof,
    Ok,
    Warning,
    Error,
    Fatal,
    Unknown,
    Busy,
}

impl ReturnStatus {
    pub fn code(self) -> i32 {
        match self {
            ReturnStatus::Skip => -2,
            ReturnStatus::Eof => -1,
            ReturnStatus::Ok => 0,
            ReturnStatus::Warning => 1,
            ReturnStatus::Error => 2,
            ReturnStatus::Fatal => 3,
            ReturnStatus::Unknown => 4,
            ReturnStatus::Busy => 5,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -2 => Some(ReturnStatus::Skip),
            -1 => Some(ReturnStatus::Eof),
            0 => Some(ReturnStatus::Ok),
            1 => Some(ReturnStatus::Warning),
            2 => Some(ReturnStatus::Error),
            3 => Some(ReturnStatus::Fatal),
            4 => Some(ReturnStatus::Unknown),
            5 => Some(ReturnStatus::Busy),
            _ => None,
        }
    }

    /// Ok and Warning carry a usable result; everything else aborts the
    /// call with nothing materialized.
    pub fn is_success(self) -> bool {
        matches!(self, ReturnStatus::Ok | ReturnStatus::Warning)
    }
}

/// Structure layer a warning flag refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureLayer {
    /// Reconnected-metal layer present.
    Reconnected,
    /// Disconnected (normal) layer.
    Disconnected,
}

/// Hydrogen layer a warning flag refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrogenLayer {
    /// Main / mobile-hydrogen layer.
    MobileH,
    /// Fixed-hydrogen layer.
    FixedH,
}

/// 2×2 warning-flag matrix returned by the reverse direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WarningFlags {
    raw: [[u32; 2]; 2],
}

impl WarningFlags {
    pub fn from_raw(raw: [[u32; 2]; 2]) -> Self {
        Self { raw }
    }

    pub fn get(&self, layer: StructureLayer, hydrogens: HydrogenLayer) -> u32 {
        let i = match layer {
            StructureLayer::Reconnected => 0,
            StructureLayer::Disconnected => 1,
        };
        let j = match hydrogens {
            HydrogenLayer::MobileH => 0,
            HydrogenLayer::FixedH => 1,
        };
        self.raw[i][j]
    }

    pub fn raw(&self) -> [[u32; 2]; 2] {
        self.raw
    }
}

/// Result of a successful forward (generate) call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOutput {
    pub status: ReturnStatus,
    pub identifier: String,
    pub aux_info: String,
    /// Warning text when `status` is [`ReturnStatus::Warning`].
    pub message: String,
    pub log: String,
}

/// Result of a successful reverse (parse) call.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    pub status: ReturnStatus,
    pub structure: Structure,
    pub warning_flags: WarningFlags,
    pub message: String,
    pub log: String,
}

/// Failures of an engine call, in either direction.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine reported a non-success status.
    #[error("engine call failed ({status:?}): {message}")]
    Status {
        status: ReturnStatus,
        message: String,
    },

    /// The engine returned a status code outside the taxonomy.
    #[error("engine returned unknown status code {0}")]
    UnknownStatus(i32),

    /// Option canonicalization failed before the engine was touched.
    #[error("invalid engine options: {0}")]
    Options(#[from] OptionError),

    /// Marshaling to or from the flat-array contract failed.
    #[error("marshaling failed: {0}")]
    Marshal(#[from] MarshalError),

    /// The concurrency gate could not be acquired in time.
    #[error("engine busy: {0}")]
    Gate(#[from] GateTimeout),

    /// The backend failed to initialize or open a session.
    #[error("engine backend failure: {0}")]
    Backend(String),
}

/// Factory for engine sessions; implemented by the native binding (or a
/// test double).
pub trait EngineBackend {
    type Generate: GenerateSession;
    type Parse: ParseSession;

    /// One-time process-wide setup (library bootstrap, version check).
    /// Called lazily before the first session, under the gate.
    fn initialize(&mut self) -> Result<(), EngineError> {
        Ok(())
    }

    fn open_generate(&mut self) -> Result<Self::Generate, EngineError>;
    fn open_parse(&mut self) -> Result<Self::Parse, EngineError>;
}

struct BackendCell<B> {
    backend: B,
    initialized: bool,
}

/// Handle through which all engine calls are made.
pub struct Engine<B: EngineBackend> {
    gate: ConcurrencyGate<BackendCell<B>>,
}

impl<B: EngineBackend> Engine<B> {
    pub fn new(backend: B) -> Self {
        Self {
            gate: ConcurrencyGate::new(BackendCell {
                backend,
                initialized: false,
            }),
        }
    }

    pub fn with_gate_timeout(backend: B, timeout: std::time::Duration) -> Self {
        Self {
            gate: ConcurrencyGate::with_timeout(
                BackendCell {
                    backend,
                    initialized: false,
                },
                timeout,
            ),
        }
    }

    /// Generates an identifier for a structure, with typed options.
    pub fn generate(
        &self,
        structure: &Structure,
        opts: &[EngineOption],
    ) -> Result<GenerateOutput, EngineError> {
        self.generate_canonical(structure, options::canonicalize_list(opts))
    }

    /// Generates an identifier, canonicalizing a free-form option string
    /// first.
    pub fn generate_with_options(
        &self,
        structure: &Structure,
        opts: &str,
    ) -> Result<GenerateOutput, EngineError> {
        self.generate_canonical(structure, options::canonicalize(opts)?)
    }

    fn generate_canonical(
        &self,
        structure: &Structure,
        opts: String,
    ) -> Result<GenerateOutput, EngineError> {
        let mut cell = self.acquire()?;
        let mut session = ScopedSession::new(cell.backend.open_generate()?);
        marshal::forward::marshal(structure, &opts, &mut *session)?;

        let code = session.generate();
        let status = ReturnStatus::from_code(code).ok_or(EngineError::UnknownStatus(code))?;
        log::debug!("engine generate returned {status:?}");
        if !status.is_success() {
            return Err(EngineError::Status {
                status,
                message: session.message(),
            });
        }

        Ok(GenerateOutput {
            status,
            identifier: session.identifier(),
            aux_info: session.aux_info(),
            message: session.message(),
            log: session.log(),
        })
    }

    /// Parses an identifier back into a validated structure, with typed
    /// options.
    pub fn parse(
        &self,
        identifier: &str,
        opts: &[EngineOption],
    ) -> Result<ParseOutput, EngineError> {
        self.parse_canonical(identifier, options::canonicalize_list(opts))
    }

    /// Parses an identifier, canonicalizing a free-form option string
    /// first.
    pub fn parse_with_options(
        &self,
        identifier: &str,
        opts: &str,
    ) -> Result<ParseOutput, EngineError> {
        self.parse_canonical(identifier, options::canonicalize(opts)?)
    }

    fn parse_canonical(
        &self,
        identifier: &str,
        opts: String,
    ) -> Result<ParseOutput, EngineError> {
        let mut cell = self.acquire()?;
        let mut session = ScopedSession::new(cell.backend.open_parse()?);

        let code = session.parse_identifier(identifier, &opts);
        let status = ReturnStatus::from_code(code).ok_or(EngineError::UnknownStatus(code))?;
        log::debug!("engine parse returned {status:?}");
        if !status.is_success() {
            return Err(EngineError::Status {
                status,
                message: session.message(),
            });
        }

        let structure = marshal::reverse::unmarshal(&*session)?;
        Ok(ParseOutput {
            status,
            structure,
            warning_flags: WarningFlags::from_raw(session.warning_flags()),
            message: session.message(),
            log: session.log(),
        })
    }

    fn acquire(
        &self,
    ) -> Result<parking_lot::MutexGuard<'_, BackendCell<B>>, EngineError> {
        let mut cell = self.gate.acquire()?;
        if !cell.initialized {
            log::trace!("initializing engine backend");
            cell.backend.initialize()?;
            cell.initialized = true;
        }
        Ok(cell)
    }
}
