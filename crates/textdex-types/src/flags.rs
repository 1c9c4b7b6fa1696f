//! Field flag encoding.
//!
//! Each field descriptor carries up to three optional integer flags that
//! control how the value is stored and indexed. The integer values are a
//! wire-level compatibility contract:
//!
//! - store: 1 = stored, 2 = not stored, 4 = stored compressed
//! - index: 16 = not indexed, 32 = tokenized, 64 = exact match,
//!   128 = exact match without norms
//! - termvector: 256 = none, 512 = enabled, +1024 with positions,
//!   +2048 with offsets (bits combinable by addition)
//!
//! Absent flags default to: not stored, exact-match untokenized, no term
//! vectors.

use thiserror::Error;

/// A field flag carried an integer outside the documented encoding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlagError {
    #[error("unrecognized store flag: {0}")]
    Store(u32),

    #[error("unrecognized index flag: {0}")]
    Index(u32),

    #[error("unrecognized termvector flag: {0}")]
    TermVector(u32),
}

/// Whether the field value is kept in the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreFlag {
    Stored,
    #[default]
    NotStored,
    /// Treated the same as [`StoreFlag::Stored`]; the backing engine decides
    /// its own stored-field compression.
    Compressed,
}

impl StoreFlag {
    pub fn from_wire(value: u32) -> Result<Self, FlagError> {
        match value {
            1 => Ok(StoreFlag::Stored),
            2 => Ok(StoreFlag::NotStored),
            4 => Ok(StoreFlag::Compressed),
            other => Err(FlagError::Store(other)),
        }
    }

    pub fn to_wire(self) -> u32 {
        match self {
            StoreFlag::Stored => 1,
            StoreFlag::NotStored => 2,
            StoreFlag::Compressed => 4,
        }
    }

    /// True when the value must be retrievable from the document store.
    pub fn is_stored(self) -> bool {
        !matches!(self, StoreFlag::NotStored)
    }
}

/// How the field value is analyzed for search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexFlag {
    NotIndexed,
    Tokenized,
    #[default]
    Exact,
    ExactNoNorms,
}

impl IndexFlag {
    pub fn from_wire(value: u32) -> Result<Self, FlagError> {
        match value {
            16 => Ok(IndexFlag::NotIndexed),
            32 => Ok(IndexFlag::Tokenized),
            64 => Ok(IndexFlag::Exact),
            128 => Ok(IndexFlag::ExactNoNorms),
            other => Err(FlagError::Index(other)),
        }
    }

    pub fn to_wire(self) -> u32 {
        match self {
            IndexFlag::NotIndexed => 16,
            IndexFlag::Tokenized => 32,
            IndexFlag::Exact => 64,
            IndexFlag::ExactNoNorms => 128,
        }
    }
}

/// Term vector capabilities requested for a field.
///
/// Modeled as a capability struct rather than a bitmask; `positions` or
/// `offsets` imply `enabled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TermVectorFlag {
    pub enabled: bool,
    pub positions: bool,
    pub offsets: bool,
}

impl TermVectorFlag {
    const NONE: u32 = 256;
    const YES: u32 = 512;
    const POSITIONS: u32 = 1024;
    const OFFSETS: u32 = 2048;

    pub fn from_wire(value: u32) -> Result<Self, FlagError> {
        if value == Self::NONE {
            return Ok(TermVectorFlag::default());
        }
        let known = Self::YES | Self::POSITIONS | Self::OFFSETS;
        if value & Self::YES == 0 || value & !known != 0 {
            return Err(FlagError::TermVector(value));
        }
        Ok(TermVectorFlag {
            enabled: true,
            positions: value & Self::POSITIONS != 0,
            offsets: value & Self::OFFSETS != 0,
        })
    }

    pub fn to_wire(self) -> u32 {
        if !self.enabled {
            return Self::NONE;
        }
        let mut value = Self::YES;
        if self.positions {
            value |= Self::POSITIONS;
        }
        if self.offsets {
            value |= Self::OFFSETS;
        }
        value
    }
}
