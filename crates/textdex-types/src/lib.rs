//! # textdex-types
//!
//! Wire-level types shared between textdex and its upstream dispatcher.
//!
//! This crate defines the two halves of the command surface:
//! - Field flags: the integer-encoded store/index/termvector flags carried
//!   on each field descriptor, decoded into a small closed set of variants
//! - Commands: the JSON body shapes for the four indexing commands
//!
//! The integer encodings are a compatibility contract and must be preserved
//! bit-exactly; see [`flags`] for the full table.

pub mod command;
pub mod flags;

pub use command::{
    CreateIndexBody, FieldSpec, ItemBody, ResetIndexBody, INDEX_CREATION_REQUESTED,
    INDEX_RESET_REQUESTED, ITEM_CREATED, ITEM_UPDATED,
};
pub use flags::{FlagError, IndexFlag, StoreFlag, TermVectorFlag};
