//! Catalog pipeline for a small flat-file clothing storefront: the
//! schema-versioned line parser, the ordered in-memory store, filter/sort
//! views, and the canonical text codec used for full-file rewrites.
//!
//! The pipeline is a synchronous, single-writer design. Every mutation
//! re-reads the backing file and rewrites it wholesale; there is no locking
//! and no atomic rename, which is the deliberate contract for a single-user
//! desktop catalog.

pub mod cart;
pub mod codec;
pub mod credentials;
pub mod error;
pub mod parse;
pub mod record;
pub mod store;
pub mod view;

///
/// CONSTANTS
///

/// Field delimiter for catalog and cart lines.
///
/// Only the trailing field of a line may contain this character; earlier
/// positions are strictly positional.
pub const FIELD_DELIMITER: char = ';';

/// Field delimiter for credential lines.
pub const CREDENTIAL_DELIMITER: char = ':';

///
/// Prelude
///
/// Domain vocabulary only. Errors and the line-level parse/serialize helpers
/// are not re-exported here.
///

pub mod prelude {
    pub use crate::{
        record::ProductRecord,
        store::Catalog,
        view::{Category, SortMode, ViewQuery},
    };
}
