//! Jarfolio catalog - artifact metadata tracking
//!
//! This module owns the in-memory catalog of tracked artifacts and
//! everything that revolves around it.
//!
//! # Overview
//!
//! The catalog system allows users to:
//! - Ingest artifacts from a remote reference or a local file
//! - Search, filter, and sort the catalog for display
//! - Export the catalog to a portable JSON document and merge one back in
//! - Persist every mutation as a whole-catalog snapshot
//!
//! # Architecture
//!
//! ```text
//! Presentation layer (CLI)
//!     │
//!     ├── mutators ──► CatalogStore ──► jarfolio_v1.json snapshot
//!     │                    │
//!     │                    └── digest engine / size probe (best effort)
//!     │
//!     └── display  ──► query::view() ◄── read-only derivation
//! ```

mod entry;
mod ingest;
mod query;
mod seed;
mod store;
mod transfer;

pub use entry::{format_bytes, Catalog, CatalogEntry, EntryDraft};
pub use ingest::{BestEffort, FileIngest, RemoteIngest};
pub use query::{view, SortMode};
pub use seed::seed_entries;
pub use store::{CatalogStore, SNAPSHOT_FILE};
pub use transfer::{export_snapshot, import_and_merge, TransferError};
