//! # kwmap-store: Record Store and Group Repository
//!
//! Owns the persisted form of the keyword taxonomy and every operation that
//! mutates it directly.
//!
//! - **Document** (`document.rs`): the single structured document (groups,
//!   usage records, tag master, metadata) and the id-or-keyword resolver.
//! - **Record store** (`store.rs`): tolerant load, atomic wholesale save.
//! - **Session** (`session.rs`): explicit open → mutate → flush/close handle.
//! - **Repository** (`repository.rs`): group CRUD, bulk patches, rank
//!   tracking, tier changes and merges, with invariants checked before
//!   mutation.
//! - **Tags** (`tags.rs`): tag master maintenance.
//! - **Migration** (`migrate.rs`): one-time conversion of the legacy flat
//!   keyword schema.
//! - **Corpus** (`corpus.rs`): JSON content index reader.
//!
//! ## Crate Policy
//!
//! - Depends only on `kwmap-core` internally.
//! - Single writer. Concurrent sessions on the same file are last-writer-wins.

pub mod corpus;
pub mod document;
pub mod migrate;
pub mod repository;
pub mod session;
pub mod store;
pub mod tags;

pub use corpus::JsonCorpus;
pub use document::{DocumentMetadata, MatchKind, Resolution, TaxonomyDocument, DOCUMENT_VERSION};
pub use migrate::{migrate_legacy, migrate_legacy_file, MigrationReport};
pub use repository::BulkUpsertOutcome;
pub use session::TaxonomySession;
pub use store::RecordStore;
