//! # Store Session
//!
//! An explicit handle over one load → mutate → save cycle. There is no
//! process-wide cached document; every caller opens its own session and
//! passes it (or the document inside it) to the operations it runs.
//!
//! ```text
//! open ──▶ document_mut()* ──▶ flush()* ──▶ close()
//! ```
//!
//! Batching several logical edits (a bulk reorder and a flag change, say)
//! into one session is how callers get atomicity: the edits land in a single
//! save.

use kwmap_core::KwmapError;

use crate::document::TaxonomyDocument;
use crate::store::RecordStore;

/// An open taxonomy document bound to its record store.
#[derive(Debug)]
pub struct TaxonomySession {
    store: RecordStore,
    document: TaxonomyDocument,
    dirty: bool,
}

impl TaxonomySession {
    /// Load the document behind `store`.
    pub fn open(store: RecordStore) -> Self {
        let document = store.load();
        Self {
            store,
            document,
            dirty: false,
        }
    }

    /// The in-memory document.
    pub fn document(&self) -> &TaxonomyDocument {
        &self.document
    }

    /// Mutable access. Marks the session as needing a save.
    pub fn document_mut(&mut self) -> &mut TaxonomyDocument {
        self.dirty = true;
        &mut self.document
    }

    /// Whether the document was handed out mutably since the last save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The backing store.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Save the document now and keep the session open.
    pub fn flush(&mut self) -> Result<(), KwmapError> {
        self.store.save(&mut self.document)?;
        self.dirty = false;
        Ok(())
    }

    /// Save if anything was mutated, then hand back the final document.
    pub fn close(mut self) -> Result<TaxonomyDocument, KwmapError> {
        if self.dirty {
            self.flush()?;
        }
        Ok(self.document)
    }
}
