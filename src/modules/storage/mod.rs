pub mod evidence_store;

pub use evidence_store::{sanitize_filename, EvidenceStore, StoredFile};
