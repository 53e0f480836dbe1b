//! Ringtone candidates: the catalog collaborator, the immutable candidate
//! list with its sentinel slots, and the caching builder that also owns
//! audition playback.

mod builder;
mod candidates;
mod catalog;
mod tone_type;

pub use builder::RingtoneCatalogBuilder;
pub use candidates::{CandidateList, RingtoneCandidate};
pub use catalog::{AuditionSample, CatalogConfig, CatalogRow, RingtoneCatalog};
pub use tone_type::ToneType;

/// Persisted marker for "no sound".
pub const SILENT_PATH: &str = "";
