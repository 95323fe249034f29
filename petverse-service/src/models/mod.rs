//! Domain models for petverse-service.

mod adoption;
mod lost_found;
mod pet;

pub use adoption::{Adoption, AdoptionOutcome, AdoptionRow, AdoptionView, ResetSummary};
pub use lost_found::{CreateLostFoundReport, LostFoundReport, ReportType};
pub use pet::{image_path, NewPet, Pet, PetView, SAMPLE_PETS};
