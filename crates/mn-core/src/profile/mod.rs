//! Hair profile domain module.
//!
//! Draft accumulated by the setup wizard, the finalize payload, and the
//! stored row read back from the backend.

mod age;
mod completed;
mod draft;
mod goals;
mod kinds;

pub use age::{Age, AgeError};
pub use completed::{CompletedProfile, HairProfileRow, MissingProfileField};
pub use draft::{DraftProfile, ProfileField};
pub use goals::{HairGoals, MAX_HAIR_GOALS};
pub use kinds::{ChemicalTreatment, Gender, HairGoal, HairType, ProductPreference, RoutineIntensity};
