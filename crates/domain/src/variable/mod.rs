//! Global variable records and the profile that owns them

mod flatten;
mod profile;
mod record;

pub use flatten::{PropertyMap, flatten};
pub use profile::Profile;
pub use record::{GlobalVariable, PASSWORD_TYPE, field, parse_variables};
