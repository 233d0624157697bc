//! View models handed to the templates.

pub mod applications;
pub mod campaigns;
pub mod categories;
pub mod profiles;
