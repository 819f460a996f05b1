pub mod diff;
pub mod path_restrictions;
