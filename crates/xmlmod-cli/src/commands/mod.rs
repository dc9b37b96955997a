pub mod substitute;
pub mod tags;
pub mod validate;
pub mod values;
