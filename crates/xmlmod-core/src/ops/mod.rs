pub mod batch;
pub mod enumerate;
pub mod substitute;
pub mod validate;
