pub mod figment;
pub mod validation;
