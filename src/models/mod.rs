pub mod donation;
pub mod form;
