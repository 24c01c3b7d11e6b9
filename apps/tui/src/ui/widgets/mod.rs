pub mod overlay;
pub mod radar;
