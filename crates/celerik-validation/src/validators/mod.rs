//! Built-in validation rules

pub mod choice;
pub mod custom;
pub mod length;
pub mod numeric;
pub mod required;
