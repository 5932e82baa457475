pub mod constants;
pub mod document;
pub mod field;
pub mod project;
pub mod stage;
