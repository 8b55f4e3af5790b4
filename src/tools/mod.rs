// Shared macros
mod macros;

// Pipeline stages, leaf first
pub mod fetch;
pub mod extract;
pub mod batch;
pub mod merge;
