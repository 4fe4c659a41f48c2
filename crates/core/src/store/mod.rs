pub mod memory;

pub use memory::DocumentStore;
