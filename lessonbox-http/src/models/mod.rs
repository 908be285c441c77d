pub mod lessons;
pub mod system;
pub mod todos;

// Re-export all models for easier imports
pub use lessons::*;
pub use system::*;
pub use todos::*;
