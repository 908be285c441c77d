pub mod lessons;
pub mod system;
pub mod todos;

// Re-export all handlers for easier imports
pub use lessons::*;
pub use system::*;
pub use todos::*;
