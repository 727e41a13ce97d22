pub mod index;
pub mod services;
pub mod workspace;

pub use index::JournalIndex;
pub use workspace::Workspace;
