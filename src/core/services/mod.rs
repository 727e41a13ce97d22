pub mod entry_service;
pub mod journal_service;
pub mod view_service;

pub use entry_service::EntryService;
pub use journal_service::JournalService;
pub use view_service::{JournalView, ViewService};

use crate::errors::PapayaError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] PapayaError),
    #[error("{0}")]
    Invalid(String),
}
