pub mod catalog;
pub mod submissions;

pub use catalog::CatalogService;
pub use submissions::SubmissionService;
