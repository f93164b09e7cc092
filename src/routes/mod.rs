pub mod admin;

pub mod catalog;

pub mod submissions;

pub mod frontend;

pub use admin::configure_admin_routes;
pub use catalog::configure_catalog_routes;
pub use frontend::configure_frontend_routes;
pub use submissions::configure_submission_routes;
