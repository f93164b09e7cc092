pub mod require_admin;

pub use require_admin::RequireAdminToken;
