pub mod filename;
pub mod parameter_error_handler;
pub mod validate;
pub mod watermark;

pub use filename::publish_file_name;
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
