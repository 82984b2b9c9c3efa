pub mod json;
pub mod problem;
pub mod request_id;
