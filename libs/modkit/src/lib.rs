//! # ModKit - shared REST plumbing
//!
//! Building blocks every module uses at its HTTP boundary:
//!
//! - [`Problem`] / [`ProblemResponse`]: RFC 9457 error documents
//! - [`ApiJson`]: JSON body extractor whose rejections are rendered as problems
//! - [`RequestId`]: request id extractor shared by the ingress and module handlers

pub mod api;

pub use api::json::ApiJson;
pub use api::request_id::{RequestId, XRequestId};
pub use api::problem::{Problem, ProblemResponse, ValidationError, APPLICATION_PROBLEM_JSON};
