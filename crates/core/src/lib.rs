//! Functional core for companydesk.
//!
//! Pure data types and functions shared by the server and the developer
//! tooling. Nothing in this crate performs I/O; storage backends implement
//! the traits in [`storage`] elsewhere.

pub mod api;
pub mod company;
pub mod serde;
pub mod storage;
