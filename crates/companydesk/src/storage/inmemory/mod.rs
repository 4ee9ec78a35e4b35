//! In-memory storage backend for development and testing.
//!
//! This module provides an in-memory implementation of `CompanyRepository`
//! that keeps all records in a BTreeMap wrapped in `Arc<RwLock<_>>`. Nothing is
//! persisted.
//!
//! # Example
//!
//! ```rust,ignore
//! use companydesk::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! // Use repo for testing...
//! ```

mod repository;

pub use repository::InMemoryRepository;
