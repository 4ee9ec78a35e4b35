//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of `CompanyRepository`
//! using `aws-sdk-dynamodb`. The table has a single numeric partition key,
//! `id`, and no sort key.

mod conversions;
mod error;
mod repository;

pub use repository::DynamoDbRepository;
