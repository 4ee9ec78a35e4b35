pub mod clients;
pub mod companies;
pub mod error;
pub mod health;

pub use error::{AppError, OrInternal};
