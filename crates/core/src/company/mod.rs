mod error;
mod pagination;
mod requests;
mod status;
mod types;
mod update;

pub use error::{PayloadError, UpdateError};
pub use pagination::{paginate, CompanyPage, PageRequest, DEFAULT_PAGE_LIMIT, DEFAULT_PAGE_NUMBER};
pub use requests::{ClientStatusRequest, UpsertRequest};
pub use status::{count_client_statuses, ClientStatusCounts};
pub use types::{Company, CompanyId, CLIENT_STATUS_FIELD, ID_FIELD};
pub use update::UpdateExpression;
