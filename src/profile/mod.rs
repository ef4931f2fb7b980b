mod dispatch;
pub mod field_mapper;
pub mod operation;
pub mod redirect;
pub mod route;
mod user_profile;

pub use dispatch::{execute_async, execute_blocking, outcome, parse_body, prepare_request, Outcome};
pub use operation::{Operation, OperationDescriptor};
pub use user_profile::UserProfile;
