mod client;
mod errors;
mod query;
pub mod types;
pub use self::client::Client;
pub use self::errors::Error;
pub use self::query::{DatasetQuery, FieldFilter, FilterOp, Query, QueryCommon, SortDirection, SortKey};
pub use self::types::{Links, Meta, PaginatedResponse, RawRecord};
