mod meta;
pub use self::meta::{Links, Meta, PaginatedResponse, RawRecord};
