mod common;
pub use self::common::{Query, QueryCommon, SortDirection};

mod dataset;
pub use self::dataset::{DatasetQuery, FieldFilter, FilterOp, SortKey};
