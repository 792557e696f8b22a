pub mod filter;
pub mod operators;
pub mod pagination;
pub mod role;
pub mod sorting;
pub mod values;

pub use self::filter::{Filter, GroupNameFilter, MemberFilter, StartDateFilter};
pub use self::operators::{DateExpression, SortDirection};
pub use self::pagination::Pagination;
pub use self::role::MemberRole;
pub use self::sorting::Sorting;
pub use self::values::Param;
