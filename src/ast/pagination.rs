use serde::{Deserialize, Serialize};

use crate::error::{QueryError, QueryResult};

/// Postgres reads LIMIT and OFFSET as bigint.
const MAX_BIGINT: u64 = i64::MAX as u64;

/// Offset pagination over 1-based pages.
///
/// `limit = size`, `offset = (page - 1) * size`. Both inputs are checked on
/// construction, so a `Pagination` value always renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPagination")]
pub struct Pagination {
    page: u64,
    size: u64,
    offset: u64,
}

impl Pagination {
    pub fn new(page: u64, size: u64) -> QueryResult<Self> {
        if page < 1 {
            return Err(QueryError::InvalidPagination(format!(
                "page must be at least 1, got {}",
                page
            )));
        }
        if size < 1 {
            return Err(QueryError::InvalidPagination(format!(
                "size must be at least 1, got {}",
                size
            )));
        }
        if size > MAX_BIGINT {
            return Err(QueryError::InvalidPagination(format!(
                "size {} exceeds bigint range",
                size
            )));
        }
        let offset = (page - 1)
            .checked_mul(size)
            .filter(|offset| *offset <= MAX_BIGINT)
            .ok_or_else(|| {
                QueryError::InvalidPagination(format!(
                    "offset for page {} of size {} exceeds bigint range",
                    page, size
                ))
            })?;
        Ok(Self { page, size, offset })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn limit(&self) -> u64 {
        self.size
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }
}

#[derive(Deserialize)]
struct RawPagination {
    page: u64,
    size: u64,
}

impl TryFrom<RawPagination> for Pagination {
    type Error = QueryError;

    fn try_from(raw: RawPagination) -> Result<Self, Self::Error> {
        Pagination::new(raw.page, raw.size)
    }
}
