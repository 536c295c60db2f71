//! Pagination request and result types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::DomainError;

/// Columns a listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Id,
    Amount,
    HolderName,
    Status,
    OrderId,
    PaymentMethodId,
}

impl SortField {
    /// Column name in the `payments` table.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Amount => "amount",
            Self::HolderName => "holder_name",
            Self::Status => "status",
            Self::OrderId => "order_id",
            Self::PaymentMethodId => "payment_method_id",
        }
    }
}

impl std::str::FromStr for SortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "id" => Ok(Self::Id),
            "amount" => Ok(Self::Amount),
            "holder_name" => Ok(Self::HolderName),
            "status" => Ok(Self::Status),
            "order_id" => Ok(Self::OrderId),
            "payment_method_id" => Ok(Self::PaymentMethodId),
            other => Err(DomainError::UnknownSortField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Ordering for a listing: one column and a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    pub field: SortField,
    pub direction: Direction,
}

impl Sort {
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Desc,
        }
    }

    /// SQL `ORDER BY` clause. Ties are broken by id so paging stays stable.
    pub fn order_by_clause(&self) -> String {
        self.order_by_clause_with(|field| field.column())
    }

    /// Like [`Sort::order_by_clause`], with the sort expression for each field
    /// supplied by the caller (e.g. a cast for backends storing text).
    pub fn order_by_clause_with(&self, expr: impl Fn(SortField) -> &'static str) -> String {
        let direction = self.direction.as_sql();
        if self.field == SortField::Id {
            format!("ORDER BY id {direction}")
        } else {
            format!("ORDER BY {} {direction}, id ASC", expr(self.field))
        }
    }
}

impl std::str::FromStr for Sort {
    type Err = DomainError;

    /// Parses `field` or `field,asc` / `field,desc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.split_once(',') {
            Some((field, dir)) => {
                let direction = match dir.trim().to_ascii_lowercase().as_str() {
                    "asc" => Direction::Asc,
                    "desc" => Direction::Desc,
                    other => {
                        return Err(DomainError::Validation(format!(
                            "sort direction must be asc or desc, got '{other}'"
                        )));
                    }
                };
                (field, direction)
            }
            None => (s, Direction::Asc),
        };
        Ok(Self {
            field: field.parse()?,
            direction,
        })
    }
}

/// Which slice of the records to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
    sort: Option<Sort>,
}

impl PageRequest {
    /// Creates a request for the zero-based `page` holding at most `size` items.
    pub fn new(page: u32, size: u32) -> Result<Self, DomainError> {
        if size == 0 {
            return Err(DomainError::Validation(
                "page size must be greater than zero".into(),
            ));
        }
        Ok(Self {
            page,
            size,
            sort: None,
        })
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn sort(&self) -> Option<Sort> {
        self.sort
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// One page of results plus the metadata needed to fetch the others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Zero-based page index
    pub page: u32,
    /// Requested page size
    pub size: u32,
    /// Number of rows across all pages
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            page: request.page(),
            size: request.size(),
            total_elements,
            total_pages: total_elements.div_ceil(u64::from(request.size())),
        }
    }

    /// Converts every item, keeping the page metadata as-is.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}
