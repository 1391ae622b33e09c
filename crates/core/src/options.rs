//! Listing options: filters, sorting and pagination for the movie catalog.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{current_utc_year, UserId};
use crate::validation::FieldViolation;

/// Smallest accepted page number.
pub const MIN_PAGE: i64 = 1;

/// Page size bounds, inclusive.
pub const MIN_PAGE_SIZE: i64 = 1;
pub const MAX_PAGE_SIZE: i64 = 25;

/// Defaults applied when the caller does not send pagination parameters.
pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

/// The closed set of sortable fields.
///
/// Public names are what clients send; column names are what the storage
/// layer orders by. Nothing outside this table ever reaches a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    YearOfRelease,
}

impl SortField {
    /// All sortable fields, in the order they are listed to clients.
    pub const ALL: [SortField; 2] = [SortField::Title, SortField::YearOfRelease];

    pub fn public_name(self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::YearOfRelease => "year",
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::YearOfRelease => "year_of_release",
        }
    }

    /// Case-insensitive lookup by public name.
    pub fn from_public_name(name: &str) -> Option<SortField> {
        Self::ALL
            .into_iter()
            .find(|f| f.public_name().eq_ignore_ascii_case(name))
    }
}

/// Parameters of a catalog listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetAllMoviesOptions {
    /// Substring filter on the title.
    pub title: Option<String>,
    /// Exact release-year filter.
    pub year_of_release: Option<i32>,
    /// Public sort field name as sent by the client (validated, not trusted).
    pub sort_field: Option<String>,
    pub sort_order: SortOrder,
    pub page: i64,
    pub page_size: i64,
    /// Scopes `user_rating` on each returned movie.
    pub user_id: Option<UserId>,
}

impl Default for GetAllMoviesOptions {
    fn default() -> Self {
        Self {
            title: None,
            year_of_release: None,
            sort_field: None,
            sort_order: SortOrder::Ascending,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            user_id: None,
        }
    }
}

impl GetAllMoviesOptions {
    /// Parse a `sortBy` value where a leading `-` selects descending order.
    pub fn with_sort_by(mut self, sort_by: Option<&str>) -> Self {
        match sort_by.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => {
                let (field, order) = match raw.strip_prefix('-') {
                    Some(rest) => (rest, SortOrder::Descending),
                    None => (raw, SortOrder::Ascending),
                };
                self.sort_field = Some(field.to_string());
                self.sort_order = order;
            }
            None => {
                self.sort_field = None;
                self.sort_order = SortOrder::Ascending;
            }
        }
        self
    }

    pub fn with_user(mut self, user_id: Option<UserId>) -> Self {
        self.user_id = user_id;
        self
    }

    /// Resolved sort column. Unknown names resolve to `None` (default order);
    /// validation rejects them before a query is ever built.
    pub fn sort(&self) -> Option<(SortField, SortOrder)> {
        self.sort_field
            .as_deref()
            .and_then(SortField::from_public_name)
            .map(|field| (field, self.sort_order))
    }

    /// Row offset of the first item on the requested page. Saturates for
    /// pages past `i64::MAX` rows, which simply yield no items.
    pub fn offset(&self) -> i64 {
        (self.page - 1).max(0).saturating_mul(self.page_size)
    }

    /// Apply every listing rule and report all violations together.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut violations = Vec::new();

        let max_year = current_utc_year();
        if let Some(year) = self.year_of_release {
            if year > max_year {
                violations.push(FieldViolation::new(
                    "yearOfRelease",
                    format!("Year of release must be {max_year} or earlier"),
                ));
            }
        }

        if let Some(field) = self.sort_field.as_deref() {
            if SortField::from_public_name(field).is_none() {
                violations.push(FieldViolation::new(
                    "sortField",
                    format!("You can only sort by 'title' or 'year', but not '{field}'"),
                ));
            }
        }

        if self.page < MIN_PAGE {
            violations.push(FieldViolation::new(
                "page",
                format!("Page must be at least {MIN_PAGE}"),
            ));
        }

        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&self.page_size) {
            violations.push(FieldViolation::new(
                "pageSize",
                format!("You can get between {MIN_PAGE_SIZE} and {MAX_PAGE_SIZE} movies per page"),
            ));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(violations))
        }
    }
}
