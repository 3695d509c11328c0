//! Pagination and period query parameters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_with::{DisplayFromStr, serde_as};
use utoipa::ToSchema;

use crate::domain::value_objects::DateRange;
use crate::error::AppError;

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PAGE_SIZE: u32 = 25;

/// Pagination query parameters.
///
/// Uses `serde_with` to parse page numbers from query strings as integers,
/// which also works when the struct is flattened into a larger query.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl PaginationParams {
    /// Validates pagination parameters and converts to database offset/limit.
    ///
    /// # Defaults
    ///
    /// - `page`: 1
    /// - `page_size`: 25
    ///
    /// # Validation
    ///
    /// - Page must be > 0
    /// - Page size must be between 10 and 1000
    ///
    /// # Returns
    ///
    /// `(offset, limit)` tuple for SQL queries.
    pub fn validate_and_get_offset_limit(&self) -> Result<(i64, i64), String> {
        let page = self.page();
        let page_size = self.page_size();

        if page == 0 {
            return Err("Page must be greater than 0".to_string());
        }

        if !(10..=1000).contains(&page_size) {
            return Err("Page size must be between 10 and 1000".to_string());
        }

        let offset = (i64::from(page) - 1) * i64::from(page_size);
        let limit = i64::from(page_size);

        Ok((offset, limit))
    }

    /// Like [`Self::validate_and_get_offset_limit`], with the error as a 400.
    pub fn offset_limit(&self) -> Result<(i64, i64), AppError> {
        self.validate_and_get_offset_limit().map_err(|message| {
            AppError::bad_request(
                message,
                json!({ "page": self.page, "page_size": self.page_size }),
            )
        })
    }

    pub fn page(&self) -> u32 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

/// Page metadata returned with every list.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PageInfo {
    pub page: u32,
    pub page_size: u32,
    pub total: i64,
    pub total_pages: i64,
}

impl PageInfo {
    pub fn new(params: &PaginationParams, total: i64) -> Self {
        let page_size = params.page_size();
        let size = i64::from(page_size.max(1));
        Self {
            page: params.page(),
            page_size,
            total,
            total_pages: (total + size - 1) / size,
        }
    }
}

/// Paginated list response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub pagination: PageInfo,
}

impl<T> ListResponse<T> {
    pub fn new<E>(items: Vec<E>, params: &PaginationParams, total: i64) -> Self
    where
        T: From<E>,
    {
        Self {
            items: items.into_iter().map(T::from).collect(),
            pagination: PageInfo::new(params, total),
        }
    }
}

/// Inclusive `start`/`end` dates from the query string.
#[derive(Debug, Deserialize)]
pub struct PeriodParams {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PeriodParams {
    pub fn to_range(&self) -> Result<DateRange, AppError> {
        Ok(DateRange::new(self.start, self.end)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<u32>, page_size: Option<u32>) -> PaginationParams {
        PaginationParams { page, page_size }
    }

    #[test]
    fn test_defaults() {
        let (offset, limit) = params(None, None).validate_and_get_offset_limit().unwrap();
        assert_eq!(offset, 0);
        assert_eq!(limit, 25);
    }

    #[test]
    fn test_page_2_with_default_size() {
        let (offset, limit) = params(Some(2), None).validate_and_get_offset_limit().unwrap();
        assert_eq!(offset, 25);
        assert_eq!(limit, 25);
    }

    #[test]
    fn test_custom_page_and_size() {
        let (offset, limit) = params(Some(3), Some(50)).validate_and_get_offset_limit().unwrap();
        assert_eq!(offset, 100);
        assert_eq!(limit, 50);
    }

    #[test]
    fn test_page_zero_is_error() {
        assert!(params(Some(0), None).validate_and_get_offset_limit().is_err());
    }

    #[test]
    fn test_page_size_bounds() {
        assert!(params(None, Some(9)).validate_and_get_offset_limit().is_err());
        assert!(params(None, Some(10)).validate_and_get_offset_limit().is_ok());
        assert!(params(None, Some(1000)).validate_and_get_offset_limit().is_ok());
        let err = params(None, Some(1001)).validate_and_get_offset_limit().unwrap_err();
        assert_eq!(err, "Page size must be between 10 and 1000");
    }

    #[test]
    fn test_offset_limit_error_is_bad_request() {
        let err = params(Some(0), None).offset_limit().unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_page_info_rounds_up() {
        let info = PageInfo::new(&params(Some(2), Some(10)), 21);
        assert_eq!(info.total_pages, 3);
        assert_eq!(info.page, 2);

        assert_eq!(PageInfo::new(&params(None, None), 0).total_pages, 0);
    }

    #[test]
    fn test_period_params() {
        let p: PeriodParams =
            serde_json::from_str(r#"{"start": "2026-06-01", "end": "2026-06-03"}"#).unwrap();
        assert_eq!(p.to_range().unwrap().days(), 3);

        let reversed = PeriodParams {
            start: p.end,
            end: p.start,
        };
        assert_eq!(reversed.to_range().unwrap_err().code(), "VALIDATION_ERROR");
    }
}
