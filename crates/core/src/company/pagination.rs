use serde::{Deserialize, Serialize};

use super::types::Company;

/// Page number used when the query omits or garbles `pageNumber`.
pub const DEFAULT_PAGE_NUMBER: usize = 1;

/// Page size used when the query omits or garbles `pageLimit`.
pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// A requested page of a full table scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl PageRequest {
    /// Builds a request from raw query values.
    ///
    /// Missing, zero and negative values fall back to the defaults.
    pub fn from_query(page_number: Option<i64>, page_limit: Option<i64>) -> Self {
        let positive = |value: Option<i64>| {
            value
                .filter(|v| *v > 0)
                .and_then(|v| usize::try_from(v).ok())
        };

        Self {
            page: positive(page_number).unwrap_or(DEFAULT_PAGE_NUMBER),
            limit: positive(page_limit).unwrap_or(DEFAULT_PAGE_LIMIT),
        }
    }

    /// Half-open index range of this page, clamped to `len`.
    pub fn bounds(&self, len: usize) -> (usize, usize) {
        let start = self.page.saturating_sub(1).saturating_mul(self.limit);
        let end = start.saturating_add(self.limit);
        (start.min(len), end.min(len))
    }
}

/// One page of companies plus the size of the full scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyPage {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub companies: Vec<Company>,
}

/// Slices a full scan result into the requested page.
pub fn paginate(mut companies: Vec<Company>, request: PageRequest) -> CompanyPage {
    let total = companies.len();
    let (start, end) = request.bounds(total);

    companies.truncate(end);
    let companies = companies.split_off(start);

    CompanyPage {
        page: request.page,
        limit: request.limit,
        total,
        companies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::company::CompanyId;

    fn companies(count: i64) -> Vec<Company> {
        (1..=count).map(|i| Company::new(CompanyId(i))).collect()
    }

    fn ids(page: &CompanyPage) -> Vec<i64> {
        page.companies.iter().map(|c| c.id.0).collect()
    }

    #[test]
    fn test_defaults() {
        let request = PageRequest::from_query(None, None);
        assert_eq!(request, PageRequest { page: 1, limit: 10 });
        assert_eq!(request, PageRequest::default());
    }

    #[test]
    fn test_non_positive_values_fall_back_to_defaults() {
        assert_eq!(
            PageRequest::from_query(Some(0), Some(-3)),
            PageRequest { page: 1, limit: 10 }
        );
        assert_eq!(
            PageRequest::from_query(Some(-1), Some(0)),
            PageRequest { page: 1, limit: 10 }
        );
    }

    #[test]
    fn test_first_page_uses_default_limit() {
        let page = paginate(companies(25), PageRequest::default());

        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 10);
        assert_eq!(page.total, 25);
        assert_eq!(ids(&page), (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_last_partial_page() {
        let page = paginate(companies(25), PageRequest::from_query(Some(3), Some(10)));

        assert_eq!(page.total, 25);
        assert_eq!(ids(&page), (21..=25).collect::<Vec<_>>());
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let page = paginate(companies(5), PageRequest::from_query(Some(4), Some(2)));

        assert_eq!(page.page, 4);
        assert_eq!(page.limit, 2);
        assert_eq!(page.total, 5);
        assert!(page.companies.is_empty());
    }

    #[test]
    fn test_huge_values_do_not_overflow() {
        let request = PageRequest::from_query(Some(i64::MAX), Some(i64::MAX));
        let page = paginate(companies(3), request);

        assert_eq!(page.total, 3);
        assert!(page.companies.is_empty());
    }

    #[test]
    fn test_empty_scan() {
        let page = paginate(Vec::new(), PageRequest::default());
        assert_eq!(page.total, 0);
        assert!(page.companies.is_empty());
    }
}
