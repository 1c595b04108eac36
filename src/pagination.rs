//! Pagination and sorting for Dependency-Track list endpoints.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::request::{Request, RequestOption};
use crate::version::ServerVersion;

/// Default page size used by [`fetch_all`].
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Maximum pages to fetch (safety limit).
const MAX_PAGES: u32 = 1000;

/// First server release that reports `X-Total-Count` on list endpoints.
pub const TOTAL_COUNT_SUPPORT: ServerVersion = ServerVersion::new(4, 0, 0);

/// A page of results from the Dependency-Track API.
///
/// `total_count` is the number of matching items across all pages, so it
/// can be larger than `items.len()` when the server truncated the page.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Total number of items across all pages.
    pub total_count: u64,
    /// Whether `total_count` came from the server rather than the page length.
    #[serde(skip)]
    pub total_reported: bool,
}

impl<T> Page<T> {
    /// Create a new page from items and a server-reported total count.
    #[must_use]
    pub fn new(items: Vec<T>, total_count: u64) -> Self {
        Self {
            items,
            total_count,
            total_reported: true,
        }
    }

    /// Create a page whose total is exactly the items it holds.
    ///
    /// Used when the server reports no total; such a page says nothing about
    /// whether further pages exist.
    #[must_use]
    pub fn complete(items: Vec<T>) -> Self {
        let total_count = items.len() as u64;
        Self {
            items,
            total_count,
            total_reported: false,
        }
    }

    /// Whether more items exist beyond this page.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.total_count > self.items.len() as u64
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            total_reported: self.total_reported,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            total_reported: false,
        }
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Which page to request.
///
/// The default requests nothing in particular and lets the server apply its
/// own paging; `Some(0)` is sent as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageOptions {
    /// Page number (1-indexed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    /// Number of items per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl PageOptions {
    /// Request a specific page.
    #[must_use]
    pub fn new(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number: Some(page_number),
            page_size: Some(page_size),
        }
    }
}

impl RequestOption for PageOptions {
    fn apply(&self, request: &mut Request) -> Result<()> {
        if let Some(number) = self.page_number {
            request.set_query("pageNumber", number.to_string());
        }
        if let Some(size) = self.page_size {
            request.set_query("pageSize", size.to_string());
        }
        Ok(())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Server-side sorting of a list endpoint.
///
/// Nothing is sent unless `field` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOptions {
    /// Field to sort by (e.g. `name`).
    pub field: Option<String>,
    /// Direction, only sent alongside a field.
    #[serde(default)]
    pub order: SortOrder,
}

impl SortOptions {
    /// Sort by `field` in the given direction.
    #[must_use]
    pub fn by(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: Some(field.into()),
            order,
        }
    }
}

impl RequestOption for SortOptions {
    fn apply(&self, request: &mut Request) -> Result<()> {
        match self.field.as_deref() {
            Some(field) if !field.is_empty() => {
                request.set_query("sortName", field);
                request.set_query("sortOrder", self.order.as_str());
            }
            _ => {}
        }
        Ok(())
    }
}

/// Fetch every page of a paged operation and concatenate the items.
///
/// `fetch` is called with successive [`PageOptions`] until a page comes back
/// empty or the server-reported total has been collected. Pages without a
/// reported total are followed until one comes back short.
///
/// # Example
///
/// ```ignore
/// let query = ComponentListQuery::for_project(project);
/// let all = dtrack::fetch_all(|po| Component::list_page(&client, &query, po)).await?;
/// ```
pub async fn fetch_all<T, F, Fut>(mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(PageOptions) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut all_items = Vec::new();
    let mut page_number = 1;

    loop {
        let page = fetch(PageOptions::new(page_number, DEFAULT_PAGE_SIZE)).await?;
        let fetched = page.items.len();
        let done = if page.total_reported {
            all_items.len() + fetched >= page.total_count as usize
        } else {
            fetched < DEFAULT_PAGE_SIZE as usize
        };
        all_items.extend(page.items);

        if fetched == 0 || done {
            break;
        }
        page_number += 1;

        // Safety limit to prevent infinite loops
        if page_number > MAX_PAGES {
            tracing::warn!("Reached pagination limit of {} pages, stopping", MAX_PAGES);
            break;
        }
    }

    Ok(all_items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn build(options: &[&dyn RequestOption]) -> Request {
        let base = Url::parse("https://dtrack.example.com/").unwrap();
        Request::build(&base, reqwest::Method::GET, "api/v1/component/hash/abc", options).unwrap()
    }

    #[test]
    fn test_default_page_options_send_nothing() {
        let req = build(&[&PageOptions::default()]);
        assert!(req.query().is_empty());
    }

    #[test]
    fn test_page_options_set_both_params() {
        let req = build(&[&PageOptions::new(2, 50)]);
        assert_eq!(req.query_param("pageNumber"), Some("2"));
        assert_eq!(req.query_param("pageSize"), Some("50"));
    }

    #[test]
    fn test_explicit_zero_page_is_sent() {
        let req = build(&[&PageOptions {
            page_number: Some(0),
            page_size: None,
        }]);
        assert_eq!(req.query_param("pageNumber"), Some("0"));
        assert!(req.query_param("pageSize").is_none());
    }

    #[test]
    fn test_sort_without_field_sends_nothing() {
        let req = build(&[&SortOptions {
            field: None,
            order: SortOrder::Desc,
        }]);
        assert!(req.query().is_empty());

        let req = build(&[&SortOptions {
            field: Some(String::new()),
            order: SortOrder::Desc,
        }]);
        assert!(req.query().is_empty());
    }

    #[test]
    fn test_sort_with_field() {
        let req = build(&[&SortOptions::by("name", SortOrder::Desc)]);
        assert_eq!(req.query_param("sortName"), Some("name"));
        assert_eq!(req.query_param("sortOrder"), Some("desc"));
    }

    #[test]
    fn test_page_truncation() {
        let page: Page<i32> = Page::new(vec![1; 10], 57);
        assert!(page.is_truncated());
        assert_eq!(page.len(), 10);

        let page = Page::complete(vec![1, 2, 3]);
        assert_eq!(page.total_count, 3);
        assert!(!page.is_truncated());
        assert!(!page.total_reported);
    }

    #[test]
    fn test_page_map() {
        let page = Page::new(vec![1, 2, 3], 3);
        let mapped = page.map(|x| x * 2);
        assert_eq!(mapped.items, vec![2, 4, 6]);
        assert_eq!(mapped.total_count, 3);
    }

    #[tokio::test]
    async fn test_fetch_all_follows_total() {
        let data: Vec<u32> = (0..250).collect();
        let mut requested = Vec::new();

        let all = fetch_all(|po| {
            requested.push(po);
            let number = po.page_number.unwrap() as usize;
            let size = po.page_size.unwrap() as usize;
            let items = data
                .iter()
                .skip((number - 1) * size)
                .take(size)
                .copied()
                .collect::<Vec<_>>();
            async move { Ok(Page::new(items, 250)) }
        })
        .await
        .unwrap();

        assert_eq!(all, data);
        assert_eq!(requested.len(), 3);
        assert_eq!(requested[0], PageOptions::new(1, DEFAULT_PAGE_SIZE));
        assert_eq!(requested[2], PageOptions::new(3, DEFAULT_PAGE_SIZE));
    }

    #[tokio::test]
    async fn test_fetch_all_without_reported_total_reads_until_short_page() {
        let data: Vec<u32> = (0..250).collect();
        let mut calls = 0;

        let all = fetch_all(|po| {
            calls += 1;
            let number = po.page_number.unwrap() as usize;
            let size = po.page_size.unwrap() as usize;
            let items = data
                .iter()
                .skip((number - 1) * size)
                .take(size)
                .copied()
                .collect::<Vec<_>>();
            async move { Ok(Page::complete(items)) }
        })
        .await
        .unwrap();

        assert_eq!(all, data);
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn test_fetch_all_stops_on_empty_page() {
        let mut calls = 0;
        let all: Vec<u32> = fetch_all(|_| {
            calls += 1;
            async { Ok(Page::new(Vec::new(), 100)) }
        })
        .await
        .unwrap();

        assert!(all.is_empty());
        assert_eq!(calls, 1);
    }
}
