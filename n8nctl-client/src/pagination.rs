//! Cursor pagination over list endpoints
//!
//! List endpoints return `{data: [...], nextCursor: string|null}`. Pages are
//! fetched strictly one at a time; memory holds only the accumulated results.

use std::future::Future;

use serde::Deserialize;
use tracing::warn;

use crate::error::Result;

/// Safety cap on sequential page fetches, in case a server never returns a
/// null cursor
pub const MAX_PAGES: usize = 100;

/// One page of a paginated list response
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(rename = "nextCursor", default)]
    pub next_cursor: Option<String>,
}

/// Drain a paginated endpoint into a single list
///
/// `fetch` is invoked with the cursor of the next page (`None` for the
/// first), and the returned pages' `data` are concatenated in server order.
/// Iteration stops when the cursor comes back null or after [`MAX_PAGES`]
/// pages; hitting the cap logs a warning, since the result may be truncated.
///
/// # Example
/// ```no_run
/// # use n8nctl_client::{N8nClient, WorkflowListParams, collect_pages};
/// # async fn example() -> n8nctl_client::Result<()> {
/// let client = N8nClient::new("https://acme.app.n8n.cloud", "key");
/// let params = WorkflowListParams::default();
/// let client = &client;
/// let workflows = collect_pages(|cursor| {
///     let mut params = params.clone();
///     params.cursor = cursor;
///     async move { client.list_workflows(&params).await }
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn collect_pages<T, F, Fut>(mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut all = Vec::new();
    let mut cursor: Option<String> = None;

    for _ in 0..MAX_PAGES {
        let page = fetch(cursor.take()).await?;
        all.extend(page.data);

        match page.next_cursor {
            Some(next) if !next.is_empty() => cursor = Some(next),
            _ => return Ok(all),
        }
    }

    warn!(
        pages = MAX_PAGES,
        collected = all.len(),
        "page cap reached with a non-null cursor, results may be truncated"
    );
    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_collect_pages_concatenates_in_order() {
        let pages = vec![
            Page {
                data: vec![1, 2],
                next_cursor: Some("a".to_string()),
            },
            Page {
                data: vec![3],
                next_cursor: Some("b".to_string()),
            },
            Page {
                data: vec![4, 5],
                next_cursor: None,
            },
        ];
        let mut seen_cursors = Vec::new();
        let mut iter = pages.into_iter();

        let all = collect_pages(|cursor| {
            seen_cursors.push(cursor.clone());
            let page = iter.next().expect("no fetch past the null cursor");
            async move { Ok(page) }
        })
        .await
        .unwrap();

        assert_eq!(all, vec![1, 2, 3, 4, 5]);
        assert_eq!(
            seen_cursors,
            vec![None, Some("a".to_string()), Some("b".to_string())]
        );
    }

    #[tokio::test]
    async fn test_collect_pages_single_page() {
        let all: Vec<i32> = collect_pages(|_| async {
            Ok(Page {
                data: vec![7],
                next_cursor: None,
            })
        })
        .await
        .unwrap();
        assert_eq!(all, vec![7]);
    }

    #[tokio::test]
    async fn test_collect_pages_respects_cap() {
        let mut calls = 0usize;
        let all: Vec<i32> = collect_pages(|_| {
            calls += 1;
            async {
                Ok(Page {
                    data: vec![0],
                    next_cursor: Some("more".to_string()),
                })
            }
        })
        .await
        .unwrap();
        assert_eq!(calls, MAX_PAGES);
        // Truncated, but everything fetched so far is still returned
        assert_eq!(all.len(), MAX_PAGES);
    }
}
