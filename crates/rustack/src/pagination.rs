//! Paginated list endpoints
//!
//! List endpoints answer `{total, limit, items}` one page at a time. Pages
//! are fetched in order and their raw `items` arrays spliced together, then
//! the combined array is decoded once.

use crate::Client;
use crate::args::Arguments;
use crate::error::{Error, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::value::RawValue;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    total: Option<u64>,
    #[serde(default)]
    limit: Option<u64>,
    items: Box<RawValue>,
}

impl Client {
    /// Fetch every page of `path` and decode the combined items into `C`.
    ///
    /// `page` is set on each request, overriding any `page` in `args`. The
    /// walk ends at the first empty page, or at an API error on any page
    /// after the first. Other failures are returned.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedItems`] when a page's `items` is not an array
    /// - [`Error::Decode`] when the combined array does not match `C`
    /// - any error from the first page, and non-API errors from later pages
    pub async fn get_all_pages<C: DeserializeOwned>(&self, path: &str, args: Arguments) -> Result<C> {
        let mut combined = String::from("[");
        let mut count = 0usize;
        let mut page_no: u32 = 1;

        loop {
            let page_args = args.clone().with("page", page_no.to_string());
            let page: Page = match self.get(path, page_args).await {
                Ok(page) => page,
                Err(Error::Api(err)) if page_no > 1 => {
                    debug!(path, page = page_no, status = err.status(), "Past the last page");
                    break;
                }
                Err(err) => return Err(err),
            };

            let inner = array_contents(path, page.items.get())?;
            if inner.is_empty() {
                break;
            }

            debug!(path, page = page_no, total = page.total, limit = page.limit, "Fetched page");

            if count > 0 {
                combined.push(',');
            }
            combined.push_str(inner);
            count += 1;
            page_no += 1;
        }

        combined.push(']');

        serde_json::from_str(&combined).map_err(|source| Error::Decode {
            url: path.to_string(),
            body: combined,
            source,
        })
    }
}

/// The text between the brackets of a raw JSON array, trimmed.
fn array_contents<'a>(path: &str, raw: &'a str) -> Result<&'a str> {
    let raw = raw.trim();
    raw.strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .map(str::trim)
        .ok_or_else(|| Error::MalformedItems {
            url: path.to_string(),
            reason: format!("expected a JSON array, got: {}", truncate(raw, 64)),
        })
}

fn truncate(raw: &str, max: usize) -> &str {
    match raw.char_indices().nth(max) {
        Some((idx, _)) => &raw[..idx],
        None => raw,
    }
}
