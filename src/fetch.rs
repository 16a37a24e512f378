use crate::error::Result;
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Fetch the full body of `url_str` as text.
///
/// The body is handed back exactly as received; nothing is truncated or
/// re-encoded before the parser sees it. A non-success status or transport
/// failure maps to `Error::Network`, an elapsed client timeout to
/// `Error::Timeout`. Timeout policy itself lives on the `Client` the caller
/// builds.
pub async fn fetch_text(client: &Client, url_str: &str) -> Result<String> {
    let url = Url::parse(url_str)
        .map_err(|e| crate::Error::MalformedInput(format!("invalid URL `{url_str}`: {e}")))?;

    let body = client
        .get(url.as_str())
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    debug!(url = %url, bytes = body.len(), "fetched source body");
    Ok(body)
}
