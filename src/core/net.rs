/// Read the response body as text.
pub(crate) async fn get_text(resp: reqwest::Response, _symbol: &str) -> Result<String, reqwest::Error> {
    let text = resp.text().await?;

    #[cfg(feature = "tracing")]
    tracing::debug!(symbol = _symbol, bytes = text.len(), "chart body received");

    Ok(text)
}
