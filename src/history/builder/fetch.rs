use crate::core::{FetchError, YfClient};
use crate::history::wire::{ChartEnvelope, Events, MetaNode, QuoteBlock};

pub(crate) struct Fetched {
    pub(crate) ts: Vec<i64>,
    pub(crate) quote: QuoteBlock,
    pub(crate) adjclose: Vec<Option<f64>>,
    pub(crate) events: Option<Events>,
    pub(crate) meta: Option<MetaNode>,
}

/// Issues one GET against the chart endpoint for `symbol` over `[period1, period2)`.
pub(crate) async fn fetch_chart(
    client: &YfClient,
    symbol: &str,
    period: (i64, i64),
    include_actions: bool,
) -> Result<Fetched, FetchError> {
    let mut url = client.base_chart().join(symbol)?;
    {
        let mut qp = url.query_pairs_mut();
        // An inverted period is forwarded as-is; Yahoo decides what it means.
        qp.append_pair("period1", &period.0.to_string());
        qp.append_pair("period2", &period.1.to_string());
        qp.append_pair("interval", "1d");
        if include_actions {
            qp.append_pair("events", "div|split");
        }
        qp.append_pair("includePrePost", "false");
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(%url, "requesting chart");

    let resp = client.http().get(url.clone()).send().await?;
    let status = resp.status();
    let body = crate::core::net::get_text(resp, symbol).await?;

    if !status.is_success() {
        // Yahoo reports unknown symbols as 404 with a chart error object; surface that
        // instead of the bare status when it is present.
        if let Some(err) = provider_error(&body) {
            return Err(err);
        }
        return Err(FetchError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    decode_chart(&body)
}

fn provider_error(body: &str) -> Option<FetchError> {
    let parsed: ChartEnvelope = serde_json::from_str(body).ok()?;
    let err = parsed.chart?.error?;
    Some(FetchError::Provider {
        code: err.code,
        description: err.description,
    })
}

fn decode_chart(body: &str) -> Result<Fetched, FetchError> {
    let parsed: ChartEnvelope = serde_json::from_str(body)
        .map_err(|e| FetchError::Data(format!("json parse error: {e}")))?;

    let chart = parsed
        .chart
        .ok_or_else(|| FetchError::Data("missing chart".into()))?;

    if let Some(err) = chart.error {
        return Err(FetchError::Provider {
            code: err.code,
            description: err.description,
        });
    }

    let r0 = chart
        .result
        .ok_or_else(|| FetchError::Data("missing result".into()))?
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::Data("empty result".into()))?;

    let ts = r0.timestamp.unwrap_or_default();
    let indicators = r0.indicators.unwrap_or_default();

    // A range with no trading days comes back without timestamps and often without
    // a quote block; that is an empty series, not a malformed one.
    let quote = match indicators.quote.into_iter().next() {
        Some(q) => q,
        None if ts.is_empty() => QuoteBlock::default(),
        None => return Err(FetchError::Data("missing quote".into())),
    };
    let adjclose = indicators
        .adjclose
        .into_iter()
        .next()
        .map(|a| a.adjclose)
        .unwrap_or_default();

    Ok(Fetched {
        ts,
        quote,
        adjclose,
        events: r0.events,
        meta: r0.meta,
    })
}
