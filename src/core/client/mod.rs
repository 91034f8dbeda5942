//! Public client surface + builder.
//! Defaults (UA, endpoint) live in `constants`.

mod constants;

use crate::core::FetchError;
use constants::{DEFAULT_BASE_CHART, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// HTTP client for the Yahoo Finance chart endpoint.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct YfClient {
    http: Client,
    base_chart: Url,
    auto_adjust: bool,
    keepna: bool,
}

impl YfClient {
    /// Create a new builder.
    pub fn builder() -> YfClientBuilder {
        YfClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
    pub(crate) fn base_chart(&self) -> &Url {
        &self.base_chart
    }
    pub(crate) fn auto_adjust(&self) -> bool {
        self.auto_adjust
    }
    pub(crate) fn keepna(&self) -> bool {
        self.keepna
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Debug, Default)]
pub struct YfClientBuilder {
    user_agent: Option<String>,
    base_chart: Option<Url>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    auto_adjust: bool,
    keepna: bool,
}

impl YfClientBuilder {
    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the chart API base (e.g., `https://query1.finance.yahoo.com/v8/finance/chart/`).
    ///
    /// The symbol is joined onto this URL, so it should end with a slash.
    pub fn base_chart(mut self, url: Url) -> Self {
        self.base_chart = Some(url);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Default for [`HistoryBuilder::auto_adjust`](crate::HistoryBuilder::auto_adjust)
    /// on every series this client fetches. Default: `false`.
    pub fn auto_adjust(mut self, yes: bool) -> Self {
        self.auto_adjust = yes;
        self
    }

    /// Default for [`HistoryBuilder::keepna`](crate::HistoryBuilder::keepna). Default: `false`.
    pub fn keepna(mut self, yes: bool) -> Self {
        self.keepna = yes;
        self
    }

    pub fn build(self) -> Result<YfClient, FetchError> {
        let base_chart = match self.base_chart {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_CHART)?,
        };

        let mut httpb =
            reqwest::Client::builder().user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        Ok(YfClient {
            http,
            base_chart,
            auto_adjust: self.auto_adjust,
            keepna: self.keepna,
        })
    }
}
