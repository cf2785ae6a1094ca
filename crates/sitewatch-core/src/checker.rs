//! Site reachability probes.
//!
//! Each configured site gets one HTTP GET raced against a hard deadline.
//! Probes run concurrently and results come back in input order; a
//! failed probe is data for the dashboard, never an error. Nothing is
//! retried and nothing is cached across renders.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::CACHE_CONTROL;
use tracing::{debug, warn};

use crate::error::CoreResult;
use crate::types::{Site, SiteState, SiteStatus};

/// Hard deadline for a single probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Identifying user-agent sent with every probe.
const PROBE_USER_AGENT: &str = "sitewatch-probe/0.1";

/// Outcome of racing a fallible future against a deadline.
#[derive(Debug)]
pub enum Raced<T, E> {
    Ok(T),
    Err(E),
    TimedOut,
}

/// Race `fut` against `deadline`, tagging the three possible outcomes.
///
/// The future is dropped (and with it any in-flight request aborted)
/// when the deadline elapses first.
pub async fn race_deadline<F, T, E>(deadline: Duration, fut: F) -> Raced<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(Ok(value)) => Raced::Ok(value),
        Ok(Err(e)) => Raced::Err(e),
        Err(_) => Raced::TimedOut,
    }
}

/// Probes every configured site concurrently, each under its own
/// deadline.
#[derive(Clone)]
pub struct StatusChecker {
    client: Client,
    timeout: Duration,
}

impl StatusChecker {
    /// Create a checker with the default 10-second probe deadline.
    pub fn new() -> CoreResult<Self> {
        let client = Client::builder().user_agent(PROBE_USER_AGENT).build()?;
        Ok(Self {
            client,
            timeout: PROBE_TIMEOUT,
        })
    }

    /// Override the probe deadline (for testing).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Probe all `sites`, preserving input order in the output.
    ///
    /// `self_host` is the hostname the dashboard itself is being served
    /// from; a site matching it is reported online without a network
    /// call. The returned vector always has exactly `sites.len()`
    /// entries — the call resolves only once every probe has settled.
    pub async fn check_sites(&self, sites: &[Site], self_host: &str) -> Vec<SiteStatus> {
        let probes = sites.iter().map(|site| self.check_site(site, self_host));
        futures::future::join_all(probes).await
    }

    /// Probe a single site and classify the outcome.
    pub async fn check_site(&self, site: &Site, self_host: &str) -> SiteStatus {
        // A Host header may carry a port; the comparison is host-only.
        let self_host = self_host.split(':').next().unwrap_or(self_host);
        if site.host().eq_ignore_ascii_case(self_host) {
            // The dashboard is reporting on itself; probing would loop
            // back into the serving instance.
            return SiteStatus {
                site: site.clone(),
                state: SiteState::Online,
                status_code: 200,
                status_text: "normal (self)".to_string(),
            };
        }

        let request = self
            .client
            .get(&site.url)
            .header(CACHE_CONTROL, "no-store")
            .send();

        let (state, status_code, status_text) = match race_deadline(self.timeout, request).await {
            Raced::Ok(response) => {
                let code = response.status().as_u16();
                if code == 200 {
                    (SiteState::Online, code, "normal".to_string())
                } else {
                    debug!(host = %site.host(), code, "probe returned non-200");
                    (SiteState::Offline, code, format!("HTTP {code}"))
                }
            }
            Raced::TimedOut => {
                warn!(host = %site.host(), timeout = ?self.timeout, "probe timed out");
                (SiteState::Offline, 0, "timed out".to_string())
            }
            Raced::Err(e) => {
                warn!(host = %site.host(), error = %e, "probe failed");
                (SiteState::Offline, 0, "network error or blocked".to_string())
            }
        };

        SiteStatus {
            site: site.clone(),
            state,
            status_code,
            status_text,
        }
    }
}
