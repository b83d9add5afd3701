//! Backend client: wire models, the four read endpoints, and the fetch
//! cycle bookkeeping that keeps overlapping refreshes from publishing
//! stale data.

use std::cell::Cell;

use futures::future::{select, Either};
use futures::pin_mut;
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::filters::FilterCriteria;

const REQUEST_TIMEOUT_MS: u32 = 10_000;
const RETRY_ATTEMPTS: u32 = 3;
const RETRY_BACKOFF_MS: u32 = 250;

/// One parsed SMS transaction as the backend stores it. Optional columns
/// are nullable in the backend's table; absent and `null` both decode to
/// `None`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: String,
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub receiver: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub raw_body: Option<String>,
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde(default)]
    pub fee: Option<f64>,
}

/// Per-category aggregate, ordered by the backend with the largest total
/// first.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub count: u64,
    pub total: f64,
}

/// Per-month aggregate. The amount sums come from SQL `SUM` and can be
/// `NULL` for months with no matching rows.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MonthlyAggregate {
    pub month: String,
    pub transaction_count: u64,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub incoming_amount: Option<f64>,
    #[serde(default)]
    pub outgoing_amount: Option<f64>,
}

/// The consolidated result of one successful fetch cycle. Replaced as a
/// whole; consumers never see a half-updated mix of old and new data.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub categories: Vec<String>,
    pub summary: Vec<CategorySummary>,
    pub monthly: Vec<MonthlyAggregate>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        source: gloo_net::Error,
    },
    #[error("request to {url} timed out after {ms}ms")]
    Timeout { url: String, ms: u32 },
    #[error("{url} returned HTTP {code}")]
    Status { url: String, code: u16 },
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        source: gloo_net::Error,
    },
    #[error("fetch cycle {generation} was superseded by a newer filter change")]
    Superseded { generation: u64 },
}

impl FetchError {
    /// Worth another attempt: the request never produced a usable
    /// response. A body that decodes wrongly will decode wrongly again.
    fn is_transient(&self) -> bool {
        match self {
            FetchError::Network { .. } | FetchError::Timeout { .. } => true,
            FetchError::Status { code, .. } => *code >= 500,
            FetchError::Decode { .. } | FetchError::Superseded { .. } => false,
        }
    }
}

/// Hands out one generation number per fetch cycle. Results may arrive in
/// any order; only the cycle begun last is allowed to publish.
#[derive(Debug, Default)]
pub struct CycleCounter {
    latest: Cell<u64>,
}

impl CycleCounter {
    pub fn begin(&self) -> u64 {
        let generation = self.latest.get() + 1;
        self.latest.set(generation);
        generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.latest.get() == generation
    }
}

/// Runs one full fetch cycle against the backend.
///
/// Transactions are filtered by the criteria; summary and monthly
/// aggregates are always whole-dataset. The category list never changes
/// within a session, so a previously fetched list is reused instead of
/// requested again. Any single failure fails the whole cycle; no partial
/// snapshot is ever returned.
pub async fn fetch_snapshot(
    base_url: &str,
    criteria: &FilterCriteria,
    cached_categories: Option<Vec<String>>,
) -> Result<Snapshot, FetchError> {
    let url = format!("{base_url}/api/transactions{}", criteria.query_string());
    let transactions = get_json::<Vec<Transaction>>(&url).await?;

    let categories = match cached_categories {
        Some(cached) if !cached.is_empty() => cached,
        _ => get_json::<Vec<String>>(&format!("{base_url}/api/categories")).await?,
    };

    let summary = get_json::<Vec<CategorySummary>>(&format!("{base_url}/api/summary")).await?;

    let monthly =
        get_json::<Vec<MonthlyAggregate>>(&format!("{base_url}/api/monthly-transactions")).await?;

    Ok(Snapshot {
        transactions,
        categories,
        summary,
        monthly,
    })
}

/// GET with a per-request timeout and a short retry ladder for transient
/// failures.
async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    let mut attempt = 0;
    loop {
        match send_once(url).await {
            Ok(response) => {
                return response.json::<T>().await.map_err(|source| FetchError::Decode {
                    url: url.to_string(),
                    source,
                })
            }
            Err(err) if err.is_transient() && attempt + 1 < RETRY_ATTEMPTS => {
                attempt += 1;
                let delay = RETRY_BACKOFF_MS * (1 << attempt);
                log::warn!("{err}; retrying in {delay}ms ({attempt}/{})", RETRY_ATTEMPTS - 1);
                TimeoutFuture::new(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}

async fn send_once(url: &str) -> Result<Response, FetchError> {
    let request = Request::get(url).send();
    let timeout = TimeoutFuture::new(REQUEST_TIMEOUT_MS);
    pin_mut!(request, timeout);

    let response = match select(request, timeout).await {
        Either::Left((result, _)) => result.map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?,
        Either::Right(_) => {
            return Err(FetchError::Timeout {
                url: url.to_string(),
                ms: REQUEST_TIMEOUT_MS,
            })
        }
    };

    if !response.ok() {
        return Err(FetchError::Status {
            url: url.to_string(),
            code: response.status(),
        });
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_cycle_supersedes_older_one() {
        let cycles = CycleCounter::default();
        let first = cycles.begin();
        let second = cycles.begin();
        // Whichever order the responses land in, only the cycle begun
        // last may publish.
        assert!(!cycles.is_current(first));
        assert!(cycles.is_current(second));

        let third = cycles.begin();
        assert!(!cycles.is_current(second));
        assert!(cycles.is_current(third));
    }

    #[test]
    fn generations_increase_monotonically() {
        let cycles = CycleCounter::default();
        let a = cycles.begin();
        let b = cycles.begin();
        let c = cycles.begin();
        assert!(a < b && b < c);
    }

    #[test]
    fn transaction_decodes_with_absent_and_null_optionals() {
        let row: Transaction = serde_json::from_str(
            r#"{
                "id": 42,
                "date": "2024-03-15 14:22:00",
                "category": "airtime_purchases",
                "amount": 2000,
                "sender": null,
                "raw_body": "You have purchased airtime"
            }"#,
        )
        .unwrap();
        assert_eq!(row.id, 42);
        assert_eq!(row.amount, 2000.0);
        assert_eq!(row.sender, None);
        assert_eq!(row.reference, None);
        assert_eq!(row.raw_body.as_deref(), Some("You have purchased airtime"));
        assert_eq!(row.balance, None);
    }

    #[test]
    fn monthly_aggregate_decodes_with_missing_sums() {
        let row: MonthlyAggregate = serde_json::from_str(
            r#"{"month": "2024-03", "transaction_count": 7, "outgoing_amount": null}"#,
        )
        .unwrap();
        assert_eq!(row.month, "2024-03");
        assert_eq!(row.transaction_count, 7);
        assert_eq!(row.incoming_amount, None);
        assert_eq!(row.outgoing_amount, None);
    }

    #[test]
    fn category_summary_decodes() {
        let rows: Vec<CategorySummary> = serde_json::from_str(
            r#"[{"category": "bank_deposits", "count": 3, "total": 200000}]"#,
        )
        .unwrap();
        assert_eq!(rows[0].category, "bank_deposits");
        assert_eq!(rows[0].count, 3);
        assert_eq!(rows[0].total, 200000.0);
    }

    #[test]
    fn only_unanswered_requests_are_retried() {
        let network = FetchError::Timeout {
            url: "http://localhost:5000/api/summary".into(),
            ms: 1,
        };
        assert!(network.is_transient());

        let server_error = FetchError::Status {
            url: "x".into(),
            code: 503,
        };
        assert!(server_error.is_transient());

        let not_found = FetchError::Status {
            url: "x".into(),
            code: 404,
        };
        assert!(!not_found.is_transient());

        let superseded = FetchError::Superseded { generation: 9 };
        assert!(!superseded.is_transient());
    }
}
