//! Concurrent per-key requests.
//!
//! Screens that need one request per product (discounts, pricing) issue them all at once and
//! join the results. The spawned tasks are owned by a [`JoinSet`], so dropping the returned
//! future, failing, or being cancelled aborts every request still in flight.

use std::future;

use tokio::task::JoinSet;
use tracing::debug;

use crate::api::errors::ApiError;

/// Runs `fetch` for every key concurrently and returns the results in key order.
///
/// # Errors
///
/// Returns the first [`ApiError`] produced by any request; the remaining requests are aborted.
pub async fn fan_out<K, T, F, Fut>(
    keys: impl IntoIterator<Item = K>,
    fetch: F,
) -> Result<Vec<(K, T)>, ApiError>
where
    K: Clone,
    F: FnMut(K) -> Fut,
    Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    T: Send + 'static,
{
    fan_out_until(keys, fetch, future::pending()).await
}

/// [`fan_out`], abandoned as soon as `cancelled` completes.
///
/// # Errors
///
/// - [`ApiError::Cancelled`]: `cancelled` completed before every request finished.
/// - Otherwise the first [`ApiError`] produced by any request.
pub async fn fan_out_until<K, T, F, Fut, C>(
    keys: impl IntoIterator<Item = K>,
    mut fetch: F,
    cancelled: C,
) -> Result<Vec<(K, T)>, ApiError>
where
    K: Clone,
    F: FnMut(K) -> Fut,
    Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    T: Send + 'static,
    C: Future<Output = ()>,
{
    let keys: Vec<K> = keys.into_iter().collect();
    let mut tasks = JoinSet::new();

    for (index, key) in keys.iter().cloned().enumerate() {
        let request = fetch(key);

        tasks.spawn(async move { (index, request.await) });
    }

    debug!(requests = keys.len(), "fanned out requests");

    let mut slots: Vec<Option<T>> = keys.iter().map(|_| None).collect();

    let join_all = async {
        while let Some(joined) = tasks.join_next().await {
            let (index, result) = joined?;

            if let Some(slot) = slots.get_mut(index) {
                *slot = Some(result?);
            }
        }

        Ok::<_, ApiError>(())
    };

    tokio::select! {
        outcome = join_all => outcome?,
        () = cancelled => {
            debug!("fan-out cancelled, aborting in-flight requests");

            return Err(ApiError::Cancelled);
        }
    }

    Ok(keys
        .into_iter()
        .zip(slots)
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect())
}
