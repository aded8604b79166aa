//! Restaurant page loading
//!
//! A page owns a [`PageLifetime`]; leaving the page cancels it. Loads race
//! against that token, so a fetch that resolves after the page is gone is
//! dropped instead of reaching a view that no longer exists.

use shared::FailureKind;
use shared::error::AppResult;
use shared::models::RestaurantId;
use table_client::DirectoryClient;
use tokio_util::sync::CancellationToken;

use crate::selector::AvailabilitySelector;

/// Cancellation scope of one page instance
#[derive(Debug, Default)]
pub struct PageLifetime {
    token: CancellationToken,
}

impl PageLifetime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Leave the page
    pub fn close(&self) {
        self.token.cancel();
    }
}

impl Drop for PageLifetime {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[derive(Debug)]
pub enum PageLoad<T> {
    Loaded(T),
    /// The restaurant does not exist; shown as "not available", not as an error
    NotAvailable(RestaurantId),
    /// The page was left before the fetch resolved
    Abandoned,
}

/// Fetch a restaurant and set up its selector
///
/// Network and provider failures come back as `Err`; a missing restaurant
/// is [`PageLoad::NotAvailable`].
pub async fn load_restaurant(
    directory: &dyn DirectoryClient,
    id: &RestaurantId,
    lifetime: &CancellationToken,
) -> AppResult<PageLoad<AvailabilitySelector>> {
    let result = tokio::select! {
        biased;
        _ = lifetime.cancelled() => {
            tracing::debug!(restaurant_id = %id, "Restaurant page left before load finished");
            return Ok(PageLoad::Abandoned);
        }
        result = directory.fetch_restaurant(id) => result,
    };

    match result {
        Ok(detail) => {
            tracing::debug!(
                restaurant_id = %id,
                dates = detail.available_dates.len(),
                "Restaurant loaded"
            );
            Ok(PageLoad::Loaded(AvailabilitySelector::new(detail)))
        }
        Err(e) => {
            let err = shared::AppError::from(e);
            if err.kind() == FailureKind::NotFound {
                tracing::info!(restaurant_id = %id, "Restaurant not available");
                Ok(PageLoad::NotAvailable(id.clone()))
            } else {
                tracing::warn!(restaurant_id = %id, error = %err, "Failed to load restaurant");
                Err(err)
            }
        }
    }
}
