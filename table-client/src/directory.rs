// table-client/src/directory.rs
// Directory Service 客户端 - 餐厅、可订时段、候补名单

use async_trait::async_trait;
use shared::models::{
    AvailableDate, AvailableDateCreate, BookingRecord, ReservationCreate, RestaurantBooking,
    RestaurantDetail, RestaurantId, RestaurantSummary, SearchFilters, WaitlistEntry, WaitlistJoin,
};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::http::HttpTransport;

/// Directory Service API
///
/// One attempt per call; callers decide what to show on failure.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    async fn search_restaurants(&self, filters: &SearchFilters)
    -> ClientResult<Vec<RestaurantSummary>>;

    /// Profile plus availability. A missing restaurant is
    /// [`ClientError::RestaurantNotFound`].
    async fn fetch_restaurant(&self, id: &RestaurantId) -> ClientResult<RestaurantDetail>;

    async fn join_waitlist(&self, join: &WaitlistJoin) -> ClientResult<()>;

    async fn list_waitlist(&self, restaurant_id: &RestaurantId) -> ClientResult<Vec<WaitlistEntry>>;

    async fn remove_waitlist_entry(&self, entry_id: i64) -> ClientResult<()>;

    async fn list_user_bookings(&self, email: &str) -> ClientResult<Vec<BookingRecord>>;

    // ========== Operator side ==========

    /// The restaurant owned by `user_id`, if one has been created
    async fn restaurant_for_owner(&self, user_id: &str) -> ClientResult<Option<RestaurantDetail>>;

    async fn list_available_dates(
        &self,
        restaurant_id: &RestaurantId,
    ) -> ClientResult<Vec<AvailableDate>>;

    async fn add_available_date(&self, new: &AvailableDateCreate) -> ClientResult<()>;

    async fn delete_available_date(&self, date_id: i64) -> ClientResult<()>;

    async fn delete_time_slot(&self, slot_id: i64) -> ClientResult<()>;

    async fn create_reservation(&self, new: &ReservationCreate) -> ClientResult<()>;

    async fn list_restaurant_bookings(
        &self,
        restaurant_id: &RestaurantId,
    ) -> ClientResult<Vec<RestaurantBooking>>;
}

/// 网络 Directory 客户端
#[derive(Debug, Clone)]
pub struct NetworkDirectoryClient {
    http: HttpTransport,
}

impl NetworkDirectoryClient {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::from_config(&ClientConfig::new(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let http = HttpTransport::new(&config.directory_url, config.timeout, Default::default())?;
        Ok(Self { http })
    }

    /// 获取基础 URL
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

#[async_trait]
impl DirectoryClient for NetworkDirectoryClient {
    async fn search_restaurants(
        &self,
        filters: &SearchFilters,
    ) -> ClientResult<Vec<RestaurantSummary>> {
        tracing::debug!(?filters, "Searching restaurants");
        self.http
            .get_query("api/restaurants", &filters.to_query())
            .await
    }

    async fn fetch_restaurant(&self, id: &RestaurantId) -> ClientResult<RestaurantDetail> {
        tracing::debug!(restaurant_id = %id, "Fetching restaurant");
        self.http
            .get(&format!("api/restaurants/{}", id))
            .await
            .map_err(|e| match e {
                ClientError::NotFound(_) => ClientError::RestaurantNotFound(id.to_string()),
                other => other,
            })
    }

    async fn join_waitlist(&self, join: &WaitlistJoin) -> ClientResult<()> {
        tracing::debug!(restaurant_id = %join.restaurant_id, "Joining waitlist");
        self.http.post_unit("api/waitlist", join).await
    }

    async fn list_waitlist(&self, restaurant_id: &RestaurantId) -> ClientResult<Vec<WaitlistEntry>> {
        self.http.get(&format!("api/waitlist/{}", restaurant_id)).await
    }

    async fn remove_waitlist_entry(&self, entry_id: i64) -> ClientResult<()> {
        self.http.delete(&format!("api/waitlist/{}", entry_id)).await
    }

    async fn list_user_bookings(&self, email: &str) -> ClientResult<Vec<BookingRecord>> {
        self.http
            .get_query("api/bookings/user", &[("email", email)])
            .await
    }

    async fn restaurant_for_owner(&self, user_id: &str) -> ClientResult<Option<RestaurantDetail>> {
        let owned: Vec<RestaurantDetail> = self
            .http
            .get(&format!("api/restaurants/user/{}", user_id))
            .await?;
        Ok(owned.into_iter().next())
    }

    async fn list_available_dates(
        &self,
        restaurant_id: &RestaurantId,
    ) -> ClientResult<Vec<AvailableDate>> {
        self.http
            .get(&format!("api/reservations/{}/available_dates", restaurant_id))
            .await
    }

    async fn add_available_date(&self, new: &AvailableDateCreate) -> ClientResult<()> {
        tracing::debug!(restaurant_id = %new.restaurant_id, date = %new.date, "Adding available date");
        self.http
            .post_unit("api/reservations/available_dates", new)
            .await
    }

    async fn delete_available_date(&self, date_id: i64) -> ClientResult<()> {
        self.http
            .delete(&format!("api/reservations/available_dates/{}", date_id))
            .await
    }

    async fn delete_time_slot(&self, slot_id: i64) -> ClientResult<()> {
        self.http
            .delete(&format!("api/reservations/time_slots/{}", slot_id))
            .await
    }

    async fn create_reservation(&self, new: &ReservationCreate) -> ClientResult<()> {
        self.http.post_unit("api/reservations", new).await
    }

    async fn list_restaurant_bookings(
        &self,
        restaurant_id: &RestaurantId,
    ) -> ClientResult<Vec<RestaurantBooking>> {
        self.http
            .get_query(
                "api/bookings/restaurant-bookings",
                &[("restaurantId", restaurant_id.as_str())],
            )
            .await
    }
}
