//! Test doubles for the external services

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use shared::models::{
    AvailableDate, AvailableDateCreate, BookingIntent, BookingRecord, ReservationCreate,
    RestaurantBooking, RestaurantDetail, RestaurantId, RestaurantSummary, SearchFilters, TimeSlot,
    UserProfile, WaitlistEntry, WaitlistJoin,
};
use table_client::types::{AuthUser, UserMetadata};
use table_client::{
    AuthSession, CheckoutSession, CheckoutSessionRequest, ClientError, ClientResult,
    DirectoryClient, IdentityProvider, PaymentProvider, SignUpOutcome,
};
use tokio::sync::Semaphore;

pub fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .unwrap()
        .with_timezone(&Utc)
}

pub struct RestaurantBuilder {
    detail: RestaurantDetail,
}

/// Restaurant with no dates; add them with [`RestaurantBuilder::date`]
pub fn restaurant(id: &str) -> RestaurantBuilder {
    RestaurantBuilder {
        detail: RestaurantDetail {
            id: RestaurantId::new(id),
            name: format!("Restaurant {id}"),
            description: String::new(),
            address: String::new(),
            rating: 4.0,
            price_range: "$$".into(),
            michelin: false,
            images: vec![],
            features: vec![],
            available_dates: vec![],
        },
    }
}

impl RestaurantBuilder {
    pub fn date(mut self, date: &str, slots: &[(&str, i64)]) -> Self {
        self.detail.available_dates.push(AvailableDate {
            id: None,
            date: date.to_string(),
            time_slots: slots
                .iter()
                .map(|(time, price)| TimeSlot {
                    id: None,
                    time: time.to_string(),
                    price: Decimal::new(*price, 0),
                })
                .collect(),
        });
        self
    }

    pub fn build(self) -> RestaurantDetail {
        self.detail
    }
}

/// Intent for the first listed slot, created 2025-02-20T09:00:00Z
pub fn intent_for(detail: &RestaurantDetail) -> BookingIntent {
    let date = &detail.available_dates[0];
    BookingIntent::from_selection(
        detail,
        &date.date,
        &date.time_slots[0].time,
        at("2025-02-20T09:00:00Z"),
    )
    .unwrap()
}

// ========== Directory ==========

/// In-memory directory with call counters
#[derive(Default)]
pub struct ScriptedDirectory {
    restaurants: Mutex<HashMap<String, RestaurantDetail>>,
    waitlist: Mutex<Vec<WaitlistJoin>>,
    waitlist_failure: Mutex<Option<fn() -> ClientError>>,
    fetch_failure: Mutex<Option<fn() -> ClientError>>,
    hang_fetches: AtomicBool,
    waitlist_gate: Option<Semaphore>,
    fetch_calls: AtomicUsize,
    waitlist_calls: AtomicUsize,
}

impl ScriptedDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_restaurant(self, detail: RestaurantDetail) -> Self {
        self.restaurants
            .lock()
            .insert(detail.id.to_string(), detail);
        self
    }

    /// Each waitlist join waits for one [`ScriptedDirectory::release_waitlist`]
    pub fn gate_waitlist(mut self) -> Self {
        self.waitlist_gate = Some(Semaphore::new(0));
        self
    }

    pub fn release_waitlist(&self) {
        if let Some(gate) = &self.waitlist_gate {
            gate.add_permits(1);
        }
    }

    /// Every fetch stays pending forever
    pub fn hang_fetches(&self) {
        self.hang_fetches.store(true, Ordering::SeqCst);
    }

    pub fn fail_fetches_with(&self, make: fn() -> ClientError) {
        *self.fetch_failure.lock() = Some(make);
    }

    pub fn fail_waitlist_with(&self, make: fn() -> ClientError) {
        *self.waitlist_failure.lock() = Some(make);
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn waitlist_calls(&self) -> usize {
        self.waitlist_calls.load(Ordering::SeqCst)
    }

    pub fn waitlist(&self) -> Vec<WaitlistJoin> {
        self.waitlist.lock().clone()
    }
}

#[async_trait]
impl DirectoryClient for ScriptedDirectory {
    async fn search_restaurants(
        &self,
        _filters: &SearchFilters,
    ) -> ClientResult<Vec<RestaurantSummary>> {
        Ok(self
            .restaurants
            .lock()
            .values()
            .map(|d| RestaurantSummary {
                id: d.id.clone(),
                name: d.name.clone(),
                rating: d.rating,
                cuisine: String::new(),
                price_range: d.price_range.clone(),
                district: String::new(),
                image: None,
                images: d.images.clone(),
            })
            .collect())
    }

    async fn fetch_restaurant(&self, id: &RestaurantId) -> ClientResult<RestaurantDetail> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.hang_fetches.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if let Some(make) = *self.fetch_failure.lock() {
            return Err(make());
        }
        self.restaurants
            .lock()
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| ClientError::RestaurantNotFound(id.to_string()))
    }

    async fn join_waitlist(&self, join: &WaitlistJoin) -> ClientResult<()> {
        self.waitlist_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.waitlist_gate {
            gate.acquire().await.unwrap().forget();
        }
        if let Some(make) = *self.waitlist_failure.lock() {
            return Err(make());
        }
        self.waitlist.lock().push(join.clone());
        Ok(())
    }

    async fn list_waitlist(&self, restaurant_id: &RestaurantId) -> ClientResult<Vec<WaitlistEntry>> {
        Ok(self
            .waitlist
            .lock()
            .iter()
            .filter(|j| &j.restaurant_id == restaurant_id)
            .enumerate()
            .map(|(i, j)| WaitlistEntry {
                id: i as i64 + 1,
                email: j.email.clone(),
                restaurant_id: Some(j.restaurant_id.clone()),
                joined_at: "2025-02-20T09:00:00Z".into(),
            })
            .collect())
    }

    async fn remove_waitlist_entry(&self, _entry_id: i64) -> ClientResult<()> {
        Ok(())
    }

    async fn list_user_bookings(&self, _email: &str) -> ClientResult<Vec<BookingRecord>> {
        Ok(vec![])
    }

    async fn restaurant_for_owner(&self, _user_id: &str) -> ClientResult<Option<RestaurantDetail>> {
        Ok(None)
    }

    async fn list_available_dates(
        &self,
        restaurant_id: &RestaurantId,
    ) -> ClientResult<Vec<AvailableDate>> {
        Ok(self
            .restaurants
            .lock()
            .get(restaurant_id.as_str())
            .map(|d| d.available_dates.clone())
            .unwrap_or_default())
    }

    async fn add_available_date(&self, _new: &AvailableDateCreate) -> ClientResult<()> {
        Ok(())
    }

    async fn delete_available_date(&self, _date_id: i64) -> ClientResult<()> {
        Ok(())
    }

    async fn delete_time_slot(&self, _slot_id: i64) -> ClientResult<()> {
        Ok(())
    }

    async fn create_reservation(&self, _new: &ReservationCreate) -> ClientResult<()> {
        Ok(())
    }

    async fn list_restaurant_bookings(
        &self,
        _restaurant_id: &RestaurantId,
    ) -> ClientResult<Vec<RestaurantBooking>> {
        Ok(vec![])
    }
}

// ========== Payment ==========

/// Payment provider whose replies can be held back
#[derive(Default)]
pub struct GatedPayment {
    gate: Option<Semaphore>,
    failure: Mutex<Option<fn() -> ClientError>>,
    requests: Mutex<Vec<CheckoutSessionRequest>>,
    calls: AtomicUsize,
}

impl GatedPayment {
    /// Replies immediately
    pub fn open() -> Self {
        Self::default()
    }

    /// Each reply waits for one [`GatedPayment::release`]
    pub fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::default()
        }
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    pub fn fail_with(&self, make: fn() -> ClientError) {
        *self.failure.lock() = Some(make);
    }

    pub fn succeed(&self) {
        *self.failure.lock() = None;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<CheckoutSessionRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl PaymentProvider for GatedPayment {
    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> ClientResult<CheckoutSession> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.requests.lock().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        if let Some(make) = *self.failure.lock() {
            return Err(make());
        }
        Ok(CheckoutSession {
            session_id: format!("cs_test_{n}"),
            url: None,
        })
    }
}

// ========== Identity ==========

/// Accepts any email with the password "secret"
#[derive(Default)]
pub struct ScriptedIdentity {
    sign_out_calls: AtomicUsize,
    sign_out_fails: AtomicBool,
}

impl ScriptedIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_sign_out(&self) {
        self.sign_out_fails.store(true, Ordering::SeqCst);
    }

    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }

    fn session(email: &str, name: &str) -> AuthSession {
        AuthSession {
            access_token: format!("jwt-{email}"),
            refresh_token: None,
            expires_in: Some(3600),
            user: AuthUser {
                id: format!("id-{email}"),
                email: Some(email.to_string()),
                user_metadata: UserMetadata {
                    full_name: Some(name.to_string()),
                    name: None,
                },
            },
        }
    }
}

#[async_trait]
impl IdentityProvider for ScriptedIdentity {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> ClientResult<AuthSession> {
        if password != "secret" {
            return Err(ClientError::AuthRejected("Invalid login credentials".into()));
        }
        Ok(Self::session(email, "Test User"))
    }

    async fn sign_up(
        &self,
        email: &str,
        _password: &str,
        display_name: &str,
    ) -> ClientResult<SignUpOutcome> {
        if email.starts_with("confirm") {
            return Ok(SignUpOutcome::ConfirmationRequired(UserProfile {
                id: format!("id-{email}"),
                email: email.to_string(),
                display_name: display_name.to_string(),
            }));
        }
        Ok(SignUpOutcome::Session(Self::session(email, display_name)))
    }

    async fn sign_out(&self, _access_token: &str) -> ClientResult<()> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        if self.sign_out_fails.load(Ordering::SeqCst) {
            return Err(ClientError::Unavailable {
                status: 503,
                message: "down".into(),
            });
        }
        Ok(())
    }

    fn oauth_authorize_url(&self, provider: &str, redirect_to: &str) -> ClientResult<reqwest::Url> {
        reqwest::Url::parse_with_params(
            "http://auth.test/auth/v1/authorize",
            &[("provider", provider), ("redirect_to", redirect_to)],
        )
        .map_err(|e| ClientError::InvalidUrl(e.to_string()))
    }
}
