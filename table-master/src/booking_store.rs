//! PendingBookingStore - 待支付预订
//!
//! Holds the one booking intent that bridges the restaurant page and
//! checkout. The record is versioned:
//!
//! ```json
//! {"version": 1, "intent": {"restaurantId": "3", "selectedDate": "2025-03-01", ...}}
//! ```
//!
//! There is a single slot per device: a later save overwrites an earlier one
//! (last writer wins). The record is cleared when an outcome page is reached
//! and ignored once older than the configured TTL.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::BookingIntent;

/// Current on-disk schema
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct PendingBookingFile {
    version: u32,
    intent: BookingIntent,
}

#[derive(Debug, Deserialize)]
struct VersionHeader {
    version: u32,
}

/// 待支付预订存储
#[derive(Debug, Clone)]
pub struct PendingBookingStore {
    file_path: PathBuf,
    ttl: Duration,
}

impl PendingBookingStore {
    pub fn new(file_path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            file_path: file_path.into(),
            ttl,
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Replace the pending booking
    pub fn save(&self, intent: &BookingIntent) -> AppResult<()> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = PendingBookingFile {
            version: SCHEMA_VERSION,
            intent: intent.clone(),
        };
        let content = serde_json::to_string_pretty(&file)?;
        std::fs::write(&self.file_path, content)?;
        tracing::debug!(
            restaurant_id = %intent.restaurant_id(),
            date = %intent.selected_date(),
            slot = %intent.selected_slot(),
            "Pending booking saved"
        );
        Ok(())
    }

    pub fn load(&self) -> Option<BookingIntent> {
        self.load_at(Utc::now())
    }

    /// Load the pending booking as seen at `now`
    ///
    /// Missing, unreadable, unknown-version and expired records all load as
    /// empty.
    pub fn load_at(&self, now: DateTime<Utc>) -> Option<BookingIntent> {
        match self.fetch_at(now) {
            Ok(intent) => Some(intent),
            Err(e) => {
                if e.code != ErrorCode::BookingIntentMissing {
                    tracing::warn!(code = %e.code, error = %e, "Pending booking ignored");
                }
                None
            }
        }
    }

    pub fn fetch(&self) -> AppResult<BookingIntent> {
        self.fetch_at(Utc::now())
    }

    /// Like [`Self::load_at`], but says why nothing usable is stored
    ///
    /// `BookingIntentMissing` when there is no record, `BookingIntentExpired`
    /// past the TTL, `StorageCorrupted` for an unreadable or unknown-version
    /// record.
    pub fn fetch_at(&self, now: DateTime<Utc>) -> AppResult<BookingIntent> {
        if !self.file_path.exists() {
            return Err(AppError::new(ErrorCode::BookingIntentMissing));
        }

        let content = std::fs::read_to_string(&self.file_path)?;

        let header: VersionHeader = serde_json::from_str(&content)?;
        if header.version != SCHEMA_VERSION {
            return Err(AppError::with_message(
                ErrorCode::StorageCorrupted,
                format!("Unknown pending booking schema version {}", header.version),
            ));
        }

        let file: PendingBookingFile = serde_json::from_str(&content)?;

        if file.intent.is_expired(now, self.ttl) {
            return Err(AppError::new(ErrorCode::BookingIntentExpired)
                .with_detail("restaurant_id", file.intent.restaurant_id().as_str())
                .with_detail("created_at", file.intent.created_at().to_rfc3339()));
        }

        Ok(file.intent)
    }

    /// Remove the pending booking, if any
    pub fn clear(&self) -> AppResult<()> {
        if self.file_path.exists() {
            std::fs::remove_file(&self.file_path)?;
            tracing::debug!("Pending booking cleared");
        }
        Ok(())
    }
}
