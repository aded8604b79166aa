//! TableMaster - 餐厅预订客户端
//!
//! Restaurant discovery, date and slot selection, waitlists, and the handoff
//! to hosted checkout. Each flow catches its own failures and reports them
//! as a [`Notice`].

pub mod app;
pub mod auth;
pub mod booking_store;
pub mod checkout;
pub mod config;
pub mod logger;
pub mod notice;
pub mod outcome;
pub mod page;
pub mod selector;
pub mod session;
pub mod waitlist;

#[cfg(test)]
mod testing;

pub use app::App;
pub use booking_store::PendingBookingStore;
pub use checkout::{CheckoutEntry, CheckoutHandoff, CheckoutState, PayOutcome, PaymentRedirect};
pub use config::Config;
pub use notice::{Notice, NoticeLevel};
pub use outcome::{Outcome, OutcomePage, OutcomeView};
pub use page::{PageLifetime, PageLoad, load_restaurant};
pub use selector::{AvailabilitySelector, PageActions, SelectionState};
pub use session::{SessionContext, SessionEvent};
