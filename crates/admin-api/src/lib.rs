//! Typed client for the marketplace admin backend
//!
//! [`AdminApi`] wraps an [`admin_gateway::Gateway`] and exposes one method
//! per dashboard action: workers, customers, complaints, FAQs, support
//! tickets and base prices. Loose backend payloads are reshaped here so
//! callers always see the same field names.

pub mod base_price;
pub mod client;
pub mod complaints;
pub mod customers;
pub mod error;
pub mod faqs;
pub mod normalize;
pub mod tickets;
pub mod types;
pub mod workers;

#[cfg(test)]
mod testutil;

pub use client::{AdminApi, Envelope, Page, PageRequest};
pub use complaints::COMPLAINT_PAGE_SIZE;
pub use customers::{ACTIVE_CUSTOMER_STATUS, CUSTOMER_PAGE_SIZE};
pub use error::{Error, Result};
pub use faqs::{FAQ_PAGE_SIZE, NewFaq};
pub use normalize::{Worker, normalize_worker};
pub use tickets::{TICKET_PAGE_SIZE, Ticket};
pub use types::{Profession, SupportCategory, SupportStatus, WorkerStatus};
pub use workers::{PERMANENT_SUSPENSION_DAYS, WORKER_PAGE_SIZE, WorkerAction, WorkerQuery};
