//! Data models for the barbershop

pub mod client;
pub mod report;
pub mod service;
pub mod tenant;
pub mod visit;

// Re-export commonly used types
pub use client::{Client, ClientSummary, CreateClient};
pub use report::{Period, PeriodReport, ReportOutcome, Summary};
pub use service::Service;
pub use tenant::Tenant;
pub use visit::{NewVisit, VisitEntry, VisitForm, VisitRecord};
