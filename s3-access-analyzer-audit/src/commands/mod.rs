//! Commands module - service layer for S3 access audits

mod audit;
pub(crate) mod service;

pub use service::AuditService;
