//! Sharing rendered analysis reports with a recipient address.

mod mailer;
mod relay;
mod service;
mod smtp;


pub use mailer::{DeliveryError, OutboundReport, ReportMailer, UnconfiguredMailer};
pub use relay::HttpMailRelay;
pub use smtp::SmtpMailer;
pub use service::{sample_result, validate_recipient, DeliveryReceipt, ReportDeliveryService};
