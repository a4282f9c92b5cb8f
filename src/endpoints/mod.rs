//! Endpoint methods on [`Client`](crate::Client), grouped by resource.
//!
//! Each method maps its arguments onto one [`RequestDescriptor`](crate::RequestDescriptor)
//! and checks documented preconditions before anything is sent.

mod campaigns;
mod clients;
mod email_accounts;
mod leads;
mod webhooks;
