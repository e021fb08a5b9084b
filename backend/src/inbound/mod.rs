//! Inbound adapters translating external requests into domain calls.
//!
//! Only an HTTP transport exists; framework types stay inside [`http`].

pub mod http;
