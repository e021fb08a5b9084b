//! Request middleware shared by every route.
//!
//! Authentication gating lives with the HTTP adapter in
//! `inbound::http::access`; this module only carries request tracing.

pub mod trace;

pub use trace::Trace;
