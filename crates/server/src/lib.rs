//! HTTP surface for marquee: catalog proxy, favorites, and session login.

pub mod api;
pub mod metrics;
pub mod state;
