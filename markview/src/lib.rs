//! Expose MarkView's internal API for use in integration testing. The
//! binary is the supported interface.
pub mod api;
pub mod cli;
pub mod error;
pub mod export;
pub mod html;
#[cfg(feature = "serve")]
pub mod serve;
pub mod site;
