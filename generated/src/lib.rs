//! Locale tables generated at build time from the sample CLDR files under
//! `locales/`.
//!
//! [`complete`] holds locales with a value for every key, so its generated
//! coverage tests are compiled in as well. [`edge`] holds an empty entry and
//! values that need escaping, and is exercised by the integration tests.

/// Tables for `locales/complete`.
pub mod complete {
    include!(concat!(env!("OUT_DIR"), "/complete.rs"));
}


/// Tables for `locales/edge`.
pub mod edge {
    include!(concat!(env!("OUT_DIR"), "/edge.rs"));
}
