/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Configuration of a [`RevocationLogStore`](crate::revocation_log::store::RevocationLogStore).
//!
//! The configuration can be defined using the builder pattern, for example:
//!
//! ```
//! # use revlog_rs::config::RevocationLogConfig;
//! let config = RevocationLogConfig::builder()
//!     .no_amt_data(true)
//!     .log_events(false)
//!     .build();
//! assert!(config.no_amt_data);
//! ```

use typed_builder::TypedBuilder;

/// User-defined parameters of the revocation log:
/// 1. The "No Amount Data" flag. If set to "true", the channel balances are not stored in new
///    revocation logs, saving up to 22 bytes per log. Breach retribution then has to find the
///    balances from the commitment transaction itself.
/// 2. The "Log Events" flag. If set to "true", puts, fetches and deletes are logged.
#[derive(Clone, Debug, PartialEq, Eq, TypedBuilder)]
#[builder(builder_method(doc = "
    Create a builder for building a [RevocationLogConfig]. On the builder call the following methods
    to construct a valid [RevocationLogConfig].

    Optional:
    - `.no_amt_data(...)` (default: false)
    - `.log_events(...)` (default: true)
"))]
pub struct RevocationLogConfig {
    #[builder(
        default = false,
        setter(doc = "Leave balances out of new revocation logs? Optional.")
    )]
    pub no_amt_data: bool,
    #[builder(default = true, setter(doc = "Enable logging? Optional."))]
    pub log_events: bool,
}

impl Default for RevocationLogConfig {
    fn default() -> Self {
        RevocationLogConfig::builder().build()
    }
}
