//! Synchronous client for the CacheFly v2.5 REST API.
//!
//! # Overview
//! `CacheflyClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network. `Cachefly` pairs it with a
//! `Transport` (a blocking `ureq` agent by default) and exposes one method per
//! API operation, grouped by resource.
//!
//! # Design
//! - `CacheflyClient` is stateless; it holds only the base URL and token.
//! - Each operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit and testable.
//! - Updating service options is a two-call protocol: fetch the option
//!   metadata, reject unknown names locally, then PUT the whole map.
//!
//! ```no_run
//! use cachefly_core::{Cachefly, ClientConfig, ServiceOptions};
//!
//! # fn example() -> Result<(), cachefly_core::ApiError> {
//! let api = Cachefly::from_config(&ClientConfig::new().with_token("token"));
//! let mut options = ServiceOptions::new();
//! options.insert("cors".to_string(), true.into());
//! let updated = api.service_options().update_options("svc-123", &options)?;
//! println!("{updated:?}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod service;
pub mod types;
pub mod validation;

pub use client::CacheflyClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, Result, ValidationError, ValidationErrorEntry, OPTION_NOT_AVAILABLE};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use service::{AccountsService, Cachefly, ServiceOptionsService};
pub use types::{
    Account, LegacyApiKey, MetadataMeta, OptionMetadata, OptionProperty, OptionValue,
    OptionsMetadata, ServiceOptions,
};
pub use validation::validate_options;
