//! Executing layer: pairs a `CacheflyClient` with a `Transport`.
//!
//! Every method builds its request before touching the transport, so
//! precondition failures cost no network call. Nothing is cached between
//! calls; `update_options` re-reads metadata on each invocation.

use tracing::{debug, instrument, warn};

use crate::client::CacheflyClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{Transport, UreqTransport};
use crate::types::{Account, LegacyApiKey, OptionsMetadata, ServiceOptions};
use crate::validation::validate_options;

/// Entry point for the CacheFly API.
#[derive(Debug, Clone)]
pub struct Cachefly<T = UreqTransport> {
    client: CacheflyClient,
    transport: T,
}

impl Cachefly<UreqTransport> {
    pub fn from_config(config: &ClientConfig) -> Self {
        let mut client = CacheflyClient::new(&config.base_url);
        if let Some(token) = &config.token {
            client = client.with_token(token.clone());
        }
        Self::with_transport(client, UreqTransport::new(config.timeout))
    }
}

impl<T: Transport> Cachefly<T> {
    pub fn with_transport(client: CacheflyClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn accounts(&self) -> AccountsService<'_, T> {
        AccountsService { api: self }
    }

    pub fn service_options(&self) -> ServiceOptionsService<'_, T> {
        ServiceOptionsService { api: self }
    }
}

/// Account lookups.
#[derive(Debug)]
pub struct AccountsService<'a, T> {
    api: &'a Cachefly<T>,
}

impl<T: Transport> AccountsService<'_, T> {
    /// The account owning the configured token.
    #[instrument(skip(self))]
    pub fn get_current(&self) -> Result<Account, ApiError> {
        let c = &self.api.client;
        let req = c.build_get_current_account();
        c.parse_get_account(self.api.transport.execute(req)?)
    }

    #[instrument(skip(self))]
    pub fn get(&self, id: &str) -> Result<Account, ApiError> {
        let c = &self.api.client;
        let req = c.build_get_account(id)?;
        c.parse_get_account(self.api.transport.execute(req)?)
    }
}

/// Per-service options and the legacy API key.
#[derive(Debug)]
pub struct ServiceOptionsService<'a, T> {
    api: &'a Cachefly<T>,
}

impl<T: Transport> ServiceOptionsService<'_, T> {
    #[instrument(skip(self))]
    pub fn get_options(&self, service_id: &str) -> Result<ServiceOptions, ApiError> {
        let c = &self.api.client;
        let req = c.build_get_options(service_id)?;
        c.parse_get_options(self.api.transport.execute(req)?)
    }

    #[instrument(skip(self))]
    pub fn get_options_metadata(&self, service_id: &str) -> Result<OptionsMetadata, ApiError> {
        let c = &self.api.client;
        let req = c.build_get_options_metadata(service_id)?;
        let metadata = c.parse_get_options_metadata(self.api.transport.execute(req)?)?;
        debug!(count = metadata.meta.count, entries = metadata.data.len(), "fetched options metadata");
        Ok(metadata)
    }

    /// Validate `options` against fresh metadata, then write them in one PUT.
    ///
    /// Unknown option names abort with `ApiError::Validation` before the write
    /// is issued. The two calls are not atomic.
    #[instrument(skip(self, options), fields(options = options.len()))]
    pub fn update_options(
        &self,
        service_id: &str,
        options: &ServiceOptions,
    ) -> Result<ServiceOptions, ApiError> {
        let c = &self.api.client;
        // Build the write first so serialization and id errors surface without a call.
        let update = c.build_update_options(service_id, options)?;

        let metadata = self.get_options_metadata(service_id)?;
        if let Err(err) = validate_options(&metadata, options) {
            warn!(invalid = err.errors.len(), "rejecting options update");
            return Err(err.into());
        }

        c.parse_update_options(self.api.transport.execute(update)?)
    }

    #[instrument(skip(self))]
    pub fn get_legacy_api_key(&self, service_id: &str) -> Result<LegacyApiKey, ApiError> {
        let c = &self.api.client;
        let req = c.build_get_legacy_api_key(service_id)?;
        c.parse_get_legacy_api_key(self.api.transport.execute(req)?)
    }

    /// The server picks the new key; it bears no relation to the old one.
    #[instrument(skip(self))]
    pub fn regenerate_legacy_api_key(&self, service_id: &str) -> Result<LegacyApiKey, ApiError> {
        let c = &self.api.client;
        let req = c.build_regenerate_legacy_api_key(service_id)?;
        c.parse_regenerate_legacy_api_key(self.api.transport.execute(req)?)
    }

    #[instrument(skip(self))]
    pub fn delete_legacy_api_key(&self, service_id: &str) -> Result<(), ApiError> {
        let c = &self.api.client;
        let req = c.build_delete_legacy_api_key(service_id)?;
        c.parse_delete_legacy_api_key(self.api.transport.execute(req)?)
    }
}
