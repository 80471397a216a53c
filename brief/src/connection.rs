//! Backend address resolution
//!
//! In production mode the configured address is trusted as-is. In discovery
//! mode the configured address and a fixed list of local ports are probed in
//! order and the first one that answers wins. The result is cached until a
//! request reports a transport failure or an operator overrides it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::Mode;
use crate::error::ClientError;
use crate::transport::{HttpRequest, Transport};

/// Everything the resolver needs, fixed at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    pub mode: Mode,
    /// Full API address, e.g. http://localhost:5000/api
    pub configured_address: Option<String>,
    pub candidate_host: String,
    pub candidate_ports: Vec<u16>,
    pub api_base_path: String,
    pub probe_timeout: Duration,
}

impl ResolverSettings {
    /// API address for a local port
    pub fn address_for_port(&self, port: u16) -> String {
        format!("http://{}:{}{}", self.candidate_host, port, self.api_base_path)
    }

    /// Ordered discovery candidates: configured address first, then local ports
    pub fn candidates(&self) -> Vec<String> {
        let mut candidates: Vec<String> = self.configured_address.iter().cloned().collect();
        candidates.extend(self.candidate_ports.iter().map(|p| self.address_for_port(*p)));
        candidates
    }

    /// URL probed for liveness: the address with the API path stripped
    pub fn probe_url(&self, address: &str) -> String {
        let trimmed = address.trim_end_matches('/');
        match trimmed.strip_suffix(self.api_base_path.trim_end_matches('/')) {
            Some(root) if !self.api_base_path.is_empty() && !root.is_empty() => root.to_string(),
            _ => trimmed.to_string(),
        }
    }
}

/// Cached connection state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionState {
    pub base_address: Option<String>,
    pub is_connected: bool,
}

/// Where `resolve` gets an address from, fixed at construction
enum AddressSource {
    Fixed(String),
    Discover,
}

/// Resolves and caches the backend base address
///
/// Shared between the request client and operator-facing settings via `Arc`.
/// State changes only through [`resolve`](Self::resolve),
/// [`invalidate`](Self::invalidate) and [`set_override`](Self::set_override).
pub struct ConnectionResolver {
    settings: ResolverSettings,
    source: AddressSource,
    transport: Arc<dyn Transport>,
    state: Mutex<ConnectionState>,
}

impl ConnectionResolver {
    /// Create a resolver
    ///
    /// Fails with [`ClientError::Configuration`] in production mode when no
    /// address is configured.
    pub fn new(settings: ResolverSettings, transport: Arc<dyn Transport>) -> Result<Self, ClientError> {
        debug!(mode = %settings.mode, configured = ?settings.configured_address, "ConnectionResolver::new: called");
        let source = match (settings.mode, &settings.configured_address) {
            (Mode::Production, Some(address)) => AddressSource::Fixed(address.clone()),
            (Mode::Production, None) => {
                return Err(ClientError::Configuration(
                    "Production mode requires a backend address (set api-url or its environment variable)"
                        .to_string(),
                ));
            }
            (Mode::Discovery, _) => AddressSource::Discover,
        };

        Ok(Self {
            settings,
            source,
            transport,
            state: Mutex::new(ConnectionState::default()),
        })
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Snapshot of the cached state
    pub async fn state(&self) -> ConnectionState {
        self.state.lock().await.clone()
    }

    /// Return the cached address, resolving it first if needed
    pub async fn resolve(&self) -> Result<String, ClientError> {
        debug!("resolve: called");
        let mut state = self.state.lock().await;
        if let Some(address) = state.base_address.as_ref().filter(|_| state.is_connected) {
            debug!(%address, "resolve: using cached address");
            return Ok(address.clone());
        }

        let address = match &self.source {
            AddressSource::Fixed(address) => {
                info!(%address, "Production mode: using configured backend");
                address.clone()
            }
            AddressSource::Discover => self.discover().await?,
        };

        *state = ConnectionState {
            base_address: Some(address.clone()),
            is_connected: true,
        };
        Ok(address)
    }

    /// Drop the cached address so the next resolve starts over
    pub async fn invalidate(&self) {
        debug!("invalidate: called");
        let mut state = self.state.lock().await;
        *state = ConnectionState::default();
    }

    /// Verify an operator-supplied address and commit it on success
    ///
    /// On failure the previous state is left untouched.
    pub async fn set_override(&self, address: &str) -> Result<String, ClientError> {
        debug!(%address, "set_override: called");
        let address = address.trim_end_matches('/').to_string();
        let mut state = self.state.lock().await;

        if !self.probe(&address).await {
            warn!(%address, "set_override: address not responding, keeping previous connection");
            return Err(ClientError::Discovery {
                attempted: vec![address],
            });
        }

        info!(%address, "Connected to backend (manual override)");
        *state = ConnectionState {
            base_address: Some(address.clone()),
            is_connected: true,
        };
        Ok(address)
    }

    /// [`set_override`](Self::set_override) for a local port
    pub async fn set_override_port(&self, port: u16) -> Result<String, ClientError> {
        debug!(port, "set_override_port: called");
        let address = self.settings.address_for_port(port);
        self.set_override(&address).await
    }

    async fn discover(&self) -> Result<String, ClientError> {
        let candidates = self.settings.candidates();
        debug!(?candidates, "discover: called");

        for (idx, candidate) in candidates.iter().enumerate() {
            if self.probe(candidate).await {
                info!(address = %candidate, "Connected to backend");
                return Ok(candidate.clone());
            }
            debug!(idx, address = %candidate, "discover: candidate not responding");
        }

        warn!(?candidates, "discover: no candidate responded");
        Err(ClientError::Discovery { attempted: candidates })
    }

    /// Bounded-timeout liveness check against the address root
    async fn probe(&self, address: &str) -> bool {
        let url = self.settings.probe_url(address);
        let request = HttpRequest::get(&url).with_timeout(self.settings.probe_timeout);
        match self.transport.send(request).await {
            Ok(response) if response.is_success() => true,
            Ok(response) => {
                debug!(%url, status = response.status, "probe: non-success status");
                false
            }
            Err(e) => {
                debug!(%url, error = %e, "probe: failed");
                false
            }
        }
    }
}
