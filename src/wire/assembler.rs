//! Production assembler: binds the HTTP listener and builds the server.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::config::{Configuration, HttpSettings};
use crate::http::HttpServer;
use crate::lifecycle::Release;
use crate::wire::{Assembler, Assembly, AssemblyError};

/// Wires the HTTP server from the `[http]` section.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceAssembler;

impl ServiceAssembler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Assembler for ServiceAssembler {
    type App = HttpServer;

    async fn assemble(&self, config: Arc<Configuration>) -> Assembly<HttpServer> {
        let settings = match HttpSettings::from_config(&config) {
            Ok(settings) => settings,
            Err(e) => return Assembly::failed(e, Release::noop()),
        };

        let address = settings.bind_address();
        let listener = match TcpListener::bind(&address).await {
            Ok(listener) => listener,
            Err(source) => {
                return Assembly::failed(AssemblyError::Bind { address, source }, Release::noop())
            }
        };
        tracing::debug!(address = %address, "Listener bound");

        // Cancelled on release so the server stops even if `run` never
        // returned normally.
        let resources = CancellationToken::new();
        let release = {
            let resources = resources.clone();
            Release::new(move || {
                resources.cancel();
                tracing::info!(address = %address, "Resources released");
            })
        };

        Assembly::ready(HttpServer::new(&settings, listener, resources), release)
    }
}
