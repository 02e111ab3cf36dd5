//! Host-facing plugin surface: the three entry points a hosting game server
//! calls across the process lifecycle.
//!
//! Call order is fixed by the host: [`TweaksPlugin::register`] once at
//! startup, [`TweaksPlugin::post_db_load`] once after the database is in
//! memory, then [`TweaksPlugin::handle`] for every intercepted route call.

use anyhow::Result;
use log::info;
use serde_json::Value;
use std::sync::Arc;

use crate::config::{ChannelCredentials, TweaksConfig};
use crate::db::configs::ServerConfigs;
use crate::db::DatabaseTables;
use crate::dispatch::{LifecycleRouter, ProfileResolver};
use crate::engine::{self, PatchSummary};
use crate::notify::Notifier;

/// Message pushed through the sink once the patch pass has landed.
const SERVER_ONLINE_MESSAGE: &str = "Balance tweaks applied, server is online!";

pub struct TweaksPlugin {
    config: TweaksConfig,
    notifier: Notifier,
    router: Option<LifecycleRouter>,
}

impl TweaksPlugin {
    pub fn new(config: TweaksConfig, creds: ChannelCredentials) -> Self {
        Self {
            config,
            notifier: Notifier::new(creds),
            router: None,
        }
    }

    /// Startup hook. Wires the lifecycle router against the host's profile
    /// resolver and returns the route URLs the plugin wants to observe -
    /// empty when the notification channel is not configured.
    pub fn register(&mut self, resolver: Arc<dyn ProfileResolver>) -> Vec<&'static str> {
        self.router = LifecycleRouter::register(self.notifier.clone(), resolver);
        match &self.router {
            Some(router) => router.routes().collect(),
            None => Vec::new(),
        }
    }

    pub fn notifications_enabled(&self) -> bool {
        self.router.is_some()
    }

    /// Post-database-load hook. Runs the mutation pass exactly once over the
    /// in-memory tables, then announces the server as online. The engine's
    /// multiplicative rules are not safe to re-apply, so the host must not
    /// call this twice.
    pub fn post_db_load(
        &self,
        db: &mut DatabaseTables,
        server: &mut ServerConfigs,
    ) -> Result<PatchSummary> {
        info!("Applying balance tweaks");
        let summary = engine::run(db, server, &self.config)?;
        self.notifier.post(SERVER_ONLINE_MESSAGE);
        Ok(summary)
    }

    /// Route interception hook. Delegates to the lifecycle router when one
    /// registered; otherwise the output passes straight back to the host.
    pub fn handle(&self, url: &str, info: &Value, session_id: &str, output: Value) -> Value {
        match &self.router {
            Some(router) => router.handle(url, info, session_id, output),
            None => output,
        }
    }
}
