//! Lifecycle event dispatcher: maps host route URLs to player-facing
//! notification messages and pushes them through the delivery sink.
//!
//! Interception is observation-only. The handler always returns the host's
//! output value unchanged, whatever happens during profile resolution or
//! delivery; a failure here must never alter the host's response to the
//! client.

use anyhow::Result;
use log::{error, info};
use serde_json::Value;
use std::sync::Arc;

use crate::logutil::escape_log;
use crate::notify::Notifier;

/// The slice of a player profile the dispatcher needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub nickname: String,
}

/// Host-provided lookup from an opaque session id to the player profile.
pub trait ProfileResolver: Send + Sync {
    fn full_profile(&self, session_id: &str) -> Result<Profile>;
}

/// The four host routes the dispatcher listens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    SessionStart,
    RaidEnd,
    CoopCreate,
    Logout,
}

impl LifecycleEvent {
    pub const ALL: [LifecycleEvent; 4] = [
        LifecycleEvent::SessionStart,
        LifecycleEvent::RaidEnd,
        LifecycleEvent::CoopCreate,
        LifecycleEvent::Logout,
    ];

    /// The host route URL this event is keyed on.
    pub fn url(self) -> &'static str {
        match self {
            LifecycleEvent::SessionStart => "/client/game/start",
            LifecycleEvent::RaidEnd => "/client/match/offline/end",
            LifecycleEvent::CoopCreate => "/coop/server/create",
            LifecycleEvent::Logout => "/client/game/logout",
        }
    }

    pub fn from_url(url: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|event| event.url() == url)
    }

    fn message(self, nickname: &str) -> String {
        match self {
            LifecycleEvent::SessionStart => format!("{} has logged in", nickname),
            LifecycleEvent::RaidEnd => format!("{}'s last raid has ended", nickname),
            LifecycleEvent::CoopCreate => format!("{} has started a coop raid", nickname),
            LifecycleEvent::Logout => format!("{} has logged out", nickname),
        }
    }
}

/// Routes lifecycle URLs to notifications. Exists only while the channel is
/// configured; an unconfigured channel registers nothing at all.
pub struct LifecycleRouter {
    resolver: Arc<dyn ProfileResolver>,
    notifier: Notifier,
}

impl LifecycleRouter {
    /// Build the router, or `None` when the notification channel is not
    /// configured. The decision is made once at startup; there is no
    /// re-check at runtime.
    pub fn register(notifier: Notifier, resolver: Arc<dyn ProfileResolver>) -> Option<Self> {
        if !notifier.is_configured() {
            info!("No notification credentials; lifecycle notifications disabled");
            return None;
        }
        info!(
            "Notification channel enabled; intercepting {} lifecycle routes",
            LifecycleEvent::ALL.len()
        );
        Some(Self { resolver, notifier })
    }

    /// The route URLs this router wants to observe.
    pub fn routes(&self) -> impl Iterator<Item = &'static str> {
        LifecycleEvent::ALL.into_iter().map(LifecycleEvent::url)
    }

    /// Observe one intercepted call. Resolves the profile, formats the event
    /// message, and hands it to the sink. Returns `output` unchanged in every
    /// case.
    pub fn handle(&self, url: &str, _info: &Value, session_id: &str, output: Value) -> Value {
        if let Some(event) = LifecycleEvent::from_url(url) {
            match self.resolver.full_profile(session_id) {
                Ok(profile) => self.notifier.post(&event.message(&profile.nickname)),
                Err(e) => error!(
                    "profile lookup failed for session {}: {}",
                    escape_log(session_id),
                    e
                ),
            }
        }
        output
    }
}
