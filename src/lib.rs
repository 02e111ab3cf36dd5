//! # Rebalance - configuration-driven balance patcher for modded game servers
//!
//! Rebalance applies a fixed, enumerable set of config-gated tweaks to a game
//! server's in-memory balance database (items, quests, traders, global tuning
//! constants) during the server's post-database-load phase, and forwards a
//! handful of player lifecycle events (login, raid end, coop start, logout) to
//! an external notification channel.
//!
//! ## Features
//!
//! - **Mutation Engine**: ~15 independent, order-insensitive transformation
//!   rules over typed database tables, each gated by its own config toggle,
//!   with well-defined floor/clamp/round policies.
//! - **Lifecycle Dispatcher**: four pass-through request interceptors that
//!   resolve a session to a profile nickname and announce the event. A broken
//!   dispatcher never affects the host's response.
//! - **Delivery Sink**: fire-and-forget HTTP POST to a messaging channel,
//!   enabled only when a token/channel credential pair is present.
//! - **Lossless Round-Trip**: unmodelled JSON fields on every table record are
//!   preserved through serde flatten maps, so a patched database can be
//!   written back without data loss.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rebalance::config::{ChannelCredentials, TweaksConfig};
//! use rebalance::plugin::TweaksPlugin;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = TweaksConfig::load("config.toml").await?;
//!     let creds = ChannelCredentials::load("notify.toml").await?;
//!     let _plugin = TweaksPlugin::new(config, creds);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Tweak toggles/multipliers and notification credentials
//! - [`db`] - Typed game database tables and host config sections
//! - [`engine`] - The single-pass mutation engine
//! - [`dispatch`] - Lifecycle event interception and message formatting
//! - [`notify`] - Outbound delivery sink
//! - [`plugin`] - Host-facing lifecycle entry points
//! - [`logutil`] - Log sanitization helpers

pub mod config;
pub mod db;
pub mod dispatch;
pub mod engine;
pub mod logutil;
pub mod notify;
pub mod plugin;
