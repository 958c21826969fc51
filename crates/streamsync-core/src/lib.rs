//! StreamSync core
//!
//! This crate holds the decision logic of the post-build step that publishes
//! freshly built image tags into a platform image stream.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────┐   ┌────────────────┐   ┌─────────────────────────┐
//! │ context       │──▶│ lookup         │──▶│ reconcile               │
//! │ (BUILD json)  │   │ Found/NotFound │   │ create_image_stream  or │
//! └───────┬───────┘   │ /PlatformError │   │ import_image            │
//!         │           └───────┬────────┘   └────────────┬────────────┘
//!         └───────────────────┴─────────────────────────┘
//!                             │ any failure
//!                   ┌─────────▼─────────┐
//!                   │ PluginExecution-  │
//!                   │ Failed            │
//!                   └───────────────────┘
//! ```
//!
//! The platform itself is reached through the [`PlatformClient`] trait.
//! Clients come from a [`ClientConnector`] only once the build context has
//! been resolved; a REST implementation lives in `streamsync-openshift`.

pub mod config;
pub mod context;
pub mod error;
pub mod lookup;
pub mod platform;
pub mod plugin;
pub mod reconcile;
pub mod runner;

// Re-exports
pub use config::{PlatformSettings, PluginArgs, PluginConfig};
pub use context::{BuildContext, ContextSource, EnvContextSource, StaticContextSource};
pub use error::{ConfigError, PluginExecutionFailed, Result, SyncError};
pub use lookup::StreamLookupResult;
pub use platform::{ClientConnector, PlatformClient, PlatformError, StreamDescriptor};
pub use plugin::ImportImagePlugin;
pub use reconcile::{Applied, ReconciliationOutcome};
pub use runner::{PluginReport, PluginRequest, PluginRunner, RunnerError};
