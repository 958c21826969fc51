//! StreamSync OpenShift client
//!
//! [`streamsync_core::PlatformClient`] implementation backed by the
//! OpenShift REST API (`/oapi/v1`), plus the connector used by the
//! plugin runner to build clients from plugin arguments.

pub mod auth;
pub mod client;
pub mod error;
pub mod model;

pub use auth::TokenResolver;
pub use client::{DEFAULT_NAMESPACE, OpenShiftClient, OpenShiftConnector};
pub use error::{OpenShiftError, Result};
pub use model::{ImageStream, REPOSITORY_CHECK_ANNOTATION};
