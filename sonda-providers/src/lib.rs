//! sonda-providers
//!
//! Concrete data sources for `sonda`: JSON-over-HTTP provider adapters for
//! IP, phone, email and domain subjects, offline providers that answer from
//! static tables, registration probes, and the default registry that wires
//! them together.
//!
//! Every HTTP provider is an [`HttpProvider`] described by data: a
//! `ProviderSpec`, an endpoint template, and a normalization `Schema`. All
//! endpoints are third-party services used on a best-effort basis; field
//! coverage and rate limits change without notice.
#![warn(missing_docs)]

/// Generic JSON-over-HTTP provider.
pub mod adapter;
pub mod domain;
pub mod email;
mod http;
pub mod ip;
pub mod local;
pub mod phone;
pub mod probes;
pub mod registry;

pub use adapter::{Auth, HttpProvider};
pub use email::GravatarProvider;
pub use http::build_http_client;
pub use local::{DisposableDomainsProvider, PhonePrefixProvider, SocialSearchProvider};
pub use probes::{HttpPageChecker, ManualProbe, UrlProbe};
pub use registry::{CREDENTIAL_ENV_VARS, credentials_from_env, default_probes, default_providers};
