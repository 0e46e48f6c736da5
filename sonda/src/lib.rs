//! Sonda aggregates identity and infrastructure lookups across many
//! independent data providers.
//!
//! Overview
//! - Normalizes a raw subject (IP, phone, email, domain, name, username) into
//!   its canonical form before any provider sees it.
//! - Runs every registered provider for the subject type as a fallback chain
//!   that tolerates partial failure.
//! - Merges the per-provider partial records into one final record by field
//!   precedence, tagging every value with the provider that supplied it.
//! - Probes external services for account registrations with bounded
//!   concurrency.
//!
//! Key behaviors and trade-offs
//! - Chain strategy:
//!   - `Concurrent`: all providers at once; latency is the slowest provider.
//!   - `Sequential`: one provider at a time; gentler on rate limits.
//!   - Either way the merge is applied in configured order, never arrival order.
//! - Precedence: a provider marked authoritative for a field wins it;
//!   otherwise the earliest provider in chain order with a non-empty value does.
//! - Failures: a failing provider only costs the fields it would have supplied.
//!   A lookup fails as a whole only when nobody could be reached, which is
//!   reported as `NoProvidersAvailable` and kept distinct from "everyone
//!   answered not found".
//! - Credentials are an explicit parameter; providers whose key is missing
//!   are skipped without a network call.
//!
//! Examples
//! Building an orchestrator with preferences:
//! ```rust,ignore
//! use std::sync::Arc;
//! use sonda::{Sonda, SubjectType, ChainStrategy};
//!
//! let client = sonda_providers::build_http_client()?;
//! let ipinfo = Arc::new(sonda_providers::ip::ipinfo(&client));
//! let ip_api = Arc::new(sonda_providers::ip::ip_api(&client));
//!
//! let sonda = Sonda::builder()
//!     .with_provider(ip_api.clone())
//!     .with_provider(ipinfo.clone())
//!     .prefer_for_subject(SubjectType::Ip, &[ipinfo, ip_api])
//!     .chain_strategy(ChainStrategy::Concurrent)
//!     .build()?;
//! ```
//!
//! Looking a subject up and rendering the report:
//! ```rust,ignore
//! let creds = sonda_providers::credentials_from_env();
//! let report = sonda.lookup(SubjectType::Ip, "8.8.8.8", Some(&creds)).await?;
//! println!("{}", sonda::render_text(&report));
//! ```
//!
//! Lookup plus registration probes:
//! ```rust,ignore
//! let report = sonda.investigate(SubjectType::Username, "octocat", None).await?;
//! for p in &report.record.probes {
//!     println!("{}: {:?}", p.service, p.status);
//! }
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod report;
mod router;

pub use core::{Sonda, SondaBuilder};
pub use report::render_text;
pub use router::util::collapse_failures;

pub use sonda_core::{PageChecker, Probe, Provider, merge};
pub use sonda_types::*;
pub use tokio_util::sync::CancellationToken;
