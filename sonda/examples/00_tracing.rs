mod common;

use common::{get_credentials, get_providers};
use sonda::{Sonda, SubjectType};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Run with `--features tracing`.
    // Suggested: RUST_LOG=info,sonda=trace,sonda_core=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let sonda = Sonda::builder().with_providers(get_providers()).build()?;
    let creds = get_credentials();

    let _ = sonda.lookup(SubjectType::Ip, "8.8.8.8", Some(&creds)).await?;
    let _ = sonda.lookup(SubjectType::Domain, "example.com", Some(&creds)).await?;
    let _ = sonda
        .lookup(SubjectType::Email, "alice@example.com", Some(&creds))
        .await?;

    Ok(())
}
