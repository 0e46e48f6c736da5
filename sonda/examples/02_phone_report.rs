mod common;

use common::{get_credentials, get_providers, get_probes};
use sonda::{Sonda, SubjectType, render_text};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sonda = Sonda::builder()
        .with_providers(get_providers())
        .with_probes(get_probes())
        .build()?;

    // Lookup and messaging-app probes run side by side.
    let report = sonda
        .investigate(SubjectType::Phone, "+1 415 555 2671", Some(&get_credentials()))
        .await?;

    print!("{}", render_text(&report));
    Ok(())
}
