mod common;

use common::{get_credentials, get_providers};
use sonda::{Field, Sonda, SubjectType};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Build the engine with every available provider.
    let sonda = Sonda::builder().with_providers(get_providers()).build()?;

    // 2. Show the order the chain will try for IPs.
    println!("IP chain: {}", sonda.chain_for(SubjectType::Ip).join(" -> "));

    // 3. Look up the subject. Failures of individual providers become warnings.
    let report = sonda
        .lookup(SubjectType::Ip, "8.8.8.8", Some(&get_credentials()))
        .await?;

    // 4. Every field carries the provider that supplied it.
    for field in Field::canonical(SubjectType::Ip) {
        if let Some(s) = report.record.get(*field) {
            let value = s.value.to_string();
            println!("{:<16} {value:<30} ({})", field.label(), s.provider);
        }
    }
    for w in &report.warnings {
        println!("warning: {w}");
    }

    Ok(())
}
