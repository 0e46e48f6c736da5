mod common;

use std::time::Duration;

use common::get_probes;
use sonda::{ProbeStatus, Sonda, Subject, SubjectType};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let probes = get_probes();
    let sonda = Sonda::builder()
        .probe_timeout(Duration::from_secs(8))
        .max_concurrent_probes(4)
        .build()?;

    let subject = Subject::parse(SubjectType::Username, "@torvalds")?;
    for r in sonda.probe(&subject, &probes).await {
        let mark = match r.status {
            ProbeStatus::Found => "+",
            ProbeStatus::Absent => "-",
            ProbeStatus::Inconclusive => "?",
        };
        println!("[{mark}] {:<10} {}", r.service, r.message);
    }

    Ok(())
}
