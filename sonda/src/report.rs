//! Plain-text rendering of lookup reports.

use std::fmt::Write as _;

use sonda_types::{AttemptOutcome, Field, LookupReport, ProbeStatus};

const NOT_AVAILABLE: &str = "Not available";

/// Render a report as human-readable text.
///
/// Every canonical field of the subject type is listed; fields nobody
/// supplied read "Not available" and populated fields carry the name of the
/// provider that won them. Fields outside the canonical set follow. Probe
/// results, provider attempts and warnings get their own sections when
/// present. An empty record renders without error.
#[must_use]
pub fn render_text(report: &LookupReport) -> String {
    let kind = report.subject.kind();
    let mut out = String::new();

    let _ = writeln!(out, "Sonda report: {kind} {}", report.subject);
    let _ = writeln!(
        out,
        "Generated: {}",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    out.push('\n');

    let canonical = Field::canonical(kind);
    let _ = writeln!(out, "Fields");
    for field in canonical {
        match report.record.get(*field) {
            Some(s) => {
                let _ = writeln!(out, "  {}: {} [{}]", field.label(), s.value, s.provider);
            }
            None => {
                let _ = writeln!(out, "  {}: {NOT_AVAILABLE}", field.label());
            }
        }
    }
    for (field, s) in &report.record.fields {
        if !canonical.contains(field) {
            let _ = writeln!(out, "  {}: {} [{}]", field.label(), s.value, s.provider);
        }
    }
    if canonical.is_empty() && report.record.is_empty() {
        let _ = writeln!(out, "  No data");
    }

    if !report.record.probes.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "Registrations");
        for p in &report.record.probes {
            let state = match p.status {
                ProbeStatus::Found => "found",
                ProbeStatus::Absent => "not found",
                ProbeStatus::Inconclusive => "inconclusive",
            };
            if p.message.is_empty() {
                let _ = writeln!(out, "  {}: {state}", p.service);
            } else {
                let _ = writeln!(out, "  {}: {state} ({})", p.service, p.message);
            }
        }
    }

    if !report.attempts.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "Providers");
        for a in &report.attempts {
            let outcome = match a.outcome {
                AttemptOutcome::Ok => "ok",
                AttemptOutcome::NotFound => "no data",
                AttemptOutcome::Skipped => "skipped",
                AttemptOutcome::Failed => "failed",
            };
            let _ = writeln!(out, "  {}: {outcome} ({} fields)", a.provider, a.fields);
        }
    }

    if !report.warnings.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "Warnings");
        for w in &report.warnings {
            let _ = writeln!(out, "  - {w}");
        }
    }

    out
}
