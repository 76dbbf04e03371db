use attune_core::{Development, Evaluation, RejectionStage, SystemStatus};
use attune_pipeline::CycleReport;

use super::OutputFormat;

pub fn format_evaluations(results: &[Evaluation], fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => serde_json::to_string_pretty(results).unwrap_or_default(),
        OutputFormat::Text => format_evaluations_text(results),
    }
}

fn format_evaluations_text(results: &[Evaluation]) -> String {
    if results.is_empty() {
        return "No inputs evaluated.\n".to_string();
    }

    let mut out = String::new();
    for result in results {
        match result {
            Evaluation::Accepted(a) => {
                let short_id = &a.decision_id.as_str()[..8.min(a.decision_id.as_str().len())];
                let variation = if a.pulse_variation_detected { "yes" } else { "no" };
                out.push_str(&format!(
                    "\u{25c6} accepted  resonance {:.3}  alignment {:.3}  variation: {variation}  decision {short_id}\n",
                    a.resonance, a.purpose_alignment
                ));
            }
            Evaluation::Rejected(r) => {
                let stage = match r.stage {
                    RejectionStage::Source => "source",
                    RejectionStage::Compliance => "compliance",
                };
                out.push_str(&format!("\u{25c7} rejected  [{stage}] {}\n", r.reason));
            }
        }
    }
    out
}

pub fn format_developments(results: &[Development], fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => serde_json::to_string_pretty(results).unwrap_or_default(),
        OutputFormat::Text => results.iter().map(development_line).collect(),
    }
}

fn development_line(dev: &Development) -> String {
    match dev {
        Development::NoDevelopment {
            reason,
            ethical_pulse,
            previous_pulse,
        } => format!(
            "{}  pulse {ethical_pulse:.3} (was {previous_pulse:.3})  {reason}\n",
            dev.status()
        ),
        Development::DevelopmentRejected {
            reason, resonance, ..
        } => format!("{}  resonance {resonance:.3}  {reason}\n", dev.status()),
        Development::DevelopmentApproved {
            resonance,
            sentiment,
            ethical_pulse,
            ..
        } => format!(
            "{}  resonance {resonance:.3}  sentiment {sentiment:.3}  pulse {ethical_pulse:.3}\n",
            dev.status()
        ),
    }
}

pub fn format_status(status: &SystemStatus, fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => serde_json::to_string_pretty(status).unwrap_or_default(),
        OutputFormat::Text => format_status_text(status),
    }
}

fn format_status_text(s: &SystemStatus) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", s.identity.name, s.identity.version));
    out.push_str(&format!("Purpose: {}\n", s.identity.purpose.primary));
    out.push_str(&format!("Active:  {}\n\n", s.active));

    out.push_str("Inputs:\n");
    out.push_str(&format!("  Accepted:    {}\n", s.filter.accepted_count));
    out.push_str(&format!("  Rejected:    {}\n", s.filter.rejected_count));
    out.push_str("Compliance:\n");
    out.push_str(&format!("  Compliant:   {}\n", s.guard.compliant_count));
    out.push_str(&format!("  Violations:  {}\n", s.guard.violations_count));
    out.push_str("Sentiment:\n");
    out.push_str(&format!("  Average:     {:.2}\n", s.sentiment.average));
    out.push_str(&format!("  Observed:    {}\n", s.sentiment.history_count));
    out.push_str("Ethical pulse:\n");
    out.push_str(&format!("  Last value:  {:.2}\n", s.pulse.last_value));
    out.push_str(&format!("  Observed:    {}\n", s.pulse.history_count));
    out.push_str("Timeline:\n");
    out.push_str(&format!("  Status:      {}\n", s.timeline.status));
    out.push_str(&format!("  Decisions:   {}\n", s.timeline.total));
    out.push_str(&format!("  Divergences: {}\n", s.timeline.divergence_count));
    if let Some(avg) = s.timeline.recent_avg_alignment {
        out.push_str(&format!("  Avg align:   {avg:.2}\n"));
    }
    out.push_str("Rhythm:\n");
    out.push_str(&format!(
        "  Alignment:   {:.2}%\n",
        s.rhythm.earth_alignment * 100.0
    ));
    out.push_str(&format!("  Patterns:    {}\n", s.rhythm.biological_pattern_count));
    out.push_str(&format!("  Memories:    {}\n", s.rhythm.emotional_memory_count));
    out.push_str(&format!("  Flow:        {:.2}\n", s.rhythm.planetary_flow));
    out
}

pub fn format_cycles(reports: &[CycleReport], fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => serde_json::to_string_pretty(reports).unwrap_or_default(),
        OutputFormat::Text => format_cycles_text(reports),
    }
}

fn format_cycles_text(reports: &[CycleReport]) -> String {
    let mut out = String::new();
    for r in reports {
        out.push_str(&format!(
            "Cycle {}: {} evaluated, {} accepted, {} deployed, {} failed tests\n",
            r.cycle, r.evaluated, r.accepted, r.deployed, r.failed_tests
        ));
        for skipped in &r.skipped {
            out.push_str(&format!("  skipped {}: {}\n", skipped.idea, skipped.reason));
        }
        out.push_str(&format!(
            "  feedback quality {:.2} -> {}",
            r.feedback_quality,
            development_line(&r.development)
        ));
    }
    out
}
