//! Human-readable report output

use std::io::Write;

use colored::Colorize;
use thematic_core::AnalysisReport;

/// Write `report` as coloured text
pub fn write_text<W: Write>(out: &mut W, report: &AnalysisReport) -> std::io::Result<()> {
    writeln!(out, "{}", "=== Thematic Analysis ===".cyan().bold())?;
    writeln!(out, "Run:    {}", report.run_id)?;
    writeln!(out, "Model:  {}", report.model)?;
    writeln!(
        out,
        "Passes: {} iterations, {}",
        report.stats.iterations,
        if report.stats.converged {
            "converged".green()
        } else {
            "hit iteration cap".yellow()
        }
    )?;
    writeln!(out)?;

    for cluster in &report.clusters {
        writeln!(out, "{} ({})", cluster.theme.bold(), cluster.codes.len())?;
        if cluster.codes.is_empty() {
            writeln!(out, "  {}", "no codes assigned".dimmed())?;
        }
        for code in &cluster.codes {
            writeln!(out, "  - {}", code)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", "Theme frequency".bold())?;
    for entry in &report.theme_counts {
        writeln!(out, "  {:>5}  {}", entry.count, entry.theme)?;
    }

    if !report.overlaps.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", "Overlapping themes".yellow().bold())?;
        for overlap in &report.overlaps {
            let (first, second) = (&overlap.first, &overlap.second);
            writeln!(out, "  {} ~ {} ({:.2})", first, second, overlap.similarity)?;
        }
    }

    Ok(())
}
