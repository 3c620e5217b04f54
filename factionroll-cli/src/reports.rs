use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;

use crate::logic::{ProtectionSummary, RollSummary};

/// Everything a single CLI run produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rolls: Option<RollSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protection: Option<ProtectionSummary>,
}

pub fn generate_console_report<W: Write + ?Sized>(
    writer: &mut W,
    report: &RunReport,
    verbose: bool,
) -> Result<()> {
    if let Some(rolls) = &report.rolls {
        write_roll_section(writer, rolls, verbose)?;
    }
    if let Some(protection) = &report.protection {
        write_protection_section(writer, protection)?;
    }
    Ok(())
}

fn write_roll_section<W: Write + ?Sized>(
    writer: &mut W,
    rolls: &RollSummary,
    verbose: bool,
) -> Result<()> {
    writeln!(writer, "{}", "🎲 Faction Rolls".bright_yellow().bold())?;
    writeln!(writer, "{}", "-".repeat(30).yellow())?;
    writeln!(writer, "At: {}", rolls.at)?;
    if let Some(seed) = rolls.seed {
        writeln!(writer, "Seed: {seed}")?;
    }
    let window = if rolls.in_sleep_window {
        "open".magenta()
    } else {
        "closed".normal()
    };
    writeln!(
        writer,
        "Sleep window: {window} (chance {:.2})",
        rolls.sleep_chance
    )?;
    writeln!(writer, "Rounds: {}", rolls.rounds.len())?;
    writeln!(writer, "Sleep picks: {}", rolls.sleep_picks)?;

    for record in &rolls.rounds {
        let picked = record
            .picked
            .map_or_else(|| "none".to_string(), |f| f.to_string());
        if verbose {
            let pool: Vec<&str> = record.pool.iter().map(|f| f.as_str()).collect();
            writeln!(
                writer,
                "   #{:<3} {} from [{}]",
                record.round,
                picked.green(),
                pool.join(", ")
            )?;
        } else {
            writeln!(writer, "   #{:<3} {}", record.round, picked.green())?;
        }
    }
    writeln!(writer)?;
    Ok(())
}

fn write_protection_section<W: Write + ?Sized>(
    writer: &mut W,
    protection: &ProtectionSummary,
) -> Result<()> {
    writeln!(writer, "{}", "🛡️  Protection Check".bright_blue().bold())?;
    writeln!(writer, "{}", "-".repeat(30).blue())?;
    writeln!(writer, "Now: {}", protection.now)?;
    writeln!(
        writer,
        "Last game: {}",
        protection.last_game_at.as_deref().unwrap_or("never")
    )?;
    let effective = protection
        .effective_last_game_at
        .as_deref()
        .unwrap_or("unknown");
    if protection.adjusted {
        writeln!(writer, "Effective last game: {} (assumed)", effective.yellow())?;
    } else {
        writeln!(writer, "Effective last game: {effective}")?;
    }
    if let Some(minutes) = protection.abstinence_minutes {
        writeln!(writer, "Abstinence: {}h {:02}m", minutes / 60, minutes % 60)?;
    }
    writeln!(writer, "Today: {}", protection.today)?;
    let decision = if protection.defer_check {
        "⏳ DEFER".yellow()
    } else {
        "✅ RUN".green()
    };
    writeln!(writer, "Protection check: {decision}")?;
    writeln!(writer)?;
    Ok(())
}

pub fn generate_json_report<W: Write + ?Sized>(writer: &mut W, report: &RunReport) -> Result<()> {
    let json_output = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json_output}")?;
    Ok(())
}
