//! Rendering of tables and summaries for the terminal.

use anyhow::Result;
use ledgerscan_analytics::{BatchSummary, MonthlyTopCredits};
use ledgerscan_core::{IdentityVerdict, TransactionTable};
use ledgerscan_ingest::DocumentExtraction;
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

use crate::config::OutputFormat;

/// Flat CSV row for a monthly top credit
#[derive(Serialize)]
struct CreditRow<'a> {
    month: String,
    date: NaiveDate,
    description: &'a str,
    amount: f64,
}

pub fn write_table<W: Write>(out: &mut W, table: &TransactionTable, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, table)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(out);
            for txn in table {
                wtr.serialize(txn)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Text => {
            writeln!(out, "{:<10}  {:<48}  {:>12}  {:>12}", "date", "description", "amount", "balance")?;
            for txn in table {
                writeln!(
                    out,
                    "{:<10}  {:<48}  {:>12.2}  {:>12.2}",
                    txn.date.map(|d| d.to_string()).unwrap_or_else(|| "?".to_string()),
                    txn.description,
                    txn.amount,
                    txn.balance
                )?;
            }
            writeln!(out, "\n{} transactions", table.len())?;
        }
    }
    Ok(())
}

pub fn write_identities<W: Write>(out: &mut W, documents: &[DocumentExtraction]) -> Result<()> {
    for doc in documents {
        let identity = doc
            .identity
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "(missing)".to_string());
        match &doc.unreadable {
            Some(reason) => writeln!(out, "{}  {}  [unreadable: {}]", identity, doc.source_name, reason)?,
            None => writeln!(out, "{}  {}", identity, doc.source_name)?,
        }
    }
    Ok(())
}

fn verdict_line(verdict: &IdentityVerdict) -> String {
    match verdict {
        IdentityVerdict::Single { identity } => format!("Single account ({})", identity),
        IdentityVerdict::Mismatch { .. } => "Different accounts!".to_string(),
        IdentityVerdict::Unknown => "Account could not be determined".to_string(),
    }
}

fn write_top_credits_text<W: Write>(out: &mut W, top: &MonthlyTopCredits) -> Result<()> {
    for month in top.months() {
        writeln!(out, "  {}", month)?;
        for row in top.for_month(month) {
            writeln!(out, "    {}  {:<48}  {:>12.2}", row.date, row.description, row.amount)?;
        }
    }
    Ok(())
}

pub fn write_summary<W: Write>(
    out: &mut W,
    documents: &[DocumentExtraction],
    summary: &BatchSummary,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, summary)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(out);
            for row in summary.top_credits.rows() {
                wtr.serialize(CreditRow {
                    month: row.month.to_string(),
                    date: row.date,
                    description: &row.description,
                    amount: row.amount,
                })?;
            }
            wtr.flush()?;
        }
        OutputFormat::Text => {
            writeln!(out, "Accounts:")?;
            write_identities(out, documents)?;
            writeln!(out, "{}\n", verdict_line(&summary.identity))?;

            match summary.date_range {
                Some(range) => writeln!(out, "Date range: {} - {}", range.start, range.end)?,
                None => writeln!(out, "Date range: (no dated transactions)")?,
            }
            writeln!(out, "Transactions: {}\n", summary.transactions)?;

            let m = &summary.markers;
            writeln!(out, "{}-related activity: {}", m.atm_marker, m.has_atm)?;
            writeln!(out, "{} incoming: {}", m.peer_payment_marker, m.peer_payments.incoming)?;
            writeln!(out, "{} outgoing: {}\n", m.peer_payment_marker, m.peer_payments.outgoing)?;

            writeln!(out, "Top credits per month:")?;
            if summary.top_credits.is_empty() {
                writeln!(out, "  (none)")?;
            } else {
                write_top_credits_text(out, &summary.top_credits)?;
            }
        }
    }
    Ok(())
}
