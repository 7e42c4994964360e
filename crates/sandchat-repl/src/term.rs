//! Terminal frontend pieces: the transcript view, a text charting
//! engine, and the summary table glue.

use std::fmt::Write as _;

use colored::Colorize;
use sandchat_core::chart::ChartDirective;
use sandchat_core::confirm::ConfirmationState;
use sandchat_core::envelope::SummaryReport;
use sandchat_core::transcript::{ChartBlock, ChatTurn, MessageRole, TurnBody};
use sandchat_core::view::{ChartEngine, TranscriptView};
use sandchat_core::{Result, SandchatError};
use serde_json::Value;

/// Renders transcript changes as colored terminal lines.
///
/// Progress ticks print as dim status lines; only settled turns print as
/// full bubbles.
pub struct TermView;

impl TermView {
    fn print_settled(&self, turn: &ChatTurn) {
        match &turn.body {
            TurnBody::Working { status } => {
                println!("{}", format!("  {status}").bright_black());
            }
            TurnBody::Ready { text, chart } => {
                for line in text.lines() {
                    println!("{}", line.bright_blue());
                }
                match chart {
                    Some(ChartBlock::Rendered(artifact)) => {
                        println!();
                        for line in artifact.lines() {
                            println!("  {line}");
                        }
                        println!();
                    }
                    Some(ChartBlock::Failed(note)) => {
                        println!("{}", format!("  {note}").red());
                    }
                    None => {}
                }
            }
            TurnBody::Failed { message } => {
                println!("{}", message.red());
            }
        }
    }
}

impl TranscriptView for TermView {
    fn turn_added(&self, _index: usize, turn: &ChatTurn) {
        match turn.role {
            MessageRole::User => {
                println!("{}", format!("> {}", turn.display_text()).green());
            }
            MessageRole::Assistant => self.print_settled(turn),
        }
    }

    fn turn_updated(&self, _index: usize, turn: &ChatTurn) {
        self.print_settled(turn);
    }

    fn transcript_cleared(&self) {
        // The cleared notice arrives as its own turn right after.
    }

    fn confirmation_changed(&self, state: &ConfirmationState) {
        if state.is_pending() {
            println!(
                "{}",
                "A write action is awaiting confirmation. Type '/approve' or '/reject'."
                    .bright_yellow()
            );
        }
    }
}

const MAX_BAR_WIDTH: usize = 40;

/// Draws normalized chart directives as unicode bar rows.
///
/// Every chart family collapses to horizontal bars here; the directive's
/// colors are web colors and do not survive the trip to a terminal.
/// Directives without numeric data points are rejected so the renderer's
/// failure note kicks in.
pub struct AsciiChartEngine;

struct BarRow {
    label: String,
    value: f64,
}

impl AsciiChartEngine {
    fn rows(directive: &ChartDirective) -> Result<Vec<BarRow>> {
        let data = directive
            .as_value()
            .get("data")
            .ok_or_else(|| SandchatError::render("directive has no data section"))?;
        let datasets = data
            .get("datasets")
            .and_then(Value::as_array)
            .ok_or_else(|| SandchatError::render("directive has no datasets list"))?;
        let labels: Vec<String> = data
            .get("labels")
            .and_then(Value::as_array)
            .map(|labels| labels.iter().map(text_of).collect())
            .unwrap_or_default();

        let mut rows = Vec::new();
        for (dataset_index, dataset) in datasets.iter().enumerate() {
            let name = dataset
                .get("label")
                .and_then(Value::as_str)
                .map(str::to_string);
            let points = dataset
                .get("data")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();

            for (point_index, point) in points.iter().enumerate() {
                let Some(value) = point.as_f64() else {
                    continue;
                };
                let category = labels
                    .get(point_index)
                    .cloned()
                    .unwrap_or_else(|| format!("#{}", point_index + 1));
                let label = match &name {
                    Some(name) => format!("{name} · {category}"),
                    None if datasets.len() > 1 => {
                        format!("{} · {category}", dataset_index + 1)
                    }
                    None => category,
                };
                rows.push(BarRow { label, value });
            }
        }

        if rows.is_empty() {
            return Err(SandchatError::render("directive has no numeric data points"));
        }
        Ok(rows)
    }
}

impl ChartEngine for AsciiChartEngine {
    fn draw(&self, directive: &ChartDirective) -> Result<String> {
        let kind = directive
            .chart_type()
            .ok_or_else(|| SandchatError::render("directive has no chart type"))?;
        let rows = Self::rows(directive)?;

        let label_width = rows.iter().map(|r| r.label.chars().count()).max().unwrap_or(0);
        let peak = rows.iter().map(|r| r.value.abs()).fold(0.0_f64, f64::max);

        let mut out = String::new();
        let _ = writeln!(out, "[{kind} chart]");
        for row in &rows {
            let width = if peak > 0.0 {
                ((row.value.abs() / peak) * MAX_BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            let bar = "▇".repeat(width.max(usize::from(row.value != 0.0)));
            let _ = writeln!(
                out,
                "{:>label_width$}  {} {}",
                row.label, bar, row.value
            );
        }
        Ok(out.trim_end().to_string())
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn money(amount: Option<f64>, currency: Option<&str>) -> String {
    match amount {
        Some(amount) => format!("{} ${amount:.2}", currency.unwrap_or("USD")),
        None => "—".to_string(),
    }
}

/// Prints the dashboard summary as plain aligned tables.
pub fn print_summary(report: &SummaryReport) {
    if let Some(location) = &report.primary_location {
        println!(
            "{}",
            format!(
                "Location: {} ({})",
                location.name.as_deref().unwrap_or("—"),
                location.id.as_deref().unwrap_or("—")
            )
            .bold()
        );
    }
    println!(
        "{} catalog items, {} team members",
        report.catalog_items.len(),
        report.team_members.len()
    );

    if !report.catalog_items.is_empty() {
        println!("\n{}", "Catalog".bold());
        for item in &report.catalog_items {
            println!(
                "  {:<28} {:>14}  {}",
                item.name.as_deref().unwrap_or("—"),
                money(item.price, item.currency.as_deref()),
                item.id.as_deref().unwrap_or("—").bright_black()
            );
        }
    }

    if !report.team_members.is_empty() {
        println!("\n{}", "Team".bold());
        for member in &report.team_members {
            let wage = match member.wage_per_hour {
                Some(_) => format!(
                    "{}/hr",
                    money(member.wage_per_hour, member.currency.as_deref())
                ),
                None => "—".to_string(),
            };
            println!(
                "  {:<24} {:<10} {:>14}  {}",
                member.name.as_deref().unwrap_or("—"),
                member.status.as_deref().unwrap_or("—"),
                wage,
                member.email.as_deref().unwrap_or("—").bright_black()
            );
        }
    }

    if !report.orders.is_empty() {
        println!("\n{}", "Orders".bold());
        for order in &report.orders {
            println!(
                "  {:<24} {:<10} {:>14}",
                order.created_at.as_deref().unwrap_or("—"),
                order.state.as_deref().unwrap_or("—"),
                money(order.total, order.currency.as_deref())
            );
        }
    }

    if let Some(note) = &report.note {
        println!("\n{}", note.bright_black());
    }
}
