// Colored terminal dashboard for a single analysis.
//
// Same panels as the browser dashboard: verdict, mean gauge, bar chart,
// proportional share, intensity heatmap, and the raw score table.

use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use super::charts::{heat_rgb, ChartData};
use crate::toxicity::analyzer::Analysis;
use crate::toxicity::error::{AnalysisError, FailureKind};
use crate::toxicity::verdict::Verdict;

/// Width of the bar chart and gauge, in cells.
const BAR_WIDTH: usize = 30;

/// Display the full dashboard for one analysis.
pub fn display_analysis(analysis: &Analysis) {
    let charts = ChartData::from_score(&analysis.scores);

    println!(
        "\n{}",
        format!("=== Toxicity Analysis ({}) ===", analysis.model).bold()
    );
    println!();
    println!("  Overall verdict: {}", colorize_verdict(analysis.verdict));
    println!(
        "  Mean score: {:.2}  {} {:>3.0}%",
        analysis.mean,
        gauge(charts.progress, BAR_WIDTH),
        charts.progress * 100.0
    );
    let (top, top_score) = analysis.scores.dominant();
    println!("  Highest category: {} ({:.2})", top.as_str().bold(), top_score);

    println!("\n  {}", "Toxicity by category".bold());
    for bar in &charts.bars {
        println!(
            "    {:<14} {:>4.2}  {}",
            bar.category.as_str(),
            bar.score,
            block_bar(bar.score, BAR_WIDTH).magenta()
        );
    }

    println!("\n  {}", "Proportion of toxicity types".bold());
    if charts.slices.iter().all(|s| s.share == 0.0) {
        println!("    {}", "(all scores are zero)".dimmed());
    } else {
        for slice in &charts.slices {
            println!(
                "    {:<14} {:>5.1}%",
                slice.category.as_str(),
                slice.share * 100.0
            );
        }
    }

    println!("\n  {}", "Toxicity intensity heatmap".bold());
    for cell in &charts.heatmap {
        let (r, g, b) = heat_rgb(cell.score);
        let label = format!(" {:<14} {:>4.2} ", cell.category.as_str(), cell.score);
        let text = if cell.score > 0.5 {
            label.white()
        } else {
            label.black()
        };
        println!("    {}", text.on_truecolor(r, g, b));
    }

    println!("\n  {}", "Detailed scores".bold());
    println!(
        "    {:<14} {:>6}  {:>9}",
        "Category".dimmed(),
        "Score".dimmed(),
        "Score (%)".dimmed()
    );
    println!("    {}", "-".repeat(31).dimmed());
    for bar in &charts.bars {
        println!(
            "    {:<14} {:>6.2}  {:>9.1}",
            bar.category.as_str(),
            bar.score,
            bar.percent
        );
    }
    println!();
}

/// Print an analysis failure inline. Never fatal.
pub fn display_error(err: &AnalysisError) {
    match err.kind() {
        FailureKind::EmptyInput => println!("{} {}", "!".yellow(), err.to_string().yellow()),
        FailureKind::ParseError => println!("{} {}", "!!".red().bold(), err.to_string().red()),
    }
}

/// Start a spinner shown while the model call is in flight.
/// Call `finish_and_clear` on the returned bar once the call returns.
pub fn busy_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner} {msg} ({elapsed})")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Colorize a verdict label.
pub fn colorize_verdict(verdict: Verdict) -> colored::ColoredString {
    let label = verdict.as_str();
    match verdict {
        Verdict::High => label.red().bold(),
        Verdict::Moderate => label.bright_red(),
        Verdict::Mild => label.yellow(),
        Verdict::Safe => label.green(),
    }
}

/// A `[####------]` gauge for a value in [0, 1].
pub fn gauge(value: f64, width: usize) -> String {
    let filled = filled_cells(value, width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

fn block_bar(value: f64, width: usize) -> String {
    "█".repeat(filled_cells(value, width))
}

fn filled_cells(value: f64, width: usize) -> usize {
    let v = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    ((v * width as f64).round() as usize).min(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauge_fill() {
        assert_eq!(gauge(0.0, 4), "[----]");
        assert_eq!(gauge(0.5, 4), "[##--]");
        assert_eq!(gauge(1.0, 4), "[####]");
        assert_eq!(gauge(7.0, 4), "[####]");
    }
}
