//! Prompt context assembly.
//!
//! Renders the holdings table, concentration report and correlation report
//! into a high-density text context for the generation backend.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::concentration::ConcentrationReport;
use crate::correlation::CorrelationReport;
use crate::holdings::HoldingsTable;

pub const SYSTEM_PROMPT: &str = "\
You are Blindspot, an expert financial portfolio analyst specializing in
Canadian investment portfolios. You analyze holdings data to identify blind spots,
concentration risks, and actionable insights.

Your analysis must be:
1. Specific — reference actual holdings and percentages
2. Actionable — provide concrete recommendations
3. Risk-aware — flag interest rate sensitivity, currency risk, and sector concentration
4. Canadian-context-aware — understand TFSA, RRSP, RESP implications and Canadian home bias

Output your response as a JSON array of signals, each with:
- signal_id: unique string (e.g., \"SIG-001\")
- title: short title (< 80 chars)
- description: detailed explanation (2-4 sentences)
- severity: \"info\" | \"warning\" | \"critical\"
- category: \"concentration\" | \"correlation\" | \"home_bias\" | \"interest_rate\" | \"currency\" | \"opportunity\"
- affected_holdings: list of ticker symbols involved
- recommendation: specific action to consider (1-2 sentences)

Respond ONLY with the JSON array. No markdown, no code fences.";

/// Build the (system, user) prompt pair for one analysis run.
pub fn build_analysis_prompt(
    holdings: &HoldingsTable,
    concentration: &ConcentrationReport,
    correlation: &CorrelationReport,
) -> (String, String) {
    let total_gain = holdings.total_value_cents - holdings.total_cost_cents;
    let gain_pct = if holdings.total_cost_cents > 0 {
        (Decimal::from(total_gain) / Decimal::from(holdings.total_cost_cents)
            * Decimal::from(100))
        .to_f64()
        .unwrap_or(0.0)
    } else {
        0.0
    };

    let user_prompt = format!(
        "PORTFOLIO ANALYSIS REQUEST\n\
         ========================\n\
         \n\
         PORTFOLIO SUMMARY\n\
         Total Market Value: {}\n\
         Total Cost Basis: {}\n\
         Total Gain/Loss: {} ({:+.1}%)\n\
         Number of Holdings: {}\n\
         \n\
         CURRENT HOLDINGS\n\
         {}\n\
         \n\
         CONCENTRATION ANALYSIS\n\
         {}\n\
         \n\
         CORRELATION ANALYSIS\n\
         {}\n\
         \n\
         Please analyze this portfolio and generate strategic signals identifying blind spots,\n\
         concentration risks, diversification gaps, and opportunities for improvement.\n\
         Focus especially on:\n\
         1. Canadian home bias risks\n\
         2. Hidden correlations between holdings\n\
         3. Sector/geographic concentration vulnerabilities\n\
         4. Interest rate sensitivity (if applicable)\n\
         5. Currency risk exposure",
        format_cents(holdings.total_value_cents),
        format_cents(holdings.total_cost_cents),
        format_cents(total_gain),
        gain_pct,
        holdings.rows.len(),
        format_holdings(holdings),
        format_concentration(concentration),
        format_correlation(correlation),
    );

    (SYSTEM_PROMPT.to_string(), user_prompt)
}

/// Render cents as a dollar amount with thousands separators, e.g.
/// `$1,234.56`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let dollars = (abs / 100).to_string();
    let remainder = abs % 100;

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, digit) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("${}{}.{:02}", sign, grouped, remainder)
}

fn format_holdings(holdings: &HoldingsTable) -> String {
    if holdings.is_empty() {
        return "No holdings data available.".to_string();
    }

    let mut lines = Vec::with_capacity(holdings.rows.len() + 2);
    lines.push(format!(
        "{:<12} {:<12} {:>12} {:>8} {:>8} {:<15}",
        "Symbol", "Type", "Value", "Weight", "Gain%", "Account"
    ));
    lines.push("-".repeat(70));

    for row in &holdings.rows {
        lines.push(format!(
            "{:<12} {:<12} {:>12} {:>7.1}% {:>+7.1}% {:<15}",
            row.symbol,
            row.asset_class.as_str(),
            format_cents(row.market_value_cents),
            row.weight_pct.to_f64().unwrap_or(0.0),
            row.gain_loss_pct.to_f64().unwrap_or(0.0),
            row.account_name,
        ));
    }

    lines.join("\n")
}

fn format_concentration(report: &ConcentrationReport) -> String {
    let mut lines = Vec::new();

    lines.push(format!("Home Bias (Canada): {:.1}%", report.home_bias_pct));
    lines.push(String::new());

    lines.push("Sector Exposure (Look-Through):".to_string());
    let mut sectors: Vec<_> = report.sector_weights.iter().collect();
    sectors.sort_by(|a, b| b.1.cmp(a.1));
    for (sector, pct) in sectors {
        let marker = if *pct >= Decimal::from(25) { " ⚠" } else { "" };
        lines.push(format!("  {}: {:.1}%{}", sector, pct, marker));
    }

    lines.push(String::new());
    lines.push("Geographic Exposure:".to_string());
    let mut countries: Vec<_> = report.country_weights.iter().collect();
    countries.sort_by(|a, b| b.1.cmp(a.1));
    for (country, pct) in countries {
        lines.push(format!("  {}: {:.1}%", country, pct));
    }

    if !report.alerts.is_empty() {
        lines.push(String::new());
        lines.push("ALERTS:".to_string());
        for alert in &report.alerts {
            lines.push(format!(
                "  [{}] {}: {} at {:.1}% (threshold: {:.1}%)",
                alert.severity.as_str().to_uppercase(),
                alert.category.as_str(),
                alert.name,
                alert.weight_pct,
                alert.threshold_pct,
            ));
        }
    }

    lines.join("\n")
}

fn format_correlation(report: &CorrelationReport) -> String {
    let mut lines = Vec::new();

    if report.hidden_twins.is_empty() {
        lines.push("No hidden twins detected (all pairwise correlations < 0.80)".to_string());
    } else {
        lines.push("HIDDEN TWINS (Corr > 0.80):".to_string());
        for twin in &report.hidden_twins {
            lines.push(format!(
                "  {} <-> {}: r={:.2}",
                twin.symbol_a, twin.symbol_b, twin.correlation
            ));
            lines.push(format!("    {}", twin.explanation));
        }
    }

    if !report.correlation_matrix.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "Correlation matrix computed for {} symbols",
            report.correlation_matrix.len()
        ));
    }

    lines.join("\n")
}
