use std::fmt::Write;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::charts::datasets::{
    CostItem, MARKET_GROWTH, REVENUE_DISTRIBUTION, STARTUP_COSTS, TimeSlotShare, YearValue,
};
use crate::format::{DEFAULT_CURRENCY, format_currency, format_percentage, format_value};

#[derive(Serialize)]
struct Datasets {
    market_growth: &'static [YearValue],
    revenue_distribution: &'static [TimeSlotShare],
    startup_costs: &'static [CostItem],
}

pub fn run(json: bool) -> Result<()> {
    if json {
        println!("{}", to_json()?);
    } else {
        print!("{}", to_table());
    }
    Ok(())
}

pub fn to_json() -> Result<String> {
    let datasets = Datasets {
        market_growth: &MARKET_GROWTH,
        revenue_distribution: &REVENUE_DISTRIBUTION,
        startup_costs: &STARTUP_COSTS,
    };
    Ok(serde_json::to_string_pretty(&datasets)?)
}

pub fn to_table() -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", "Market growth (USD bn)".bold());
    for row in &MARKET_GROWTH {
        let _ = writeln!(out, "  {:<28} {:>10}", row.year, format_value(row.value));
    }

    let _ = writeln!(out, "\n{}", "Revenue by time of day".bold());
    for row in &REVENUE_DISTRIBUTION {
        let _ = writeln!(
            out,
            "  {:<28} {:>10}",
            row.slot,
            format_percentage(row.percentage, 0)
        );
    }

    let _ = writeln!(out, "\n{}", "Start-up costs".bold());
    for row in &STARTUP_COSTS {
        let _ = writeln!(
            out,
            "  {:<28} {:>10} {:>6}",
            row.category,
            format_currency(row.amount, DEFAULT_CURRENCY),
            format_percentage(row.percentage, 0)
        );
    }
    let total: f64 = STARTUP_COSTS.iter().map(|c| c.amount).sum();
    let _ = writeln!(
        out,
        "  {:<28} {:>10}",
        "Total".bold(),
        format_currency(total, DEFAULT_CURRENCY)
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_has_all_datasets() {
        let value: serde_json::Value = serde_json::from_str(&to_json().unwrap()).unwrap();
        assert_eq!(value["market_growth"].as_array().unwrap().len(), 8);
        assert_eq!(value["revenue_distribution"].as_array().unwrap().len(), 7);
        assert_eq!(value["startup_costs"][0]["amount"], 350_000.0);
        assert_eq!(value["market_growth"][0]["year"], "2023");
    }

    #[test]
    fn test_table_uses_formatting_helpers() {
        colored::control::set_override(false);
        let table = to_table();
        assert!(table.contains("350K MYR"));
        assert!(table.contains("700K MYR"));
        assert!(table.contains("30%"));
        assert!(table.contains("9.79"));
    }
}
