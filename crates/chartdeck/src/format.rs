/// Currency suffix used for every amount shown in the deck.
pub const DEFAULT_CURRENCY: &str = "MYR";

/// Format an amount compactly: millions with one decimal, thousands rounded
/// to whole `K`, anything smaller verbatim.
pub fn format_currency(amount: f64, currency: &str) -> String {
    if amount >= 1_000_000.0 {
        format!("{:.1}M {currency}", amount / 1_000_000.0)
    } else if amount >= 1000.0 {
        format!("{}K {currency}", (amount / 1000.0).round())
    } else {
        format!("{amount} {currency}")
    }
}

pub fn format_percentage(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}%")
}

/// Format a chart value without trailing zeros (`30` rather than `30.0`,
/// `6.35` stays `6.35`).
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        let s = format!("{value:.4}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
