//! Literal datasets behind the three charts, and the fixed configuration each
//! chart is built with.

use eframe::egui::Color32;
use serde::Serialize;

use super::{AxisConfig, ChartConfig, ChartKey, ChartKind, LegendPosition, TooltipFormat};
use crate::format::DEFAULT_CURRENCY;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct YearValue {
    pub year: &'static str,
    /// USD billions
    pub value: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TimeSlotShare {
    pub slot: &'static str,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CostItem {
    pub category: &'static str,
    pub amount: f64,
    pub percentage: f64,
}

impl YearValue {
    const fn new(year: &'static str, value: f64) -> Self {
        Self { year, value }
    }
}

impl TimeSlotShare {
    const fn new(slot: &'static str, percentage: f64) -> Self {
        Self { slot, percentage }
    }
}

impl CostItem {
    const fn new(category: &'static str, amount: f64, percentage: f64) -> Self {
        Self {
            category,
            amount,
            percentage,
        }
    }
}

pub const MARKET_GROWTH: [YearValue; 8] = [
    YearValue::new("2023", 6.35),
    YearValue::new("2024", 6.76),
    YearValue::new("2025", 7.19),
    YearValue::new("2026", 7.65),
    YearValue::new("2027", 8.14),
    YearValue::new("2028", 8.66),
    YearValue::new("2029", 9.21),
    YearValue::new("2030", 9.79),
];

pub const REVENUE_DISTRIBUTION: [TimeSlotShare; 7] = [
    TimeSlotShare::new("Dinner (18:00-22:00)", 30.0),
    TimeSlotShare::new("Lunch (12:00-14:00)", 25.0),
    TimeSlotShare::new("Breakfast (06:00-10:00)", 12.0),
    TimeSlotShare::new("Late night (22:00-02:00)", 12.0),
    TimeSlotShare::new("Morning (10:00-12:00)", 8.0),
    TimeSlotShare::new("Afternoon (14:00-18:00)", 10.0),
    TimeSlotShare::new("Small hours (02:00-06:00)", 3.0),
];

pub const STARTUP_COSTS: [CostItem; 5] = [
    CostItem::new("Venue & facilities", 350_000.0, 50.0),
    CostItem::new("Vehicles & equipment", 180_000.0, 26.0),
    CostItem::new("Technology", 80_000.0, 11.0),
    CostItem::new("Opening inventory", 60_000.0, 9.0),
    CostItem::new("Working capital", 30_000.0, 4.0),
];

pub const BRAND: Color32 = Color32::from_rgb(0x1F, 0xB8, 0xCD);

/// Wedge colors shared by the arc charts.
pub const PALETTE: [Color32; 7] = [
    Color32::from_rgb(0x1F, 0xB8, 0xCD),
    Color32::from_rgb(0xFF, 0xC1, 0x85),
    Color32::from_rgb(0xB4, 0x41, 0x3C),
    Color32::from_rgb(0xEC, 0xEB, 0xD5),
    Color32::from_rgb(0x5D, 0x87, 0x8F),
    Color32::from_rgb(0xDB, 0x45, 0x45),
    Color32::from_rgb(0xD2, 0xBA, 0x4C),
];

const MARKET_SIZE_LABEL: &str = "Market size (USD bn)";

pub fn market_growth_chart() -> ChartConfig {
    ChartConfig {
        key: ChartKey::MarketGrowth,
        kind: ChartKind::Line {
            tension: 0.4,
            fill: true,
        },
        title: "Malaysian Seafood Market Growth Forecast".to_string(),
        title_color: BRAND,
        labels: MARKET_GROWTH.iter().map(|d| d.year.to_string()).collect(),
        series_label: Some(MARKET_SIZE_LABEL.to_string()),
        values: MARKET_GROWTH.iter().map(|d| d.value).collect(),
        colors: vec![BRAND],
        fill_color: Some(Color32::from_rgba_unmultiplied(31, 184, 205, 26)),
        border_color: Color32::WHITE,
        border_width: 3.0,
        point_radius: 6.0,
        legend: LegendPosition::Bottom,
        x_axis: Some(AxisConfig {
            title: "Year".to_string(),
            min: None,
            max: None,
        }),
        y_axis: Some(AxisConfig {
            title: MARKET_SIZE_LABEL.to_string(),
            min: Some(6.0),
            max: Some(10.0),
        }),
        tooltip: TooltipFormat::Value,
    }
}

pub fn revenue_distribution_chart() -> ChartConfig {
    ChartConfig {
        key: ChartKey::RevenueDistribution,
        kind: ChartKind::Doughnut { cutout: 0.4 },
        title: "Revenue Across 24 Hours".to_string(),
        title_color: BRAND,
        labels: REVENUE_DISTRIBUTION
            .iter()
            .map(|d| d.slot.to_string())
            .collect(),
        series_label: None,
        values: REVENUE_DISTRIBUTION.iter().map(|d| d.percentage).collect(),
        colors: PALETTE.to_vec(),
        fill_color: None,
        border_color: Color32::WHITE,
        border_width: 2.0,
        point_radius: 0.0,
        legend: LegendPosition::Right,
        x_axis: None,
        y_axis: None,
        tooltip: TooltipFormat::Percent,
    }
}

pub fn startup_costs_chart() -> ChartConfig {
    ChartConfig {
        key: ChartKey::StartupCosts,
        kind: ChartKind::Pie,
        title: "Startup Capital Allocation".to_string(),
        title_color: BRAND,
        labels: STARTUP_COSTS
            .iter()
            .map(|d| d.category.to_string())
            .collect(),
        series_label: None,
        values: STARTUP_COSTS.iter().map(|d| d.percentage).collect(),
        colors: PALETTE[..STARTUP_COSTS.len()].to_vec(),
        fill_color: None,
        border_color: Color32::WHITE,
        border_width: 2.0,
        point_radius: 0.0,
        legend: LegendPosition::Bottom,
        x_axis: None,
        y_axis: None,
        tooltip: TooltipFormat::PercentWithAmount {
            amounts: STARTUP_COSTS.iter().map(|d| d.amount).collect(),
            amount_label: "Amount".to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
        },
    }
}
