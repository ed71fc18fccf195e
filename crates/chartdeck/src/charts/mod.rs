pub mod datasets;
pub mod geometry;
#[cfg(test)]
pub mod recording;

use eframe::egui::{Color32, Vec2};
use thiserror::Error;

use crate::deck::ChartSurface;
use crate::format::{format_currency, format_value};

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid chart data: {0}")]
    InvalidData(String),

    #[error("surface {0} has not been laid out yet")]
    Unmeasured(&'static str),

    #[error("chart {0} was already destroyed")]
    Destroyed(&'static str),

    #[error("chart backend failure: {0}")]
    Backend(String),
}

/// The three charts of the deck, each bound to one slide and one surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChartKey {
    MarketGrowth,
    RevenueDistribution,
    StartupCosts,
}

impl ChartKey {
    pub fn all() -> [ChartKey; 3] {
        [
            Self::MarketGrowth,
            Self::RevenueDistribution,
            Self::StartupCosts,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::MarketGrowth => "marketGrowth",
            Self::RevenueDistribution => "revenueDistribution",
            Self::StartupCosts => "startupCosts",
        }
    }

    /// Identifier of the drawing surface the chart attaches to.
    pub fn surface_id(self) -> &'static str {
        match self {
            Self::MarketGrowth => "marketGrowthChart",
            Self::RevenueDistribution => "revenueDistributionChart",
            Self::StartupCosts => "startupCostsChart",
        }
    }

    /// 1-based ordinal of the slide carrying this chart.
    pub fn slide(self) -> usize {
        match self {
            Self::MarketGrowth => 3,
            Self::RevenueDistribution => 5,
            Self::StartupCosts => 8,
        }
    }

    pub fn for_slide(ordinal: usize) -> Option<ChartKey> {
        Self::all().into_iter().find(|key| key.slide() == ordinal)
    }

    /// Build the full configuration, embedded dataset included.
    pub fn config(self) -> ChartConfig {
        match self {
            Self::MarketGrowth => datasets::market_growth_chart(),
            Self::RevenueDistribution => datasets::revenue_distribution_chart(),
            Self::StartupCosts => datasets::startup_costs_chart(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartKind {
    Line { tension: f32, fill: bool },
    /// `cutout` is the inner radius as a fraction of the outer radius.
    Doughnut { cutout: f32 },
    Pie,
}

impl ChartKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Line { .. } => "line",
            Self::Doughnut { .. } => "doughnut",
            Self::Pie => "pie",
        }
    }

    pub fn is_arc(self) -> bool {
        !matches!(self, Self::Line { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    Bottom,
    Right,
}

#[derive(Debug, Clone)]
pub struct AxisConfig {
    pub title: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone)]
pub enum TooltipFormat {
    /// `series label: value`
    Value,
    /// `label: value%`
    Percent,
    /// `label: value%` followed by the matching amount, formatted as currency.
    PercentWithAmount {
        amounts: Vec<f64>,
        amount_label: String,
        currency: String,
    },
}

/// Everything a backend needs to construct a chart: the kind, the data and
/// the fixed visual configuration.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub key: ChartKey,
    pub kind: ChartKind,
    pub title: String,
    pub title_color: Color32,
    pub labels: Vec<String>,
    pub series_label: Option<String>,
    pub values: Vec<f64>,
    /// Line charts use the first color for stroke and points; arc charts use
    /// one color per wedge.
    pub colors: Vec<Color32>,
    pub fill_color: Option<Color32>,
    pub border_color: Color32,
    pub border_width: f32,
    pub point_radius: f32,
    pub legend: LegendPosition,
    pub x_axis: Option<AxisConfig>,
    pub y_axis: Option<AxisConfig>,
    pub tooltip: TooltipFormat,
}

impl ChartConfig {
    pub fn validate(&self) -> ChartResult<()> {
        if self.values.is_empty() {
            return Err(ChartError::InvalidData(format!(
                "{} has no values",
                self.key.name()
            )));
        }
        if self.labels.len() != self.values.len() {
            return Err(ChartError::InvalidData(format!(
                "{} has {} labels for {} values",
                self.key.name(),
                self.labels.len(),
                self.values.len()
            )));
        }
        if self.values.iter().any(|v| !v.is_finite()) {
            return Err(ChartError::InvalidData(format!(
                "{} contains a non-finite value",
                self.key.name()
            )));
        }
        if self.kind.is_arc() {
            if self.colors.len() < self.values.len() {
                return Err(ChartError::InvalidData(format!(
                    "{} needs one color per wedge",
                    self.key.name()
                )));
            }
            if self.values.iter().any(|v| *v < 0.0) || self.total() <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{} wedges must be non-negative with a positive total",
                    self.key.name()
                )));
            }
        } else if self.colors.is_empty() {
            return Err(ChartError::InvalidData(format!(
                "{} has no line color",
                self.key.name()
            )));
        }
        Ok(())
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    pub fn color(&self, index: usize) -> Color32 {
        if self.colors.is_empty() {
            return Color32::GRAY;
        }
        self.colors[index % self.colors.len()]
    }

    /// Legend rows: one per series for line charts, one per wedge otherwise.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        if self.kind.is_arc() {
            self.labels
                .iter()
                .enumerate()
                .map(|(i, label)| (label.clone(), self.color(i)))
                .collect()
        } else {
            let label = self.series_label.clone().unwrap_or_default();
            vec![(label, self.color(0))]
        }
    }

    /// Tooltip text for the data point at `index`.
    pub fn tooltip_lines(&self, index: usize) -> Vec<String> {
        let (Some(label), Some(value)) = (self.labels.get(index), self.values.get(index)) else {
            return Vec::new();
        };
        match &self.tooltip {
            TooltipFormat::Value => {
                let series = self.series_label.as_deref().unwrap_or(label);
                vec![label.clone(), format!("{series}: {}", format_value(*value))]
            }
            TooltipFormat::Percent => vec![format!("{label}: {}%", format_value(*value))],
            TooltipFormat::PercentWithAmount {
                amounts,
                amount_label,
                currency,
            } => {
                let mut lines = vec![format!("{label}: {}%", format_value(*value))];
                if let Some(amount) = amounts.get(index) {
                    lines.push(format!(
                        "{amount_label}: {}",
                        format_currency(*amount, currency)
                    ));
                }
                lines
            }
        }
    }
}

/// A constructed chart, bound to one surface.
pub trait ChartHandle {
    fn resize(&mut self, size: Option<Vec2>) -> ChartResult<()>;
    fn destroy(&mut self) -> ChartResult<()>;
}

/// The charting collaborator: turns a configuration into a live chart.
pub trait ChartBackend {
    type Handle: ChartHandle;

    fn create(&mut self, surface: &ChartSurface, config: ChartConfig)
    -> ChartResult<Self::Handle>;
}
