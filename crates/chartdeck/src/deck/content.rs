use crate::charts::ChartKey;

use super::TOTAL_SLIDES;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideLayout {
    Title,
    Bullets,
    Chart(ChartKey),
}

#[derive(Debug)]
pub struct SlideContent {
    pub heading: &'static str,
    pub subtitle: Option<&'static str>,
    pub bullets: &'static [&'static str],
    pub layout: SlideLayout,
}

pub const DECK_TITLE: &str = "Coastal Catch: Fresh Seafood, Around the Clock";

pub const SLIDES: [SlideContent; TOTAL_SLIDES] = [
    SlideContent {
        heading: "Coastal Catch",
        subtitle: Some("A 24-hour fresh seafood kitchen and delivery business in Malaysia"),
        bullets: &[],
        layout: SlideLayout::Title,
    },
    SlideContent {
        heading: "The Opportunity",
        subtitle: None,
        bullets: &[
            "Seafood is the protein of choice in coastal Malaysian households",
            "Late-night dining culture leaves most kitchens closed when demand peaks",
            "Delivery platforms have made round-the-clock ordering routine",
        ],
        layout: SlideLayout::Bullets,
    },
    SlideContent {
        heading: "Market Growth",
        subtitle: Some("Malaysian seafood market size forecast, USD billions"),
        bullets: &[],
        layout: SlideLayout::Chart(ChartKey::MarketGrowth),
    },
    SlideContent {
        heading: "Our Concept",
        subtitle: None,
        bullets: &[
            "Central kitchen next to the morning fish auction",
            "Seven service windows spanning all 24 hours",
            "Dine-in counter plus our own delivery fleet",
        ],
        layout: SlideLayout::Bullets,
    },
    SlideContent {
        heading: "Revenue Across the Day",
        subtitle: Some("Share of daily revenue by service window"),
        bullets: &[],
        layout: SlideLayout::Chart(ChartKey::RevenueDistribution),
    },
    SlideContent {
        heading: "Target Customers",
        subtitle: None,
        bullets: &[
            "Families ordering dinner for four or more",
            "Office workers at lunch within a 5 km radius",
            "Night-shift workers and late diners after 22:00",
        ],
        layout: SlideLayout::Bullets,
    },
    SlideContent {
        heading: "Competitive Edge",
        subtitle: None,
        bullets: &[
            "Catch-to-plate in under six hours",
            "Menu priced by daily auction, published every morning",
            "Only seafood kitchen in the area open past 02:00",
        ],
        layout: SlideLayout::Bullets,
    },
    SlideContent {
        heading: "Startup Costs",
        subtitle: Some("Allocation of initial capital"),
        bullets: &[],
        layout: SlideLayout::Chart(ChartKey::StartupCosts),
    },
    SlideContent {
        heading: "Operations",
        subtitle: None,
        bullets: &[
            "Three kitchen shifts with overlapping handovers",
            "Cold chain from auction to kitchen to rider",
            "Inventory reviewed after every service window",
        ],
        layout: SlideLayout::Bullets,
    },
    SlideContent {
        heading: "Technology",
        subtitle: None,
        bullets: &[
            "Own ordering app alongside the delivery platforms",
            "Live menu pricing pulled from the auction feed",
            "Rider routing tuned for night-time traffic",
        ],
        layout: SlideLayout::Bullets,
    },
    SlideContent {
        heading: "Marketing",
        subtitle: None,
        bullets: &[
            "Launch week with free delivery after midnight",
            "Loyalty stamps shared across dine-in and delivery",
            "Partnerships with hospitals and night-shift employers",
        ],
        layout: SlideLayout::Bullets,
    },
    SlideContent {
        heading: "Financial Outlook",
        subtitle: None,
        bullets: &[
            "Break-even expected in month 14",
            "Dinner and lunch windows carry 55% of revenue",
            "Late-night windows lift utilisation of fixed costs",
        ],
        layout: SlideLayout::Bullets,
    },
    SlideContent {
        heading: "Risks",
        subtitle: None,
        bullets: &[
            "Seasonal swings in catch volume and auction prices",
            "Staffing the overnight shifts",
            "Platform commission changes",
        ],
        layout: SlideLayout::Bullets,
    },
    SlideContent {
        heading: "Thank You",
        subtitle: Some("Questions and discussion"),
        bullets: &[],
        layout: SlideLayout::Title,
    },
];

/// Content of the slide at a 1-based ordinal.
pub fn slide(ordinal: usize) -> Option<&'static SlideContent> {
    ordinal.checked_sub(1).and_then(|i| SLIDES.get(i))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_slides_match_chart_keys() {
        for key in ChartKey::all() {
            let content = slide(key.slide()).expect("chart slide exists");
            assert_eq!(content.layout, SlideLayout::Chart(key));
        }
    }

    #[test]
    fn test_only_three_chart_slides() {
        let charts = SLIDES
            .iter()
            .filter(|s| matches!(s.layout, SlideLayout::Chart(_)))
            .count();
        assert_eq!(charts, 3);
    }

    #[test]
    fn test_slide_lookup_bounds() {
        assert!(slide(0).is_none());
        assert_eq!(slide(1).map(|s| s.heading), Some("Coastal Catch"));
        assert!(slide(TOTAL_SLIDES + 1).is_none());
    }
}
