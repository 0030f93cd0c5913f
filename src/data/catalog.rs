//! The indicator catalog behind the dashboard, plus per-series frequency
//! restrictions.

use std::collections::HashMap;

use crate::domain::Frequency;

/// Dashboard category, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Inflation,
    Government,
    Sales,
    Construction,
    Capacity,
    Employment,
    Survey,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Inflation,
        Category::Government,
        Category::Sales,
        Category::Construction,
        Category::Capacity,
        Category::Employment,
        Category::Survey,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Inflation => "Inflation Data",
            Category::Government => "Government Data",
            Category::Sales => "Sales Data",
            Category::Construction => "Construction Data",
            Category::Capacity => "Capacity Data",
            Category::Employment => "Employment Data",
            Category::Survey => "Survey Data",
        }
    }
}

/// One catalog entry: a FRED series and how the dashboard labels it.
#[derive(Debug, Clone, Copy)]
pub struct Indicator {
    pub series_id: &'static str,
    pub name: &'static str,
    pub category: Category,
}

/// The home-view tiles. Order within a category is display order.
pub const INDICATORS: &[Indicator] = &[
    Indicator { series_id: "CPIAUCSL", name: "CPI (Consumer Price Index)", category: Category::Inflation },
    Indicator { series_id: "PCUOMFGOMFG", name: "PPI - Industry (Producer Price Index by Industry)", category: Category::Inflation },
    Indicator { series_id: "PPIACO", name: "PPI - Commodities (Producer Price Index by Commodity)", category: Category::Inflation },
    Indicator { series_id: "PCEPI", name: "PCE (Personal Consumption Expenditures)", category: Category::Inflation },
    Indicator { series_id: "GDP", name: "GDP (Gross Domestic Product)", category: Category::Government },
    Indicator { series_id: "GNP", name: "GNP (Gross National Product)", category: Category::Government },
    Indicator { series_id: "W068RCQ027SBEA", name: "Government Spending (Government Total Expenditures)", category: Category::Government },
    Indicator { series_id: "NETEXP", name: "Net Exports of Goods and Services", category: Category::Government },
    Indicator { series_id: "RSAFS", name: "Advance Retail Sales: Retail Trade and Food Services", category: Category::Sales },
    Indicator { series_id: "RETAILIRSA", name: "Retailers: Inventories to Sales Ratio", category: Category::Sales },
    Indicator { series_id: "UNDCONTSA", name: "Construction (New Privately-Owned Housing Units Under Construction)", category: Category::Construction },
    Indicator { series_id: "TCU", name: "Capacity Utilization: Total Index", category: Category::Capacity },
    Indicator { series_id: "PAYEMS", name: "Employment (All Employees: Total Nonfarm)", category: Category::Employment },
    Indicator { series_id: "JTSLDL", name: "Layoffs (Layoffs and Discharges: Total Nonfarm)", category: Category::Employment },
    Indicator { series_id: "UNRATE", name: "Unemployment Rate", category: Category::Employment },
    Indicator { series_id: "UMCSENT", name: "Consumer Sentiment (University of Michigan)", category: Category::Survey },
];

/// Detail-view series that are not home tiles.
pub const CPI_TRANSPORTATION: &str = "CPITRNSL";
pub const CPI_HOUSEHOLD_SUPPLIES: &str = "CUUS0000SAH31";

/// Per-series reporting-frequency restrictions.
///
/// Most series accept any of the four frequencies; a few only publish at
/// coarser intervals, and requesting anything finer is answered locally with
/// an empty table rather than an upstream round trip.
#[derive(Debug, Clone)]
pub struct FrequencyConstraints {
    allowed: HashMap<String, Vec<Frequency>>,
}

impl Default for FrequencyConstraints {
    fn default() -> Self {
        let mut constraints = Self::empty();
        // Semiannual CPI sub-index; FRED rejects monthly/quarterly requests.
        constraints.restrict(
            CPI_HOUSEHOLD_SUPPLIES,
            &[Frequency::Semiannual, Frequency::Annual],
        );
        constraints
    }
}

impl FrequencyConstraints {
    /// No restrictions at all (useful in tests).
    pub fn empty() -> Self {
        Self {
            allowed: HashMap::new(),
        }
    }

    /// Restrict a series to the given frequency set.
    pub fn restrict(&mut self, series_id: impl Into<String>, frequencies: &[Frequency]) {
        self.allowed.insert(series_id.into(), frequencies.to_vec());
    }

    /// Whether the series may be requested at this frequency. Unrestricted
    /// series allow everything.
    pub fn allows(&self, series_id: &str, frequency: Frequency) -> bool {
        match self.allowed.get(series_id) {
            Some(frequencies) => frequencies.contains(&frequency),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_restricts_household_supplies() {
        let constraints = FrequencyConstraints::default();
        assert!(!constraints.allows(CPI_HOUSEHOLD_SUPPLIES, Frequency::Monthly));
        assert!(!constraints.allows(CPI_HOUSEHOLD_SUPPLIES, Frequency::Quarterly));
        assert!(constraints.allows(CPI_HOUSEHOLD_SUPPLIES, Frequency::Semiannual));
        assert!(constraints.allows(CPI_HOUSEHOLD_SUPPLIES, Frequency::Annual));
    }

    #[test]
    fn unrestricted_series_allow_everything() {
        let constraints = FrequencyConstraints::default();
        assert!(constraints.allows("TCU", Frequency::Monthly));
        assert!(constraints.allows("TCU", Frequency::Annual));
        assert!(constraints.allows(CPI_TRANSPORTATION, Frequency::Monthly));
    }

    #[test]
    fn catalog_covers_all_categories() {
        for category in Category::ALL {
            assert!(
                INDICATORS.iter().any(|i| i.category == category),
                "no indicator in category {category:?}"
            );
        }
    }
}
