use itertools::Itertools;
use url::Url;

use crate::{core::tariff::CostBreakdown, quantity::cost::Euros};

/// A tariff with the invoice's fixed costs merged in.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankingEntry {
    pub name: String,
    pub total_cost: Euros,
    pub offer_link: Option<Url>,
    pub breakdown: Option<CostBreakdown>,
}

impl RankingEntry {
    /// Case-insensitive substring match, `needle` must already be lowercase.
    fn matches(&self, needle: &str) -> bool {
        needle.is_empty() || self.name.to_lowercase().contains(needle)
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum SortKey {
    #[default]
    TotalCost,
    EnergyCost,
    PowerCost,
}

impl SortKey {
    fn value_of(self, entry: &RankingEntry) -> Option<Euros> {
        match self {
            Self::TotalCost => Some(entry.total_cost),
            Self::EnergyCost => entry.breakdown.map(|breakdown| breakdown.energy_cost),
            Self::PowerCost => entry.breakdown.map(|breakdown| breakdown.power_cost),
        }
    }
}

/// Ranking entries as they should be displayed.
#[must_use]
#[derive(Debug)]
pub struct View<'a> {
    pub entries: Vec<&'a RankingEntry>,
    pub sort_key: SortKey,
}

impl<'a> View<'a> {
    /// Filter the entries by name and sort them ascending by the key.
    ///
    /// The sort is stable. Entries lacking the sorted-by figure go last.
    pub fn derive(entries: &'a [RankingEntry], filter: &str, sort_key: SortKey) -> Self {
        let needle = filter.to_lowercase();
        let mut entries = entries.iter().filter(|entry| entry.matches(&needle)).collect_vec();
        entries.sort_by_key(|entry| {
            let value = sort_key.value_of(entry);
            (value.is_none(), value)
        });
        Self { entries, sort_key }
    }

    /// The cheapest tariff, only meaningful when sorted by the total cost.
    #[must_use]
    pub fn recommended(&self) -> Option<&'a RankingEntry> {
        if self.sort_key == SortKey::TotalCost { self.entries.first().copied() } else { None }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
