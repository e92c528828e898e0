use serde::Deserialize;
use serde_with::serde_as;
use url::Url;

use crate::quantity::cost::Euros;

/// A candidate tariff as quoted by the comparison service.
#[must_use]
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TariffQuote {
    #[serde(rename = "tarifa")]
    pub name: String,

    /// Energy and power cost of the invoiced period under this tariff.
    ///
    /// Taxes and the equipment rental are **not** included.
    #[serde(rename = "coste_total")]
    pub variable_cost: Euros,

    #[serde(rename = "coste_potencia", default)]
    pub power_cost: Option<Euros>,

    #[serde(rename = "coste_energia", default)]
    pub energy_cost: Option<Euros>,

    #[serde_as(deserialize_as = "serde_with::DefaultOnError")]
    #[serde(rename = "enlace", default)]
    pub offer_link: Option<Url>,
}

impl TariffQuote {
    pub fn breakdown(&self) -> Option<CostBreakdown> {
        Some(CostBreakdown { power_cost: self.power_cost?, energy_cost: self.energy_cost? })
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CostBreakdown {
    pub power_cost: Euros,
    pub energy_cost: Euros,
}
