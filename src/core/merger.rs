use crate::core::{invoice::Invoice, ranking::RankingEntry, tariff::TariffQuote};

/// Add the invoice's fixed costs to every quoted variable cost, exactly once.
///
/// The quote order is preserved.
pub fn merge(invoice: &Invoice, quotes: impl IntoIterator<Item = TariffQuote>) -> Vec<RankingEntry> {
    let fixed_costs = invoice.fixed_costs();
    quotes
        .into_iter()
        .map(|quote| RankingEntry {
            breakdown: quote.breakdown(),
            total_cost: quote.variable_cost + fixed_costs,
            name: quote.name,
            offer_link: quote.offer_link,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rust_decimal::{Decimal, dec};

    use super::*;
    use crate::{
        core::pipeline::tests::{invoice, quote},
        quantity::cost::Euros,
    };

    #[test]
    fn merge_preserves_order_ok() {
        let invoice = invoice(dec!(120.50), dec!(10.00), dec!(5.00));
        let entries = merge(&invoice, [quote("TarifaA", dec!(90.00)), quote("TarifaB", dec!(80.00))]);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "TarifaA");
        assert_eq!(entries[0].total_cost, Euros(dec!(105.00)));
        assert_eq!(entries[1].name, "TarifaB");
        assert_eq!(entries[1].total_cost, Euros(dec!(95.00)));
    }

    #[test]
    fn merge_keeps_breakdown_and_link_ok() -> anyhow::Result<()> {
        let invoice = invoice(dec!(60), dec!(4.20), dec!(0.80));
        let quote = TariffQuote {
            power_cost: Some(Euros(dec!(12.5))),
            energy_cost: Some(Euros(dec!(27.5))),
            offer_link: Some("https://example.com/oferta".parse()?),
            ..quote("Noche", dec!(40))
        };
        let entries = merge(&invoice, [quote]);
        let entry = &entries[0];
        assert_eq!(entry.total_cost, Euros(dec!(45)));
        assert_eq!(entry.breakdown.map(|breakdown| breakdown.energy_cost), Some(Euros(dec!(27.5))));
        assert_eq!(entry.offer_link.as_ref().map(url::Url::as_str), Some("https://example.com/oferta"));
        Ok(())
    }

    #[test]
    fn merge_nothing_ok() {
        assert!(merge(&invoice(dec!(1), dec!(1), dec!(1)), Vec::new()).is_empty());
    }

    proptest! {
        #[test]
        fn fixed_costs_added_once(
            tax_cents in 0..100_000_i64,
            rental_cents in 0..100_000_i64,
            variable_cents in -100_000..1_000_000_i64
        ) {
            let tax = Decimal::new(tax_cents, 2);
            let rental = Decimal::new(rental_cents, 2);
            let variable_cost = Decimal::new(variable_cents, 2);
            let entries = merge(&invoice(Decimal::ZERO, tax, rental), [quote("Tarifa", variable_cost)]);
            prop_assert_eq!(entries[0].total_cost, Euros(variable_cost + tax + rental));
        }
    }
}
