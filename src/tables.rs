use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{
        invoice::Invoice,
        ranking::{SortKey, View},
    },
    quantity::cost::Euros,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn cost_cell(cost: Option<Euros>) -> Cell {
    cost.map_or_else(|| Cell::new("-").add_attribute(Attribute::Dim), Cell::new)
        .set_alignment(CellAlignment::Right)
}

#[must_use]
pub fn build_invoice_table(invoice: &Invoice) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Invoice", "Amount"]);
    table.add_row(vec![Cell::new("Total"), cost_cell(Some(invoice.total_amount))]);
    table.add_row(vec![Cell::new("Taxes"), cost_cell(Some(invoice.tax_amount))]);
    table.add_row(vec![Cell::new("Equipment rental"), cost_cell(Some(invoice.rental_amount))]);
    table.add_row(vec![
        Cell::new("Fixed costs").add_attribute(Attribute::Bold),
        cost_cell(Some(invoice.fixed_costs())).add_attribute(Attribute::Bold),
    ]);
    table
}

#[must_use]
pub fn build_ranking_table(view: &View<'_>) -> Table {
    let recommended = view.recommended();
    let mut table = new_table();
    table.set_header(vec!["#", "Tariff", "Power", "Energy", "Total", "Offer"]);
    for (index, entry) in view.entries.iter().enumerate() {
        let is_recommended = recommended.is_some_and(|recommended| std::ptr::eq(recommended, *entry));
        let name = Cell::new(&entry.name);
        let total = cost_cell(Some(entry.total_cost));
        table.add_row(vec![
            Cell::new(index + 1).add_attribute(Attribute::Dim),
            if is_recommended { name.fg(Color::Green).add_attribute(Attribute::Bold) } else { name },
            cost_cell(entry.breakdown.map(|breakdown| breakdown.power_cost))
                .fg(if view.sort_key == SortKey::PowerCost { Color::Cyan } else { Color::Reset }),
            cost_cell(entry.breakdown.map(|breakdown| breakdown.energy_cost))
                .fg(if view.sort_key == SortKey::EnergyCost { Color::Cyan } else { Color::Reset }),
            if is_recommended { total.fg(Color::Green) } else { total },
            Cell::new(entry.offer_link.as_ref().map_or("", |url| url.as_str()))
                .add_attribute(Attribute::Dim),
        ]);
    }
    table
}
