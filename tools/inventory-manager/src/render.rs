//! Табличный вывод в консоль.

use shoe_inventory::{record::InventoryRecord, store::ItemValue};

/// Выравнивание колонки.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Таблица с рамкой из псевдографики.
///
/// ```text
/// ╒═════════╤══════╕
/// │ Product │ Qty  │
/// ╞═════════╪══════╡
/// │ Runner  │    4 │
/// ╘═════════╧══════╛
/// ```
#[derive(Debug)]
pub struct Table {
    headers: Vec<(String, Align)>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[(&str, Align)]) -> Self {
        Self {
            headers: headers.iter().map(|(name, align)| ((*name).to_string(), *align)).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, (name, _))| {
                self.rows
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header: Vec<String> = self.headers.iter().map(|(name, _)| name.clone()).collect();

        let mut out = String::new();
        out.push_str(&border(&widths, '╒', '═', '╤', '╕'));
        out.push_str(&self.line(&widths, &header));
        if self.rows.is_empty() {
            out.push_str(&border(&widths, '╘', '═', '╧', '╛'));
            return out;
        }
        out.push_str(&border(&widths, '╞', '═', '╪', '╡'));
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                out.push_str(&border(&widths, '├', '─', '┼', '┤'));
            }
            out.push_str(&self.line(&widths, row));
        }
        out.push_str(&border(&widths, '╘', '═', '╧', '╛'));
        out
    }

    fn line(&self, widths: &[usize], cells: &[String]) -> String {
        let cells: Vec<String> = cells
            .iter()
            .zip(widths)
            .zip(&self.headers)
            .map(|((cell, &width), (_, align))| match align {
                Align::Left => format!(" {cell:<width$} "),
                Align::Right => format!(" {cell:>width$} "),
            })
            .collect();
        format!("│{}│\n", cells.join("│"))
    }
}

fn border(widths: &[usize], left: char, fill: char, mid: char, right: char) -> String {
    let segments: Vec<String> =
        widths.iter().map(|width| fill.to_string().repeat(width + 2)).collect();
    format!("{left}{}{right}\n", segments.join(mid.to_string().as_str()))
}

/// Таблица полного списка остатков.
pub fn inventory_table(records: &[InventoryRecord]) -> String {
    let mut table = Table::new(&[
        ("Country", Align::Left),
        ("Code", Align::Left),
        ("Product", Align::Left),
        ("Cost (R)", Align::Right),
        ("Quantity", Align::Right),
    ]);
    for record in records {
        table.push_row(vec![
            record.country.clone(),
            record.code.clone(),
            record.product.clone(),
            format!("{:.2}", record.cost),
            record.quantity.to_string(),
        ]);
    }
    table.render()
}

/// Таблица стоимости остатков.
pub fn values_table(values: &[ItemValue<'_>]) -> String {
    let mut table = Table::new(&[
        ("Product", Align::Left),
        ("Cost (R)", Align::Right),
        ("Quantity", Align::Right),
        ("Total Value (R)", Align::Right),
    ]);
    for value in values {
        table.push_row(vec![
            value.product.to_string(),
            format!("{:.2}", value.cost),
            value.quantity.to_string(),
            format!("{:.2}", value.total),
        ]);
    }
    table.render()
}

/// Карточка позиции с наибольшим остатком.
pub fn on_sale(record: &InventoryRecord) -> String {
    format!("On Sale: {}\n{record}", record.product.to_uppercase())
}
