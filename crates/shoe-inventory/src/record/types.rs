//! Основная структура записи.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// Позиция каталога обуви.
///
/// Артикул (`code`) служит идентификатором, но его уникальность не
/// проверяется: дубликаты хранятся как отдельные записи.
///
/// # Пример
///
/// ```
/// use shoe_inventory::record::InventoryRecord;
///
/// let record = InventoryRecord::new("Vietnam", "SC02", "Adidas Ultraboost", 120.0, 4).unwrap();
/// assert_eq!(record.quantity, 4);
/// assert_eq!(record.value(), 480.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// Страна производства.
    pub country: String,
    /// Артикул товара.
    pub code: String,
    /// Название для отображения.
    pub product: String,
    /// Цена за единицу, неотрицательная.
    pub cost: f64,
    /// Остаток на складе.
    pub quantity: u64,
}

impl InventoryRecord {
    /// Создаёт запись из уже типизированных полей и проверяет её.
    ///
    /// Количество принимается как `i64`, чтобы отрицательный ввод
    /// отклонялся здесь, а не обрезался вызывающей стороной.
    pub fn new(
        country: &str,
        code: &str,
        product: &str,
        cost: f64,
        quantity: i64,
    ) -> Result<Self, RecordError> {
        let quantity = u64::try_from(quantity).map_err(|_| RecordError::InvalidNumericField {
            field: "quantity",
            expected: "a non-negative integer",
            value: quantity.to_string(),
        })?;

        let record = Self {
            country: country.to_string(),
            code: code.to_string(),
            product: product.to_string(),
            cost,
            quantity,
        };
        record.validate()?;
        Ok(record)
    }

    /// Суммарная стоимость остатка: цена × количество.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.cost * self.quantity as f64
    }
}

impl fmt::Display for InventoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Product:    {}", self.product)?;
        writeln!(f, "Country:    {}", self.country)?;
        writeln!(f, "Code:       {}", self.code)?;
        writeln!(f, "Cost:       R {:.2}", self.cost)?;
        write!(f, "Quantity:   {}", self.quantity)
    }
}
