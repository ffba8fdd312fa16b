//! Проверка инвариантов записи.

use super::InventoryRecord;
use crate::error::RecordError;

impl InventoryRecord {
    /// Проверяет запись на соответствие формату файла остатков.
    ///
    /// # Правила
    ///
    /// - `country` и `code` не пустые
    /// - текстовые поля без пробелов по краям: строка файла обрезается при разборе
    /// - текстовые поля не содержат запятых и переводов строки (формат без экранирования)
    /// - `cost` конечное и неотрицательное
    ///
    /// Неотрицательность `quantity` гарантирует тип поля.
    pub fn validate(&self) -> Result<(), RecordError> {
        check_text("country", &self.country, true)?;
        check_text("code", &self.code, true)?;
        check_text("product", &self.product, false)?;

        if !self.cost.is_finite() || self.cost < 0.0 {
            return Err(RecordError::InvalidNumericField {
                field: "cost",
                expected: "a non-negative number",
                value: self.cost.to_string(),
            });
        }

        Ok(())
    }
}

fn check_text(field: &'static str, value: &str, required: bool) -> Result<(), RecordError> {
    let blank = required && value.trim().is_empty();
    let padded = value.trim() != value;
    if blank || padded || value.contains([',', '\n', '\r']) {
        return Err(RecordError::InvalidTextField { field, value: value.to_string() });
    }
    Ok(())
}
