//! Модель данных позиции каталога.
//!
//! Определяет [`InventoryRecord`] и правила, которым запись обязана
//! соответствовать после разбора или изменения.

mod types;
mod validation;

pub use types::InventoryRecord;
