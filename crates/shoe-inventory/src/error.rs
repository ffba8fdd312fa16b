//! Ошибки кодека записей и хранилища.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Ошибка разбора или проверки одной записи.
///
/// Возникает при чтении строки файла и при создании записи из полей,
/// введённых пользователем.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Строка не делится ровно на 5 полей.
    #[error("Malformed record: expected 5 fields, got {fields}")]
    MalformedRecord {
        /// Фактическое число полей.
        fields: usize,
    },

    /// Цена или количество не являются допустимым числом.
    #[error("Invalid value for {field}: expected {expected}, got '{value}'")]
    InvalidNumericField {
        /// Имя поля (`cost` или `quantity`).
        field: &'static str,
        /// Ожидаемый вид значения.
        expected: &'static str,
        /// Фактическое значение.
        value: String,
    },

    /// Текстовое поле пустое, с пробелами по краям или содержит
    /// разделитель/перевод строки.
    #[error(
        "Invalid value for {field}: '{value}' must be non-blank, without surrounding \
         whitespace, commas or line breaks"
    )]
    InvalidTextField {
        /// Имя поля.
        field: &'static str,
        /// Фактическое значение.
        value: String,
    },

    /// Строка файла не является корректным UTF-8.
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),

    /// Ошибка разбиения строки на поля.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Ошибка ввода/вывода при чтении строк.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Ошибка операций хранилища.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Операция вызвана до первого `load()`.
    #[error("Inventory has not been loaded")]
    NotLoaded,

    /// Некорректные поля новой записи.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Отрицательное или переполняющее счётчик количество для пополнения.
    #[error(
        "Invalid restock quantity {0}: expected a non-negative number \
         that keeps the stock within {max}",
        max = u64::MAX
    )]
    InvalidQuantity(i64),

    /// Позиция вне коллекции.
    #[error("No inventory record at position {0}")]
    UnknownRecord(usize),

    /// Поиск минимума/максимума по пустой коллекции.
    #[error("Inventory is empty")]
    EmptyInventory,

    /// Артикул не найден.
    #[error("Product code '{0}' not found")]
    NotFound(String),

    /// Ошибка чтения или записи файла остатков.
    ///
    /// Для пополнения изменение в памяти к этому моменту уже применено.
    #[error("Failed to access inventory file {}: {source}", .path.display())]
    Persistence {
        /// Путь к файлу.
        path: PathBuf,
        /// Исходная ошибка.
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub(crate) fn persistence(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Persistence { path: path.into(), source }
    }
}

/// Удобный alias для Result со [`StoreError`].
pub type StoreResult<T> = Result<T, StoreError>;
