//! Библиотека складского учёта обуви.
//!
//! Крейт хранит каталог позиций в памяти и синхронизирует его с плоским
//! текстовым файлом, где каждая строка после заголовка — одна запись:
//!
//! ```text
//! Country,code,product,cost,quantity
//! South Africa,SC01,Nike Air Max,109.99,32
//! ```
//!
//! - [`codec`]: разбор и сериализация одной строки
//! - [`reader`] / [`writer`]: потоковое чтение и запись файла
//! - [`store`]: хранилище с операциями добавления, пополнения и запросов
//!
//! # Быстрый старт
//!
//! ```
//! use shoe_inventory::codec::{format_line, parse_line};
//!
//! let record = parse_line("South Africa,SC01,Nike Air Max,109.99,32").unwrap();
//! assert_eq!(record.code, "SC01");
//! assert_eq!(record.quantity, 32);
//! assert_eq!(format_line(&record), "South Africa,SC01,Nike Air Max,109.99,32");
//! ```

pub mod codec;
pub mod error;
pub mod reader;
pub mod record;
pub mod store;
pub mod writer;

/// Часто используемые типы одним импортом.
pub mod prelude {
    pub use crate::{
        codec::{HEADER, format_line, parse_line},
        error::{RecordError, StoreError, StoreResult},
        reader::RecordReader,
        record::InventoryRecord,
        store::{InventoryStore, ItemValue, LoadOutcome, SkippedLine},
        writer::RecordWriter,
    };
}
