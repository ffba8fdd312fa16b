//! Потоковый writer для файла остатков.
//!
//! Предоставляет [`RecordWriter`] для полной перезаписи файла:
//! заголовок, затем по строке на запись.

use std::io::{self, BufWriter, Write};

use crate::{codec, record::InventoryRecord};

/// Потоковый writer для записей.
///
/// Каждая запись завершается `\n`, заголовок пишется не более одного раза.
///
/// # Пример
///
/// ```
/// use shoe_inventory::{record::InventoryRecord, writer::RecordWriter};
///
/// let record = InventoryRecord::new("Vietnam", "SC02", "Runner", 10.0, 4).unwrap();
/// let mut output = Vec::new();
/// {
///     let mut writer = RecordWriter::new(&mut output);
///     writer.write_header().unwrap();
///     writer.write(&record).unwrap();
///     writer.flush().unwrap();
/// }
/// assert_eq!(
///     String::from_utf8(output).unwrap(),
///     "Country,code,product,cost,quantity\nVietnam,SC02,Runner,10.0,4\n"
/// );
/// ```
pub struct RecordWriter<W: Write> {
    inner: BufWriter<W>,
    /// Счётчик записанных строк данных.
    records_written: usize,
    /// Флаг: записан ли заголовок.
    header_written: bool,
}

impl<W: Write> RecordWriter<W> {
    /// Создаёт новый writer.
    pub fn new(writer: W) -> Self {
        Self { inner: BufWriter::new(writer), records_written: 0, header_written: false }
    }

    /// Записывает заголовок.
    ///
    /// Может вызываться несколько раз, но заголовок записывается только один раз.
    pub fn write_header(&mut self) -> io::Result<()> {
        if !self.header_written {
            codec::write_header(&mut self.inner)?;
            self.header_written = true;
        }
        Ok(())
    }

    /// Записывает одну запись.
    pub fn write(&mut self, record: &InventoryRecord) -> io::Result<()> {
        codec::write_one(&mut self.inner, record)?;
        self.records_written += 1;
        Ok(())
    }

    /// Записывает несколько записей в порядке среза.
    pub fn write_all(&mut self, records: &[InventoryRecord]) -> io::Result<()> {
        for record in records {
            self.write(record)?;
        }
        Ok(())
    }

    /// Принудительно сбрасывает буфер.
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    /// Возвращает количество записанных строк данных.
    #[must_use]
    pub fn records_written(&self) -> usize {
        self.records_written
    }
}
