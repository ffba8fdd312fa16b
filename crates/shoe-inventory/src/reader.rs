//! Потоковый reader для файла остатков.
//!
//! Предоставляет [`RecordReader`]: итератор, который пропускает заголовок
//! и разбирает каждую следующую строку через [`codec::parse_line`].

use std::io::{BufRead, BufReader, Read};

use crate::{codec, error::RecordError, record::InventoryRecord};

/// Потоковый reader для записей.
///
/// В отличие от строгого парсера, ошибка разбора строки не останавливает
/// итерацию: вызывающая сторона сама решает, пропустить строку или прервать
/// чтение. Итерация завершается только на EOF или ошибке ввода/вывода.
///
/// # Пример
///
/// ```
/// use std::io::Cursor;
/// use shoe_inventory::reader::RecordReader;
///
/// let data = "Country,code,product,cost,quantity\nVietnam,SC02,Runner,10.0,4\nbroken\n";
/// let mut reader = RecordReader::new(Cursor::new(data));
///
/// assert!(reader.next().unwrap().is_ok());
/// assert!(reader.next().unwrap().is_err());
/// assert_eq!(reader.line_number(), 3);
/// assert!(reader.next().is_none());
/// ```
pub struct RecordReader<R> {
    inner: BufReader<R>,
    /// Номер последней прочитанной строки (1-based, заголовок в строке 1).
    line_number: usize,
    /// Счётчик успешно разобранных записей.
    records_read: usize,
    /// Флаг достижения EOF или ошибки ввода/вывода.
    finished: bool,
    /// Флаг: был ли пропущен заголовок.
    header_skipped: bool,
}

impl<R: Read> RecordReader<R> {
    /// Создаёт новый reader.
    ///
    /// Входной reader оборачивается в [`BufReader`].
    pub fn new(reader: R) -> Self {
        Self {
            inner: BufReader::new(reader),
            line_number: 0,
            records_read: 0,
            finished: false,
            header_skipped: false,
        }
    }

    /// Номер строки, к которой относится последний результат `next()`.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Возвращает количество успешно разобранных записей.
    #[must_use]
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Читает следующую строку как байты: битая кодировка одной строки
    /// не должна останавливать чтение остальных.
    fn read_line(&mut self) -> Option<Result<String, RecordError>> {
        let mut buf = Vec::new();
        match self.inner.read_until(b'\n', &mut buf) {
            Ok(0) => {
                self.finished = true;
                None
            }
            Ok(_) => {
                self.line_number += 1;
                Some(String::from_utf8(buf).map_err(RecordError::from))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e.into()))
            }
        }
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<InventoryRecord, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if !self.header_skipped {
            self.header_skipped = true;
            match codec::skip_header(&mut self.inner) {
                Ok(true) => self.line_number += 1,
                Ok(false) => {
                    self.finished = true;
                    return None;
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
            }
        }

        let line = match self.read_line()? {
            Ok(line) => line,
            Err(e) => return Some(Err(e)),
        };

        let parsed = codec::parse_line(&line);
        if parsed.is_ok() {
            self.records_read += 1;
        }
        Some(parsed)
    }
}
