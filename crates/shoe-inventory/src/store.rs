//! Хранилище остатков.
//!
//! [`InventoryStore`] владеет коллекцией записей в памяти и синхронизирует её
//! с файлом двумя разными способами:
//!
//! - [`InventoryStore::add`] дописывает одну строку в конец файла
//! - [`InventoryStore::restock`] перезаписывает файл целиком из памяти
//!
//! До первого [`InventoryStore::load`] хранилище находится в состоянии
//! «не загружено», и любые запросы возвращают [`StoreError::NotLoaded`].

use std::{
    fs::{File, OpenOptions},
    io::{self, ErrorKind, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    codec::{self, HEADER},
    error::{RecordError, StoreError, StoreResult},
    reader::RecordReader,
    record::InventoryRecord,
    writer::RecordWriter,
};

/// Результат загрузки файла.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Файл прочитан.
    Loaded {
        /// Количество загруженных записей.
        records: usize,
        /// Строки, пропущенные из-за ошибок разбора.
        skipped: Vec<SkippedLine>,
    },
    /// Файла нет: коллекция пуста, работа продолжается.
    SourceNotFound,
}

/// Строка файла, не прошедшая разбор при загрузке.
#[derive(Debug)]
pub struct SkippedLine {
    /// Номер строки в файле (1-based, заголовок в строке 1).
    pub line: usize,
    /// Причина пропуска.
    pub reason: RecordError,
}

/// Стоимость остатка одной позиции.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemValue<'a> {
    pub product: &'a str,
    pub cost: f64,
    pub quantity: u64,
    /// `cost * quantity`
    pub total: f64,
}

/// Хранилище остатков, привязанное к одному файлу.
///
/// Порядок записей совпадает с порядком строк в файле и никогда не
/// пересортировывается. Изменяющие операции принимают `&mut self`, поэтому
/// одновременный доступ к одному экземпляру исключён на уровне типов.
///
/// # Пример
///
/// ```
/// use shoe_inventory::store::{InventoryStore, LoadOutcome};
///
/// let dir = tempfile::tempdir().unwrap();
/// let mut store = InventoryStore::new(dir.path().join("inventory.txt"));
///
/// assert!(matches!(store.load().unwrap(), LoadOutcome::SourceNotFound));
/// store.add("Vietnam", "SC02", "Adidas Ultraboost", 120.0, 4).unwrap();
///
/// let (position, lowest) = store.find_lowest_stock().unwrap();
/// assert_eq!(lowest.code, "SC02");
/// assert_eq!(store.restock(position, 6).unwrap().quantity, 10);
/// ```
#[derive(Debug)]
pub struct InventoryStore {
    path: PathBuf,
    records: Option<Vec<InventoryRecord>>,
}

impl InventoryStore {
    /// Создаёт незагруженное хранилище для файла `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), records: None }
    }

    /// Путь к файлу остатков.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Был ли уже вызван успешный `load()`.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.records.is_some()
    }

    /// Загружает файл, полностью заменяя коллекцию в памяти.
    ///
    /// Первая строка всегда считается заголовком. Строки, которые не удалось
    /// разобрать, пропускаются и перечисляются в [`LoadOutcome::Loaded`].
    /// Отсутствие файла не является ошибкой: коллекция становится пустой.
    ///
    /// # Errors
    ///
    /// [`StoreError::Persistence`] при прочих ошибках ввода/вывода; в этом
    /// случае прежнее состояние хранилища сохраняется.
    pub fn load(&mut self) -> StoreResult<LoadOutcome> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "inventory file not found, starting empty");
                self.records = Some(Vec::new());
                return Ok(LoadOutcome::SourceNotFound);
            }
            Err(e) => return Err(StoreError::persistence(&self.path, e)),
        };

        let mut reader = RecordReader::new(file);
        let mut records = Vec::new();
        let mut skipped = Vec::new();

        while let Some(result) = reader.next() {
            match result {
                Ok(record) => records.push(record),
                Err(RecordError::Io(e)) => return Err(StoreError::persistence(&self.path, e)),
                Err(reason) => {
                    let line = reader.line_number();
                    warn!(line, %reason, "skipping inventory line");
                    skipped.push(SkippedLine { line, reason });
                }
            }
        }

        let loaded = records.len();
        info!(path = %self.path.display(), loaded, skipped = skipped.len(), "inventory loaded");
        self.records = Some(records);

        Ok(LoadOutcome::Loaded { records: loaded, skipped })
    }

    /// Все записи в порядке хранения. Пустой срез: допустимое состояние.
    pub fn list_all(&self) -> StoreResult<&[InventoryRecord]> {
        self.records.as_deref().ok_or(StoreError::NotLoaded)
    }

    /// Добавляет новую запись в конец коллекции и дописывает её строку в файл.
    ///
    /// Уже записанные байты файла не меняются. Если файла нет или он пуст,
    /// сначала пишется заголовок.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Record`] при некорректных полях (коллекция не меняется)
    /// - [`StoreError::Persistence`] если дописать строку не удалось (коллекция не меняется)
    pub fn add(
        &mut self,
        country: &str,
        code: &str,
        product: &str,
        cost: f64,
        quantity: i64,
    ) -> StoreResult<&InventoryRecord> {
        if self.records.is_none() {
            return Err(StoreError::NotLoaded);
        }

        let record = InventoryRecord::new(country, code, product, cost, quantity)?;
        append_record(&self.path, &record)
            .map_err(|e| StoreError::persistence(&self.path, e))?;
        debug!(code = %record.code, quantity = record.quantity, "record appended");

        let records = self.records.get_or_insert_with(Vec::new);
        records.push(record);
        Ok(&records[records.len() - 1])
    }

    /// Находит запись с наименьшим остатком.
    ///
    /// При равенстве побеждает первая в порядке коллекции. Возвращает позицию
    /// для последующего [`InventoryStore::restock`].
    ///
    /// # Errors
    ///
    /// [`StoreError::EmptyInventory`] для пустой коллекции.
    pub fn find_lowest_stock(&self) -> StoreResult<(usize, &InventoryRecord)> {
        self.list_all()?
            .iter()
            .enumerate()
            .min_by_key(|(_, record)| record.quantity)
            .ok_or(StoreError::EmptyInventory)
    }

    /// Увеличивает остаток записи на `additional` и перезаписывает файл целиком.
    ///
    /// Файл получает свежий заголовок и все записи коллекции в текущем
    /// порядке. Если перезапись не удалась, увеличение в памяти остаётся
    /// применённым, а ошибка возвращается вызывающей стороне.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidQuantity`] для отрицательного или переполняющего значения
    /// - [`StoreError::UnknownRecord`] если позиции нет в коллекции
    /// - [`StoreError::Persistence`] при ошибке записи
    pub fn restock(&mut self, position: usize, additional: i64) -> StoreResult<&InventoryRecord> {
        let records = self.records.as_mut().ok_or(StoreError::NotLoaded)?;
        let added = u64::try_from(additional).map_err(|_| StoreError::InvalidQuantity(additional))?;
        let record = records.get_mut(position).ok_or(StoreError::UnknownRecord(position))?;

        record.quantity =
            record.quantity.checked_add(added).ok_or(StoreError::InvalidQuantity(additional))?;
        debug!(code = %record.code, added, quantity = record.quantity, "record restocked");

        rewrite_all(&self.path, records).map_err(|e| StoreError::persistence(&self.path, e))?;
        debug!(path = %self.path.display(), records = records.len(), "inventory rewritten");

        Ok(&records[position])
    }

    /// Ищет первую запись с артикулом `code` без учёта регистра.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] если совпадений нет.
    pub fn search_by_code(&self, code: &str) -> StoreResult<&InventoryRecord> {
        let needle = code.trim().to_lowercase();
        self.list_all()?
            .iter()
            .find(|record| record.code.to_lowercase() == needle)
            .ok_or_else(|| StoreError::NotFound(code.trim().to_string()))
    }

    /// Стоимость остатка по каждой записи в порядке коллекции.
    pub fn value_per_item(&self) -> StoreResult<Vec<ItemValue<'_>>> {
        Ok(self
            .list_all()?
            .iter()
            .map(|record| ItemValue {
                product: &record.product,
                cost: record.cost,
                quantity: record.quantity,
                total: record.value(),
            })
            .collect())
    }

    /// Находит запись с наибольшим остатком; при равенстве первую.
    ///
    /// # Errors
    ///
    /// [`StoreError::EmptyInventory`] для пустой коллекции.
    pub fn highest_quantity(&self) -> StoreResult<&InventoryRecord> {
        // max_by_key вернул бы последний из равных
        self.list_all()?
            .iter()
            .reduce(|best, record| if record.quantity > best.quantity { record } else { best })
            .ok_or(StoreError::EmptyInventory)
    }
}

/// Дописывает строку записи, не трогая существующие байты.
fn append_record(path: &Path, record: &InventoryRecord) -> io::Result<()> {
    let mut file = OpenOptions::new().read(true).append(true).create(true).open(path)?;
    let len = file.metadata()?.len();

    let mut chunk = String::new();
    if len == 0 {
        chunk.push_str(HEADER);
        chunk.push('\n');
    } else if !ends_with_newline(&mut file, len)? {
        chunk.push('\n');
    }
    chunk.push_str(&codec::format_line(record));

    file.write_all(chunk.as_bytes())?;
    file.flush()
}

fn ends_with_newline(file: &mut File, len: u64) -> io::Result<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// Усекает файл и пишет заголовок и все записи.
fn rewrite_all(path: &Path, records: &[InventoryRecord]) -> io::Result<()> {
    let mut writer = RecordWriter::new(File::create(path)?);
    writer.write_header()?;
    writer.write_all(records)?;
    writer.flush()
}
