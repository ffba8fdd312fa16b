//! # e2e-tests - End-to-end тесты CLI `inventory-manager`
//!
//! Бинарник запускается как отдельный процесс, а файл остатков каждый раз
//! копируется во временную директорию, чтобы тесты не меняли фикстуры.
//!
//! ## Фикстуры
//!
//! Тестовые файлы расположены в `fixtures/`:
//! - `inventory.txt`: корректный файл без завершающего перевода строки
//! - `inventory_malformed.txt`: файл со строкой из 3 полей

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

/// Получить путь к директории фикстур.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Получить путь к фикстуре по имени файла.
pub fn fixture(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Скопировать фикстуру в `dir` и вернуть путь к копии.
pub fn copy_fixture(name: &str, dir: &Path) -> Result<PathBuf> {
    let target = dir.join(name);
    fs::copy(fixture(name), &target)
        .with_context(|| format!("Failed to copy fixture {name} to {}", dir.display()))?;
    Ok(target)
}
