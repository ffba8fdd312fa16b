//! # xtask - Автоматизация сборки проекта
//!
//! Этот крейт предоставляет команды автоматизации сборки для воркспейса,
//! а также генерацию демонстрационного файла остатков.
//!
//! См. [`HELP_TEXT`] для полного списка доступных команд и информации по использованию.
use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use shoe_inventory::{record::InventoryRecord, writer::RecordWriter};
use xshell::{Shell, cmd};

/// Текст справки для команды xtask.
///
/// Эта константа содержит полное сообщение справки, которое отображается
/// при запуске `cargo run -p xtask -- help`.
pub const HELP_TEXT: &str = r#"xtask

Использование:
  cargo run -p xtask -- <команда>

Команды:
  help         Показать это сообщение
  fmt          Запустить rustfmt
  fmt-check    Проверить форматирование (CI)
  clippy       Запустить clippy (воркспейс)
  test         Запустить тесты через nextest (воркспейс)
  ci           Запустить fmt-check + clippy + test
  seed [путь]  Создать демонстрационный inventory.txt (по умолчанию в корне воркспейса)

Примечание:
  cargo-nextest устанавливается автоматически при первом запуске тестов
"#;

/// Демонстрационные остатки: страна, код, название, цена, количество.
const SAMPLE: &[(&str, &str, &str, f64, i64)] = &[
    ("South Africa", "SC01", "Nike Air Max", 109.99, 20),
    ("China", "SC02", "Jordan 1", 3200.0, 4),
    ("Vietnam", "SC03", "Adidas Ultraboost", 1800.0, 10),
    ("Mexico", "SC04", "Puma Suede", 750.5, 4),
    ("Brazil", "SC05", "Converse Chuck 70", 950.0, 35),
    ("Italy", "SC06", "Superga 2750", 65.0, 12),
];

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let cmd = args.next().unwrap_or_else(|| "help".to_string());

    let sh = Shell::new()?;

    match cmd.as_str() {
        "help" | "-h" | "--help" => help(),
        "fmt" => Ok(cmd!(sh, "cargo fmt --all").run()?),
        "fmt-check" => Ok(cmd!(sh, "cargo fmt --all -- --check").run()?),
        "clippy" => Ok(cmd!(sh, "cargo clippy --workspace --all-targets -- -D warnings").run()?),
        "test" => {
            ensure_nextest(&sh)?;
            cmd!(sh, "cargo nextest run --workspace").run()?;
            // Doctests отдельно: nextest их не запускает
            cmd!(sh, "cargo test --workspace --doc").run()?;
            Ok(())
        }
        "ci" => {
            ensure_nextest(&sh)?;
            cmd!(sh, "cargo fmt --all -- --check").run()?;
            cmd!(sh, "cargo clippy --workspace --all-targets -- -D warnings").run()?;
            // e2e тестам нужен собранный inventory-manager
            cmd!(sh, "cargo build --workspace").run()?;
            cmd!(sh, "cargo nextest run --workspace").run()?;
            cmd!(sh, "cargo test --workspace --doc").run()?;
            Ok(())
        }
        "seed" => {
            let path = match args.next() {
                Some(path) => PathBuf::from(path),
                None => project_root()?.join("inventory.txt"),
            };
            seed(&path)
        }
        other => bail!("Неизвестная команда: {other}\n\nЗапустите: cargo run -p xtask -- help"),
    }
}

/// Показать сообщение справки.
fn help() -> Result<()> {
    println!("{}", HELP_TEXT);
    Ok(())
}

/// Записать демонстрационные остатки в `path`, перезаписав файл.
///
/// Каждая позиция проходит ту же валидацию, что и при добавлении через
/// `inventory-manager add`.
fn seed(path: &std::path::Path) -> Result<()> {
    let records = SAMPLE
        .iter()
        .map(|&(country, code, product, cost, quantity)| {
            InventoryRecord::new(country, code, product, cost, quantity)
                .with_context(|| format!("Некорректная демонстрационная позиция {code}"))
        })
        .collect::<Result<Vec<_>>>()?;

    let file =
        File::create(path).with_context(|| format!("Не удалось создать {}", path.display()))?;
    let mut writer = RecordWriter::new(file);
    writer.write_header()?;
    writer.write_all(&records)?;
    writer.flush()?;

    println!("Записано позиций: {} -> {}", writer.records_written(), path.display());
    Ok(())
}

/// Получить корневую директорию проекта.
///
/// # Ошибки
///
/// Возвращает ошибку, если:
/// - Переменная окружения CARGO_MANIFEST_DIR не установлена
/// - Директория манифеста не имеет родительской директории
fn project_root() -> Result<PathBuf> {
    Ok(std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)?
        .parent()
        .context("CARGO_MANIFEST_DIR не имеет родительской директории")?
        .to_path_buf())
}

/// Проверить наличие cargo-nextest и установить при необходимости.
fn ensure_nextest(sh: &Shell) -> Result<()> {
    // quiet: проверка не должна засорять консоль
    if cmd!(sh, "cargo nextest --version").quiet().run().is_ok() {
        return Ok(());
    }

    eprintln!("cargo-nextest не найден, устанавливаю...");
    cmd!(sh, "cargo install cargo-nextest --locked").run()?;
    eprintln!("cargo-nextest успешно установлен");
    Ok(())
}
