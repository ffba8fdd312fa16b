//! Интерактивное меню поверх [`InventoryStore`].
//!
//! Меню читает ответы построчно из любого [`BufRead`] и пишет в любой
//! [`Write`], поэтому тестируется без терминала. Ошибки хранилища выводятся
//! пользователю, после чего меню показывается снова; прерывают цикл только
//! ошибки ввода/вывода и конец ввода.

use std::io::{self, BufRead, Write};

use shoe_inventory::{error::StoreError, store::InventoryStore};

use crate::render;

const MENU: &str = "
1. list  - Show full inventory
2. find  - Search for a product by code
3. low   - Restock lowest stock product
4. add   - Add a new product
5. value - Show value of each product
6. sale  - View item with most stock (on sale)
7. quit  - Exit the program
";

/// Пункт главного меню.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    List,
    Find,
    Low,
    Add,
    Value,
    Sale,
    Quit,
}

impl Choice {
    /// Принимает номер пункта или ключевое слово без учёта регистра.
    fn parse(answer: &str) -> Option<Self> {
        match answer.trim().to_lowercase().as_str() {
            "1" | "list" => Some(Self::List),
            "2" | "find" => Some(Self::Find),
            "3" | "low" => Some(Self::Low),
            "4" | "add" => Some(Self::Add),
            "5" | "value" => Some(Self::Value),
            "6" | "sale" => Some(Self::Sale),
            "7" | "quit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Интерактивная сессия.
pub struct Menu<'a, R, W> {
    store: &'a mut InventoryStore,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(store: &'a mut InventoryStore, input: R, output: W) -> Self {
        Self { store, input, output }
    }

    /// Крутит меню до `quit` или конца ввода.
    pub fn run(mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "\n********** INVENTORY MANAGER **********")?;
            writeln!(self.output, "\nPlease select an action below:")?;
            writeln!(self.output, "{MENU}")?;

            let Some(answer) = self.prompt("Enter option number or keyword: ")? else {
                break;
            };

            match Choice::parse(&answer) {
                Some(Choice::List) => self.view_all()?,
                Some(Choice::Find) => self.search()?,
                Some(Choice::Low) => self.restock()?,
                Some(Choice::Add) => self.capture()?,
                Some(Choice::Value) => self.value_per_item()?,
                Some(Choice::Sale) => self.highest_quantity()?,
                Some(Choice::Quit) => {
                    writeln!(self.output, "\nExiting Inventory Manager. Goodbye!")?;
                    break;
                }
                None => writeln!(
                    self.output,
                    "Invalid option. Please enter a number 1-7 or a keyword."
                )?,
            }
        }
        self.output.flush()
    }

    /// Печатает приглашение и читает строку; `None` на конце ввода.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn view_all(&mut self) -> io::Result<()> {
        match self.store.list_all() {
            Ok([]) => writeln!(self.output, "Inventory is empty."),
            Ok(records) => {
                write!(self.output, "\nInventory Overview\n{}", render::inventory_table(records))
            }
            Err(e) => writeln!(self.output, "{e}"),
        }
    }

    fn search(&mut self) -> io::Result<()> {
        let Some(code) = self.prompt("Enter product code to search: ")? else {
            return Ok(());
        };

        match self.store.search_by_code(&code) {
            Ok(record) => writeln!(self.output, "\nProduct Found:\n{record}"),
            Err(StoreError::NotFound(_)) => writeln!(self.output, "Product code not found."),
            Err(e) => writeln!(self.output, "{e}"),
        }
    }

    fn restock(&mut self) -> io::Result<()> {
        let (position, product) = match self.store.find_lowest_stock() {
            Ok((position, record)) => {
                writeln!(self.output, "\nLow Stock Item:\n\n{record}")?;
                (position, record.product.clone())
            }
            Err(StoreError::EmptyInventory) => {
                return writeln!(self.output, "Inventory is empty.");
            }
            Err(e) => return writeln!(self.output, "{e}"),
        };

        loop {
            let Some(answer) = self.prompt(
                "\nWould you like to restock this item? \
                 (Enter 'Y' for yes, 'N' for no, or 'e' to exit): ",
            )?
            else {
                return Ok(());
            };

            match answer.to_lowercase().as_str() {
                "y" => return self.restock_units(position, &product),
                "n" => return writeln!(self.output, "No changes made to '{product}'."),
                "e" => return writeln!(self.output, "Exiting restock menu."),
                _ => writeln!(self.output, "Invalid option. Please type 'Y', 'N', or 'E'.")?,
            }
        }
    }

    fn restock_units(&mut self, position: usize, product: &str) -> io::Result<()> {
        loop {
            let Some(answer) =
                self.prompt(&format!("Enter number of units to add to '{product}': "))?
            else {
                return Ok(());
            };

            let Ok(units) = answer.parse::<i64>() else {
                writeln!(self.output, "Invalid input. Please enter a number only.")?;
                continue;
            };

            return match self.store.restock(position, units) {
                Ok(record) => writeln!(
                    self.output,
                    "\n'{}' has been restocked. New quantity: {}",
                    record.product, record.quantity
                ),
                Err(StoreError::InvalidQuantity(_)) => {
                    writeln!(self.output, "Please enter a non-negative number.")?;
                    continue;
                }
                Err(e @ StoreError::Persistence { .. }) => {
                    writeln!(self.output, "Error saving to file: {e}")
                }
                Err(e) => writeln!(self.output, "{e}"),
            };
        }
    }

    fn capture(&mut self) -> io::Result<()> {
        let mut fields = Vec::with_capacity(5);
        for question in [
            "Enter product country: ",
            "Enter product code: ",
            "Enter product name: ",
            "Enter cost (R): ",
            "Enter quantity: ",
        ] {
            let Some(answer) = self.prompt(question)? else {
                return Ok(());
            };
            fields.push(answer);
        }

        let (Ok(cost), Ok(quantity)) = (fields[3].parse::<f64>(), fields[4].parse::<i64>()) else {
            return writeln!(self.output, "Invalid input. Please enter correct numbers.");
        };

        match self.store.add(&fields[0], &fields[1], &fields[2], cost, quantity) {
            Ok(record) => writeln!(self.output, "\nProduct captured successfully!\n{record}"),
            Err(e) => writeln!(self.output, "{e}"),
        }
    }

    fn value_per_item(&mut self) -> io::Result<()> {
        match self.store.value_per_item() {
            Ok(values) if values.is_empty() => writeln!(self.output, "Inventory is empty."),
            Ok(values) => {
                write!(self.output, "\nProduct Values\n{}", render::values_table(&values))
            }
            Err(e) => writeln!(self.output, "{e}"),
        }
    }

    fn highest_quantity(&mut self) -> io::Result<()> {
        match self.store.highest_quantity() {
            Ok(record) => writeln!(self.output, "\n{}", render::on_sale(record)),
            Err(StoreError::EmptyInventory) => writeln!(self.output, "Inventory is empty."),
            Err(e) => writeln!(self.output, "{e}"),
        }
    }
}
