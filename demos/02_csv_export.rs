//! Example 02: CSV Export
//!
//! Selects a few todos and exports them through a `FileSaver` into a
//! temporary directory, then prints the file.
//!
//! Run with: cargo run --example 02_csv_export

use eyre::Result;
use todostore::{FileSaver, TodoStore};

fn main() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;

    println!("TodoStore CSV Export Example");
    println!("============================\n");
    println!("Export dir: {}\n", temp_dir.path().display());

    let mut store = TodoStore::default();
    store.add_todo("Buy milk, eggs");
    store.add_todo("He said \"ship it\"");
    store.add_todo("Not selected");

    store.toggle_todo(1);
    store.toggle_todo(2);

    let mut saver = FileSaver::new(temp_dir.path());
    match store.export_selected(&mut saver)? {
        Some(filename) => {
            let content = std::fs::read_to_string(temp_dir.path().join(&filename))?;
            println!("Wrote {}:\n", filename);
            println!("{}", content);
        }
        None => println!("Nothing selected"),
    }

    Ok(())
}
