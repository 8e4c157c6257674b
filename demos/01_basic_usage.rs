//! Example 01: Basic Usage
//!
//! This example walks through adding, toggling, editing and deleting todos,
//! then pages through a seeded list.
//!
//! Run with: cargo run --example 01_basic_usage

use todostore::TodoStore;

fn main() {
    println!("TodoStore Basic Usage Example");
    println!("=============================\n");

    let mut store = TodoStore::default();

    // ADD
    println!("1. ADD - Adding three todos...");
    for text in ["Write documentation", "Check PRs waiting for review", "Draft release notes"] {
        if let Some(todo) = store.add_todo(text) {
            println!("   #{} {}", todo.id, todo.text);
        }
    }
    println!("   Blank input is ignored: {:?}\n", store.add_todo("   ").map(|t| t.id));

    // TOGGLE
    println!("2. TOGGLE - Completing #2...");
    store.toggle_todo(2);
    println!(
        "   Completed: {}  Pending: {}\n",
        store.completed_todos().len(),
        store.pending_todos().len()
    );

    // EDIT
    println!("3. EDIT - Renaming #3...");
    store.update_todo(3, "Publish release notes");
    if let Some(todo) = store.get(3) {
        println!("   #{} is now {:?}\n", todo.id, todo.text);
    }

    // DELETE SELECTED
    println!("4. DELETE SELECTED - Removing completed todos...");
    let removed = store.delete_selected();
    println!("   Removed {}, {} left\n", removed, store.total_todos());

    // PAGING
    println!("5. PAGING - Seeding a fresh store...");
    let mut seeded = TodoStore::default();
    seeded.initialize_sample_data();
    println!("   {} todos over {} pages", seeded.total_todos(), seeded.total_pages());
    while seeded.current_page() < seeded.total_pages() {
        seeded.next_page();
    }
    let last = seeded.paginated_todos();
    println!(
        "   Last page {} starts at #{}",
        seeded.current_page(),
        last.first().map(|t| t.id).unwrap_or_default()
    );

    println!("\nDone.");
}
