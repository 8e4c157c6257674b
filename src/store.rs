// In-memory todo store with derived views, paging and bulk actions

use crate::export;
use crate::filter::StatusFilter;
use crate::models::{Todo, TodoId};
use crate::sample::{self, SAMPLE_SIZE};
use crate::saver::Saver;
use chrono::Utc;
use eyre::{Context, Result};
use rand::Rng;
use tracing::{debug, info};

/// Page size used when none is configured
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Single source of truth for the todo list
///
/// Every mutation is a complete step: invalid input (blank text, unknown id)
/// leaves the store untouched and is reported only through the return value.
#[derive(Debug, Clone)]
pub struct TodoStore {
    todos: Vec<Todo>,
    next_id: TodoId,
    current_page: usize,
    items_per_page: usize,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}

impl TodoStore {
    /// Create an empty store. A page size of zero is treated as one.
    pub fn new(items_per_page: usize) -> Self {
        Self {
            todos: Vec::new(),
            next_id: 1,
            current_page: 1,
            items_per_page: items_per_page.max(1),
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Append a new pending todo. Blank text is ignored.
    pub fn add_todo(&mut self, text: &str) -> Option<&Todo> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let id = self.allocate_id();
        debug!(id, "add_todo: appending");
        self.todos.push(Todo::new(id, text));
        self.todos.last()
    }

    pub fn toggle_todo(&mut self, id: TodoId) -> Option<&Todo> {
        let todo = self.todos.iter_mut().find(|t| t.id == id)?;
        todo.completed = !todo.completed;
        debug!(id, completed = todo.completed, "toggle_todo");
        Some(&*todo)
    }

    /// Replace the text of an existing todo. Blank text is ignored.
    pub fn update_todo(&mut self, id: TodoId, new_text: &str) -> Option<&Todo> {
        let new_text = new_text.trim();
        if new_text.is_empty() {
            return None;
        }

        let todo = self.todos.iter_mut().find(|t| t.id == id)?;
        todo.text = new_text.to_string();
        debug!(id, "update_todo");
        Some(&*todo)
    }

    pub fn delete_todo(&mut self, id: TodoId) -> Option<Todo> {
        let pos = self.todos.iter().position(|t| t.id == id)?;
        debug!(id, "delete_todo");
        Some(self.todos.remove(pos))
    }

    pub fn select_all(&mut self) {
        self.set_all_completed(true);
    }

    pub fn deselect_all(&mut self) {
        self.set_all_completed(false);
    }

    /// Remove every completed todo, keeping the order of the rest.
    /// Returns how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        let before = self.todos.len();
        self.todos.retain(|t| !t.completed);
        let removed = before - self.todos.len();
        debug!(removed, "delete_selected");
        removed
    }

    /// Seed demo records, but only into an empty store.
    /// Returns the number of records added.
    pub fn initialize_sample_data(&mut self) -> usize {
        self.initialize_sample_data_with(&mut rand::thread_rng())
    }

    pub fn initialize_sample_data_with<R: Rng>(&mut self, rng: &mut R) -> usize {
        if !self.todos.is_empty() {
            return 0;
        }

        let seeded = sample::sample_todos(rng, self.next_id, SAMPLE_SIZE, Utc::now());
        self.next_id += seeded.len() as TodoId;
        self.todos.extend(seeded);

        info!(count = SAMPLE_SIZE, "Seeded sample data");
        SAMPLE_SIZE
    }

    // ========================================================================
    // Derived views
    // ========================================================================

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn filtered(&self, filter: StatusFilter) -> Vec<&Todo> {
        self.todos.iter().filter(|t| filter.matches(t)).collect()
    }

    pub fn completed_todos(&self) -> Vec<&Todo> {
        self.filtered(StatusFilter::Completed)
    }

    pub fn pending_todos(&self) -> Vec<&Todo> {
        self.filtered(StatusFilter::Pending)
    }

    pub fn total_todos(&self) -> usize {
        self.todos.len()
    }

    pub fn total_pages(&self) -> usize {
        self.todos.len().div_ceil(self.items_per_page)
    }

    /// The slice shown on the current page; empty when the page is past the end
    pub fn paginated_todos(&self) -> &[Todo] {
        let start = (self.current_page - 1).saturating_mul(self.items_per_page);
        if start >= self.todos.len() {
            return &[];
        }
        let end = (start + self.items_per_page).min(self.todos.len());
        &self.todos[start..end]
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    // ========================================================================
    // Paging
    // ========================================================================

    /// Jump to a page, clamped to `1..=max(total_pages, 1)`
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages().max(1));
    }

    pub fn next_page(&mut self) {
        if self.current_page < self.total_pages() {
            self.current_page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Hand the CSV of all completed todos to `saver`.
    ///
    /// Returns the filename used, or `None` without touching the saver when
    /// nothing is selected.
    pub fn export_selected<S: Saver + ?Sized>(&self, saver: &mut S) -> Result<Option<String>> {
        let selected: Vec<Todo> = self.completed_todos().into_iter().cloned().collect();
        if selected.is_empty() {
            return Ok(None);
        }

        let csv = export::to_csv(&selected);
        let filename = export::export_filename(Utc::now());
        saver
            .save(&csv, &filename)
            .with_context(|| format!("Failed to save export {}", filename))?;

        info!(count = selected.len(), filename = %filename, "Exported selected todos");
        Ok(Some(filename))
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    fn allocate_id(&mut self) -> TodoId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn set_all_completed(&mut self, completed: bool) {
        for todo in &mut self.todos {
            todo.completed = completed;
        }
        debug!(completed, count = self.todos.len(), "set_all_completed");
    }
}
