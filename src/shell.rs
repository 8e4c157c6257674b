// Line-oriented shell bound to a single TodoStore

use crate::filter::StatusFilter;
use crate::models::{Todo, TodoId};
use crate::saver::Saver;
use crate::store::TodoStore;
use colored::Colorize;
use eyre::{Context, Result, eyre};
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::debug;

const HELP: &str = "\
Commands:
  add <text>              add a todo
  toggle <id>             flip completion
  edit <id> <text>        replace the text
  delete <id>             remove a todo (alias: rm)
  select-all              mark every todo completed
  deselect-all            mark every todo pending
  delete-selected         remove every completed todo
  list [all|completed|pending]
  page <n> | next | prev  move between pages
  stats                   show totals
  export                  save completed todos as CSV
  sample                  seed demo data into an empty list
  json                    dump every todo as JSON
  help | quit";

/// One parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Toggle(TodoId),
    Edit(TodoId, String),
    Delete(TodoId),
    SelectAll,
    DeselectAll,
    DeleteSelected,
    List(StatusFilter),
    Page(usize),
    Next,
    Prev,
    Stats,
    Export,
    Sample,
    Json,
    Help,
    Quit,
}

fn parse_id(raw: &str) -> Result<TodoId> {
    if raw.is_empty() {
        return Err(eyre!("Missing todo id"));
    }
    raw.parse().with_context(|| format!("Invalid todo id: {}", raw))
}

impl FromStr for Command {
    type Err = eyre::Report;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "add" => Command::Add(rest.to_string()),
            "toggle" => Command::Toggle(parse_id(rest)?),
            "edit" => {
                let (id, text) = match rest.split_once(char::is_whitespace) {
                    Some((id, text)) => (id, text),
                    None => (rest, ""),
                };
                Command::Edit(parse_id(id)?, text.trim().to_string())
            }
            "delete" | "rm" => Command::Delete(parse_id(rest)?),
            "select-all" => Command::SelectAll,
            "deselect-all" => Command::DeselectAll,
            "delete-selected" => Command::DeleteSelected,
            "list" | "ls" => {
                if rest.is_empty() {
                    Command::List(StatusFilter::All)
                } else {
                    Command::List(rest.parse()?)
                }
            }
            "page" => {
                let n = rest
                    .parse()
                    .with_context(|| format!("Invalid page number: {:?}", rest))?;
                Command::Page(n)
            }
            "next" => Command::Next,
            "prev" => Command::Prev,
            "stats" => Command::Stats,
            "export" => Command::Export,
            "sample" => Command::Sample,
            "json" => Command::Json,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(eyre!("Unknown command: {} (try `help`)", other)),
        };

        Ok(command)
    }
}

/// Interactive view over a store, exporting through `S`
pub struct Shell<S: Saver> {
    store: TodoStore,
    saver: S,
    prompt: bool,
}

impl<S: Saver> Shell<S> {
    pub fn new(store: TodoStore, saver: S) -> Self {
        Self {
            store,
            saver,
            prompt: false,
        }
    }

    /// Print `> ` before each line (for terminals)
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn store(&self) -> &TodoStore {
        &self.store
    }

    pub fn saver(&self) -> &S {
        &self.saver
    }

    /// Read commands until `quit` or end of input.
    ///
    /// Bad commands and failed exports are reported on `out` and do not end
    /// the session.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        if self.prompt {
            write!(out, "> ")?;
            out.flush()?;
        }

        for line in input.lines() {
            let line = line.context("Failed to read command")?;
            if !line.trim().is_empty() {
                let keep_going = match line.parse::<Command>() {
                    Ok(command) => self.execute(command, out)?,
                    Err(e) => {
                        writeln!(out, "{} {:#}", "error:".red(), e)?;
                        true
                    }
                };
                if !keep_going {
                    break;
                }
            }

            if self.prompt {
                write!(out, "> ")?;
                out.flush()?;
            }
        }

        Ok(())
    }

    /// Apply one command. Returns `false` when the session should end.
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<bool> {
        debug!(?command, "execute");

        match command {
            Command::Add(text) => match self.store.add_todo(&text) {
                Some(todo) => writeln!(out, "Added #{}", todo.id)?,
                None => writeln!(out, "Nothing to add")?,
            },
            Command::Toggle(id) => match self.store.toggle_todo(id) {
                Some(todo) if todo.completed => writeln!(out, "Completed #{}", id)?,
                Some(_) => writeln!(out, "Reopened #{}", id)?,
                None => writeln!(out, "No todo #{}", id)?,
            },
            Command::Edit(id, text) => match self.store.update_todo(id, &text) {
                Some(_) => writeln!(out, "Updated #{}", id)?,
                None => writeln!(out, "Unchanged #{}", id)?,
            },
            Command::Delete(id) => match self.store.delete_todo(id) {
                Some(_) => writeln!(out, "Deleted #{}", id)?,
                None => writeln!(out, "No todo #{}", id)?,
            },
            Command::SelectAll => {
                self.store.select_all();
                writeln!(out, "Selected {}", self.store.total_todos())?;
            }
            Command::DeselectAll => {
                self.store.deselect_all();
                writeln!(out, "Deselected {}", self.store.total_todos())?;
            }
            Command::DeleteSelected => {
                let removed = self.store.delete_selected();
                writeln!(out, "Deleted {} selected", removed)?;
            }
            Command::List(StatusFilter::All) => self.render_page(out)?,
            Command::List(filter) => {
                let todos = self.store.filtered(filter);
                self.render_rows(out, todos.into_iter())?;
            }
            Command::Page(n) => {
                self.store.set_page(n);
                self.render_page(out)?;
            }
            Command::Next => {
                self.store.next_page();
                self.render_page(out)?;
            }
            Command::Prev => {
                self.store.prev_page();
                self.render_page(out)?;
            }
            Command::Stats => self.render_stats(out)?,
            // A failed save must not end the session; the list only lives in memory
            Command::Export => match self.store.export_selected(&mut self.saver) {
                Ok(Some(filename)) => writeln!(
                    out,
                    "Exported {} todos to {}",
                    self.store.completed_todos().len(),
                    filename.green()
                )?,
                Ok(None) => writeln!(out, "No todos selected")?,
                Err(e) => writeln!(out, "{} {:#}", "error:".red(), e)?,
            },
            Command::Sample => {
                let added = self.store.initialize_sample_data();
                if added > 0 {
                    writeln!(out, "Added {} sample todos", added)?;
                } else {
                    writeln!(out, "List is not empty; sample data skipped")?;
                }
            }
            Command::Json => {
                let json = serde_json::to_string_pretty(self.store.todos()).context("Failed to serialize todos")?;
                writeln!(out, "{}", json)?;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(false),
        }

        Ok(true)
    }

    fn render_page<W: Write>(&self, out: &mut W) -> Result<()> {
        self.render_rows(out, self.store.paginated_todos().iter())?;
        if self.store.total_pages() > 1 {
            writeln!(
                out,
                "{}",
                format!("Page {} of {}", self.store.current_page(), self.store.total_pages()).dimmed()
            )?;
        }
        Ok(())
    }

    fn render_rows<'a, W: Write>(&self, out: &mut W, todos: impl Iterator<Item = &'a Todo>) -> Result<()> {
        let mut any = false;
        for todo in todos {
            any = true;
            let checkbox = if todo.completed { "[x]" } else { "[ ]" };
            let text = if todo.completed {
                todo.text.strikethrough().dimmed().to_string()
            } else {
                todo.text.clone()
            };
            writeln!(
                out,
                "{} {:>4}  {}  {}",
                checkbox,
                todo.id,
                text,
                todo.created_at.format("%Y-%m-%d").to_string().dimmed()
            )?;
        }

        if !any {
            writeln!(out, "No todos yet")?;
        }
        Ok(())
    }

    fn render_stats<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(
            out,
            "Total: {}  Completed: {}  Pending: {}",
            self.store.total_todos(),
            self.store.completed_todos().len(),
            self.store.pending_todos().len()
        )?;
        Ok(())
    }
}
