//! State of an interactive post browsing session
//!
//! The shell reads commands, runs fetches and renders; everything that
//! decides what those commands do to the held posts lives here.

use crate::collection::PostCollection;
use crate::posts::{FetchError, PostRecord};

/// A command typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Fetch,
    List,
    Show(i64),
    Back,
    /// Delete the given post, or the selected one when no id is given.
    Delete(Option<i64>),
    Edit,
    Help,
    Quit,
}

/// Parse one line of user input
pub fn parse_command(line: &str) -> Result<SessionCommand, String> {
    let mut parts = line.split_whitespace();
    let name = parts
        .next()
        .ok_or_else(|| "Empty command".to_string())?
        .to_lowercase();
    let arg = parts.next();

    if parts.next().is_some() {
        return Err(format!("Too many arguments for '{name}'"));
    }

    let command = match (name.as_str(), arg) {
        ("fetch" | "refresh", None) => SessionCommand::Fetch,
        ("list" | "ls", None) => SessionCommand::List,
        ("show" | "open", Some(id)) => SessionCommand::Show(parse_id(id)?),
        ("show" | "open", None) => return Err("Usage: show <id>".to_string()),
        ("back", None) => SessionCommand::Back,
        ("delete" | "rm", id) => SessionCommand::Delete(id.map(parse_id).transpose()?),
        ("edit", None) => SessionCommand::Edit,
        ("help" | "?", None) => SessionCommand::Help,
        ("quit" | "exit" | "q", None) => SessionCommand::Quit,
        (
            "fetch" | "refresh" | "list" | "ls" | "back" | "edit" | "help" | "?" | "quit"
            | "exit" | "q",
            Some(_),
        ) => return Err(format!("'{name}' takes no arguments")),
        _ => return Err(format!("Unknown command: {name}. Type 'help' for a list")),
    };

    Ok(command)
}

fn parse_id(input: &str) -> Result<i64, String> {
    input
        .parse::<i64>()
        .map_err(|_| format!("Invalid post id: {input}"))
}

/// Held posts plus the selection and fetch guard around them
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    collection: PostCollection,
    selected: Option<i64>,
    loading: bool,
    fetched: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collection(&self) -> &PostCollection {
        &self.collection
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Mark a fetch as in flight
    ///
    /// Returns `false` when one is already running; the caller must not
    /// start another.
    pub fn begin_fetch(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        true
    }

    /// Apply the outcome of the fetch started by [`SessionState::begin_fetch`]
    ///
    /// On success the collection is replaced and the selection cleared. On
    /// failure the collection is left untouched and the error handed back
    /// for display.
    pub fn finish_fetch(
        &mut self,
        result: Result<Vec<PostRecord>, FetchError>,
    ) -> Result<usize, FetchError> {
        self.loading = false;
        match result {
            Ok(posts) => {
                let count = posts.len();
                self.collection.replace_all(posts);
                self.selected = None;
                self.fetched = true;
                Ok(count)
            }
            Err(err) => {
                self.fetched = false;
                Err(err)
            }
        }
    }

    /// Label of the fetch action for the current state
    pub fn fetch_label(&self) -> &'static str {
        if self.loading {
            "Fetching..."
        } else if self.fetched {
            "Fetch New Posts"
        } else {
            "Fetch Posts"
        }
    }

    pub fn select(&mut self, id: i64) -> Result<&PostRecord, String> {
        let post = self
            .collection
            .get(id)
            .ok_or_else(|| format!("Post {id} not found"))?;
        self.selected = Some(id);
        Ok(post)
    }

    pub fn back(&mut self) {
        self.selected = None;
    }

    pub fn selected_post(&self) -> Option<&PostRecord> {
        self.selected.and_then(|id| self.collection.get(id))
    }

    /// Delete a post by id, or the selected post when `id` is `None`
    ///
    /// Deleting goes back to the list. Returns the deleted id.
    pub fn delete(&mut self, id: Option<i64>) -> Result<i64, String> {
        let target = id
            .or(self.selected)
            .ok_or_else(|| "No post selected. Usage: delete <id>".to_string())?;

        if self.collection.remove_by_id(target) == 0 {
            return Err(format!("Post {target} not found"));
        }

        self.selected = None;
        Ok(target)
    }
}
