use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::sync::Mutex;
use wicket_core::{NewTodo, TodoItem, TodoStore, TodoStoreError};

use super::json_file::{self, JsonFileError};

/// To-do list held in memory and mirrored to a JSON array file.
///
/// The in-memory list is loaded once and is the source of truth for the life
/// of the process. A file that cannot be read or parsed leaves the store
/// unavailable; it is retried on the next request and never overwritten.
#[derive(Clone)]
pub struct JsonFileTodoStore {
    path: Arc<PathBuf>,
    contents: Arc<Mutex<Contents>>,
}

enum Contents {
    Loaded(Vec<TodoItem>),
    Unavailable(String),
}

impl Contents {
    async fn load(path: &Path) -> Self {
        match json_file::read_json::<Vec<TodoItem>>(path).await {
            Ok(todos) => {
                let todos = todos.unwrap_or_default();
                tracing::info!(count = todos.len(), "Loaded to-do list");
                Contents::Loaded(todos)
            }
            Err(e) => {
                tracing::error!(error = %e, "To-do list unavailable");
                Contents::Unavailable(e.to_string())
            }
        }
    }

    async fn loaded(&mut self, path: &Path) -> Result<&mut Vec<TodoItem>, TodoStoreError> {
        if let Contents::Unavailable(_) = self {
            *self = Contents::load(path).await;
        }
        match self {
            Contents::Loaded(todos) => Ok(todos),
            Contents::Unavailable(reason) => Err(TodoStoreError::Unavailable(reason.clone())),
        }
    }
}

impl From<JsonFileError> for TodoStoreError {
    fn from(error: JsonFileError) -> Self {
        match error {
            JsonFileError::Io { .. } => TodoStoreError::PersistError(error.to_string()),
            JsonFileError::Parse { .. } => TodoStoreError::UnexpectedError(error.to_string()),
        }
    }
}

impl JsonFileTodoStore {
    /// Loads `path`, or starts empty when the file does not exist yet.
    #[tracing::instrument(
        name = "JsonFileTodoStore::open",
        skip_all,
        fields(path = %path.as_ref().display())
    )]
    pub async fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_owned();
        let contents = Contents::load(&path).await;

        Self {
            path: Arc::new(path),
            contents: Arc::new(Mutex::new(contents)),
        }
    }
}

#[async_trait::async_trait]
impl TodoStore for JsonFileTodoStore {
    async fn list(&self) -> Result<Vec<TodoItem>, TodoStoreError> {
        let mut contents = self.contents.lock().await;
        Ok(contents.loaded(&self.path).await?.clone())
    }

    #[tracing::instrument(name = "JsonFileTodoStore::append", skip_all)]
    async fn append(&self, todo: NewTodo) -> Result<TodoItem, TodoStoreError> {
        let mut contents = self.contents.lock().await;
        let todos = contents.loaded(&self.path).await?;
        let item = todo.into_item(todos.len() as u64 + 1);
        todos.push(item.clone());

        if let Err(e) = json_file::write_json(&self.path, &*todos).await {
            // Keep memory and file in step.
            todos.pop();
            return Err(e.into());
        }
        Ok(item)
    }
}
