use serde::{Deserialize, Serialize};

/// A persisted to-do entry. `id` is assigned by the store as `count + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: u64,
    pub title: String,
    pub time: String,
    pub content: String,
    #[serde(default)]
    pub completed: bool,
}

/// Fields submitted through the new-item form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewTodo {
    pub title: String,
    pub time: String,
    pub content: String,
}

impl NewTodo {
    pub fn into_item(self, id: u64) -> TodoItem {
        TodoItem {
            id,
            title: self.title,
            time: self.time,
            content: self.content,
            completed: false,
        }
    }
}
