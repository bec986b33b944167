use wicket_core::{NewTodo, TodoItem, TodoStore, TodoStoreError};

#[derive(Debug, thiserror::Error)]
pub enum AddTodoError {
    #[error("To-do store error: {0}")]
    TodoStoreError(#[from] TodoStoreError),
}

pub struct AddTodoUseCase<T>
where
    T: TodoStore,
{
    todo_store: T,
}

impl<T> AddTodoUseCase<T>
where
    T: TodoStore,
{
    pub fn new(todo_store: T) -> Self {
        Self { todo_store }
    }

    #[tracing::instrument(
        name = "AddTodoUseCase::execute",
        skip(self, todo),
        fields(title = %todo.title)
    )]
    pub async fn execute(&self, todo: NewTodo) -> Result<TodoItem, AddTodoError> {
        let item = self.todo_store.append(todo).await?;
        tracing::debug!(id = item.id, "Appended to-do item");
        Ok(item)
    }
}
