use wicket_core::{TodoItem, TodoStore, TodoStoreError};

pub struct ListTodosUseCase<T>
where
    T: TodoStore,
{
    todo_store: T,
}

impl<T> ListTodosUseCase<T>
where
    T: TodoStore,
{
    pub fn new(todo_store: T) -> Self {
        Self { todo_store }
    }

    #[tracing::instrument(name = "ListTodosUseCase::execute", skip(self))]
    pub async fn execute(&self) -> Result<Vec<TodoItem>, TodoStoreError> {
        self.todo_store.list().await
    }
}
