use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::task::models::Task;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TaskTitle;
use crate::domain::task::ports::TaskRepository;
use crate::task::errors::TaskError;

pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TaskRow {
    id: Uuid,
    title: String,
    description: String,
}

impl TryFrom<TaskRow> for Task {
    type Error = TaskError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        Ok(Task {
            id: TaskId(row.id),
            title: TaskTitle::new(row.title)?,
            description: row.description,
        })
    }
}

fn database_error(e: sqlx::Error) -> TaskError {
    TaskError::DatabaseError(e.to_string())
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create(&self, task: Task) -> Result<Task, TaskError> {
        sqlx::query(
            r#"
            INSERT INTO tasks (id, title, description)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(task.id.0)
        .bind(task.title.as_str())
        .bind(&task.description)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(task)
    }

    async fn list_all(&self) -> Result<Vec<Task>, TaskError> {
        let rows = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT id, title, description
            FROM tasks
            ORDER BY title
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Task::try_from).collect()
    }

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskError> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT id, title, description
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Task::try_from).transpose()
    }

    async fn update(&self, task: Task) -> Result<Task, TaskError> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = $2, description = $3
            WHERE id = $1
            "#,
        )
        .bind(task.id.0)
        .bind(task.title.as_str())
        .bind(&task.description)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(TaskError::NotFound(task.id.to_string()));
        }

        Ok(task)
    }

    async fn delete(&self, id: &TaskId) -> Result<(), TaskError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(TaskError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
