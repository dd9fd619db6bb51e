use crate::models::DbUser;
use chrono::Utc;
use eyre::Result;
use portal_core::models::user::Role;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_user_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, name, email, role, created_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn get_all_users(pool: &Pool<Postgres>) -> Result<Vec<DbUser>> {
    let users = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, name, email, role, created_at
        FROM users
        ORDER BY created_at ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(users)
}

pub async fn create_user(pool: &Pool<Postgres>, name: &str, email: &str) -> Result<Option<DbUser>> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let user = sqlx::query_as::<_, DbUser>(
        r#"
        INSERT INTO users (id, name, email, role, created_at)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO NOTHING
        RETURNING id, name, email, role, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(Role::User.as_str())
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn update_user_role(pool: &Pool<Postgres>, id: Uuid, role: Role) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET role = $2
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(role.as_str())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
