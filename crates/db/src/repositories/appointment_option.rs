use crate::models::DbAppointmentOption;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn get_all_options(pool: &Pool<Postgres>) -> Result<Vec<DbAppointmentOption>> {
    let options = sqlx::query_as::<_, DbAppointmentOption>(
        r#"
        SELECT id, name, price, slots, created_at
        FROM appointment_options
        ORDER BY created_at ASC, name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    tracing::debug!("Loaded {} appointment options", options.len());
    Ok(options)
}

pub async fn get_option_names(pool: &Pool<Postgres>) -> Result<Vec<String>> {
    let names = sqlx::query_scalar::<_, String>(
        r#"
        SELECT name
        FROM appointment_options
        ORDER BY created_at ASC, name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(names)
}

pub async fn get_option_by_name(
    pool: &Pool<Postgres>,
    name: &str,
) -> Result<Option<DbAppointmentOption>> {
    let option = sqlx::query_as::<_, DbAppointmentOption>(
        r#"
        SELECT id, name, price, slots, created_at
        FROM appointment_options
        WHERE name = $1
        "#,
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(option)
}
