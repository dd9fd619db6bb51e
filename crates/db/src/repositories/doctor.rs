use crate::models::DbDoctor;
use chrono::Utc;
use eyre::Result;
use portal_core::models::doctor::CreateDoctorRequest;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_all_doctors(pool: &Pool<Postgres>) -> Result<Vec<DbDoctor>> {
    let doctors = sqlx::query_as::<_, DbDoctor>(
        r#"
        SELECT id, name, email, specialty, image, created_at
        FROM doctors
        ORDER BY created_at ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(doctors)
}

pub async fn create_doctor(pool: &Pool<Postgres>, doctor: &CreateDoctorRequest) -> Result<DbDoctor> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let created = sqlx::query_as::<_, DbDoctor>(
        r#"
        INSERT INTO doctors (id, name, email, specialty, image, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, name, email, specialty, image, created_at
        "#,
    )
    .bind(id)
    .bind(&doctor.name)
    .bind(&doctor.email)
    .bind(&doctor.specialty)
    .bind(&doctor.image)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

pub async fn delete_doctor(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM doctors
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
