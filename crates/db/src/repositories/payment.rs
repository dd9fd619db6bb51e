use crate::models::DbPayment;
use chrono::Utc;
use eyre::Result;
use portal_core::models::booking::Booking;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Marks `booking` as paid and stores a payment for its email and price
/// inside one transaction.
///
/// Returns `None` without writing anything when the booking does not exist
/// or has already been paid.
pub async fn record_payment(
    pool: &Pool<Postgres>,
    booking: &Booking,
    transaction_id: &str,
) -> Result<Option<DbPayment>> {
    let mut tx = pool.begin().await?;

    let updated = sqlx::query(
        r#"
        UPDATE bookings
        SET paid = TRUE, transaction_id = $2
        WHERE id = $1 AND paid = FALSE
        "#,
    )
    .bind(booking.id)
    .bind(transaction_id)
    .execute(&mut *tx)
    .await?;

    if updated.rows_affected() == 0 {
        tx.rollback().await?;
        return Ok(None);
    }

    let stored = sqlx::query_as::<_, DbPayment>(
        r#"
        INSERT INTO payments (id, booking_id, email, price, transaction_id, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, booking_id, email, price, transaction_id, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(booking.id)
    .bind(&booking.email)
    .bind(booking.price)
    .bind(transaction_id)
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::debug!(
        "Payment recorded: booking_id={}, transaction_id={}",
        stored.booking_id, stored.transaction_id
    );
    Ok(Some(stored))
}
