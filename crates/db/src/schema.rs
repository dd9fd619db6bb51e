use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Treatment catalog; slots are date independent
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointment_options (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL UNIQUE,
            price DOUBLE PRECISION NOT NULL DEFAULT 0,
            slots TEXT[] NOT NULL DEFAULT '{}',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Bookings reference treatments by name only
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            treatment VARCHAR(255) NOT NULL,
            appointment_date VARCHAR(64) NOT NULL,
            slot VARCHAR(64) NOT NULL,
            email VARCHAR(255) NOT NULL,
            patient VARCHAR(255) NULL,
            phone VARCHAR(64) NULL,
            price DOUBLE PRECISION NOT NULL DEFAULT 0,
            paid BOOLEAN NOT NULL DEFAULT FALSE,
            transaction_id VARCHAR(255) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            role VARCHAR(32) NOT NULL DEFAULT 'user',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS doctors (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL,
            specialty VARCHAR(255) NOT NULL,
            image TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS payments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            booking_id UUID NOT NULL REFERENCES bookings(id),
            email VARCHAR(255) NOT NULL,
            price DOUBLE PRECISION NOT NULL,
            transaction_id VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // A slot can be taken once per treatment and day, and a patient can hold
    // one booking per treatment and day.
    let indexes = [
        "CREATE UNIQUE INDEX IF NOT EXISTS uq_bookings_slot ON bookings(appointment_date, treatment, slot)",
        "CREATE UNIQUE INDEX IF NOT EXISTS uq_bookings_patient ON bookings(appointment_date, email, treatment)",
        "CREATE INDEX IF NOT EXISTS idx_bookings_email ON bookings(email)",
        "CREATE INDEX IF NOT EXISTS idx_payments_booking_id ON payments(booking_id)",
    ];
    for statement in indexes {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}

/// Default clinic catalog used when seeding a fresh database.
pub fn default_catalog() -> Vec<(&'static str, f64, Vec<String>)> {
    let slots: Vec<String> = [
        "08.00 AM - 08.30 AM",
        "08.30 AM - 09.00 AM",
        "09.00 AM - 09.30 AM",
        "09.30 AM - 10.00 AM",
        "10.00 AM - 10.30 AM",
        "10.30 AM - 11.00 AM",
        "11.00 AM - 11.30 AM",
        "11.30 AM - 12.00 PM",
        "1.00 PM - 1.30 PM",
        "1.30 PM - 2.00 PM",
        "2.00 PM - 2.30 PM",
        "2.30 PM - 3.00 PM",
        "3.00 PM - 3.30 PM",
        "3.30 PM - 4.00 PM",
        "4.00 PM - 4.30 PM",
        "4.30 PM - 5.00 PM",
    ]
    .into_iter()
    .map(String::from)
    .collect();

    vec![
        ("Teeth Orthodontics", 120.0, slots.clone()),
        ("Cosmetic Dentistry", 150.0, slots.clone()),
        ("Teeth Cleaning", 40.0, slots.clone()),
        ("Cavity Protection", 80.0, slots.clone()),
        ("Pediatric Dental", 60.0, slots.clone()),
        ("Oral Surgery", 200.0, slots),
    ]
}

/// Inserts the default catalog, leaving existing options untouched.
pub async fn seed_appointment_options(pool: &Pool<Postgres>) -> Result<u64> {
    let mut inserted = 0;
    for (name, price, slots) in default_catalog() {
        let result = sqlx::query(
            r#"
            INSERT INTO appointment_options (name, price, slots)
            VALUES ($1, $2, $3)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(name)
        .bind(price)
        .bind(&slots)
        .execute(pool)
        .await?;
        inserted += result.rows_affected();
    }

    info!("Seeded {} appointment options", inserted);
    Ok(inserted)
}
