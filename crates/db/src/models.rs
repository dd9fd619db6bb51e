use chrono::{DateTime, Utc};
use eyre::{eyre, Result};
use portal_core::models::{
    appointment::AppointmentOption, booking::Booking, doctor::Doctor, payment::Payment,
    user::User,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointmentOption {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub slots: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<DbAppointmentOption> for AppointmentOption {
    fn from(row: DbAppointmentOption) -> Self {
        Self {
            id: row.id,
            name: row.name,
            price: row.price,
            slots: row.slots,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub treatment: String,
    pub appointment_date: String,
    pub slot: String,
    pub email: String,
    pub patient: Option<String>,
    pub phone: Option<String>,
    pub price: f64,
    pub paid: bool,
    pub transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<DbBooking> for Booking {
    fn from(row: DbBooking) -> Self {
        Self {
            id: row.id,
            treatment: row.treatment,
            appointment_date: row.appointment_date,
            slot: row.slot,
            email: row.email,
            patient: row.patient,
            phone: row.phone,
            price: row.price,
            paid: row.paid,
            transaction_id: row.transaction_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbUser> for User {
    type Error = eyre::Report;

    fn try_from(row: DbUser) -> Result<Self> {
        let role = row
            .role
            .parse()
            .map_err(|e| eyre!("Corrupt role for user {}: {}", row.id, e))?;

        Ok(Self {
            id: row.id,
            name: row.name,
            email: row.email,
            role,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDoctor {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub specialty: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<DbDoctor> for Doctor {
    fn from(row: DbDoctor) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            specialty: row.specialty,
            image: row.image,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPayment {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub email: String,
    pub price: f64,
    pub transaction_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbPayment> for Payment {
    fn from(row: DbPayment) -> Self {
        Self {
            id: row.id,
            booking_id: row.booking_id,
            email: row.email,
            price: row.price,
            transaction_id: row.transaction_id,
        }
    }
}
