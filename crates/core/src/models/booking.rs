use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{PortalError, PortalResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub treatment: String,
    pub appointment_date: String,
    pub slot: String,
    pub email: String,
    pub patient: Option<String>,
    pub phone: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub paid: bool,
    pub transaction_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub treatment: String,
    pub appointment_date: String,
    pub slot: String,
    pub email: String,
    pub patient: Option<String>,
    pub phone: Option<String>,
}

impl CreateBookingRequest {
    /// Rejects blank identifying fields. The price is never taken from the
    /// request; it is copied from the catalog when the booking is placed.
    pub fn validate(&self) -> PortalResult<()> {
        let required = [
            ("treatment", &self.treatment),
            ("appointmentDate", &self.appointment_date),
            ("slot", &self.slot),
            ("email", &self.email),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(PortalError::Validation(format!("{field} is required")));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingsQuery {
    pub email: String,
}
