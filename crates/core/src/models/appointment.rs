use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A treatment offered by the clinic together with every slot it can be
/// booked in on any given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentOption {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub slots: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialtyResponse {
    pub name: String,
}
