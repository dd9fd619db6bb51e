//! Booking placement with the duplicate-booking guard.

use crate::{
    errors::{PortalError, PortalResult},
    models::{ack::WriteAck, booking::CreateBookingRequest},
    store::{AppointmentStore, BookingInsert},
};

pub fn duplicate_booking_message(treatment: &str, appointment_date: &str, slot: &str) -> String {
    format!(
        "You already have a {treatment} booking on {appointment_date}; the {slot} slot was not reserved"
    )
}

pub fn slot_taken_message(treatment: &str, appointment_date: &str, slot: &str) -> String {
    format!("The {slot} slot for {treatment} on {appointment_date} is no longer available")
}

/// Validates `request`, rejects it when the patient already holds a booking
/// for the same treatment on the same date, and otherwise inserts it at the
/// treatment's catalog price.
///
/// The store refuses conflicting inserts on its own, so two requests racing
/// past the lookup still produce a single booking; the loser gets a
/// rejection acknowledgement.
pub async fn place_booking<S>(store: &S, request: &CreateBookingRequest) -> PortalResult<WriteAck>
where
    S: AppointmentStore + ?Sized,
{
    request.validate()?;

    let option = store
        .find_option(&request.treatment)
        .await?
        .ok_or_else(|| PortalError::Validation(format!("unknown treatment: {}", request.treatment)))?;

    let existing = store
        .find_bookings(&request.appointment_date, &request.email, &request.treatment)
        .await?;
    if !existing.is_empty() {
        return Ok(WriteAck::rejected(duplicate_booking_message(
            &request.treatment,
            &request.appointment_date,
            &request.slot,
        )));
    }

    match store.insert_booking(request, option.price).await? {
        BookingInsert::Inserted(booking) => Ok(WriteAck::inserted(booking.id)),
        BookingInsert::Conflict => Ok(WriteAck::rejected(slot_taken_message(
            &request.treatment,
            &request.appointment_date,
            &request.slot,
        ))),
    }
}
