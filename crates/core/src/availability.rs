//! # Slot availability
//!
//! The catalog stores every slot a treatment can be booked in, independent
//! of the day. Availability for a date is never stored; it is computed by
//! removing the slots that bookings on that date already consume.

use std::collections::{HashMap, HashSet};

use crate::{
    errors::PortalResult,
    models::{appointment::AppointmentOption, booking::Booking},
    store::AppointmentStore,
};

/// Computes the free slots of every option in `catalog` for `date`.
///
/// The output keeps the order and length of `catalog`. A slot is dropped
/// from an option iff some booking has the same treatment name, the same
/// `appointment_date` and the same slot label, compared byte for byte.
/// Bookings for other dates or for treatments missing from the catalog are
/// ignored, and duplicate slot labels in the catalog are left as they are.
pub fn resolve_availability(
    date: &str,
    catalog: Vec<AppointmentOption>,
    bookings_on_date: &[Booking],
) -> Vec<AppointmentOption> {
    let mut booked: HashMap<&str, HashSet<&str>> = HashMap::new();
    for booking in bookings_on_date
        .iter()
        .filter(|booking| booking.appointment_date == date)
    {
        booked
            .entry(booking.treatment.as_str())
            .or_default()
            .insert(booking.slot.as_str());
    }

    catalog
        .into_iter()
        .map(|mut option| {
            if let Some(taken) = booked.get(option.name.as_str()) {
                option.slots.retain(|slot| !taken.contains(slot.as_str()));
            }
            option
        })
        .collect()
}

/// Loads the catalog and the bookings for `date` from `store` and resolves
/// the remaining slots.
pub async fn available_options<S>(store: &S, date: &str) -> PortalResult<Vec<AppointmentOption>>
where
    S: AppointmentStore + ?Sized,
{
    let catalog = store.fetch_all_options().await?;
    let bookings = store.fetch_bookings_on(date).await?;

    Ok(resolve_availability(date, catalog, &bookings))
}
