use crate::clock;
use crate::errors::DomainError;
use crate::models::{Appointment, AppointmentInput, CalendarCell};
use chrono::{Datelike, NaiveDate};

pub const STATUS_PENDING: &str = "pendiente";
pub const STATUS_CONFIRMED: &str = "confirmada";
pub const STATUS_CANCELLED: &str = "cancelada";

/// The recognized status values. Anything else is stored as-is; the set is
/// open for forward compatibility.
pub const STATUSES: [&str; 3] = [STATUS_PENDING, STATUS_CONFIRMED, STATUS_CANCELLED];

pub const TIME_SLOTS: [&str; 18] = [
    "08:00", "08:30", "09:00", "09:30", "10:00", "10:30", "11:00", "11:30", "12:00", "14:00",
    "14:30", "15:00", "15:30", "16:00", "16:30", "17:00", "17:30", "18:00",
];

pub const SERVICES: [&str; 6] = [
    "Terapia Manual",
    "Rehabilitación Física",
    "Neurorehabilitación",
    "Fisioterapia Cardiopulmonar",
    "Electroterapia",
    "Fisioterapia Geriátrica",
];

pub const UNASSIGNED_THERAPIST: &str = "Por asignar";

/// Appointments for one calendar date, ascending by time slot.
pub fn list_for_date(appointments: &[Appointment], date: &str) -> Vec<Appointment> {
    let mut day: Vec<Appointment> = appointments
        .iter()
        .filter(|a| a.date == date)
        .cloned()
        .collect();
    day.sort_by(|a, b| a.time.cmp(&b.time));
    day
}

/// Administrative creation: the slot is booked outright as `confirmada` under
/// the signed-in therapist's name.
pub fn create_confirmed(
    appointments: &mut Vec<Appointment>,
    input: AppointmentInput,
    therapist: &str,
) -> Result<Appointment, DomainError> {
    insert(appointments, input, therapist.to_owned(), STATUS_CONFIRMED)
}

/// Public booking request: lands as `pendiente` with no therapist assigned.
/// The slot-uniqueness rule applies here too, unlike the original form.
pub fn request_booking(
    appointments: &mut Vec<Appointment>,
    mut input: AppointmentInput,
) -> Result<Appointment, DomainError> {
    input.therapist = None;
    insert(
        appointments,
        input,
        UNASSIGNED_THERAPIST.to_owned(),
        STATUS_PENDING,
    )
}

fn insert(
    appointments: &mut Vec<Appointment>,
    input: AppointmentInput,
    fallback_therapist: String,
    status: &str,
) -> Result<Appointment, DomainError> {
    if input.patient_name.trim().is_empty() {
        return Err(DomainError::missing("patientName"));
    }
    if input.date.trim().is_empty() {
        return Err(DomainError::missing("date"));
    }
    if input.time.trim().is_empty() {
        return Err(DomainError::missing("time"));
    }
    if input.service.trim().is_empty() {
        return Err(DomainError::missing("service"));
    }

    // One appointment per (date, time), checked against the whole collection.
    if let Some(taken) = appointments
        .iter()
        .find(|a| a.date == input.date && a.time == input.time)
    {
        return Err(DomainError::Conflict {
            conflicting_id: taken.id.clone(),
        });
    }

    let appointment = Appointment {
        id: clock::new_id(),
        patient_name: input.patient_name,
        patient_email: input.patient_email,
        patient_phone: input.patient_phone,
        date: input.date,
        time: input.time,
        therapist: input.therapist.unwrap_or(fallback_therapist),
        service: input.service,
        status: status.to_owned(),
        notes: input.notes,
    };
    appointments.push(appointment.clone());
    Ok(appointment)
}

/// Replaces the status field only. Any transition is permitted, including
/// back out of `cancelada`; unrecognized values pass through untouched.
pub fn update_status(
    appointments: &mut [Appointment],
    id: &str,
    status: String,
) -> Result<Appointment, DomainError> {
    let appointment = appointments
        .iter_mut()
        .find(|a| a.id == id)
        .ok_or_else(|| DomainError::not_found("cita", id))?;
    appointment.status = status;
    Ok(appointment.clone())
}

/// Hard delete. Confirmation is the caller's business.
pub fn delete(appointments: &mut Vec<Appointment>, id: &str) -> Result<(), DomainError> {
    let before = appointments.len();
    appointments.retain(|a| a.id != id);
    if appointments.len() == before {
        return Err(DomainError::not_found("cita", id));
    }
    Ok(())
}

/// Month grid for rendering: leading placeholder cells up to the weekday of
/// day 1 (Sunday = 0), then one cell per day with its appointment count.
/// `month0` is zero-based.
pub fn calendar_grid(
    appointments: &[Appointment],
    year: i32,
    month0: u32,
) -> Result<Vec<CalendarCell>, DomainError> {
    // month0 comes straight off the query string; bound it before any
    // arithmetic so an out-of-range value can't overflow.
    if month0 > 11 {
        return Err(DomainError::invalid("month"));
    }
    let first =
        NaiveDate::from_ymd_opt(year, month0 + 1, 1).ok_or(DomainError::invalid("month"))?;
    let next_month = if month0 == 11 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month0 + 2, 1)
    }
    .ok_or(DomainError::invalid("month"))?;
    let days_in_month = (next_month - first).num_days() as u32;

    let mut cells = Vec::with_capacity(42);
    for _ in 0..first.weekday().num_days_from_sunday() {
        cells.push(CalendarCell {
            day: None,
            date: None,
            appointments: 0,
            dots: 0,
        });
    }
    for day in 1..=days_in_month {
        let date = format!("{year}-{:02}-{:02}", month0 + 1, day);
        let count = appointments.iter().filter(|a| a.date == date).count();
        cells.push(CalendarCell {
            day: Some(day),
            date: Some(date),
            appointments: count,
            dots: count.min(3),
        });
    }
    Ok(cells)
}
