use crate::finance;
use crate::models::{AppData, DashboardSummary, Notification};
use crate::scheduler;
use chrono::{Datelike, Local, NaiveDate};

pub fn summary(data: &AppData) -> DashboardSummary {
    summary_at(Local::now().date_naive(), data)
}

pub fn summary_at(today: NaiveDate, data: &AppData) -> DashboardSummary {
    let today_key = today.to_string();
    let mut today_appointments = scheduler::list_for_date(&data.appointments, &today_key);

    let pending: Vec<_> = data
        .appointments
        .iter()
        .filter(|a| a.status == scheduler::STATUS_PENDING)
        .collect();

    let notifications = pending
        .iter()
        .take(3)
        .map(|a| Notification {
            id: a.id.clone(),
            message: format!("Nueva cita de {}", a.patient_name),
        })
        .collect();

    let monthly_income =
        finance::monthly_aggregate(&data.finances, today.year(), today.month0()).total_income;

    let today_count = today_appointments.len();
    today_appointments.truncate(5);

    DashboardSummary {
        today_appointments: today_count,
        total_patients: data.patients.len(),
        monthly_income,
        pending_appointments: pending.len(),
        today: today_appointments,
        notifications,
    }
}
