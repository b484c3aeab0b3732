use serde::{Deserialize, Serialize};

/// Staff account. Seeded once at first run and only ever read back for login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Reduced view of a [`User`] cached under `current_user` so a restart can
/// restore the signed-in state. Last writer wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub name: String,
    pub role: String,
    pub email: String,
}

/// One clinical visit entry. History entries are append-only: never edited,
/// never reordered, reversed only for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: String,
    pub session: String,
    pub observations: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub phone: String,
    pub email: String,
    pub diagnosis: String,
    pub notes: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// Patient contact data is denormalized into each appointment on purpose:
/// deleting a patient must not touch their appointments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    #[serde(rename = "patientName")]
    pub patient_name: String,
    #[serde(rename = "patientEmail")]
    pub patient_email: String,
    #[serde(rename = "patientPhone")]
    pub patient_phone: String,
    pub date: String,
    pub time: String,
    pub therapist: String,
    pub service: String,
    pub status: String,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub date: String,
    pub category: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Finances {
    pub income: Vec<Transaction>,
    pub expenses: Vec<Transaction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicSettings {
    pub name: String,
    pub description: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub schedule: String,
    pub whatsapp: String,
}

impl Default for ClinicSettings {
    fn default() -> Self {
        Self {
            name: "MARED".into(),
            description:
                "Centro especializado en fisioterapia y rehabilitación. Tu salud es nuestra prioridad."
                    .into(),
            phone: "951 392 6419".into(),
            email: "contacto@MARED.com".into(),
            address: "Armenta y Lopez #1026, Col. Centro".into(),
            schedule: "Lunes a Viernes: 8:00 - 19:00, Sábado: 8:00 - 14:00".into(),
            whatsapp: "5551234567".into(),
        }
    }
}

/// The full in-memory mirror of the persisted key space. Each field maps to
/// one JSON file in the data directory.
#[derive(Debug, Clone, Default)]
pub struct AppData {
    pub users: Vec<User>,
    pub patients: Vec<Patient>,
    pub appointments: Vec<Appointment>,
    pub finances: Finances,
    pub current_user: Option<Session>,
    pub clinic_settings: Option<ClinicSettings>,
}

// Request payloads.

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct AppointmentInput {
    #[serde(rename = "patientName", default)]
    pub patient_name: String,
    #[serde(rename = "patientEmail", default)]
    pub patient_email: String,
    #[serde(rename = "patientPhone", default)]
    pub patient_phone: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub therapist: Option<String>,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct PatientInput {
    #[serde(default)]
    pub name: String,
    /// Free text from the form; anything unparsable becomes age 0.
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub diagnosis: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionNoteInput {
    #[serde(default)]
    pub session: String,
    #[serde(default)]
    pub observations: String,
}

#[derive(Debug, Deserialize)]
pub struct TransactionInput {
    #[serde(default)]
    pub description: String,
    /// Free text from the form; must parse to a number.
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub category: String,
}

// Response shapes.

#[derive(Debug, Serialize, Deserialize)]
pub struct MonthlySummary {
    #[serde(rename = "totalIncome")]
    pub total_income: f64,
    #[serde(rename = "totalExpenses")]
    pub total_expenses: f64,
    pub net: f64,
}

#[derive(Debug, Serialize)]
pub struct MonthlyFinances {
    #[serde(flatten)]
    pub summary: MonthlySummary,
    pub income: Vec<Transaction>,
    pub expenses: Vec<Transaction>,
}

/// One cell of the month grid. Leading placeholder cells (before day 1) have
/// `day == None`.
#[derive(Debug, Serialize)]
pub struct CalendarCell {
    pub day: Option<u32>,
    pub date: Option<String>,
    /// True same-day appointment count, uncapped.
    pub appointments: usize,
    /// Busy indicator for rendering, capped at 3.
    pub dots: usize,
}

#[derive(Debug, Serialize)]
pub struct CategoryOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Catalog {
    #[serde(rename = "timeSlots")]
    pub time_slots: &'static [&'static str],
    pub services: &'static [&'static str],
    pub statuses: &'static [&'static str],
    #[serde(rename = "incomeCategories")]
    pub income_categories: Vec<CategoryOption>,
    #[serde(rename = "expenseCategories")]
    pub expense_categories: Vec<CategoryOption>,
}

#[derive(Debug, Serialize)]
pub struct Notification {
    pub id: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    #[serde(rename = "todayAppointments")]
    pub today_appointments: usize,
    #[serde(rename = "totalPatients")]
    pub total_patients: usize,
    #[serde(rename = "monthlyIncome")]
    pub monthly_income: f64,
    #[serde(rename = "pendingAppointments")]
    pub pending_appointments: usize,
    pub today: Vec<Appointment>,
    pub notifications: Vec<Notification>,
}
