use crate::clock;
use crate::errors::AppError;
use crate::models::{Appointment, Finances, Patient, Transaction, User};
use crate::storage;
use std::path::Path;
use tracing::info;

/// Writes the fixed demonstration data for every collection key whose file is
/// missing. Idempotent per key: a key that exists, even empty, is left alone.
pub async fn seed_missing(dir: &Path) -> Result<(), AppError> {
    let mut seeded = Vec::new();

    if !storage::key_path(dir, storage::USERS).exists() {
        storage::persist_key(dir, storage::USERS, &default_users()).await?;
        seeded.push(storage::USERS);
    }
    if !storage::key_path(dir, storage::PATIENTS).exists() {
        storage::persist_key(dir, storage::PATIENTS, &default_patients()).await?;
        seeded.push(storage::PATIENTS);
    }
    if !storage::key_path(dir, storage::APPOINTMENTS).exists() {
        storage::persist_key(dir, storage::APPOINTMENTS, &default_appointments()).await?;
        seeded.push(storage::APPOINTMENTS);
    }
    if !storage::key_path(dir, storage::FINANCES).exists() {
        storage::persist_key(dir, storage::FINANCES, &default_finances()).await?;
        seeded.push(storage::FINANCES);
    }

    if !seeded.is_empty() {
        info!("seeded demonstration data: {}", seeded.join(", "));
    }
    Ok(())
}

fn default_users() -> Vec<User> {
    vec![
        User {
            id: "1".into(),
            name: "Dr. María García".into(),
            email: "maria@clinica.com".into(),
            password: "admin123".into(),
            role: "fisioterapeuta".into(),
        },
        User {
            id: "2".into(),
            name: "Carlos López".into(),
            email: "carlos@clinica.com".into(),
            password: "colab123".into(),
            role: "colaborador".into(),
        },
    ]
}

fn default_patients() -> Vec<Patient> {
    vec![
        Patient {
            id: "1".into(),
            name: "Juan Pérez".into(),
            age: 45,
            phone: "555-1234".into(),
            email: "juan@email.com".into(),
            diagnosis: "Lumbalgia crónica".into(),
            notes: "Paciente con dolor lumbar de 6 meses de evolución".into(),
            created_at: clock::now_iso(),
            history: Vec::new(),
        },
        Patient {
            id: "2".into(),
            name: "Ana Martínez".into(),
            age: 32,
            phone: "555-5678".into(),
            email: "ana@email.com".into(),
            diagnosis: "Tendinitis de hombro".into(),
            notes: "Deportista amateur, lesión por sobreesfuerzo".into(),
            created_at: clock::now_iso(),
            history: Vec::new(),
        },
    ]
}

fn default_appointments() -> Vec<Appointment> {
    let today = clock::today_string();
    vec![
        Appointment {
            id: "1".into(),
            patient_name: "Juan Pérez".into(),
            patient_email: "juan@email.com".into(),
            patient_phone: "555-1234".into(),
            date: today.clone(),
            time: "10:00".into(),
            therapist: "Dr. María García".into(),
            service: "Terapia Manual".into(),
            status: "confirmada".into(),
            notes: String::new(),
        },
        Appointment {
            id: "2".into(),
            patient_name: "Ana Martínez".into(),
            patient_email: "ana@email.com".into(),
            patient_phone: "555-5678".into(),
            date: today,
            time: "11:30".into(),
            therapist: "Dr. María García".into(),
            service: "Rehabilitación".into(),
            status: "pendiente".into(),
            notes: String::new(),
        },
    ]
}

fn default_finances() -> Finances {
    let now = clock::now_iso();
    Finances {
        income: vec![
            Transaction {
                id: "1".into(),
                description: "Terapia - Juan Pérez".into(),
                amount: 800.0,
                date: now.clone(),
                category: "terapia".into(),
            },
            Transaction {
                id: "2".into(),
                description: "Rehabilitación - Ana Martínez".into(),
                amount: 1200.0,
                date: now.clone(),
                category: "rehabilitacion".into(),
            },
        ],
        expenses: vec![
            Transaction {
                id: "1".into(),
                description: "Renta mensual".into(),
                amount: 5000.0,
                date: now.clone(),
                category: "renta".into(),
            },
            Transaction {
                id: "2".into(),
                description: "Luz".into(),
                amount: 800.0,
                date: now.clone(),
                category: "luz".into(),
            },
            Transaction {
                id: "3".into(),
                description: "Internet".into(),
                amount: 600.0,
                date: now,
                category: "internet".into(),
            },
        ],
    }
}
