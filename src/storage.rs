use crate::errors::AppError;
use crate::models::{AppData, Appointment, ClinicSettings, Finances, Patient, Session, User};
use serde::{de::DeserializeOwned, Serialize};
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub const USERS: &str = "users";
pub const PATIENTS: &str = "patients";
pub const APPOINTMENTS: &str = "appointments";
pub const FINANCES: &str = "finances";
pub const CURRENT_USER: &str = "current_user";
pub const CLINIC_SETTINGS: &str = "clinic_settings";

pub fn resolve_data_dir() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_DIR") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data"))
}

pub fn key_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{key}.json"))
}

/// Reads one collection file. A missing key is an empty collection, never an
/// error; an unreadable or unparsable file is logged and treated the same.
pub async fn load_key<T: DeserializeOwned + Default>(dir: &Path, key: &str) -> T {
    let path = key_path(dir, key);
    match fs::read(&path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(err) => {
                error!("failed to parse {key}: {err}");
                T::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => T::default(),
        Err(err) => {
            error!("failed to read {key}: {err}");
            T::default()
        }
    }
}

pub async fn persist_key<T: Serialize>(dir: &Path, key: &str, value: &T) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(value).map_err(AppError::internal)?;
    fs::write(key_path(dir, key), payload)
        .await
        .map_err(AppError::internal)?;
    Ok(())
}

/// Removes one key outright, as `logout` does to the session. A key that was
/// already absent is fine.
pub async fn remove_key(dir: &Path, key: &str) -> Result<(), AppError> {
    match fs::remove_file(key_path(dir, key)).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(AppError::internal(err)),
    }
}

pub async fn load_data(dir: &Path) -> AppData {
    AppData {
        users: load_key::<Vec<User>>(dir, USERS).await,
        patients: load_key::<Vec<Patient>>(dir, PATIENTS).await,
        appointments: load_key::<Vec<Appointment>>(dir, APPOINTMENTS).await,
        finances: load_key::<Finances>(dir, FINANCES).await,
        current_user: load_key::<Option<Session>>(dir, CURRENT_USER).await,
        clinic_settings: load_key::<Option<ClinicSettings>>(dir, CLINIC_SETTINGS).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HistoryEntry, Patient};

    fn temp_dir() -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = env::temp_dir().join(format!("clinic_storage_{}_{nanos}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn sample_patients() -> Vec<Patient> {
        vec![Patient {
            id: "1".into(),
            name: "Juan Pérez".into(),
            age: 45,
            phone: "555-1234".into(),
            email: "juan@email.com".into(),
            diagnosis: "Lumbalgia crónica".into(),
            notes: String::new(),
            created_at: "2025-01-01T00:00:00.000Z".into(),
            history: vec![HistoryEntry {
                date: "2025-01-02T00:00:00.000Z".into(),
                session: "Primera sesión".into(),
                observations: String::new(),
            }],
        }]
    }

    #[tokio::test]
    async fn round_trip_is_byte_identical() {
        let dir = temp_dir();
        persist_key(&dir, PATIENTS, &sample_patients()).await.unwrap();
        let first = std::fs::read(key_path(&dir, PATIENTS)).unwrap();

        let loaded: Vec<Patient> = load_key(&dir, PATIENTS).await;
        persist_key(&dir, PATIENTS, &loaded).await.unwrap();
        let second = std::fs::read(key_path(&dir, PATIENTS)).unwrap();

        assert_eq!(first, second);
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn missing_key_loads_as_empty() {
        let dir = temp_dir();
        let loaded: Vec<Patient> = load_key(&dir, PATIENTS).await;
        assert!(loaded.is_empty());
        let session: Option<crate::models::Session> = load_key(&dir, CURRENT_USER).await;
        assert!(session.is_none());
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn remove_key_tolerates_absent_file() {
        let dir = temp_dir();
        remove_key(&dir, CURRENT_USER).await.unwrap();

        persist_key(&dir, CURRENT_USER, &Some(crate::models::Session {
            name: "Dr. María García".into(),
            role: "fisioterapeuta".into(),
            email: "maria@clinica.com".into(),
        }))
        .await
        .unwrap();
        remove_key(&dir, CURRENT_USER).await.unwrap();
        assert!(!key_path(&dir, CURRENT_USER).exists());
        std::fs::remove_dir_all(dir).unwrap();
    }
}
