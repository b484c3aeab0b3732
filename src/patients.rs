use crate::clock;
use crate::errors::DomainError;
use crate::models::{HistoryEntry, Patient, PatientInput, SessionNoteInput};

/// Case-insensitive substring match on name or email, raw substring on phone.
/// An empty term returns the whole collection in order.
pub fn search(patients: &[Patient], term: &str) -> Vec<Patient> {
    let needle = term.to_lowercase();
    patients
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.email.to_lowercase().contains(&needle)
                || p.phone.contains(term)
        })
        .cloned()
        .collect()
}

pub fn create(patients: &mut Vec<Patient>, input: PatientInput) -> Result<Patient, DomainError> {
    if input.name.trim().is_empty() {
        return Err(DomainError::missing("name"));
    }
    if input.phone.trim().is_empty() {
        return Err(DomainError::missing("phone"));
    }

    let patient = Patient {
        id: clock::new_id(),
        name: input.name,
        age: parse_age(&input.age),
        phone: input.phone,
        email: input.email,
        diagnosis: input.diagnosis,
        notes: input.notes,
        created_at: clock::now_iso(),
        history: Vec::new(),
    };
    patients.push(patient.clone());
    Ok(patient)
}

/// Full replace of the mutable fields; id, created_at and history are kept
/// verbatim.
pub fn update(
    patients: &mut [Patient],
    id: &str,
    input: PatientInput,
) -> Result<Patient, DomainError> {
    let patient = find_mut(patients, id)?;
    patient.name = input.name;
    patient.age = parse_age(&input.age);
    patient.phone = input.phone;
    patient.email = input.email;
    patient.diagnosis = input.diagnosis;
    patient.notes = input.notes;
    Ok(patient.clone())
}

/// Hard delete. Appointments keep their denormalized copy of the patient's
/// contact data, so nothing cascades.
pub fn delete(patients: &mut Vec<Patient>, id: &str) -> Result<(), DomainError> {
    let before = patients.len();
    patients.retain(|p| p.id != id);
    if patients.len() == before {
        return Err(DomainError::not_found("paciente", id));
    }
    Ok(())
}

/// Appends one visit entry with a system timestamp. History only ever grows.
pub fn append_session(
    patients: &mut [Patient],
    id: &str,
    input: SessionNoteInput,
) -> Result<Patient, DomainError> {
    if input.session.trim().is_empty() {
        return Err(DomainError::missing("session"));
    }
    let patient = find_mut(patients, id)?;
    patient.history.push(HistoryEntry {
        date: clock::now_iso(),
        session: input.session,
        observations: input.observations,
    });
    Ok(patient.clone())
}

fn find_mut<'a>(patients: &'a mut [Patient], id: &str) -> Result<&'a mut Patient, DomainError> {
    patients
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| DomainError::not_found("paciente", id))
}

fn parse_age(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, phone: &str, age: &str) -> PatientInput {
        PatientInput {
            name: name.into(),
            age: age.into(),
            phone: phone.into(),
            email: format!(
                "{}@email.com",
                name.split_whitespace()
                    .next()
                    .unwrap_or("paciente")
                    .to_lowercase()
            ),
            diagnosis: String::new(),
            notes: String::new(),
        }
    }

    #[test]
    fn create_sets_age_timestamp_and_empty_history() {
        let mut patients = Vec::new();
        let juan = create(&mut patients, input("Juan Pérez", "555-1234", "45")).unwrap();
        assert_eq!(juan.age, 45);
        assert!(juan.history.is_empty());
        assert!(!juan.created_at.is_empty());
        assert_eq!(patients.len(), 1);
    }

    #[test]
    fn unparsable_age_defaults_to_zero() {
        let mut patients = Vec::new();
        let p = create(&mut patients, input("Ana", "555-5678", "cuarenta")).unwrap();
        assert_eq!(p.age, 0);
        let q = create(&mut patients, input("Luis", "555-9999", "")).unwrap();
        assert_eq!(q.age, 0);
    }

    #[test]
    fn create_requires_name_and_phone() {
        let mut patients = Vec::new();
        assert_eq!(
            create(&mut patients, input("", "555-1234", "45")).unwrap_err(),
            DomainError::missing("name")
        );
        assert_eq!(
            create(&mut patients, input("Juan", "", "45")).unwrap_err(),
            DomainError::missing("phone")
        );
        assert!(patients.is_empty());
    }

    #[test]
    fn empty_search_returns_everything_in_order() {
        let mut patients = Vec::new();
        create(&mut patients, input("Juan Pérez", "555-1234", "45")).unwrap();
        create(&mut patients, input("Ana Martínez", "555-5678", "32")).unwrap();

        let all = search(&patients, "");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Juan Pérez");
        assert_eq!(all[1].name, "Ana Martínez");
    }

    #[test]
    fn search_matches_name_email_or_phone() {
        let mut patients = Vec::new();
        create(&mut patients, input("Juan Pérez", "555-1234", "45")).unwrap();
        create(&mut patients, input("Ana Martínez", "555-5678", "32")).unwrap();

        assert_eq!(search(&patients, "juan").len(), 1);
        assert_eq!(search(&patients, "MARTÍNEZ").len(), 1);
        assert_eq!(search(&patients, "ana@email.com").len(), 1);
        assert_eq!(search(&patients, "555-12").len(), 1);
        assert!(search(&patients, "nadie").is_empty());
    }

    #[test]
    fn update_preserves_id_created_at_and_history() {
        let mut patients = Vec::new();
        let created = create(&mut patients, input("Juan Pérez", "555-1234", "45")).unwrap();
        append_session(
            &mut patients,
            &created.id,
            SessionNoteInput {
                session: "Primera sesión".into(),
                observations: String::new(),
            },
        )
        .unwrap();

        let updated = update(&mut patients, &created.id, input("Juan P. Gómez", "555-0000", "46"))
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.history.len(), 1);
        assert_eq!(updated.name, "Juan P. Gómez");
        assert_eq!(updated.age, 46);
    }

    #[test]
    fn append_session_grows_history_without_touching_prior_entries() {
        let mut patients = Vec::new();
        let created = create(&mut patients, input("Juan Pérez", "555-1234", "45")).unwrap();

        for description in ["Sesión 1", "Sesión 2", "Sesión 3"] {
            let before = patients[0].history.clone();
            let after = append_session(
                &mut patients,
                &created.id,
                SessionNoteInput {
                    session: description.into(),
                    observations: "sin cambios".into(),
                },
            )
            .unwrap();
            assert_eq!(after.history.len(), before.len() + 1);
            assert_eq!(&after.history[..before.len()], &before[..]);
        }
    }

    #[test]
    fn append_session_requires_description() {
        let mut patients = Vec::new();
        let created = create(&mut patients, input("Juan Pérez", "555-1234", "45")).unwrap();
        let err = append_session(
            &mut patients,
            &created.id,
            SessionNoteInput {
                session: "  ".into(),
                observations: String::new(),
            },
        )
        .unwrap_err();
        assert_eq!(err, DomainError::missing("session"));
        assert!(patients[0].history.is_empty());
    }

    #[test]
    fn delete_unknown_id_leaves_collection_unchanged() {
        let mut patients = Vec::new();
        create(&mut patients, input("Juan Pérez", "555-1234", "45")).unwrap();
        let err = delete(&mut patients, "999").unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert_eq!(patients.len(), 1);
    }
}
