use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Entity, ValidationError, contact};

/// A person receiving care.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    /// Opaque unique identifier, minted by the registry. Empty on a record
    /// that has not been stored yet.
    pub id: String,
    /// Full display name.
    pub name: String,
    /// Calendar birth date.
    pub birth_date: NaiveDate,
    /// Contact number.
    pub phone: String,
    /// Optional contact address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Whether the patient is on the practice's subscription plan.
    pub subscriber: bool,
}

impl Patient {
    /// Checks the record's field rules: a non-empty name, a phone number
    /// matching the loose pattern, and — when supplied — a well-formed email
    /// address. The birth date is a typed calendar date and needs no check.
    ///
    /// # Errors
    ///
    /// Returns the first rule that fails.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !contact::is_phone(&self.phone) {
            return Err(ValidationError::Phone(self.phone.clone()));
        }
        if let Some(email) = &self.email {
            if !contact::is_email(email) {
                return Err(ValidationError::Email(email.clone()));
            }
        }
        Ok(())
    }
}

impl Entity for Patient {
    const COLLECTION: &'static str = "patients";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{Patient, ValidationError};

    fn patient() -> Patient {
        Patient {
            id: String::new(),
            name: "Carlos García".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1985, 4, 12).unwrap(),
            phone: "555-1234".to_string(),
            email: None,
            subscriber: true,
        }
    }

    #[test]
    fn valid_record_passes() {
        assert_eq!(patient().validate(), Ok(()));
    }

    #[test]
    fn email_is_optional_but_checked_when_present() {
        let mut p = patient();
        p.email = Some("carlos@mail.com".to_string());
        assert_eq!(p.validate(), Ok(()));

        p.email = Some("carlos at mail".to_string());
        assert_eq!(
            p.validate(),
            Err(ValidationError::Email("carlos at mail".to_string()))
        );
    }

    #[test]
    fn short_phone_is_rejected() {
        let mut p = patient();
        p.phone = "12345".to_string();
        assert_eq!(p.validate(), Err(ValidationError::Phone("12345".to_string())));
    }

    #[test]
    fn missing_email_round_trips_as_absent_field() {
        let json = serde_json::to_string(&patient()).unwrap();
        assert!(!json.contains("email"));
        let back: Patient = serde_json::from_str(&json).unwrap();
        assert_eq!(back, patient());
    }
}
