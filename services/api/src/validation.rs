//! Input validation utilities
//!
//! Validation is explicit: incoming payloads carry optional fields, and the
//! functions here turn them into validated data or return the first failing
//! field as a user-facing message.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::{ContactData, EventData, EventPayload, EventStatus, NewContact, Subject};

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email address".to_string());
    }

    Ok(())
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, String> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(format!("Field '{}' is required", field)),
    }
}

/// Validate a public contact submission
///
/// Checks fields in a fixed order and reports the first failure.
pub fn validate_contact(payload: &NewContact) -> Result<ContactData, String> {
    let name = required(&payload.name, "name")?;
    if name.chars().count() > 60 {
        return Err("Name cannot be more than 60 characters".to_string());
    }

    let email = required(&payload.email, "email")?.trim().to_lowercase();
    validate_email(&email)?;

    let phone = required(&payload.phone, "phone")?;

    let subject = required(&payload.subject, "subject")?;
    let subject = Subject::parse(subject).ok_or_else(|| "Invalid subject".to_string())?;

    let message = required(&payload.message, "message")?;
    if message.chars().count() > 1000 {
        return Err("Message cannot be more than 1000 characters".to_string());
    }

    Ok(ContactData {
        name: name.to_string(),
        email,
        phone: phone.to_string(),
        subject,
        message: message.to_string(),
    })
}

/// Validate an event payload for create or full update
pub fn validate_event(payload: &EventPayload) -> Result<EventData, String> {
    let title = required(&payload.title, "title")?;
    if title.chars().count() > 100 {
        return Err("Title cannot be more than 100 characters".to_string());
    }

    let description = required(&payload.description, "description")?;

    let date = payload
        .date
        .ok_or_else(|| "Field 'date' is required".to_string())?;

    let time = required(&payload.time, "time")?;
    let location = required(&payload.location, "location")?;
    let audience = required(&payload.audience, "audience")?;

    let capacity = payload.capacity.unwrap_or(0);
    if capacity < 0 {
        return Err("Capacity cannot be negative".to_string());
    }

    Ok(EventData {
        title: title.to_string(),
        slug: payload
            .slug
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_lowercase()),
        description: description.to_string(),
        date,
        time: time.to_string(),
        location: location.to_string(),
        audience: audience.to_string(),
        image: payload.image.clone().unwrap_or_default(),
        capacity,
        price: payload.price.clone().unwrap_or_default(),
        status: payload.status.unwrap_or(EventStatus::Upcoming),
        registration_url: payload.registration_url.clone().unwrap_or_default(),
        schedule: payload.schedule.clone().unwrap_or_default(),
        featured: payload.featured.unwrap_or(false),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Price;
    use chrono::NaiveDate;

    fn full_contact() -> NewContact {
        NewContact {
            name: Some("João Silva".to_string()),
            email: Some("joao@x.com".to_string()),
            phone: Some("11999999999".to_string()),
            subject: Some("orçamento".to_string()),
            message: Some("Gostaria de um orçamento para 100 pessoas".to_string()),
        }
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("joao@x.com").is_ok());
        assert!(validate_email("a.b+c@sub.domain.br").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("a b@x.com").is_err());
        assert!(validate_email("joao@x").is_err());
    }

    #[test]
    fn test_validate_contact_ok() {
        let data = validate_contact(&full_contact()).unwrap();
        assert_eq!(data.subject, Subject::Orcamento);
        assert_eq!(data.email, "joao@x.com");
    }

    #[test]
    fn test_validate_contact_reports_first_missing_field() {
        let mut payload = full_contact();
        payload.name = None;
        payload.message = None;
        assert_eq!(
            validate_contact(&payload).unwrap_err(),
            "Field 'name' is required"
        );

        let mut payload = full_contact();
        payload.phone = Some("   ".to_string());
        assert_eq!(
            validate_contact(&payload).unwrap_err(),
            "Field 'phone' is required"
        );
    }

    #[test]
    fn test_validate_contact_lowercases_email() {
        let mut payload = full_contact();
        payload.email = Some("Joao@X.COM".to_string());
        assert_eq!(validate_contact(&payload).unwrap().email, "joao@x.com");
    }

    #[test]
    fn test_validate_contact_length_caps() {
        let mut payload = full_contact();
        payload.name = Some("x".repeat(61));
        assert_eq!(
            validate_contact(&payload).unwrap_err(),
            "Name cannot be more than 60 characters"
        );

        let mut payload = full_contact();
        payload.message = Some("x".repeat(1001));
        assert_eq!(
            validate_contact(&payload).unwrap_err(),
            "Message cannot be more than 1000 characters"
        );
    }

    #[test]
    fn test_validate_contact_rejects_unknown_subject() {
        let mut payload = full_contact();
        payload.subject = Some("reclamação".to_string());
        assert_eq!(validate_contact(&payload).unwrap_err(), "Invalid subject");
    }

    fn full_event() -> EventPayload {
        EventPayload {
            title: Some("Workshop Ágil 2024".to_string()),
            description: Some("Um dia de dinâmicas".to_string()),
            date: NaiveDate::from_ymd_opt(2024, 11, 20),
            time: Some("09:00".to_string()),
            location: Some("São Paulo".to_string()),
            audience: Some("Equipes de produto".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_event_defaults() {
        let data = validate_event(&full_event()).unwrap();
        assert_eq!(data.capacity, 0);
        assert_eq!(data.price, Price::Fixed(0.0));
        assert_eq!(data.status, EventStatus::Upcoming);
        assert!(!data.featured);
        assert!(data.slug.is_none());
    }

    #[test]
    fn test_validate_event_required_fields() {
        for field in ["title", "description", "date", "time", "location", "audience"] {
            let mut payload = full_event();
            match field {
                "title" => payload.title = None,
                "description" => payload.description = None,
                "date" => payload.date = None,
                "time" => payload.time = None,
                "location" => payload.location = None,
                _ => payload.audience = None,
            }
            assert_eq!(
                validate_event(&payload).unwrap_err(),
                format!("Field '{}' is required", field)
            );
        }
    }

    #[test]
    fn test_validate_event_title_cap_and_capacity() {
        let mut payload = full_event();
        payload.title = Some("x".repeat(101));
        assert_eq!(
            validate_event(&payload).unwrap_err(),
            "Title cannot be more than 100 characters"
        );

        let mut payload = full_event();
        payload.capacity = Some(-1);
        assert_eq!(
            validate_event(&payload).unwrap_err(),
            "Capacity cannot be negative"
        );
    }

    #[test]
    fn test_validate_event_lowercases_provided_slug() {
        let mut payload = full_event();
        payload.slug = Some("Meu-Slug".to_string());
        assert_eq!(
            validate_event(&payload).unwrap().slug,
            Some("meu-slug".to_string())
        );
    }
}
