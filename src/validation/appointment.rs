use crate::db::enums::AppointmentStatus;
use crate::db::models::appointment::UpdateAppointmentRequest;
use crate::error::AppError;

pub const DEFAULT_REMINDER_MINUTES: i32 = 15;
pub const DEFAULT_CREATED_BY: &str = "chef";

pub fn validate_customer_name(customer_name: &str) -> Result<(), AppError> {
    if customer_name.trim().is_empty() {
        return Err(AppError::validation("Customer name is required"));
    }

    if customer_name.len() > 255 {
        return Err(AppError::validation(
            "Customer name is too long (max 255 characters)",
        ));
    }

    Ok(())
}

pub fn validate_reminder_minutes(reminder_minutes: Option<i32>) -> Result<(), AppError> {
    if let Some(minutes) = reminder_minutes {
        if minutes < 0 {
            return Err(AppError::validation(
                "Reminder lead time must be >= 0 minutes",
            ));
        }
    }

    Ok(())
}

/// Parses an optional status field, defaulting absent values. Anything
/// outside the defined lifecycle is rejected.
pub fn parse_status(status: Option<&str>) -> Result<AppointmentStatus, AppError> {
    match status {
        None => Ok(AppointmentStatus::default()),
        Some(s) => parse_status_value(s),
    }
}

pub fn parse_status_value(status: &str) -> Result<AppointmentStatus, AppError> {
    AppointmentStatus::parse(status).ok_or_else(|| {
        AppError::validation(format!(
            "Invalid status '{}', expected one of: pending, confirmed",
            status
        ))
    })
}

/// The creator tag is conventionally `chef` or `kollege` but stored free
/// form; blank input falls back to the default.
pub fn normalize_created_by(created_by: Option<&str>) -> String {
    match created_by {
        Some(tag) if !tag.trim().is_empty() => tag.trim().to_string(),
        _ => DEFAULT_CREATED_BY.to_string(),
    }
}

pub fn validate_update(req: &UpdateAppointmentRequest) -> Result<(), AppError> {
    if req.customer_name.is_none()
        && req.phone.is_none()
        && req.date.is_none()
        && req.time.is_none()
        && req.note.is_none()
        && req.reminder_minutes.is_none()
        && req.status.is_none()
        && req.created_by.is_none()
    {
        return Err(AppError::validation("No update data provided"));
    }

    if let Some(name) = &req.customer_name {
        validate_customer_name(name)?;
    }

    validate_reminder_minutes(req.reminder_minutes)?;

    if let Some(status) = &req.status {
        parse_status_value(status)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_name_validation() {
        assert!(validate_customer_name("Acme Corp").is_ok());
        assert!(validate_customer_name("").is_err());
        assert!(validate_customer_name("   ").is_err());
        assert!(validate_customer_name(&"a".repeat(256)).is_err());
    }

    #[test]
    fn test_reminder_minutes_validation() {
        assert!(validate_reminder_minutes(None).is_ok());
        assert!(validate_reminder_minutes(Some(0)).is_ok());
        assert!(validate_reminder_minutes(Some(30)).is_ok());
        assert!(validate_reminder_minutes(Some(-1)).is_err());
    }

    #[test]
    fn test_status_parsing_accepts_exactly_the_defined_values() {
        assert_eq!(
            parse_status(Some("pending")).unwrap(),
            AppointmentStatus::Pending
        );
        assert_eq!(
            parse_status(Some("confirmed")).unwrap(),
            AppointmentStatus::Confirmed
        );
        assert_eq!(parse_status(None).unwrap(), AppointmentStatus::Pending);

        assert!(parse_status(Some("cancelled")).is_err());
        assert!(parse_status(Some("PENDING")).is_err());
        assert!(parse_status(Some("")).is_err());
    }

    #[test]
    fn test_created_by_normalization() {
        assert_eq!(normalize_created_by(None), "chef");
        assert_eq!(normalize_created_by(Some("")), "chef");
        assert_eq!(normalize_created_by(Some("  ")), "chef");
        assert_eq!(normalize_created_by(Some("kollege")), "kollege");
        assert_eq!(normalize_created_by(Some(" azubi ")), "azubi");
    }

    #[test]
    fn test_update_validation_rejects_empty_patch() {
        let empty = UpdateAppointmentRequest {
            customer_name: None,
            phone: None,
            date: None,
            time: None,
            note: None,
            reminder_minutes: None,
            status: None,
            created_by: None,
        };
        assert!(validate_update(&empty).is_err());

        let status_only = UpdateAppointmentRequest {
            status: Some("confirmed".to_string()),
            ..empty_request()
        };
        assert!(validate_update(&status_only).is_ok());

        let bad_status = UpdateAppointmentRequest {
            status: Some("done".to_string()),
            ..empty_request()
        };
        assert!(validate_update(&bad_status).is_err());
    }

    fn empty_request() -> UpdateAppointmentRequest {
        UpdateAppointmentRequest {
            customer_name: None,
            phone: None,
            date: None,
            time: None,
            note: None,
            reminder_minutes: None,
            status: None,
            created_by: None,
        }
    }
}
