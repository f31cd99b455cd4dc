use crate::db::enums::NotificationType;
use crate::error::AppError;

pub fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::validation("Notification title is required"));
    }

    if title.len() > 255 {
        return Err(AppError::validation(
            "Notification title is too long (max 255 characters)",
        ));
    }

    Ok(())
}

pub fn validate_message(message: &str) -> Result<(), AppError> {
    if message.trim().is_empty() {
        return Err(AppError::validation("Notification message is required"));
    }

    Ok(())
}

/// Parses an optional type field, defaulting to `custom`.
pub fn parse_notification_type(
    notification_type: Option<&str>,
) -> Result<NotificationType, AppError> {
    match notification_type {
        None => Ok(NotificationType::default()),
        Some(s) => NotificationType::parse(s).ok_or_else(|| {
            AppError::validation(format!(
                "Invalid notification type '{}', expected one of: new_termin, reminder, custom",
                s
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_message_validation() {
        assert!(validate_title("Neuer Termin").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("  ").is_err());
        assert!(validate_title(&"a".repeat(256)).is_err());

        assert!(validate_message("Acme Corp am 2025-03-01").is_ok());
        assert!(validate_message("").is_err());
    }

    #[test]
    fn test_type_parsing_accepts_exactly_the_defined_values() {
        assert_eq!(
            parse_notification_type(Some("new_termin")).unwrap(),
            NotificationType::NewTermin
        );
        assert_eq!(
            parse_notification_type(Some("reminder")).unwrap(),
            NotificationType::Reminder
        );
        assert_eq!(
            parse_notification_type(Some("custom")).unwrap(),
            NotificationType::Custom
        );
        assert_eq!(
            parse_notification_type(None).unwrap(),
            NotificationType::Custom
        );

        assert!(parse_notification_type(Some("newtermin")).is_err());
        assert!(parse_notification_type(Some("Reminder")).is_err());
        assert!(parse_notification_type(Some("")).is_err());
    }
}
