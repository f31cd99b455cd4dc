use termin_backend::{
    db::enums::{AppointmentStatus, NotificationType},
    db::models::appointment::UpdateAppointmentRequest,
    services::TeamsService,
    validation::{appointment as appointment_rules, notification as notification_rules},
};

#[test]
fn test_customer_name_rules() {
    assert!(appointment_rules::validate_customer_name("Acme Corp").is_ok());
    assert!(appointment_rules::validate_customer_name("Müller KG").is_ok());
    assert!(appointment_rules::validate_customer_name("").is_err());
    assert!(appointment_rules::validate_customer_name("   ").is_err());
}

#[test]
fn test_reminder_minutes_rules() {
    assert!(appointment_rules::validate_reminder_minutes(None).is_ok());
    assert!(appointment_rules::validate_reminder_minutes(Some(0)).is_ok());
    assert!(appointment_rules::validate_reminder_minutes(Some(30)).is_ok());
    assert!(appointment_rules::validate_reminder_minutes(Some(-5)).is_err());
}

// The status lifecycle accepts exactly two values; everything else is a
// validation error, never a silent default.
#[test]
fn test_status_enum_is_closed() {
    assert_eq!(
        appointment_rules::parse_status(Some("pending")).unwrap(),
        AppointmentStatus::Pending
    );
    assert_eq!(
        appointment_rules::parse_status(Some("confirmed")).unwrap(),
        AppointmentStatus::Confirmed
    );
    assert_eq!(
        appointment_rules::parse_status(None).unwrap(),
        AppointmentStatus::Pending
    );

    for bad in ["done", "cancelled", "Pending", "CONFIRMED", " ", ""] {
        assert!(
            appointment_rules::parse_status(Some(bad)).is_err(),
            "'{}' must be rejected",
            bad
        );
    }
}

#[test]
fn test_notification_type_enum_is_closed() {
    assert_eq!(
        notification_rules::parse_notification_type(Some("new_termin")).unwrap(),
        NotificationType::NewTermin
    );
    assert_eq!(
        notification_rules::parse_notification_type(Some("reminder")).unwrap(),
        NotificationType::Reminder
    );
    assert_eq!(
        notification_rules::parse_notification_type(Some("custom")).unwrap(),
        NotificationType::Custom
    );
    assert_eq!(
        notification_rules::parse_notification_type(None).unwrap(),
        NotificationType::Custom
    );

    for bad in ["new-termin", "Reminder", "push", ""] {
        assert!(
            notification_rules::parse_notification_type(Some(bad)).is_err(),
            "'{}' must be rejected",
            bad
        );
    }
}

#[test]
fn test_created_by_defaults_to_chef() {
    assert_eq!(appointment_rules::normalize_created_by(None), "chef");
    assert_eq!(
        appointment_rules::normalize_created_by(Some("kollege")),
        "kollege"
    );
}

#[test]
fn test_update_request_validation() {
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
    assert!(appointment_rules::validate_update(&empty).is_err());

    let confirm = UpdateAppointmentRequest {
        status: Some("confirmed".to_string()),
        customer_name: None,
        phone: None,
        date: None,
        time: None,
        note: None,
        reminder_minutes: None,
        created_by: None,
    };
    assert!(appointment_rules::validate_update(&confirm).is_ok());

    let bad = UpdateAppointmentRequest {
        status: Some("maybe".to_string()),
        customer_name: None,
        phone: None,
        date: None,
        time: None,
        note: None,
        reminder_minutes: None,
        created_by: None,
    };
    assert!(appointment_rules::validate_update(&bad).is_err());
}

#[test]
fn test_notification_field_rules() {
    assert!(notification_rules::validate_title("Neuer Termin").is_ok());
    assert!(notification_rules::validate_title("").is_err());
    assert!(notification_rules::validate_message("Acme Corp am 01.03.2025").is_ok());
    assert!(notification_rules::validate_message("  ").is_err());
}

#[test]
fn test_channel_code_generation() {
    let code = TeamsService::generate_channel_code(8);
    assert_eq!(code.len(), 8);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));

    // Codes are random; two draws colliding would be astronomically unlikely.
    assert_ne!(
        TeamsService::generate_channel_code(16),
        TeamsService::generate_channel_code(16)
    );
}
