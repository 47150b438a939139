use crate::features::registration::AvailabilityStatus;

pub fn availability_class(status: &AvailabilityStatus) -> &'static str {
    match status {
        AvailabilityStatus::Available => "input-field input-available",
        AvailabilityStatus::Unavailable => "input-field input-unavailable",
        AvailabilityStatus::Error => "input-field input-error",
        _ => "input-field",
    }
}

pub fn availability_style(status: &AvailabilityStatus) -> &'static str {
    match status {
        AvailabilityStatus::Available => "border: 2px solid #10b981; background-color: #f0fdf4;",
        AvailabilityStatus::Unavailable => "border: 2px solid #ef4444; background-color: #fef2f2;",
        AvailabilityStatus::Error => "border: 2px solid #f59e0b; background-color: #fffbeb;",
        _ => "",
    }
}

/// Input class for a field that may carry a validation message.
pub fn field_class(error: Option<&String>) -> &'static str {
    match error {
        Some(_) => "input-field input-invalid",
        None => "input-field",
    }
}

pub fn field_style(error: Option<&String>) -> &'static str {
    match error {
        Some(_) => "border: 2px solid #ef4444; background-color: #fef2f2;",
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_class_mapping() {
        assert_eq!(
            availability_class(&AvailabilityStatus::Available),
            "input-field input-available"
        );
        assert_eq!(
            availability_class(&AvailabilityStatus::Checking),
            "input-field"
        );
        assert_eq!(availability_style(&AvailabilityStatus::Unknown), "");
    }

    #[test]
    fn test_field_class_mapping() {
        let message = "Name is required".to_string();
        assert_eq!(field_class(Some(&message)), "input-field input-invalid");
        assert_eq!(field_class(None), "input-field");
    }
}
