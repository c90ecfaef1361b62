//! Common validation utilities for portal request payloads.

use validator::ValidationError;

/// Validates a timetable day of week (0 = Sunday through 6 = Saturday).
pub fn validate_day_of_week(day: i16) -> Result<(), ValidationError> {
    if (0..=6).contains(&day) {
        Ok(())
    } else {
        let mut err = ValidationError::new("day_of_week_range");
        err.message = Some("Day of week must be between 0 and 6".into());
        Err(err)
    }
}

/// Validates a semester number (1 to 10 covers every offered programme).
pub fn validate_semester(semester: i16) -> Result<(), ValidationError> {
    if (1..=10).contains(&semester) {
        Ok(())
    } else {
        let mut err = ValidationError::new("semester_range");
        err.message = Some("Semester must be between 1 and 10".into());
        Err(err)
    }
}

/// Validates an academic year value.
pub fn validate_academic_year(year: i32) -> Result<(), ValidationError> {
    if (2000..=2100).contains(&year) {
        Ok(())
    } else {
        let mut err = ValidationError::new("year_range");
        err.message = Some("Year must be between 2000 and 2100".into());
        Err(err)
    }
}

/// Validates course credits.
pub fn validate_credits(credits: i16) -> Result<(), ValidationError> {
    if (1..=10).contains(&credits) {
        Ok(())
    } else {
        let mut err = ValidationError::new("credits_range");
        err.message = Some("Credits must be between 1 and 10".into());
        Err(err)
    }
}

/// Validates a timetable slot of the form `HH:MM-HH:MM`.
pub fn validate_time_slot(slot: &str) -> Result<(), ValidationError> {
    let invalid = || {
        let mut err = ValidationError::new("time_slot_format");
        err.message = Some("Time slot must look like 09:00-09:55".into());
        err
    };

    let (start, end) = slot.split_once('-').ok_or_else(invalid)?;
    if parse_hhmm(start).is_none() || parse_hhmm(end).is_none() {
        return Err(invalid());
    }
    Ok(())
}

fn parse_hhmm(s: &str) -> Option<(u8, u8)> {
    let (h, m) = s.split_once(':')?;
    if h.len() != 2 || m.len() != 2 {
        return None;
    }
    let hour: u8 = h.parse().ok()?;
    let minute: u8 = m.parse().ok()?;
    if hour < 24 && minute < 60 {
        Some((hour, minute))
    } else {
        None
    }
}

/// Validates a phone number: optional leading `+`, then 7 to 15 digits.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if (7..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone_format");
        err.message = Some("Phone number must be 7-15 digits with optional +".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_day_of_week() {
        assert!(validate_day_of_week(0).is_ok());
        assert!(validate_day_of_week(6).is_ok());
        assert!(validate_day_of_week(7).is_err());
        assert!(validate_day_of_week(-1).is_err());
    }

    #[test]
    fn test_validate_semester() {
        assert!(validate_semester(1).is_ok());
        assert!(validate_semester(8).is_ok());
        assert!(validate_semester(10).is_ok());
        assert!(validate_semester(0).is_err());
        assert!(validate_semester(11).is_err());
    }

    #[test]
    fn test_validate_academic_year() {
        assert!(validate_academic_year(2025).is_ok());
        assert!(validate_academic_year(2000).is_ok());
        assert!(validate_academic_year(1999).is_err());
        assert!(validate_academic_year(2101).is_err());
    }

    #[test]
    fn test_validate_credits() {
        assert!(validate_credits(3).is_ok());
        assert!(validate_credits(1).is_ok());
        assert!(validate_credits(0).is_err());
        assert!(validate_credits(12).is_err());
    }

    #[test]
    fn test_validate_time_slot_accepts_lecture_slots() {
        assert!(validate_time_slot("09:00-09:55").is_ok());
        assert!(validate_time_slot("14:00-15:30").is_ok());
        assert!(validate_time_slot("00:00-23:59").is_ok());
    }

    #[test]
    fn test_validate_time_slot_rejects_malformed() {
        assert!(validate_time_slot("9:00-10:00").is_err());
        assert!(validate_time_slot("09:00").is_err());
        assert!(validate_time_slot("09:00 to 10:00").is_err());
        assert!(validate_time_slot("25:00-26:00").is_err());
        assert!(validate_time_slot("09:61-10:00").is_err());
        assert!(validate_time_slot("").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("9876543210").is_ok());
        assert!(validate_phone("+919876543210").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("not-a-number").is_err());
        assert!(validate_phone("+").is_err());
    }

    #[test]
    fn test_validate_phone_error_message() {
        let err = validate_phone("abc").unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Phone number must be 7-15 digits with optional +"
        );
    }
}
