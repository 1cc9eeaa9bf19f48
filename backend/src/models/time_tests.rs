#[cfg(test)]
mod tests {
    use crate::models::time::{normalize_time, TimeOfDay, TimeParseError};

    #[test]
    fn test_single_digit_fields_normalize() {
        assert_eq!(normalize_time("7:0").as_deref(), Some("07:00"));
        assert_eq!(normalize_time("07:00").as_deref(), Some("07:00"));
        assert_eq!(normalize_time("7:05").as_deref(), Some("07:05"));
        assert_eq!(
            "7:0".parse::<TimeOfDay>().unwrap(),
            "07:00".parse::<TimeOfDay>().unwrap()
        );
    }

    #[test]
    fn test_parse_boundaries() {
        assert_eq!("00:00".parse::<TimeOfDay>().unwrap(), TimeOfDay::MIDNIGHT);
        assert_eq!("23:59".parse::<TimeOfDay>().unwrap().minutes(), 1439);
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert_eq!(
            "24:01".parse::<TimeOfDay>(),
            Err(TimeParseError::HourOutOfRange(24))
        );
        assert_eq!(
            "25:00".parse::<TimeOfDay>(),
            Err(TimeParseError::HourOutOfRange(25))
        );
        assert_eq!(
            "10:60".parse::<TimeOfDay>(),
            Err(TimeParseError::MinuteOutOfRange(60))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "1000".parse::<TimeOfDay>(),
            Err(TimeParseError::MissingSeparator(_))
        ));
        assert!(matches!(
            "ab:cd".parse::<TimeOfDay>(),
            Err(TimeParseError::InvalidField(_))
        ));
        assert!(matches!(
            "100:00".parse::<TimeOfDay>(),
            Err(TimeParseError::InvalidField(_))
        ));
        assert!(normalize_time("").is_none());
    }

    #[test]
    fn test_minutes_round_trip() {
        let t = TimeOfDay::from_minutes(8 * 60 + 30);
        assert_eq!(t.to_string(), "08:30");
        assert_eq!(t.minutes(), 510);
        assert_eq!(TimeOfDay::from_minutes(1440), TimeOfDay::END_OF_DAY);
        assert_eq!(TimeOfDay::from_minutes(1440 + 90).to_string(), "01:30");
    }

    #[test]
    fn test_end_of_day() {
        let end: TimeOfDay = "24:00".parse().unwrap();
        assert_eq!(end, TimeOfDay::END_OF_DAY);
        assert_eq!(end.minutes(), 1440);
        assert_eq!(end.to_string(), "24:00");
        assert!(end > "23:59".parse::<TimeOfDay>().unwrap());
        assert_ne!(end, TimeOfDay::MIDNIGHT);
        assert_eq!(normalize_time("24:0").as_deref(), Some("24:00"));
    }

    #[test]
    fn test_minutes_until_end_of_day() {
        let start: TimeOfDay = "20:00".parse().unwrap();
        assert_eq!(start.minutes_until(TimeOfDay::END_OF_DAY), 240);
        assert_eq!(TimeOfDay::MIDNIGHT.minutes_until(TimeOfDay::END_OF_DAY), 1440);
    }

    #[test]
    fn test_minutes_until_same_day() {
        let start: TimeOfDay = "04:00".parse().unwrap();
        let end: TimeOfDay = "09:00".parse().unwrap();
        assert_eq!(start.minutes_until(end), 300);
    }

    #[test]
    fn test_minutes_until_overnight() {
        let start: TimeOfDay = "23:00".parse().unwrap();
        let end: TimeOfDay = "02:00".parse().unwrap();
        assert_eq!(start.minutes_until(end), 180);
    }

    #[test]
    fn test_serde_uses_padded_string() {
        let t: TimeOfDay = serde_json::from_str("\"7:5\"").unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"07:05\"");
        assert!(serde_json::from_str::<TimeOfDay>("\"25:00\"").is_err());
    }
}
