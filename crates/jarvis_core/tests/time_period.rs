use chrono::{NaiveDate, NaiveDateTime};
use jarvis_core::model::time_period::TimePeriod;
use jarvis_core::model::validation::ValidationError;

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2022, 10, 12)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .unwrap()
}

#[test]
fn construction_requires_start_before_end() {
    assert!(TimePeriod::new(at(10, 0), at(11, 0)).is_ok());
    assert_eq!(
        TimePeriod::new(at(11, 0), at(10, 0)),
        Err(ValidationError::TimePeriod)
    );
    assert_eq!(
        TimePeriod::new(at(10, 0), at(10, 0)),
        Err(ValidationError::TimePeriod)
    );
    assert!(!TimePeriod::is_valid_time_period(at(10, 0), at(10, 0)));
}

#[test]
fn overlap_is_symmetric() {
    let morning = TimePeriod::new(at(9, 0), at(11, 0)).unwrap();
    let late_morning = TimePeriod::new(at(10, 30), at(12, 0)).unwrap();
    let afternoon = TimePeriod::new(at(13, 0), at(14, 0)).unwrap();

    assert!(morning.has_overlap(&late_morning));
    assert!(late_morning.has_overlap(&morning));
    assert!(!morning.has_overlap(&afternoon));
    assert!(!afternoon.has_overlap(&morning));
}

#[test]
fn touching_periods_do_not_overlap() {
    let first = TimePeriod::new(at(9, 0), at(10, 0)).unwrap();
    let second = TimePeriod::new(at(10, 0), at(11, 0)).unwrap();
    assert!(!first.has_overlap(&second));
    assert!(!second.has_overlap(&first));
}

#[test]
fn contained_period_overlaps() {
    let outer = TimePeriod::new(at(9, 0), at(12, 0)).unwrap();
    let inner = TimePeriod::new(at(10, 0), at(10, 30)).unwrap();
    assert!(outer.has_overlap(&inner));
    assert!(inner.has_overlap(&outer));
}

#[test]
fn deserialization_rejects_inverted_period() {
    let raw = r#"{"start":"2022-10-12T11:00:00","end":"2022-10-12T10:00:00"}"#;
    assert!(serde_json::from_str::<TimePeriod>(raw).is_err());

    let valid = r#"{"start":"2022-10-12T10:00:00","end":"2022-10-12T11:00:00"}"#;
    let period = serde_json::from_str::<TimePeriod>(valid).unwrap();
    assert_eq!(period.start(), at(10, 0));
}
