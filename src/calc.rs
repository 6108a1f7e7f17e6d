use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::store::{AttendanceRecord, FeeRecord, FeeStatus, Status, Store, Student, Tutor, UserType};

/// `Math.round(part / whole * 100)`; `None` when there is nothing to divide by.
pub fn rounded_percent(part: i64, whole: i64) -> Option<i64> {
    if whole <= 0 {
        return None;
    }
    Some(((part as f64 / whole as f64) * 100.0).round() as i64)
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Name and email match case-insensitively; the display code is matched as typed.
pub fn student_matches(s: &Student, term: &str) -> bool {
    let lower = term.to_lowercase();
    contains_ci(&s.name, &lower) || s.student_id.contains(term) || contains_ci(&s.email, &lower)
}

pub fn tutor_matches(t: &Tutor, term: &str) -> bool {
    let lower = term.to_lowercase();
    contains_ci(&t.name, &lower) || t.tutor_id.contains(term) || contains_ci(&t.email, &lower)
}

pub fn filter_attendance<'a>(
    records: &'a [AttendanceRecord],
    date: Option<NaiveDate>,
    user_type: Option<UserType>,
) -> Vec<&'a AttendanceRecord> {
    records
        .iter()
        .filter(|r| date.map(|d| r.date == d).unwrap_or(true))
        .filter(|r| user_type.map(|t| r.user_type == t).unwrap_or(true))
        .collect()
}

/// Fees whose status matches and whose student's name contains `search`.
/// Fees pointing at a missing student never match, search or not.
pub fn filter_fees<'a>(
    store: &'a Store,
    status: Option<FeeStatus>,
    search: Option<&str>,
) -> Vec<&'a FeeRecord> {
    let term = search.map(|s| s.trim().to_lowercase()).unwrap_or_default();
    store
        .fees()
        .iter()
        .filter(|f| status.map(|s| f.status == s).unwrap_or(true))
        .filter(|f| {
            store
                .find_student(&f.student_id)
                .map(|s| term.is_empty() || contains_ci(&s.name, &term))
                .unwrap_or(false)
        })
        .collect()
}

/// Saturates at the `i64` bounds; amounts are caller-supplied and unchecked.
fn sum_amounts<'a>(fees: impl Iterator<Item = &'a FeeRecord>) -> i64 {
    fees.fold(0i64, |acc, f| acc.saturating_add(f.amount))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub date: NaiveDate,
    pub total_students: usize,
    pub active_students: usize,
    pub total_tutors: usize,
    pub active_tutors: usize,
    pub present_students: usize,
    pub present_tutors: usize,
    pub pending_fee_count: usize,
    pub total_pending: i64,
    pub total_paid: i64,
}

pub fn dashboard_summary(store: &Store, date: NaiveDate) -> DashboardSummary {
    let today = filter_attendance(store.attendance(), Some(date), None);
    let pending: Vec<&FeeRecord> = store
        .fees()
        .iter()
        .filter(|f| f.status == FeeStatus::Pending)
        .collect();
    DashboardSummary {
        date,
        total_students: store.students().len(),
        active_students: store
            .students()
            .iter()
            .filter(|s| s.status == Status::Active)
            .count(),
        total_tutors: store.tutors().len(),
        active_tutors: store
            .tutors()
            .iter()
            .filter(|t| t.status == Status::Active)
            .count(),
        present_students: today
            .iter()
            .filter(|r| r.user_type == UserType::Student)
            .count(),
        present_tutors: today
            .iter()
            .filter(|r| r.user_type == UserType::Tutor)
            .count(),
        pending_fee_count: pending.len(),
        total_pending: sum_amounts(pending.iter().copied()),
        total_paid: sum_amounts(store.fees().iter().filter(|f| f.is_paid())),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSummary {
    pub total_collected: i64,
    pub total_pending: i64,
    pub paid_count: usize,
    pub pending_count: usize,
    pub collection_rate: Option<i64>,
    pub total_records: usize,
    pub average_amount: Option<i64>,
}

pub fn fee_summary(fees: &[FeeRecord]) -> FeeSummary {
    let total_collected = sum_amounts(fees.iter().filter(|f| f.is_paid()));
    let total_pending = sum_amounts(fees.iter().filter(|f| !f.is_paid()));
    let paid_count = fees.iter().filter(|f| f.is_paid()).count();
    let billed = total_collected.saturating_add(total_pending);
    let average_amount = if fees.is_empty() {
        None
    } else {
        let total = sum_amounts(fees.iter()) as f64;
        Some((total / fees.len() as f64).round() as i64)
    };
    FeeSummary {
        total_collected,
        total_pending,
        paid_count,
        pending_count: fees.len() - paid_count,
        collection_rate: rounded_percent(total_collected, billed),
        total_records: fees.len(),
        average_amount,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectAttendance {
    pub subject: String,
    pub students: usize,
    pub tutors: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceDaySummary {
    pub date: NaiveDate,
    pub students_present: usize,
    pub student_rate: Option<i64>,
    pub tutors_present: usize,
    pub tutor_rate: Option<i64>,
    pub total_records: usize,
    pub by_subject: Vec<SubjectAttendance>,
}

pub fn attendance_day_summary(store: &Store, date: NaiveDate) -> AttendanceDaySummary {
    let day = filter_attendance(store.attendance(), Some(date), None);
    let students_present = day
        .iter()
        .filter(|r| r.user_type == UserType::Student)
        .count();
    let tutors_present = day.len() - students_present;

    let mut by_subject: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for r in &day {
        let entry = by_subject.entry(r.subject.as_str()).or_default();
        match r.user_type {
            UserType::Student => entry.0 += 1,
            UserType::Tutor => entry.1 += 1,
        }
    }

    AttendanceDaySummary {
        date,
        students_present,
        student_rate: rounded_percent(students_present as i64, store.students().len() as i64),
        tutors_present,
        tutor_rate: rounded_percent(tutors_present as i64, store.tutors().len() as i64),
        total_records: day.len(),
        by_subject: by_subject
            .into_iter()
            .map(|(subject, (students, tutors))| SubjectAttendance {
                subject: subject.to_string(),
                students,
                tutors,
            })
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSummary {
    pub total_classes: usize,
    pub total_enrolled: usize,
    pub total_tutor_assignments: usize,
    pub average_class_size: Option<i64>,
}

pub fn class_summary(store: &Store) -> ClassSummary {
    let classes = store.classes();
    let total_enrolled: usize = classes.iter().map(|c| c.students.len()).sum();
    let average_class_size = if classes.is_empty() {
        None
    } else {
        Some((total_enrolled as f64 / classes.len() as f64).round() as i64)
    };
    ClassSummary {
        total_classes: classes.len(),
        total_enrolled,
        total_tutor_assignments: classes.iter().map(|c| c.tutors.len()).sum(),
        average_class_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::PaymentMethod;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn rounded_percent_rounds_half_up() {
        assert_eq!(rounded_percent(1, 3), Some(33));
        assert_eq!(rounded_percent(2, 3), Some(67));
        assert_eq!(rounded_percent(1, 2), Some(50));
        assert_eq!(rounded_percent(5, 0), None);
    }

    #[test]
    fn seeded_fee_summary() {
        let store = Store::seeded();
        let s = fee_summary(store.fees());
        assert_eq!(s.total_collected, 5000);
        assert_eq!(s.total_pending, 10000);
        assert_eq!(s.paid_count, 1);
        assert_eq!(s.pending_count, 2);
        assert_eq!(s.collection_rate, Some(33));
        assert_eq!(s.average_amount, Some(5000));
    }

    #[test]
    fn empty_fee_summary_has_no_rates() {
        let s = fee_summary(&[]);
        assert_eq!(s.collection_rate, None);
        assert_eq!(s.average_amount, None);
        assert_eq!(s.total_records, 0);
    }

    #[test]
    fn huge_amounts_saturate_instead_of_overflowing() {
        let fees = vec![
            FeeRecord::pending("a", "1", "May", i64::MAX, "c", "s"),
            FeeRecord::pending("b", "1", "May", 1, "c", "s"),
        ];
        let s = fee_summary(&fees);
        assert_eq!(s.total_pending, i64::MAX);
        assert_eq!(s.total_collected, 0);
        assert_eq!(s.collection_rate, Some(0));
        assert!(s.average_amount.is_some());

        let mut store = Store::seeded();
        store.set_fees(fees);
        let d = dashboard_summary(&store, date(2024, 12, 20));
        assert_eq!(d.total_pending, i64::MAX);
        assert_eq!(d.pending_fee_count, 2);
    }

    #[test]
    fn dashboard_reflects_payment() {
        let mut store = Store::seeded();
        let day = date(2024, 12, 20);
        let before = dashboard_summary(&store, day);
        assert_eq!(before.present_students, 1);
        assert_eq!(before.present_tutors, 1);
        assert_eq!(before.pending_fee_count, 2);

        store.record_fee_payment("3", day, PaymentMethod::Cash);
        let after = dashboard_summary(&store, day);
        assert_eq!(after.pending_fee_count, 1);
        assert_eq!(after.total_paid, 10000);
        assert_eq!(after.total_pending, 5000);
    }

    #[test]
    fn attendance_day_breakdown() {
        let store = Store::seeded();
        let s = attendance_day_summary(&store, date(2024, 12, 20));
        assert_eq!(s.students_present, 1);
        assert_eq!(s.student_rate, Some(33));
        assert_eq!(s.tutors_present, 1);
        assert_eq!(s.tutor_rate, Some(50));
        assert_eq!(
            s.by_subject,
            vec![SubjectAttendance {
                subject: "Mathematics".to_string(),
                students: 1,
                tutors: 1,
            }]
        );

        let quiet = attendance_day_summary(&store, date(2024, 12, 21));
        assert_eq!(quiet.total_records, 0);
        assert!(quiet.by_subject.is_empty());
    }

    #[test]
    fn search_rules() {
        let store = Store::seeded();
        let hits: Vec<&str> = store
            .students()
            .iter()
            .filter(|s| student_matches(s, "PRIYA"))
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(hits, vec!["2"]);
        assert!(!student_matches(&store.students()[0], "stu-2024"));
        assert!(student_matches(&store.students()[0], "STU-2024-001"));
        assert!(tutor_matches(&store.tutors()[1], "vikram@"));
    }

    #[test]
    fn fee_filter_by_status_and_student_name() {
        let store = Store::seeded();
        let pending = filter_fees(&store, Some(FeeStatus::Pending), None);
        assert_eq!(pending.len(), 2);
        let aarav = filter_fees(&store, None, Some("aarav"));
        let ids: Vec<&str> = aarav.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn fee_filter_drops_fees_of_missing_students() {
        let mut store = Store::seeded();
        store.delete_student("1");
        let all: Vec<&str> = filter_fees(&store, None, None)
            .iter()
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(all, vec!["2"]);
        assert!(filter_fees(&store, None, Some("aarav")).is_empty());
        assert_eq!(store.fees().len(), 3);
    }

    #[test]
    fn class_summary_of_seed() {
        let s = class_summary(&Store::seeded());
        assert_eq!(s.total_classes, 2);
        assert_eq!(s.total_enrolled, 2);
        assert_eq!(s.total_tutor_assignments, 2);
        assert_eq!(s.average_class_size, Some(1));
    }
}
