//! Demo dataset every seeded store starts from.

use chrono::{NaiveDate, Utc};

use super::models::{
    AttendanceRecord, Class, FeeRecord, FeeStatus, Notification, NotificationKind, PaymentMethod,
    Role, ScheduleSlot, Status, Student, Tutor, User, UserType,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    // Literal calendar dates below are all valid.
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn current_user() -> User {
    User {
        id: "admin-1".to_string(),
        email: "admin@tuition.local".to_string(),
        name: "Admin User".to_string(),
        role: Role::Admin,
        profile_picture: None,
    }
}

#[allow(clippy::too_many_arguments)]
fn student(
    id: &str,
    name: &str,
    code: &str,
    email: &str,
    phone: &str,
    parent_name: &str,
    parent_phone: &str,
    grade: &str,
    subject: &str,
    enrolled: NaiveDate,
) -> Student {
    Student {
        id: id.to_string(),
        name: name.to_string(),
        student_id: code.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        parent_name: parent_name.to_string(),
        parent_phone: parent_phone.to_string(),
        grade: grade.to_string(),
        subject: subject.to_string(),
        enrollment_date: enrolled,
        status: Status::Active,
        qr_code: format!("{code}-QR"),
    }
}

pub fn students() -> Vec<Student> {
    vec![
        student(
            "1",
            "Aarav Sharma",
            "STU-2024-001",
            "aarav@example.com",
            "+91 98765 43210",
            "Mr. Sharma",
            "+91 98765 43211",
            "10th Grade",
            "Mathematics",
            date(2024, 1, 15),
        ),
        student(
            "2",
            "Priya Patel",
            "STU-2024-002",
            "priya@example.com",
            "+91 98765 43212",
            "Mrs. Patel",
            "+91 98765 43213",
            "10th Grade",
            "Science",
            date(2024, 1, 20),
        ),
        student(
            "3",
            "Rohan Kumar",
            "STU-2024-003",
            "rohan@example.com",
            "+91 98765 43214",
            "Mr. Kumar",
            "+91 98765 43215",
            "9th Grade",
            "English",
            date(2024, 2, 10),
        ),
    ]
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn tutors() -> Vec<Tutor> {
    vec![
        Tutor {
            id: "1".to_string(),
            name: "Ms. Anjali Singh".to_string(),
            tutor_id: "TUT-2024-001".to_string(),
            email: "anjali@tuition.local".to_string(),
            phone: "+91 98765 54320".to_string(),
            subjects: strings(&["Mathematics", "Science"]),
            joined_date: date(2023, 6, 1),
            status: Status::Active,
            qr_code: "TUT-2024-001-QR".to_string(),
            classes: strings(&["10th Grade Math", "10th Grade Science"]),
        },
        Tutor {
            id: "2".to_string(),
            name: "Mr. Vikram Desai".to_string(),
            tutor_id: "TUT-2024-002".to_string(),
            email: "vikram@tuition.local".to_string(),
            phone: "+91 98765 54321".to_string(),
            subjects: strings(&["English", "History"]),
            joined_date: date(2023, 7, 15),
            status: Status::Active,
            qr_code: "TUT-2024-002-QR".to_string(),
            classes: strings(&["9th Grade English", "10th Grade History"]),
        },
    ]
}

const AFTERNOON: &str = "4:00 PM - 5:30 PM";

pub fn classes() -> Vec<Class> {
    vec![
        Class {
            id: "1".to_string(),
            name: "10th Grade Mathematics".to_string(),
            grade: "10th Grade".to_string(),
            subject: "Mathematics".to_string(),
            schedule: vec![
                ScheduleSlot::new("Monday", AFTERNOON),
                ScheduleSlot::new("Wednesday", AFTERNOON),
                ScheduleSlot::new("Friday", AFTERNOON),
            ],
            students: strings(&["1"]),
            tutors: strings(&["1"]),
        },
        Class {
            id: "2".to_string(),
            name: "10th Grade Science".to_string(),
            grade: "10th Grade".to_string(),
            subject: "Science".to_string(),
            schedule: vec![
                ScheduleSlot::new("Tuesday", AFTERNOON),
                ScheduleSlot::new("Thursday", AFTERNOON),
                ScheduleSlot::new("Saturday", "2:00 PM - 3:30 PM"),
            ],
            students: strings(&["2"]),
            tutors: strings(&["1"]),
        },
    ]
}

pub fn attendance() -> Vec<AttendanceRecord> {
    let record = |id: &str, user_type: UserType, time: &str| AttendanceRecord {
        id: id.to_string(),
        user_id: "1".to_string(),
        user_type,
        date: date(2024, 12, 20),
        time: time.to_string(),
        class: "10th Grade Mathematics".to_string(),
        subject: "Mathematics".to_string(),
    };
    vec![
        record("1", UserType::Student, "16:05"),
        record("2", UserType::Tutor, "16:00"),
    ]
}

pub fn fees() -> Vec<FeeRecord> {
    vec![
        FeeRecord {
            status: FeeStatus::Paid,
            payment_date: Some(date(2024, 12, 1)),
            payment_method: Some(PaymentMethod::Online),
            ..FeeRecord::pending("1", "1", "December 2024", 5000, "10th Grade", "Mathematics")
        },
        FeeRecord::pending("2", "2", "December 2024", 5000, "10th Grade", "Science"),
        FeeRecord::pending("3", "1", "January 2025", 5000, "10th Grade", "Mathematics"),
    ]
}

pub fn notifications() -> Vec<Notification> {
    vec![Notification {
        id: "1".to_string(),
        title: "Fee Due".to_string(),
        message: "Fee for Priya Patel is due for December 2024".to_string(),
        kind: NotificationKind::Warning,
        timestamp: Utc::now(),
        read: false,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_sizes() {
        assert_eq!(students().len(), 3);
        assert_eq!(tutors().len(), 2);
        assert_eq!(classes().len(), 2);
        assert_eq!(attendance().len(), 2);
        assert_eq!(fees().len(), 3);
        assert_eq!(notifications().len(), 1);
    }

    #[test]
    fn seed_qr_codes_follow_display_codes() {
        for s in students() {
            assert_eq!(s.qr_code, format!("{}-QR", s.student_id));
        }
        for t in tutors() {
            assert_eq!(t.qr_code, format!("{}-QR", t.tutor_id));
        }
    }

    #[test]
    fn only_first_fee_is_paid() {
        let paid: Vec<String> = fees()
            .into_iter()
            .filter(|f| f.is_paid())
            .map(|f| f.id)
            .collect();
        assert_eq!(paid, vec!["1".to_string()]);
    }
}
