//! In-memory domain store for one running session.
//!
//! The store holds every collection the dashboard works with and exposes a
//! fixed set of mutations. It does not enforce references between records:
//! deleting a student leaves its fees, attendance and class memberships in
//! place, and updates or deletes for an unknown id are silent no-ops.

pub mod models;
pub mod patch;
pub mod seed;

use chrono::NaiveDate;
use serde::Serialize;

pub use models::*;
pub use patch::{ClassPatch, ListInput, StudentPatch, TutorPatch};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    current_user: Option<User>,
    students: Vec<Student>,
    tutors: Vec<Tutor>,
    classes: Vec<Class>,
    attendance: Vec<AttendanceRecord>,
    fees: Vec<FeeRecord>,
    notifications: Vec<Notification>,
}

impl Store {
    /// Store with no records and nobody signed in.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Store populated with the demo dataset and the demo admin signed in.
    pub fn seeded() -> Self {
        Self {
            current_user: Some(seed::current_user()),
            students: seed::students(),
            tutors: seed::tutors(),
            classes: seed::classes(),
            attendance: seed::attendance(),
            fees: seed::fees(),
            notifications: seed::notifications(),
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn tutors(&self) -> &[Tutor] {
        &self.tutors
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn attendance(&self) -> &[AttendanceRecord] {
        &self.attendance
    }

    pub fn fees(&self) -> &[FeeRecord] {
        &self.fees
    }

    /// Newest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn find_student(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn find_tutor(&self, id: &str) -> Option<&Tutor> {
        self.tutors.iter().find(|t| t.id == id)
    }

    pub fn find_class(&self, id: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.id == id)
    }

    pub fn find_fee(&self, id: &str) -> Option<&FeeRecord> {
        self.fees.iter().find(|f| f.id == id)
    }

    /// Students are checked before tutors.
    pub fn find_by_qr(&self, qr_code: &str) -> Option<QrMatch<'_>> {
        if let Some(s) = self.students.iter().find(|s| s.qr_code == qr_code) {
            return Some(QrMatch::Student(s));
        }
        self.tutors
            .iter()
            .find(|t| t.qr_code == qr_code)
            .map(QrMatch::Tutor)
    }

    pub fn set_current_user(&mut self, user: Option<User>) {
        match &user {
            Some(u) => tracing::info!(user_id = %u.id, role = ?u.role, "current user set"),
            None => tracing::info!("current user cleared"),
        }
        self.current_user = user;
    }

    pub fn add_student(&mut self, student: Student) {
        let message = format!("{} has been added successfully", student.name);
        self.students.push(student);
        self.add_notification(Notification::new(
            "Student Added",
            message,
            NotificationKind::Success,
        ));
    }

    /// Returns whether a record matched.
    pub fn update_student(&mut self, id: &str, patch: StudentPatch) -> bool {
        match self.students.iter_mut().find(|s| s.id == id) {
            Some(slot) => {
                *slot = patch.apply_to(slot);
                true
            }
            None => {
                tracing::debug!(student_id = id, "update ignored: no such student");
                false
            }
        }
    }

    /// Returns whether a record was removed. Fee, attendance and class
    /// references to the student are left untouched.
    pub fn delete_student(&mut self, id: &str) -> bool {
        let before = self.students.len();
        self.students.retain(|s| s.id != id);
        let removed = self.students.len() != before;
        if !removed {
            tracing::debug!(student_id = id, "delete ignored: no such student");
        }
        removed
    }

    pub fn add_tutor(&mut self, tutor: Tutor) {
        let message = format!("{} has been added successfully", tutor.name);
        self.tutors.push(tutor);
        self.add_notification(Notification::new(
            "Tutor Added",
            message,
            NotificationKind::Success,
        ));
    }

    pub fn update_tutor(&mut self, id: &str, patch: TutorPatch) -> bool {
        match self.tutors.iter_mut().find(|t| t.id == id) {
            Some(slot) => {
                *slot = patch.apply_to(slot);
                true
            }
            None => {
                tracing::debug!(tutor_id = id, "update ignored: no such tutor");
                false
            }
        }
    }

    pub fn delete_tutor(&mut self, id: &str) -> bool {
        let before = self.tutors.len();
        self.tutors.retain(|t| t.id != id);
        let removed = self.tutors.len() != before;
        if !removed {
            tracing::debug!(tutor_id = id, "delete ignored: no such tutor");
        }
        removed
    }

    pub fn add_class(&mut self, class: Class) {
        self.classes.push(class);
    }

    pub fn update_class(&mut self, id: &str, patch: ClassPatch) -> bool {
        match self.classes.iter_mut().find(|c| c.id == id) {
            Some(slot) => {
                *slot = patch.apply_to(slot);
                true
            }
            None => {
                tracing::debug!(class_id = id, "update ignored: no such class");
                false
            }
        }
    }

    /// Students and tutors keep whatever class names they list.
    pub fn delete_class(&mut self, id: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c.id != id);
        let removed = self.classes.len() != before;
        if !removed {
            tracing::debug!(class_id = id, "delete ignored: no such class");
        }
        removed
    }

    /// Appends unconditionally: no duplicate or reference checks.
    pub fn mark_attendance(&mut self, record: AttendanceRecord) {
        self.attendance.push(record);
    }

    pub fn add_fee(&mut self, fee: FeeRecord) {
        self.fees.push(fee);
    }

    /// Marks the fee paid with the given date and method. A fee that is
    /// already paid is overwritten with the new payment details.
    pub fn record_fee_payment(
        &mut self,
        fee_id: &str,
        payment_date: NaiveDate,
        method: PaymentMethod,
    ) -> bool {
        let Some(fee) = self.fees.iter_mut().find(|f| f.id == fee_id) else {
            tracing::debug!(fee_id, "payment ignored: no such fee");
            return false;
        };
        if fee.is_paid() {
            tracing::debug!(fee_id, "fee already paid; overwriting payment details");
        }
        fee.status = FeeStatus::Paid;
        fee.payment_date = Some(payment_date);
        fee.payment_method = Some(method);
        true
    }

    pub fn add_notification(&mut self, notification: Notification) {
        self.notifications.insert(0, notification);
    }

    pub fn mark_notification_read(&mut self, id: &str) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.read = true;
                true
            }
            None => false,
        }
    }

    pub fn set_students(&mut self, students: Vec<Student>) {
        self.students = students;
    }

    pub fn set_tutors(&mut self, tutors: Vec<Tutor>) {
        self.tutors = tutors;
    }

    pub fn set_classes(&mut self, classes: Vec<Class>) {
        self.classes = classes;
    }

    pub fn set_attendance(&mut self, attendance: Vec<AttendanceRecord>) {
        self.attendance = attendance;
    }

    pub fn set_fees(&mut self, fees: Vec<FeeRecord>) {
        self.fees = fees;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn test_student(id: &str, name: &str) -> Student {
        Student {
            id: id.to_string(),
            name: name.to_string(),
            student_id: "STU-2024-004".to_string(),
            email: "test@example.com".to_string(),
            phone: "+91 90000 00000".to_string(),
            parent_name: "Parent".to_string(),
            parent_phone: "+91 90000 00001".to_string(),
            grade: "8th Grade".to_string(),
            subject: "Mathematics".to_string(),
            enrollment_date: date(2025, 1, 2),
            status: Status::Active,
            qr_code: "STU-2024-004-QR".to_string(),
        }
    }

    #[test]
    fn add_student_appends_and_notifies() {
        let mut store = Store::seeded();
        let input = test_student("4", "Test");
        store.add_student(input.clone());
        assert_eq!(store.students().len(), 4);
        assert_eq!(store.students()[3], input);

        let newest = &store.notifications()[0];
        assert_eq!(newest.title, "Student Added");
        assert_eq!(newest.message, "Test has been added successfully");
        assert_eq!(newest.kind, NotificationKind::Success);
        assert_eq!(store.notifications().len(), 2);
    }

    #[test]
    fn each_add_grows_by_one() {
        let mut store = Store::empty();
        for i in 0..5 {
            store.add_student(test_student(&format!("s{i}"), "Name"));
            assert_eq!(store.students().len(), i + 1);
        }
    }

    #[test]
    fn delete_student_twice_is_noop_and_does_not_cascade() {
        let mut store = Store::seeded();
        let attendance_before = store.attendance().to_vec();
        let fees_before = store.fees().to_vec();

        assert!(store.delete_student("1"));
        assert_eq!(store.students().len(), 2);
        let after_first = store.students().to_vec();

        assert!(!store.delete_student("1"));
        assert_eq!(store.students(), after_first.as_slice());

        assert_eq!(store.attendance(), attendance_before.as_slice());
        assert_eq!(store.fees(), fees_before.as_slice());
        assert!(store.classes()[0].students.contains(&"1".to_string()));
    }

    #[test]
    fn update_missing_id_changes_nothing() {
        let mut store = Store::seeded();
        let before = store.students().to_vec();
        let patch = StudentPatch {
            name: Some("Ghost".to_string()),
            ..StudentPatch::default()
        };
        assert!(!store.update_student("nope", patch));
        assert_eq!(store.students(), before.as_slice());
    }

    #[test]
    fn update_tutor_merges_fields() {
        let mut store = Store::seeded();
        let patch = TutorPatch {
            status: Some(Status::Inactive),
            ..TutorPatch::default()
        };
        assert!(store.update_tutor("2", patch));
        let t = store.find_tutor("2").expect("tutor 2");
        assert_eq!(t.status, Status::Inactive);
        assert_eq!(t.name, "Mr. Vikram Desai");
    }

    #[test]
    fn fee_payment_transitions_and_overwrites() {
        let mut store = Store::seeded();
        assert!(store.record_fee_payment("2", date(2025, 1, 5), PaymentMethod::Cash));
        let fee = store.find_fee("2").expect("fee 2");
        assert_eq!(fee.status, FeeStatus::Paid);
        assert_eq!(fee.payment_date, Some(date(2025, 1, 5)));
        assert_eq!(fee.payment_method, Some(PaymentMethod::Cash));

        assert!(store.record_fee_payment("2", date(2025, 2, 1), PaymentMethod::Online));
        let fee = store.find_fee("2").expect("fee 2");
        assert_eq!(fee.status, FeeStatus::Paid);
        assert_eq!(fee.payment_date, Some(date(2025, 2, 1)));
        assert_eq!(fee.payment_method, Some(PaymentMethod::Online));
    }

    #[test]
    fn fee_payment_for_unknown_fee_is_noop() {
        let mut store = Store::seeded();
        let before = store.fees().to_vec();
        assert!(!store.record_fee_payment("99", date(2025, 1, 5), PaymentMethod::Cash));
        assert_eq!(store.fees(), before.as_slice());
    }

    #[test]
    fn attendance_accepts_dangling_user() {
        let mut store = Store::seeded();
        store.mark_attendance(AttendanceRecord {
            id: "x".to_string(),
            user_id: "does-not-exist".to_string(),
            user_type: UserType::Student,
            date: date(2025, 1, 6),
            time: "16:10".to_string(),
            class: "General".to_string(),
            subject: "General".to_string(),
        });
        assert_eq!(store.attendance().len(), 3);
    }

    #[test]
    fn notifications_are_prepended() {
        let mut store = Store::empty();
        let first = Notification::new("one", "1", NotificationKind::Info);
        let second = Notification::new("two", "2", NotificationKind::Error);
        store.add_notification(first.clone());
        store.add_notification(second.clone());
        assert_eq!(store.notifications()[0], second);
        assert_eq!(store.notifications()[1], first);
    }

    #[test]
    fn qr_lookup_prefers_students() {
        let mut store = Store::seeded();
        let mut clash = store.tutors()[0].clone();
        clash.id = "9".to_string();
        clash.qr_code = "STU-2024-002-QR".to_string();
        store.add_tutor(clash);

        match store.find_by_qr("STU-2024-002-QR") {
            Some(QrMatch::Student(s)) => assert_eq!(s.id, "2"),
            other => panic!("expected student match, got {other:?}"),
        }
        match store.find_by_qr("TUT-2024-002-QR") {
            Some(QrMatch::Tutor(t)) => assert_eq!(t.id, "2"),
            other => panic!("expected tutor match, got {other:?}"),
        }
        assert!(store.find_by_qr("unknown").is_none());
    }

    #[test]
    fn class_delete_leaves_people_alone() {
        let mut store = Store::seeded();
        let tutors_before = store.tutors().to_vec();
        assert!(store.delete_class("1"));
        assert_eq!(store.classes().len(), 1);
        assert_eq!(store.tutors(), tutors_before.as_slice());
    }

    #[test]
    fn bulk_setters_replace_collections() {
        let mut store = Store::seeded();
        store.set_students(Vec::new());
        store.set_fees(vec![FeeRecord::pending("f", "1", "May", 10, "c", "s")]);
        assert!(store.students().is_empty());
        assert_eq!(store.fees().len(), 1);
        assert_eq!(store.tutors().len(), 2);
    }
}
