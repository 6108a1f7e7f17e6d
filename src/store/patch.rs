//! Partial updates. Each patch carries only the fields a caller wants to
//! overwrite; `apply_to` copies the prior record and replaces exactly those.

use chrono::NaiveDate;
use serde::Deserialize;

use super::models::{Class, ScheduleSlot, Status, Student, Tutor};

/// A list field given either as a JSON array or as a comma-separated string
/// (the form UIs collect `subjects` in). Blank items are dropped.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListInput {
    Items(Vec<String>),
    Joined(String),
}

impl ListInput {
    pub fn into_vec(self) -> Vec<String> {
        let raw = match self {
            ListInput::Items(items) => items,
            ListInput::Joined(s) => s.split(',').map(|p| p.to_string()).collect(),
        };
        raw.into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub student_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub grade: Option<String>,
    pub subject: Option<String>,
    pub enrollment_date: Option<NaiveDate>,
    pub status: Option<Status>,
    pub qr_code: Option<String>,
}

impl StudentPatch {
    pub fn apply_to(self, prior: &Student) -> Student {
        let mut next = prior.clone();
        if let Some(v) = self.name {
            next.name = v;
        }
        if let Some(v) = self.student_id {
            next.student_id = v;
        }
        if let Some(v) = self.email {
            next.email = v;
        }
        if let Some(v) = self.phone {
            next.phone = v;
        }
        if let Some(v) = self.parent_name {
            next.parent_name = v;
        }
        if let Some(v) = self.parent_phone {
            next.parent_phone = v;
        }
        if let Some(v) = self.grade {
            next.grade = v;
        }
        if let Some(v) = self.subject {
            next.subject = v;
        }
        if let Some(v) = self.enrollment_date {
            next.enrollment_date = v;
        }
        if let Some(v) = self.status {
            next.status = v;
        }
        if let Some(v) = self.qr_code {
            next.qr_code = v;
        }
        next
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TutorPatch {
    pub name: Option<String>,
    pub tutor_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subjects: Option<ListInput>,
    pub joined_date: Option<NaiveDate>,
    pub status: Option<Status>,
    pub qr_code: Option<String>,
    pub classes: Option<ListInput>,
}

impl TutorPatch {
    pub fn apply_to(self, prior: &Tutor) -> Tutor {
        let mut next = prior.clone();
        if let Some(v) = self.name {
            next.name = v;
        }
        if let Some(v) = self.tutor_id {
            next.tutor_id = v;
        }
        if let Some(v) = self.email {
            next.email = v;
        }
        if let Some(v) = self.phone {
            next.phone = v;
        }
        if let Some(v) = self.subjects {
            next.subjects = v.into_vec();
        }
        if let Some(v) = self.joined_date {
            next.joined_date = v;
        }
        if let Some(v) = self.status {
            next.status = v;
        }
        if let Some(v) = self.qr_code {
            next.qr_code = v;
        }
        if let Some(v) = self.classes {
            next.classes = v.into_vec();
        }
        next
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClassPatch {
    pub name: Option<String>,
    pub grade: Option<String>,
    pub subject: Option<String>,
    pub schedule: Option<Vec<ScheduleSlot>>,
    pub students: Option<Vec<String>>,
    pub tutors: Option<Vec<String>>,
}

impl ClassPatch {
    pub fn apply_to(self, prior: &Class) -> Class {
        let mut next = prior.clone();
        if let Some(v) = self.name {
            next.name = v;
        }
        if let Some(v) = self.grade {
            next.grade = v;
        }
        if let Some(v) = self.subject {
            next.subject = v;
        }
        if let Some(v) = self.schedule {
            next.schedule = v;
        }
        if let Some(v) = self.students {
            next.students = v;
        }
        if let Some(v) = self.tutors {
            next.tutors = v;
        }
        next
    }
}
