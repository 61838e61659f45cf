use std::fmt;

use serde::{Deserialize, Serialize};
use time::Date;

/// Collection holding non-teaching staff records.
pub const STAFF_COLLECTION: &str = "non_teaching_staff";
/// Collection holding teacher records.
pub const TEACHERS_COLLECTION: &str = "teachers";
/// Collection holding student records.
pub const STUDENTS_COLLECTION: &str = "students";
/// Collection holding directory entries for staff and teachers.
pub const USERS_COLLECTION: &str = "users";

/// Field the store stamps with its own clock on directory entries.
pub const CREATED_AT_FIELD: &str = "createdAt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Staff,
    Teacher,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Staff => "staff",
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }

    /// Collection a record of this role is written to.
    pub fn collection(&self) -> &'static str {
        match self {
            Role::Staff => STAFF_COLLECTION,
            Role::Teacher => TEACHERS_COLLECTION,
            Role::Student => STUDENTS_COLLECTION,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub mobile_no: String,
    #[serde(rename = "type")]
    pub kind: Role,
    pub gender: Gender,
    pub date_of_birth: Date,
    pub address: String,
    pub age: i32,
    pub department: String,
    pub designation: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub mobile_no: String,
    #[serde(rename = "type")]
    pub kind: Role,
    pub subjects: Vec<String>,
    pub classes: Vec<String>,
    pub gender: Gender,
    pub date_of_birth: Date,
    pub address: String,
    pub age: i32,
    pub department: String,
    pub designation: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: String,
    /// Same value as `id`; links the student to a login account.
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub class_name: String,
    pub roll_number: String,
    pub phone_number: String,
    pub address: String,
    pub parent_name: String,
    pub parent_phone: String,
    pub date_of_birth: Date,
    pub gender: Gender,
    pub admission_number: String,
    pub admission_date: Date,
    pub is_active: bool,
}

/// Secondary `users` document linking an id to role, name and email.
///
/// `createdAt` is not part of the value; the store assigns it on write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryEntry {
    pub role: Role,
    pub email: String,
    pub name: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: Role,
    pub department: String,
}

/// One generated record of any kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Staff(StaffRecord),
    Teacher(TeacherRecord),
    Student(StudentRecord),
}

impl Record {
    pub fn id(&self) -> &str {
        match self {
            Record::Staff(r) => &r.id,
            Record::Teacher(r) => &r.id,
            Record::Student(r) => &r.id,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Record::Staff(_) => Role::Staff,
            Record::Teacher(_) => Role::Teacher,
            Record::Student(_) => Role::Student,
        }
    }

    pub fn collection(&self) -> &'static str {
        self.role().collection()
    }

    pub fn email(&self) -> &str {
        match self {
            Record::Staff(r) => &r.email,
            Record::Teacher(r) => &r.email,
            Record::Student(r) => &r.email,
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            Record::Staff(r) => format!("{} {}", r.first_name, r.last_name),
            Record::Teacher(r) => format!("{} {}", r.first_name, r.last_name),
            Record::Student(r) => format!("{} {}", r.first_name, r.last_name),
        }
    }

    /// Projects the record into its `users` entry. Students have none.
    pub fn directory_entry(&self) -> Option<DirectoryEntry> {
        let (role, id, email, department) = match self {
            Record::Staff(r) => (Role::Staff, &r.id, &r.email, &r.department),
            Record::Teacher(r) => (Role::Teacher, &r.id, &r.email, &r.department),
            Record::Student(_) => return None,
        };

        Some(DirectoryEntry {
            role,
            email: email.clone(),
            name: self.display_name(),
            user_id: id.clone(),
            kind: role,
            department: department.clone(),
        })
    }
}

impl From<StaffRecord> for Record {
    fn from(record: StaffRecord) -> Self {
        Record::Staff(record)
    }
}

impl From<TeacherRecord> for Record {
    fn from(record: TeacherRecord) -> Self {
        Record::Teacher(record)
    }
}

impl From<StudentRecord> for Record {
    fn from(record: StudentRecord) -> Self {
        Record::Student(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn staff() -> StaffRecord {
        StaffRecord {
            id: "abc123".to_string(),
            first_name: "Mary".to_string(),
            last_name: "Lopez".to_string(),
            email: "mary.lopez@school.com".to_string(),
            phone: "+15551234567".to_string(),
            mobile_no: "+15559876543".to_string(),
            kind: Role::Staff,
            gender: Gender::Female,
            date_of_birth: date!(1980 - 03 - 07),
            address: "123 School Street, City".to_string(),
            age: 46,
            department: "Library".to_string(),
            designation: "Librarian".to_string(),
            password: "password123".to_string(),
        }
    }

    #[test]
    fn test_staff_serializes_camel_case() {
        let value = serde_json::to_value(Record::from(staff())).unwrap();

        assert_eq!(value["firstName"], "Mary");
        assert_eq!(value["mobileNo"], "+15559876543");
        assert_eq!(value["type"], "staff");
        assert_eq!(value["gender"], "Female");
        assert_eq!(value["dateOfBirth"], "1980-03-07");
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn test_directory_entry_projection() {
        let entry = Record::from(staff()).directory_entry().unwrap();

        assert_eq!(entry.role, Role::Staff);
        assert_eq!(entry.kind, Role::Staff);
        assert_eq!(entry.name, "Mary Lopez");
        assert_eq!(entry.user_id, "abc123");
        assert_eq!(entry.department, "Library");

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["userId"], "abc123");
        assert_eq!(value["role"], "staff");
        assert!(value.get(CREATED_AT_FIELD).is_none());
    }

    #[test]
    fn test_student_has_no_directory_entry() {
        let student = StudentRecord {
            id: "s1".to_string(),
            user_id: "s1".to_string(),
            first_name: "Clss1_Std01".to_string(),
            last_name: "Student".to_string(),
            email: "class1.student01@example.com".to_string(),
            class_name: "Class 1".to_string(),
            roll_number: "101".to_string(),
            phone_number: "+917000000000".to_string(),
            address: "Address 1, Street 1, City".to_string(),
            parent_name: "Parent of Clss1_Std01".to_string(),
            parent_phone: "+919999999999".to_string(),
            date_of_birth: date!(2019 - 05 - 01),
            gender: Gender::Male,
            admission_number: "ADM1012023".to_string(),
            admission_date: date!(2025 - 06 - 01),
            is_active: true,
        };
        let record = Record::from(student);

        assert_eq!(record.collection(), STUDENTS_COLLECTION);
        assert!(record.directory_entry().is_none());

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["isActive"], true);
        assert_eq!(value["userId"], value["id"]);
    }

    #[test]
    fn test_staff_round_trips_through_json() {
        let original = staff();
        let json = serde_json::to_string(&original).unwrap();
        let parsed: StaffRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }
}
