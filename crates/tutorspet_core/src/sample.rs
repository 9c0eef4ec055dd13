//! Built-in sample records used when no saved book exists.
//!
//! Every literal here is a constant known to satisfy its constraint, so
//! construction failures are programming errors, like the static regexes.

use crate::book::{AddressBook, DatesBook};
use crate::model::date::{Description, Details, ImportantDate};
use crate::model::fields::{Address, Email, Name, Phone, School, Subject};
use crate::model::lesson::Lesson;
use crate::model::level::Level;
use crate::model::person::Person;

struct SampleStudent {
    name: &'static str,
    phone: &'static str,
    school: &'static str,
    email: &'static str,
    address: &'static str,
    guardian_name: &'static str,
    guardian_phone: &'static str,
    level: Option<Level>,
    subjects: &'static [&'static str],
    lessons: &'static [&'static str],
}

const SAMPLE_STUDENTS: &[SampleStudent] = &[
    SampleStudent {
        name: "Alex Yeoh",
        phone: "87438807",
        school: "Abc Secondary School",
        email: "alexyeoh@example.com",
        address: "Blk 30 Geylang Street 29, #06-40",
        guardian_name: "Jane Yeoh",
        guardian_phone: "87438800",
        level: None,
        subjects: &["math"],
        lessons: &["monday 2000"],
    },
    SampleStudent {
        name: "Bernice Yu",
        phone: "99272758",
        school: "Xyz Secondary School",
        email: "berniceyu@example.com",
        address: "Blk 30 Lorong 3 Serangoon Gardens, #07-18",
        guardian_name: "Ben Yu",
        guardian_phone: "99272758",
        level: Some(Level::Sec4),
        subjects: &["physics"],
        lessons: &[" monday 1800"],
    },
    SampleStudent {
        name: "Charlotte Oliveiro",
        phone: "93210283",
        school: "Cde Secondary School",
        email: "charlotte@example.com",
        address: "Blk 11 Ang Mo Kio Street 74, #11-04",
        guardian_name: "Claire Oliveiro",
        guardian_phone: "93210288",
        level: None,
        subjects: &["classA"],
        lessons: &["monday 1500"],
    },
    SampleStudent {
        name: "David Li",
        phone: "91031282",
        school: "Li Secondary School",
        email: "lidavid@example.com",
        address: "Blk 436 Serangoon Gardens Street 26, #16-43",
        guardian_name: "Li Li",
        guardian_phone: "91031288",
        level: Some(Level::Sec1),
        subjects: &[],
        lessons: &["tuesday 1000"],
    },
    SampleStudent {
        name: "Irfan Ibrahim",
        phone: "92492021",
        school: "Efg Secondary School",
        email: "irfan@example.com",
        address: "Blk 47 Tampines Street 20, #17-35",
        guardian_name: "Frank Ibrahim",
        guardian_phone: "92492022",
        level: Some(Level::Sec2),
        subjects: &[],
        lessons: &["wednesday 1400"],
    },
    SampleStudent {
        name: "Roy Balakrishnan",
        phone: "92624417",
        school: "Efg Secondary School",
        email: "royb@example.com",
        address: "Blk 45 Aljunied Street 85, #11-31",
        guardian_name: "Bob Balakrishnan",
        guardian_phone: "92624411",
        level: None,
        subjects: &["physics"],
        lessons: &["wednesday 1200"],
    },
];

const SAMPLE_DATES: &[(&str, &str)] = &[
    ("A-Levels Mathematics Paper 1", "2021-11-03 0800"),
    ("A-Levels Mathematics Paper 2", "2021-11-06 0800"),
];

impl SampleStudent {
    fn to_person(&self) -> Person {
        Person::builder(
            Name::new(self.name).expect("valid sample name"),
            Phone::new(self.phone).expect("valid sample phone"),
        )
        .school(Some(School::new(self.school).expect("valid sample school")))
        .email(Some(Email::new(self.email).expect("valid sample email")))
        .address(Some(Address::new(self.address).expect("valid sample address")))
        .guardian_name(Some(
            Name::new(self.guardian_name).expect("valid sample guardian name"),
        ))
        .guardian_phone(Some(
            Phone::new(self.guardian_phone).expect("valid sample guardian phone"),
        ))
        .level(self.level)
        .subjects(
            self.subjects
                .iter()
                .map(|subject| Subject::new(subject).expect("valid sample subject")),
        )
        .lessons(
            self.lessons
                .iter()
                .map(|lesson| Lesson::new(lesson).expect("valid sample lesson")),
        )
        .build()
    }
}

/// The six sample students, in display order.
pub fn sample_persons() -> Vec<Person> {
    SAMPLE_STUDENTS.iter().map(SampleStudent::to_person).collect()
}

pub fn sample_address_book() -> AddressBook {
    AddressBook::from_persons(sample_persons()).expect("sample students are distinct")
}

/// The two sample exam dates.
pub fn sample_important_dates() -> Vec<ImportantDate> {
    SAMPLE_DATES
        .iter()
        .map(|(description, details)| {
            ImportantDate::new(
                Description::new(description).expect("valid sample description"),
                Details::new(details).expect("valid sample details"),
            )
        })
        .collect()
}

pub fn sample_dates_book() -> DatesBook {
    DatesBook::from_dates(sample_important_dates()).expect("sample dates are distinct")
}

#[cfg(test)]
mod tests {
    use super::{sample_address_book, sample_dates_book};
    use crate::model::lesson::Lesson;
    use crate::schedule::lesson_index::LessonIndex;

    #[test]
    fn sample_books_are_complete() {
        let persons = sample_address_book();
        assert_eq!(persons.len(), 6);
        assert_eq!(persons.persons()[0].name().as_str(), "Alex Yeoh");
        assert_eq!(sample_dates_book().len(), 2);
    }

    #[test]
    fn sample_lessons_do_not_overlap() {
        let book = sample_address_book();
        let index = LessonIndex::rebuild(book.persons());
        assert_eq!(index.len(), 6);
        assert!(index.has_lesson(&Lesson::new("monday 1800").unwrap()));
    }
}
