//! Ready-made filters and orderings for the displayed lists.
//!
//! Keyword predicates match whole words, case-insensitively, and succeed when
//! any keyword matches.

use crate::model::date::ImportantDate;
use crate::model::level::Level;
use crate::model::person::Person;
use crate::view::projection::Predicate;
use std::cmp::Ordering;

/// Matches every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowAll;

impl<T> Predicate<T> for ShowAll {
    fn test(&self, _item: &T) -> bool {
        true
    }
}

/// Any keyword equals a word of the student's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameContainsKeywords {
    keywords: Vec<String>,
}

impl NameContainsKeywords {
    pub fn new(keywords: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

impl Predicate<Person> for NameContainsKeywords {
    fn test(&self, person: &Person) -> bool {
        any_word_matches(&self.keywords, person.name().as_str())
    }
}

/// Any keyword equals a word of the student's school name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchoolContainsKeywords {
    keywords: Vec<String>,
}

impl SchoolContainsKeywords {
    pub fn new(keywords: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

impl Predicate<Person> for SchoolContainsKeywords {
    fn test(&self, person: &Person) -> bool {
        person
            .school()
            .is_some_and(|school| any_word_matches(&self.keywords, school.as_str()))
    }
}

/// Any keyword equals one of the student's subjects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectContainsKeywords {
    keywords: Vec<String>,
}

impl SubjectContainsKeywords {
    pub fn new(keywords: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

impl Predicate<Person> for SubjectContainsKeywords {
    fn test(&self, person: &Person) -> bool {
        person
            .subjects()
            .iter()
            .any(|subject| any_word_matches(&self.keywords, subject.as_str()))
    }
}

/// Any of the student's lessons falls on the keyword's weekday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonDayMatches {
    keyword: String,
}

impl LessonDayMatches {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
        }
    }
}

impl Predicate<Person> for LessonDayMatches {
    fn test(&self, person: &Person) -> bool {
        let keyword = [self.keyword.as_str()];
        person
            .lessons()
            .iter()
            .any(|lesson| any_word_matches(&keyword, lesson.day_name()))
    }
}

/// Student is at exactly this level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelIs(pub Level);

impl Predicate<Person> for LevelIs {
    fn test(&self, person: &Person) -> bool {
        person.level() == Some(self.0)
    }
}

/// Any keyword equals a word of the important date description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionContainsKeywords {
    keywords: Vec<String>,
}

impl DescriptionContainsKeywords {
    pub fn new(keywords: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

impl Predicate<ImportantDate> for DescriptionContainsKeywords {
    fn test(&self, date: &ImportantDate) -> bool {
        any_word_matches(&self.keywords, date.description.as_str())
    }
}

/// Alphabetical by name, ignoring case.
pub fn by_name(left: &Person, right: &Person) -> Ordering {
    compare_ignore_case(left.name().as_str(), right.name().as_str())
}

/// Alphabetical by school, students without a school last.
pub fn by_school(left: &Person, right: &Person) -> Ordering {
    missing_last(
        left.school().map(|school| school.as_str()),
        right.school().map(|school| school.as_str()),
        compare_ignore_case,
    )
}

/// Lowest level first, students without a level last.
pub fn by_level(left: &Person, right: &Person) -> Ordering {
    missing_last(left.level(), right.level(), |a, b| a.cmp(&b))
}

/// Earliest weekly lesson first, students without lessons last.
pub fn by_earliest_lesson(left: &Person, right: &Person) -> Ordering {
    missing_last(left.earliest_lesson(), right.earliest_lesson(), |a, b| {
        a.cmp(b)
    })
}

/// Chronological order of important dates.
pub fn by_date_time(left: &ImportantDate, right: &ImportantDate) -> Ordering {
    left.date_time().cmp(&right.date_time())
}

fn missing_last<V>(left: Option<V>, right: Option<V>, compare: impl Fn(V, V) -> Ordering) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => compare(left, right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_ignore_case(left: &str, right: &str) -> Ordering {
    left.to_lowercase().cmp(&right.to_lowercase())
}

fn any_word_matches<S: AsRef<str>>(keywords: &[S], sentence: &str) -> bool {
    keywords.iter().any(|keyword| {
        let keyword = keyword.as_ref().trim();
        !keyword.is_empty()
            && sentence
                .split_whitespace()
                .any(|word| word.eq_ignore_ascii_case(keyword))
    })
}

#[cfg(test)]
mod tests {
    use super::{
        by_earliest_lesson, by_level, by_school, LessonDayMatches, NameContainsKeywords,
        SchoolContainsKeywords, SubjectContainsKeywords,
    };
    use crate::model::fields::{Name, Phone, School, Subject};
    use crate::model::lesson::Lesson;
    use crate::model::level::Level;
    use crate::model::person::Person;
    use crate::view::projection::Predicate;
    use std::cmp::Ordering;

    fn person(name: &str) -> Person {
        Person::builder(Name::new(name).unwrap(), Phone::new("98765432").unwrap()).build()
    }

    #[test]
    fn name_keywords_match_whole_words_ignoring_case() {
        let predicate = NameContainsKeywords::new(["alice", "bob"]);
        assert!(predicate.test(&person("Alice Pauline")));
        assert!(predicate.test(&person("Bob Choo")));
        assert!(!predicate.test(&person("Alicia Tan")));
        assert!(!NameContainsKeywords::new(Vec::<String>::new()).test(&person("Alice")));
    }

    #[test]
    fn school_and_subject_keywords() {
        let student = Person::builder(Name::new("Carl").unwrap(), Phone::new("95352563").unwrap())
            .school(Some(School::new("Xyz Secondary School").unwrap()))
            .subjects([Subject::new("Physics").unwrap()])
            .build();
        assert!(SchoolContainsKeywords::new(["xyz"]).test(&student));
        assert!(!SchoolContainsKeywords::new(["abc"]).test(&person("No School")));
        assert!(SubjectContainsKeywords::new(["physics"]).test(&student));
        assert!(!SubjectContainsKeywords::new(["math"]).test(&student));
    }

    #[test]
    fn lesson_day_matches_any_lesson() {
        let student = Person::builder(Name::new("Dan").unwrap(), Phone::new("87652533").unwrap())
            .lessons([Lesson::new("wednesday 1400").unwrap()])
            .build();
        assert!(LessonDayMatches::new("Wednesday").test(&student));
        assert!(!LessonDayMatches::new("monday").test(&student));
    }

    #[test]
    fn comparators_put_missing_values_last() {
        let with_school = Person::builder(Name::new("A").unwrap(), Phone::new("111").unwrap())
            .school(Some(School::new("Zeta").unwrap()))
            .level(Some(Level::Sec1))
            .lessons([Lesson::new("friday 0900").unwrap()])
            .build();
        let bare = person("B");
        assert_eq!(by_school(&with_school, &bare), Ordering::Less);
        assert_eq!(by_level(&bare, &with_school), Ordering::Greater);
        assert_eq!(by_earliest_lesson(&with_school, &bare), Ordering::Less);
        assert_eq!(by_level(&bare, &bare), Ordering::Equal);
    }
}
