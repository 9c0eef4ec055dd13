//! In-memory model of students and important dates.
//!
//! # Responsibility
//! - Own the canonical stores, the lesson index and the displayed views.
//! - Run duplicate and lesson-conflict checks before any mutation.
//! - Keep stores, index and views consistent after every operation.
//!
//! # Invariants
//! - `lesson_index == LessonIndex::rebuild(address_book.persons())` after
//!   every public call returns.
//! - A failed operation leaves stores, index and views untouched.
//! - A lesson conflict can only be overridden by repeating the exact edit
//!   that raised it, on the unchanged student; any other edit attempt
//!   withdraws the pending confirmation.
//! - Log events carry counts, indexes and error codes, never record contents.

use crate::book::{AddressBook, DatesBook, StoreError};
use crate::model::date::ImportantDate;
use crate::model::lesson::Lesson;
use crate::model::person::{Person, PersonKey};
use crate::schedule::lesson_index::{LessonIndex, LessonSlot};
use crate::service::edit::EditPersonDescriptor;
use crate::service::level_policy::{self, LevelDirection, LevelShiftOutcome};
use crate::view::projection::{Comparator, Predicate, Projection};
use log::{debug, info, warn};
use thiserror::Error;

/// Recoverable failures surfaced to the command layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Index is outside the displayed list.
    #[error("the student index provided is invalid: {index} (displayed: {len})")]
    InvalidIndex { index: usize, len: usize },
    /// Edit descriptor has no field set.
    #[error("at least one field to edit must be provided")]
    NothingToEdit,
    /// Another stored student has the same name and phone.
    #[error("this student already exists in the address book")]
    DuplicatePerson,
    /// Requested lesson is already booked by other students.
    #[error(
        "you have a lesson at {lesson} with {}; repeat the edit to proceed anyway",
        join_names(.booked_with)
    )]
    DuplicateLesson {
        lesson: Lesson,
        booked_with: Vec<PersonKey>,
    },
    /// Target student is not stored.
    #[error("the student does not exist in the address book")]
    PersonNotFound,
    /// Same important date is already stored.
    #[error("this important date already exists in the dates book")]
    DuplicateImportantDate,
    /// Target important date is not stored.
    #[error("the important date does not exist in the dates book")]
    ImportantDateNotFound,
}

impl ModelError {
    /// Stable snake_case kind, for logs and programmatic callers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidIndex { .. } => "invalid_index",
            Self::NothingToEdit => "nothing_to_edit",
            Self::DuplicatePerson => "duplicate_person",
            Self::DuplicateLesson { .. } => "duplicate_lesson",
            Self::PersonNotFound => "person_not_found",
            Self::DuplicateImportantDate => "duplicate_important_date",
            Self::ImportantDateNotFound => "important_date_not_found",
        }
    }

    fn from_person_store(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => Self::DuplicatePerson,
            StoreError::NotFound => Self::PersonNotFound,
        }
    }

    fn from_date_store(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => Self::DuplicateImportantDate,
            StoreError::NotFound => Self::ImportantDateNotFound,
        }
    }
}

fn join_names(keys: &[PersonKey]) -> String {
    keys.iter()
        .map(|key| key.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type ModelResult<T> = Result<T, ModelError>;

/// An edit that hit a lesson conflict and awaits confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingLessonOverride {
    target: Person,
    descriptor: EditPersonDescriptor,
}

impl PendingLessonOverride {
    fn confirms(&self, target: &Person, descriptor: &EditPersonDescriptor) -> bool {
        self.target == *target && self.descriptor == *descriptor
    }
}

/// Single-owner model for one interactive session.
pub struct ModelManager {
    address_book: AddressBook,
    dates_book: DatesBook,
    persons_view: Projection<Person>,
    dates_view: Projection<ImportantDate>,
    lesson_index: LessonIndex,
    pending_lesson_override: Option<PendingLessonOverride>,
    selected_person: Option<Person>,
}

impl Default for ModelManager {
    fn default() -> Self {
        Self::new(AddressBook::new(), DatesBook::new())
    }
}

impl ModelManager {
    /// Creates a model over the given books, showing every record.
    pub fn new(address_book: AddressBook, dates_book: DatesBook) -> Self {
        info!(
            "event=model_init module=model status=ok persons={} dates={}",
            address_book.len(),
            dates_book.len()
        );
        let persons_view = Projection::new("persons", address_book.persons());
        let dates_view = Projection::new("dates", dates_book.important_dates());
        let lesson_index = LessonIndex::rebuild(address_book.persons());
        Self {
            address_book,
            dates_book,
            persons_view,
            dates_view,
            lesson_index,
            pending_lesson_override: None,
            selected_person: None,
        }
    }

    //=========== Address book =============================================

    pub fn address_book(&self) -> &AddressBook {
        &self.address_book
    }

    /// Replaces every student; rebuilds the lesson index and views.
    pub fn set_address_book(&mut self, address_book: &AddressBook) {
        self.address_book.reset_data(address_book);
        self.lesson_index = LessonIndex::rebuild(self.address_book.persons());
        self.selected_person = None;
        self.pending_lesson_override = None;
        self.persons_view.refresh(self.address_book.persons());
        info!(
            "event=address_book_reset module=model status=ok persons={}",
            self.address_book.len()
        );
    }

    pub fn has_person(&self, person: &Person) -> bool {
        self.address_book.has_person(person)
    }

    /// Adds a student and resets the displayed list to show everyone.
    pub fn add_person(&mut self, person: Person) -> ModelResult<()> {
        if self.address_book.has_person(&person) {
            return Err(self.reject("person_add", ModelError::DuplicatePerson));
        }
        if let Err(err) = self.address_book.add_person(person.clone()) {
            return Err(self.reject("person_add", ModelError::from_person_store(err)));
        }
        self.lesson_index.add_person(&person);
        self.persons_view.show_all(self.address_book.persons());
        info!(
            "event=person_add module=model status=ok persons={}",
            self.address_book.len()
        );
        Ok(())
    }

    /// Deletes the stored student equal to `target`.
    pub fn delete_person(&mut self, target: &Person) -> ModelResult<()> {
        let removed = match self.address_book.remove_person(target) {
            Ok(removed) => removed,
            Err(err) => return Err(self.reject("person_delete", ModelError::from_person_store(err))),
        };
        self.lesson_index.remove_person(&removed);
        if self.selected_person.as_ref() == Some(&removed) {
            self.selected_person = None;
        }
        self.persons_view.refresh(self.address_book.persons());
        info!(
            "event=person_delete module=model status=ok persons={}",
            self.address_book.len()
        );
        Ok(())
    }

    /// Replaces `target` with `edited` without lesson-conflict checks.
    pub fn set_person(&mut self, target: &Person, edited: Person) -> ModelResult<()> {
        if !target.is_same_person(&edited) && self.address_book.has_person(&edited) {
            return Err(self.reject("person_set", ModelError::DuplicatePerson));
        }
        if let Err(err) = self.address_book.set_person(target, edited.clone()) {
            return Err(self.reject("person_set", ModelError::from_person_store(err)));
        }
        self.replace_bookings(target, &edited);
        self.persons_view.refresh(self.address_book.persons());
        Ok(())
    }

    /// Edits the displayed student at zero-based `index`.
    ///
    /// # Errors
    /// - `NothingToEdit` when `descriptor` sets no field.
    /// - `InvalidIndex` when `index` is outside the displayed list.
    /// - `DuplicatePerson` when the new name/phone belongs to another student.
    /// - `DuplicateLesson` when a lesson is booked by someone else. The edit
    ///   is remembered, and repeating exactly this edit on the same student
    ///   confirms it.
    pub fn apply_edit(&mut self, index: usize, descriptor: &EditPersonDescriptor) -> ModelResult<Person> {
        let pending = self.pending_lesson_override.take();
        if !descriptor.is_any_field_edited() {
            return Err(self.reject("person_edit", ModelError::NothingToEdit));
        }
        let person_to_edit = match self.person_at(index) {
            Ok(person) => person.clone(),
            Err(err) => return Err(self.reject("person_edit", err)),
        };
        let edited = descriptor.apply_to(&person_to_edit);

        if !person_to_edit.is_same_person(&edited) && self.address_book.has_person(&edited) {
            return Err(self.reject("person_edit", ModelError::DuplicatePerson));
        }

        let confirmed =
            pending.is_some_and(|pending| pending.confirms(&person_to_edit, descriptor));
        if !confirmed {
            if let Some(conflict) = self
                .lesson_index
                .find_conflict(Some(&person_to_edit), edited.lessons())
            {
                self.pending_lesson_override = Some(PendingLessonOverride {
                    target: person_to_edit,
                    descriptor: descriptor.clone(),
                });
                return Err(self.reject(
                    "person_edit",
                    ModelError::DuplicateLesson {
                        lesson: conflict.lesson,
                        booked_with: conflict.booked_with,
                    },
                ));
            }
        }

        if let Err(err) = self.address_book.set_person(&person_to_edit, edited.clone()) {
            return Err(self.reject("person_edit", ModelError::from_person_store(err)));
        }
        self.replace_bookings(&person_to_edit, &edited);
        self.persons_view.show_all(self.address_book.persons());
        info!(
            "event=person_edit module=model status=ok index={} lessons={}",
            index,
            edited.lessons().len()
        );
        Ok(edited)
    }

    /// Moves every student one level up. See [`Self::level_down_all`].
    pub fn level_up_all(&mut self) -> ModelResult<LevelShiftOutcome> {
        self.shift_all_levels(LevelDirection::Up)
    }

    /// Moves every student one level down.
    ///
    /// Students without a level, or already at the lowest level, are left
    /// unchanged and listed in the outcome.
    pub fn level_down_all(&mut self) -> ModelResult<LevelShiftOutcome> {
        self.shift_all_levels(LevelDirection::Down)
    }

    fn shift_all_levels(&mut self, direction: LevelDirection) -> ModelResult<LevelShiftOutcome> {
        let outcome = level_policy::apply_to_all(self.address_book.persons(), direction);
        self.address_book
            .set_persons(outcome.persons.clone())
            .map_err(ModelError::from_person_store)?;
        if let Some(selected) = self.selected_person.take() {
            self.selected_person = self
                .address_book
                .persons()
                .iter()
                .find(|person| person.is_same_person(&selected))
                .cloned();
        }
        self.persons_view.refresh(self.address_book.persons());
        info!(
            "event=level_shift module=model status=ok direction={} shifted={} without_level={} at_boundary={}",
            direction.as_str(),
            outcome.shifted,
            outcome.without_level.len(),
            outcome.at_boundary.len()
        );
        Ok(outcome)
    }

    //=========== Lesson index =============================================

    pub fn has_lesson(&self, lesson: &Lesson) -> bool {
        self.lesson_index.has_lesson(lesson)
    }

    pub fn lesson_slot(&self, lesson: &Lesson) -> Option<&LessonSlot> {
        self.lesson_index.slot(lesson)
    }

    pub fn lesson_index(&self) -> &LessonIndex {
        &self.lesson_index
    }

    /// Whether an edit is waiting for lesson-conflict confirmation.
    pub fn is_lesson_override_armed(&self) -> bool {
        self.pending_lesson_override.is_some()
    }

    /// Pre-confirms lesson conflicts for one specific edit.
    ///
    /// Only `apply_edit(index, descriptor)` on the student currently shown at
    /// `index` skips the conflict check; any other edit withdraws it.
    pub fn arm_lesson_override(
        &mut self,
        index: usize,
        descriptor: &EditPersonDescriptor,
    ) -> ModelResult<()> {
        let target = self.person_at(index)?.clone();
        self.pending_lesson_override = Some(PendingLessonOverride {
            target,
            descriptor: descriptor.clone(),
        });
        Ok(())
    }

    /// Withdraws a pending confirmation (the user declined the conflict).
    pub fn clear_lesson_override(&mut self) {
        self.pending_lesson_override = None;
    }

    fn replace_bookings(&mut self, previous: &Person, current: &Person) {
        self.lesson_index.remove_person(previous);
        self.lesson_index.add_person(current);
        if self
            .selected_person
            .as_ref()
            .is_some_and(|selected| selected == previous)
        {
            self.selected_person = Some(current.clone());
        }
    }

    //=========== Person views =============================================

    /// Displayed students: filter, then sort.
    pub fn transformed_persons(&self) -> &[Person] {
        self.persons_view.transformed()
    }

    pub fn filtered_persons(&self) -> &[Person] {
        self.persons_view.filtered()
    }

    pub fn sorted_persons(&self) -> &[Person] {
        self.persons_view.sorted()
    }

    /// Displayed student at zero-based `index`.
    pub fn person_at(&self, index: usize) -> ModelResult<&Person> {
        let shown = self.persons_view.transformed();
        shown.get(index).ok_or(ModelError::InvalidIndex {
            index,
            len: shown.len(),
        })
    }

    pub fn update_filtered_person_list(&mut self, predicate: impl Predicate<Person> + 'static) {
        self.persons_view
            .update_filtered(self.address_book.persons(), predicate);
    }

    pub fn update_sorted_person_list(&mut self, comparator: impl Comparator<Person> + 'static) {
        self.persons_view
            .update_sorted(self.address_book.persons(), comparator);
    }

    pub fn filter_then_sort_person_list(
        &mut self,
        predicate: impl Predicate<Person> + 'static,
        comparator: impl Comparator<Person> + 'static,
    ) {
        self.persons_view
            .filter_then_sort(self.address_book.persons(), predicate, comparator);
    }

    pub fn show_all_persons(&mut self) {
        self.persons_view.show_all(self.address_book.persons());
    }

    /// Restores canonical order; the active filter stays.
    pub fn clear_person_sort(&mut self) {
        self.persons_view.clear_sort(self.address_book.persons());
    }

    /// Marks the displayed student at `index` as the detail-panel target.
    pub fn select_person(&mut self, index: usize) -> ModelResult<&Person> {
        let person = self.person_at(index)?.clone();
        debug!("event=person_select module=model status=ok index={index}");
        Ok(self.selected_person.insert(person))
    }

    pub fn selected_person(&self) -> Option<&Person> {
        self.selected_person.as_ref()
    }

    //=========== Dates book ===============================================

    pub fn dates_book(&self) -> &DatesBook {
        &self.dates_book
    }

    pub fn set_dates_book(&mut self, dates_book: &DatesBook) {
        self.dates_book.reset_data(dates_book);
        self.dates_view.refresh(self.dates_book.important_dates());
        info!(
            "event=dates_book_reset module=model status=ok dates={}",
            self.dates_book.len()
        );
    }

    pub fn has_important_date(&self, date: &ImportantDate) -> bool {
        self.dates_book.has_important_date(date)
    }

    /// Adds an important date and resets the displayed dates to show all.
    pub fn add_important_date(&mut self, date: ImportantDate) -> ModelResult<()> {
        if let Err(err) = self.dates_book.add_important_date(date) {
            return Err(self.reject("date_add", ModelError::from_date_store(err)));
        }
        self.dates_view.show_all(self.dates_book.important_dates());
        info!(
            "event=date_add module=model status=ok dates={}",
            self.dates_book.len()
        );
        Ok(())
    }

    pub fn delete_important_date(&mut self, target: &ImportantDate) -> ModelResult<()> {
        if let Err(err) = self.dates_book.remove_important_date(target) {
            return Err(self.reject("date_delete", ModelError::from_date_store(err)));
        }
        self.dates_view.show_all(self.dates_book.important_dates());
        info!(
            "event=date_delete module=model status=ok dates={}",
            self.dates_book.len()
        );
        Ok(())
    }

    //=========== Important date views =====================================

    pub fn transformed_dates(&self) -> &[ImportantDate] {
        self.dates_view.transformed()
    }

    pub fn filtered_dates(&self) -> &[ImportantDate] {
        self.dates_view.filtered()
    }

    pub fn sorted_dates(&self) -> &[ImportantDate] {
        self.dates_view.sorted()
    }

    pub fn important_date_at(&self, index: usize) -> ModelResult<&ImportantDate> {
        let shown = self.dates_view.transformed();
        shown.get(index).ok_or(ModelError::InvalidIndex {
            index,
            len: shown.len(),
        })
    }

    pub fn update_filtered_dates_list(&mut self, predicate: impl Predicate<ImportantDate> + 'static) {
        self.dates_view
            .update_filtered(self.dates_book.important_dates(), predicate);
    }

    pub fn update_sorted_dates_list(&mut self, comparator: impl Comparator<ImportantDate> + 'static) {
        self.dates_view
            .update_sorted(self.dates_book.important_dates(), comparator);
    }

    pub fn filter_then_sort_dates_list(
        &mut self,
        predicate: impl Predicate<ImportantDate> + 'static,
        comparator: impl Comparator<ImportantDate> + 'static,
    ) {
        self.dates_view
            .filter_then_sort(self.dates_book.important_dates(), predicate, comparator);
    }

    fn reject(&self, event: &str, err: ModelError) -> ModelError {
        warn!(
            "event={event} module=model status=rejected error_code={}",
            err.code()
        );
        err
    }
}

#[cfg(test)]
mod tests {
    use super::{ModelError, ModelManager};
    use crate::book::AddressBook;
    use crate::book::DatesBook;
    use crate::model::fields::{Name, Phone};
    use crate::model::lesson::Lesson;
    use crate::model::person::Person;

    fn student(name: &str, phone: &str) -> Person {
        Person::builder(Name::new(name).unwrap(), Phone::new(phone).unwrap()).build()
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(ModelError::NothingToEdit.code(), "nothing_to_edit");
        assert_eq!(
            ModelError::InvalidIndex { index: 4, len: 3 }.code(),
            "invalid_index"
        );
    }

    #[test]
    fn duplicate_lesson_message_names_students() {
        let err = ModelError::DuplicateLesson {
            lesson: Lesson::new("monday 1400").unwrap(),
            booked_with: vec![student("Alice", "111").key(), student("Bob", "222").key()],
        };
        assert!(err.to_string().contains("monday 1400 with Alice, Bob"));
    }

    #[test]
    fn delete_clears_selection_of_removed_student() {
        let alice = student("Alice", "111");
        let book = AddressBook::from_persons(vec![alice.clone()]).unwrap();
        let mut model = ModelManager::new(book, DatesBook::new());
        model.select_person(0).unwrap();
        model.delete_person(&alice).unwrap();
        assert!(model.selected_person().is_none());
        assert_eq!(model.delete_person(&alice), Err(ModelError::PersonNotFound));
    }
}
