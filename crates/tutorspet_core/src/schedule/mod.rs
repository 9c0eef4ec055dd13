//! Weekly lesson bookings derived from student records.

pub mod lesson_index;
