pub mod class_students;
pub mod course_classes;
pub mod course_downvotes;
pub mod course_followers;
pub mod course_rates;
pub mod course_teachers;
pub mod course_terms;
pub mod course_upvotes;
pub mod courses;
pub mod departments;
pub mod reviews;
pub mod teachers;
pub mod time_locations;
pub mod users;
