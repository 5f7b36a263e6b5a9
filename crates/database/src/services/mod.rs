pub mod course;
pub mod membership;
pub mod rating;
pub mod review;
pub mod user;
