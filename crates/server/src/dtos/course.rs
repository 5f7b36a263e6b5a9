use database::services::{course::CourseProfile, membership::SocialState, rating::RatingSummary};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseSummaryResponse {
    pub id: String,
    pub name: String,
    pub dept_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseResponse {
    pub id: String,
    pub name: String,
    pub department: Option<String>,
    /// Attributes delegated from the most recent term; all absent when the
    /// course has no terms
    pub profile: CourseProfileResponse,
    /// Term codes, most recent first
    pub terms: Vec<String>,
    /// Ordered by teacher id; the first one is the primary teacher
    pub teachers: Vec<TeacherResponse>,
    pub classes: Vec<ClassResponse>,
    pub rating: RatingResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseProfileResponse {
    pub term: Option<String>,
    pub courseries: Option<String>,
    pub catalog_id: Option<i32>,
    pub course_major: Option<String>,
    pub course_type: Option<String>,
    pub course_level: Option<String>,
    pub grading_type: Option<String>,
    pub teaching_material: Option<String>,
    pub reference_material: Option<String>,
    pub student_requirements: Option<String>,
    pub description: Option<String>,
    pub description_eng: Option<String>,
    pub introduction: Option<String>,
    pub homepage: Option<String>,
    pub credit: Option<i32>,
    pub hours: Option<i32>,
    pub hours_per_week: Option<i32>,
    pub class_numbers: Option<String>,
    pub campus: Option<String>,
    pub start_week: Option<i32>,
    pub end_week: Option<i32>,
}

impl From<CourseProfile> for CourseProfileResponse {
    fn from(profile: CourseProfile) -> Self {
        Self {
            term: profile.term,
            courseries: profile.courseries,
            catalog_id: profile.catalog_id,
            course_major: profile.course_major,
            course_type: profile.course_type,
            course_level: profile.course_level,
            grading_type: profile.grading_type,
            teaching_material: profile.teaching_material,
            reference_material: profile.reference_material,
            student_requirements: profile.student_requirements,
            description: profile.description,
            description_eng: profile.description_eng,
            introduction: profile.introduction,
            homepage: profile.homepage,
            credit: profile.credit,
            hours: profile.hours,
            hours_per_week: profile.hours_per_week,
            class_numbers: profile.class_numbers,
            campus: profile.campus,
            start_week: profile.start_week,
            end_week: profile.end_week,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClassResponse {
    pub id: String,
    pub term: String,
    pub section: String,
    pub time_locations: Vec<TimeLocationResponse>,
    /// All slots joined, e.g. "A101: 1(3,4); B2: 5(9)"
    pub schedule: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TimeLocationResponse {
    pub weekday: Option<i32>,
    pub begin_hour: Option<i32>,
    pub num_hours: Option<i32>,
    pub location: Option<String>,
    pub note: Option<String>,
    /// "room: weekday(h1,h2,...)", absent when any part is missing
    pub display: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RatingResponse {
    pub review_count: i64,
    /// "easy" / "medium" / "hard", absent without reviews
    pub difficulty: Option<String>,
    /// "light" / "moderate" / "heavy", absent without reviews
    pub homework: Option<String>,
    /// "lenient" / "fair" / "harsh", absent without reviews
    pub grading: Option<String>,
    /// "high" / "moderate" / "low", absent without reviews
    pub gain: Option<String>,
    /// One decimal place, e.g. "4.3", absent without reviews
    pub average_rate: Option<String>,
    pub upvote_count: i64,
    pub downvote_count: i64,
    pub follow_count: i64,
    pub join_count: i64,
}

impl From<RatingSummary> for RatingResponse {
    fn from(summary: RatingSummary) -> Self {
        Self {
            review_count: summary.review_count,
            difficulty: summary.difficulty.map(|bucket| bucket.to_string()),
            homework: summary.homework.map(|bucket| bucket.to_string()),
            grading: summary.grading.map(|bucket| bucket.to_string()),
            gain: summary.gain.map(|bucket| bucket.to_string()),
            average_rate: summary.average_rate.map(|rate| rate.to_string()),
            upvote_count: summary.upvote_count,
            downvote_count: summary.downvote_count,
            follow_count: summary.follow_count,
            join_count: summary.join_count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ViewerResponse {
    pub following: bool,
    pub upvoted: bool,
    pub downvoted: bool,
    pub joined: bool,
    pub reviewed: bool,
}

impl ViewerResponse {
    pub fn new(state: SocialState, reviewed: bool) -> Self {
        Self {
            following: state.following,
            upvoted: state.upvoted,
            downvoted: state.downvoted,
            joined: state.joined,
            reviewed,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedCoursesResponse {
    pub courses: Vec<CourseSummaryResponse>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    /// A zero page size would divide by zero below, so it is lifted to 1
    pub fn new(page: u64, per_page: u64, total_items: u64) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total_items.div_ceil(per_page);
        Self {
            page,
            per_page,
            total_pages,
            total_items,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct CourseQueryParams {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,

    pub search: Option<String>,
    pub courseries: Option<String>,
    pub department: Option<Vec<Uuid>>,
}

impl CourseQueryParams {
    /// The page size actually used; callers can put `per_page=0` on the
    /// query string, which must not reach the pagination arithmetic
    pub fn effective_per_page(&self) -> u64 {
        self.per_page.max(1)
    }
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    20
}

/// Counter state reported back from a toggle operation
#[derive(Debug, Serialize, ToSchema)]
pub struct ToggleResponse {
    /// False when the toggle was already in the requested state
    pub changed: bool,
    /// The paired counter after the operation
    pub count: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct JoinRequest {
    /// The class section to enroll into; must belong to the course
    pub class_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_per_page_is_lifted_to_one() {
        let params = CourseQueryParams {
            page: 1,
            per_page: 0,
            search: None,
            courseries: None,
            department: None,
        };
        assert_eq!(params.effective_per_page(), 1);

        let meta = PaginationMeta::new(1, 0, 5);
        assert_eq!(meta.per_page, 1);
        assert_eq!(meta.total_pages, 5);
    }

    #[test]
    fn test_pagination_meta() {
        let meta = PaginationMeta::new(2, 20, 45);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next);
        assert!(meta.has_prev);

        let first = PaginationMeta::new(1, 20, 10);
        assert_eq!(first.total_pages, 1);
        assert!(!first.has_next);
        assert!(!first.has_prev);
    }
}
