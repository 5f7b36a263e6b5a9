use crate::{
    entities::{
        course_classes, course_rates, course_terms, courses, departments, teachers,
        time_locations,
    },
    services::rating::{RatingService, RatingSummary},
};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// The descriptive attributes a course exposes from its most recent offering
///
/// One total rule with no per-field exceptions: every value is the latest
/// term's, and every value is absent when the course has no terms yet.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CourseProfile {
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

impl CourseProfile {
    pub fn from_latest_term(latest: Option<&course_terms::Model>) -> Self {
        let Some(term) = latest else {
            return Self::default();
        };
        Self {
            term: Some(term.term.clone()),
            courseries: term.courseries.clone(),
            catalog_id: term.catalog_id,
            course_major: term.course_major.clone(),
            course_type: term.course_type.clone(),
            course_level: term.course_level.clone(),
            grading_type: term.grading_type.clone(),
            teaching_material: term.teaching_material.clone(),
            reference_material: term.reference_material.clone(),
            student_requirements: term.student_requirements.clone(),
            description: term.description.clone(),
            description_eng: term.description_eng.clone(),
            introduction: term.introduction.clone(),
            homepage: term.homepage.clone(),
            credit: term.credit,
            hours: term.hours,
            hours_per_week: term.hours_per_week,
            class_numbers: term.class_numbers.clone(),
            campus: term.campus.clone(),
            start_week: term.start_week,
            end_week: term.end_week,
        }
    }
}

/// One course with everything a detail view needs
#[derive(Debug, Clone)]
pub struct CourseDetail {
    pub course: courses::Model,
    pub department: Option<departments::Model>,
    /// Most recent term first
    pub terms: Vec<course_terms::Model>,
    pub classes: Vec<(course_classes::Model, Vec<time_locations::Model>)>,
    /// Ordered by teacher id; the first entry is the primary teacher
    pub teachers: Vec<teachers::Model>,
    pub rating: course_rates::Model,
}

impl CourseDetail {
    fn new(
        course: courses::Model,
        department: Option<departments::Model>,
        mut terms: Vec<course_terms::Model>,
        classes: Vec<(course_classes::Model, Vec<time_locations::Model>)>,
        teachers: Vec<teachers::Model>,
        rating: course_rates::Model,
    ) -> Self {
        // Chronological order comes from the parsed term codes; a code that
        // fails to parse falls back to raw string order
        terms.sort_by(|a, b| match (a.term_code(), b.term_code()) {
            (Ok(code_a), Ok(code_b)) => code_b.cmp(&code_a),
            _ => b.term.cmp(&a.term),
        });
        Self {
            course,
            department,
            terms,
            classes,
            teachers,
            rating,
        }
    }

    /// The term with the greatest code, re-derived from the fetched terms
    pub fn latest_term(&self) -> Option<&course_terms::Model> {
        self.terms.first()
    }

    /// The delegated descriptive attributes (absent without any term)
    pub fn profile(&self) -> CourseProfile {
        CourseProfile::from_latest_term(self.latest_term())
    }

    pub fn primary_teacher(&self) -> Option<&teachers::Model> {
        self.teachers.first()
    }

    pub fn rating_summary(&self) -> RatingSummary {
        RatingSummary::from(&self.rating)
    }
}

pub struct CourseService;

impl CourseService {
    /// Query courses with pagination and filtering
    pub async fn get_courses_paginated(
        db: &DatabaseConnection,
        page: u64,
        per_page: u64,
        search: Option<String>,
        courseries: Option<String>,
        departments: Option<Vec<Uuid>>,
    ) -> Result<(Vec<courses::Model>, u64), DbErr> {
        let mut condition = Condition::all();

        if let Some(search) = search
            && !search.is_empty()
        {
            condition = condition.add(courses::Column::Name.like(format!("%{search}%")));
        }

        if let Some(departments) = departments
            && !departments.is_empty()
        {
            condition = condition.add(courses::Column::DeptId.is_in(departments));
        }

        // The series number lives on the term offerings, so resolve it to
        // course ids first
        if let Some(courseries) = courseries
            && !courseries.is_empty()
        {
            let course_ids: Vec<Uuid> = course_terms::Entity::find()
                .filter(course_terms::Column::Courseries.eq(courseries))
                .all(db)
                .await?
                .into_iter()
                .map(|term| term.course_id)
                .collect();
            condition = condition.add(courses::Column::Id.is_in(course_ids));
        }

        let query = courses::Entity::find()
            .filter(condition)
            .order_by_asc(courses::Column::Name);

        let total_items = query.clone().count(db).await?;
        let paginator = query.paginate(db, per_page);
        let courses = paginator.fetch_page(page.saturating_sub(1)).await?; // SeaORM uses 0-based pages

        Ok((courses, total_items))
    }

    /// Get a single course with its terms, classes, teachers and rating
    ///
    /// The rating aggregate is created on first read if the course has never
    /// been rated; the latest term is re-resolved on every call rather than
    /// cached.
    pub async fn get_course_by_id(
        db: &DatabaseConnection,
        course_id: Uuid,
    ) -> Result<Option<CourseDetail>, DbErr> {
        let course = match courses::Entity::find_by_id(course_id).one(db).await? {
            Some(course) => course,
            None => return Ok(None),
        };

        let (terms, classes, slots, teachers) = futures::try_join!(
            course_terms::Entity::find()
                .filter(course_terms::Column::CourseId.eq(course_id))
                .order_by_desc(course_terms::Column::Term)
                .all(db),
            course_classes::Entity::find()
                .filter(course_classes::Column::CourseId.eq(course_id))
                .order_by_desc(course_classes::Column::Term)
                .all(db),
            time_locations::Entity::find()
                .filter(time_locations::Column::CourseId.eq(course_id))
                .all(db),
            course
                .find_related(teachers::Entity)
                .order_by_asc(teachers::Column::Id)
                .all(db),
        )?;

        // Group the weekly slots under their class
        let mut slots_by_class: HashMap<Uuid, Vec<time_locations::Model>> = HashMap::new();
        for slot in slots {
            slots_by_class.entry(slot.class_id).or_default().push(slot);
        }
        let classes = classes
            .into_iter()
            .map(|class| {
                let class_slots = slots_by_class.remove(&class.id).unwrap_or_default();
                (class, class_slots)
            })
            .collect();

        let department = match course.dept_id {
            Some(dept_id) => departments::Entity::find_by_id(dept_id).one(db).await?,
            None => None,
        };

        let rating = RatingService::get_or_create(db, course_id).await?;

        Ok(Some(CourseDetail::new(
            course, department, terms, classes, teachers, rating,
        )))
    }

    /// Courses sharing this course's name (other offerings by other teachers)
    pub async fn related_courses(
        db: &DatabaseConnection,
        name: &str,
    ) -> Result<Vec<courses::Model>, DbErr> {
        courses::Entity::find()
            .filter(courses::Column::Name.eq(name))
            .all(db)
            .await
    }

    /// Courses whose offerings share a series number
    pub async fn history_courses(
        db: &DatabaseConnection,
        courseries: &str,
    ) -> Result<Vec<courses::Model>, DbErr> {
        let course_ids: Vec<Uuid> = course_terms::Entity::find()
            .filter(course_terms::Column::Courseries.eq(courseries))
            .all(db)
            .await?
            .into_iter()
            .map(|term| term.course_id)
            .collect();

        if course_ids.is_empty() {
            return Ok(vec![]);
        }

        courses::Entity::find()
            .filter(courses::Column::Id.is_in(course_ids))
            .all(db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::prelude::DateTime;

    fn term(course_id: Uuid, code: &str, campus: &str, credit: i32) -> course_terms::Model {
        course_terms::Model {
            id: Uuid::new_v4(),
            course_id,
            term: code.to_string(),
            courseries: Some(format!("SE{code}")),
            catalog_id: Some(42),
            course_major: Some("CS".to_string()),
            course_type: Some("required".to_string()),
            course_level: Some("undergraduate".to_string()),
            grading_type: Some("letter".to_string()),
            teaching_material: Some("textbook".to_string()),
            reference_material: Some("references".to_string()),
            student_requirements: Some("none".to_string()),
            description: Some(format!("description for {code}")),
            description_eng: Some("english".to_string()),
            introduction: Some("intro".to_string()),
            homepage: Some("https://example.edu".to_string()),
            credit: Some(credit),
            hours: Some(40),
            hours_per_week: Some(4),
            class_numbers: Some("1,2".to_string()),
            campus: Some(campus.to_string()),
            start_week: Some(1),
            end_week: Some(16),
        }
    }

    fn detail_with_terms(terms: Vec<course_terms::Model>) -> CourseDetail {
        let course_id = terms
            .first()
            .map(|t| t.course_id)
            .unwrap_or_else(Uuid::new_v4);
        CourseDetail::new(
            courses::Model {
                id: course_id,
                name: "Operating Systems".to_string(),
                dept_id: None,
                created_at: DateTime::default(),
                updated_at: DateTime::default(),
            },
            None,
            terms,
            vec![],
            vec![],
            course_rates::Model {
                course_id,
                difficulty_total: 0,
                homework_total: 0,
                grading_total: 0,
                gain_total: 0,
                rate_total: 0,
                review_count: 0,
                upvote_count: 0,
                downvote_count: 0,
                follow_count: 0,
                join_count: 0,
            },
        )
    }

    #[test]
    fn test_latest_term_picks_greatest_code() {
        let course_id = Uuid::new_v4();
        // deliberately out of order; the constructor re-sorts
        let detail = detail_with_terms(vec![
            term(course_id, "20141", "East", 3),
            term(course_id, "20142", "West", 4),
        ]);
        assert_eq!(detail.latest_term().unwrap().term, "20142");
    }

    #[test]
    fn test_latest_term_ordering_uses_parsed_codes() {
        let course_id = Uuid::new_v4();
        let detail = detail_with_terms(vec![
            term(course_id, "20142", "East", 3),
            term(course_id, "20151", "West", 4),
        ]);

        let latest = detail.latest_term().unwrap();
        assert_eq!(latest.term, "20151");

        let code = latest.term_code().unwrap();
        assert_eq!(code.year(), 2015);
        assert_eq!(code.semester(), 1);
    }

    #[test]
    fn test_profile_delegates_every_field_to_latest_term() {
        let course_id = Uuid::new_v4();
        let latest = term(course_id, "20142", "West", 4);
        let detail = detail_with_terms(vec![term(course_id, "20141", "East", 3), latest.clone()]);

        let profile = detail.profile();
        assert_eq!(profile, CourseProfile::from_latest_term(Some(&latest)));
        assert_eq!(profile.term.as_deref(), Some("20142"));
        assert_eq!(profile.courseries.as_deref(), Some("SE20142"));
        assert_eq!(profile.campus.as_deref(), Some("West"));
        assert_eq!(profile.credit, Some(4));
        assert_eq!(profile.description.as_deref(), Some("description for 20142"));
        assert_eq!(profile.start_week, Some(1));
        assert_eq!(profile.end_week, Some(16));
    }

    #[test]
    fn test_profile_is_absent_without_terms() {
        let detail = detail_with_terms(vec![]);
        assert!(detail.latest_term().is_none());
        assert_eq!(detail.profile(), CourseProfile::default());
    }
}
