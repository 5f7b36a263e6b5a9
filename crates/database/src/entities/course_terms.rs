use models::term::{ParseTermCodeError, TermCode};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One academic-period offering of a course
///
/// Carries all of the period's descriptive metadata. A course exposes these
/// fields by delegating to its most recent term (see the course service), so
/// every column here except the keys is nullable. Unique per
/// (course_id, term).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course_terms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub course_id: Uuid,
    /// Term code, e.g. "20142" is the spring semester of 2015
    pub term: String,
    /// Course series number, the short human-facing code
    pub courseries: Option<String>,
    /// Registrar's internal catalog id
    pub catalog_id: Option<i32>,
    pub course_major: Option<String>,
    pub course_type: Option<String>,
    pub course_level: Option<String>,
    pub grading_type: Option<String>,
    pub teaching_material: Option<String>,
    pub reference_material: Option<String>,
    pub student_requirements: Option<String>,
    /// Registrar's course description
    pub description: Option<String>,
    pub description_eng: Option<String>,
    /// Teacher-submitted introduction
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

impl Model {
    /// The stored code as an ordered value; offerings compare
    /// chronologically through it
    pub fn term_code(&self) -> Result<TermCode, ParseTermCodeError> {
        self.term.parse()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
