use models::rating::RatingTally;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-course running rating statistics and social counters
///
/// One-to-one with courses, inserted lazily on first access. The four
/// relation counters are denormalized and must always equal the cardinality
/// of their membership table; they are only ever moved together with the
/// membership row, inside one transaction, as store-native increments.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course_rates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub course_id: Uuid,
    pub difficulty_total: i64,
    pub homework_total: i64,
    pub grading_total: i64,
    pub gain_total: i64,
    pub rate_total: i64,
    pub review_count: i64,
    pub upvote_count: i64,
    pub downvote_count: i64,
    pub follow_count: i64,
    pub join_count: i64,
}

impl Model {
    /// The pure tally the derived rating views are computed from
    pub fn tally(&self) -> RatingTally {
        RatingTally {
            difficulty_total: self.difficulty_total,
            homework_total: self.homework_total,
            grading_total: self.grading_total,
            gain_total: self.gain_total,
            rate_total: self.rate_total,
            review_count: self.review_count,
        }
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
