use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A scheduled section within one term's offering, unique per
/// (term, section)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course_classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub course_id: Uuid,
    pub term: String,
    /// Section code, the long registrar class number
    pub section: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(has_many = "super::time_locations::Entity")]
    TimeLocations,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::time_locations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TimeLocations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
