use models::schedule::MeetingSlot;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A recurring weekly slot of one class section
///
/// Destroyed with its owning class. The course id is denormalized next to the
/// class id to make course-level queries cheap.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "time_locations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub course_id: Uuid,
    pub class_id: Uuid,
    pub weekday: Option<i32>,
    pub begin_hour: Option<i32>,
    pub num_hours: Option<i32>,
    pub location: Option<String>,
    pub note: Option<String>,
}

impl Model {
    /// Value view with the absent-propagating display helpers
    pub fn slot(&self) -> MeetingSlot {
        MeetingSlot {
            weekday: self.weekday,
            begin_hour: self.begin_hour,
            num_hours: self.num_hours,
            location: self.location.clone(),
            note: self.note.clone(),
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
    #[sea_orm(
        belongs_to = "super::course_classes::Entity",
        from = "Column::ClassId",
        to = "super::course_classes::Column::Id"
    )]
    Class,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::course_classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
