use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A named subject offered across one or more terms
///
/// Names are not unique; the same subject taught by different teachers is a
/// different course row. Descriptive metadata lives on the term offerings and
/// is exposed through the latest-term delegation in the course service.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub name: String,
    /// Weak reference; the department does not own the course
    pub dept_id: Option<Uuid>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DeptId",
        to = "super::departments::Column::Id"
    )]
    Department,
    #[sea_orm(has_many = "super::course_terms::Entity")]
    Terms,
    #[sea_orm(has_many = "super::course_classes::Entity")]
    Classes,
    #[sea_orm(has_many = "super::reviews::Entity")]
    Reviews,
    #[sea_orm(has_one = "super::course_rates::Entity")]
    Rate,
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::course_terms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Terms.def()
    }
}

impl Related<super::course_classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classes.def()
    }
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::course_rates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rate.def()
    }
}

// Many-to-many relationship with teachers
impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        super::course_teachers::Relation::Teacher.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::course_teachers::Relation::Course.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
