use chrono::NaiveDateTime;
use database::entities::reviews;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReviewRequest {
    /// 1 (easy) to 3 (hard)
    pub difficulty: i32,
    /// 1 (light) to 3 (heavy)
    pub homework: i32,
    /// 1 (lenient) to 3 (harsh)
    pub grading: i32,
    /// 1 (high) to 3 (low)
    pub gain: i32,
    /// Overall rate, 1 to 5
    pub rate: i32,
    pub title: Option<String>,
    pub content: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewResponse {
    pub id: String,
    pub course_id: String,
    pub difficulty: i32,
    pub homework: i32,
    pub grading: i32,
    pub gain: i32,
    pub rate: i32,
    pub title: Option<String>,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<reviews::Model> for ReviewResponse {
    fn from(model: reviews::Model) -> Self {
        Self {
            id: model.id.to_string(),
            course_id: model.course_id.to_string(),
            difficulty: model.difficulty,
            homework: model.homework,
            grading: model.grading,
            gain: model.gain,
            rate: model.rate,
            title: model.title,
            content: model.content,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChangedResponse {
    pub changed: bool,
}
