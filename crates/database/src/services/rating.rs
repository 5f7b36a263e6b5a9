use crate::entities::course_rates;
use models::rating::{AverageRate, Difficulty, Gain, Grading, Homework, ReviewScores};
use sea_orm::{
    ActiveValue::Set,
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    sea_query::{Expr, OnConflict},
};
use serde::Serialize;
use uuid::Uuid;

/// Read-side view of one course's rating aggregate
///
/// The categorical fields and the average are derived from the running sums
/// and are absent exactly when the course has no reviews.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RatingSummary {
    pub review_count: i64,
    pub difficulty: Option<Difficulty>,
    pub homework: Option<Homework>,
    pub grading: Option<Grading>,
    pub gain: Option<Gain>,
    pub average_rate: Option<AverageRate>,
    pub upvote_count: i64,
    pub downvote_count: i64,
    pub follow_count: i64,
    pub join_count: i64,
}

impl From<&course_rates::Model> for RatingSummary {
    fn from(model: &course_rates::Model) -> Self {
        let tally = model.tally();
        Self {
            review_count: tally.review_count,
            difficulty: tally.difficulty(),
            homework: tally.homework(),
            grading: tally.grading(),
            gain: tally.gain(),
            average_rate: tally.average_rate(),
            upvote_count: model.upvote_count,
            downvote_count: model.downvote_count,
            follow_count: model.follow_count,
            join_count: model.join_count,
        }
    }
}

pub struct RatingService;

impl RatingService {
    /// Fetch the aggregate row for a course, inserting the zeroed row on
    /// first access
    pub async fn get_or_create<C: ConnectionTrait>(
        conn: &C,
        course_id: Uuid,
    ) -> Result<course_rates::Model, DbErr> {
        if let Some(model) = course_rates::Entity::find_by_id(course_id).one(conn).await? {
            return Ok(model);
        }

        // Two concurrent first reads can both attempt the insert; the loser
        // hits the primary key conflict and falls through to the re-fetch.
        let row = course_rates::ActiveModel {
            course_id: Set(course_id),
            ..Default::default()
        };
        course_rates::Entity::insert(row)
            .on_conflict(
                OnConflict::column(course_rates::Column::CourseId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await?;

        course_rates::Entity::find_by_id(course_id)
            .one(conn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("course_rates for {course_id}")))
    }

    /// Fold one review's scores into the running sums
    pub async fn apply_scores<C: ConnectionTrait>(
        conn: &C,
        course_id: Uuid,
        scores: &ReviewScores,
    ) -> Result<(), DbErr> {
        Self::shift_scores(conn, course_id, scores, 1).await
    }

    /// Remove one previously applied review's scores from the running sums
    pub async fn revert_scores<C: ConnectionTrait>(
        conn: &C,
        course_id: Uuid,
        scores: &ReviewScores,
    ) -> Result<(), DbErr> {
        Self::shift_scores(conn, course_id, scores, -1).await
    }

    // Store-native increments, not read-modify-write: concurrent reviews of
    // the same course must not lose updates.
    async fn shift_scores<C: ConnectionTrait>(
        conn: &C,
        course_id: Uuid,
        scores: &ReviewScores,
        sign: i64,
    ) -> Result<(), DbErr> {
        use course_rates::Column;

        Self::get_or_create(conn, course_id).await?;

        course_rates::Entity::update_many()
            .col_expr(
                Column::ReviewCount,
                Expr::col(Column::ReviewCount).add(sign),
            )
            .col_expr(
                Column::DifficultyTotal,
                Expr::col(Column::DifficultyTotal).add(sign * i64::from(scores.difficulty())),
            )
            .col_expr(
                Column::HomeworkTotal,
                Expr::col(Column::HomeworkTotal).add(sign * i64::from(scores.homework())),
            )
            .col_expr(
                Column::GradingTotal,
                Expr::col(Column::GradingTotal).add(sign * i64::from(scores.grading())),
            )
            .col_expr(
                Column::GainTotal,
                Expr::col(Column::GainTotal).add(sign * i64::from(scores.gain())),
            )
            .col_expr(
                Column::RateTotal,
                Expr::col(Column::RateTotal).add(sign * i64::from(scores.rate())),
            )
            .filter(Column::CourseId.eq(course_id))
            .exec(conn)
            .await?;
        Ok(())
    }

    /// Move one of the denormalized relation counters by `delta`
    pub(crate) async fn shift_counter<C: ConnectionTrait>(
        conn: &C,
        course_id: Uuid,
        counter: course_rates::Column,
        delta: i64,
    ) -> Result<(), DbErr> {
        course_rates::Entity::update_many()
            .col_expr(counter, Expr::col(counter).add(delta))
            .filter(course_rates::Column::CourseId.eq(course_id))
            .exec(conn)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(course_id: Uuid) -> course_rates::Model {
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
        }
    }

    #[test]
    fn test_summary_of_empty_aggregate() {
        let summary = RatingSummary::from(&model(Uuid::new_v4()));
        assert_eq!(summary.review_count, 0);
        assert_eq!(summary.difficulty, None);
        assert_eq!(summary.homework, None);
        assert_eq!(summary.grading, None);
        assert_eq!(summary.gain, None);
        assert_eq!(summary.average_rate, None);
    }

    #[test]
    fn test_summary_derives_buckets() {
        let mut row = model(Uuid::new_v4());
        row.review_count = 3;
        row.difficulty_total = 6;
        row.homework_total = 3;
        row.grading_total = 9;
        row.gain_total = 4;
        row.rate_total = 13;
        row.upvote_count = 2;

        let summary = RatingSummary::from(&row);
        assert_eq!(summary.difficulty, Some(Difficulty::Medium));
        assert_eq!(summary.homework, Some(Homework::Light));
        assert_eq!(summary.grading, Some(Grading::Harsh));
        assert_eq!(summary.gain, Some(Gain::High)); // 4/3 rounds to 1
        assert_eq!(summary.average_rate.unwrap().to_string(), "4.3");
        assert_eq!(summary.upvote_count, 2);
    }
}
