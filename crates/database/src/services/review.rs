use crate::{
    entities::reviews,
    principal::Principal,
    services::{membership::Toggle, rating::RatingService},
};
use models::rating::ReviewScores;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::Set,
    ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, QueryFilter,
    TransactionTrait,
    sea_query::OnConflict,
};
use uuid::Uuid;

/// What a caller submits when writing a review
#[derive(Debug, Clone)]
pub struct ReviewDraft {
    pub scores: ReviewScores,
    pub title: Option<String>,
    pub content: String,
}

pub struct ReviewService;

impl ReviewService {
    /// Create the principal's review of a course and fold its scores into
    /// the rating aggregate, in one transaction
    ///
    /// One review per (course, user): a duplicate create returns `None` and
    /// leaves the aggregate untouched.
    pub async fn create(
        db: &DatabaseConnection,
        course_id: Uuid,
        principal: Principal,
        draft: ReviewDraft,
    ) -> Result<Option<reviews::Model>, DbErr> {
        let txn = db.begin().await?;

        let now = chrono::Utc::now().naive_utc();
        let row = reviews::ActiveModel {
            id: Set(Uuid::new_v4()),
            course_id: Set(course_id),
            user_id: Set(principal.user_id),
            difficulty: Set(draft.scores.difficulty()),
            homework: Set(draft.scores.homework()),
            grading: Set(draft.scores.grading()),
            gain: Set(draft.scores.gain()),
            rate: Set(draft.scores.rate()),
            title: Set(draft.title),
            content: Set(draft.content),
            created_at: Set(now),
            updated_at: Set(now),
        };

        // Two concurrent first reviews race past any prior existence check,
        // so the unique (course_id, user_id) index is the arbiter: the loser
        // inserts zero rows and reports a duplicate instead of erroring.
        let inserted = reviews::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([reviews::Column::CourseId, reviews::Column::UserId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await?;
        if inserted == 0 {
            txn.commit().await?;
            return Ok(None);
        }

        let model = Self::find_own(&txn, course_id, principal.user_id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("review of course {course_id}")))?;

        RatingService::apply_scores(&txn, course_id, &draft.scores).await?;
        txn.commit().await?;
        Ok(Some(model))
    }

    /// Edit the principal's review: revert the old scores, then apply the
    /// new ones
    ///
    /// Never patches the sums differentially; revert-then-apply keeps the
    /// aggregate an exact sum over the current reviews.
    pub async fn update(
        db: &DatabaseConnection,
        course_id: Uuid,
        principal: Principal,
        draft: ReviewDraft,
    ) -> Result<Option<reviews::Model>, DbErr> {
        let txn = db.begin().await?;

        let Some(existing) = Self::find_own(&txn, course_id, principal.user_id).await? else {
            txn.commit().await?;
            return Ok(None);
        };

        let old_scores = Self::stored_scores(&existing)?;
        RatingService::revert_scores(&txn, course_id, &old_scores).await?;
        RatingService::apply_scores(&txn, course_id, &draft.scores).await?;

        let mut active: reviews::ActiveModel = existing.into();
        active.difficulty = Set(draft.scores.difficulty());
        active.homework = Set(draft.scores.homework());
        active.grading = Set(draft.scores.grading());
        active.gain = Set(draft.scores.gain());
        active.rate = Set(draft.scores.rate());
        active.title = Set(draft.title);
        active.content = Set(draft.content);
        active.updated_at = Set(chrono::Utc::now().naive_utc());
        let model = active.update(&txn).await?;

        txn.commit().await?;
        Ok(Some(model))
    }

    /// Delete the principal's review and revert its scores
    ///
    /// The aggregate is only ever reverted for a review row that exists, so
    /// the review count cannot go negative.
    pub async fn delete(
        db: &DatabaseConnection,
        course_id: Uuid,
        principal: Principal,
    ) -> Result<Toggle, DbErr> {
        let txn = db.begin().await?;

        let Some(existing) = Self::find_own(&txn, course_id, principal.user_id).await? else {
            txn.commit().await?;
            return Ok(Toggle::NoChange);
        };

        let old_scores = Self::stored_scores(&existing)?;
        reviews::Entity::delete_by_id(existing.id).exec(&txn).await?;
        RatingService::revert_scores(&txn, course_id, &old_scores).await?;

        txn.commit().await?;
        Ok(Toggle::Changed)
    }

    /// The principal's review of a course, if any
    pub async fn find_for_user(
        db: &DatabaseConnection,
        course_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<reviews::Model>, DbErr> {
        reviews::Entity::find()
            .filter(reviews::Column::CourseId.eq(course_id))
            .filter(reviews::Column::UserId.eq(user_id))
            .one(db)
            .await
    }

    async fn find_own(
        txn: &DatabaseTransaction,
        course_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<reviews::Model>, DbErr> {
        reviews::Entity::find()
            .filter(reviews::Column::CourseId.eq(course_id))
            .filter(reviews::Column::UserId.eq(user_id))
            .one(txn)
            .await
    }

    fn stored_scores(model: &reviews::Model) -> Result<ReviewScores, DbErr> {
        ReviewScores::new(
            model.difficulty,
            model.homework,
            model.grading,
            model.gain,
            model.rate,
        )
        .map_err(|err| DbErr::Custom(format!("review {} has invalid scores: {err}", model.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn draft() -> ReviewDraft {
        ReviewDraft {
            scores: ReviewScores::new(1, 2, 3, 1, 5).unwrap(),
            title: None,
            content: "solid course".to_string(),
        }
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_create_reports_conflict_not_error() {
        // The loser of a concurrent double-create sees its insert swallowed
        // by the unique (course_id, user_id) index
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let principal = Principal {
            user_id: Uuid::new_v4(),
            is_student: true,
        };

        let created = ReviewService::create(&db, Uuid::new_v4(), principal, draft())
            .await
            .unwrap();
        assert!(created.is_none());
    }
}
