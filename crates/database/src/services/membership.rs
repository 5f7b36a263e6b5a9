use crate::{
    entities::{
        class_students, course_classes, course_downvotes, course_followers, course_rates,
        course_upvotes,
    },
    principal::Principal,
    services::rating::RatingService,
};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::Set,
    ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, FromQueryResult,
    IntoActiveModel, PaginatorTrait, QueryFilter, TransactionTrait,
    sea_query::OnConflict,
};
use serde::Serialize;
use uuid::Uuid;

/// Outcome of a toggle operation
///
/// Toggles are idempotent: applying one that is already in effect (or
/// removing one that is not) is a no-op reported as `NoChange`, never an
/// error.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Toggle {
    Changed,
    NoChange,
}

impl Toggle {
    pub fn changed(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// A course/principal membership relation with its paired counter
///
/// Every toggle pair is driven through the same add/remove routine below, so
/// the membership guard and the counter pairing hold uniformly for every
/// relation; no relation gets its own hand-rolled (and divergent) handling.
pub trait MembershipRelation {
    type Entity: EntityTrait;
    type Row: ActiveModelTrait<Entity = Self::Entity> + Send;

    /// The denormalized counter in course_rates paired with this relation
    fn counter() -> course_rates::Column;
    fn course_column() -> <Self::Entity as EntityTrait>::Column;
    fn user_column() -> <Self::Entity as EntityTrait>::Column;
    fn row(course_id: Uuid, user_id: Uuid) -> Self::Row;
}

/// Users following a course
pub struct Followers;

impl MembershipRelation for Followers {
    type Entity = course_followers::Entity;
    type Row = course_followers::ActiveModel;

    fn counter() -> course_rates::Column {
        course_rates::Column::FollowCount
    }

    fn course_column() -> course_followers::Column {
        course_followers::Column::CourseId
    }

    fn user_column() -> course_followers::Column {
        course_followers::Column::UserId
    }

    fn row(course_id: Uuid, user_id: Uuid) -> course_followers::ActiveModel {
        course_followers::ActiveModel {
            id: Set(Uuid::new_v4()),
            course_id: Set(course_id),
            user_id: Set(user_id),
        }
    }
}

/// Users recommending a course
pub struct Upvoters;

impl MembershipRelation for Upvoters {
    type Entity = course_upvotes::Entity;
    type Row = course_upvotes::ActiveModel;

    fn counter() -> course_rates::Column {
        course_rates::Column::UpvoteCount
    }

    fn course_column() -> course_upvotes::Column {
        course_upvotes::Column::CourseId
    }

    fn user_column() -> course_upvotes::Column {
        course_upvotes::Column::UserId
    }

    fn row(course_id: Uuid, user_id: Uuid) -> course_upvotes::ActiveModel {
        course_upvotes::ActiveModel {
            id: Set(Uuid::new_v4()),
            course_id: Set(course_id),
            user_id: Set(user_id),
        }
    }
}

/// Users recommending against a course
pub struct Downvoters;

impl MembershipRelation for Downvoters {
    type Entity = course_downvotes::Entity;
    type Row = course_downvotes::ActiveModel;

    fn counter() -> course_rates::Column {
        course_rates::Column::DownvoteCount
    }

    fn course_column() -> course_downvotes::Column {
        course_downvotes::Column::CourseId
    }

    fn user_column() -> course_downvotes::Column {
        course_downvotes::Column::UserId
    }

    fn row(course_id: Uuid, user_id: Uuid) -> course_downvotes::ActiveModel {
        course_downvotes::ActiveModel {
            id: Set(Uuid::new_v4()),
            course_id: Set(course_id),
            user_id: Set(user_id),
        }
    }
}

/// What the acting principal currently holds on a course
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SocialState {
    pub following: bool,
    pub upvoted: bool,
    pub downvoted: bool,
    pub joined: bool,
}

pub struct MembershipService;

impl MembershipService {
    /// Insert the principal into relation `R` and bump its paired counter
    ///
    /// The membership row and the counter move in one transaction; the
    /// counter is only touched when a row was actually inserted, so it stays
    /// equal to the relation's cardinality.
    pub async fn add_member<R: MembershipRelation>(
        db: &DatabaseConnection,
        course_id: Uuid,
        principal: Principal,
    ) -> Result<Toggle, DbErr>
    where
        <R::Entity as EntityTrait>::Model: IntoActiveModel<R::Row>,
    {
        let txn = db.begin().await?;
        RatingService::get_or_create(&txn, course_id).await?;

        let inserted =
            Self::insert_ignoring_conflict::<R>(&txn, course_id, principal.user_id).await?;
        if !inserted {
            txn.commit().await?;
            return Ok(Toggle::NoChange);
        }

        RatingService::shift_counter(&txn, course_id, R::counter(), 1).await?;
        txn.commit().await?;
        Ok(Toggle::Changed)
    }

    /// Remove the principal from relation `R` and drop its paired counter
    pub async fn remove_member<R: MembershipRelation>(
        db: &DatabaseConnection,
        course_id: Uuid,
        principal: Principal,
    ) -> Result<Toggle, DbErr> {
        let txn = db.begin().await?;

        let deleted = R::Entity::delete_many()
            .filter(R::course_column().eq(course_id))
            .filter(R::user_column().eq(principal.user_id))
            .exec(&txn)
            .await?
            .rows_affected;
        if deleted == 0 {
            txn.commit().await?;
            return Ok(Toggle::NoChange);
        }

        RatingService::get_or_create(&txn, course_id).await?;
        RatingService::shift_counter(&txn, course_id, R::counter(), -1).await?;
        txn.commit().await?;
        Ok(Toggle::Changed)
    }

    pub async fn follow(
        db: &DatabaseConnection,
        course_id: Uuid,
        principal: Principal,
    ) -> Result<Toggle, DbErr> {
        Self::add_member::<Followers>(db, course_id, principal).await
    }

    pub async fn unfollow(
        db: &DatabaseConnection,
        course_id: Uuid,
        principal: Principal,
    ) -> Result<Toggle, DbErr> {
        Self::remove_member::<Followers>(db, course_id, principal).await
    }

    pub async fn upvote(
        db: &DatabaseConnection,
        course_id: Uuid,
        principal: Principal,
    ) -> Result<Toggle, DbErr> {
        Self::add_member::<Upvoters>(db, course_id, principal).await
    }

    pub async fn un_upvote(
        db: &DatabaseConnection,
        course_id: Uuid,
        principal: Principal,
    ) -> Result<Toggle, DbErr> {
        Self::remove_member::<Upvoters>(db, course_id, principal).await
    }

    pub async fn downvote(
        db: &DatabaseConnection,
        course_id: Uuid,
        principal: Principal,
    ) -> Result<Toggle, DbErr> {
        Self::add_member::<Downvoters>(db, course_id, principal).await
    }

    pub async fn un_downvote(
        db: &DatabaseConnection,
        course_id: Uuid,
        principal: Principal,
    ) -> Result<Toggle, DbErr> {
        Self::remove_member::<Downvoters>(db, course_id, principal).await
    }

    /// Enroll the principal into one class section of the course
    ///
    /// Preconditions (student principal, class belongs to the course) fail as
    /// `NoChange`, not as errors. Enrollment is unique per (course, user), so
    /// the join counter tracks distinct enrolled students.
    pub async fn join(
        db: &DatabaseConnection,
        course_id: Uuid,
        class_id: Uuid,
        principal: Principal,
    ) -> Result<Toggle, DbErr> {
        if !principal.is_student {
            return Ok(Toggle::NoChange);
        }

        let txn = db.begin().await?;

        let belongs = course_classes::Entity::find_by_id(class_id)
            .one(&txn)
            .await?
            .map(|class| class.course_id == course_id)
            .unwrap_or(false);
        if !belongs {
            txn.commit().await?;
            return Ok(Toggle::NoChange);
        }

        RatingService::get_or_create(&txn, course_id).await?;

        let row = class_students::ActiveModel {
            id: Set(Uuid::new_v4()),
            course_id: Set(course_id),
            class_id: Set(class_id),
            user_id: Set(principal.user_id),
        };
        let inserted = class_students::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([
                    class_students::Column::CourseId,
                    class_students::Column::UserId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&txn)
            .await?;
        if inserted == 0 {
            txn.commit().await?;
            return Ok(Toggle::NoChange);
        }

        RatingService::shift_counter(&txn, course_id, course_rates::Column::JoinCount, 1).await?;
        txn.commit().await?;
        Ok(Toggle::Changed)
    }

    /// Withdraw the principal from whichever of the course's classes they
    /// are enrolled in
    pub async fn quit(
        db: &DatabaseConnection,
        course_id: Uuid,
        principal: Principal,
    ) -> Result<Toggle, DbErr> {
        if !principal.is_student {
            return Ok(Toggle::NoChange);
        }

        let txn = db.begin().await?;

        let deleted = class_students::Entity::delete_many()
            .filter(class_students::Column::CourseId.eq(course_id))
            .filter(class_students::Column::UserId.eq(principal.user_id))
            .exec(&txn)
            .await?
            .rows_affected;
        if deleted == 0 {
            txn.commit().await?;
            return Ok(Toggle::NoChange);
        }

        RatingService::get_or_create(&txn, course_id).await?;
        RatingService::shift_counter(&txn, course_id, course_rates::Column::JoinCount, -1).await?;
        txn.commit().await?;
        Ok(Toggle::Changed)
    }

    /// The current value of the counter paired with a toggle, for responses
    pub async fn counter_value(
        db: &DatabaseConnection,
        course_id: Uuid,
        counter: course_rates::Column,
    ) -> Result<i64, DbErr> {
        let rate = RatingService::get_or_create(db, course_id).await?;
        Ok(match counter {
            course_rates::Column::UpvoteCount => rate.upvote_count,
            course_rates::Column::DownvoteCount => rate.downvote_count,
            course_rates::Column::FollowCount => rate.follow_count,
            course_rates::Column::JoinCount => rate.join_count,
            _ => 0,
        })
    }

    /// Whether the user currently sits in relation `R` for the course
    pub async fn contains<R: MembershipRelation>(
        db: &DatabaseConnection,
        course_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, DbErr>
    where
        <R::Entity as EntityTrait>::Model: FromQueryResult + Send + Sync,
    {
        let count = R::Entity::find()
            .filter(R::course_column().eq(course_id))
            .filter(R::user_column().eq(user_id))
            .count(db)
            .await?;
        Ok(count > 0)
    }

    /// Everything the acting principal holds on one course
    pub async fn social_state(
        db: &DatabaseConnection,
        course_id: Uuid,
        user_id: Uuid,
    ) -> Result<SocialState, DbErr> {
        let joined = class_students::Entity::find()
            .filter(class_students::Column::CourseId.eq(course_id))
            .filter(class_students::Column::UserId.eq(user_id))
            .count(db)
            .await?
            > 0;

        Ok(SocialState {
            following: Self::contains::<Followers>(db, course_id, user_id).await?,
            upvoted: Self::contains::<Upvoters>(db, course_id, user_id).await?,
            downvoted: Self::contains::<Downvoters>(db, course_id, user_id).await?,
            joined,
        })
    }

    async fn insert_ignoring_conflict<R: MembershipRelation>(
        txn: &DatabaseTransaction,
        course_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, DbErr>
    where
        <R::Entity as EntityTrait>::Model: IntoActiveModel<R::Row>,
    {
        // ON CONFLICT DO NOTHING makes a concurrent duplicate add report zero
        // rows instead of failing, which is exactly the idempotent no-op.
        let rows = R::Entity::insert(R::row(course_id, user_id))
            .on_conflict(
                OnConflict::columns([R::course_column(), R::user_column()])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(txn)
            .await?;
        Ok(rows > 0)
    }
}
