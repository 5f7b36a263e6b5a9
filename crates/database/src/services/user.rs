use crate::{entities::users, principal::Principal};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

pub struct UserService;

impl UserService {
    /// Resolve the acting principal from an OAuth token subject
    ///
    /// `None` means the token is valid but no account exists for it; callers
    /// decide whether that is a 401 or an anonymous read.
    pub async fn resolve_principal(
        db: &DatabaseConnection,
        subject: &str,
    ) -> Result<Option<Principal>, DbErr> {
        Ok(users::Entity::find()
            .filter(users::Column::Subject.eq(subject))
            .one(db)
            .await?
            .map(|user| Principal {
                user_id: user.id,
                is_student: user.is_student,
            }))
    }
}
