use uuid::Uuid;

/// The authenticated actor a mutating operation runs on behalf of
///
/// Resolved by the caller and passed explicitly into every toggle and review
/// operation; services never reach for ambient request state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    /// Only student principals may join or quit a course
    pub is_student: bool,
}
