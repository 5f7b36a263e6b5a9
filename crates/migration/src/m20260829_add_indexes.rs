use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Courses are looked up by name (search and related-courses)
        manager
            .create_index(
                Index::create()
                    .name("idx_courses_name")
                    .table(Courses::Table)
                    .col(Courses::Name)
                    .to_owned(),
            )
            .await?;

        // One offering per (course, term); ordered scans resolve the latest
        // term
        manager
            .create_index(
                Index::create()
                    .name("uq_course_terms_course_id_term")
                    .table(CourseTerms::Table)
                    .col(CourseTerms::CourseId)
                    .col(CourseTerms::Term)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_terms_courseries")
                    .table(CourseTerms::Table)
                    .col(CourseTerms::Courseries)
                    .to_owned(),
            )
            .await?;

        // One section per (term, section code)
        manager
            .create_index(
                Index::create()
                    .name("uq_course_classes_term_section")
                    .table(CourseClasses::Table)
                    .col(CourseClasses::Term)
                    .col(CourseClasses::Section)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index on time_locations.course_id for course-level schedule loads
        manager
            .create_index(
                Index::create()
                    .name("idx_time_locations_course_id")
                    .table(TimeLocations::Table)
                    .col(TimeLocations::CourseId)
                    .to_owned(),
            )
            .await?;

        // One link per (course, teacher)
        manager
            .create_index(
                Index::create()
                    .name("uq_course_teachers_course_id_teacher_id")
                    .table(CourseTeachers::Table)
                    .col(CourseTeachers::CourseId)
                    .col(CourseTeachers::TeacherId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // One review per (course, user)
        manager
            .create_index(
                Index::create()
                    .name("uq_reviews_course_id_user_id")
                    .table(Reviews::Table)
                    .col(Reviews::CourseId)
                    .col(Reviews::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Membership uniqueness: the toggle operations rely on these for
        // their conflict-tolerant inserts
        for (table, name) in [
            (
                MembershipTable::Followers,
                "uq_course_followers_course_id_user_id",
            ),
            (
                MembershipTable::Upvotes,
                "uq_course_upvotes_course_id_user_id",
            ),
            (
                MembershipTable::Downvotes,
                "uq_course_downvotes_course_id_user_id",
            ),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(table)
                        .col(Membership::CourseId)
                        .col(Membership::UserId)
                        .unique()
                        .to_owned(),
                )
                .await?;
        }

        // One enrollment per (course, user), even though it binds to a class
        manager
            .create_index(
                Index::create()
                    .name("uq_class_students_course_id_user_id")
                    .table(ClassStudents::Table)
                    .col(ClassStudents::CourseId)
                    .col(ClassStudents::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("uq_class_students_course_id_user_id")
                    .table(ClassStudents::Table)
                    .to_owned(),
            )
            .await?;

        for (table, name) in [
            (
                MembershipTable::Downvotes,
                "uq_course_downvotes_course_id_user_id",
            ),
            (
                MembershipTable::Upvotes,
                "uq_course_upvotes_course_id_user_id",
            ),
            (
                MembershipTable::Followers,
                "uq_course_followers_course_id_user_id",
            ),
        ] {
            manager
                .drop_index(Index::drop().name(name).table(table).to_owned())
                .await?;
        }

        manager
            .drop_index(
                Index::drop()
                    .name("uq_reviews_course_id_user_id")
                    .table(Reviews::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("uq_course_teachers_course_id_teacher_id")
                    .table(CourseTeachers::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_time_locations_course_id")
                    .table(TimeLocations::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("uq_course_classes_term_section")
                    .table(CourseClasses::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_course_terms_courseries")
                    .table(CourseTerms::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("uq_course_terms_course_id_term")
                    .table(CourseTerms::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_courses_name")
                    .table(Courses::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Courses {
    Table,
    Name,
}

#[derive(Iden)]
enum CourseTerms {
    Table,
    CourseId,
    Term,
    Courseries,
}

#[derive(Iden)]
enum CourseClasses {
    Table,
    Term,
    Section,
}

#[derive(Iden)]
enum TimeLocations {
    Table,
    CourseId,
}

#[derive(Iden)]
enum CourseTeachers {
    Table,
    CourseId,
    TeacherId,
}

#[derive(Iden)]
enum Reviews {
    Table,
    CourseId,
    UserId,
}

#[derive(Iden)]
enum Membership {
    CourseId,
    UserId,
}

#[derive(Iden, Clone, Copy)]
enum MembershipTable {
    #[iden = "course_followers"]
    Followers,
    #[iden = "course_upvotes"]
    Upvotes,
    #[iden = "course_downvotes"]
    Downvotes,
}

#[derive(Iden)]
enum ClassStudents {
    Table,
    CourseId,
    UserId,
}
