use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create departments table
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Departments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Departments::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Create courses table
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Courses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .col(ColumnDef::new(Courses::DeptId).uuid())
                    .col(
                        ColumnDef::new(Courses::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Courses::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-courses-dept_id")
                            .from(Courses::Table, Courses::DeptId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create course_terms table (per-term descriptive metadata)
        manager
            .create_table(
                Table::create()
                    .table(CourseTerms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseTerms::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseTerms::CourseId).uuid().not_null())
                    .col(ColumnDef::new(CourseTerms::Term).string().not_null())
                    .col(ColumnDef::new(CourseTerms::Courseries).string())
                    .col(ColumnDef::new(CourseTerms::CatalogId).integer())
                    .col(ColumnDef::new(CourseTerms::CourseMajor).string())
                    .col(ColumnDef::new(CourseTerms::CourseType).string())
                    .col(ColumnDef::new(CourseTerms::CourseLevel).string())
                    .col(ColumnDef::new(CourseTerms::GradingType).string())
                    .col(ColumnDef::new(CourseTerms::TeachingMaterial).text())
                    .col(ColumnDef::new(CourseTerms::ReferenceMaterial).text())
                    .col(ColumnDef::new(CourseTerms::StudentRequirements).text())
                    .col(ColumnDef::new(CourseTerms::Description).text())
                    .col(ColumnDef::new(CourseTerms::DescriptionEng).text())
                    .col(ColumnDef::new(CourseTerms::Introduction).text())
                    .col(ColumnDef::new(CourseTerms::Homepage).text())
                    .col(ColumnDef::new(CourseTerms::Credit).integer())
                    .col(ColumnDef::new(CourseTerms::Hours).integer())
                    .col(ColumnDef::new(CourseTerms::HoursPerWeek).integer())
                    .col(ColumnDef::new(CourseTerms::ClassNumbers).string())
                    .col(ColumnDef::new(CourseTerms::Campus).string())
                    .col(ColumnDef::new(CourseTerms::StartWeek).integer())
                    .col(ColumnDef::new(CourseTerms::EndWeek).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_terms-course_id")
                            .from(CourseTerms::Table, CourseTerms::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create course_classes table (scheduled sections)
        manager
            .create_table(
                Table::create()
                    .table(CourseClasses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseClasses::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseClasses::CourseId).uuid().not_null())
                    .col(ColumnDef::new(CourseClasses::Term).string().not_null())
                    .col(ColumnDef::new(CourseClasses::Section).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_classes-course_id")
                            .from(CourseClasses::Table, CourseClasses::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create time_locations table (weekly slots, destroyed with class)
        manager
            .create_table(
                Table::create()
                    .table(TimeLocations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TimeLocations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TimeLocations::CourseId).uuid().not_null())
                    .col(ColumnDef::new(TimeLocations::ClassId).uuid().not_null())
                    .col(ColumnDef::new(TimeLocations::Weekday).integer())
                    .col(ColumnDef::new(TimeLocations::BeginHour).integer())
                    .col(ColumnDef::new(TimeLocations::NumHours).integer())
                    .col(ColumnDef::new(TimeLocations::Location).string())
                    .col(ColumnDef::new(TimeLocations::Note).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-time_locations-course_id")
                            .from(TimeLocations::Table, TimeLocations::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-time_locations-class_id")
                            .from(TimeLocations::Table, TimeLocations::ClassId)
                            .to(CourseClasses::Table, CourseClasses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create teachers table
        manager
            .create_table(
                Table::create()
                    .table(Teachers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teachers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Teachers::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Create course_teachers junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(CourseTeachers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseTeachers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseTeachers::CourseId).uuid().not_null())
                    .col(ColumnDef::new(CourseTeachers::TeacherId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_teachers-course_id")
                            .from(CourseTeachers::Table, CourseTeachers::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_teachers-teacher_id")
                            .from(CourseTeachers::Table, CourseTeachers::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Users::Subject)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(
                        ColumnDef::new(Users::IsStudent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create reviews table
        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Reviews::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Reviews::CourseId).uuid().not_null())
                    .col(ColumnDef::new(Reviews::UserId).uuid().not_null())
                    .col(ColumnDef::new(Reviews::Difficulty).integer().not_null())
                    .col(ColumnDef::new(Reviews::Homework).integer().not_null())
                    .col(ColumnDef::new(Reviews::Grading).integer().not_null())
                    .col(ColumnDef::new(Reviews::Gain).integer().not_null())
                    .col(ColumnDef::new(Reviews::Rate).integer().not_null())
                    .col(ColumnDef::new(Reviews::Title).string())
                    .col(ColumnDef::new(Reviews::Content).text().not_null())
                    .col(
                        ColumnDef::new(Reviews::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Reviews::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-reviews-course_id")
                            .from(Reviews::Table, Reviews::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-reviews-user_id")
                            .from(Reviews::Table, Reviews::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create course_rates table (rating aggregate + social counters)
        manager
            .create_table(
                Table::create()
                    .table(CourseRates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseRates::CourseId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CourseRates::DifficultyTotal)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CourseRates::HomeworkTotal)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CourseRates::GradingTotal)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CourseRates::GainTotal)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CourseRates::RateTotal)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CourseRates::ReviewCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CourseRates::UpvoteCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CourseRates::DownvoteCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CourseRates::FollowCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CourseRates::JoinCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_rates-course_id")
                            .from(CourseRates::Table, CourseRates::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create the three vote/follow junction tables (many-to-many)
        for (table, course_fk, user_fk) in [
            (
                MembershipTable::Followers,
                "fk-course_followers-course_id",
                "fk-course_followers-user_id",
            ),
            (
                MembershipTable::Upvotes,
                "fk-course_upvotes-course_id",
                "fk-course_upvotes-user_id",
            ),
            (
                MembershipTable::Downvotes,
                "fk-course_downvotes-course_id",
                "fk-course_downvotes-user_id",
            ),
        ] {
            manager
                .create_table(
                    Table::create()
                        .table(table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Membership::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Membership::CourseId).uuid().not_null())
                        .col(ColumnDef::new(Membership::UserId).uuid().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name(course_fk)
                                .from(table, Membership::CourseId)
                                .to(Courses::Table, Courses::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name(user_fk)
                                .from(table, Membership::UserId)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;
        }

        // Create class_students junction table (enrollment through classes)
        manager
            .create_table(
                Table::create()
                    .table(ClassStudents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClassStudents::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClassStudents::CourseId).uuid().not_null())
                    .col(ColumnDef::new(ClassStudents::ClassId).uuid().not_null())
                    .col(ColumnDef::new(ClassStudents::UserId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-class_students-course_id")
                            .from(ClassStudents::Table, ClassStudents::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-class_students-class_id")
                            .from(ClassStudents::Table, ClassStudents::ClassId)
                            .to(CourseClasses::Table, CourseClasses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-class_students-user_id")
                            .from(ClassStudents::Table, ClassStudents::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(ClassStudents::Table).to_owned())
            .await?;

        for table in [
            MembershipTable::Downvotes,
            MembershipTable::Upvotes,
            MembershipTable::Followers,
        ] {
            manager
                .drop_table(Table::drop().table(table).to_owned())
                .await?;
        }

        manager
            .drop_table(Table::drop().table(CourseRates::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CourseTeachers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Teachers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(TimeLocations::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CourseClasses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CourseTerms::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Departments {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
    Name,
    DeptId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum CourseTerms {
    Table,
    Id,
    CourseId,
    Term,
    Courseries,
    CatalogId,
    CourseMajor,
    CourseType,
    CourseLevel,
    GradingType,
    TeachingMaterial,
    ReferenceMaterial,
    StudentRequirements,
    Description,
    DescriptionEng,
    Introduction,
    Homepage,
    Credit,
    Hours,
    HoursPerWeek,
    ClassNumbers,
    Campus,
    StartWeek,
    EndWeek,
}

#[derive(Iden)]
enum CourseClasses {
    Table,
    Id,
    CourseId,
    Term,
    Section,
}

#[derive(Iden)]
enum TimeLocations {
    Table,
    Id,
    CourseId,
    ClassId,
    Weekday,
    BeginHour,
    NumHours,
    Location,
    Note,
}

#[derive(Iden)]
enum Teachers {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum CourseTeachers {
    Table,
    Id,
    CourseId,
    TeacherId,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Subject,
    Name,
    IsStudent,
    CreatedAt,
}

#[derive(Iden)]
enum Reviews {
    Table,
    Id,
    CourseId,
    UserId,
    Difficulty,
    Homework,
    Grading,
    Gain,
    Rate,
    Title,
    Content,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum CourseRates {
    Table,
    CourseId,
    DifficultyTotal,
    HomeworkTotal,
    GradingTotal,
    GainTotal,
    RateTotal,
    ReviewCount,
    UpvoteCount,
    DownvoteCount,
    FollowCount,
    JoinCount,
}

/// Shared column shape of the three vote/follow junction tables
#[derive(Iden)]
enum Membership {
    Id,
    CourseId,
    UserId,
}

/// The three identically shaped membership tables
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
    Id,
    CourseId,
    ClassId,
    UserId,
}
