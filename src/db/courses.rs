use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db::ArchiveFilter;
use crate::models::{Course, CourseStatistics, NewCourseRequest, ProgramCount};

const COURSE_COLUMNS: &str = "id, title, description, image_url, program, instructor, \
     start_date, end_date, is_archived, created_at, updated_at";

pub async fn fetch_courses(db: &SqlitePool, filter: ArchiveFilter) -> Result<Vec<Course>, sqlx::Error> {
    let sql = format!(
        "SELECT {COURSE_COLUMNS} FROM courses {} ORDER BY created_at DESC",
        filter.where_clause()
    );
    sqlx::query_as::<_, Course>(&sql).fetch_all(db).await
}

pub async fn find_course_by_id(db: &SqlitePool, id: &str) -> Result<Option<Course>, sqlx::Error> {
    let sql = format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = ?1");
    sqlx::query_as::<_, Course>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn insert_course(db: &SqlitePool, req: NewCourseRequest) -> Result<Course, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO courses
            (id, title, description, image_url, program, instructor,
            start_date, end_date, is_archived, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 0, ?9, ?9)
        "#,
    )
    .bind(&id)
    .bind(&req.title)
    .bind(&req.description)
    .bind(&req.image_url)
    .bind(&req.program)
    .bind(&req.instructor)
    .bind(req.start_date)
    .bind(req.end_date)
    .bind(now)
    .execute(db)
    .await?;

    Ok(Course {
        id,
        title: req.title,
        description: req.description,
        image_url: req.image_url,
        program: req.program,
        instructor: req.instructor,
        start_date: req.start_date,
        end_date: req.end_date,
        is_archived: false,
        created_at: now,
        updated_at: now,
    })
}

/// Writes every editable field of `course` and stamps a new `updated_at`.
pub async fn update_course(db: &SqlitePool, mut course: Course) -> Result<Option<Course>, sqlx::Error> {
    course.updated_at = Utc::now();

    let result = sqlx::query(
        r#"
        UPDATE courses
        SET title = ?1,
            description = ?2,
            image_url = ?3,
            program = ?4,
            instructor = ?5,
            start_date = ?6,
            end_date = ?7,
            updated_at = ?8
        WHERE id = ?9
        "#,
    )
    .bind(&course.title)
    .bind(&course.description)
    .bind(&course.image_url)
    .bind(&course.program)
    .bind(&course.instructor)
    .bind(course.start_date)
    .bind(course.end_date)
    .bind(course.updated_at)
    .bind(&course.id)
    .execute(db)
    .await?
    .rows_affected();

    Ok((result > 0).then_some(course))
}

pub async fn set_course_archived(db: &SqlitePool, id: &str, archived: bool) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE courses
        SET is_archived = ?2,
            updated_at = ?3
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .bind(archived)
    .bind(Utc::now())
    .execute(db)
    .await?
    .rows_affected();

    Ok(result > 0)
}

pub async fn archive_course(db: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    set_course_archived(db, id, true).await
}

pub async fn unarchive_course(db: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    set_course_archived(db, id, false).await
}

/// Hard delete. Inquiries keep their denormalized course title.
pub async fn delete_course(db: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM courses WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

pub async fn course_statistics(db: &SqlitePool) -> Result<CourseStatistics, sqlx::Error> {
    let (total, archived): (i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COALESCE(SUM(is_archived), 0) FROM courses",
    )
    .fetch_one(db)
    .await?;

    let by_program: Vec<(Option<String>, i64)> = sqlx::query_as(
        r#"
        SELECT program, COUNT(*) AS count
        FROM courses
        GROUP BY program
        ORDER BY count DESC, program ASC
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(CourseStatistics {
        total,
        active: total - archived,
        archived,
        by_program: by_program
            .into_iter()
            .map(|(program, count)| ProgramCount { program, count })
            .collect(),
    })
}
