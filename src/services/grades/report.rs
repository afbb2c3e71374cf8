use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::calculator::{
    average_score, collect_raw_totals, cumulative_gpa, grade_student, rank_by_gpa, total_credits,
};
use super::{GradeService, load_weights};
use crate::errors::{Result, SchoolAdminError};
use crate::models::grades::entities::{ClassReport, ClassReportRow, Transcript};
use crate::models::grades::requests::{ClassReportQuery, TermQuery};
use crate::models::marks::requests::MarkListQuery;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, not_found};
use crate::storage::Storage;

/// 生成学生某学期的成绩单
pub async fn build_transcript(
    storage: &dyn Storage,
    student_id: i64,
    term: &str,
    academic_year: &str,
) -> Result<Option<Transcript>> {
    let Some(student) = storage.get_student_by_id(student_id).await? else {
        return Ok(None);
    };

    let (weights, _) = load_weights(storage).await?;
    let subjects = storage.list_subjects().await?;
    let marks = storage
        .list_marks(MarkListQuery {
            student_id: Some(student_id),
            term: Some(term.to_string()),
            academic_year: Some(academic_year.to_string()),
            ..Default::default()
        })
        .await?;

    let totals = collect_raw_totals(&marks);
    let grades = grade_student(student_id, &subjects, &totals, &weights);
    let success = !grades.is_empty();
    let message = if success {
        format!("{} subject(s) graded", grades.len())
    } else {
        "No marks recorded for this term".to_string()
    };

    Ok(Some(Transcript {
        success,
        message,
        student,
        term: term.to_string(),
        academic_year: academic_year.to_string(),
        weights,
        total_credits: total_credits(&grades),
        cumulative_gpa: cumulative_gpa(&grades),
        average_score: average_score(&grades),
        subjects: grades,
    }))
}

/// 生成班级成绩总表，按 GPA 排名
pub async fn build_class_report(storage: &dyn Storage, query: &ClassReportQuery) -> Result<ClassReport> {
    let class = storage
        .get_class_by_id(query.class_id)
        .await?
        .ok_or_else(|| SchoolAdminError::not_found(format!("Class #{}", query.class_id)))?;

    let (weights, _) = load_weights(storage).await?;
    let subjects = storage.list_subjects().await?;
    let students = storage.list_students_by_class(query.class_id).await?;
    let marks = storage
        .list_marks(MarkListQuery {
            class_id: Some(query.class_id),
            term: Some(query.term.clone()),
            academic_year: Some(query.academic_year.clone()),
            ..Default::default()
        })
        .await?;
    let totals = collect_raw_totals(&marks);

    let mut rows: Vec<ClassReportRow> = students
        .iter()
        .map(|student| {
            let grades = grade_student(student.id, &subjects, &totals, &weights);
            ClassReportRow {
                student_id: student.id,
                admission_number: student.admission_number.clone(),
                student_name: student.full_name(),
                average_score: average_score(&grades),
                gpa: cumulative_gpa(&grades),
                subjects: grades,
                position: None,
            }
        })
        .collect();
    rank_by_gpa(&mut rows);

    Ok(ClassReport {
        class,
        term: query.term.clone(),
        academic_year: query.academic_year.clone(),
        weights,
        rows,
    })
}

pub async fn get_transcript(
    service: &GradeService,
    student_id: i64,
    query: TermQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match build_transcript(storage.as_ref(), student_id, &query.term, &query.academic_year).await {
        Ok(Some(transcript)) if transcript.success => Ok(HttpResponse::Ok().json(
            ApiResponse::success(transcript, "Transcript generated successfully"),
        )),
        Ok(Some(transcript)) => {
            let message = transcript.message.clone();
            Ok(HttpResponse::Ok().json(ApiResponse::error(
                ErrorCode::TranscriptEmpty,
                transcript,
                message,
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Ok(error_response(
            "Failed to generate transcript",
            e,
            ErrorCode::StudentNotFound,
        )),
    }
}

pub async fn get_class_report(
    service: &GradeService,
    query: ClassReportQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match build_class_report(storage.as_ref(), &query).await {
        Ok(report) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            report,
            "Class report generated successfully",
        ))),
        Err(e) => Ok(error_response(
            "Failed to generate class report",
            e,
            ErrorCode::ClassNotFound,
        )),
    }
}
