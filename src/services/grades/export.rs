//! 班级成绩总表导出

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::error;

use super::GradeService;
use super::report::build_class_report;
use crate::models::grades::entities::ClassReport;
use crate::models::grades::requests::ClassReportQuery;
use crate::models::subjects::entities::Subject;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn export_class_report(
    service: &GradeService,
    query: ClassReportQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let report = match build_class_report(storage.as_ref(), &query).await {
        Ok(report) => report,
        Err(e) => {
            return Ok(error_response(
                "Failed to generate class report",
                e,
                ErrorCode::ClassNotFound,
            ));
        }
    };
    let subjects = match storage.list_subjects().await {
        Ok(subjects) => subjects,
        Err(e) => {
            return Ok(error_response(
                "Failed to load subjects",
                e,
                ErrorCode::SubjectNotFound,
            ));
        }
    };

    match generate_xlsx(&report, &subjects) {
        Ok(buffer) => {
            let timestamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
            let filename = format!("class_{}_grades_{timestamp}.xlsx", query.class_id);

            Ok(HttpResponse::Ok()
                .content_type("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{filename}\""),
                ))
                .body(buffer))
        }
        Err(e) => {
            error!("Failed to generate XLSX: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ExportFailed,
                    "Failed to generate report",
                )),
            )
        }
    }
}

/// 生成 XLSX：概览 + 成绩总表
pub(crate) fn generate_xlsx(report: &ClassReport, subjects: &[Subject]) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let header_format = Format::new().set_bold();
    let title_format = Format::new().set_bold().set_font_size(14);

    let overview = workbook
        .add_worksheet()
        .set_name("Overview")
        .map_err(|e| e.to_string())?;
    write_overview_sheet(overview, &header_format, &title_format, report)?;

    let results = workbook
        .add_worksheet()
        .set_name("Results")
        .map_err(|e| e.to_string())?;
    write_results_sheet(results, &header_format, report, subjects)?;

    workbook.save_to_buffer().map_err(|e| e.to_string())
}

fn write_overview_sheet(
    sheet: &mut Worksheet,
    header_format: &Format,
    title_format: &Format,
    report: &ClassReport,
) -> Result<(), String> {
    sheet
        .write_string_with_format(0, 0, "Class Grade Report", title_format)
        .map_err(|e| e.to_string())?;
    sheet
        .write_string_with_format(2, 0, "Item", header_format)
        .map_err(|e| e.to_string())?;
    sheet
        .write_string_with_format(2, 1, "Value", header_format)
        .map_err(|e| e.to_string())?;

    let graded = report.rows.iter().filter(|r| r.position.is_some()).count();
    let weights = &report.weights;
    let items = [
        ("Class", report.class.name.clone()),
        ("Academic year", report.academic_year.clone()),
        ("Term", report.term.clone()),
        ("Students", report.rows.len().to_string()),
        ("Students graded", graded.to_string()),
        (
            "Weights (mid/class/exam)",
            format!(
                "{}/{}/{}",
                weights.mid_weight, weights.class_weight, weights.exam_weight
            ),
        ),
    ];
    for (i, (label, value)) in items.iter().enumerate() {
        let row = 3 + i as u32;
        sheet.write_string(row, 0, *label).ok();
        sheet.write_string(row, 1, value).ok();
    }

    sheet.set_column_width(0, 26).ok();
    sheet.set_column_width(1, 24).ok();
    Ok(())
}

fn write_results_sheet(
    sheet: &mut Worksheet,
    header_format: &Format,
    report: &ClassReport,
    subjects: &[Subject],
) -> Result<(), String> {
    let mut headers = vec![
        "Position".to_string(),
        "Admission No.".to_string(),
        "Student".to_string(),
    ];
    headers.extend(subjects.iter().map(|s| s.code.clone()));
    headers.push("Average".to_string());
    headers.push("GPA".to_string());

    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, header, header_format)
            .map_err(|e| e.to_string())?;
    }

    for (i, row_data) in report.rows.iter().enumerate() {
        let row = 1 + i as u32;
        match row_data.position {
            Some(position) => {
                sheet.write_number(row, 0, position as f64).ok();
            }
            None => {
                sheet.write_string(row, 0, "-").ok();
            }
        }
        sheet.write_string(row, 1, &row_data.admission_number).ok();
        sheet.write_string(row, 2, &row_data.student_name).ok();

        for (j, subject) in subjects.iter().enumerate() {
            let col = 3 + j as u16;
            match row_data.subjects.iter().find(|g| g.subject_id == subject.id) {
                Some(grade) => {
                    let cell = format!("{:.1} ({})", grade.total_score, grade.grade);
                    sheet.write_string(row, col, cell).ok();
                }
                None => {
                    sheet.write_string(row, col, "-").ok();
                }
            }
        }

        let col = 3 + subjects.len() as u16;
        sheet
            .write_number(row, col, (row_data.average_score * 100.0).round() / 100.0)
            .ok();
        sheet
            .write_number(row, col + 1, (row_data.gpa * 100.0).round() / 100.0)
            .ok();
    }

    sheet.set_column_width(1, 16).ok();
    sheet.set_column_width(2, 24).ok();
    Ok(())
}
