//! 可打印的 HTML 发票

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::fmt::Write;

use super::InvoiceService;
use crate::config::{AppConfig, SchoolConfig};
use crate::models::ErrorCode;
use crate::models::invoices::entities::Invoice;
use crate::models::students::entities::Student;
use crate::services::{error_response, not_found};

pub async fn print_invoice(
    service: &InvoiceService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let invoice = match storage.get_invoice_by_id(id).await {
        Ok(Some(invoice)) => invoice,
        Ok(None) => return Ok(not_found(ErrorCode::InvoiceNotFound, "Invoice not found")),
        Err(e) => {
            return Ok(error_response(
                "Failed to retrieve invoice",
                e,
                ErrorCode::InvoiceNotFound,
            ));
        }
    };
    let student = match storage.get_student_by_id(invoice.student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => {
            return Ok(error_response(
                "Failed to retrieve student",
                e,
                ErrorCode::StudentNotFound,
            ));
        }
    };

    let html = render_invoice_html(&invoice, &student, &AppConfig::get().school);
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_invoice_html(invoice: &Invoice, student: &Student, school: &SchoolConfig) -> String {
    let currency = escape_html(&school.currency);
    let mut rows = String::new();
    for (i, item) in invoice.items.iter().enumerate() {
        // 写入 String 不会失败
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td><td class=\"amount\">{currency} {:.2}</td></tr>",
            i + 1,
            escape_html(&item.description),
            item.amount
        );
    }

    let due_date = invoice
        .due_date
        .as_deref()
        .map(escape_html)
        .unwrap_or_else(|| "-".to_string());
    let notes = invoice
        .notes
        .as_deref()
        .map(|n| format!("<p class=\"notes\">{}</p>", escape_html(n)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Invoice {number}</title>
<style>
body {{ font-family: sans-serif; margin: 2em; color: #222; }}
header {{ border-bottom: 2px solid #333; margin-bottom: 1em; }}
table {{ width: 100%; border-collapse: collapse; }}
th, td {{ border: 1px solid #ccc; padding: 6px 8px; text-align: left; }}
td.amount, th.amount {{ text-align: right; }}
.status {{ text-transform: uppercase; font-weight: bold; }}
@media print {{ button {{ display: none; }} }}
</style>
</head>
<body>
<header>
<h1>{school_name}</h1>
<p>{school_address}<br>{school_phone}</p>
</header>
<h2>Invoice {number}</h2>
<p>
Student: {student_name} ({admission})<br>
Term: {term} &middot; Academic year: {year}<br>
Issued: {issued} &middot; Due: {due_date}<br>
Status: <span class="status">{status}</span>
</p>
<table>
<thead><tr><th>#</th><th>Description</th><th class="amount">Amount</th></tr></thead>
<tbody>{rows}</tbody>
<tfoot><tr><th colspan="2">Total</th><th class="amount">{currency} {total:.2}</th></tr></tfoot>
</table>
{notes}
<button onclick="window.print()">Print</button>
</body>
</html>
"#,
        number = escape_html(&invoice.invoice_number),
        school_name = escape_html(&school.name),
        school_address = escape_html(&school.address),
        school_phone = escape_html(&school.phone),
        student_name = escape_html(&student.full_name()),
        admission = escape_html(&student.admission_number),
        term = escape_html(&invoice.term),
        year = escape_html(&invoice.academic_year),
        issued = invoice.created_at.format("%Y-%m-%d"),
        status = invoice.status,
        total = invoice.total_amount,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::invoices::entities::{InvoiceItem, InvoiceStatus};
    use crate::models::students::entities::StudentStatus;
    use rust_decimal::Decimal;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>Tom & \"Jerry\"</b>"),
            "&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_render_invoice_html() {
        let now = chrono::Utc::now();
        let invoice = Invoice {
            id: 1,
            invoice_number: "INV-2025-0001".to_string(),
            student_id: 1,
            term: "Term 1".to_string(),
            academic_year: "2025/2026".to_string(),
            items: vec![
                InvoiceItem {
                    description: "Tuition".to_string(),
                    amount: Decimal::new(300, 0),
                },
                InvoiceItem {
                    description: "<script>".to_string(),
                    amount: Decimal::new(20, 0),
                },
            ],
            total_amount: Decimal::new(320, 0),
            due_date: None,
            status: InvoiceStatus::Unpaid,
            notes: None,
            created_by: None,
            created_at: now,
            updated_at: now,
        };
        let student = Student {
            id: 1,
            admission_number: "ADM001".to_string(),
            first_name: "Ama".to_string(),
            last_name: "Mensah".to_string(),
            gender: None,
            date_of_birth: None,
            class_id: None,
            guardian_name: None,
            guardian_phone: None,
            status: StudentStatus::Active,
            created_at: now,
            updated_at: now,
        };
        let school = SchoolConfig {
            name: "Test School".to_string(),
            address: "Main St".to_string(),
            phone: "000".to_string(),
            currency: "GHS".to_string(),
        };

        let html = render_invoice_html(&invoice, &student, &school);
        assert!(html.contains("Invoice INV-2025-0001"));
        assert!(html.contains("Test School"));
        assert!(html.contains("Ama Mensah (ADM001)"));
        assert!(html.contains("GHS 320.00"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains(">unpaid<"));
    }
}
