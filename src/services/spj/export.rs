//! Ekspor dokumen SPJ ke XLSX

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::error;

use super::SpjService;
use crate::middlewares::RequireJWT;
use crate::models::spj::entities::SpjStatus;
use crate::models::spj::responses::{DraftForm, SpjWithRelations};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

/// Unduh dokumen SPJ lengkap sebagai XLSX.
/// Hanya tersedia untuk pengajuan berstatus `completed`; setiap unduhan
/// dicatat di log aktivitas.
pub async fn handle_download(
    service: &SpjService,
    spj_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Autentikasi diperlukan",
        )));
    };

    let detail = match storage.get_spj_with_relations(spj_id).await {
        Ok(Some(detail)) => detail,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SpjNotFound,
                "SPJ tidak ditemukan",
            )));
        }
        Err(e) => return Ok(storage_error_response(&e)),
    };

    if detail.submission.status != SpjStatus::Completed {
        return Ok(
            HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
                ErrorCode::SpjNotCompleted,
                "Dokumen hanya dapat diunduh setelah SPJ selesai diverifikasi",
            )),
        );
    }

    match generate_xlsx(&detail) {
        Ok(buffer) => {
            if let Err(e) = storage.log_activity(spj_id, user.id, "download").await {
                error!("Failed to log download of SPJ {}: {}", spj_id, e);
            }

            let timestamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
            let filename = format!("spj_{spj_id}_{timestamp}.xlsx");

            Ok(HttpResponse::Ok()
                .content_type("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{filename}\""),
                ))
                .body(buffer))
        }
        Err(e) => {
            error!("Failed to generate XLSX for SPJ {}: {}", spj_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Gagal membuat dokumen",
                )),
            )
        }
    }
}

/// Unduh draf form 1-3 sebagai XLSX untuk dicetak dan ditandatangani basah.
/// Hanya operator pemilik pengajuan yang dapat mengunduh draf.
pub async fn handle_download_draft(
    service: &SpjService,
    spj_id: i64,
    form_type: i32,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Autentikasi diperlukan",
        )));
    };

    if user.role != UserRole::Operator {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Hanya operator yang dapat mengunduh draf form",
        )));
    }

    let submission = match storage.get_spj_by_id(spj_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SpjNotFound,
                "SPJ tidak ditemukan",
            )));
        }
        Err(e) => return Ok(storage_error_response(&e)),
    };

    if submission.operator_id != user.id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Anda tidak memiliki akses ke pengajuan ini",
        )));
    }

    let draft = match storage.get_draft_form(spj_id, form_type).await {
        Ok(draft) => draft,
        Err(e) => return Ok(storage_error_response(&e)),
    };

    match generate_draft_xlsx(&draft, form_type) {
        Ok(buffer) => {
            let filename = format!("spj_{spj_id}_form_{form_type}_draf.xlsx");

            Ok(HttpResponse::Ok()
                .content_type("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{filename}\""),
                ))
                .body(buffer))
        }
        Err(e) => {
            error!(
                "Failed to generate draft XLSX for SPJ {} form {}: {}",
                spj_id, form_type, e
            );
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Gagal membuat dokumen",
                )),
            )
        }
    }
}

/// Menyusun buku kerja: satu lembar ringkasan + satu lembar per form
fn generate_xlsx(detail: &SpjWithRelations) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let header_format = Format::new().set_bold();
    let title_format = Format::new().set_bold().set_font_size(14);

    let sheet = workbook
        .add_worksheet()
        .set_name("Ringkasan")
        .map_err(|e| e.to_string())?;
    write_summary_sheet(sheet, &header_format, &title_format, detail)?;

    for form in &detail.forms {
        let sheet = workbook
            .add_worksheet()
            .set_name(format!("Form {}", form.form_type))
            .map_err(|e| e.to_string())?;
        write_form_sheet(sheet, &header_format, form)?;
    }

    workbook.save_to_buffer().map_err(|e| e.to_string())
}

fn write_summary_sheet(
    sheet: &mut Worksheet,
    header_format: &Format,
    title_format: &Format,
    detail: &SpjWithRelations,
) -> Result<(), String> {
    sheet
        .write_string_with_format(0, 0, "Surat Pertanggungjawaban (SPJ)", title_format)
        .map_err(|e| e.to_string())?;

    sheet
        .write_string_with_format(2, 0, "Keterangan", header_format)
        .map_err(|e| e.to_string())?;
    sheet
        .write_string_with_format(2, 1, "Nilai", header_format)
        .map_err(|e| e.to_string())?;

    let submission = &detail.submission;
    let rows: Vec<(&str, String)> = vec![
        ("ID RUP", submission.rup_id.clone()),
        ("Tahun Anggaran", submission.year.to_string()),
        ("Nama Kegiatan", submission.activity_name.clone()),
        ("Uraian Kegiatan", submission.activity.clone()),
        ("Status", submission.status.to_string()),
        ("Operator", detail.operator.name.clone()),
        (
            "Tanggal Dibuat",
            submission.created_at.format("%d-%m-%Y %H:%M").to_string(),
        ),
    ];

    let mut row = 3u32;
    for (label, value) in rows {
        write_pair(sheet, row, label, &value)?;
        row += 1;
    }

    // Bagian lembar verifikasi bila sudah ada
    if let Some(verification) = &detail.verification {
        row += 1;
        sheet
            .write_string_with_format(row, 0, "Lembar Verifikasi", header_format)
            .map_err(|e| e.to_string())?;
        row += 1;

        write_pair(sheet, row, "Status Verifikasi", &verification.sheet.status)?;
        row += 1;

        if let Some(validator) = &verification.validator {
            write_pair(sheet, row, "Pengurus Barang", &validator.name)?;
            row += 1;
        }
        if let Some(notes) = &verification.sheet.notes {
            write_pair(sheet, row, "Catatan Verifikasi", notes)?;
            row += 1;
        }
        if let Some(verifier) = &verification.verifier {
            write_pair(sheet, row, "PPK Keuangan", &verifier.name)?;
            row += 1;
        }
        if let Some(final_notes) = &verification.sheet.final_notes {
            write_pair(sheet, row, "Catatan Final", final_notes)?;
        }
    }

    sheet.set_column_width(0, 24).map_err(|e| e.to_string())?;
    sheet.set_column_width(1, 50).map_err(|e| e.to_string())?;

    Ok(())
}

fn write_form_sheet(
    sheet: &mut Worksheet,
    header_format: &Format,
    form: &crate::models::spj::entities::SpjForm,
) -> Result<(), String> {
    sheet
        .write_string_with_format(0, 0, format!("Form {}", form.form_type), header_format)
        .map_err(|e| e.to_string())?;
    sheet
        .write_string(0, 1, form.status.to_string())
        .map_err(|e| e.to_string())?;

    if let Some(notes) = &form.notes {
        write_pair(sheet, 1, "Catatan", notes)?;
    }

    sheet
        .write_string_with_format(3, 0, "Isian", header_format)
        .map_err(|e| e.to_string())?;
    sheet
        .write_string_with_format(3, 1, "Nilai", header_format)
        .map_err(|e| e.to_string())?;

    // Isian form sebagai pasangan kunci-nilai
    let mut row = 4u32;
    if let Some(map) = form.data.as_object() {
        for (key, value) in map {
            write_pair(sheet, row, key, &render_value(value))?;
            row += 1;
        }
    }

    sheet.set_column_width(0, 28).map_err(|e| e.to_string())?;
    sheet.set_column_width(1, 50).map_err(|e| e.to_string())?;

    Ok(())
}

/// Buku kerja satu lembar berisi draf form beserta metadata pengajuan
fn generate_draft_xlsx(draft: &DraftForm, form_type: i32) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let header_format = Format::new().set_bold();
    let title_format = Format::new().set_bold().set_font_size(14);

    let sheet = workbook
        .add_worksheet()
        .set_name(format!("Form {form_type}"))
        .map_err(|e| e.to_string())?;

    sheet
        .write_string_with_format(0, 0, format!("Form {form_type} (Draf)"), &title_format)
        .map_err(|e| e.to_string())?;

    let metadata = &draft.metadata;
    let rows: Vec<(&str, String)> = vec![
        ("ID RUP", metadata.rup_id.clone()),
        ("Tahun Anggaran", metadata.year.to_string()),
        ("Nama Kegiatan", metadata.activity_name.clone()),
        ("Uraian Kegiatan", metadata.activity.clone()),
        ("Status", metadata.status.to_string()),
    ];

    let mut row = 2u32;
    for (label, value) in rows {
        write_pair(sheet, row, label, &value)?;
        row += 1;
    }

    row += 1;
    sheet
        .write_string_with_format(row, 0, "Isian", &header_format)
        .map_err(|e| e.to_string())?;
    sheet
        .write_string_with_format(row, 1, "Nilai", &header_format)
        .map_err(|e| e.to_string())?;
    row += 1;

    if let Some(map) = draft.form_data.as_object() {
        for (key, value) in map {
            write_pair(sheet, row, key, &render_value(value))?;
            row += 1;
        }
    }

    // Ruang tanda tangan basah di bawah isian
    row += 2;
    sheet
        .write_string(row, 0, "Tanda Tangan")
        .map_err(|e| e.to_string())?;
    sheet
        .write_string(row + 3, 0, "(..............................)")
        .map_err(|e| e.to_string())?;

    sheet.set_column_width(0, 28).map_err(|e| e.to_string())?;
    sheet.set_column_width(1, 50).map_err(|e| e.to_string())?;

    workbook.save_to_buffer().map_err(|e| e.to_string())
}

fn write_pair(sheet: &mut Worksheet, row: u32, label: &str, value: &str) -> Result<(), String> {
    sheet.write_string(row, 0, label).map_err(|e| e.to_string())?;
    sheet.write_string(row, 1, value).map_err(|e| e.to_string())?;
    Ok(())
}

fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::from("-"),
        other => other.to_string(),
    }
}
