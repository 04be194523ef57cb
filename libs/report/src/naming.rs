use chrono::{DateTime, Utc};

/// File name the rendered report is stored under; one per exam, overwritten on re-export.
pub fn storage_file_name(exam_id: &str) -> String {
    format!("laudo_{}.pdf", sanitize(exam_id))
}

/// Human-readable download name: `laudo_<patient>_<YYYYMMDD>.pdf`.
pub fn download_file_name(patient_name: &str, exam_date: &DateTime<Utc>) -> String {
    format!(
        "laudo_{}_{}.pdf",
        sanitize(patient_name.trim()),
        exam_date.format("%Y%m%d")
    )
}

/// Replaces anything that is not safe inside a file name.
fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim_matches('.')
        .to_string()
}
