use sonovet_models::{Exam, Patient, Settings};

use crate::document::{Align, ReportDocument};
use crate::labels;

pub const REPORT_TITLE: &str = "LAUDO DE ULTRASSONOGRAFIA ABDOMINAL";
pub const PATIENT_SECTION: &str = "Dados do Paciente";
pub const FINDINGS_SECTION: &str = "Achados Ultrassonográficos";
pub const CONCLUSION_SECTION: &str = "Conclusão";

/// Everything the report is assembled from.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub patient: &'a Patient,
    pub exam: &'a Exam,
    pub settings: Option<&'a Settings>,
}

/// Lays out letterhead, title, patient summary and per-organ findings.
///
/// Organs whose report text is blank are left out. The letterhead is only
/// emitted when a clinic name is configured.
pub fn build_exam_report(ctx: ReportContext<'_>) -> ReportDocument {
    let ReportContext {
        patient,
        exam,
        settings,
    } = ctx;
    let mut doc = ReportDocument::new(REPORT_TITLE);

    if let Some(settings) = settings.filter(|s| s.has_letterhead()) {
        letterhead(&mut doc, settings);
    }

    doc.aligned_heading(REPORT_TITLE, 1, Align::Center).spacer();

    doc.heading(PATIENT_SECTION, 2)
        .paragraph(format!("Nome: {}", patient.name))
        .paragraph(format!("Espécie: {}", labels::species_label(patient.species)))
        .paragraph(format!("Raça: {}", patient.breed))
        .paragraph(format!("Peso: {} kg", labels::format_weight(patient.weight)))
        .paragraph(format!("Porte: {}", labels::size_label(patient.size)))
        .paragraph(format!("Sexo: {}", labels::sex_label(patient.sex)));
    if patient.is_neutered {
        doc.paragraph("Paciente Castrado");
    }
    if let Some(owner) = patient.owner_name.as_deref().filter(|o| !o.is_empty()) {
        doc.paragraph(format!("Tutor: {owner}"));
    }
    doc.paragraph(format!(
        "Data do Exame: {}",
        labels::format_exam_date(&exam.exam_date)
    ))
    .spacer();

    doc.heading(FINDINGS_SECTION, 2);
    for organ in exam.organs_data.iter().filter(|o| o.has_report_text()) {
        doc.heading(organ.organ_name.as_str(), 3)
            .paragraph(organ.report_text.trim_end())
            .spacer();
    }

    let conclusion = exam.final_report.trim();
    if !conclusion.is_empty() {
        doc.heading(CONCLUSION_SECTION, 2).paragraph(conclusion);
    }

    doc
}

fn letterhead(doc: &mut ReportDocument, settings: &Settings) {
    if let Some(name) = settings.clinic_name.as_deref() {
        doc.aligned_heading(name, 1, Align::Center);
    }
    if let Some(address) = settings.clinic_address.as_deref() {
        doc.aligned_paragraph(address, Align::Center);
    }
    if settings.veterinarian_name.is_some() || settings.crmv.is_some() {
        doc.aligned_paragraph(
            format!(
                "{} - CRMV: {}",
                settings.veterinarian_name.as_deref().unwrap_or_default(),
                settings.crmv.as_deref().unwrap_or_default()
            ),
            Align::Center,
        );
    }
    doc.spacer();
}
