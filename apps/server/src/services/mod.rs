//! Business services, one per entity plus images, reports, seeding and backup

pub mod backup;
pub mod exams;
pub mod images;
pub mod metrics;
pub mod patients;
pub mod reference_values;
pub mod reports;
pub mod seed;
pub mod settings;
pub mod templates;

pub use backup::{Backup, BackupService, RestoreSummary};
pub use exams::{ExamFilter, ExamService};
pub use images::{ImageContent, ImageService, ImageUpload};
pub use metrics::MetricsService;
pub use patients::{PatientFilter, PatientService};
pub use reference_values::{ReferenceValueFilter, ReferenceValueService};
pub use reports::{ExportedReport, ReportService};
pub use seed::{SeedOutcome, SeedService};
pub use settings::SettingsService;
pub use templates::{TemplateFilter, TemplateService};
