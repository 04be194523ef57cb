mod exams;
mod patients;
mod reference_values;
mod settings;
mod templates;
