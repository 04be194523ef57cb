//! Display texts for coded patient fields, in Brazilian Portuguese.

use chrono::{DateTime, Utc};
use sonovet_models::{Sex, SizeClass, Species};

pub fn species_label(species: Species) -> &'static str {
    match species {
        Species::Dog => "Canino",
        Species::Cat => "Felino",
    }
}

pub fn sex_label(sex: Sex) -> &'static str {
    match sex {
        Sex::Male => "Macho",
        Sex::Female => "Fêmea",
    }
}

pub fn size_label(size: SizeClass) -> String {
    capitalize(size.as_str())
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Whole kilograms keep one decimal place (`30.0`), others print as-is.
pub fn format_weight(weight: f64) -> String {
    if weight.is_finite() && weight.fract() == 0.0 {
        format!("{weight:.1}")
    } else {
        format!("{weight}")
    }
}

pub fn format_exam_date(date: &DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn capitalize_matches_title_rules() {
        assert_eq!(capitalize("large"), "Large");
        assert_eq!(capitalize("mEDIUM"), "Medium");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn weight_formatting() {
        assert_eq!(format_weight(30.0), "30.0");
        assert_eq!(format_weight(4.25), "4.25");
    }

    #[test]
    fn exam_date_is_day_month_year() {
        let date = Utc.with_ymd_and_hms(2024, 7, 3, 15, 0, 0).unwrap();
        assert_eq!(format_exam_date(&date), "03/07/2024");
    }

    #[test]
    fn coded_labels() {
        assert_eq!(species_label(Species::Dog), "Canino");
        assert_eq!(species_label(Species::Cat), "Felino");
        assert_eq!(sex_label(Sex::Female), "Fêmea");
        assert_eq!(size_label(SizeClass::Small), "Small");
    }
}
