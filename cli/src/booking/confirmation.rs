//! # Booking Confirmation
//!
//! File: cli/src/booking/confirmation.rs
//!
//! ## Overview
//!
//! Turns the final answer sheet into the printed booking summary. A fresh
//! booking reference (`GAH-` plus six random digits) is generated each time a
//! confirmation is built. References are display-only and not guaranteed to be
//! unique.
//!
//! Summary fields are looked up by keyword in the question text rather than by
//! exact wording, so custom and extended catalogs render correctly. Missing
//! answers fall back to a per-field default (`N/A`, `No` for breakfast,
//! `Standard` for the room type). Answered questions that match no field are
//! listed under "Additional Details".
//!
use crate::booking::answers::AnswerSheet;
use crate::booking::catalog::Catalog;
use rand::Rng;
use std::fmt;

const WIDTH: usize = 50;
const BOOKING_PREFIX: &str = "GAH";

/// Display-only booking reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingId(String);

impl BookingId {
    pub fn generate() -> Self {
        Self::from_rng(&mut rand::thread_rng())
    }

    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let suffix: u32 = rng.gen_range(100_000..=999_999);
        Self(format!("{}-{}", BOOKING_PREFIX, suffix))
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A summary field: label, keyword matched against question text, default.
struct FieldSpec {
    label: &'static str,
    keyword: &'static str,
    default: &'static str,
}

const FIELDS: [FieldSpec; 6] = [
    FieldSpec {
        label: "📅 Check-in & Check-out",
        keyword: "date",
        default: "N/A",
    },
    FieldSpec {
        label: "👥 Total Guests",
        keyword: "guests",
        default: "N/A",
    },
    FieldSpec {
        label: "🍽️ Breakfast Included",
        keyword: "breakfast",
        default: "No",
    },
    FieldSpec {
        label: "🛏️ Room Type",
        keyword: "room",
        default: "Standard",
    },
    FieldSpec {
        label: "💳 Payment Method",
        keyword: "payment",
        default: "N/A",
    },
    FieldSpec {
        label: "📞 Contact Number",
        keyword: "contact number",
        default: "N/A",
    },
];

/// Snapshot of a completed booking.
#[derive(Debug, Clone)]
pub struct Confirmation {
    pub booking_id: BookingId,
    pub hotel_name: String,
    pub fields: Vec<(&'static str, String)>,
    pub additional: Vec<(String, String)>,
}

impl Confirmation {
    pub fn new(hotel_name: &str, catalog: &Catalog, sheet: &AnswerSheet) -> Self {
        Self::with_id(BookingId::generate(), hotel_name, catalog, sheet)
    }

    pub fn with_id(
        booking_id: BookingId,
        hotel_name: &str,
        catalog: &Catalog,
        sheet: &AnswerSheet,
    ) -> Self {
        let matches_field = |question: &str| {
            let lower = question.to_lowercase();
            FIELDS.iter().any(|f| lower.contains(f.keyword))
        };

        let fields = FIELDS
            .iter()
            .map(|field| {
                let value = catalog
                    .questions()
                    .iter()
                    .filter(|q| q.to_lowercase().contains(field.keyword))
                    .find_map(|q| sheet.get(q))
                    .unwrap_or(field.default);
                (field.label, value.to_string())
            })
            .collect();

        let additional = catalog
            .questions()
            .iter()
            .filter(|q| !matches_field(q.as_str()))
            .filter_map(|q| sheet.get(q).map(|a| (q.clone(), a.to_string())))
            .collect();

        Self {
            booking_id,
            hotel_name: hotel_name.to_string(),
            fields,
            additional,
        }
    }

    /// Value shown for a field label, if the label exists.
    pub fn field(&self, label_fragment: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(label, _)| label.contains(label_fragment))
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(WIDTH);
        let title = format!("🏨 {} Booking Confirmation 🏨", self.hotel_name);

        writeln!(f, "\n🎉 Yay!!! Your Booking is Confirmed!! 🎉\n")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "{:^width$}", title, width = WIDTH)?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "📌 Booking ID: {}", self.booking_id)?;
        for (label, value) in &self.fields {
            writeln!(f, "{}: {}", label, value)?;
        }
        if !self.additional.is_empty() {
            writeln!(f, "{}", "-".repeat(WIDTH))?;
            writeln!(f, "📝 Additional Details")?;
            for (question, answer) in &self.additional {
                writeln!(f, "{}: {}", question, answer)?;
            }
        }
        writeln!(f, "{}", rule)?;
        writeln!(f, "\n📩 A confirmation email & SMS will be sent to you shortly.")?;
        write!(
            f,
            "Thank you for choosing {}! Have a pleasant stay. 😊",
            self.hotel_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::catalog::{
        CONTACT_QUESTION, DATE_QUESTION, GUESTS_QUESTION, NAME_QUESTION, ROOM_QUESTION,
    };
    use rand::{rngs::StdRng, SeedableRng};
    use regex::Regex;

    #[test]
    fn test_booking_id_pattern() {
        let pattern = Regex::new(r"^GAH-\d{6}$").unwrap();
        for _ in 0..200 {
            let id = BookingId::generate();
            assert!(pattern.is_match(&id.to_string()), "bad id {}", id);
        }
        let mut rng = StdRng::seed_from_u64(7);
        assert!(pattern.is_match(&BookingId::from_rng(&mut rng).to_string()));
    }

    #[test]
    fn test_defaults_for_empty_sheet() {
        let confirmation =
            Confirmation::new("Grand Azure Hotel", &Catalog::standard(), &AnswerSheet::new());
        assert_eq!(confirmation.field("Check-in"), Some("N/A"));
        assert_eq!(confirmation.field("Guests"), Some("N/A"));
        assert_eq!(confirmation.field("Breakfast"), Some("No"));
        assert_eq!(confirmation.field("Room Type"), Some("Standard"));
        assert_eq!(confirmation.field("Payment"), Some("N/A"));
        assert_eq!(confirmation.field("Contact"), Some("N/A"));
        assert!(confirmation.additional.is_empty());
    }

    #[test]
    fn test_partial_sheet_renders() {
        let mut sheet = AnswerSheet::new();
        sheet.record(NAME_QUESTION, "Ada").unwrap();
        sheet.record(DATE_QUESTION, "July 15-20, 2025").unwrap();
        sheet.record(GUESTS_QUESTION, "2").unwrap();
        sheet.record(ROOM_QUESTION, "Suite").unwrap();
        let confirmation = Confirmation::with_id(
            BookingId("GAH-123456".into()),
            "Grand Azure Hotel",
            &Catalog::standard(),
            &sheet,
        );
        let text = confirmation.to_string();

        assert!(text.contains("📌 Booking ID: GAH-123456"));
        assert!(text.contains("📅 Check-in & Check-out: July 15-20, 2025"));
        assert!(text.contains("👥 Total Guests: 2"));
        assert!(text.contains("🍽️ Breakfast Included: No"));
        assert!(text.contains("🛏️ Room Type: Suite"));
        assert!(text.contains("💳 Payment Method: N/A"));
        assert!(text.contains("What is your name?: Ada"));
        assert!(text.contains("Thank you for choosing Grand Azure Hotel!"));
        assert!(!text.contains(CONTACT_QUESTION));
    }

    #[test]
    fn test_extended_catalog_extras() {
        let catalog = Catalog::extended();
        let mut sheet = AnswerSheet::new();
        sheet
            .record("Do you need airport pickup service?", "Yes")
            .unwrap();
        sheet.record(CONTACT_QUESTION, "0123456789").unwrap();
        let confirmation = Confirmation::new("Seaside Inn", &catalog, &sheet);
        assert_eq!(confirmation.field("Contact"), Some("0123456789"));
        assert_eq!(
            confirmation.additional,
            vec![(
                "Do you need airport pickup service?".to_string(),
                "Yes".to_string()
            )]
        );
    }
}
