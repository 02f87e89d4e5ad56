//! Plain-text rendering of results.
//!
//! Pure data→string formatting only; printing is left to the caller so the
//! core stays testable without a terminal. Missing record fields degrade to
//! "-" instead of failing — a malformed record still renders.

use crate::classify::classify_award_mode;
use crate::models::{CpvNode, Record};

/// Placeholder for missing field values.
const DASH: &str = "-";

fn text_or_dash(s: &str) -> &str {
    if s.trim().is_empty() {
        DASH
    } else {
        s
    }
}

/// Formats a monetary amount with two decimals and comma thousands grouping,
/// e.g. `1234567.891` → `"1,234,567.89"`.
pub fn format_amount(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{fraction:02}")
}

/// Formats an integer count with comma thousands grouping.
pub fn format_count(value: usize) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// The results meta line: total filtered count and how many are shown.
pub fn format_meta(total: usize, shown: usize) -> String {
    format!(
        "Results: {} (showing {})",
        format_count(total),
        format_count(shown)
    )
}

/// Renders one result card as a small text block.
///
/// `max_cpv_shown` truncates the CPV item list (the original UI shows the
/// first four).
pub fn format_card(record: &Record, max_cpv_shown: usize) -> String {
    let title = if record.title.trim().is_empty() {
        "(untitled)"
    } else {
        record.title.as_str()
    };

    let mode = classify_award_mode(record.procedure_type.as_deref());

    let cpv_items: Vec<&str> = record
        .cpvs
        .iter()
        .map(|c| c.cpv_item.as_str())
        .filter(|item| !item.is_empty())
        .collect();
    let cpv_text = if cpv_items.is_empty() {
        DASH.to_string()
    } else {
        cpv_items[..cpv_items.len().min(max_cpv_shown)].join(", ")
    };

    let loc = &record.location;
    let loc_parts: Vec<&str> = [
        loc.nuts_label.as_str(),
        loc.city.as_str(),
        loc.postal_code.as_str(),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect();
    let loc_text = if loc_parts.is_empty() {
        DASH.to_string()
    } else {
        loc_parts.join(" | ")
    };

    let pdf_text = record.pdf_url.as_deref().unwrap_or(DASH);

    let mut card = String::new();
    card.push_str(title);
    card.push('\n');
    card.push_str(&format!(
        "  Award mode: {} | Stage: {} | Date: {}\n",
        mode.display_name(),
        record.kind.display_name(),
        text_or_dash(&record.date)
    ));
    card.push_str(&format!(
        "  Ref: {} | Protocol: {}\n",
        text_or_dash(&record.reference_number),
        text_or_dash(&record.protocol_number)
    ));
    card.push_str(&format!(
        "  Organization: {}\n",
        text_or_dash(&record.organization)
    ));
    card.push_str(&format!("  Location: {loc_text}\n"));
    card.push_str(&format!(
        "  Procedure: {} | Contract type: {}\n",
        text_or_dash(record.procedure_type.as_deref().unwrap_or("")),
        text_or_dash(&record.contract_type)
    ));
    card.push_str(&format!(
        "  Amount: {} EUR\n",
        format_amount(record.amount_num)
    ));
    card.push_str(&format!("  CPV: {cpv_text}\n"));
    card.push_str(&format!("  PDF: {pdf_text}\n"));
    card
}

/// One line per selectable taxonomy option, `code - label`.
pub fn format_cpv_option(node: &CpvNode) -> String {
    if node.label.is_empty() {
        node.code.clone()
    } else {
        format!("{} - {}", node.code, node.label)
    }
}

#[cfg(test)]
mod tests {
    use super::{format_amount, format_card, format_count, format_cpv_option, format_meta};
    use crate::models::{CpvNode, CpvTag, Location, Record, RecordKind};

    #[test]
    fn test_format_amount_groups_thousands() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(999.9), "999.90");
        assert_eq!(format_amount(1234.5), "1,234.50");
        assert_eq!(format_amount(1234567.891), "1,234,567.89");
    }

    #[test]
    fn test_format_amount_negative() {
        assert_eq!(format_amount(-1500.0), "-1,500.00");
    }

    #[test]
    fn test_format_amount_rounds_half_up() {
        assert_eq!(format_amount(1.235), "1.24");
        assert_eq!(format_amount(1.234), "1.23");
    }

    #[test]
    fn test_format_count_and_meta() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(1234567), "1,234,567");
        assert_eq!(format_meta(1234, 200), "Results: 1,234 (showing 200)");
    }

    #[test]
    fn test_card_for_empty_record_uses_placeholders() {
        let card = format_card(&Record::default(), 4);
        assert!(card.starts_with("(untitled)"));
        assert!(card.contains("Stage: -"));
        assert!(card.contains("Award mode: Uncategorized"));
        assert!(card.contains("Location: -"));
        assert!(card.contains("CPV: -"));
        assert!(card.contains("PDF: -"));
        assert!(card.contains("Amount: 0.00 EUR"));
    }

    #[test]
    fn test_card_truncates_cpv_items_to_limit() {
        let record = Record {
            cpvs: (1..=6)
                .map(|i| CpvTag {
                    cpv_item: format!("3019200{i}-0"),
                    ..CpvTag::default()
                })
                .collect(),
            ..Record::default()
        };
        let card = format_card(&record, 4);
        assert!(card.contains("30192004-0"));
        assert!(!card.contains("30192005-0"));
    }

    #[test]
    fn test_card_renders_full_record() {
        let record = Record {
            kind: RecordKind::Contract,
            title: "Κλιματισμός κτιρίου".to_string(),
            date: "2024-05-14".to_string(),
            reference_number: "24SYMV009".to_string(),
            protocol_number: "4411".to_string(),
            organization: "Δήμος Χανίων".to_string(),
            procedure_type: Some("Απευθείας ανάθεση".to_string()),
            contract_type: "Services".to_string(),
            amount_num: 18600.0,
            pdf_url: Some("https://example.com/doc.pdf".to_string()),
            location: Location {
                nuts_label: "Κρήτη".to_string(),
                city: "Χανιά".to_string(),
                postal_code: "73100".to_string(),
                ..Location::default()
            },
            ..Record::default()
        };
        let card = format_card(&record, 4);
        assert!(card.starts_with("Κλιματισμός κτιρίου"));
        assert!(card.contains("Award mode: Direct award | Stage: Contract | Date: 2024-05-14"));
        assert!(card.contains("Ref: 24SYMV009 | Protocol: 4411"));
        assert!(card.contains("Location: Κρήτη | Χανιά | 73100"));
        assert!(card.contains("Amount: 18,600.00 EUR"));
        assert!(card.contains("PDF: https://example.com/doc.pdf"));
    }

    #[test]
    fn test_format_cpv_option() {
        let node = CpvNode {
            code: "30000000".to_string(),
            parent_code: String::new(),
            level: 2,
            label: "Office and computing machinery".to_string(),
        };
        assert_eq!(
            format_cpv_option(&node),
            "30000000 - Office and computing machinery"
        );

        let bare = CpvNode {
            label: String::new(),
            ..node
        };
        assert_eq!(format_cpv_option(&bare), "30000000");
    }
}
