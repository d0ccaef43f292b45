//! Display formatting for prices, dates, typologies and areas.

use chrono::NaiveDate;

const CRORE: u64 = 10_000_000;
const LAKH: u64 = 100_000;

/// Formats a rupee amount the way Indian listings read: `₹1.25 Cr`, `₹85 L`, `₹45,000`.
#[must_use]
pub fn format_price(rupees: u64) -> String {
    // Amounts are rounded to hundredths of the unit they are shown in.
    let lakh_hundredths = rupees.saturating_add(500) / 1_000;
    if rupees >= CRORE || lakh_hundredths >= 10_000 {
        let crore_hundredths = rupees.saturating_add(50_000) / LAKH;
        return format!("₹{} Cr", trimmed_hundredths(crore_hundredths));
    }
    if rupees >= LAKH {
        return format!("₹{} L", trimmed_hundredths(lakh_hundredths));
    }
    format!("₹{}", group_indian(rupees))
}

#[must_use]
pub fn format_price_range(min: u64, max: u64) -> String {
    format!("{} - {}", format_price(min), format_price(max))
}

/// `Dec 2027` style possession dates.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// Collapses unit descriptors sharing a suffix: `["2 BHK", "3 BHK"]` becomes `2, 3 BHK`.
///
/// Mixed suffixes are joined as-is with `", "`.
#[must_use]
pub fn concatenate_typologies<S: AsRef<str>>(typologies: &[S]) -> String {
    let trimmed: Vec<&str> = typologies
        .iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .collect();

    if trimmed.len() < 2 {
        return trimmed.first().map(|t| (*t).to_string()).unwrap_or_default();
    }

    let split: Option<Vec<(&str, &str)>> = trimmed.iter().map(|t| t.rsplit_once(' ')).collect();
    if let Some(parts) = split {
        let suffix = parts[0].1;
        if parts.iter().all(|(_, s)| *s == suffix) {
            let prefixes: Vec<&str> = parts.iter().map(|(p, _)| p.trim()).collect();
            return format!("{} {suffix}", prefixes.join(", "));
        }
    }

    trimmed.join(", ")
}

#[must_use]
pub fn format_area_range(min: u32, max: u32) -> String {
    format!("{min} - {max} sqft")
}

/// One decimal place for the five-point propscore.
#[must_use]
pub fn format_propscore(score: f64) -> String {
    format!("{score:.1}")
}

fn trimmed_hundredths(hundredths: u64) -> String {
    let whole = hundredths / 100;
    let frac = hundredths % 100;
    if frac == 0 {
        whole.to_string()
    } else if frac % 10 == 0 {
        format!("{whole}.{}", frac / 10)
    } else {
        format!("{whole}.{frac:02}")
    }
}

/// Indian digit grouping: last three digits, then pairs (`12,34,567`).
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}
