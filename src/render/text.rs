//! Text helpers for the standard Helvetica fonts.

/// Encodes `text` for a WinAnsiEncoding font. Characters outside Latin-1 become `?`.
pub fn to_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

/// Number of characters `to_latin1` would replace with `?`.
pub fn unencodable_count(text: &str) -> usize {
    text.chars().filter(|&c| u32::from(c) > 0xFF).count()
}

/// Approximate Helvetica advance width in thousandths of an em.
fn glyph_width(c: char) -> i64 {
    match c {
        '0'..='9' => 556,
        ' ' | ',' | '.' | '/' | ':' | ';' | '!' | 'I' | 'f' | 't' => 278,
        'i' | 'j' | 'l' => 222,
        '-' | '(' | ')' | 'r' => 333,
        '%' => 889,
        'm' | 'M' => 833,
        'w' => 722,
        'W' => 944,
        'A'..='Z' => 667,
        _ => 556,
    }
}

/// Width in points of `text` set at `size`.
pub fn text_width(text: &str, size: i64) -> i64 {
    let thousandths: i64 = text.chars().map(glyph_width).sum();
    (thousandths * size + 999) / 1000
}

/// Shortens `text` with a trailing `...` so it fits in `max_width` points.
pub fn truncate_to_width(text: &str, size: i64, max_width: i64) -> String {
    if text_width(text, size) <= max_width {
        return text.to_string();
    }

    let budget = max_width - text_width("...", size);
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let advance = (glyph_width(c) * size + 999) / 1000;
        if used + advance > budget {
            break;
        }
        used += advance;
        out.push(c);
    }
    out.push_str("...");
    out
}

/// Formats minor units with thousands separators, e.g. `1234567` at 2 places is `12,345.67`.
pub fn format_amount(amount: i64, decimal_places: u32) -> String {
    let decimal_places = decimal_places.min(18);
    let divisor = 10u64.pow(decimal_places);
    let magnitude = amount.unsigned_abs();
    let whole = (magnitude / divisor).to_string();
    let fraction = magnitude % divisor;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0 { "-" } else { "" };
    if decimal_places == 0 {
        format!("{}{}", sign, grouped)
    } else {
        format!(
            "{}{}.{:0width$}",
            sign,
            grouped,
            fraction,
            width = decimal_places as usize
        )
    }
}

pub fn money(currency: &str, amount: i64, decimal_places: u32) -> String {
    format!("{}{}", currency, format_amount(amount, decimal_places))
}

/// Heading printed at the top of the first page for a payload `type`.
pub fn heading_for(doc_type: &str) -> String {
    let normalized = doc_type.trim().to_lowercase();
    match normalized.as_str() {
        "" => "DOCUMENT".to_string(),
        "invoice" => "INVOICE".to_string(),
        "estimate" | "quotation" => "QUOTATION".to_string(),
        "receipt" => "RECEIPT".to_string(),
        "delivery" => "DELIVERY NOTE".to_string(),
        _ => doc_type.trim().to_uppercase(),
    }
}
