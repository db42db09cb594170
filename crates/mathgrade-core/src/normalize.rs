use regex::Regex;

/// Leading labels stripped before comparison. First match wins, one strip
/// per call.
const LABEL_PREFIXES: &[&str] = &[
    "answer:",
    "solution:",
    "result:",
    "the answer is",
    "final answer:",
];

const SYMBOL_REPLACEMENTS: &[(&str, &str)] = &[
    ("°", " degrees"),
    ("∠", "angle "),
    ("∆", "triangle "),
    ("π", "pi"),
    ("√", "sqrt"),
    ("²", "^2"),
    ("³", "^3"),
    ("¼", "1/4"),
    ("½", "1/2"),
    ("¾", "3/4"),
    ("∞", "infinity"),
];

const UNIT_REPLACEMENTS: &[(&str, &str)] = &[
    ("cm^3", "cubic cm"),
    ("cm³", "cubic cm"),
    ("m^2", "square m"),
    ("m²", "square m"),
    ("kg", "kilograms"),
    ("litres", "liters"),
];

/// Canonicalize an answer string for comparison. Total and idempotent:
/// empty input yields empty output, and re-normalizing a normalized
/// string is a no-op. Step order matters; later steps assume the earlier
/// canonicalization already happened.
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let mut s = raw.to_lowercase().trim().to_string();

    for prefix in LABEL_PREFIXES {
        if let Some(rest) = s.strip_prefix(prefix) {
            s = rest.trim().to_string();
            break;
        }
    }

    for (symbol, replacement) in SYMBOL_REPLACEMENTS {
        if s.contains(symbol) {
            s = s.replace(symbol, replacement);
        }
    }

    s = normalize_fractions(&s);
    s = normalize_percentages(&s);
    s = normalize_units(&s);

    let s = re(r"\s+").replace_all(&s, " ").into_owned();
    s.trim_matches(|c: char| c.is_ascii_punctuation() || c == ' ')
        .to_string()
}

/// Mixed numbers like "1 1/2" become improper fractions ("3/2"), and
/// whitespace around the slash collapses ("3 / 4" -> "3/4").
fn normalize_fractions(text: &str) -> String {
    let text = re(r"(\d+)\s+(\d+)/(\d+)").replace_all(text, |caps: &regex::Captures<'_>| {
        match (
            caps[1].parse::<i64>(),
            caps[2].parse::<i64>(),
            caps[3].parse::<i64>(),
        ) {
            (Ok(whole), Ok(num), Ok(den)) => format!("{}/{}", whole * den + num, den),
            // digits too large to parse: leave the text as written
            _ => caps[0].to_string(),
        }
    });
    re(r"(\d+)\s*/\s*(\d+)")
        .replace_all(&text, "$1/$2")
        .into_owned()
}

fn normalize_percentages(text: &str) -> String {
    re(r"(\d+(?:\.\d+)?)\s*%")
        .replace_all(text, "$1 percent")
        .into_owned()
}

fn normalize_units(text: &str) -> String {
    let mut s = text.to_string();
    for (unit, replacement) in UNIT_REPLACEMENTS {
        if s.contains(unit) {
            s = s.replace(unit, replacement);
        }
    }
    // word boundary keeps "minutes" stable on re-normalization
    re(r"\bmins?\b").replace_all(&s, "minutes").into_owned()
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}
