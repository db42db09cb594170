use regex::Regex;

/// Patterns that mark an explicit final answer, tried in order. Captures
/// stop at line ends so a multi-line response only contributes the
/// answer line itself.
const ANSWER_PATTERNS: &[&str] = &[
    r"(?i)(?:final\s+)?answer\s*:?\s*([^\n\r]+)",
    r"(?i)(?:the\s+)?(?:solution|result)\s+is\s*:?\s*([^\n\r]+)",
    r"(?i)therefore\s*,?\s*([^\n\r]+)",
    r"(?i)thus\s*,?\s*([^\n\r]+)",
];

/// Pull the substring most likely to be the final answer out of a
/// free-form solver response. Falls back to the last short
/// non-question line, then to the whole trimmed input.
pub fn extract_answer(response: &str) -> String {
    if response.is_empty() {
        return String::new();
    }

    for pattern in ANSWER_PATTERNS {
        let re = Regex::new(pattern).unwrap();
        if let Some(caps) = re.captures(response) {
            if let Some(m) = caps.get(1) {
                return m.as_str().trim().to_string();
            }
        }
    }

    for line in response.trim().lines().rev() {
        let line = line.trim();
        if !line.is_empty() && !line.ends_with('?') && line.len() < 100 {
            return line.to_string();
        }
    }

    response.trim().to_string()
}
