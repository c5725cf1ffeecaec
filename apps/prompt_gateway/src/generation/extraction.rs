use serde_json::Value;

/// One known place the upstream may put the generated text.
pub struct ExtractionRule {
    pub name: &'static str,
    extract: fn(&Value) -> Option<String>,
}

impl ExtractionRule {
    pub fn apply(&self, payload: &Value) -> Option<String> {
        (self.extract)(payload)
    }
}

/// Tried in order; the first rule yielding a non-empty string wins.
pub const EXTRACTION_RULES: &[ExtractionRule] = &[
    ExtractionRule {
        name: "candidates[0].content[0].text",
        extract: candidate_content_list,
    },
    ExtractionRule {
        name: "candidates[0].content.parts[*].text",
        extract: candidate_content_parts,
    },
    ExtractionRule {
        name: "candidates[0].text",
        extract: candidate_text,
    },
    ExtractionRule {
        name: "output[0].content",
        extract: output_content,
    },
    ExtractionRule {
        name: "text",
        extract: top_level_text,
    },
];

/// Never fails: an unrecognised shape comes back as its serialized JSON.
pub fn extract_text(payload: &Value) -> String {
    for rule in EXTRACTION_RULES {
        if let Some(text) = rule.apply(payload) {
            tracing::debug!(rule = rule.name, "extracted upstream text");
            return text;
        }
    }

    tracing::warn!("unrecognised upstream response shape, returning raw body");
    payload.to_string()
}

fn non_empty(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn candidate_content_list(payload: &Value) -> Option<String> {
    non_empty(payload.pointer("/candidates/0/content/0/text"))
}

fn candidate_content_parts(payload: &Value) -> Option<String> {
    let parts = payload.pointer("/candidates/0/content/parts")?.as_array()?;
    let joined: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    (!joined.is_empty()).then_some(joined)
}

fn candidate_text(payload: &Value) -> Option<String> {
    non_empty(payload.pointer("/candidates/0/text"))
}

fn output_content(payload: &Value) -> Option<String> {
    match payload.pointer("/output/0/content")? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        content @ Value::Array(_) => non_empty(content.pointer("/0/text")),
        _ => None,
    }
}

fn top_level_text(payload: &Value) -> Option<String> {
    non_empty(payload.get("text"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn known_shapes() {
        let cases = [
            json!({ "candidates": [{ "content": [{ "text": "a" }] }] }),
            json!({ "candidates": [{ "content": { "parts": [{ "text": "a" }] } }] }),
            json!({ "candidates": [{ "text": "a" }] }),
            json!({ "output": [{ "content": "a" }] }),
            json!({ "output": [{ "content": [{ "text": "a" }] }] }),
            json!({ "text": "a" }),
        ];
        for payload in cases {
            assert_eq!(extract_text(&payload), "a", "payload: {payload}");
        }
    }

    #[test]
    fn parts_are_joined() {
        let payload = json!({
            "candidates": [{ "content": { "role": "model", "parts": [{ "text": "Act as " }, { "text": "a tutor." }] } }]
        });
        assert_eq!(extract_text(&payload), "Act as a tutor.");
    }

    #[test]
    fn earlier_rules_win() {
        let payload = json!({
            "candidates": [{ "content": [{ "text": "first" }], "text": "second" }],
            "text": "last"
        });
        assert_eq!(extract_text(&payload), "first");
    }

    #[test]
    fn empty_matches_fall_through() {
        let payload = json!({
            "candidates": [{ "content": [{ "text": "" }], "text": "" }],
            "output": [{ "content": 7 }],
            "text": "fallback"
        });
        assert_eq!(extract_text(&payload), "fallback");
    }

    #[test]
    fn unknown_shape_returns_raw_json() {
        let payload = json!({ "filters": [{ "reason": "OTHER" }] });
        assert_eq!(extract_text(&payload), r#"{"filters":[{"reason":"OTHER"}]}"#);

        assert_eq!(extract_text(&Value::Null), "null");
    }
}
