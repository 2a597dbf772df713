use serde_json::Value;

use super::error::GenerationFailure;

/// Pull the JSON object out of untrusted provider text: drop code fences,
/// slice from the first `{` to the last `}`, parse. Shape checks happen in
/// the validator, not here.
pub fn extract_json(raw: &str) -> Result<Value, GenerationFailure> {
    let cleaned = raw.replace("```json", "").replace("```", "");

    let (Some(start), Some(end)) = (cleaned.find('{'), cleaned.rfind('}')) else {
        return Err(GenerationFailure::Extraction(
            "no JSON object in provider output".into(),
        ));
    };
    if end <= start {
        return Err(GenerationFailure::Extraction(
            "no JSON object in provider output".into(),
        ));
    }

    serde_json::from_str(&cleaned[start..=end])
        .map_err(|e| GenerationFailure::Extraction(format!("invalid JSON payload: {e}")))
}
