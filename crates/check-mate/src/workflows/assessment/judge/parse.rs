use serde::Deserialize;

use super::JudgeError;

#[derive(Debug, Deserialize)]
struct RawVerdict {
    #[serde(default)]
    fulfilled: bool,
    #[serde(default)]
    remarks: String,
}

/// Parsed `{fulfilled, remarks}` reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub fulfilled: bool,
    pub remarks: String,
}

/// Parses the model reply. Surrounding prose or a Markdown fence around the
/// JSON object is tolerated; anything else is a malformed verdict.
pub fn parse_verdict(raw: &str) -> Result<Verdict, JudgeError> {
    let json = extract_json_object(raw)
        .ok_or_else(|| JudgeError::MalformedVerdict("no JSON object in reply".to_string()))?;

    let verdict: RawVerdict = serde_json::from_str(json)
        .map_err(|err| JudgeError::MalformedVerdict(err.to_string()))?;

    Ok(Verdict {
        fulfilled: verdict.fulfilled,
        remarks: verdict.remarks.trim().to_string(),
    })
}

fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&raw[start..=end])
}
