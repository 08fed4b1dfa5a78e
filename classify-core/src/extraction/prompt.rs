//! The fixed extraction prompt sent to the remote model.

/// Template for the extraction prompt. `{text}` is replaced with the input verbatim.
pub const EXTRACTION_PROMPT_TEMPLATE: &str = r#"Extract the following fields from the text:
- zip (postal code)
- brand
- category
- time_pref
If a field is missing, leave it empty.
Return ONLY valid JSON:
{"zip": "string", "brand": "string", "category": "string", "time_pref": "string"}

Text:
{text}
"#;

/// Builds the extraction prompt for `text`.
///
/// The input text is the only parameter; everything else is fixed.
#[must_use]
pub fn build_extraction_prompt(text: &str) -> String {
    EXTRACTION_PROMPT_TEMPLATE.replacen("{text}", text, 1)
}
