use crate::corpus::Corpus;
use crate::errors::ParseError;
use crate::filter::{filter_words, SearchResult};
use crate::log::init_logger;
use crate::request::SearchRequest;
use wasm_bindgen::prelude::*;

use serde_wasm_bindgen::to_value;

/// Structured error information for JavaScript consumers
#[derive(serde::Serialize)]
struct WasmError {
    /// Error code (e.g., "E001", "WASM001")
    code: String,
    /// Display message
    message: String,
    /// Short description of error type
    description: String,
    /// Detailed explanation
    details: String,
    /// Optional helpful suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
}

impl From<Box<ParseError>> for WasmError {
    fn from(e: Box<ParseError>) -> Self {
        WasmError {
            code: e.code().to_string(),
            message: e.to_string(),
            description: e.description().to_string(),
            details: e.details().to_string(),
            help: e.help().map(|s| s.to_string()),
        }
    }
}

impl From<WasmError> for JsValue {
    fn from(e: WasmError) -> Self {
        let mut msg = format!("Error {}: {}", e.code, e.message);

        if !e.details.is_empty() {
            msg.push_str(&format!("\n\n{}", e.details));
        }

        if let Some(help) = e.help {
            msg.push_str(&format!("\n\nSuggestion: {}", help));
        }

        js_sys::Error::new(&msg).into()
    }
}

fn serialization_error(e: serde_wasm_bindgen::Error, code: &str, what: &str) -> JsValue {
    WasmError {
        code: code.to_string(),
        message: format!("serialization failed: {e}"),
        description: format!("Failed to serialize {what}"),
        details: format!("The {what} could not be converted to JavaScript format."),
        help: Some("This is an internal error. Please report this issue.".to_string()),
    }
    .into()
}

/// Initialize logging with the specified debug setting.
///
/// This function must be called from JavaScript after the WASM module loads.
#[wasm_bindgen]
pub fn initialize(debug_enabled: bool) {
    console_error_panic_hook::set_once();
    init_logger(debug_enabled);
    log::info!("WASM module initialized");
}

/// A [`SearchResult`] as handed to JavaScript, with the count spelled out.
#[derive(serde::Serialize)]
struct WasmSearchResult<'a> {
    words: &'a [String],
    count: usize,
}

impl<'a> From<&'a SearchResult> for WasmSearchResult<'a> {
    fn from(result: &'a SearchResult) -> Self {
        WasmSearchResult { words: &result.words, count: result.count() }
    }
}

/// JS entry: (words: string[], request: { length?, includeLetters?, excludeLetters?,
/// startsWith?, endsWith?, firstLetters?, lettersAtPositions? })
/// returns `{ words: string[], count: number }`, words in input order.
///
/// Request fields are the raw form text; empty strings count as not set.
#[wasm_bindgen]
pub fn filter_words_wasm(words: JsValue, request: JsValue) -> Result<JsValue, JsValue> {
    let words: Vec<String> = serde_wasm_bindgen::from_value(words).map_err(|e| WasmError {
        code: "WASM001".to_string(),
        message: format!("words must be string[]: {e}"),
        description: "Invalid word-list format".to_string(),
        details: "The words parameter must be a JavaScript array of strings.".to_string(),
        help: Some("Pass the array returned by parse_word_list, e.g. ['cane', 'casa', 'mela']".to_string()),
    })?;

    let request: SearchRequest = serde_wasm_bindgen::from_value(request).map_err(|e| WasmError {
        code: "WASM002".to_string(),
        message: format!("request must be an object of strings: {e}"),
        description: "Invalid search request".to_string(),
        details: "The request parameter must be an object whose fields are strings or undefined.".to_string(),
        help: Some("Example: { length: '5', lettersAtPositions: '0:c,2:t' }".to_string()),
    })?;

    let constraints = request.to_constraints().map_err(WasmError::from)?;

    let result = SearchResult {
        words: filter_words(&words, &constraints).into_iter().map(str::to_string).collect(),
    };

    to_value(&WasmSearchResult::from(&result))
        .map_err(|e| serialization_error(e, "WASM003", "search result"))
}

/// Turn the text of a word list into the sorted, deduplicated array of its words.
///
/// Non-alphabetic tokens are dropped, as when loading from disk.
#[wasm_bindgen]
pub fn parse_word_list(text: &str) -> Result<JsValue, JsValue> {
    let corpus = Corpus::parse_from_str(text);
    to_value(&corpus.words).map_err(|e| serialization_error(e, "WASM004", "word list"))
}

/// Build a plain-text report users can paste into a bug report.
#[wasm_bindgen]
pub fn get_debug_info(error_message: &str, word_list_size: usize) -> String {
    use std::fmt::Write;
    let mut report = String::new();

    // NB: writing to a String never fails
    let _ = writeln!(&mut report, "=== CERCAPAROLE DEBUG REPORT ===");
    let _ = writeln!(&mut report, "Version: {} ({})", env!("CARGO_PKG_VERSION"), env!("GIT_HASH_FULL"));
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Error");
    let _ = writeln!(&mut report, "{}", error_message);
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Input");
    let _ = writeln!(&mut report, "Word List Size: {}", word_list_size);
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "=== END DEBUG REPORT ===");

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_debug_info_structure() {
        let report = get_debug_info("Missing ':' in position item \"0c\"", 1000);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "=== CERCAPAROLE DEBUG REPORT ===");
        assert!(lines[1].starts_with(&format!("Version: {}", env!("CARGO_PKG_VERSION"))));
        assert_eq!(lines[3], "## Error");
        assert_eq!(lines[4], "Missing ':' in position item \"0c\"");
        assert_eq!(lines[6], "## Input");
        assert_eq!(lines[7], "Word List Size: 1000");
        assert_eq!(lines.last(), Some(&"=== END DEBUG REPORT ==="));
    }

    #[test]
    fn test_search_result_shape() {
        let result = SearchResult { words: vec!["gatto".to_string(), "gatta".to_string()] };
        let value = to_value(&WasmSearchResult::from(&result)).unwrap();

        let count = js_sys::Reflect::get(&value, &JsValue::from_str("count")).unwrap();
        assert_eq!(count.as_f64(), Some(2.0));
        let words = js_sys::Reflect::get(&value, &JsValue::from_str("words")).unwrap();
        let words: Vec<String> = serde_wasm_bindgen::from_value(words).unwrap();
        assert_eq!(words, result.words);
    }

    #[test]
    fn test_wasm_error_from_parse_error() {
        let e = WasmError::from(Box::new(ParseError::EmptyItem));
        assert_eq!(e.code, "E004");
        assert!(e.help.is_some());
    }
}
