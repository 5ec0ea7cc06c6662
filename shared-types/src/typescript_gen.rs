use ts_rs::TS;

use crate::{
    Answer, AnswersResponse, ErrorResponse, ResponseRecord, SubmitResponseRequest,
    SubmitResponseResponse,
};

const HEADER: &str = "// Generated by generate_api_types. Do not edit.";

/// Every type the browser form needs, in dependency order
pub const API_TYPE_NAMES: &[&str] = &[
    "Answer",
    "AnswersResponse",
    "SubmitResponseRequest",
    "SubmitResponseResponse",
    "ResponseRecord",
    "ErrorResponse",
];

fn declaration(name: &str) -> Option<String> {
    let decl = match name {
        "Answer" => Answer::decl(),
        "AnswersResponse" => AnswersResponse::decl(),
        "SubmitResponseRequest" => SubmitResponseRequest::decl(),
        "SubmitResponseResponse" => SubmitResponseResponse::decl(),
        "ResponseRecord" => ResponseRecord::decl(),
        "ErrorResponse" => ErrorResponse::decl(),
        _ => return None,
    };
    Some(format!("export {}", decl.trim()))
}

/// Renders the named types as one TypeScript module
pub fn generate_typescript_definitions(
    type_names: &[&str],
) -> Result<String, Box<dyn std::error::Error>> {
    if type_names.is_empty() {
        return Err("No type names provided".into());
    }

    let declarations = type_names
        .iter()
        .map(|name| {
            declaration(name).ok_or_else(|| {
                format!(
                    "Unknown type: '{}', expected one of {}",
                    name,
                    API_TYPE_NAMES.join(", ")
                )
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(format!("{}\n\n{}", HEADER, declarations.join("\n\n")))
}
