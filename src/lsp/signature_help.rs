//! Signature help inside function call argument lists.

use tower_lsp::lsp_types::{
    ParameterInformation, ParameterLabel, Position, SignatureHelp, SignatureInformation,
};

use super::context::enclosing_call;
use crate::document::LineIndex;
use crate::types::{FunctionId, FunctionSignature, OptionalArgs};

/// Build the signature label along with each parameter's offsets in it.
fn signature_information(
    signature: &FunctionSignature,
    policy: OptionalArgs,
) -> SignatureInformation {
    let params = signature.parameters(policy);
    let mut label = format!("{}(", signature.name);
    let mut parameters = Vec::with_capacity(params.len());

    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            label.push_str(", ");
        }
        let start = label.len() as u32;
        label.push_str(&param.to_string());
        parameters.push(ParameterInformation {
            label: ParameterLabel::LabelOffsets([start, label.len() as u32]),
            documentation: None,
        });
    }
    label.push_str(&format!(") -> {}", signature.return_type));

    SignatureInformation {
        label,
        documentation: None,
        parameters: Some(parameters),
        active_parameter: None,
    }
}

/// Signature help for the innermost call around the cursor.
///
/// The active parameter is clamped to the last slot, which stands for an
/// unbounded tail when the function has one.
pub fn signature_help_at_position(
    line_index: &LineIndex,
    position: Position,
    policy: OptionalArgs,
) -> Option<SignatureHelp> {
    let offset = line_index.position_to_offset(position)?;
    let call = enclosing_call(line_index.source(), offset)?;
    let signature = FunctionId::from_name(call.function)?.signature()?;

    let mut info = signature_information(signature, policy);
    let active = info
        .parameters
        .as_ref()
        .and_then(|p| p.len().checked_sub(1))
        .map(|last| call.argument.min(last) as u32);
    info.active_parameter = active;

    Some(SignatureHelp {
        signatures: vec![info],
        active_signature: Some(0),
        active_parameter: active,
    })
}
