//! Runtime value classification.

use crate::value::Value;

use super::tag::TypeTag;

/// Maps a runtime value to its canonical type tag.
///
/// - Thenables (pending values and objects with a callable `then`) are
///   `promise`; their payload is never inspected.
/// - Arrays are tagged by their first element, so `[1, "a"]` is `number[]`.
///   An empty array has no first element and classifies as `undefined[]`.
/// - Everything else maps to its primitive tag.
///
/// The classifier never produces `any`, `unknown`, `void` or rest tags.
pub fn classify(value: &Value) -> TypeTag {
    match value {
        Value::Undefined => TypeTag::Undefined,
        Value::Null => TypeTag::Null,
        Value::Bool(_) => TypeTag::Boolean,
        Value::Number(_) => TypeTag::Number,
        Value::String(_) => TypeTag::String,
        Value::Function(_) => TypeTag::Function,
        Value::Pending(_) => TypeTag::promise(),
        Value::Object(_) if value.is_thenable() => TypeTag::promise(),
        Value::Object(_) => TypeTag::Object,
        Value::Array(items) => {
            let element = items.first().map_or(TypeTag::Undefined, classify);
            TypeTag::array(element)
        }
    }
}

/// Classifies every argument of a call, in order.
pub fn classify_args(args: &[Value]) -> Vec<TypeTag> {
    args.iter().map(classify).collect()
}
