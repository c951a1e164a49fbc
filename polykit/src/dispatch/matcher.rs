//! Structural signature matching.
//!
//! Decides whether the types a registration declares accept the types of
//! an actual call. Matching is a pure function over two ordered tag
//! sequences; it never looks at values.

use super::tag::TypeTag;

/// Check if declared parameter types structurally match actual argument types.
///
/// Rules:
/// - At most one rest entry may be declared, and only as the last entry.
/// - Without a rest entry the lengths must be equal.
/// - With a rest entry the actual list must cover every fixed entry.
/// - A declared `any` accepts the actual entry at its position.
/// - The rest entry is reused for every remaining actual entry, each of
///   which must equal its element tag. The classifier never yields `any`,
///   so `...any` only matches an empty tail.
/// - Other entries must be [structurally equal](tags_equal).
pub fn types_match(declared: &[TypeTag], actual: &[TypeTag]) -> bool {
    let rest_index = declared.iter().position(TypeTag::is_rest);
    if let Some(index) = rest_index {
        if index + 1 != declared.len() {
            return false;
        }
    }

    let fixed_count = declared.len() - usize::from(rest_index.is_some());
    match rest_index {
        None if declared.len() != actual.len() => return false,
        Some(_) if fixed_count > actual.len() => return false,
        _ => {}
    }

    let mut cursor = 0;
    for tag in actual {
        let Some(expected) = declared.get(cursor) else {
            return false;
        };
        match expected {
            TypeTag::Any => cursor += 1,
            // The cursor stays on the rest entry for the remaining arguments
            TypeTag::Rest(element) => {
                if !tags_equal(element, tag) {
                    return false;
                }
            }
            _ => {
                if !tags_equal(expected, tag) {
                    return false;
                }
                cursor += 1;
            }
        }
    }

    true
}

/// Check if a declared tag structurally equals an actual tag.
///
/// Tags are equal when identical, except that every promise tag equals every
/// other promise tag: payloads are never compared. Array tags compare their
/// elements under the same rule.
pub fn tags_equal(declared: &TypeTag, actual: &TypeTag) -> bool {
    match (declared, actual) {
        (TypeTag::Promise(_), TypeTag::Promise(_)) => true,
        (TypeTag::Array(d), TypeTag::Array(a)) => tags_equal(d, a),
        _ => declared == actual,
    }
}
