//! Tag classification.
//!
//! Tags are grouped by numeric range, with gaps reserved between groups. All
//! checks compare against the boundary tags below, so kinds added inside a
//! gap later do not silently change class.

use crate::ast::ValueType;

const ARG: i32 = ValueType::Arg.as_i32();
const HASH: i32 = ValueType::Hash.as_i32();
const GET_CAPACITY: i32 = ValueType::GetCapacity.as_i32();
const LIST: i32 = ValueType::List.as_i32();
const FILTER: i32 = ValueType::Filter.as_i32();

/// How the evaluator treats a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass {
    /// Evaluates to itself.
    Primitive,
    /// Children evaluated eagerly, then combined.
    Operator,
    /// Single operand evaluated, then a field projected.
    StructuralGet,
    /// Bespoke evaluation order (ARG, PARAM, APPLY, REDUCE, list forms, records).
    ControlForm,
}

impl NodeClass {
    pub fn of(tag: ValueType) -> NodeClass {
        if is_primitive(tag) {
            NodeClass::Primitive
        } else if is_operator(tag) {
            NodeClass::Operator
        } else if is_structural_get(tag) {
            NodeClass::StructuralGet
        } else {
            NodeClass::ControlForm
        }
    }
}

pub fn is_primitive(tag: ValueType) -> bool {
    tag.as_i32() < ARG
}

pub fn is_operator(tag: ValueType) -> bool {
    tag.as_i32() >= HASH
}

pub fn is_structural_get(tag: ValueType) -> bool {
    let n = tag.as_i32();
    n >= GET_CAPACITY && n < HASH
}

/// Tags only valid where a list is expected.
pub fn is_list_form(tag: ValueType) -> bool {
    let n = tag.as_i32();
    n >= LIST && n <= FILTER
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ALL_VALUE_TYPES;

    #[test]
    fn test_classes_partition_all_tags() {
        for tag in ALL_VALUE_TYPES {
            let hits = [is_primitive(tag), is_operator(tag), is_structural_get(tag)]
                .into_iter()
                .filter(|hit| *hit)
                .count();
            assert!(hits <= 1, "{tag} is in more than one class");
        }
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(NodeClass::of(ValueType::Bytes), NodeClass::Primitive);
        assert_eq!(NodeClass::of(ValueType::Nil), NodeClass::Primitive);
        assert_eq!(NodeClass::of(ValueType::Arg), NodeClass::ControlForm);
        assert_eq!(NodeClass::of(ValueType::Cell), NodeClass::ControlForm);
        assert_eq!(NodeClass::of(ValueType::Filter), NodeClass::ControlForm);
        assert_eq!(NodeClass::of(ValueType::GetCapacity), NodeClass::StructuralGet);
        assert_eq!(NodeClass::of(ValueType::GetArgs), NodeClass::StructuralGet);
        assert_eq!(NodeClass::of(ValueType::Hash), NodeClass::Operator);
        assert_eq!(NodeClass::of(ValueType::Minus), NodeClass::Operator);
    }

    #[test]
    fn test_list_forms() {
        let lists: crate::Vec<_> = ALL_VALUE_TYPES
            .into_iter()
            .filter(|tag| is_list_form(*tag))
            .collect();
        assert_eq!(
            lists,
            [
                ValueType::List,
                ValueType::QueryCells,
                ValueType::Map,
                ValueType::Filter
            ]
        );
    }
}
