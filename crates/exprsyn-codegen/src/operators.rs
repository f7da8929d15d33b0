//! Operator classification tables.
//!
//! Map expression-tree operator tags onto target-language operators. Tags
//! with no target operator (`Power`, `PowerAssign`, conversions) have no
//! entry and are reported as unsupported.

use exprsyn_syntax::{AssignmentOperator, BinaryOperator, Fixity, UnaryOperator};
use exprsyn_tree::NodeType;

use crate::error::{TranslateError, TranslateResult};

/// How a binary node is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryForm {
    Assignment(AssignmentOperator),
    Operator(BinaryOperator),
}

/// Whether a binary node with this tag is written as an assignment.
pub fn is_assignment_form(op: NodeType) -> bool {
    matches!(
        op,
        NodeType::Assign
            | NodeType::AddAssign
            | NodeType::AddAssignChecked
            | NodeType::SubtractAssign
            | NodeType::SubtractAssignChecked
            | NodeType::MultiplyAssign
            | NodeType::MultiplyAssignChecked
            | NodeType::DivideAssign
            | NodeType::ModuloAssign
            | NodeType::PowerAssign
            | NodeType::AndAssign
            | NodeType::OrAssign
            | NodeType::ExclusiveOrAssign
            | NodeType::LeftShiftAssign
            | NodeType::RightShiftAssign
            | NodeType::PostIncrementAssign
            | NodeType::PostDecrementAssign
    )
}

pub fn assignment_operator(op: NodeType) -> Option<AssignmentOperator> {
    let op = match op {
        NodeType::Assign => AssignmentOperator::Simple,
        NodeType::AddAssign | NodeType::AddAssignChecked => AssignmentOperator::Add,
        NodeType::SubtractAssign | NodeType::SubtractAssignChecked => AssignmentOperator::Subtract,
        NodeType::MultiplyAssign | NodeType::MultiplyAssignChecked => AssignmentOperator::Multiply,
        NodeType::DivideAssign => AssignmentOperator::Divide,
        NodeType::ModuloAssign => AssignmentOperator::Modulo,
        NodeType::AndAssign => AssignmentOperator::And,
        NodeType::OrAssign => AssignmentOperator::Or,
        NodeType::ExclusiveOrAssign => AssignmentOperator::ExclusiveOr,
        NodeType::LeftShiftAssign => AssignmentOperator::LeftShift,
        NodeType::RightShiftAssign => AssignmentOperator::RightShift,
        _ => return None,
    };
    Some(op)
}

pub fn binary_operator(op: NodeType) -> Option<BinaryOperator> {
    let op = match op {
        NodeType::Add | NodeType::AddChecked => BinaryOperator::Add,
        NodeType::Subtract | NodeType::SubtractChecked => BinaryOperator::Subtract,
        NodeType::Multiply | NodeType::MultiplyChecked => BinaryOperator::Multiply,
        NodeType::Divide => BinaryOperator::Divide,
        NodeType::Modulo => BinaryOperator::Modulo,
        NodeType::And => BinaryOperator::BitwiseAnd,
        NodeType::Or => BinaryOperator::BitwiseOr,
        NodeType::ExclusiveOr => BinaryOperator::ExclusiveOr,
        NodeType::AndAlso => BinaryOperator::LogicalAnd,
        NodeType::OrElse => BinaryOperator::LogicalOr,
        NodeType::LeftShift => BinaryOperator::LeftShift,
        NodeType::RightShift => BinaryOperator::RightShift,
        NodeType::Coalesce => BinaryOperator::Coalesce,
        NodeType::Equal => BinaryOperator::Equals,
        NodeType::NotEqual => BinaryOperator::NotEquals,
        NodeType::LessThan => BinaryOperator::LessThan,
        NodeType::LessThanOrEqual => BinaryOperator::LessThanOrEqual,
        NodeType::GreaterThan => BinaryOperator::GreaterThan,
        NodeType::GreaterThanOrEqual => BinaryOperator::GreaterThanOrEqual,
        _ => return None,
    };
    Some(op)
}

/// Unary operator and the side of the operand it is written on.
pub fn unary_operator(op: NodeType) -> Option<(UnaryOperator, Fixity)> {
    let entry = match op {
        NodeType::Negate | NodeType::NegateChecked => (UnaryOperator::Minus, Fixity::Prefix),
        NodeType::UnaryPlus => (UnaryOperator::Plus, Fixity::Prefix),
        NodeType::Not => (UnaryOperator::LogicalNot, Fixity::Prefix),
        NodeType::OnesComplement => (UnaryOperator::BitwiseNot, Fixity::Prefix),
        NodeType::PreIncrementAssign => (UnaryOperator::Increment, Fixity::Prefix),
        NodeType::PreDecrementAssign => (UnaryOperator::Decrement, Fixity::Prefix),
        NodeType::Increment | NodeType::PostIncrementAssign => {
            (UnaryOperator::Increment, Fixity::Postfix)
        }
        NodeType::Decrement | NodeType::PostDecrementAssign => {
            (UnaryOperator::Decrement, Fixity::Postfix)
        }
        _ => return None,
    };
    Some(entry)
}

pub fn classify_binary(op: NodeType) -> TranslateResult<BinaryForm> {
    let form = if is_assignment_form(op) {
        assignment_operator(op).map(BinaryForm::Assignment)
    } else {
        binary_operator(op).map(BinaryForm::Operator)
    };
    form.ok_or(TranslateError::UnsupportedOperator { op })
}

pub fn classify_unary(op: NodeType) -> TranslateResult<(UnaryOperator, Fixity)> {
    unary_operator(op).ok_or(TranslateError::UnsupportedOperator { op })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_variants_share_operators() {
        assert_eq!(classify_binary(NodeType::AddChecked), classify_binary(NodeType::Add));
        assert_eq!(
            classify_binary(NodeType::MultiplyAssignChecked),
            Ok(BinaryForm::Assignment(AssignmentOperator::Multiply))
        );
    }

    #[test]
    fn compound_assignments_map_to_their_own_operator() {
        assert_eq!(
            classify_binary(NodeType::ExclusiveOrAssign),
            Ok(BinaryForm::Assignment(AssignmentOperator::ExclusiveOr))
        );
        assert_eq!(
            classify_binary(NodeType::PowerAssign),
            Err(TranslateError::UnsupportedOperator {
                op: NodeType::PowerAssign
            })
        );
        assert!(classify_binary(NodeType::Power).is_err());
    }

    #[test]
    fn logical_and_bitwise_are_distinct() {
        assert_eq!(binary_operator(NodeType::And), Some(BinaryOperator::BitwiseAnd));
        assert_eq!(binary_operator(NodeType::AndAlso), Some(BinaryOperator::LogicalAnd));
        assert_eq!(binary_operator(NodeType::Or), Some(BinaryOperator::BitwiseOr));
        assert_eq!(binary_operator(NodeType::OrElse), Some(BinaryOperator::LogicalOr));
    }

    #[test]
    fn post_increment_is_assignment_form_without_binary_operator() {
        assert!(is_assignment_form(NodeType::PostIncrementAssign));
        assert!(classify_binary(NodeType::PostIncrementAssign).is_err());
        assert_eq!(
            classify_unary(NodeType::PostIncrementAssign),
            Ok((UnaryOperator::Increment, Fixity::Postfix))
        );
    }

    #[test]
    fn unary_fixity() {
        assert_eq!(
            classify_unary(NodeType::Increment),
            Ok((UnaryOperator::Increment, Fixity::Postfix))
        );
        assert_eq!(
            classify_unary(NodeType::PreDecrementAssign),
            Ok((UnaryOperator::Decrement, Fixity::Prefix))
        );
        assert_eq!(
            classify_unary(NodeType::NegateChecked),
            Ok((UnaryOperator::Minus, Fixity::Prefix))
        );
        assert!(classify_unary(NodeType::Convert).is_err());
    }

    #[test]
    fn every_comparison_has_an_operator() {
        for op in [
            NodeType::Equal,
            NodeType::NotEqual,
            NodeType::LessThan,
            NodeType::LessThanOrEqual,
            NodeType::GreaterThan,
            NodeType::GreaterThanOrEqual,
        ] {
            assert!(matches!(classify_binary(op), Ok(BinaryForm::Operator(_))));
        }
    }
}
