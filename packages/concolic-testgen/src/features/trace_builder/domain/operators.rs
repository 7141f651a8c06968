//! Operator tables
//!
//! Arithmetic and relational tables are disjoint and together cover every
//! expression operator.

use crate::errors::{ConcolicError, Result};
use crate::features::symbolic::{BinaryOpcode, CmpOpcode};
use crate::shared::models::Operator;

/// Arithmetic table
pub fn binary_opcode(op: Operator) -> Option<BinaryOpcode> {
    match op {
        Operator::Times => Some(BinaryOpcode::Mul),
        Operator::Divide => Some(BinaryOpcode::Div),
        Operator::Remainder => Some(BinaryOpcode::Rem),
        Operator::Plus => Some(BinaryOpcode::Add),
        Operator::Minus => Some(BinaryOpcode::Sub),
        Operator::LeftShift => Some(BinaryOpcode::Shl),
        Operator::RightShiftSigned => Some(BinaryOpcode::Shr),
        Operator::RightShiftUnsigned => Some(BinaryOpcode::Ushr),
        Operator::Xor => Some(BinaryOpcode::Xor),
        Operator::And | Operator::ConditionalAnd => Some(BinaryOpcode::And),
        Operator::Or | Operator::ConditionalOr => Some(BinaryOpcode::Or),
        Operator::Less
        | Operator::Greater
        | Operator::LessEquals
        | Operator::GreaterEquals
        | Operator::Equals
        | Operator::NotEquals => None,
    }
}

/// Relational table
pub fn cmp_opcode(op: Operator) -> Option<CmpOpcode> {
    match op {
        Operator::Less => Some(CmpOpcode::Lt),
        Operator::Greater => Some(CmpOpcode::Gt),
        Operator::LessEquals => Some(CmpOpcode::Le),
        Operator::GreaterEquals => Some(CmpOpcode::Ge),
        Operator::Equals => Some(CmpOpcode::Eq),
        Operator::NotEquals => Some(CmpOpcode::Neq),
        Operator::Times
        | Operator::Divide
        | Operator::Remainder
        | Operator::Plus
        | Operator::Minus
        | Operator::LeftShift
        | Operator::RightShiftSigned
        | Operator::RightShiftUnsigned
        | Operator::Xor
        | Operator::And
        | Operator::ConditionalAnd
        | Operator::Or
        | Operator::ConditionalOr => None,
    }
}

/// Opcode an expression operator translates to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    Arithmetic(BinaryOpcode),
    Relational(CmpOpcode),
}

impl OperatorKind {
    /// Look the operator up in both tables; exactly one must match
    pub fn classify(op: Operator) -> Result<Self> {
        match (binary_opcode(op), cmp_opcode(op)) {
            (Some(opcode), None) => Ok(Self::Arithmetic(opcode)),
            (None, Some(opcode)) => Ok(Self::Relational(opcode)),
            (Some(_), Some(_)) => Err(ConcolicError::invariant(format!(
                "operator '{}' is both arithmetic and relational",
                op.symbol()
            ))),
            (None, None) => Err(ConcolicError::invariant(format!(
                "operator '{}' has no opcode",
                op.symbol()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_disjoint_and_total() {
        for op in Operator::ALL {
            let arithmetic = binary_opcode(op).is_some();
            let relational = cmp_opcode(op).is_some();
            assert!(arithmetic ^ relational, "operator {:?}", op);
            assert!(OperatorKind::classify(op).is_ok());
        }
    }

    #[test]
    fn test_conditional_operators_fold_to_bitwise() {
        assert_eq!(
            OperatorKind::classify(Operator::ConditionalAnd).unwrap(),
            OperatorKind::Arithmetic(BinaryOpcode::And)
        );
        assert_eq!(
            OperatorKind::classify(Operator::ConditionalOr).unwrap(),
            OperatorKind::Arithmetic(BinaryOpcode::Or)
        );
    }

    #[test]
    fn test_relational_table() {
        let expected = [
            (Operator::Less, CmpOpcode::Lt),
            (Operator::Greater, CmpOpcode::Gt),
            (Operator::LessEquals, CmpOpcode::Le),
            (Operator::GreaterEquals, CmpOpcode::Ge),
            (Operator::Equals, CmpOpcode::Eq),
            (Operator::NotEquals, CmpOpcode::Neq),
        ];
        for (op, opcode) in expected {
            assert_eq!(cmp_opcode(op), Some(opcode));
            assert_eq!(binary_opcode(op), None);
        }
    }

    #[test]
    fn test_shift_opcodes() {
        assert_eq!(binary_opcode(Operator::LeftShift), Some(BinaryOpcode::Shl));
        assert_eq!(binary_opcode(Operator::RightShiftSigned), Some(BinaryOpcode::Shr));
        assert_eq!(binary_opcode(Operator::RightShiftUnsigned), Some(BinaryOpcode::Ushr));
    }
}
