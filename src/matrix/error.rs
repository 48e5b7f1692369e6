//! Ошибки матричного ядра

use std::fmt;
use thiserror::Error;

/// Операция, для которой проверяются размеры операндов
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionCheck {
    Addition,
    Subtraction,
    Multiplication,
}

impl fmt::Display for DimensionCheck {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DimensionCheck::Addition => write!(f, "addition"),
            DimensionCheck::Subtraction => write!(f, "subtraction"),
            DimensionCheck::Multiplication => write!(f, "multiplication"),
        }
    }
}

/// Вычисление, которому нужна квадратная матрица
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareCheck {
    Determinant,
    Adjoint,
    Inverse,
    Division,
}

impl fmt::Display for SquareCheck {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SquareCheck::Determinant => write!(f, "Matrix must be square to calculate determinant"),
            SquareCheck::Adjoint => write!(f, "Matrix must be square to calculate adjoint"),
            SquareCheck::Inverse => write!(f, "Matrix must be square to calculate inverse"),
            SquareCheck::Division => write!(f, "Second matrix must be square for division"),
        }
    }
}

/// Размеры матрицы (строки, столбцы)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape(pub usize, pub usize);

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}", self.0, self.1)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    #[error("Matrices dimensions do not match for {operation}: {left} vs {right}")]
    DimensionMismatch {
        operation: DimensionCheck,
        left: Shape,
        right: Shape,
    },

    #[error("{context} (got {rows}x{cols})")]
    NotSquare {
        context: SquareCheck,
        rows: usize,
        cols: usize,
    },

    #[error("Matrix is singular, cannot calculate inverse")]
    Singular,

    #[error("Matrix must have at least one row and one column")]
    Empty,

    #[error("Ragged matrix: row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Minor requires at least a 2x2 matrix, got {rows}x{cols}")]
    MinorTooSmall { rows: usize, cols: usize },

    #[error("Index ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Unknown operation: {0}")]
    InvalidOperation(String),

    #[error("Null pointer passed for {0}")]
    NullPointer(&'static str),
}

/// Грубая классификация ошибок, которую видит внешний вызывающий код
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DimensionMismatch,
    NotSquare,
    Singular,
    InvalidInput,
}

impl MatrixError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatrixError::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
            MatrixError::NotSquare { .. } => ErrorKind::NotSquare,
            MatrixError::Singular => ErrorKind::Singular,
            MatrixError::Empty
            | MatrixError::Ragged { .. }
            | MatrixError::MinorTooSmall { .. }
            | MatrixError::IndexOutOfBounds { .. }
            | MatrixError::InvalidOperation(_)
            | MatrixError::NullPointer(_) => ErrorKind::InvalidInput,
        }
    }
}

pub type MatrixResult<T> = Result<T, MatrixError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_keep_operation_names() {
        let err = MatrixError::DimensionMismatch {
            operation: DimensionCheck::Addition,
            left: Shape(2, 2),
            right: Shape(3, 3),
        };
        assert_eq!(
            err.to_string(),
            "Matrices dimensions do not match for addition: 2x2 vs 3x3"
        );

        let err = MatrixError::NotSquare {
            context: SquareCheck::Division,
            rows: 2,
            cols: 3,
        };
        assert!(err.to_string().starts_with("Second matrix must be square for division"));
        assert_eq!(
            MatrixError::Singular.to_string(),
            "Matrix is singular, cannot calculate inverse"
        );
    }

    #[test]
    fn kinds_collapse_construction_errors() {
        assert_eq!(MatrixError::Empty.kind(), ErrorKind::InvalidInput);
        assert_eq!(MatrixError::Singular.kind(), ErrorKind::Singular);
        assert_eq!(
            MatrixError::NotSquare {
                context: SquareCheck::Inverse,
                rows: 1,
                cols: 2
            }
            .kind(),
            ErrorKind::NotSquare
        );
    }
}
