//! Типы данных C ABI

use crate::matrix::ErrorKind;

/// Матрица хоста: массив указателей на строки и длины строк.
///
/// Память принадлежит вызывающей стороне и только читается на время
/// вызова.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct MatrixView {
    pub rows: *const *const f64,
    pub row_lengths: *const usize,
    pub row_count: usize,
}

impl MatrixView {
    /// Вид на строки, принадлежащие вызывающему Rust-коду
    pub fn from_parts(row_ptrs: &[*const f64], row_lengths: &[usize]) -> Self {
        debug_assert_eq!(row_ptrs.len(), row_lengths.len());
        Self {
            rows: row_ptrs.as_ptr(),
            row_lengths: row_lengths.as_ptr(),
            row_count: row_ptrs.len(),
        }
    }
}

/// Код возврата экспортируемых функций
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixStatus {
    Ok = 0,
    DimensionMismatch = 1,
    NotSquare = 2,
    Singular = 3,
    InvalidInput = 4,
}

impl From<ErrorKind> for MatrixStatus {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::DimensionMismatch => MatrixStatus::DimensionMismatch,
            ErrorKind::NotSquare => MatrixStatus::NotSquare,
            ErrorKind::Singular => MatrixStatus::Singular,
            ErrorKind::InvalidInput => MatrixStatus::InvalidInput,
        }
    }
}
