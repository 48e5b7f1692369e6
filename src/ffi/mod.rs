//! Граница C ABI для хост-приложения
//!
//! Содержит `repr(C)` типы, преобразование матриц хоста и
//! экспортируемые операции `addMatrices`, `subtractMatrices`,
//! `multiplyMatrices`, `divideMatrices`.

pub mod convert;
pub mod exports;
pub mod types;

pub use exports::*;
pub use types::{MatrixStatus, MatrixView};
