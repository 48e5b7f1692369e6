//! Модуль для работы с матрицами
//!
//! Предоставляет:
//! - Тип плотной матрицы
//! - Ошибки ядра
//! - Арифметику, определитель, присоединенную и обратную матрицы

mod error;
mod types;
pub mod operations;

pub use error::{DimensionCheck, ErrorKind, MatrixError, MatrixResult, Shape, SquareCheck};
pub use operations::{
    add, adjoint, compare_results, determinant, divide, initialize_matrices, inverse, minor,
    multiply, scalar_multiply, subtract, Operation,
};
pub use types::{Matrix, MatrixType};
