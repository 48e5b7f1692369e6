//! Арифметика плотных матриц с границей C ABI

// Макросы объявляются до модулей, которые их используют
#[macro_use]
mod macros {
    /// Возвращает `MatrixError::NullPointer`, если указатель пустой
    macro_rules! ensure_non_null {
        ($ptr:expr, $what:expr) => {
            if $ptr.is_null() {
                return Err($crate::matrix::MatrixError::NullPointer($what));
            }
        };
    }
}

pub mod config;
pub mod ffi;
pub mod matrix;
pub mod utils;

// Реэкспорт основных типов для удобства
pub use config::CalculatorConfig;
pub use matrix::{Matrix, MatrixError, MatrixResult, MatrixType, Operation};
