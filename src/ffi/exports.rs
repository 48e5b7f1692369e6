//! Функции, экспортируемые для хост-приложения
//!
//! Каждая бинарная операция принимает две матрицы хоста, записывает
//! результат в `out` и возвращает код статуса. При ошибке в `error`
//! записывается текст сообщения ядра, который хост освобождает через
//! `matrixStringFree`.

use super::convert::{matrix_from_view, panic_message, to_c_string};
use super::types::{MatrixStatus, MatrixView};
use crate::matrix::{Matrix, MatrixError, Operation};
use std::ffi::{c_char, CString};
use std::panic::{self, AssertUnwindSafe};
use std::ptr;

unsafe fn report_error(error: *mut *mut c_char, message: &str) {
    if !error.is_null() {
        *error = to_c_string(message);
    }
}

unsafe fn run_binary(
    operation: Operation,
    a: MatrixView,
    b: MatrixView,
    out: *mut *mut Matrix,
    error: *mut *mut c_char,
) -> MatrixStatus {
    if !error.is_null() {
        *error = ptr::null_mut();
    }
    if out.is_null() {
        report_error(error, &MatrixError::NullPointer("out").to_string());
        return MatrixStatus::InvalidInput;
    }
    *out = ptr::null_mut();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let a = matrix_from_view(&a, "matrix A")?;
        let b = matrix_from_view(&b, "matrix B")?;
        log::trace!("{}: {:?} и {:?}", operation, a.dims(), b.dims());
        operation.apply(&a, &b)
    }));

    match outcome {
        Ok(Ok(result)) => {
            log::trace!("{}: результат {:?}", operation, result.dims());
            *out = Box::into_raw(Box::new(result));
            MatrixStatus::Ok
        }
        Ok(Err(err)) => {
            log::debug!("{} завершилась ошибкой: {}", operation, err);
            report_error(error, &err.to_string());
            MatrixStatus::from(err.kind())
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            log::error!("Паника в {}: {}", operation, message);
            report_error(error, &message);
            MatrixStatus::InvalidInput
        }
    }
}

/// Сложение матриц хоста.
///
/// # Safety
///
/// `a` и `b` должны описывать корректную память (см. [`MatrixView`]),
/// `out` должен быть валидным указателем, `error` может быть null.
#[export_name = "addMatrices"]
pub unsafe extern "C" fn add_matrices(
    a: MatrixView,
    b: MatrixView,
    out: *mut *mut Matrix,
    error: *mut *mut c_char,
) -> MatrixStatus {
    run_binary(Operation::Add, a, b, out, error)
}

/// Вычитание матриц хоста.
///
/// # Safety
///
/// См. [`add_matrices`].
#[export_name = "subtractMatrices"]
pub unsafe extern "C" fn subtract_matrices(
    a: MatrixView,
    b: MatrixView,
    out: *mut *mut Matrix,
    error: *mut *mut c_char,
) -> MatrixStatus {
    run_binary(Operation::Subtract, a, b, out, error)
}

/// Умножение матриц хоста.
///
/// # Safety
///
/// См. [`add_matrices`].
#[export_name = "multiplyMatrices"]
pub unsafe extern "C" fn multiply_matrices(
    a: MatrixView,
    b: MatrixView,
    out: *mut *mut Matrix,
    error: *mut *mut c_char,
) -> MatrixStatus {
    run_binary(Operation::Multiply, a, b, out, error)
}

/// Деление матриц хоста (`A * B^-1`).
///
/// # Safety
///
/// См. [`add_matrices`].
#[export_name = "divideMatrices"]
pub unsafe extern "C" fn divide_matrices(
    a: MatrixView,
    b: MatrixView,
    out: *mut *mut Matrix,
    error: *mut *mut c_char,
) -> MatrixStatus {
    run_binary(Operation::Divide, a, b, out, error)
}

/// Число строк результата, 0 для null.
///
/// # Safety
///
/// `matrix` должен быть null или получен из этой библиотеки и еще не освобожден.
#[export_name = "matrixRows"]
pub unsafe extern "C" fn matrix_rows(matrix: *const Matrix) -> usize {
    if matrix.is_null() {
        return 0;
    }
    (*matrix).rows()
}

/// Число столбцов результата, 0 для null.
///
/// # Safety
///
/// См. [`matrix_rows`].
#[export_name = "matrixCols"]
pub unsafe extern "C" fn matrix_cols(matrix: *const Matrix) -> usize {
    if matrix.is_null() {
        return 0;
    }
    (*matrix).cols()
}

/// Копирует строку `row` результата в буфер хоста.
///
/// # Safety
///
/// `dst` должен указывать на `dst_len` доступных для записи `f64`.
#[export_name = "matrixCopyRow"]
pub unsafe extern "C" fn matrix_copy_row(
    matrix: *const Matrix,
    row: usize,
    dst: *mut f64,
    dst_len: usize,
) -> MatrixStatus {
    if matrix.is_null() || dst.is_null() {
        return MatrixStatus::InvalidInput;
    }
    let Some(values) = (*matrix).row(row) else {
        return MatrixStatus::InvalidInput;
    };
    if dst_len < values.len() {
        return MatrixStatus::InvalidInput;
    }
    ptr::copy_nonoverlapping(values.as_ptr(), dst, values.len());
    MatrixStatus::Ok
}

/// Освобождает результат, полученный из экспортируемой операции.
///
/// # Safety
///
/// `matrix` должен быть получен из этой библиотеки и освобождаться один раз.
#[export_name = "matrixFree"]
pub unsafe extern "C" fn matrix_free(matrix: *mut Matrix) {
    if !matrix.is_null() {
        drop(Box::from_raw(matrix));
    }
}

/// Освобождает сообщение об ошибке.
///
/// # Safety
///
/// `message` должен быть получен из этой библиотеки и освобождаться один раз.
#[export_name = "matrixStringFree"]
pub unsafe extern "C" fn matrix_string_free(message: *mut c_char) {
    if !message.is_null() {
        drop(CString::from_raw(message));
    }
}
