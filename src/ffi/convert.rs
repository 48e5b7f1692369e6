//! Преобразование данных между хостом и ядром

use super::types::MatrixView;
use crate::matrix::{Matrix, MatrixResult};
use std::ffi::{c_char, CString};

/// Копирует матрицу хоста в `Matrix`, сохраняя порядок строк.
///
/// # Safety
///
/// `view.rows` и `view.row_lengths` должны указывать на `view.row_count`
/// элементов, а каждая строка на `row_lengths[i]` значений `f64`.
pub unsafe fn matrix_from_view(view: &MatrixView, name: &'static str) -> MatrixResult<Matrix> {
    ensure_non_null!(view.rows, name);
    ensure_non_null!(view.row_lengths, name);

    let row_ptrs = std::slice::from_raw_parts(view.rows, view.row_count);
    let lengths = std::slice::from_raw_parts(view.row_lengths, view.row_count);

    let mut rows = Vec::with_capacity(view.row_count);
    for (&ptr, &len) in row_ptrs.iter().zip(lengths) {
        if len == 0 {
            rows.push(Vec::new());
            continue;
        }
        ensure_non_null!(ptr, name);
        rows.push(std::slice::from_raw_parts(ptr, len).to_vec());
    }

    // проверка прямоугольности и пустых строк
    Matrix::from_rows(rows)
}

/// Превращает сообщение об ошибке в C-строку, которой владеет хост
pub fn to_c_string(message: &str) -> *mut c_char {
    let sanitized = message.replace('\0', " ");
    match CString::new(sanitized) {
        Ok(s) => s.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Текст паники, если он есть
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic in matrix kernel".to_string()
    }
}

