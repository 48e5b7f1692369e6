//! Операции над матрицами
//!
//! Все функции чистые: входные матрицы только читаются, результат
//! всегда новая матрица. Условия на размеры проверяются до начала
//! вычислений.

use super::error::{DimensionCheck, MatrixError, MatrixResult, Shape, SquareCheck};
use super::types::{Matrix, MatrixType};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

fn ensure_same_shape(a: &Matrix, b: &Matrix, operation: DimensionCheck) -> MatrixResult<()> {
    if a.rows() != b.rows() || a.cols() != b.cols() {
        return Err(MatrixError::DimensionMismatch {
            operation,
            left: Shape(a.rows(), a.cols()),
            right: Shape(b.rows(), b.cols()),
        });
    }
    Ok(())
}

fn ensure_square(a: &Matrix, context: SquareCheck) -> MatrixResult<()> {
    if !a.is_square() {
        return Err(MatrixError::NotSquare {
            context,
            rows: a.rows(),
            cols: a.cols(),
        });
    }
    Ok(())
}

fn elementwise<F>(a: &Matrix, b: &Matrix, f: F) -> Matrix
where
    F: Fn(f64, f64) -> f64,
{
    let rows = a
        .as_rows()
        .iter()
        .zip(b.as_rows())
        .map(|(ra, rb)| ra.iter().zip(rb).map(|(&x, &y)| f(x, y)).collect())
        .collect();
    Matrix::from_rows_unchecked(rows)
}

/// Поэлементная сумма матриц одинакового размера
pub fn add(a: &Matrix, b: &Matrix) -> MatrixResult<Matrix> {
    ensure_same_shape(a, b, DimensionCheck::Addition)?;
    Ok(elementwise(a, b, |x, y| x + y))
}

/// Поэлементная разность `a - b`
pub fn subtract(a: &Matrix, b: &Matrix) -> MatrixResult<Matrix> {
    ensure_same_shape(a, b, DimensionCheck::Subtraction)?;
    Ok(elementwise(a, b, |x, y| x - y))
}

/// Матричное произведение
pub fn multiply(a: &Matrix, b: &Matrix) -> MatrixResult<Matrix> {
    if a.cols() != b.rows() {
        return Err(MatrixError::DimensionMismatch {
            operation: DimensionCheck::Multiplication,
            left: Shape(a.rows(), a.cols()),
            right: Shape(b.rows(), b.cols()),
        });
    }

    let mut result = vec![vec![0.0f64; b.cols()]; a.rows()];
    for i in 0..a.rows() {
        for j in 0..b.cols() {
            for k in 0..a.cols() {
                result[i][j] += a[(i, k)] * b[(k, j)];
            }
        }
    }

    Ok(Matrix::from_rows_unchecked(result))
}

/// Умножение каждого элемента на скаляр
pub fn scalar_multiply(a: &Matrix, scalar: f64) -> Matrix {
    let rows = a
        .as_rows()
        .iter()
        .map(|row| row.iter().map(|&x| x * scalar).collect())
        .collect();
    Matrix::from_rows_unchecked(rows)
}

/// Минор: матрица без строки `row` и столбца `col`
pub fn minor(a: &Matrix, row: usize, col: usize) -> MatrixResult<Matrix> {
    let (rows, cols) = a.dims();
    if rows < 2 || cols < 2 {
        return Err(MatrixError::MinorTooSmall { rows, cols });
    }
    if row >= rows || col >= cols {
        return Err(MatrixError::IndexOutOfBounds { row, col, rows, cols });
    }

    let result = a
        .as_rows()
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != row)
        .map(|(_, r)| {
            r.iter()
                .enumerate()
                .filter(|&(j, _)| j != col)
                .map(|(_, &x)| x)
                .collect()
        })
        .collect();

    Ok(Matrix::from_rows_unchecked(result))
}

/// Определитель разложением по первой строке.
///
/// Рекурсия стоит O(n!), так что функция годится только для небольших
/// матриц.
pub fn determinant(a: &Matrix) -> MatrixResult<f64> {
    ensure_square(a, SquareCheck::Determinant)?;

    match a.rows() {
        1 => Ok(a[(0, 0)]),
        2 => Ok(a[(0, 0)] * a[(1, 1)] - a[(0, 1)] * a[(1, 0)]),
        n => {
            let mut det = 0.0;
            let mut sign = 1.0;
            for j in 0..n {
                det += sign * a[(0, j)] * determinant(&minor(a, 0, j)?)?;
                sign = -sign;
            }
            Ok(det)
        }
    }
}

/// Присоединенная матрица (транспонированная матрица алгебраических дополнений)
#[allow(clippy::needless_range_loop)]
pub fn adjoint(a: &Matrix) -> MatrixResult<Matrix> {
    ensure_square(a, SquareCheck::Adjoint)?;

    let n = a.rows();
    if n == 1 {
        return Ok(Matrix::from_rows_unchecked(vec![vec![1.0]]));
    }

    let mut adj = vec![vec![0.0f64; n]; n];
    for i in 0..n {
        for j in 0..n {
            let sign = if (i + j) % 2 == 0 { 1.0 } else { -1.0 };
            // транспонирование при записи: [j][i]
            adj[j][i] = sign * determinant(&minor(a, i, j)?)?;
        }
    }

    Ok(Matrix::from_rows_unchecked(adj))
}

/// Обратная матрица через присоединенную.
///
/// Вырожденность проверяется точным сравнением определителя с нулем.
pub fn inverse(a: &Matrix) -> MatrixResult<Matrix> {
    ensure_square(a, SquareCheck::Inverse)?;

    let det = determinant(a)?;
    if det == 0.0 {
        return Err(MatrixError::Singular);
    }

    let adj = adjoint(a)?;
    let rows = adj
        .as_rows()
        .iter()
        .map(|row| row.iter().map(|&x| x / det).collect())
        .collect();

    Ok(Matrix::from_rows_unchecked(rows))
}

/// Деление матриц: `a * inverse(b)`
pub fn divide(a: &Matrix, b: &Matrix) -> MatrixResult<Matrix> {
    ensure_square(b, SquareCheck::Division)?;

    let b_inverse = inverse(b)?;
    multiply(a, &b_inverse)
}

/// Бинарная операция, доступная внешнему вызывающему коду
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    pub fn apply(self, a: &Matrix, b: &Matrix) -> MatrixResult<Matrix> {
        match self {
            Operation::Add => add(a, b),
            Operation::Subtract => subtract(a, b),
            Operation::Multiply => multiply(a, b),
            Operation::Divide => divide(a, b),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operation::Add => write!(f, "add"),
            Operation::Subtract => write!(f, "subtract"),
            Operation::Multiply => write!(f, "multiply"),
            Operation::Divide => write!(f, "divide"),
        }
    }
}

impl FromStr for Operation {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "add" => Ok(Operation::Add),
            "subtract" | "sub" => Ok(Operation::Subtract),
            "multiply" | "mul" => Ok(Operation::Multiply),
            "divide" | "div" => Ok(Operation::Divide),
            _ => Err(MatrixError::InvalidOperation(s.to_string())),
        }
    }
}

/// Инициализирует пару квадратных матриц заданного типа и размера
pub fn initialize_matrices<R: Rng>(
    matrix_type: MatrixType,
    size: usize,
    rng: &mut R,
) -> MatrixResult<(Matrix, Matrix)> {
    let a = Matrix::generate(matrix_type, size, size, rng)?;
    let b = Matrix::generate(matrix_type, size, size, rng)?;
    Ok((a, b))
}

/// Сравнивает два результата поэлементно
pub fn compare_results(expected: &Matrix, actual: &Matrix, epsilon: f64) -> bool {
    if expected.dims() != actual.dims() {
        log::warn!(
            "Размеры результатов различаются: {:?} и {:?}",
            expected.dims(),
            actual.dims()
        );
        return false;
    }

    let mut max_diff = 0.0f64;
    let mut diff_count = 0;
    for (x, y) in expected
        .as_rows()
        .iter()
        .flatten()
        .zip(actual.as_rows().iter().flatten())
    {
        let diff = (x - y).abs();
        // NaN тоже считается расхождением
        if !(diff <= epsilon) {
            diff_count += 1;
            max_diff = max_diff.max(diff);
        }
    }

    if diff_count > 0 {
        log::warn!(
            "Обнаружены расхождения: {} элементов, максимальная разница {}",
            diff_count,
            max_diff
        );
        false
    } else {
        log::debug!("Результаты совпадают (epsilon = {})", epsilon);
        true
    }
}
