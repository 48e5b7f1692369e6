//! Типы матриц и связанные структуры

use super::error::{MatrixError, MatrixResult};
use ndarray::Array2;
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Плотная матрица `f64`, хранится по строкам.
///
/// Все строки имеют одинаковую длину, строк и столбцов не меньше одного.
/// Инвариант проверяется при создании, поэтому функции ядра получают
/// только прямоугольные матрицы.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Matrix {
    rows: Vec<Vec<f64>>,
}

/// Способ заполнения матриц для вычислений
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatrixType {
    /// Все элементы равны нулю
    Zeros,
    /// Единицы на главной диагонали
    Identity,
    /// Равномерное распределение на [0, 1)
    Uniform,
    /// Стандартное нормальное распределение
    Gaussian,
}

impl Matrix {
    /// Создает матрицу из строк, проверяя прямоугольность
    pub fn from_rows(rows: Vec<Vec<f64>>) -> MatrixResult<Self> {
        let expected = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(MatrixError::Empty),
        };

        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != expected)
        {
            return Err(MatrixError::Ragged { row, expected, found });
        }

        Ok(Self { rows })
    }

    /// Строки уже проверены вызывающим кодом ядра
    pub(super) fn from_rows_unchecked(rows: Vec<Vec<f64>>) -> Self {
        debug_assert!(!rows.is_empty() && !rows[0].is_empty());
        Self { rows }
    }

    /// Матрица размера `rows x cols`, заполненная функцией от индексов.
    /// Нулевые размеры недопустимы.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> MatrixResult<Self>
    where
        F: FnMut(usize, usize) -> f64,
    {
        if rows == 0 || cols == 0 {
            return Err(MatrixError::Empty);
        }
        let data = (0..rows)
            .map(|i| (0..cols).map(|j| f(i, j)).collect())
            .collect();
        Ok(Self { rows: data })
    }

    pub fn zeros(rows: usize, cols: usize) -> MatrixResult<Self> {
        Self::from_fn(rows, cols, |_, _| 0.0)
    }

    pub fn identity(size: usize) -> MatrixResult<Self> {
        Self::from_fn(size, size, |i, j| if i == j { 1.0 } else { 0.0 })
    }

    /// Генерирует матрицу заданного типа и размера
    pub fn generate<R: Rng>(
        matrix_type: MatrixType,
        rows: usize,
        cols: usize,
        rng: &mut R,
    ) -> MatrixResult<Self> {
        match matrix_type {
            MatrixType::Zeros => Self::zeros(rows, cols),
            MatrixType::Identity => {
                Self::from_fn(rows, cols, |i, j| if i == j { 1.0 } else { 0.0 })
            }
            MatrixType::Uniform => Self::from_fn(rows, cols, |_, _| rng.gen_range(0.0..1.0)),
            MatrixType::Gaussian => Self::from_fn(rows, cols, |_, _| rng.sample(StandardNormal)),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn cols(&self) -> usize {
        self.rows[0].len()
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    pub fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn as_rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.rows
    }

    /// Поэлементное сравнение с допуском `epsilon`
    pub fn approx_eq(&self, other: &Matrix, epsilon: f64) -> bool {
        self.dims() == other.dims()
            && self
                .rows
                .iter()
                .flatten()
                .zip(other.rows.iter().flatten())
                .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.rows[row][col]
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = MatrixError;

    fn try_from(rows: Vec<Vec<f64>>) -> MatrixResult<Self> {
        Self::from_rows(rows)
    }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(matrix: Matrix) -> Self {
        matrix.rows
    }
}

impl From<&Matrix> for Array2<f64> {
    fn from(matrix: &Matrix) -> Self {
        Array2::from_shape_fn(matrix.dims(), |(i, j)| matrix[(i, j)])
    }
}

impl TryFrom<Array2<f64>> for Matrix {
    type Error = MatrixError;

    fn try_from(array: Array2<f64>) -> MatrixResult<Self> {
        let rows = array.outer_iter().map(|row| row.to_vec()).collect();
        Self::from_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rejects_empty_and_ragged_rows() {
        assert_eq!(Matrix::from_rows(vec![]), Err(MatrixError::Empty));
        assert_eq!(Matrix::from_rows(vec![vec![]]), Err(MatrixError::Empty));
        assert_eq!(
            Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]),
            Err(MatrixError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn dims_and_indexing() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(m.dims(), (2, 3));
        assert!(!m.is_square());
        assert_eq!(m[(1, 2)], 6.0);
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.row(0), Some(&[1.0, 2.0, 3.0][..]));
    }

    #[test]
    fn json_is_array_of_arrays() {
        let m: Matrix = serde_json::from_str("[[1.0, 2.0], [3.0, 4.0]]").unwrap();
        assert_eq!(m.dims(), (2, 2));
        assert_eq!(serde_json::to_string(&m).unwrap(), "[[1.0,2.0],[3.0,4.0]]");
        assert!(serde_json::from_str::<Matrix>("[[1.0], [2.0, 3.0]]").is_err());
        assert!(serde_json::from_str::<Matrix>("[]").is_err());
    }

    #[test]
    fn ndarray_conversion_keeps_row_major_order() {
        let array = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let m = Matrix::try_from(array.clone()).unwrap();
        assert_eq!(m.dims(), (3, 2));
        assert_eq!(m[(2, 0)], 5.0);
        assert_eq!(Array2::from(&m), array);
    }

    #[test]
    fn generated_matrices_have_requested_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = Matrix::generate(MatrixType::Gaussian, 3, 4, &mut rng).unwrap();
        assert_eq!(m.dims(), (3, 4));
        let id = Matrix::generate(MatrixType::Identity, 3, 3, &mut rng).unwrap();
        assert_eq!(id, Matrix::identity(3).unwrap());
        assert!(Matrix::generate(MatrixType::Uniform, 0, 3, &mut rng).is_err());
    }
}
