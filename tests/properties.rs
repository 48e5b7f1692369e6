use matrix_calculator::matrix::{
    add, adjoint, determinant, divide, inverse, multiply, scalar_multiply, subtract,
};
use matrix_calculator::Operation;
use matrix_calculator::Matrix;
use ndarray::Array2;
use proptest::prelude::*;

fn matrix_strategy(rows: usize, cols: usize) -> impl Strategy<Value = Matrix> {
    prop::collection::vec(prop::collection::vec(-100.0f64..100.0, cols), rows)
        .prop_map(|rows| Matrix::from_rows(rows).unwrap())
}

fn any_matrix() -> impl Strategy<Value = Matrix> {
    (1usize..5, 1usize..5).prop_flat_map(|(r, c)| matrix_strategy(r, c))
}

fn same_shape_pair() -> impl Strategy<Value = (Matrix, Matrix)> {
    (1usize..5, 1usize..5).prop_flat_map(|(r, c)| (matrix_strategy(r, c), matrix_strategy(r, c)))
}

fn chained_pair() -> impl Strategy<Value = (Matrix, Matrix)> {
    (1usize..5, 1usize..5, 1usize..5)
        .prop_flat_map(|(r, k, c)| (matrix_strategy(r, k), matrix_strategy(k, c)))
}

/// Квадратная матрица с диагональным преобладанием, всегда обратима
fn invertible(size: usize) -> impl Strategy<Value = Matrix> {
    prop::collection::vec(prop::collection::vec(-1.0f64..1.0, size), size).prop_map(
        move |mut rows| {
            for (i, row) in rows.iter_mut().enumerate() {
                row[i] += (size + 1) as f64;
            }
            Matrix::from_rows(rows).unwrap()
        },
    )
}

fn is_zero(m: &Matrix) -> bool {
    m.as_rows().iter().flatten().all(|&x| x == 0.0)
}

proptest! {
    #[test]
    fn additive_identity_and_inverse((a, b) in same_shape_pair()) {
        let zero = subtract(&a, &a).unwrap();
        prop_assert!(is_zero(&zero));
        prop_assert_eq!(add(&a, &zero).unwrap(), a.clone());

        let back = subtract(&add(&a, &b).unwrap(), &b).unwrap();
        prop_assert!(back.approx_eq(&a, 1e-9));
    }

    #[test]
    fn multiplication_identity(a in any_matrix()) {
        let id = Matrix::identity(a.cols()).unwrap();
        prop_assert_eq!(multiply(&a, &id).unwrap(), a);
    }

    #[test]
    fn multiply_agrees_with_ndarray((a, b) in chained_pair()) {
        let product = multiply(&a, &b).unwrap();
        let reference = Array2::from(&a).dot(&Array2::from(&b));
        let reference = Matrix::try_from(reference).unwrap();
        prop_assert!(product.approx_eq(&reference, 1e-9));
    }

    #[test]
    fn scalar_multiply_matches_repeated_addition(a in any_matrix()) {
        prop_assert_eq!(scalar_multiply(&a, 2.0), add(&a, &a).unwrap());
    }

    #[test]
    fn inverse_times_matrix_is_identity(b in (1usize..6).prop_flat_map(invertible)) {
        let product = multiply(&b, &inverse(&b).unwrap()).unwrap();
        prop_assert!(product.approx_eq(&Matrix::identity(b.rows()).unwrap(), 1e-9));
    }

    #[test]
    fn division_is_multiplication_by_inverse(
        (a, b) in (1usize..5, 1usize..5)
            .prop_flat_map(|(r, n)| (matrix_strategy(r, n), invertible(n)))
    ) {
        let expected = multiply(&a, &inverse(&b).unwrap()).unwrap();
        prop_assert_eq!(divide(&a, &b).unwrap(), expected);
    }

    #[test]
    fn repeated_calls_are_bit_identical(n in 1usize..5) {
        let a = Matrix::from_fn(n, n, |i, j| ((i * 7 + j * 3) % 11) as f64 - 5.0 + 0.1 * j as f64)
            .unwrap();
        let first = determinant(&a).unwrap();
        let second = determinant(&a).unwrap();
        prop_assert_eq!(first.to_bits(), second.to_bits());
        prop_assert_eq!(adjoint(&a).unwrap(), adjoint(&a).unwrap());
    }

    #[test]
    fn host_operations_are_bit_identical(
        (a, b) in (1usize..5, 1usize..5)
            .prop_flat_map(|(r, n)| (matrix_strategy(r, n), invertible(n)))
    ) {
        let lhs = multiply(&a, &b).unwrap();
        let bits = |m: &Matrix| -> Vec<u64> {
            m.as_rows().iter().flatten().map(|x| x.to_bits()).collect()
        };
        for op in Operation::ALL {
            let rhs = match op {
                Operation::Add | Operation::Subtract => &lhs,
                Operation::Multiply | Operation::Divide => &b,
            };
            let first = op.apply(&lhs, rhs).unwrap();
            let second = op.apply(&lhs, rhs).unwrap();
            prop_assert_eq!(bits(&first), bits(&second));
        }
    }
}

#[test]
fn determinant_matches_adjugate_identity() {
    // A * adj(A) = det(A) * I
    let a = Matrix::from_rows(vec![
        vec![2.0, -1.0, 0.0, 3.0],
        vec![1.0, 4.0, -2.0, 0.5],
        vec![0.0, 3.0, 1.0, -1.0],
        vec![5.0, 0.0, 2.0, 1.0],
    ])
    .unwrap();
    let det = determinant(&a).unwrap();
    let product = multiply(&a, &adjoint(&a).unwrap()).unwrap();
    let expected = scalar_multiply(&Matrix::identity(4).unwrap(), det);
    assert!(product.approx_eq(&expected, 1e-9));
}
