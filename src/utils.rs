//! Вспомогательные функции и утилиты

use crate::matrix::Matrix;
use log::LevelFilter;
use prettytable::{Cell, Row, Table};
use std::time::{Duration, Instant};

/// Переменная окружения с фильтром логов
pub const LOG_ENV: &str = "MATRIX_CALC_LOG";

/// Измеряет время выполнения функции
pub fn measure_time<F, T>(f: F) -> (T, Duration)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}

/// Среднее время `iterations` запусков; результат последнего запуска
/// возвращается вместе со временем.
pub fn average_time<F, T>(iterations: u32, mut f: F) -> (Option<T>, Duration)
where
    F: FnMut() -> T,
{
    let mut last = None;
    let (_, total) = measure_time(|| {
        for _ in 0..iterations {
            last = Some(f());
        }
    });
    (last, total / iterations.max(1))
}

/// Настраивает `env_logger`; `MATRIX_CALC_LOG` имеет приоритет над `default_filter`
pub fn init_logging(default_filter: &str) {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or(LOG_ENV, default_filter))
        .init();
}

/// Таблица значений матрицы с фиксированной точностью
pub fn matrix_table(matrix: &Matrix, precision: usize) -> Table {
    let mut table = Table::new();
    for row in matrix.as_rows() {
        let cells = row
            .iter()
            .map(|value| Cell::new(&format!("{:.*}", precision, value)))
            .collect();
        table.add_row(Row::new(cells));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_time_keeps_last_result() {
        let mut calls = 0;
        let (last, _) = average_time(3, || {
            calls += 1;
            calls
        });
        assert_eq!(last, Some(3));

        let (none, _) = average_time(0, || 1);
        assert_eq!(none, None);
    }

    #[test]
    fn table_uses_requested_precision() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0 / 3.0], vec![-0.5, 10.0]]).unwrap();
        let table = matrix_table(&m, 2);
        assert_eq!(table.len(), 2);
        let rendered = table.to_string();
        assert!(rendered.contains("0.67"));
        assert!(rendered.contains("-0.50"));
        assert!(rendered.contains("10.00"));
    }
}
