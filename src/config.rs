//! Настройки калькулятора

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Настройки калькулятора и бенчмарка.
///
/// Все поля необязательны в JSON, отсутствующие берутся из `Default`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Знаков после запятой при выводе результата
    pub precision: usize,
    /// Допуск при сравнении результатов
    pub epsilon: f64,
    /// Фильтр `env_logger`, если не задан `MATRIX_CALC_LOG`
    pub log_filter: String,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            precision: 2,
            epsilon: 1e-9,
            log_filter: "warn".to_string(),
        }
    }
}

impl CalculatorConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Не удалось прочитать конфигурацию {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Некорректная конфигурация {}", path.display()))
    }
}
