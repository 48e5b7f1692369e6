//! Матричный калькулятор командной строки
//!
//! Матрицы читаются из JSON-файлов вида `[[1, 2], [3, 4]]`.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use matrix_calculator::{
    matrix::{adjoint, determinant, inverse},
    utils::{init_logging, matrix_table},
    CalculatorConfig, Matrix, Operation,
};
use std::fs;
use std::path::PathBuf;

/// Результат команды
enum Output {
    Matrix(Matrix),
    Scalar(f64),
}

fn matrix_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .help(help)
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn cli() -> Command {
    let mut command = Command::new("matrix_calc")
        .version(clap::crate_version!())
        .about("Dense matrix calculator: add, subtract, multiply, divide")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to a JSON configuration file")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("precision")
                .short('p')
                .long("precision")
                .help("Digits after the decimal point. Overrides the configuration file.")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the result as JSON instead of a table")
                .action(ArgAction::SetTrue),
        );

    for (name, about) in [
        ("add", "A + B"),
        ("subtract", "A - B"),
        ("multiply", "A * B"),
        ("divide", "A * inverse(B)"),
    ] {
        command = command.subcommand(
            Command::new(name)
                .about(about)
                .arg(matrix_arg("a", "Path to matrix A (JSON array of arrays)"))
                .arg(matrix_arg("b", "Path to matrix B (JSON array of arrays)")),
        );
    }

    for (name, about) in [
        ("determinant", "Determinant of a square matrix"),
        ("inverse", "Inverse of a square matrix"),
        ("adjoint", "Adjugate of a square matrix"),
    ] {
        command = command.subcommand(
            Command::new(name)
                .about(about)
                .arg(matrix_arg("a", "Path to the matrix (JSON array of arrays)")),
        );
    }

    command
}

fn load_matrix(matches: &ArgMatches, name: &str) -> Result<Matrix> {
    let path = matches
        .get_one::<PathBuf>(name)
        .with_context(|| format!("Не указан файл матрицы {}", name))?;
    let text = fs::read_to_string(path)
        .with_context(|| format!("Не удалось прочитать {}", path.display()))?;
    let matrix: Matrix = serde_json::from_str(&text)
        .with_context(|| format!("Некорректная матрица в {}", path.display()))?;
    log::debug!("Загружена матрица {:?} из {}", matrix.dims(), path.display());
    Ok(matrix)
}

fn run(name: &str, sub: &ArgMatches) -> Result<Output> {
    let output = match name {
        "determinant" => Output::Scalar(determinant(&load_matrix(sub, "a")?)?),
        "inverse" => Output::Matrix(inverse(&load_matrix(sub, "a")?)?),
        "adjoint" => Output::Matrix(adjoint(&load_matrix(sub, "a")?)?),
        other => {
            let operation: Operation = other.parse()?;
            let a = load_matrix(sub, "a")?;
            let b = load_matrix(sub, "b")?;
            Output::Matrix(
                operation
                    .apply(&a, &b)
                    .with_context(|| format!("Операция {} не выполнена", operation))?,
            )
        }
    };
    Ok(output)
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => CalculatorConfig::from_file(path)?,
        None => CalculatorConfig::default(),
    };
    if let Some(&precision) = matches.get_one::<usize>("precision") {
        config.precision = precision;
    }
    init_logging(&config.log_filter);

    let (name, sub) = matches
        .subcommand()
        .context("Не указана операция")?;
    let output = run(name, sub)?;

    match (output, matches.get_flag("json")) {
        (Output::Matrix(matrix), true) => println!("{}", serde_json::to_string(&matrix)?),
        (Output::Matrix(matrix), false) => {
            println!("Результат ({}x{}):", matrix.rows(), matrix.cols());
            matrix_table(&matrix, config.precision).printstd();
        }
        (Output::Scalar(value), true) => println!("{}", serde_json::to_string(&value)?),
        (Output::Scalar(value), false) => println!("{:.*}", config.precision, value),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn parses_binary_operation_with_options() {
        let matches = cli()
            .try_get_matches_from(["matrix_calc", "-p", "4", "divide", "a.json", "b.json"])
            .unwrap();
        assert_eq!(matches.get_one::<usize>("precision"), Some(&4));
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "divide");
        assert_eq!(sub.get_one::<PathBuf>("b"), Some(&PathBuf::from("b.json")));
    }

    #[test]
    fn unary_commands_take_one_matrix() {
        assert!(cli()
            .try_get_matches_from(["matrix_calc", "determinant", "a.json", "b.json"])
            .is_err());
    }
}
