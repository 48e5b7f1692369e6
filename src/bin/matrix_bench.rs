//! Замеры времени разложения определителя, обращения и деления матриц
use anyhow::{Context, Result};
use clap::{Arg, Command};
use indicatif::{ProgressBar, ProgressStyle};
use matrix_calculator::{
    matrix::{compare_results, determinant, divide, initialize_matrices, inverse, multiply},
    utils::{average_time, init_logging},
    CalculatorConfig, MatrixResult, MatrixType,
};
use prettytable::{row, Table};
use std::path::PathBuf;
use std::time::Duration;

/// Результаты замеров для одного размера
struct SizeReport {
    size: usize,
    determinant: Duration,
    inverse: Duration,
    divide: Duration,
    verified: Option<bool>,
}

fn micros(duration: Duration) -> String {
    format!("{:.2}", duration.as_secs_f64() * 1e6)
}

fn bench_size(
    size: usize,
    iterations: u32,
    matrix_type: MatrixType,
    epsilon: f64,
    pb: &ProgressBar,
) -> MatrixResult<SizeReport> {
    let (a, b) = initialize_matrices(matrix_type, size, &mut rand::thread_rng())?;

    let (det, det_time) = average_time(iterations, || determinant(&b));
    pb.inc(1);
    let (_, inv_time) = average_time(iterations, || inverse(&b));
    pb.inc(1);
    let (quotient, div_time) = average_time(iterations, || divide(&a, &b));
    pb.inc(1);

    let verified = match (det.transpose()?, quotient.transpose()) {
        (Some(det), _) if det == 0.0 => {
            log::warn!("Матрица {}x{} вырождена, проверка пропущена", size, size);
            None
        }
        (_, Ok(Some(quotient))) => {
            let expected = multiply(&a, &inverse(&b)?)?;
            Some(compare_results(&expected, &quotient, epsilon))
        }
        (_, Ok(None)) => None,
        (_, Err(err)) => return Err(err),
    };

    Ok(SizeReport {
        size,
        determinant: det_time,
        inverse: inv_time,
        divide: div_time,
        verified,
    })
}

fn main() -> Result<()> {
    let matches = Command::new("matrix_bench")
        .about("Times cofactor-expansion determinant, inverse and division")
        .arg(
            Arg::new("max_size")
                .long("max-size")
                .default_value("7")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("iterations")
                .long("iterations")
                .default_value("20")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new("fill")
                .long("fill")
                .default_value("uniform")
                .value_parser(["uniform", "gaussian"]),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .get_matches();

    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => CalculatorConfig::from_file(path)?,
        None => CalculatorConfig::default(),
    };
    init_logging(&config.log_filter);

    let max_size = *matches.get_one::<usize>("max_size").context("max-size")?;
    let iterations = *matches.get_one::<u32>("iterations").context("iterations")?;
    let matrix_type = match matches.get_one::<String>("fill").map(String::as_str) {
        Some("gaussian") => MatrixType::Gaussian,
        _ => MatrixType::Uniform,
    };

    println!("Замеры для матриц 1x1..{}x{}, {} итераций\n", max_size, max_size, iterations);

    let pb = ProgressBar::new((max_size * 3) as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut reports = Vec::with_capacity(max_size);
    for size in 1..=max_size {
        pb.set_message(format!("{}x{}", size, size));
        let report = bench_size(size, iterations, matrix_type, config.epsilon, &pb)
            .with_context(|| format!("Замер для размера {} не выполнен", size))?;
        reports.push(report);
    }
    pb.finish_with_message("готово");

    let mut table = Table::new();
    table.add_row(row!["Размер", "det, мкс", "inverse, мкс", "divide, мкс", "A/B = A*B^-1"]);
    for report in &reports {
        let verified = match report.verified {
            Some(true) => "да",
            Some(false) => "нет",
            None => "-",
        };
        table.add_row(row![
            format!("{}x{}", report.size, report.size),
            micros(report.determinant),
            micros(report.inverse),
            micros(report.divide),
            verified
        ]);
    }
    table.printstd();

    Ok(())
}
