//! Benchmarks for the aggregation engines.
//!
//! Run with: cargo bench -p healthcheck-portfolio --features parallel

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use healthcheck_core::{Table, TemplateKind, Value};
use healthcheck_portfolio::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn create_portfolio_master(rows: usize) -> Table {
    let classes = ["Equity", "Fixed Income", "Alternatives", "Cash", "Real Estate"];
    let currencies = ["USD", "EUR", "CHF", "GBP", "JPY"];
    let countries = ["USA", "DEU", "CHE", "GBR", "JPN", "BRA", "IND"];

    let data = (0..rows)
        .map(|i| {
            vec![
                Value::from(classes[i % classes.len()]),
                Value::from(format!("Sub {}", i % 17)),
                Value::from(currencies[i % currencies.len()]),
                Value::from(if i % 9 == 0 { "Illiquid" } else { "Liquid" }),
                Value::from(countries[i % countries.len()]),
                Value::from(10_000.0 + (i * 7_919 % 1_000_000) as f64),
                Value::from(0.05 + (i % 20) as f64 / 100.0),
                Value::from(2.0 + (i % 9) as f64),
                Value::from(40.0 + (i % 50) as f64),
            ]
        })
        .collect();

    Table::with_rows(
        [
            "Asset Class",
            "Sub Asset Class",
            "FX",
            "Liquidity",
            "Country ISO3",
            "USD Total",
            "TER %",
            "Exp Return % (annual)",
            "ESG Score",
        ],
        data,
    )
}

fn create_bond_list(rows: usize) -> Table {
    let ratings = ["AAA", "AA", "A", "BBB", "BB", "B"];
    let data = (0..rows)
        .map(|i| {
            vec![
                Value::from(ratings[i % ratings.len()]),
                Value::from((i % 150) as f64 / 10.0),
                Value::from((i % 300) as f64 / 10.0),
                Value::from(100_000.0 + (i * 104_729 % 5_000_000) as f64),
            ]
        })
        .collect();
    Table::with_rows(
        ["Rating", "Modified Duration", "Years to Maturity", "Market Value (USD)"],
        data,
    )
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_portfolio_master(c: &mut Criterion) {
    let aux = AuxiliaryTables::new();
    let sequential = AnalyticsConfig::sequential();
    let parallel = AnalyticsConfig::default().with_threshold(0);

    let mut group = c.benchmark_group("portfolio_master");
    group.sample_size(50);

    for size in [100, 1_000, 10_000].iter() {
        let table = create_portfolio_master(*size);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("sequential", size), &table, |b, table| {
            b.iter(|| {
                transform(
                    black_box(table),
                    TemplateKind::PortfolioMaster,
                    &aux,
                    &sequential,
                )
            })
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), &table, |b, table| {
            b.iter(|| {
                transform(
                    black_box(table),
                    TemplateKind::PortfolioMaster,
                    &aux,
                    &parallel,
                )
            })
        });
    }
    group.finish();
}

fn bench_fixed_income(c: &mut Criterion) {
    let aux = AuxiliaryTables::new();
    let config = AnalyticsConfig::default();

    let mut group = c.benchmark_group("fixed_income");
    for size in [100, 1_000, 10_000].iter() {
        let table = create_bond_list(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &table, |b, table| {
            b.iter(|| {
                transform(
                    black_box(table),
                    TemplateKind::FixedIncomeAssetList,
                    &aux,
                    &config,
                )
            })
        });
    }
    group.finish();
}

// =============================================================================
// CRITERION GROUPS
// =============================================================================

criterion_group!(engines, bench_portfolio_master, bench_fixed_income,);

criterion_main!(engines);
