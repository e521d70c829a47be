//! Benchmarks for chatstats parsing and aggregation.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench parsing -- html`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatstats::Message;
use chatstats::config::{HtmlTemplate, JsonConfig, TimeBasis};
use chatstats::core::output::{to_csv, to_json};
use chatstats::core::{FrequencyTable, SortBy, aggregate};
use chatstats::parsing::{HtmlRules, parse_html_document, parse_json_document};
use chatstats::text::{StopWordMatch, StopWords, tokenize};

use chrono::{Duration, NaiveDate};

const STOP_WORDS: &str = "и в во не что он на я с со как а то все она так его но да ты к у же вы за бы по";

const WORDS: &[&str] = &[
    "привет", "как", "дела", "хорошо", "завтра", "встреча", "кот", "и", "на", "работа",
];

// =============================================================================
// Test Data Generators
// =============================================================================

fn sentence(i: usize) -> String {
    (0..8)
        .map(|j| WORDS[(i + j * 3) % WORDS.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

fn generate_json(count: usize) -> String {
    let mut messages = Vec::with_capacity(count);
    for i in 0..count {
        let sender = if i % 2 == 0 { "Alice" } else { "Bob" };
        let timestamp = 1705314600000i64 + (i as i64 * 60000);
        messages.push(format!(
            r#"{{"sender_name": "{}", "timestamp_ms": {}, "content": "{}"}}"#,
            sender,
            timestamp,
            sentence(i)
        ));
    }
    format!(r#"{{"messages": [{}]}}"#, messages.join(",\n"))
}

fn generate_rich_html(count: usize) -> String {
    let mut records = Vec::with_capacity(count);
    for i in 0..count {
        let sender = if i % 2 == 0 { "Alice" } else { "Bob" };
        records.push(format!(
            r#"<div class="msg_item" id="msg{}"><div class="from"><b>{}</b> <a href="/m{}">2024.01.15 {:02}:{:02}:00</a></div><div class="msg_body">{}</div></div>"#,
            i,
            sender,
            i,
            i % 24,
            i % 60,
            sentence(i)
        ));
    }
    format!("<html><body>{}</body></html>", records.join("\n"))
}

fn generate_messages(count: usize) -> Vec<Message> {
    let base = NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    (0..count)
        .map(|i| {
            let sender = if i % 2 == 0 { "Alice" } else { "Bob" };
            Message::new(sentence(i))
                .with_sender(sender)
                .with_timestamp(base + Duration::minutes(i as i64 * 17))
        })
        .collect()
}

// =============================================================================
// Parsing Benchmarks
// =============================================================================

fn bench_json_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("json_parsing");
    let config = JsonConfig::new().with_time_basis(TimeBasis::Utc);

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let json = generate_json(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &json, |b, json| {
            b.iter(|| {
                let parsed = parse_json_document(black_box(json), &config).unwrap();
                black_box(parsed)
            });
        });
    }
    group.finish();
}

fn bench_html_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("html_parsing");
    let rules = HtmlRules::compile(HtmlTemplate::rich()).unwrap();

    for size in [100_usize, 1_000, 10_000] {
        let html = generate_rich_html(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &html, |b, html| {
            b.iter(|| {
                let parsed = parse_html_document(black_box(html), &rules).unwrap();
                black_box(parsed)
            });
        });
    }
    group.finish();
}

// =============================================================================
// Statistics Benchmarks
// =============================================================================

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    let text = (0..1_000).map(sentence).collect::<Vec<_>>().join("\n");

    for (name, mode) in [("exact", StopWordMatch::Exact), ("substring", StopWordMatch::Substring)] {
        let stop_words = StopWords::from_text(STOP_WORDS).with_match(mode);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &text, |b, text| {
            b.iter(|| black_box(tokenize(black_box(text), &stop_words).count()));
        });
    }
    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let stop_words = StopWords::from_text(STOP_WORDS);

    for size in [100_usize, 1_000, 10_000, 100_000] {
        let messages = generate_messages(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &messages,
            |b, messages| {
                b.iter(|| {
                    let stats = aggregate(black_box(messages), &stop_words);
                    black_box(stats)
                });
            },
        );
    }
    group.finish();
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");

    for size in [1_000_usize, 10_000, 100_000] {
        let table: FrequencyTable<String> = (0..size * 5)
            .map(|i| format!("word{}", i % size))
            .collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &table, |b, table| {
            b.iter(|| black_box(table.rank(SortBy::CountDesc, Some(20))));
        });
    }
    group.finish();
}

// =============================================================================
// Output Benchmarks
// =============================================================================

fn bench_output(c: &mut Criterion) {
    let mut group = c.benchmark_group("output");
    let stats = aggregate(&generate_messages(10_000), &StopWords::from_text(STOP_WORDS));
    let view = stats.dates.rank(SortBy::KeyAsc, None);

    group.bench_function("csv", |b| {
        b.iter(|| black_box(to_csv(black_box(&view), "Date").unwrap()));
    });
    group.bench_function("json", |b| {
        b.iter(|| black_box(to_json(black_box(&view)).unwrap()));
    });
    group.finish();
}

criterion_group!(parsing, bench_json_parsing, bench_html_parsing);
criterion_group!(statistics, bench_tokenize, bench_aggregate, bench_rank);
criterion_group!(output, bench_output);

criterion_main!(parsing, statistics, output);
