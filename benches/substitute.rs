//! This bench test substitutes a few hundred definitions into a template in
//! which every key occurs several times.

#![allow(missing_docs)]

use std::fmt::Write;

use criterion::{criterion_group, criterion_main, Criterion};
use precompiler::Definitions;

/// Generates `count` definitions and a template referencing each key
fn generate(count: usize) -> (String, String) {
    let mut definitions = String::new();
    let mut template = String::new();
    for i in 0..count {
        writeln!(definitions, "KEY_{i:04}=value number {i}").unwrap();
        writeln!(template, "a(KEY_{i:04}) :- b(KEY_{i:04}), c(KEY_{i:04}).").unwrap();
    }
    (definitions, template)
}

fn substitute(c: &mut Criterion) {
    let (definitions, template) = generate(500);

    c.bench_function("parse definitions", |b| {
        b.iter(|| definitions.parse::<Definitions>().unwrap());
    });

    let parsed: Definitions = definitions.parse().unwrap();
    c.bench_function("apply definitions", |b| {
        b.iter(|| parsed.apply(&template).into_text());
    });
}

criterion_group!(benches, substitute);
criterion_main!(benches);
