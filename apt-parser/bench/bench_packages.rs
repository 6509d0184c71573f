use apt_parser::{Options, Packages};
use criterion::{criterion_group, criterion_main, Criterion};

fn packages_index(count: usize) -> String {
    let stanza = std::fs::read_to_string(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/data/jammy.packages"
    ))
    .expect("Could not read packages file");

    std::iter::repeat(stanza.trim())
        .take(count)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn parse_packages_benchmark(c: &mut Criterion) {
    let index = packages_index(3000);

    c.bench_function("split_stanzas", |b| {
        b.iter(|| apt_parser::split_stanzas(&index));
    });

    c.bench_function("parse_stanzas", |b| {
        b.iter(|| apt_parser::parse_stanzas(&index));
    });

    c.bench_function("parse_packages", |b| {
        b.iter(|| {
            let _packages: Packages = index.parse().unwrap();
        });
    });

    c.bench_function("parse_packages_lenient", |b| {
        b.iter(|| Packages::parse(&index, &Options::lenient()).unwrap());
    });
}

criterion_group!(benches, parse_packages_benchmark);
criterion_main!(benches);
