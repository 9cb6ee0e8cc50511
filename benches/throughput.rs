use brrtpattern::{Matcher, MatcherKind, RouteMatcher, RouteTable, UrlParts};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

fn example_table() -> &'static str {
    r#"routes:
  - pattern: "/"
    handler: root_handler
  - pattern: "zoo/animals"
    handler: get_animals
  - pattern: "zoo/animals/:id"
    handler: get_animal
  - pattern: "zoo/animals/:id/toys/:toy_id"
    handler: animal_toy
  - pattern: "zoo/:category/animals/:id/habitats/:habitat_id/sections/:section_id"
    handler: habitat_section
  - pattern: "inventory/:warehouse_id/feeds/:feed_id/items/:item_id/batches/:batch_id"
    handler: post_item_batch
  - pattern: "complex/:a/:b/:c/:d/:e/:f/:g/:h/:i"
    handler: complex_many_params
  - pattern: "api/(v:major(.:minor)/)run"
    handler: runner
  - pattern: "https://:tenant.example.com/dashboard/*rest"
    handler: tenant_dashboard
  - pattern: "static/*path"
    handler: static_files
  - pattern: "*"
    handler: not_found
"#
}

fn build(kind: MatcherKind) -> RouteMatcher<String> {
    let table: RouteTable = serde_yaml::from_str(example_table()).expect("failed to parse table");
    table.build_with(kind).expect("failed to build matcher")
}

/// A wide table: many sibling routes sharing a prefix.
fn build_wide(kind: MatcherKind, count: usize) -> RouteMatcher<usize> {
    let mut matcher = RouteMatcher::new(kind);
    for i in 0..count {
        matcher
            .add(&format!("api/v1/resource{i}/:id"), i)
            .expect("valid pattern");
    }
    matcher
}

fn bench_match_throughput(c: &mut Criterion) {
    let test_urls: Vec<UrlParts> = [
        "https://x.test/zoo/animals/123",
        "https://x.test/zoo/animals/123/toys/456",
        "https://x.test/zoo/cats/animals/123/habitats/88/sections/5",
        "https://x.test/inventory/1/feeds/2/items/3/batches/4",
        "https://x.test/complex/1/2/3/4/5/6/7/8/9",
        "https://x.test/api/v1.2/run",
        "https://acme.example.com/dashboard/a/b/c",
        "https://x.test/does/not/exist",
    ]
    .iter()
    .map(|u| u.parse().expect("valid url"))
    .collect();

    let mut group = c.benchmark_group("pattern_match");
    for kind in [MatcherKind::Array, MatcherKind::Trie] {
        let matcher = build(kind);
        group.bench_function(kind.as_str(), |b| {
            b.iter(|| {
                for url in &test_urls {
                    let res = matcher.match_parts(url);
                    black_box(&res);
                }
            })
        });
    }
    group.finish();
}

fn bench_table_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_size");
    for count in [10usize, 100, 1000] {
        let url: UrlParts = format!("https://x.test/api/v1/resource{}/42", count - 1)
            .parse()
            .expect("valid url");
        for kind in [MatcherKind::Array, MatcherKind::Trie] {
            let matcher = build_wide(kind, count);
            group.bench_with_input(BenchmarkId::new(kind.as_str(), count), &url, |b, url| {
                b.iter(|| black_box(matcher.match_parts(url)))
            });
        }
    }
    group.finish();
}

fn bench_trie_match_any(c: &mut Criterion) {
    let matcher = build(MatcherKind::Trie);
    let url: UrlParts = "https://x.test/zoo/animals/123".parse().expect("valid url");
    c.bench_function("trie_match_any", |b| {
        b.iter(|| black_box(matcher.match_any(&url)))
    });
}

criterion_group!(
    benches,
    bench_match_throughput,
    bench_table_size,
    bench_trie_match_any
);
criterion_main!(benches);
