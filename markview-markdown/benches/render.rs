#![allow(
  clippy::expect_used,
  clippy::unwrap_used,
  reason = "Fine in benchmarks"
)]
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use markview_markdown::{MarkdownOptions, MarkdownRenderer};

const DOC_SMALL: &str = "# Welcome

This is a *short* document with a [link](other.md).
";

const DOC_LARGE: &str = r#"# Project Handbook

Everything you need to get **productive** on day one. See the
[installation guide](docs/install.md) or the [upstream site](https://example.com).

## Layout

| Path | Purpose | Owner |
|:-----|:-------:|------:|
| `src/` | Sources | core |
| `docs/` | Handbook | docs |
| `ci/` | Pipelines | infra |

## Workflow

1. Fork the repository
2. Create a branch named `feature/<topic>`
3. Open a pull request

* Keep commits small
* Write ___meaningful___ messages
- Run the test suite before pushing

> Reviews are expected within two working days.

---

```rust
fn main() {
    let greeting = "<hello & goodbye>";
    println!("{greeting}");
}
```

```mermaid
graph TD
  A[Write] --> B[Review]
  B --> C[Merge]
```

![Architecture](img/architecture.png)

Closing notes with **bold**, *italic*, `code` and a trailing paragraph
that spans two lines.
"#;

fn bench_render(c: &mut Criterion) {
  let mut group = c.benchmark_group("render");
  let renderer = MarkdownRenderer::new(MarkdownOptions::default());

  group.bench_with_input(
    BenchmarkId::new("document", "small"),
    &DOC_SMALL,
    |b, doc| {
      b.iter(|| renderer.render(black_box(doc)));
    },
  );

  group.bench_with_input(
    BenchmarkId::new("document", "large"),
    &DOC_LARGE,
    |b, doc| {
      b.iter(|| renderer.render(black_box(doc)));
    },
  );

  let repeated = DOC_LARGE.repeat(50);
  group.bench_with_input(
    BenchmarkId::new("document", "repeated"),
    &repeated.as_str(),
    |b, doc| {
      b.iter(|| renderer.render(black_box(doc)));
    },
  );

  group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
