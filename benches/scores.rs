use burn_finbert::pipelines::sentiment_analysis::{
    scores::{preview, summarize},
    LabelScore, NEGATIVE, NEUTRAL, POSITIVE,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_summarize(c: &mut Criterion) {
    let label_scores = vec![
        LabelScore::new(POSITIVE, 0.912_345),
        LabelScore::new(NEGATIVE, 0.034_567),
        LabelScore::new(NEUTRAL, 0.053_088),
    ];
    let headline = "Chipmaker shares rally as data center revenue tops estimates. ".repeat(8);

    c.bench_function("summarize", |b| {
        b.iter(|| summarize(black_box(&headline), black_box(&label_scores), 100))
    });

    c.bench_function("preview", |b| b.iter(|| preview(black_box(&headline), 100)));
}

criterion_group!(benches, bench_summarize);
criterion_main!(benches);
