use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vnaddr::data::{embedded_index, load_units, UnitIndex};
use vnaddr::parser::decompose;

fn benchmark_decompose(c: &mut Criterion) {
    let index = embedded_index();

    c.bench_function("decompose_full_address", |b| {
        b.iter(|| {
            decompose(
                black_box("33 Trần Phú, Phường Điện Biên, Quận Ba Đình, Thành phố Hà Nội"),
                index,
            )
        })
    });

    c.bench_function("decompose_partial_address", |b| {
        b.iter(|| decompose(black_box("khu du lịch Bãi Cháy, Tỉnh Quảng Ninh"), index))
    });

    c.bench_function("decompose_no_match", |b| {
        b.iter(|| decompose(black_box("221B Baker Street, London"), index))
    });
}

fn benchmark_assemble(c: &mut Criterion) {
    c.bench_function("assemble", |b| {
        b.iter(|| {
            vnaddr::assemble(
                black_box("33 Trần Phú"),
                black_box("Phường Điện Biên"),
                black_box("Quận Ba Đình"),
                black_box("Thành phố Hà Nội"),
            )
        })
    });
}

fn benchmark_batch(c: &mut Criterion) {
    let addresses: Vec<&str> = vec![
        "33 Trần Phú, Phường Điện Biên, Quận Ba Đình, Thành phố Hà Nội",
        "Phường Hồng Gai, Thành phố Hạ Long, Tỉnh Quảng Ninh",
        "7 Quang Trung, Phường Thạch Thang, Quận Hải Châu, Thành phố Đà Nẵng",
        "Phường Lộc Thọ, Thành phố Nha Trang, Tỉnh Khánh Hòa",
        "Phường Bến Nghé, Quận 1, Thành phố Hồ Chí Minh",
        "Phường Tân An, Quận Ninh Kiều, Thành phố Cần Thơ",
    ];

    c.bench_function("parse_batch_6", |b| {
        b.iter(|| vnaddr::parse_batch(black_box(&addresses)))
    });
}

fn benchmark_index(c: &mut Criterion) {
    let rows = load_units();

    c.bench_function("index_build", |b| b.iter(|| UnitIndex::build(black_box(&rows))));
}

criterion_group!(
    benches,
    benchmark_decompose,
    benchmark_assemble,
    benchmark_batch,
    benchmark_index
);
criterion_main!(benches);
