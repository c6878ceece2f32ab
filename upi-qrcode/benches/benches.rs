use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const PAYMENT: &str =
    "upi://pay?pa=merchant%40upi&pn=Corner%20Store&am=250.00&cu=INR&tn=Test&mc=5411&tr=ORD20240101";

fn encode_benchmark(c: &mut Criterion) {
    c.bench_with_input(
        BenchmarkId::new("upi-qrcode", "encode_text"),
        black_box(&PAYMENT),
        |b, i| {
            b.iter(|| {
                let _qr = upi_qrcode::QrCode::encode_text(i);
            })
        },
    );
}

fn svg_benchmark(c: &mut Criterion) {
    let input = upi_qrcode::QrCode::encode_text(PAYMENT).unwrap();
    c.bench_with_input(
        BenchmarkId::new("upi-qrcode", "to_svg_string"),
        black_box(&input),
        |b, i| {
            b.iter(|| {
                let _svg = upi_qrcode::to_svg_string(i, &upi_qrcode::SvgOptions::default());
            })
        },
    );
}

fn data_uri_benchmark(c: &mut Criterion) {
    c.bench_with_input(
        BenchmarkId::new("upi-qrcode", "draw_data_uri"),
        black_box(&PAYMENT),
        |b, i| {
            b.iter(|| {
                let _uri = upi_qrcode::draw_data_uri(i);
            })
        },
    );
}

criterion_group!(benches, encode_benchmark, svg_benchmark, data_uri_benchmark);
criterion_main!(benches);
