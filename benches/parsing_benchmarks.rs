use criterion::{black_box, criterion_group, criterion_main, Criterion};
use check_disk_formatter::parsing::{extract_partitions, parse_thresholds};
use check_disk_formatter::report::render_details;

fn extract_benchmark(c: &mut Criterion) {
    let test_values = vec![
        "DISK CRITICAL - free space: / 7002 MB (18% inode=60%): /data 16273093 MB (26% inode=99%):",
        "DISK CRITICAL - free space: / 7051 MB (18% inode=60%); /data 16733467 MB (27% inode=99%);| /=31220MB;36287;2015;0;40319 /dev/shm=81MB;2236;124;0;2485",
        "DISK OK - free space: / 30000 MB (80% inode=90%):",
        "CHECK_NRPE: Socket timeout after 10 seconds.",
    ];

    c.bench_function("extract_partitions", |b| {
        b.iter(|| {
            for value in &test_values {
                black_box(extract_partitions(black_box(value)));
            }
        })
    });
}

fn render_benchmark(c: &mut Criterion) {
    let detail = "THRESHOLDS - WARNING:50%;CRITICAL:40%;\\nFilesystem Size Used Avail Use% Mounted on\\n/dev/sda1 40G 18G 22G 45% /\\n/dev/sdb1 100G 55G 45G 55% /srv\\n/dev/sdc1 60G 39G 21G 65% /var\\ntmpfs 2.0G 0 2.0G 0% /dev/shm";

    c.bench_function("render_details", |b| {
        b.iter(|| {
            let thresholds = parse_thresholds(black_box(detail));
            black_box(render_details(black_box(detail), thresholds.as_ref()));
        })
    });
}

criterion_group!(benches, extract_benchmark, render_benchmark);
criterion_main!(benches);
