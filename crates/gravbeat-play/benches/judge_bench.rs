use criterion::{Criterion, black_box, criterion_group, criterion_main};
use gravbeat_config::FieldConfig;
use gravbeat_play::{HitZones, JudgeConfig, JudgeSystem, NoteField};
use gravbeat_types::{Lane, Rect, TravelDirection, scaled_rect};

fn note_rect(field: &FieldConfig, lane: Lane, center_y: f32) -> Rect {
    Rect::new(
        field.lane_x(lane),
        center_y - field.sprite_height / 2.0,
        field.sprite_width,
        field.sprite_height,
    )
}

fn classify_benchmark(c: &mut Criterion) {
    let field = FieldConfig::default();
    let zones = HitZones::new(&field, TravelDirection::Forward);
    let zone = zones.get(Lane::Left).rect;
    let judge = JudgeSystem::new(JudgeConfig::normal());
    let offsets = [0.0, 30.0, -80.0, 95.0, 140.0, 400.0];
    let hitboxes: Vec<Rect> = offsets
        .iter()
        .map(|offset| scaled_rect(&note_rect(&field, Lane::Left, 825.0 + offset), 0.8))
        .collect();

    c.bench_function("classify_mixed_offsets", |b| {
        let mut i = 0;
        b.iter(|| {
            let hitbox = black_box(&hitboxes[i % hitboxes.len()]);
            let _ = black_box(judge.classify(hitbox, &zone, TravelDirection::Forward));
            i += 1;
        });
    });
}

fn judge_press_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("judge_press");
    let field = FieldConfig::default();
    let zones = HitZones::new(&field, TravelDirection::Forward);

    for crowd in [1usize, 8, 32] {
        group.bench_function(format!("lane_with_{crowd}_notes"), |b| {
            let mut judge = JudgeSystem::new(JudgeConfig::normal());
            let mut notes = NoteField::new();
            let mut now = 0i64;
            b.iter(|| {
                // Keep the lane populated; a hit consumes the closest note.
                while notes.in_lane(Lane::Up).count() < crowd {
                    let y = 825.0 - 60.0 * notes.len() as f32;
                    notes.spawn(Lane::Up, now, note_rect(&field, Lane::Up, y));
                }
                now += 50_000;
                let _ = black_box(judge.judge_press(
                    Lane::Up,
                    now,
                    &mut notes,
                    zones.get(Lane::Up),
                    TravelDirection::Forward,
                ));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, classify_benchmark, judge_press_benchmark);
criterion_main!(benches);
