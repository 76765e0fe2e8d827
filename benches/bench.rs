// Criterion benchmarks for FitPair

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fitpair::core::{gesture::classify, SwipeInterpreter, SwipeSession};
use fitpair::models::{Candidate, Deck, Decision, SwipeConfig};
use fitpair::services::{parse_json_deck, ManualClock, RecordingNavigator};

fn create_candidate(id: u32) -> Candidate {
    Candidate {
        id,
        name: format!("Partner {}", id),
        age: 20 + (id % 30) as u8,
        gym: "Smart Fit Centro".to_string(),
        goal: "Ganho de Massa".to_string(),
        schedule: "Manhã (7h-9h)".to_string(),
        experience: "Intermediário".to_string(),
        interests: vec!["Musculação".to_string(), "Yoga".to_string()],
        image: String::new(),
        distance: format!("{}.0 km", id % 10),
        liked_you: id % 3 == 0,
    }
}

fn bench_classify(c: &mut Criterion) {
    c.bench_function("classify", |b| {
        b.iter(|| classify(black_box(142.0), black_box(100.0)));
    });
}

fn bench_gesture(c: &mut Criterion) {
    c.bench_function("gesture_60_moves", |b| {
        b.iter(|| {
            let mut interpreter = SwipeInterpreter::default();
            interpreter.begin(black_box(0.0));
            for step in 0..60 {
                interpreter.track(black_box(step as f64 * 3.0));
            }
            interpreter.release()
        });
    });
}

fn bench_session_cycles(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_cycles");

    for size in [2u32, 100, 1000].iter() {
        let deck = Deck::new((0..*size).map(create_candidate).collect());

        group.bench_with_input(BenchmarkId::from_parameter(size), &deck, |b, deck| {
            b.iter(|| {
                let mut session = SwipeSession::new(
                    deck.clone(),
                    SwipeConfig::default(),
                    ManualClock::new(),
                    RecordingNavigator::new(),
                );
                for i in 0..100 {
                    let decision = if i % 2 == 0 { Decision::Like } else { Decision::Reject };
                    session.on_action_button(decision);
                    session.advance_ms(1200);
                    session.continue_browsing();
                    session.advance_ms(200);
                }
                black_box(session.stats())
            });
        });
    }

    group.finish();
}

fn bench_deck_parsing(c: &mut Criterion) {
    let deck = Deck::new((0..500).map(create_candidate).collect());
    let json = serde_json::to_string(&deck).unwrap();

    c.bench_function("parse_json_deck_500", |b| {
        b.iter(|| parse_json_deck(black_box(&json)));
    });
}

criterion_group!(
    benches,
    bench_classify,
    bench_gesture,
    bench_session_cycles,
    bench_deck_parsing
);
criterion_main!(benches);
