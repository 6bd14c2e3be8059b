use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use responder_core::kinematics;
use responder_core::{
    ArbitrationContext, EventHub, GestureResponder, GestureState, InputEvent, ManualClock,
    ResponderOptions, TargetId,
};
use std::rc::Rc;

const TARGET: TargetId = TargetId(1);
const SAMPLE_COUNTS: &[usize] = &[16, 256];

fn drag_path(samples: usize) -> Vec<InputEvent> {
    (0..samples)
        .map(|i| {
            let t = i as f32;
            InputEvent::moved(TARGET, t * 1.5, (t * 0.1).sin() * 40.0)
        })
        .collect()
}

fn bench_move_updates(c: &mut Criterion) {
    let mut group = c.benchmark_group("kinematics_moved");
    for &samples in SAMPLE_COUNTS {
        let path = drag_path(samples);
        let seed = kinematics::granted(
            &GestureState::default(),
            &InputEvent::start(TARGET, 0.0, 0.0),
            0,
        );
        group.bench_with_input(BenchmarkId::from_parameter(samples), &path, |b, path| {
            b.iter(|| {
                let mut state = seed.clone();
                for (i, event) in path.iter().enumerate() {
                    state = kinematics::moved(&state, event, i as u64 * 8);
                }
                black_box(state)
            });
        });
    }
    group.finish();
}

fn bench_routed_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("routed_drag");
    for &samples in SAMPLE_COUNTS {
        let path = drag_path(samples);
        group.bench_with_input(BenchmarkId::from_parameter(samples), &path, |b, path| {
            let context = ArbitrationContext::new();
            let hub = Rc::new(EventHub::new(TARGET));
            let clock = ManualClock::new(0);
            let outer = GestureResponder::new(context.clone(), ResponderOptions::new())
                .with_clock(clock.clone());
            let inner = GestureResponder::new(context, ResponderOptions::draggable())
                .with_clock(clock.clone());
            outer.attach(hub.clone()).expect("attach outer");
            inner.attach(hub.clone()).expect("attach inner");

            b.iter(|| {
                hub.dispatch(InputEvent::start(TARGET, 0.0, 0.0));
                for event in path {
                    clock.advance(8);
                    hub.dispatch(event.clone());
                }
                hub.dispatch(InputEvent::end(TARGET, 0.0, 0.0));
                black_box(inner.state().local)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_move_updates, bench_routed_drag);
criterion_main!(benches);
