use anyhow::Result;
use responder_core::prelude::*;
use responder_core::ManualClock;
use std::cell::Cell;
use std::rc::Rc;

/// Pointer travel before the scroll container steals the gesture.
const DRAG_THRESHOLD: f32 = 8.0;
const FRAME_MILLIS: u64 = 16;
const SURFACE: TargetId = TargetId(1);

fn logged(name: &'static str, options: ResponderOptions) -> ResponderOptions {
    options
        .on_grant(move |s| log::info!("{name}: grant at ({:.1}, {:.1})", s.xy.x, s.xy.y))
        .on_release(move |s| log::info!("{name}: release distance={:.1}", s.distance))
        .on_terminate(move |s| log::info!("{name}: terminate, kept offset {:?}", s.last_local))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Gesture Responder Demo ===");
    println!("A draggable card inside a scroll container. The card claims the");
    println!("press; once the pointer travels past {DRAG_THRESHOLD}px the container");
    println!("captures the move and the card is terminated.");
    println!();

    let context = ArbitrationContext::new();
    let hub = Rc::new(EventHub::new(SURFACE));
    let clock = ManualClock::new(0);
    let travelled = Rc::new(Cell::new(0.0f32));

    let container_options = {
        let travelled = Rc::clone(&travelled);
        ResponderOptions::new()
            .on_move_should_set_capture(move |_| travelled.get() > DRAG_THRESHOLD)
            .on_move(|s| log::info!("container: scroll by {:.1}", s.delta.y))
    };
    let card_options = {
        let travelled = Rc::clone(&travelled);
        ResponderOptions::draggable().on_move(move |s| {
            log::info!(
                "card: move local=({:.1}, {:.1}) velocity={:.3}",
                s.local.x,
                s.local.y,
                s.velocity
            );
            travelled.set(s.distance);
        })
    };

    let container = GestureResponder::new(context.clone(), logged("container", container_options))
        .with_clock(clock.clone());
    let card = GestureResponder::new(context.clone(), logged("card", card_options))
        .with_clock(clock.clone());
    container.attach(hub.clone())?;
    card.attach(hub.clone())?;
    log::debug!("attached {} responders", context.attached_count());

    hub.dispatch(InputEvent::start(SURFACE, 0.0, 0.0));
    for step in 1..=6 {
        clock.advance(FRAME_MILLIS);
        hub.dispatch(InputEvent::moved(SURFACE, 0.0, step as f32 * 3.0));
        log::info!("holder after move {step}: {:?}", context.holder());
    }
    clock.advance(FRAME_MILLIS);
    let end = InputEvent::end(SURFACE, 0.0, 18.0);
    hub.dispatch(end.clone());
    println!();
    println!("end default prevented: {}", end.is_default_prevented());
    println!("container offset: {:?}", container.state().local);
    println!("card offset: {:?}", card.state().last_local);

    card.detach();
    container.detach();
    Ok(())
}
