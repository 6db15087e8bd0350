//! Simulated server: two players, a handful of widgets, one disconnect.
//!
//! Usage: `tween-demo [config.json]`

use std::error::Error;
use std::time::{Duration, Instant};

use glam::Vec2;
use log::info;
use widget_tween::{
    Animation, AnimationKind, CompletionEvent, Easing, MemoryDirectory, MemoryOwner, OwnerId,
    PropertyMask, Rgba, Scheduler, SchedulerConfig, TargetId, Widget,
};
use widget_tween_host::{natives, RawAnimation, SchedulerRunner, ScriptError, ScriptSink};

const RUN_FOR: Duration = Duration::from_millis(1_500);
const DISCONNECT_AT: Duration = Duration::from_millis(500);

/// Kind of the slide-in; its completion slides the label back down a bit.
const SLIDE_IN: i32 = 1;
const SETTLE: i32 = 3;

fn load_config() -> Result<SchedulerConfig, Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(path) => Ok(SchedulerConfig::from_json(&std::fs::read_to_string(path)?)?),
        None => Ok(SchedulerConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    info!(
        "tween-demo: {} slots, {} ms ticks",
        config.capacity, config.tick_interval_ms
    );

    let mut directory = MemoryDirectory::with_capacity(config.owner_hint);
    for player in [1, 2] {
        let mut owner = MemoryOwner::new(OwnerId(player));
        owner.add_widget(Widget::new(TargetId(0)).with_position(Vec2::new(-200.0, 100.0)));
        owner.add_widget(Widget::new(TargetId(1)).with_color(Rgba::TRANSPARENT));
        owner.add_widget(Widget::new(TargetId(2)));
        directory.connect(owner);
    }

    let sink = ScriptSink::new(
        |scheduler: &mut Scheduler, name: &'static str, cells: [i32; CompletionEvent::CELLS]| {
            info!("{}(owner={}, handle={}, target={}, kind={})", name, cells[0], cells[1], cells[2], cells[3]);
            if cells[3] == SLIDE_IN {
                let settle = RawAnimation {
                    owner: cells[0],
                    target: cells[2],
                    from_x: 320.0,
                    from_y: 100.0,
                    to_x: 320.0,
                    to_y: 140.0,
                    duration_ms: 300,
                    easing: Easing::BounceOut.index() as i32,
                    mask: PropertyMask::POSITION.bits() as i32,
                    kind: SETTLE,
                    ..Default::default()
                };
                if natives::create(scheduler, &settle) < 0 {
                    return Err(ScriptError::Aborted { name, code: cells[1] });
                }
            }
            Ok(())
        },
    );
    let mut runner = SchedulerRunner::new(&config, directory, sink);

    let scheduler = runner.scheduler_mut();
    for player in [1, 2] {
        let owner = OwnerId(player);
        scheduler.create(
            Animation::new(owner, TargetId(0), 800, Easing::BackOut)
                .position(Vec2::new(-200.0, 100.0), Vec2::new(320.0, 100.0))
                .with_kind(AnimationKind(SLIDE_IN)),
        );
        scheduler.create(
            Animation::new(owner, TargetId(1), 1_200, Easing::SineInOut)
                .color(Rgba::TRANSPARENT, Rgba::WHITE)
                .box_color(Rgba::TRANSPARENT, Rgba::from(0x0000_00A0))
                .with_kind(AnimationKind(2)),
        );
        scheduler.create(
            Animation::new(owner, TargetId(2), 600, Easing::ElasticOut)
                .letter_size(Vec2::new(0.2, 0.8), Vec2::new(0.5, 1.8))
                .silent(),
        );
    }

    let started = Instant::now();
    let mut last = started;
    let mut disconnected = false;
    while started.elapsed() < RUN_FOR {
        std::thread::sleep(runner.until_next_tick());
        let now = Instant::now();
        runner.advance(now - last);
        last = now;

        if !disconnected && started.elapsed() >= DISCONNECT_AT {
            runner.directory_mut().disconnect(OwnerId(2));
            let dropped = runner.owner_disconnected(OwnerId(2));
            info!("player 2 disconnected, {} animation(s) dropped", dropped);
            disconnected = true;
        }
    }

    for owner in runner.directory().iter() {
        for w in owner.widgets() {
            info!(
                "player {} widget {}: position {:?}, color {:08x}, {} commits",
                owner.id.0, w.id.0, w.shown.position, w.shown.color.to_u32(), w.commits
            );
        }
    }
    info!("stats: {}", serde_json::to_string(&runner.scheduler().stats())?);
    Ok(())
}
