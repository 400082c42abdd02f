use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicBool, Ordering};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_unit(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }
}

const VIEWPORT: Viewport = Viewport {
    width: 1280,
    height: 800,
};

const HEADLINE: u64 = 1;
const OVERLAY: u64 = 2;
const CTA: u64 = 3;

fn approx(a: f32, b: f32) -> bool {
    let d = a - b;
    -1e-4 < d && d < 1e-4
}

fn value_of(writes: &[PropertyWrite<u64>], target: u64, property: Property) -> Option<f32> {
    writes
        .iter()
        .find(|w| w.target == target && w.property == property)
        .map(|w| w.value)
}

fn linear_track(target: u64, window: Window, from: f32, to: f32) -> Track<u64> {
    Track::from_to(
        target,
        window,
        [(Property::X, Length::px(from))],
        [(Property::X, Length::px(to))],
        Easing::Linear,
    )
}

/// A section that slides in during the entrance phase and leaves during the exit phase.
fn collection_timeline() -> Timeline<u64> {
    Timeline::builder()
        .entrance(
            HEADLINE,
            [(Property::X, Length::vw(-40.0)), (Property::Opacity, Length::num(0.0))],
            [(Property::X, Length::ZERO), (Property::Opacity, Length::num(1.0))],
            Easing::Linear,
        )
        .exit(
            HEADLINE,
            [(Property::X, Length::ZERO), (Property::Opacity, Length::num(1.0))],
            [(Property::X, Length::vw(-10.0)), (Property::Opacity, Length::num(0.0))],
            Easing::Power2In,
        )
        .build()
        .unwrap()
}

/// Exit-only tracks, as on a hero section whose entrance plays on load.
fn hero_timeline() -> Timeline<u64> {
    Timeline::builder()
        .from_to(
            OVERLAY,
            Window::new(0.70, 1.0),
            [(Property::Opacity, Length::num(1.0))],
            [(Property::Opacity, Length::num(0.0))],
            Easing::Power2In,
        )
        .from_to(
            HEADLINE,
            Window::new(0.70, 1.0),
            [(Property::Y, Length::ZERO), (Property::Opacity, Length::num(1.0))],
            [(Property::Y, Length::vh(-18.0)), (Property::Opacity, Length::num(0.0))],
            Easing::Power2In,
        )
        .from_to(
            CTA,
            Window::new(0.72, 1.0),
            [(Property::Y, Length::ZERO), (Property::Opacity, Length::num(1.0))],
            [(Property::Y, Length::vh(-12.0)), (Property::Opacity, Length::num(0.0))],
            Easing::Power2In,
        )
        .build()
        .unwrap()
}

fn settle(section: &mut Section<u64>, now_ms: &mut u64) {
    for _ in 0..2_000 {
        if !section.needs_tick() {
            return;
        }
        *now_ms += 16;
        section.tick(*now_ms);
    }
    panic!("smoothing did not settle");
}

#[test]
fn window_local_clamps_and_degenerate_windows_step() {
    let w = Window::new(0.2, 0.6);
    assert_eq!(w.local(0.0), 0.0);
    assert_eq!(w.local(0.2), 0.0);
    assert!(approx(w.local(0.4), 0.5));
    assert_eq!(w.local(0.6), 1.0);
    assert_eq!(w.local(1.0), 1.0);

    let point = Window::new(1.0, 1.0);
    assert!(point.is_degenerate());
    assert_eq!(point.local(0.99), 0.0);
    assert_eq!(point.local(1.0), 1.0);
}

#[test]
fn length_units_resolve_against_viewport() {
    assert_eq!(Length::vw(-40.0).resolve(VIEWPORT), -512.0);
    assert_eq!(Length::vh(10.0).resolve(VIEWPORT), 80.0);
    assert_eq!(Length::px(24.0).resolve(VIEWPORT), 24.0);
    assert_eq!(Length::num(0.96).resolve(VIEWPORT), 0.96);
}

#[test]
fn track_holds_boundary_values_outside_its_window() {
    let t = linear_track(1, Window::new(0.3, 0.7), 10.0, 50.0);
    for p in [0.0, 0.1, 0.3] {
        assert_eq!(t.sample(Property::X, p, VIEWPORT), Some(10.0));
    }
    for p in [0.7, 0.8, 1.0] {
        assert_eq!(t.sample(Property::X, p, VIEWPORT), Some(50.0));
    }
    let mid = t.sample(Property::X, 0.5, VIEWPORT).unwrap();
    assert!(approx(mid, 30.0));
    assert_eq!(t.sample(Property::Opacity, 0.5, VIEWPORT), None);
}

#[test]
fn interpolation_is_strictly_between_and_monotone() {
    let t = linear_track(1, Window::new(0.2, 0.8), 0.0, 100.0);
    let mut rng = Lcg::new(7);
    for _ in 0..500 {
        let a = rng.gen_unit();
        let b = rng.gen_unit();
        let (p1, p2) = if a <= b { (a, b) } else { (b, a) };
        let v1 = t.sample(Property::X, p1, VIEWPORT).unwrap();
        let v2 = t.sample(Property::X, p2, VIEWPORT).unwrap();
        assert!(v1 <= v2, "p1={p1} p2={p2} v1={v1} v2={v2}");

        if p1 > 0.201 && p1 < 0.799 {
            assert!(v1 > 0.0 && v1 < 100.0, "p={p1} v={v1}");
        }
    }
}

#[test]
fn multi_keyframe_tracks_use_the_bracketing_pair() {
    let t = Track::new(
        1u64,
        Window::FULL,
        alloc::vec![
            Keyframe::new(0.0, [(Property::Opacity, Length::num(0.0))]),
            Keyframe::new(0.25, [(Property::Opacity, Length::num(1.0))])
                .with_easing(Easing::Power2In),
            Keyframe::new(1.0, [(Property::Opacity, Length::num(0.5))]),
        ],
    );
    t.validate().unwrap();
    assert!(approx(t.sample(Property::Opacity, 0.125, VIEWPORT).unwrap(), 0.5));
    assert_eq!(t.sample(Property::Opacity, 0.25, VIEWPORT), Some(1.0));
    // power2.in at t = 0.5 is 0.125: 1.0 + (0.5 - 1.0) * 0.125
    let v = t.sample(Property::Opacity, 0.625, VIEWPORT).unwrap();
    assert!(approx(v, 0.9375));
}

#[test]
fn evaluate_is_pure() {
    let tl = collection_timeline();
    let a = tl.evaluate(0.42, VIEWPORT);
    let _ = tl.evaluate(0.95, VIEWPORT);
    let _ = tl.evaluate(0.05, VIEWPORT);
    let b = tl.evaluate(0.42, VIEWPORT);
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b.iter()) {
        assert_eq!(x.target, y.target);
        assert_eq!(x.property, y.property);
        assert_eq!(x.value.to_bits(), y.value.to_bits());
    }
}

#[test]
fn last_declared_track_wins_inside_overlap() {
    let a = linear_track(1, Window::new(0.0, 1.0), 0.0, 1.0);
    let b = linear_track(1, Window::new(0.5, 1.0), 1.0, 0.0);
    let tl = Timeline::from_tracks([a, b]).unwrap();
    assert_eq!(tl.channel_count(), 1);

    let writes = tl.evaluate(0.75, VIEWPORT);
    assert_eq!(writes.len(), 1);
    // B at local 0.5 is 0.5; A would be 0.75.
    assert!(approx(writes[0].value, 0.5));

    // Before B's window only A is active.
    let writes = tl.evaluate(0.25, VIEWPORT);
    assert!(approx(writes[0].value, 0.25));
}

#[test]
fn entrance_and_exit_on_one_property_do_not_shadow_each_other() {
    let tl = collection_timeline();
    let x = |p: f32| value_of(&tl.evaluate(p, VIEWPORT), HEADLINE, Property::X).unwrap();

    assert_eq!(x(0.0), -512.0);
    assert!(approx(x(0.15), -256.0));
    assert_eq!(x(0.3), 0.0);
    assert_eq!(x(0.5), 0.0);
    assert_eq!(x(0.7), 0.0);
    assert!(x(0.85) < 0.0 && x(0.85) > -128.0);
    assert_eq!(x(1.0), -128.0);

    let opacity = value_of(&tl.evaluate(0.5, VIEWPORT), HEADLINE, Property::Opacity);
    assert_eq!(opacity, Some(1.0));
}

#[test]
fn stagger_clips_windows_instead_of_rejecting() {
    let windows: Vec<Window> = stagger_windows(Window::new(0.7, 1.0), 10, 0.05).collect();
    assert_eq!(windows.len(), 10);
    assert_eq!(windows[0], Window::new(0.7, 1.0));
    assert!(approx(windows[2].start, 0.8));
    assert_eq!(windows[2].end, 1.0);
    // 0.7 + 9 * 0.05 = 1.15 and 1.0 + 0.45 = 1.45, both clipped to 1.0.
    assert_eq!(windows[9], Window::new(1.0, 1.0));
    assert!(windows[9].is_degenerate());

    let template = linear_track(5, Window::new(0.7, 1.0), 0.0, -80.0);
    let tracks = expand(&template, 10, 0.05);
    let last = &tracks[9];
    assert_eq!(last.window, Window::new(1.0, 1.0));
    assert_eq!(last.sample(Property::X, 0.99, VIEWPORT), Some(0.0));
    assert_eq!(last.sample(Property::X, 1.0, VIEWPORT), Some(-80.0));
}

#[test]
fn stagger_plan_expands_in_index_order_and_builds() {
    let template = Track::from_to(
        0u64,
        Window::new(0.0, 0.3),
        [(Property::X, Length::vw(60.0)), (Property::Scale, Length::num(0.96))],
        [(Property::X, Length::ZERO), (Property::Scale, Length::num(1.0))],
        Easing::Linear,
    );
    let cards = [10u64, 11, 12, 13, 14, 15];
    let plan = StaggerPlan::new(template, cards, 0.025);
    let tracks = plan.expand();
    assert_eq!(tracks.len(), 6);
    for (i, t) in tracks.iter().enumerate() {
        assert_eq!(t.target, cards[i]);
        assert!(approx(t.window.start, i as f32 * 0.025));
    }

    let tl = Timeline::builder().stagger(plan).build().unwrap();
    assert_eq!(tl.tracks().len(), 6);
    assert_eq!(tl.channel_count(), 12);

    // At 0.05 the first card has moved further than the last one.
    let w = tl.evaluate(0.05, VIEWPORT);
    let first = value_of(&w, 10, Property::X).unwrap();
    let last = value_of(&w, 15, Property::X).unwrap();
    assert!(first < last);
}

#[test]
fn malformed_tracks_fail_construction() {
    let one = Track::new(
        1u64,
        Window::FULL,
        alloc::vec![Keyframe::new(0.0, [(Property::X, Length::ZERO)])],
    );
    assert_eq!(
        Timeline::from_tracks([one]).unwrap_err(),
        ConfigError::TooFewKeyframes { count: 1 }
    );

    let backwards = Track::new(
        1u64,
        Window::FULL,
        alloc::vec![
            Keyframe::new(0.5, [(Property::X, Length::ZERO)]),
            Keyframe::new(0.5, [(Property::X, Length::px(1.0))]),
        ],
    );
    assert_eq!(
        Timeline::from_tracks([backwards]).unwrap_err(),
        ConfigError::NonIncreasingKeyframes { index: 1 }
    );

    let mismatch = Track::new(
        1u64,
        Window::FULL,
        alloc::vec![
            Keyframe::new(0.0, [(Property::X, Length::ZERO)]),
            Keyframe::new(1.0, [(Property::Y, Length::ZERO)]),
        ],
    );
    assert_eq!(
        Timeline::from_tracks([mismatch]).unwrap_err(),
        ConfigError::KeyframePropertyMismatch { index: 1 }
    );

    let duplicated = Track::new(
        1u64,
        Window::FULL,
        alloc::vec![
            Keyframe::new(0.0, [(Property::X, Length::ZERO), (Property::X, Length::px(4.0))]),
            Keyframe::new(1.0, [(Property::X, Length::ZERO), (Property::Y, Length::ZERO)]),
        ],
    );
    assert_eq!(
        Timeline::from_tracks([duplicated]).unwrap_err(),
        ConfigError::DuplicateProperty {
            index: 0,
            property: Property::X,
        }
    );

    let empty = linear_track(1, Window::new(0.5, 0.5), 0.0, 1.0);
    assert!(matches!(
        Timeline::from_tracks([empty]),
        Err(ConfigError::InvalidWindow { .. })
    ));

    let outside = linear_track(1, Window::new(0.5, 1.5), 0.0, 1.0);
    assert!(Timeline::from_tracks([outside]).is_err());

    let good = linear_track(1, Window::FULL, 0.0, 1.0);
    let plan = StaggerPlan::new(good, [1u64, 2], -0.1);
    assert_eq!(
        Timeline::builder().stagger(plan).build().unwrap_err(),
        ConfigError::InvalidStaggerOffset(-0.1)
    );
}

#[test]
fn section_options_are_validated() {
    let tl = || hero_timeline();
    assert_eq!(
        Section::new(SectionOptions::new(0).with_end_offset_multiplier(0.0), tl()).unwrap_err(),
        ConfigError::NonPositiveEndOffset(0.0)
    );
    assert!(Section::new(SectionOptions::new(0).with_end_offset_multiplier(f32::NAN), tl()).is_err());
    assert_eq!(
        Section::new(SectionOptions::new(0).with_scrub(1.5), tl()).unwrap_err(),
        ConfigError::ScrubOutOfRange(1.5)
    );
    let bad_phases = Phases {
        exit: Window::new(0.9, 0.8),
        ..Phases::default()
    };
    assert!(Section::new(SectionOptions::new(0).with_phases(bad_phases), tl()).is_err());
    assert!(Section::new(SectionOptions::new(0), tl()).is_ok());
}

#[test]
fn easing_curves_hit_endpoints_and_parse_gsap_names() {
    let all = [
        Easing::Linear,
        Easing::Power1In,
        Easing::Power1Out,
        Easing::Power1InOut,
        Easing::Power2In,
        Easing::Power2Out,
        Easing::Power2InOut,
        Easing::Power3In,
        Easing::Power3Out,
        Easing::Power3InOut,
        Easing::Power4In,
        Easing::Power4Out,
        Easing::Power4InOut,
        Easing::SmoothStep,
        Easing::EaseInOutCubic,
        Easing::BackIn,
        Easing::BackOut,
        Easing::BackInOut,
    ];
    for e in all {
        assert!(approx(e.sample(0.0), 0.0), "{e:?}");
        assert!(approx(e.sample(1.0), 1.0), "{e:?}");
        assert_eq!(e.name().parse::<Easing>(), Ok(e));
    }

    assert_eq!(Easing::Power2In.sample(0.5), 0.125);
    assert_eq!(Easing::Power2Out.sample(0.5), 0.875);
    assert_eq!("none".parse::<Easing>(), Ok(Easing::Linear));
    assert_eq!("power2".parse::<Easing>(), Ok(Easing::Power2Out));
    assert_eq!(
        "elastic.out".parse::<Easing>(),
        Err(ConfigError::UnknownEasing("elastic.out".into()))
    );
}

#[test]
fn progress_source_clamps_and_rederives_geometry_on_resize() {
    let opts = SectionOptions::new(1_000).with_end_offset_multiplier(1.3);
    let mut src = ProgressSource::new(&opts);

    assert_eq!(src.update(0, VIEWPORT), 0.0);
    assert_eq!(src.geometry(), Some(PinGeometry { start: 1_000, end: 2_040 }));
    assert!(approx(src.update(1_520, VIEWPORT), 0.5));
    assert_eq!(src.update(5_000, VIEWPORT), 1.0);
    // Idempotent for a given scroll position.
    assert_eq!(src.update(1_520, VIEWPORT), src.update(1_520, VIEWPORT));

    let tall = Viewport::new(1280, 1000);
    src.update(1_520, tall);
    assert_eq!(src.geometry(), Some(PinGeometry { start: 1_000, end: 2_300 }));
    assert!(approx(src.progress(), 0.4));
}

#[test]
fn start_anchor_moves_the_start_up_by_a_viewport_fraction() {
    let g = PinGeometry::derive(2_000, 800, 0.8, 1.0);
    assert_eq!(g.start, 1_360);
    assert_eq!(g.end, 2_160);
    assert_eq!(g.offset_at(0.5), 1_760);
}

#[test]
fn missing_element_keeps_last_progress() {
    let mounted = Arc::new(AtomicBool::new(true));
    let opts = SectionOptions::with_locator_provider({
        let mounted = Arc::clone(&mounted);
        move || mounted.load(Ordering::SeqCst).then_some(1_000)
    });
    let mut src = ProgressSource::new(&opts);
    let half = src.update(1_520, VIEWPORT);
    assert!(approx(half, 0.5));

    mounted.store(false, Ordering::SeqCst);
    src.invalidate();
    assert_eq!(src.update(3_000, VIEWPORT), half);
    assert_eq!(src.geometry(), None);

    mounted.store(true, Ordering::SeqCst);
    assert_eq!(src.update(3_000, VIEWPORT), 1.0);

    src.detach();
    assert_eq!(src.update(0, VIEWPORT), 1.0);
}

#[test]
fn pin_controller_classifies_and_resets_only_on_leave_back() {
    let g = PinGeometry { start: 100, end: 200 };
    let mut pin = PinController::new();
    assert_eq!(pin.state(), PinState::PrePin);
    assert_eq!(pin.update(50, g), None);

    let t = pin.update(100, g).unwrap();
    assert_eq!((t.from, t.to, t.reset), (PinState::PrePin, PinState::Pinned, false));
    assert_eq!(pin.pin_offset(150, g), 50);
    assert_eq!(pin.update(200, g), None);

    let t = pin.update(201, g).unwrap();
    assert_eq!(t.to, PinState::PostPin);
    assert_eq!(pin.pin_offset(400, g), 100);

    let t = pin.update(180, g).unwrap();
    assert_eq!((t.to, t.direction, t.reset), (PinState::Pinned, ScrollDirection::Backward, false));

    let t = pin.update(99, g).unwrap();
    assert_eq!(t.to, PinState::PrePin);
    assert!(t.reset);
    assert_eq!(pin.pin_offset(99, g), 0);

    // A jump from past the range straight above it also resets.
    pin.update(500, g);
    assert!(pin.update(0, g).unwrap().reset);
}

#[test]
fn leave_back_resets_to_entrance_snapshot_regardless_of_progress() {
    let tl = collection_timeline();
    let snapshot = tl.entrance_snapshot(VIEWPORT);
    assert_eq!(snapshot, tl.evaluate(0.0, VIEWPORT));

    // start = 800, end = 800 + 1040
    for scroll in [900u64, 1_300, 1_700, 1_840, 5_000] {
        let mut s = Section::new(SectionOptions::new(800), tl.clone()).unwrap();
        let mut now = 0u64;
        s.on_resize(VIEWPORT, now);
        s.on_scroll(scroll, now);
        now += 100;
        s.tick(now);

        now += 16;
        let update = s.on_scroll(300, now).unwrap();
        assert!(update.reset());
        assert_eq!(update.pin, PinState::PrePin);
        assert_eq!(update.displayed, 0.0);

        let frame = s.frame(|_| true);
        assert!(frame.reset);
        assert_eq!(frame.writes, snapshot);

        // The following frame renders the same values through the normal path.
        let frame = s.frame(|_| true);
        assert!(!frame.reset);
        assert_eq!(frame.writes, snapshot);
    }
}

#[test]
fn re_entry_before_render_supersedes_pending_reset() {
    let tl = collection_timeline();
    let mut s = Section::new(SectionOptions::new(800).with_scrub(0.0), tl.clone()).unwrap();
    s.on_resize(VIEWPORT, 0);
    s.on_scroll(1_500, 0);
    assert!(s.on_scroll(300, 16).unwrap().reset());

    // Back inside the range before the reset frame is drawn: 312 / 1040.
    let u = s.on_scroll(1_112, 32).unwrap();
    assert_eq!(u.pin, PinState::Pinned);
    assert!(approx(u.progress, 0.3));

    let frame = s.frame(|_| true);
    assert!(!frame.reset);
    assert_eq!(frame.writes, tl.evaluate(s.displayed_progress(), VIEWPORT));
    assert_ne!(frame.writes, tl.entrance_snapshot(VIEWPORT));

    // Moving around above the range keeps the reset frame.
    assert!(s.on_scroll(300, 48).unwrap().reset());
    s.on_scroll(200, 64);
    let frame = s.frame(|_| true);
    assert!(frame.reset);
    assert_eq!(frame.writes, tl.entrance_snapshot(VIEWPORT));
}

#[test]
fn scroll_to_seventy_percent_starts_the_exit_phase() {
    let top = 2_000u64;
    let opts = SectionOptions::new(top)
        .with_end_offset_multiplier(1.3)
        .with_scrub(0.6);
    let mut s = Section::new(opts, hero_timeline()).unwrap();
    let vp = Viewport::new(1280, 1000);
    let mut now = 0u64;
    s.on_resize(vp, now);

    let u = s.on_scroll(top, now).unwrap();
    assert_eq!(u.progress, 0.0);
    assert_eq!(u.pin, PinState::Pinned);

    now += 16;
    let u = s.on_scroll(top + 910, now).unwrap();
    assert!(approx(u.progress, 0.70), "progress={}", u.progress);
    // Smoothing lags behind the true progress.
    assert!(u.displayed < 0.70);
    settle(&mut s, &mut now);
    assert!(approx(s.displayed_progress(), 0.70));

    let held = s.frame(|_| true).writes;
    assert_eq!(value_of(&held, OVERLAY, Property::Opacity), Some(1.0));
    assert_eq!(value_of(&held, HEADLINE, Property::Y), Some(0.0));
    assert_eq!(value_of(&held, CTA, Property::Opacity), Some(1.0));

    now += 16;
    s.on_scroll(top + 1_040, now);
    settle(&mut s, &mut now);
    let moving = s.frame(|_| true).writes;
    let opacity = value_of(&moving, OVERLAY, Property::Opacity).unwrap();
    let y = value_of(&moving, HEADLINE, Property::Y).unwrap();
    assert!(opacity < 1.0 && opacity > 0.0);
    assert!(y < 0.0 && y > -180.0);
}

#[test]
fn scrub_zero_and_reduced_motion_follow_progress_exactly() {
    let mut instant = Section::new(SectionOptions::new(0).with_scrub(0.0), hero_timeline()).unwrap();
    instant.on_resize(VIEWPORT, 0);
    let u = instant.on_scroll(520, 1).unwrap();
    assert_eq!(u.displayed, u.progress);
    assert!(!instant.needs_tick());

    let reduced = SectionOptions::new(0).with_scrub(1.0).with_reduced_motion(true);
    let mut s = Section::new(reduced, hero_timeline()).unwrap();
    s.on_resize(VIEWPORT, 0);
    let u = s.on_scroll(520, 1).unwrap();
    assert_eq!(u.displayed, u.progress);
}

#[test]
fn scrub_approaches_target_monotonically() {
    let mut scrub = Scrub::new(0.6);
    scrub.set_target(1.0, 0);
    let mut last = scrub.displayed();
    let mut now = 0;
    while !scrub.is_settled() {
        now += 16;
        let d = scrub.advance(now);
        assert!(d >= last && d <= 1.0);
        last = d;
        assert!(now < 60_000);
    }
    assert_eq!(scrub.displayed(), 1.0);
}

#[test]
fn idle_time_does_not_count_as_catch_up() {
    let mut scrub = Scrub::new(1.0);
    scrub.set_target(0.0, 0);
    assert!(scrub.is_settled());
    // First step of a gesture after 5 s without input.
    assert_eq!(scrub.set_target(0.5, 5_000), 0.0);
    let d = scrub.advance(5_016);
    assert!(approx(d, 0.5 * 16.0 / 1_016.0), "displayed={d}");

    let mut s = Section::new(SectionOptions::new(0).with_scrub(1.0), hero_timeline()).unwrap();
    s.on_resize(VIEWPORT, 0);
    s.on_scroll(0, 0);
    let u = s.on_scroll(520, 5_000).unwrap();
    assert!(approx(u.progress, 0.5));
    assert_eq!(u.displayed, 0.0);
    assert!(s.needs_tick());
    let d = s.tick(5_016).unwrap();
    assert!(d > 0.0 && d < 0.01, "displayed={d}");
}

#[test]
fn missing_targets_are_skipped() {
    let tl = hero_timeline();
    let mut out = Vec::new();
    tl.evaluate_into(0.8, VIEWPORT, |t| *t != HEADLINE, &mut out);
    assert!(out.iter().all(|w| w.target != HEADLINE));
    assert!(out.iter().any(|w| w.target == OVERLAY));
    assert_eq!(out.len(), tl.channel_count() - 2);
}

#[test]
fn disposed_section_never_writes_again() {
    let mut s = Section::new(SectionOptions::new(0), hero_timeline()).unwrap();
    s.on_resize(VIEWPORT, 0);
    s.on_scroll(900, 0);
    let before = s.progress();

    s.dispose();
    s.dispose();
    assert!(s.is_disposed());
    assert!(!s.needs_tick());
    assert_eq!(s.on_scroll(0, 16), None);
    assert_eq!(s.on_resize(Viewport::new(10, 10), 16), None);
    assert_eq!(s.tick(32), None);
    assert_eq!(s.progress(), before);

    let mut out = alloc::vec![PropertyWrite {
        target: OVERLAY,
        property: Property::Opacity,
        value: 1.0,
    }];
    assert!(!s.render_into(|_| true, &mut out));
    assert!(out.is_empty());
}

#[test]
fn pin_offset_follows_scroll_while_pinned() {
    let mut s = Section::new(SectionOptions::new(800).with_scrub(0.0), hero_timeline()).unwrap();
    s.on_resize(VIEWPORT, 0);
    s.on_scroll(400, 0);
    assert_eq!(s.pin_offset(), 0);
    s.on_scroll(1_000, 0);
    assert_eq!(s.pin_offset(), 200);
    s.on_scroll(9_000, 0);
    assert_eq!(s.pin_state(), PinState::PostPin);
    assert_eq!(s.pin_offset(), 1_040);

    let mut unpinned =
        Section::new(SectionOptions::new(800).with_pin(false), hero_timeline()).unwrap();
    unpinned.on_resize(VIEWPORT, 0);
    unpinned.on_scroll(1_000, 0);
    assert_eq!(unpinned.pin_offset(), 0);
}
