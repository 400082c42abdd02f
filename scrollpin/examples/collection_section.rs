// Example: a pinned collection section with a staggered card grid, driven by simulated scroll.
use scrollpin::{
    Easing, Length, Phase, Property, Section, SectionOptions, StaggerPlan, Timeline, Track,
    Viewport,
};

const HEADLINE: u64 = 1;
const CARDS: [u64; 6] = [10, 11, 12, 13, 14, 15];

fn main() {
    let builder = Timeline::builder();
    let phases = builder.phases();

    let card_in = Track::from_to(
        0,
        phases.window(Phase::Entrance),
        [(Property::X, Length::vw(60.0)), (Property::Opacity, Length::num(0.0))],
        [(Property::X, Length::ZERO), (Property::Opacity, Length::num(1.0))],
        Easing::Power2Out,
    );
    let card_out = Track::from_to(
        0,
        phases.window(Phase::Exit),
        [(Property::X, Length::ZERO), (Property::Opacity, Length::num(1.0))],
        [(Property::X, Length::vw(-30.0)), (Property::Opacity, Length::num(0.0))],
        Easing::Power2In,
    );

    let timeline = builder
        .entrance(
            HEADLINE,
            [(Property::X, Length::vw(-40.0)), (Property::Opacity, Length::num(0.0))],
            [(Property::X, Length::ZERO), (Property::Opacity, Length::num(1.0))],
            Easing::Power2Out,
        )
        .stagger(StaggerPlan::new(card_in, CARDS, 0.025))
        .exit(
            HEADLINE,
            [(Property::X, Length::ZERO), (Property::Opacity, Length::num(1.0))],
            [(Property::X, Length::vw(-10.0)), (Property::Opacity, Length::num(0.0))],
            Easing::Power2In,
        )
        .stagger(StaggerPlan::new(card_out, CARDS, 0.015))
        .build()
        .expect("valid timeline");

    let options = SectionOptions::new(2_000).with_end_offset_multiplier(1.4);
    let mut section = Section::new(options, timeline).expect("valid options");

    let mut now_ms = 0u64;
    section.on_resize(Viewport::new(1280, 800), now_ms);

    // Scroll down through the pinned range, then jump back above it.
    let mut scrolls: Vec<u64> = (0..=40).map(|i| 1_800 + i * 40).collect();
    scrolls.push(500);

    for scroll in scrolls {
        now_ms += 16;
        let Some(update) = section.on_scroll(scroll, now_ms) else {
            break;
        };
        let frame = section.frame(|_| true);
        let headline_x = frame
            .writes
            .iter()
            .find(|w| w.target == HEADLINE && w.property == Property::X)
            .map(|w| w.value);
        println!(
            "scroll={scroll} progress={:.3} displayed={:.3} pin={:?} offset={} reset={} headline_x={headline_x:?}",
            update.progress, frame.progress, frame.pin, frame.pin_offset, frame.reset
        );
    }

    section.dispose();
}
