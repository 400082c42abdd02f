use scrollpin::{Easing, Length, Property, SectionOptions, Timeline, Viewport, Window};
use scrollpin_adapter::{Page, PageOptions, RevealOptions};

fn fade_out(target: u64) -> Timeline<u64> {
    Timeline::builder()
        .from_to(
            target,
            Window::new(0.7, 1.0),
            [(Property::Opacity, Length::num(1.0))],
            [(Property::Opacity, Length::num(0.0))],
            Easing::Power2In,
        )
        .build()
        .expect("valid timeline")
}

fn rise_in(target: u64) -> Timeline<u64> {
    Timeline::builder()
        .from_to(
            target,
            Window::FULL,
            [(Property::Y, Length::px(50.0)), (Property::Opacity, Length::num(0.0))],
            [(Property::Y, Length::ZERO), (Property::Opacity, Length::num(1.0))],
            Easing::Power2Out,
        )
        .build()
        .expect("valid timeline")
}

fn main() {
    // Example: a page of pinned sections plus a footer reveal, navigated by a smooth scroll.
    //
    // A host would:
    // - forward scroll/resize events to the page
    // - call tick(now_ms) every animation frame while needs_tick() is true
    // - write the offset returned by tick() to the real scroll container
    // - apply each section's writes and pin offset from render()
    let mut page = Page::new(PageOptions::default());
    page.on_resize(Viewport::new(1440, 900), 0);

    let hero = page
        .construct(SectionOptions::new(0), fade_out(1))
        .expect("valid section");
    let lookbook = page
        .construct(SectionOptions::new(2_100), fade_out(2))
        .expect("valid section");
    let footer = page
        .construct_reveal(
            RevealOptions::new(5_200).with_start_anchor(0.85).with_delay_ms(120),
            rise_in(3),
        )
        .expect("valid reveal");

    let target = page.scroll_to_section(2, 0);
    println!("navigating to footer: {target:?}");

    let mut now_ms = 0u64;
    while page.needs_tick() {
        now_ms += 16;
        let written = page.tick(now_ms);
        if now_ms % 160 == 0 {
            println!(
                "t={now_ms} scroll={written:?} hero={:?} lookbook={:?} footer={:?}",
                page.current_progress(hero),
                page.current_progress(lookbook),
                page.current_progress(footer),
            );
            page.render(
                |_| true,
                |r| {
                    println!(
                        "  {:?} pin={:?} offset={} writes={}",
                        r.handle,
                        r.pin,
                        r.pin_offset,
                        r.writes.len()
                    )
                },
            );
        }
    }

    page.clear();
}
