//! Integration test for the producer/consumer frame handoff.
//!
//! The producer fills every frame with a single colour. If the handoff ever
//! let both sides touch the same slot, scanout would observe a mixed frame.

use std::thread;

use twinscan_core::{DoubleFramebuffer, FramePacer, ManualClock};
use twinscan_shared::Rgb565;

const FRAMES: u16 = 200;

#[test]
fn test_every_published_frame_is_seen_whole_and_in_order() {
    let pacer = FramePacer::new(ManualClock::new(0), None);
    let (mut draw, mut scanout) = DoubleFramebuffer::allocate(64, 32).unwrap().split(pacer);

    let producer = thread::spawn(move || {
        for n in 1..=FRAMES {
            while !draw.begin_draw_unpaced() {
                thread::yield_now();
            }
            draw.draw_rectangle(0, 0, 64, 32, Rgb565(n));
            draw.end_draw();
        }
        draw.frames_published()
    });

    let mut seen = Vec::with_capacity(usize::from(FRAMES));
    while seen.len() < usize::from(FRAMES) {
        if !scanout.swap_at_row(31) {
            thread::yield_now();
            continue;
        }
        let pixels = scanout.front().pixels();
        let first = pixels[0];
        assert!(pixels.iter().all(|p| *p == first), "torn frame {first:?}");
        seen.push(first.raw());
    }

    assert_eq!(producer.join().unwrap(), u64::from(FRAMES));
    let expected: Vec<u16> = (1..=FRAMES).collect();
    assert_eq!(seen, expected);
    assert_eq!(scanout.swap_count(), u64::from(FRAMES));
}

#[test]
fn test_swap_only_on_last_row() {
    let pacer = FramePacer::new(ManualClock::new(0), None);
    let (mut draw, mut scanout) = DoubleFramebuffer::allocate(8, 4).unwrap().split(pacer);

    assert!(draw.begin_draw_unpaced());
    draw.end_draw();

    for row in [0, 1, 2, 4, 100] {
        assert!(!scanout.swap_at_row(row));
    }
    assert!(scanout.is_back_ready());
    assert!(scanout.swap_at_row(3));
    assert_eq!(scanout.front_index(), 1);
}

#[test]
fn test_producer_blocked_until_scanout_swaps() {
    let clock = ManualClock::new(0);
    let pacer = FramePacer::new(clock.clone(), None);
    let (mut draw, mut scanout) = DoubleFramebuffer::allocate(8, 4).unwrap().split(pacer);

    clock.advance(16_666);
    assert!(draw.begin_draw());
    draw.draw_line(0, 0, 7, 3, Rgb565::GREEN);
    draw.end_draw();

    // Next period elapses, but the published frame has not been picked up.
    clock.advance(16_666);
    assert!(!draw.begin_draw());
    assert!(!draw.is_drawing());

    assert!(scanout.swap_at_row(3));
    assert_eq!(scanout.front().get(0, 0), Some(Rgb565::GREEN));
    assert_eq!(scanout.front().get(7, 3), Some(Rgb565::GREEN));

    // The refused attempt above consumed that period.
    assert!(!draw.begin_draw());
    clock.advance(16_666);
    assert!(draw.begin_draw());
}
