//! End-to-end tests: display bring-up, scanout and the simulated engine.

use std::thread;
use std::time::{Duration, Instant};

use twinscan::{Display, Scanout, SimulatedEngine};
use twinscan_core::{FixedHeap, ManualClock, SystemClock, UnlimitedHeap};
use twinscan_scanline::{decode_raw_run, ScanlineId, ScanlineRecord, ScanlineStatus};
use twinscan_shared::{DisplayConfig, DisplayError, PixelFormat, Rgb565};

fn run_frames(scanout: &mut Scanout, engine: &mut SimulatedEngine, frames: usize) {
    for _ in 0..frames * usize::from(engine.total_lines()) {
        scanout.step(engine);
    }
}

#[test]
fn test_splash_appears_from_the_second_frame() {
    let config = DisplayConfig::vga_320x240();
    let display = Display::init(config.clone(), &UnlimitedHeap, ManualClock::new(0)).unwrap();
    let (_draw, mut scanout) = display.split();
    let (mut engine, frames) = SimulatedEngine::new(&config, 5);

    run_frames(&mut scanout, &mut engine, 2);

    // The swap happens on the last visible row of frame 0.
    let first = frames.recv().unwrap();
    assert_eq!(first.get(0, 0), Some(Rgb565::BLACK));
    assert_eq!(first.get(0, 239), Some(Rgb565::BLACK));
    assert_eq!(first.malformed_lines, 0);

    let second = frames.recv().unwrap();
    assert_eq!(second.frame, 1);
    assert_eq!(second.get(0, 0), Some(Rgb565::YELLOW));
    assert_eq!(second.get(10, 50), Some(Rgb565::BLUE));
    assert_eq!(second.get(140, 60), Some(Rgb565::WHITE));
    assert_eq!(second.get(300, 200), Some(Rgb565::BLACK));

    let stats = scanout.stats();
    assert_eq!(stats.swaps, 1);
    assert_eq!(stats.visible, 480);
    assert_eq!(stats.blank, 10);
    assert_eq!(stats.failures, 0);
}

#[test]
fn test_visible_records_have_exact_framing() {
    let config = DisplayConfig::new(7, 3);
    let display = Display::init(config, &UnlimitedHeap, ManualClock::new(0)).unwrap();
    let (_draw, mut scanout) = display.split();

    let mut record = ScanlineRecord::for_width(7);
    record.reset(ScanlineId::new(3, 1));
    scanout.serve(&mut record);

    assert_eq!(record.status(), ScanlineStatus::Ok);
    assert_eq!(record.used_halfwords(), 12);
    assert_eq!(record.data_used(), 6);
    let run = decode_raw_run(record.halfwords()).unwrap();
    assert_eq!(run.pixels.len(), 7);
    assert_ne!(run.sentinel, Rgb565::BLACK);

    record.reset(ScanlineId::new(3, 3));
    scanout.serve(&mut record);
    assert_eq!(record.status(), ScanlineStatus::Ok);
    assert_eq!(record.used_halfwords(), 0);
    assert_eq!(record.data_used(), 0);
}

#[test]
fn test_init_failures_leave_nothing_behind() {
    let zero = Display::init(DisplayConfig::new(320, 0), &UnlimitedHeap, ManualClock::new(0));
    assert!(matches!(zero, Err(DisplayError::ZeroArea { width: 320, height: 0 })));

    let wide = Display::init(DisplayConfig::new(70_000, 1), &UnlimitedHeap, ManualClock::new(0));
    assert!(matches!(wide, Err(DisplayError::WidthTooLarge { width: 70_000 })));

    let tall =
        Display::init(DisplayConfig::new(1, 70_000), &UnlimitedHeap, ManualClock::new(0));
    assert!(matches!(tall, Err(DisplayError::HeightTooLarge { height: 70_000 })));

    let unshifted = DisplayConfig::new(4, 2).with_pixel_format(PixelFormat {
        r_shift: 0,
        g_shift: 6,
        b_shift: 16,
    });
    let unshifted = Display::init(unshifted, &UnlimitedHeap, ManualClock::new(0));
    assert!(matches!(unshifted, Err(DisplayError::InvalidPixelFormat { b_shift: 16, .. })));

    let heap = FixedHeap::new(256 * 1024, 100 * 1024);
    let tight = Display::init(DisplayConfig::vga_320x240(), &heap, ManualClock::new(0));
    assert!(matches!(
        tight,
        Err(DisplayError::InsufficientMemory { required: 307_200, available: 159_744 })
    ));
}

#[test]
fn test_threaded_scanout_shows_drawn_frame() {
    let config = DisplayConfig::new(32, 16);
    let display = Display::init(config.clone(), &UnlimitedHeap, SystemClock::new()).unwrap();
    let (mut draw, scanout) = display.split();
    let (engine, frames) = SimulatedEngine::new(&config, 4);
    let engine = engine.with_line_period(Duration::from_micros(50));
    let _scanout_thread = scanout.spawn(engine).unwrap();

    let deadline = Instant::now() + Duration::from_secs(10);
    while !draw.begin_draw_unpaced() {
        assert!(Instant::now() < deadline, "splash never picked up");
        thread::yield_now();
    }
    draw.draw_rectangle(0, 0, 32, 16, Rgb565::CYAN);
    draw.draw_line(0, 0, 31, 15, Rgb565::RED);
    draw.end_draw();

    loop {
        let frame = frames
            .recv_timeout(deadline.saturating_duration_since(Instant::now()))
            .expect("drawn frame never scanned out");
        if frame.get(5, 10) == Some(Rgb565::CYAN) && frame.get(16, 0) == Some(Rgb565::CYAN) {
            assert_eq!(frame.get(0, 0), Some(Rgb565::RED));
            assert_eq!(frame.get(31, 15), Some(Rgb565::RED));
            assert_eq!(frame.malformed_lines, 0);
            break;
        }
    }
}
