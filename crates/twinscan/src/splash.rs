//! Startup splash, so the first frame on screen is never blank.

use twinscan_core::Canvas;
use twinscan_shared::Rgb565;

/// Side length of the colour swatches.
const SWATCH: i32 = 32;

/// Top edge of the swatch row.
const SWATCH_Y: i32 = 40;

const SWATCH_COLORS: [Rgb565; 5] = [
    Rgb565::BLUE,
    Rgb565::GREEN,
    Rgb565::RED,
    Rgb565::MAGENTA,
    Rgb565::WHITE,
];

/// Paints the splash: black background, a yellow triangle outline in the top
/// left corner and a row of five colour swatches below it.
pub fn paint_splash(canvas: &mut Canvas<'_>) {
    let width = i32::try_from(canvas.width()).unwrap_or(i32::MAX);
    let height = i32::try_from(canvas.height()).unwrap_or(i32::MAX);
    canvas.draw_rectangle(0, 0, width, height, Rgb565::BLACK);

    canvas.draw_line(0, 0, 32, 0, Rgb565::YELLOW);
    canvas.draw_line(32, 0, 16, 32, Rgb565::YELLOW);
    canvas.draw_line(16, 32, 0, 0, Rgb565::YELLOW);

    for (i, color) in (0..).zip(SWATCH_COLORS) {
        canvas.draw_rectangle(i * SWATCH, SWATCH_Y, SWATCH, SWATCH, color);
    }
}
