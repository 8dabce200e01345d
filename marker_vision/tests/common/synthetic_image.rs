/// Fully opaque white, never dark and never a marker.
pub const WHITE: [u8; 4] = [255, 255, 255, 255];

/// Builds a `width` x `height` RGBA frame filled with `background`.
pub fn solid_rgba(width: u32, height: u32, background: [u8; 4]) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    background.repeat((width * height) as usize)
}

/// Overwrites the pixel at (x, y).
pub fn put_pixel(frame: &mut [u8], width: u32, x: u32, y: u32, rgba: [u8; 4]) {
    let i = ((y * width + x) * 4) as usize;
    frame[i..i + 4].copy_from_slice(&rgba);
}

/// Fills the axis-aligned rectangle starting at (x0, y0).
pub fn fill_rect(frame: &mut [u8], width: u32, x0: u32, y0: u32, w: u32, h: u32, rgba: [u8; 4]) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            put_pixel(frame, width, x, y, rgba);
        }
    }
}

/// Paints the first `count` pixels in row-major order.
pub fn paint_first(frame: &mut [u8], width: u32, count: u32, rgba: [u8; 4]) {
    for i in 0..count {
        put_pixel(frame, width, i % width, i / width, rgba);
    }
}

/// Reads the RGB channels of the pixel at (x, y).
pub fn rgb_at(frame: &[u8], width: u32, x: u32, y: u32) -> [u8; 3] {
    let i = ((y * width + x) * 4) as usize;
    [frame[i], frame[i + 1], frame[i + 2]]
}
