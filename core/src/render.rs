use std::f64::consts::PI;

use image::{Rgb, RgbImage};

use crate::colors::ColorTable;
use crate::grid::Grid;

// Flat RGB byte buffer, row-major, 3 bytes per cell.
// Suits egui's `ColorImage::from_rgb` and `image::save_buffer`.
pub fn to_rgb_bytes(grid: &Grid, table: &dyn ColorTable) -> Vec<u8> {
    let mut buf = Vec::with_capacity(grid.len() * 3);
    for &v in grid.points() {
        buf.extend_from_slice(&table.color(v));
    }
    buf
}

// Equirectangular image, one pixel per cell
pub fn render(grid: &Grid, table: &dyn ColorTable) -> RgbImage {
    let mut img = RgbImage::new(grid.width() as u32, grid.height() as u32);
    for (y, row) in grid.rows().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            img.put_pixel(x as u32, y as u32, Rgb(table.color(v)));
        }
    }
    img
}

// Orthographic view of the map wrapped onto a globe, `scroll_degrees` turning
// it eastwards. Pixels off the disk stay black.
pub fn render_sphere(
    grid: &Grid,
    table: &dyn ColorTable,
    diameter: u32,
    scroll_degrees: i32,
) -> RgbImage {
    let diameter = diameter.max(1);
    let mut img = RgbImage::new(diameter, diameter);
    let radius = diameter as i64 / 2;
    let r_squared = radius * radius;
    let (height, width) = (grid.height() as i64, grid.width() as i64);
    let scroll = -(((scroll_degrees % 360) as f64) * (width as f64 / 360.0)) as i64;

    for y in 0..diameter as i64 {
        for x in 0..diameter as i64 {
            let (nx, ny) = (x - radius, y - radius);
            let dist = nx * nx + ny * ny;
            if dist > r_squared || radius == 0 {
                continue;
            }
            let depth = ((r_squared - dist) as f64).sqrt();
            let lon = if depth > 0.0 {
                (nx as f64 / depth).atan()
            } else {
                nx.signum() as f64 * PI / 2.0
            };
            // the visible hemisphere spans half the map's columns
            let col = ((lon / PI + 0.5) * (width as f64 / 2.0)) as i64 + scroll;
            let theta = (ny as f64 / radius as f64).clamp(-1.0, 1.0).acos();
            let row = height - 1 - (theta * height as f64 / PI) as i64;

            let v = grid.get(
                row.clamp(0, height - 1) as usize,
                col.rem_euclid(width) as usize,
            );
            img.put_pixel(x as u32, y as u32, Rgb(table.color(v)));
        }
    }
    img
}
