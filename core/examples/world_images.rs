// Generates one map and saves it four ways:
// histogram colours, band map with ice caps, greyscale, globe

use std::path::Path;

use worldgen_core::{
    BandTable, Cartography, GenerationConfig, Greyscale, generate, olson,
    render::{render, render_sphere},
};

fn save(img: &image::RgbImage, filename: &str) -> Result<(), image::ImageError> {
    img.save(Path::new(filename))?;
    println!("Saved {}", filename);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = GenerationConfig {
        height: 300,
        width: 600,
        iterations: 3_000,
        ..GenerationConfig::default()
    };
    let grid = generate(&config)?;
    let seed = format!("{:x}", config.seed);

    // 1) Histogram-fitted colours
    let survey = Cartography::survey(&grid, config.percent_water, config.percent_ice);
    let table = survey.table();
    save(&render(&grid, &table), &format!("{seed}-histogram.png"))?;

    // 2) Band map with polar ice
    let mut bands = grid.clone();
    let report = olson(&mut bands, config.percent_water, config.percent_ice);
    println!("ice caps: {} north, {} south", report.north, report.south);
    save(&render(&bands, &BandTable::direct()), &format!("{seed}-olson.png"))?;

    // 3) Raw heights
    save(&render(&grid, &Greyscale), &format!("{seed}-grey.png"))?;

    // 4) Globe
    save(&render_sphere(&grid, &table, 400, 0), &format!("{seed}-globe.png"))?;
    Ok(())
}
