/// Basic example: Convert a generated test image to text
///
/// This draws a gradient with a dark circle and prints it in both scoring modes
use asciize::{AsciizeConfig, FontFace, Rasterizer, ScoreMode, convert};
use image::{GrayImage, Luma};

fn main() -> asciize::Result<()> {
    println!("Asciize - Basic Example");
    println!("=======================\n");

    let face = FontFace::embedded(8.0)?;
    let width = 320;
    let height = face.line_height() * 12;

    // Horizontal gradient from black to white
    let mut img = GrayImage::from_fn(width, height, |x, _| Luma([(x * 255 / (width - 1)) as u8]));

    // Dark circle in the center
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let radius = height as f32 / 3.0;
    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            if (dx * dx + dy * dy).sqrt() < radius {
                img.put_pixel(x, y, Luma([30]));
            }
        }
    }

    println!("Created test image: {}x{}", width, height);
    println!("Line height: {}px\n", face.line_height());

    for score in [ScoreMode::Shape, ScoreMode::Shade] {
        let config = AsciizeConfig {
            size: 8.0,
            score,
            trim: true,
            ..Default::default()
        };

        println!("--- {} ---", score);
        for line in convert(&img, &face, &config, None)? {
            println!("{line}");
        }
        println!();
    }

    Ok(())
}
