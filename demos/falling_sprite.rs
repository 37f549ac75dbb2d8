// A player block walks right, jumps, and falls back onto the ground.
// Writes game.gif (the animation) and last.png (the final frame) to the current directory.

use image::{Rgba, RgbaImage};
use pixel_stage::color;
use pixel_stage::{
    Drawable, ExportOptions, GravityConfig, Rectangle, Result, SaveOptions, Sprite, Surface,
};

fn main() -> Result<()> {
    let surface = Surface::new(800, 800, color::parse("#99CDDE")?, true)?;

    let mut ground = Rectangle::new(0.0, 700.0, 800.0, 100.0)
        .fill(color::parse("green")?)
        .rigidbody(true);
    ground.draw(&surface)?;

    // A plain red body stands in for a loaded bitmap (Sprite::open takes a path).
    let body = RgbaImage::from_pixel(17, 50, Rgba([220, 40, 40, 255]));
    let mut player = Sprite::new(100, 100, body).resized(Some(68), Some(200))?;
    player.draw(&surface)?;

    let landing = player.apply_gravity(&GravityConfig::default())?;
    println!("landed after {} steps at {:?}", landing.steps, player.coords());

    player.move_by(40.0, 0.0, true)?;
    player.move_by(0.0, -120.0, true)?;
    player.apply_gravity(&GravityConfig::default())?;

    let options = SaveOptions {
        export: ExportOptions { optimize: false, looping: true, frame_duration_ms: 20 },
        ..Default::default()
    };
    surface.save("game.gif", &options)?;
    surface.save("last.png", &SaveOptions { still_only: true, ..Default::default() })?;
    println!("wrote {} frames to game.gif", surface.history_len());
    Ok(())
}
