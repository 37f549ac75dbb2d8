// Preview window for still surfaces.
// Shows the buffer until the window is closed or ESC is pressed.

use crate::color::pack_rgb;
use crate::error::{Error, Result};
use image::RgbaImage;
use minifb::{Key, Window, WindowOptions};

pub struct Preview {
    window: Window, // the on-screen window you see
}

impl Preview {
    /// Open a window exactly the size of the image.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::Window(e.to_string()))?;
        window.set_target_fps(30);
        Ok(Self { window })
    }

    /// Push the image to the window.
    pub fn present(&mut self, pixels: &[u32], width: usize, height: usize) -> Result<()> {
        self.window
            .update_with_buffer(pixels, width, height)
            .map_err(|e| Error::Window(e.to_string()))?;
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Block, redrawing `image` until the user closes the window.
    pub fn show(title: &str, image: &RgbaImage) -> Result<()> {
        let (w, h) = (image.width() as usize, image.height() as usize);
        // minifb wants 0x00RRGGBB; alpha is dropped
        let pixels: Vec<u32> = image.pixels().map(|p| pack_rgb(*p)).collect();

        let mut preview = Preview::new(title, w, h)?;
        while preview.is_open() && !preview.esc_pressed() {
            preview.present(&pixels, w, h)?;
        }
        Ok(())
    }
}
