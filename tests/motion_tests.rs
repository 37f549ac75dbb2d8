//! Motion tests - draw binding, erase/redraw, stepped frames

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use pixel_stage::color::rgb;
use pixel_stage::{Aabb, Drawable, Entity, Error, ObstacleKind, Rectangle, Sprite, Surface};

fn white() -> image::Rgba<u8> {
    rgb(255, 255, 255)
}

fn block_sprite(x: i32, y: i32) -> Sprite {
    Sprite::new(x, y, RgbaImage::from_pixel(10, 10, Rgba([0, 0, 255, 255])))
}

#[test]
fn test_move_before_draw_fails() {
    let mut rect = Rectangle::new(0.0, 0.0, 10.0, 10.0);
    assert!(matches!(rect.move_by(1.0, 1.0, false), Err(Error::InvalidState(_))));
    assert_eq!(rect.coords(), Aabb::new(0.0, 0.0, 10.0, 10.0));
}

#[test]
fn test_draw_twice_fails() {
    let surface = Surface::new(50, 50, white(), true).unwrap();
    let mut rect = Rectangle::new(0.0, 0.0, 10.0, 10.0);
    rect.draw(&surface).unwrap();
    let frames = surface.history_len();
    assert!(matches!(rect.draw(&surface), Err(Error::InvalidState(_))));
    assert_eq!(surface.history_len(), frames);
}

#[test]
fn test_coords_and_center() {
    let rect = Rectangle::new(10.0, 20.0, 5.0, 7.0);
    assert_eq!(rect.coords(), Aabb::new(10.0, 20.0, 15.0, 27.0));
    assert_eq!(rect.center(), (12.5, 23.5));
}

#[test]
fn test_negative_size_is_normalized() {
    let rect = Rectangle::new(10.0, 10.0, -4.0, -2.0);
    assert_eq!(rect.coords(), Aabb::new(6.0, 8.0, 10.0, 10.0));
}

#[test]
fn test_non_stepped_move_records_one_frame() {
    let surface = Surface::new(200, 200, white(), true).unwrap();
    let mut rect = Rectangle::new(10.0, 10.0, 20.0, 20.0).fill(rgb(255, 0, 0));
    rect.draw(&surface).unwrap();

    let before = surface.history_len();
    rect.move_by(75.0, 40.0, false).unwrap();
    assert_eq!(surface.history_len(), before + 1);
    assert_eq!(rect.coords(), Aabb::new(85.0, 50.0, 105.0, 70.0));
}

#[test]
fn test_stepped_move_records_frame_per_unit() {
    let surface = Surface::new(200, 200, white(), true).unwrap();
    let mut rect = Rectangle::new(10.0, 10.0, 20.0, 20.0).fill(rgb(255, 0, 0));
    rect.draw(&surface).unwrap();

    let before = surface.history_len();
    rect.move_by(5.0, 0.0, true).unwrap();
    assert_eq!(surface.history_len(), before + 5);

    let before = surface.history_len();
    rect.move_by(15.0, 0.0, true).unwrap();
    assert_eq!(surface.history_len(), before + 15);
    assert_eq!(rect.coords().left, 30.0);
}

#[test]
fn test_stepped_move_goes_x_then_y() {
    let surface = Surface::new(100, 100, white(), true).unwrap();
    let mut rect = Rectangle::new(10.0, 10.0, 5.0, 5.0)
        .fill(rgb(0, 0, 0))
        .border_thickness(0);
    rect.draw(&surface).unwrap();
    let start = surface.history_len();

    rect.move_by(-3.0, 2.0, true).unwrap();
    assert_eq!(surface.history_len(), start + 5);

    // after the three x steps the rectangle sits at x=7, y still 10
    let third = surface.frame(start + 2).unwrap();
    assert_eq!(*third.get_pixel(7, 10), rgb(0, 0, 0));
    assert_eq!(*third.get_pixel(7, 16), white());
    // the final frame is the final position
    assert_eq!(rect.coords(), Aabb::new(7.0, 12.0, 12.0, 17.0));
}

#[test]
fn test_stepped_move_needs_animation() {
    let surface = Surface::new(100, 100, white(), false).unwrap();
    let mut rect = Rectangle::new(10.0, 10.0, 5.0, 5.0).fill(rgb(0, 0, 0));
    rect.draw(&surface).unwrap();
    let before = surface.snapshot();

    assert!(matches!(rect.move_by(3.0, 0.0, true), Err(Error::InvalidState(_))));
    assert_eq!(rect.coords(), Aabb::new(10.0, 10.0, 15.0, 15.0));
    assert_eq!(surface.snapshot(), before);
}

#[test]
fn test_move_round_trip() {
    let surface = Surface::new(200, 200, white(), true).unwrap();
    let mut rect = Rectangle::new(40.0, 40.0, 20.0, 10.0).fill(rgb(0, 0, 0));
    rect.draw(&surface).unwrap();
    let origin = rect.coords();

    rect.move_by(12.5, -3.25, false).unwrap();
    rect.move_by(-12.5, 3.25, false).unwrap();
    assert_eq!(rect.coords(), origin);
}

#[test]
fn test_bounds_stay_valid_through_moves() {
    let surface = Surface::new(300, 300, white(), true).unwrap();
    let mut rect = Rectangle::new(100.0, 100.0, 20.0, 20.0);
    rect.draw(&surface).unwrap();
    for (dx, dy, stepped) in [(3.0, -7.0, true), (-40.5, 12.0, false), (0.0, -2.5, true)] {
        rect.move_by(dx, dy, stepped).unwrap();
        assert!(rect.coords().is_valid());
        assert_eq!(rect.coords().width(), 20.0);
    }
}

#[test]
fn test_move_erases_old_footprint() {
    let surface = Surface::new(100, 100, white(), false).unwrap();
    let mut rect = Rectangle::new(10.0, 10.0, 10.0, 10.0).fill(rgb(255, 0, 0));
    rect.draw(&surface).unwrap();
    rect.move_by(50.0, 0.0, false).unwrap();
    assert_eq!(surface.pixel(15, 15), Some(white()));
    assert_eq!(surface.pixel(65, 15), Some(rgb(255, 0, 0)));
}

#[test]
fn test_sprite_deltas_are_rounded() {
    let surface = Surface::new(100, 100, white(), true).unwrap();
    let mut sprite = block_sprite(10, 10);
    sprite.draw(&surface).unwrap();

    sprite.move_by(2.4, 2.6, false).unwrap();
    assert_eq!(sprite.coords(), Aabb::new(12.0, 13.0, 22.0, 23.0));

    let before = surface.history_len();
    sprite.move_by(-1.6, 0.4, true).unwrap();
    assert_eq!(surface.history_len(), before + 2);
    assert_eq!(sprite.coords().left, 10.0);
    assert_eq!(surface.pixel(10, 13), Some(rgb(0, 0, 255)));
    assert_eq!(surface.pixel(20, 13), Some(white()));
}

#[test]
fn test_sprite_resize_is_per_axis() {
    let bitmap = RgbaImage::from_pixel(10, 20, Rgba([1, 1, 1, 255]));
    let wide = Sprite::new(0, 0, bitmap.clone()).resized(Some(30), None).unwrap();
    assert_eq!(wide.size(), (30, 20));
    let tall = Sprite::new(0, 0, bitmap.clone()).resized(None, Some(5)).unwrap();
    assert_eq!(tall.size(), (10, 5));
    assert_eq!(tall.coords(), Aabb::new(0.0, 0.0, 10.0, 5.0));
    assert!(matches!(
        Sprite::new(0, 0, bitmap).resized(Some(0), None),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn test_sprite_open_reads_png_with_alpha() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ghost.png");
    let mut bitmap = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0]));
    bitmap.put_pixel(3, 3, Rgba([0, 255, 0, 255]));
    bitmap.save(&path).unwrap();

    let mut ghost = Sprite::open(2, 2, &path).unwrap();
    assert_eq!(ghost.size(), (4, 4));
    assert_eq!(ghost.coords(), Aabb::new(2.0, 2.0, 6.0, 6.0));

    let surface = Surface::new(20, 20, white(), false).unwrap();
    let mut under = Rectangle::new(0.0, 0.0, 10.0, 10.0)
        .fill(rgb(255, 0, 0))
        .border_thickness(0);
    under.draw(&surface).unwrap();
    ghost.draw(&surface).unwrap();
    // transparent pixels keep the red underneath, the opaque one lands
    assert_eq!(surface.pixel(2, 2), Some(rgb(255, 0, 0)));
    assert_eq!(surface.pixel(4, 3), Some(rgb(255, 0, 0)));
    assert_eq!(surface.pixel(5, 5), Some(rgb(0, 255, 0)));
}

#[test]
fn test_sprite_open_reads_rgb_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tile.png");
    RgbImage::from_pixel(6, 3, Rgb([10, 20, 30])).save(&path).unwrap();

    let mut tile = Sprite::open(1, 4, &path).unwrap();
    assert_eq!(tile.size(), (6, 3));
    assert_eq!(tile.coords(), Aabb::new(1.0, 4.0, 7.0, 7.0));
    // no alpha channel in the file: every pixel comes through opaque
    assert!(tile.bitmap().pixels().all(|p| *p == Rgba([10, 20, 30, 255])));

    let surface = Surface::new(20, 20, white(), false).unwrap();
    tile.draw(&surface).unwrap();
    assert_eq!(surface.pixel(1, 4), Some(rgb(10, 20, 30)));
    assert_eq!(surface.pixel(6, 6), Some(rgb(10, 20, 30)));
    assert_eq!(surface.pixel(7, 6), Some(white()));
}

#[test]
fn test_sprite_from_image_matches_open() {
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 5, Rgb([1, 2, 3])));
    let sprite = Sprite::from_image(-3, 7, image);
    assert_eq!(sprite.size(), (2, 5));
    assert_eq!(sprite.coords(), Aabb::new(-3.0, 7.0, -1.0, 12.0));
    assert_eq!(*sprite.bitmap().get_pixel(1, 4), Rgba([1, 2, 3, 255]));
}

#[test]
fn test_sprite_open_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Sprite::open(0, 0, dir.path().join("missing.png")),
        Err(Error::Codec(_))
    ));
}

#[test]
fn test_rigid_entity_registers_snapshot() {
    let surface = Surface::new(100, 100, white(), false).unwrap();
    let mut wall = Rectangle::new(50.0, 0.0, 10.0, 100.0).rigidbody(true);
    assert!(wall.is_rigidbody());
    assert_eq!(wall.obstacle(), None);
    wall.draw(&surface).unwrap();
    assert!(wall.obstacle().is_some());
    assert_eq!(
        surface.obstacles(ObstacleKind::Rect),
        vec![Aabb::new(50.0, 0.0, 60.0, 100.0)]
    );

    // the registered box does not follow the entity
    wall.move_by(-40.0, 0.0, false).unwrap();
    assert!(surface.check_collision(&Aabb::new(55.0, 10.0, 58.0, 20.0), ObstacleKind::Rect));
    assert!(!surface.check_collision(&Aabb::new(12.0, 10.0, 18.0, 20.0), ObstacleKind::Rect));
}

#[test]
fn test_dropped_surface_invalidates_entity() {
    let surface = Surface::new(100, 100, white(), false).unwrap();
    let mut rect = Rectangle::new(0.0, 0.0, 10.0, 10.0);
    rect.draw(&surface).unwrap();
    drop(surface);
    assert!(matches!(rect.move_by(1.0, 0.0, false), Err(Error::InvalidState(_))));
}

#[test]
fn test_entity_enum_dispatches() {
    let surface = Surface::new(100, 100, white(), true).unwrap();
    let mut entities: Vec<Entity> = vec![
        Rectangle::new(0.0, 0.0, 10.0, 10.0).into(),
        block_sprite(50, 50).into(),
    ];
    for e in &mut entities {
        e.draw(&surface).unwrap();
        e.move_by(3.0, 0.0, true).unwrap();
    }
    assert_eq!(surface.history_len(), 1 + 2 * (1 + 3));
    assert_eq!(entities[0].coords().left, 3.0);
    assert_eq!(entities[1].center(), (58.0, 55.0));
}
