pub mod camera;

pub use camera::*;

use crate::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const BROWN: Color = Color::rgb(165, 42, 42);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Right,
}

/// 2D drawing primitives in screen pixels. The simulation only ever pushes
/// camera-mapped coordinates in here and never reads anything back.
pub trait Renderer {
    fn fill_rect(&mut self, origin: Coordinate, width: f32, height: f32, color: Color);

    fn stroke_line(&mut self, from: Coordinate, to: Coordinate, width: f32, color: Color);

    fn stroke_polyline(&mut self, points: &[Coordinate], width: f32, color: Color);

    fn fill_circle(&mut self, center: Coordinate, radius: f32, color: Color);

    fn fill_ellipse(&mut self, center: Coordinate, radius_x: f32, radius_y: f32, color: Color);

    fn stroke_ellipse(
        &mut self,
        center: Coordinate,
        radius_x: f32,
        radius_y: f32,
        width: f32,
        color: Color,
    );

    fn fill_text(&mut self, text: &str, anchor: Coordinate, size: f32, align: TextAlign, color: Color);
}

/// Renderer for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn fill_rect(&mut self, _: Coordinate, _: f32, _: f32, _: Color) {}
    fn stroke_line(&mut self, _: Coordinate, _: Coordinate, _: f32, _: Color) {}
    fn stroke_polyline(&mut self, _: &[Coordinate], _: f32, _: Color) {}
    fn fill_circle(&mut self, _: Coordinate, _: f32, _: Color) {}
    fn fill_ellipse(&mut self, _: Coordinate, _: f32, _: f32, _: Color) {}
    fn stroke_ellipse(&mut self, _: Coordinate, _: f32, _: f32, _: f32, _: Color) {}
    fn fill_text(&mut self, _: &str, _: Coordinate, _: f32, _: TextAlign, _: Color) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        origin: Coordinate,
        width: f32,
        height: f32,
        color: Color,
    },
    Line {
        from: Coordinate,
        to: Coordinate,
        width: f32,
        color: Color,
    },
    Polyline {
        points: Vec<Coordinate>,
        width: f32,
        color: Color,
    },
    Circle {
        center: Coordinate,
        radius: f32,
        color: Color,
    },
    Ellipse {
        center: Coordinate,
        radius_x: f32,
        radius_y: f32,
        filled: bool,
        color: Color,
    },
    Text {
        text: String,
        anchor: Coordinate,
        color: Color,
    },
}

/// Renderer that keeps every command, handy for inspecting a frame.
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        DrawList::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn polylines(&self, color: Color) -> impl Iterator<Item = &[Coordinate]> {
        self.commands.iter().filter_map(move |command| match command {
            DrawCommand::Polyline {
                points, color: c, ..
            } if *c == color => Some(points.as_slice()),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Renderer for DrawList {
    fn fill_rect(&mut self, origin: Coordinate, width: f32, height: f32, color: Color) {
        self.commands.push(DrawCommand::Rect {
            origin,
            width,
            height,
            color,
        });
    }

    fn stroke_line(&mut self, from: Coordinate, to: Coordinate, width: f32, color: Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn stroke_polyline(&mut self, points: &[Coordinate], width: f32, color: Color) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            width,
            color,
        });
    }

    fn fill_circle(&mut self, center: Coordinate, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_ellipse(&mut self, center: Coordinate, radius_x: f32, radius_y: f32, color: Color) {
        self.commands.push(DrawCommand::Ellipse {
            center,
            radius_x,
            radius_y,
            filled: true,
            color,
        });
    }

    fn stroke_ellipse(
        &mut self,
        center: Coordinate,
        radius_x: f32,
        radius_y: f32,
        _width: f32,
        color: Color,
    ) {
        self.commands.push(DrawCommand::Ellipse {
            center,
            radius_x,
            radius_y,
            filled: false,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, anchor: Coordinate, _size: f32, _align: TextAlign, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            anchor,
            color,
        });
    }
}
