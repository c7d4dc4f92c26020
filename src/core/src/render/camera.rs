use crate::{Coordinate, PlaybookError, PlaybookResult};

/// World feet <-> canvas pixels. World y grows up the field, screen y grows down.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    canvas_width: f32,
    canvas_height: f32,
    offset: Coordinate,
    // feet visible across the canvas width
    zoom: f32,
    scale_factor: f32,
}

impl Camera {
    pub fn new(canvas_width: f32, canvas_height: f32, zoom: f32) -> Self {
        Camera {
            canvas_width,
            canvas_height,
            offset: Coordinate::default(),
            zoom,
            scale_factor: canvas_width / zoom,
        }
    }

    pub fn to_screen(&self, world: Coordinate) -> Coordinate {
        Coordinate::new(
            (world.x - self.offset.x) * self.scale_factor + self.canvas_width / 2.0,
            (self.offset.y - world.y) * self.scale_factor + self.canvas_height / 2.0,
        )
    }

    pub fn to_world(&self, screen: Coordinate) -> Coordinate {
        Coordinate::new(
            (screen.x - self.canvas_width / 2.0) / self.scale_factor + self.offset.x,
            self.offset.y - (screen.y - self.canvas_height / 2.0) / self.scale_factor,
        )
    }

    pub fn set_offsets(&mut self, offset_x: f32, offset_y: f32) {
        self.offset = Coordinate::new(offset_x, offset_y);
    }

    pub fn set_zoom(&mut self, zoom: f32) -> PlaybookResult<()> {
        if zoom <= 0.0 || !zoom.is_finite() {
            return Err(PlaybookError::InvalidZoom(zoom));
        }

        self.zoom = zoom;
        self.scale_factor = self.canvas_width / self.zoom;

        Ok(())
    }

    pub fn set_canvas_size(&mut self, width: f32, height: f32) {
        self.canvas_width = width;
        self.canvas_height = height;
        self.scale_factor = self.canvas_width / self.zoom;
    }

    #[inline]
    pub fn canvas_size(&self) -> (f32, f32) {
        (self.canvas_width, self.canvas_height)
    }

    /// Pixels per world foot.
    #[inline]
    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    #[inline]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }
}

impl Default for Camera {
    fn default() -> Self {
        Camera::new(800.0, 600.0, crate::Tuning::default().field_width)
    }
}
