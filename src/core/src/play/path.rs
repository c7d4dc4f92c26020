use crate::play::{Clock, Millis};
use crate::render::{Color, Renderer};
use crate::{Coordinate, PlaybookError, PlaybookResult};
use ordered_float::OrderedFloat;
use std::collections::BTreeMap;

const PATH_LINE_WIDTH: f32 = 4.0;

/// Values keyed by elapsed play time. Always holds at least its seed at key 0.
#[derive(Debug)]
pub struct TimedPath<T = Coordinate> {
    seed: T,
    points: BTreeMap<OrderedFloat<Millis>, T>,
    recording: bool,
}

impl<T: Copy> TimedPath<T> {
    pub fn new(seed: T) -> Self {
        let mut points = BTreeMap::new();
        points.insert(OrderedFloat(0.0), seed);

        TimedPath {
            seed,
            points,
            recording: false,
        }
    }

    /// Authored path from `(time, value)` pairs, e.g. a scripted route.
    pub fn with_points(seed: T, points: impl IntoIterator<Item = (Millis, T)>) -> Self {
        let mut path = TimedPath::new(seed);
        for (time, value) in points {
            path.points.insert(OrderedFloat(time), value);
        }
        path
    }

    /// Marks the path as appendable. Existing entries are kept.
    pub fn start_recording(&mut self) {
        self.recording = true;
    }

    #[inline]
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn record_point(&mut self, clock: &Clock, value: T) -> PlaybookResult<()> {
        if !self.recording {
            return Err(PlaybookError::UnstartedRecorder);
        }

        self.points.insert(OrderedFloat(clock.elapsed()), value);

        Ok(())
    }

    pub fn stop_recording(&mut self) {
        self.recording = false;
    }

    /// Entry with the greatest key `<= time`; falls back to the last entry.
    pub fn value_at(&self, time: Millis) -> T {
        self.points
            .range(..=OrderedFloat(time))
            .next_back()
            .or_else(|| self.points.last_key_value())
            .map(|(_, value)| *value)
            .unwrap_or(self.seed)
    }

    pub fn first(&self) -> T {
        self.points
            .first_key_value()
            .map(|(_, value)| *value)
            .unwrap_or(self.seed)
    }

    pub fn last(&self) -> T {
        self.points
            .last_key_value()
            .map(|(_, value)| *value)
            .unwrap_or(self.seed)
    }

    pub fn max_time(&self) -> Millis {
        self.points
            .last_key_value()
            .map(|(time, _)| time.0)
            .unwrap_or_default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Millis, &T)> {
        self.points.iter().map(|(time, value)| (time.0, value))
    }
}

impl TimedPath<Coordinate> {
    #[inline]
    pub fn coord_at_time(&self, time: Millis) -> Coordinate {
        self.value_at(time)
    }

    /// Strokes the path from its start up to `cutoff`; entries after the cutoff are skipped.
    pub fn draw_path(
        &self,
        renderer: &mut dyn Renderer,
        map_coord: impl Fn(Coordinate) -> Coordinate,
        color: Color,
        cutoff: Option<Millis>,
    ) {
        let points: Vec<Coordinate> = self
            .points
            .iter()
            .take_while(|(time, _)| cutoff.is_none_or(|cutoff| time.0 <= cutoff))
            .map(|(_, coord)| map_coord(*coord))
            .collect();

        if points.is_empty() {
            return;
        }

        renderer.stroke_polyline(&points, PATH_LINE_WIDTH, color);
    }
}

impl<T: Clone> Clone for TimedPath<T> {
    // a copy is never bound to a clock
    fn clone(&self) -> Self {
        TimedPath {
            seed: self.seed.clone(),
            points: self.points.clone(),
            recording: false,
        }
    }
}
