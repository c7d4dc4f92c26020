use env_logger::Env;
use log::{error, info};
use macroquad::prelude::*;
use playbook_core::play::DELETE_KEY;
use playbook_core::{
    Camera as FieldCamera, ClockState, Color as PlayColor, Coordinate, InputBuffer, PlaybookResult,
    PointerButton, Renderer, Stage, TextAlign, Tuning,
};
use std::env;
use std::time::Instant;

const SLIDER_HEIGHT: f32 = 50.0;
// milliseconds per arrow key press
const SCRUB_STEP: f64 = 100.0;

/// Draws the play with macroquad's immediate mode primitives.
struct MacroquadRenderer;

fn to_color(color: PlayColor) -> Color {
    Color::from_rgba(color.r, color.g, color.b, color.a)
}

impl Renderer for MacroquadRenderer {
    fn fill_rect(&mut self, origin: Coordinate, width: f32, height: f32, color: PlayColor) {
        draw_rectangle(origin.x, origin.y, width, height, to_color(color));
    }

    fn stroke_line(&mut self, from: Coordinate, to: Coordinate, width: f32, color: PlayColor) {
        draw_line(from.x, from.y, to.x, to.y, width, to_color(color));
    }

    fn stroke_polyline(&mut self, points: &[Coordinate], width: f32, color: PlayColor) {
        let color = to_color(color);
        for segment in points.windows(2) {
            draw_line(segment[0].x, segment[0].y, segment[1].x, segment[1].y, width, color);
        }
    }

    fn fill_circle(&mut self, center: Coordinate, radius: f32, color: PlayColor) {
        draw_circle(center.x, center.y, radius, to_color(color));
    }

    fn fill_ellipse(&mut self, center: Coordinate, radius_x: f32, radius_y: f32, color: PlayColor) {
        draw_ellipse(center.x, center.y, radius_x, radius_y, 0.0, to_color(color));
    }

    fn stroke_ellipse(
        &mut self,
        center: Coordinate,
        radius_x: f32,
        radius_y: f32,
        width: f32,
        color: PlayColor,
    ) {
        draw_ellipse_lines(center.x, center.y, radius_x, radius_y, 0.0, width, to_color(color));
    }

    fn fill_text(&mut self, text: &str, anchor: Coordinate, size: f32, align: TextAlign, color: PlayColor) {
        let x = match align {
            TextAlign::Left => anchor.x,
            TextAlign::Right => anchor.x - measure_text(text, None, size as u16, 1.0).width,
        };

        draw_text(text, x, anchor.y, size, to_color(color));
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("debug")).init();

    let tuning = match env::var("PLAYBOOK_TUNING") {
        Ok(path) => Tuning::load(&path).unwrap_or_else(|err| {
            error!("cannot load tuning from {path}: {err}");
            Tuning::default()
        }),
        Err(_) => Tuning::default(),
    };

    let mut stage = match Stage::new(tuning.clone()) {
        Ok(stage) => stage,
        Err(err) => {
            error!("cannot build the stage: {err}");
            return;
        }
    };

    if let Err(err) = stage.attach_pointer() {
        error!("cannot attach the pointer: {err}");
        return;
    }

    let mut camera = FieldCamera::new(screen_width(), screen_height() - SLIDER_HEIGHT, tuning.field_width);
    let mut renderer = MacroquadRenderer;
    let mut last_mouse = mouse_position();

    loop {
        clear_background(Color::from_rgba(30, 30, 30, 255));

        camera.set_canvas_size(screen_width(), screen_height() - SLIDER_HEIGHT);

        forward_pointer(&mut stage, &mut last_mouse);

        if let Err(err) = handle_keys(&mut stage) {
            error!("{err}");
        }

        let start = Instant::now();

        if let Err(err) = stage.step(&mut renderer, &camera) {
            error!("frame failed: {err}");
        }

        draw_time_slider(&mut stage, screen_height() - SLIDER_HEIGHT, screen_width());
        draw_frame_time(start.elapsed().as_micros());

        next_frame().await;
    }
}

fn forward_pointer(stage: &mut Stage, last_mouse: &mut (f32, f32)) {
    let (x, y) = mouse_position();
    let position = Coordinate::new(x, y);

    if (x, y) != *last_mouse {
        stage.input.pointer_move(position);
        *last_mouse = (x, y);
    }

    let over_slider = y > screen_height() - SLIDER_HEIGHT;

    for (button, pointer) in [
        (MouseButton::Left, PointerButton::Left),
        (MouseButton::Right, PointerButton::Right),
    ] {
        forward_button(
            &mut stage.input,
            position,
            pointer,
            is_mouse_button_pressed(button),
            is_mouse_button_released(button),
            over_slider,
        );
    }
}

/// The slider owns the strip under the field, so presses there are dropped.
/// Releases always go through to end a drag started on the field.
fn forward_button(
    input: &mut InputBuffer,
    position: Coordinate,
    button: PointerButton,
    pressed: bool,
    released: bool,
    over_slider: bool,
) {
    if pressed && !over_slider {
        input.pointer_down(position, button);
    }
    if released {
        input.pointer_up(position, button);
    }
}

fn handle_keys(stage: &mut Stage) -> PlaybookResult<()> {
    while let Some(key) = get_char_pressed() {
        match key {
            'r' => {
                info!("recording");
                stage.record()?;
            }
            's' => stage.stop(),
            'p' => {
                info!("playing back {}", stage.clock.format_elapsed());
                stage.play()?;
            }
            digit if digit.is_ascii_digit() => stage.input.press_key(digit.to_string()),
            _ => {}
        }
    }

    if is_key_pressed(KeyCode::Delete) || is_key_pressed(KeyCode::Backspace) {
        stage.input.press_key(DELETE_KEY);
    }

    if !stage.clock.is_active() {
        if is_key_pressed(KeyCode::Right) {
            stage.scrub(stage.clock.elapsed() + SCRUB_STEP);
        }
        if is_key_pressed(KeyCode::Left) {
            stage.scrub(stage.clock.elapsed() - SCRUB_STEP);
        }
    }

    Ok(())
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Playbook".to_owned(),
        window_width: 1280,
        window_height: 800,
        window_resizable: true,
        fullscreen: false,
        high_dpi: true,
        ..Default::default()
    }
}

// draw

fn draw_frame_time(elapsed_mcs: u128) {
    draw_text(&format!("FRAME: {elapsed_mcs} mcs"), 10.0, 20.0, 20.0, WHITE);
}

/// Scrubber under the field. Dragging it moves the clock while idle.
fn draw_time_slider(stage: &mut Stage, offset_y: f32, total_width: f32) {
    let max_time = stage.clock.max_time();
    let (mouse_x, mouse_y) = mouse_position();

    let slider_padding = 20.0;
    let slider_x = slider_padding;
    let slider_width = total_width - slider_padding * 2.0 - 100.0;
    let slider_height = 4.0;
    let slider_y = offset_y + SLIDER_HEIGHT / 2.0 - slider_height / 2.0;

    draw_rectangle(slider_x, slider_y, slider_width, slider_height, GRAY);

    if max_time > 0.0 {
        let progress = (stage.clock.elapsed() / max_time).clamp(0.0, 1.0) as f32;
        draw_rectangle(slider_x, slider_y, slider_width * progress, slider_height, BLUE);

        let handle_x = slider_x + slider_width * progress;
        let handle_y = slider_y + slider_height / 2.0;
        draw_circle(handle_x, handle_y, 8.0, WHITE);
        draw_circle_lines(handle_x, handle_y, 8.0, 2.0, BLUE);

        let mouse_on_slider = mouse_x >= slider_x - 10.0
            && mouse_x <= slider_x + slider_width + 10.0
            && mouse_y >= slider_y - 15.0
            && mouse_y <= slider_y + slider_height + 15.0;

        if !stage.clock.is_active() && mouse_on_slider && is_mouse_button_down(MouseButton::Left) {
            let relative_x = (mouse_x - slider_x).clamp(0.0, slider_width);
            stage.scrub(max_time * (relative_x / slider_width) as f64);
        }
    }

    let state = match stage.clock.state() {
        ClockState::Idle => "idle",
        ClockState::Playing => "playing",
        ClockState::Recording => "recording",
    };
    draw_text(
        &format!("{} {state}", stage.clock.format_elapsed()),
        slider_x + slider_width + 15.0,
        offset_y + SLIDER_HEIGHT / 2.0 + 5.0,
        16.0,
        WHITE,
    );
}
