//! Desktop simulator for the segment-view segmented control.
//!
//! Renders a [`SegmentView`] in an SDL2 window via `embedded-graphics-simulator`.
//! Drawing goes through a [`FrameBuffer`] and only changed pixels are flushed to
//! the window.
//!
//! # Key bindings
//!
//! | Key | Action                          |
//! |-----|---------------------------------|
//! | 1-9 | Select segment by position      |
//! | A   | Add a segment                   |
//! | D   | Deselect                        |
//! | O   | Toggle horizontal / vertical    |
//! | S   | Cycle separator width           |
//! | F   | Cycle title font                |
//! | Q   | Quit                            |
//!
//! Mouse clicks are forwarded as touch presses, movement with the button held
//! as drags.

use std::time::{Duration, Instant};

use embedded_graphics::image::ImageRaw;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{error, info, warn};

use segment_view_core::ui::styling::colors::BLACK;
use segment_view_core::{
    Drawable, Frame, FrameBuffer, OrganiseMode, SegmentImage, SegmentView, TitleFont, TouchEvent,
    TouchPoint, TouchResult, Touchable,
};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

const DISPLAY_WIDTH_PX: u32 = 320;
const DISPLAY_HEIGHT_PX: u32 = 240;

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// View frame per organise mode.
const HORIZONTAL_FRAME: Frame = Frame::new(10.0, 100.0, 300.0, 40.0);
const VERTICAL_FRAME: Frame = Frame::new(100.0, 10.0, 120.0, 220.0);

const TITLES: [&str; 6] = ["Day", "Week", "Month", "Year", "All", "Custom"];

// ---------------------------------------------------------------------------
// Segment icons
// ---------------------------------------------------------------------------

const ICON_SIZE: u32 = 12;
const ICON_BYTES: usize = (ICON_SIZE * ICON_SIZE * 2) as usize;

/// Solid square icon in one big-endian RGB565 colour.
const fn solid_icon(colour: u16) -> [u8; ICON_BYTES] {
    let mut data = [0u8; ICON_BYTES];
    let mut i = 0;
    while i < ICON_BYTES {
        data[i] = (colour >> 8) as u8;
        data[i + 1] = colour as u8;
        i += 2;
    }
    data
}

static ICON_ON: [u8; ICON_BYTES] = solid_icon(0x07E0);
static ICON_OFF: [u8; ICON_BYTES] = solid_icon(0x8410);

fn icons() -> (SegmentImage, SegmentImage) {
    (
        ImageRaw::new(&ICON_ON, ICON_SIZE),
        ImageRaw::new(&ICON_OFF, ICON_SIZE),
    )
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn build_view() -> SegmentView {
    let mut view = SegmentView::new(HORIZONTAL_FRAME).with_delegate(
        |view: &SegmentView, index: usize| {
            let title = view.segment(index).and_then(|s| s.title()).unwrap_or("");
            info!("Delegate: selected segment {} ({})", index, title);
        },
    );

    for title in &TITLES[..3] {
        add_segment(&mut view, title);
    }
    view.select_segment_at_index(0);
    view
}

fn add_segment(view: &mut SegmentView, title: &str) {
    let (on, off) = icons();
    view.add_segment(Some(title), Some(on), Some(off));
}

fn next_font(font: TitleFont) -> TitleFont {
    match font {
        TitleFont::Small => TitleFont::Medium,
        TitleFont::Medium => TitleFont::Large,
        TitleFont::Large => TitleFont::ExtraLarge,
        TitleFont::ExtraLarge => TitleFont::Small,
    }
}

/// Map a number key to a zero-based segment index.
fn keycode_to_index(keycode: Keycode) -> Option<usize> {
    match keycode {
        Keycode::Num1 | Keycode::Kp1 => Some(0),
        Keycode::Num2 | Keycode::Kp2 => Some(1),
        Keycode::Num3 | Keycode::Kp3 => Some(2),
        Keycode::Num4 | Keycode::Kp4 => Some(3),
        Keycode::Num5 | Keycode::Kp5 => Some(4),
        Keycode::Num6 | Keycode::Kp6 => Some(5),
        Keycode::Num7 | Keycode::Kp7 => Some(6),
        Keycode::Num8 | Keycode::Kp8 => Some(7),
        Keycode::Num9 | Keycode::Kp9 => Some(8),
        _ => None,
    }
}

fn touch_point(point: Point) -> TouchPoint {
    TouchPoint::new(point.x.max(0) as u16, point.y.max(0) as u16)
}

/// Apply a key press to the view. Returns `false` when the simulator should quit.
fn handle_key(view: &mut SegmentView, keycode: Keycode) -> bool {
    match keycode {
        Keycode::Q | Keycode::Escape => return false,
        Keycode::A => {
            let count = view.segment_count();
            if count < TITLES.len() {
                add_segment(view, TITLES[count]);
            } else {
                warn!("All {} demo segments already added", TITLES.len());
            }
        }
        Keycode::D => view.deselect_segment(),
        Keycode::O => {
            let (mode, frame) = match view.organise_mode() {
                OrganiseMode::Horizontal => (OrganiseMode::Vertical, VERTICAL_FRAME),
                OrganiseMode::Vertical => (OrganiseMode::Horizontal, HORIZONTAL_FRAME),
            };
            info!("Organise mode {:?}", mode);
            view.set_organise_mode(mode);
            view.set_frame(frame);
        }
        Keycode::S => {
            let width = if view.separator_width() >= 4.0 {
                0.0
            } else {
                view.separator_width() + 1.0
            };
            info!("Separator width {}", width);
            view.set_separator_width(width);
        }
        Keycode::F => {
            let font = next_font(view.style().title_font);
            info!("Title font {:?}", font);
            view.set_segment_title_font(font);
        }
        other => {
            if let Some(index) = keycode_to_index(other)
                && let Err(e) = view.try_select_segment_at_index(index)
            {
                warn!("{}", e);
            }
        }
    }
    true
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting segment-view simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Keys: 1-9=Select  A=Add  D=Deselect  O=Orientation  S=Separator  F=Font  Q=Quit");

    let size = Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX);
    let mut display = SimulatorDisplay::<Rgb565>::new(size);
    let mut framebuffer = FrameBuffer::new(size);

    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Segment View Simulator", &output_settings);

    let mut view = build_view();
    let mut mouse_down = false;

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    let _ = display.clear(BLACK);
    window.update(&display);

    'running: loop {
        let frame_start = Instant::now();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => {
                    if !handle_key(&mut view, keycode) {
                        break 'running;
                    }
                }

                SimulatorEvent::MouseButtonDown { point, .. } => {
                    mouse_down = true;
                    match view.handle_touch(TouchEvent::Press(touch_point(point))) {
                        TouchResult::Action(action) => info!("Touch → {:?}", action),
                        TouchResult::Handled => info!("Touch on separator"),
                        TouchResult::NotHandled => {}
                    }
                }

                SimulatorEvent::MouseButtonUp { .. } => mouse_down = false,

                SimulatorEvent::MouseMove { point } if mouse_down => {
                    view.handle_touch(TouchEvent::Drag(touch_point(point)));
                }

                _ => {}
            }
        }

        // --- Render -------------------------------------------------------
        if view.is_dirty() {
            // The view frame may have moved since the last draw
            let _ = framebuffer.clear(BLACK);
            let _ = view.draw(&mut framebuffer);
            view.mark_clean();

            if let Err(e) = framebuffer.flush(&mut display) {
                error!("Flush error: {:?}", e);
            }
        }

        window.update(&display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
}
