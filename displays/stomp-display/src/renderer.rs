//! Setup screen renderer
//!
//! Subscribes to navigator [`Update`]s. An `Enter` update repaints the
//! content area, body and caption; a `Value` update on the same screen
//! repaints only the value box and the bar columns that changed.

use core::fmt::Write;

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;
use heapless::String;
use stomp_core::menu::{CcBank, EditStage, LevelTarget, MidiPort, Redraw, Update, View};
use stomp_core::settings::values::BRIGHTNESS_STEPS;

use crate::backend::{Color, DisplayBackend, DisplayError, BACKGROUND};
use crate::chrome::Chrome;
use crate::layout::{
    bar_column_x, bar_columns, bar_dividers, bar_frame, bar_interior, slot_center,
    BATTERY_SECTIONS, BAR_HEIGHT, BAR_Y, BIG_VALUE_Y, LABEL_Y, LED_SECTIONS, ROW_VALUE_Y,
    SCREEN_WIDTH, VALUE_X, VALUE_Y,
};

/// Left edge of the "BT" label
const BLE_LABEL_X: i32 = 46;
/// Right edge of the "DIN" label
const DIN_LABEL_RIGHT: i32 = SCREEN_WIDTH - 46;
/// Padding around cleared text boxes
const BOX_PAD: i32 = 2;
const WIDE_BOX_PAD: i32 = 6;

type Text = String<12>;

/// How a bar colours its filled columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BarStyle {
    Solid(Color),
    /// Red, then orange, then green, counted from the right edge
    Battery,
}

impl BarStyle {
    fn color_at(self, column: u32) -> Color {
        match self {
            BarStyle::Solid(color) => color,
            BarStyle::Battery => {
                let section = (bar_interior().size.width / BATTERY_SECTIONS).max(1);
                match column / section {
                    0 => Color::Red,
                    1 => Color::Orange,
                    _ => Color::Green,
                }
            }
        }
    }
}

/// A bar as drawn: filled columns, colouring and divider count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bar {
    columns: u32,
    style: BarStyle,
    sections: u32,
}

/// Draws setup screens from navigator updates
#[derive(Debug, Default)]
pub struct Renderer {
    chrome: Chrome,
    shown: Option<View>,
}

impl Renderer {
    pub const fn new() -> Self {
        Self {
            chrome: Chrome::new(),
            shown: None,
        }
    }

    /// Forget the panel contents, e.g. after the display was re-initialized
    pub fn invalidate(&mut self) {
        self.chrome.invalidate();
        self.shown = None;
    }

    pub fn chrome(&self) -> &Chrome {
        &self.chrome
    }

    /// Draw one update and flush
    pub fn render<B: DisplayBackend>(
        &mut self,
        backend: &mut B,
        update: &Update,
    ) -> Result<(), DisplayError> {
        let previous = match (update.redraw, self.shown) {
            (Redraw::Value, Some(shown)) if same_screen(&shown, &update.view) => Some(shown),
            _ => None,
        };

        match previous {
            Some(previous) => {
                draw_value(backend, &previous, &update.view)?;
                let (text, short) = caption(&update.view);
                if caption(&previous).0 != text {
                    self.chrome.caption(backend, text, short)?;
                }
            }
            None => {
                self.chrome.prepare(backend, !update.detail)?;
                draw_body(backend, &update.view)?;
                let (text, short) = caption(&update.view);
                self.chrome.caption(backend, text, short)?;
            }
        }

        self.shown = Some(update.view);
        backend.flush()
    }
}

/// Whether two views are the same screen with possibly different values
fn same_screen(a: &View, b: &View) -> bool {
    match (a, b) {
        (View::Battery(_), View::Battery(_)) => true,
        (View::Level { target: t1, editing: e1, .. }, View::Level { target: t2, editing: e2, .. }) => {
            t1 == t2 && e1 == e2
        }
        (View::MidiChannels { focus: f1, .. }, View::MidiChannels { focus: f2, .. }) => {
            f1.is_some() == f2.is_some()
        }
        (
            View::CcAssignments { bank: b1, focus: f1, .. },
            View::CcAssignments { bank: b2, focus: f2, .. },
        ) => b1 == b2 && f1.is_some() == f2.is_some(),
        (View::MirrorDelay { editing: e1, .. }, View::MirrorDelay { editing: e2, .. }) => e1 == e2,
        _ => false,
    }
}

/// Caption text and an optional shorter fallback
fn caption(view: &View) -> (&'static str, Option<&'static str>) {
    match *view {
        View::Battery(_) => ("Battery %", None),
        View::Level { target: LevelTarget::Led, editing: false, .. } => ("LEDs", None),
        View::Level { target: LevelTarget::Led, editing: true, .. } => ("led brightness", None),
        View::Level { target: LevelTarget::Tft, editing: false, .. } => ("display", None),
        View::Level { target: LevelTarget::Tft, editing: true, .. } => ("screen brightness", None),
        View::MidiChannels { focus, .. } => match focus {
            None => ("MIDI channel", Some("MIDI ch")),
            Some((_, EditStage::Select)) => ("select OUTPUT", Some("select OUT")),
            Some((MidiPort::Ble, EditStage::Edit)) => ("set BT MIDI chan", None),
            Some((MidiPort::Din, EditStage::Edit)) => ("set DIN MIDI chan", None),
        },
        View::CcAssignments { bank, focus, .. } => match (bank, focus) {
            (_, Some((_, EditStage::Edit))) => ("set CC number", None),
            (CcBank::Fader, None) => ("Fader CC numbers", Some("Fader CC")),
            (CcBank::Fader, Some(_)) => ("select FADER", Some("select FDR")),
            (CcBank::Stomp, None) => ("Stomp CC numbers", Some("Stomp CC")),
            (CcBank::Stomp, Some(_)) => ("select STOMP", Some("select STP")),
        },
        View::MirrorDelay { editing: false, .. } => ("Mirror delay", None),
        View::MirrorDelay { editing: true, .. } => ("set mirror delay", None),
    }
}

fn draw_body<B: DisplayBackend>(backend: &mut B, view: &View) -> Result<(), DisplayError> {
    match *view {
        View::Battery(_) | View::Level { .. } => {
            let (value, color, bar) = value_and_bar(view);
            draw_number(backend, value, color)?;
            draw_bar(backend, bar)
        }
        View::MidiChannels { ble, din, focus } => draw_midi(backend, ble, din, focus),
        View::CcAssignments { values, focus, .. } => draw_cc_row(backend, &values, focus),
        View::MirrorDelay { tenths, editing } => draw_delay(backend, tenths, editing),
    }
}

fn draw_value<B: DisplayBackend>(
    backend: &mut B,
    previous: &View,
    view: &View,
) -> Result<(), DisplayError> {
    match *view {
        View::Battery(_) | View::Level { .. } => {
            let (value, color, bar) = value_and_bar(view);
            let (_, _, old_bar) = value_and_bar(previous);
            draw_number(backend, value, color)?;
            draw_bar_delta(backend, old_bar, bar)
        }
        _ => draw_body(backend, view),
    }
}

/// Number, its colour and the bar for the battery and level screens
fn value_and_bar(view: &View) -> (u8, Color, Bar) {
    match *view {
        View::Battery(status) => (
            status.percent,
            if status.charging { Color::Green } else { Color::White },
            Bar {
                columns: bar_columns(u32::from(status.percent), 100),
                style: BarStyle::Battery,
                sections: BATTERY_SECTIONS,
            },
        ),
        View::Level { value, editing, .. } => (
            value,
            Color::White,
            Bar {
                columns: bar_columns(u32::from(value), u32::from(*BRIGHTNESS_STEPS.end())),
                style: BarStyle::Solid(if editing { Color::Red } else { Color::Green }),
                sections: LED_SECTIONS,
            },
        ),
        _ => (
            0,
            Color::White,
            Bar {
                columns: 0,
                style: BarStyle::Solid(BACKGROUND),
                sections: 1,
            },
        ),
    }
}

fn format_number(value: u8, width: usize) -> Result<Text, DisplayError> {
    let mut text = Text::new();
    write!(text, "{:0width$}", value, width = width).map_err(|_| DisplayError::BufferOverflow)?;
    Ok(text)
}

/// Clear the padded box `sample` would cover at `origin`
fn clear_box<B: DisplayBackend>(
    backend: &mut B,
    origin: Point,
    sample: &str,
    pad: i32,
) -> Result<(), DisplayError> {
    let bounds = backend.text_bounds(origin, sample);
    backend.fill_rect(
        Rectangle::new(
            bounds.top_left - Point::new(pad, pad),
            bounds.size + Size::new(2 * pad as u32, 2 * pad as u32),
        ),
        BACKGROUND,
    )
}

/// Draw `text` centred on `center_x`, first clearing room for `sample`
fn draw_centered<B: DisplayBackend>(
    backend: &mut B,
    text: &str,
    center_x: i32,
    baseline: i32,
    sample: &str,
    color: Color,
) -> Result<(), DisplayError> {
    let sample_width = backend.text_bounds(Point::zero(), sample).size.width as i32;
    clear_box(backend, Point::new(center_x - sample_width / 2, baseline), sample, WIDE_BOX_PAD)?;

    let width = backend.text_bounds(Point::zero(), text).size.width as i32;
    backend.draw_text(Point::new(center_x - width / 2, baseline), text, color)
}

fn draw_number<B: DisplayBackend>(backend: &mut B, value: u8, color: Color) -> Result<(), DisplayError> {
    let origin = Point::new(VALUE_X, VALUE_Y);
    clear_box(backend, origin, "999", BOX_PAD)?;
    let text = format_number(value, 1)?;
    backend.draw_text(origin, &text, color)
}

fn draw_bar_frame<B: DisplayBackend>(backend: &mut B, sections: u32) -> Result<(), DisplayError> {
    backend.draw_rect(bar_frame(), Color::White)?;
    for x in bar_dividers(sections) {
        backend.draw_vline(Point::new(x, BAR_Y), BAR_HEIGHT, Color::White)?;
    }
    Ok(())
}

/// Fill columns `start..end` (counted from the right), merging same-colour runs
fn fill_columns<B: DisplayBackend>(
    backend: &mut B,
    start: u32,
    end: u32,
    color_at: impl Fn(u32) -> Color,
) -> Result<(), DisplayError> {
    let mut run = start;
    while run < end {
        let color = color_at(run);
        let mut run_end = run + 1;
        while run_end < end && color_at(run_end) == color {
            run_end += 1;
        }
        backend.fill_rect(
            Rectangle::new(
                Point::new(bar_column_x(run_end - 1), BAR_Y + 1),
                Size::new(run_end - run, BAR_HEIGHT - 2),
            ),
            color,
        )?;
        run = run_end;
    }
    Ok(())
}

fn draw_bar<B: DisplayBackend>(backend: &mut B, bar: Bar) -> Result<(), DisplayError> {
    backend.fill_rect(bar_interior(), BACKGROUND)?;
    fill_columns(backend, 0, bar.columns, |column| bar.style.color_at(column))?;
    draw_bar_frame(backend, bar.sections)
}

/// Repaint only the columns between the old and new fill
fn draw_bar_delta<B: DisplayBackend>(backend: &mut B, old: Bar, new: Bar) -> Result<(), DisplayError> {
    if old.style != new.style {
        return draw_bar(backend, new);
    }
    if new.columns > old.columns {
        fill_columns(backend, old.columns, new.columns, |column| new.style.color_at(column))?;
    } else if new.columns < old.columns {
        fill_columns(backend, new.columns, old.columns, |_| BACKGROUND)?;
    } else {
        return Ok(());
    }
    draw_bar_frame(backend, new.sections)
}

fn draw_midi<B: DisplayBackend>(
    backend: &mut B,
    ble: u8,
    din: u8,
    focus: Option<(MidiPort, EditStage)>,
) -> Result<(), DisplayError> {
    let label_color = |port| match focus {
        Some((focused, EditStage::Select)) if focused == port => Color::Green,
        _ => Color::White,
    };
    let value_color = |port| match focus {
        Some((focused, EditStage::Select)) if focused == port => Color::Green,
        Some((focused, EditStage::Edit)) if focused == port => Color::Red,
        _ => Color::White,
    };

    let ble_width = backend.text_bounds(Point::zero(), "BT").size.width as i32;
    let din_width = backend.text_bounds(Point::zero(), "DIN").size.width as i32;
    let ble_center = BLE_LABEL_X + ble_width / 2;
    let din_center = DIN_LABEL_RIGHT - din_width / 2;

    draw_centered(backend, "BT", ble_center, LABEL_Y, "BT", label_color(MidiPort::Ble))?;
    draw_centered(backend, "DIN", din_center, LABEL_Y, "DIN", label_color(MidiPort::Din))?;

    let text = format_number(ble, 2)?;
    draw_centered(backend, &text, ble_center, ROW_VALUE_Y, "88", value_color(MidiPort::Ble))?;
    let text = format_number(din, 2)?;
    draw_centered(backend, &text, din_center, ROW_VALUE_Y, "88", value_color(MidiPort::Din))
}

fn draw_cc_row<B: DisplayBackend>(
    backend: &mut B,
    values: &[u8],
    focus: Option<(u8, EditStage)>,
) -> Result<(), DisplayError> {
    let count = values.len() as u32;
    for (slot, value) in values.iter().enumerate() {
        let center = slot_center(slot as u32, count);
        let color = match focus {
            Some((focused, EditStage::Select)) if usize::from(focused) == slot => Color::Green,
            Some((focused, EditStage::Edit)) if usize::from(focused) == slot => Color::Red,
            _ => Color::White,
        };

        let label = format_number(slot as u8 + 1, 1)?;
        draw_centered(backend, &label, center, LABEL_Y, "8", color)?;
        let text = format_number(*value, 1)?;
        draw_centered(backend, &text, center, ROW_VALUE_Y, "888", color)?;
    }
    Ok(())
}

fn draw_delay<B: DisplayBackend>(backend: &mut B, tenths: u8, editing: bool) -> Result<(), DisplayError> {
    let mut text = Text::new();
    write!(text, "{}.{} sec", tenths / 10, tenths % 10).map_err(|_| DisplayError::BufferOverflow)?;
    let color = if editing { Color::Red } else { Color::White };
    draw_centered(backend, &text, SCREEN_WIDTH / 2, BIG_VALUE_Y, "3.0 sec", color)
}
