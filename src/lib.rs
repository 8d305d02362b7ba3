//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
#![deny(missing_docs)]
//! `layered-ui` is an immediate-mode GUI runtime that keeps windows and controls alive across frames.
//!
//! Application code re-declares every window and control each frame between [`Context::frame_begin`] and
//! [`Context::frame_end`]. The runtime resolves those declarations to persistent state (positions, scroll
//! offsets, drag state, animation phases), arbitrates which single entity owns the pointer, and produces an
//! ordered list of [`Command`]s for an external renderer.

use std::fmt;

mod arbiter;
mod context;
mod draw;
mod error;
mod layer;
mod layout;
mod metrics;
mod scrollbar;
mod timing;
mod widgets;
mod window;

pub use arbiter::InputArbiter;
pub use context::Context;
pub use draw::*;
pub use error::Error;
pub use layer::{Layer, LayerKind};
pub use layout::LayoutCursor;
pub use metrics::*;
pub use rs_math3d::*;
pub use scrollbar::{ScrollAxis, ScrollBar};
pub use timing::{Delay, Repeater, Transition};
pub use widgets::*;
pub use window::{Window, WindowState};

use bitflags::*;

/// Continuous rectangle used for every window and control placement.
pub type Rectf = Rect<f32>;

/// Continuous size used by text metrics and control sizing.
pub type Dimensionf = Dimension<f32>;

#[derive(Default, Copy, Clone, Eq, PartialEq, Hash, Debug)]
/// Opaque numeric identifier for windows and controls.
pub struct Id(u64);

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

impl Id {
    /// Creates an ID from a caller-supplied numeric value.
    pub fn new(value: u64) -> Self { Self(value) }

    /// Creates a random, non-zero ID that stays valid for the life of the process.
    pub fn random() -> Self {
        loop {
            let value: u64 = rand::random();
            if value != 0 {
                return Self(value);
            }
        }
    }

    /// Creates a stable ID from a string label using FNV-1a hashing.
    pub fn from_str(label: &str) -> Self {
        let mut hash = FNV_OFFSET_BASIS;
        for byte in label.as_bytes() {
            hash ^= *byte as u64;
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        Self(hash)
    }

    /// Mixes `value` into this ID, producing a child identity scoped to `self`.
    pub fn combine(self, value: u64) -> Self {
        let mut hash = self.0;
        for byte in value.to_le_bytes() {
            hash ^= byte as u64;
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        Self(hash)
    }

    /// Returns the raw numeric value wrapped by this ID.
    pub fn raw(self) -> u64 { self.0 }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "#{:016x}", self.0) }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Mouse button state as reported by the input system.
    pub struct MouseButton : u32 {
        /// Middle mouse button.
        const MIDDLE = 4;
        /// Right mouse button.
        const RIGHT = 2;
        /// Left mouse button.
        const LEFT = 1;
        /// No buttons pressed.
        const NONE = 0;
    }
}

impl MouseButton {
    /// Returns `true` if the middle mouse button is set.
    pub fn is_middle(&self) -> bool { self.intersects(Self::MIDDLE) }
    /// Returns `true` if the right mouse button is set.
    pub fn is_right(&self) -> bool { self.intersects(Self::RIGHT) }
    /// Returns `true` if the left mouse button is set.
    pub fn is_left(&self) -> bool { self.intersects(Self::LEFT) }
    /// Returns `true` if no mouse buttons are set.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Modifier and editing keys.
    pub struct KeyMode : u32 {
        /// Delete key.
        const DELETE = 32;
        /// Return/Enter key.
        const RETURN = 16;
        /// Backspace key.
        const BACKSPACE = 8;
        /// Alt key.
        const ALT = 4;
        /// Control key.
        const CTRL = 2;
        /// Shift key.
        const SHIFT = 1;
        /// No key.
        const NONE = 0;
    }
}

impl KeyMode {
    /// Returns `true` if no key is set.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
    /// Returns `true` if Delete is set.
    pub fn is_delete(&self) -> bool { self.intersects(Self::DELETE) }
    /// Returns `true` if Return is set.
    pub fn is_return(&self) -> bool { self.intersects(Self::RETURN) }
    /// Returns `true` if Backspace is set.
    pub fn is_backspace(&self) -> bool { self.intersects(Self::BACKSPACE) }
    /// Returns `true` if Control is set.
    pub fn is_ctrl(&self) -> bool { self.intersects(Self::CTRL) }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Navigation keys.
    pub struct KeyCode : u32 {
        /// Home key.
        const HOME = 8;
        /// End key.
        const END = 4;
        /// Right arrow.
        const RIGHT = 2;
        /// Left arrow.
        const LEFT = 1;
        /// No key.
        const NONE = 0;
    }
}

impl KeyCode {
    /// Returns `true` if Home is set.
    pub fn is_home(&self) -> bool { self.intersects(Self::HOME) }
    /// Returns `true` if End is set.
    pub fn is_end(&self) -> bool { self.intersects(Self::END) }
    /// Returns `true` if the left arrow is set.
    pub fn is_left(&self) -> bool { self.intersects(Self::LEFT) }
    /// Returns `true` if the right arrow is set.
    pub fn is_right(&self) -> bool { self.intersects(Self::RIGHT) }
}

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    /// Outcome of a control update.
    pub struct ResourceState : u32 {
        /// The control changed its bound value.
        const CHANGE = 4;
        /// The control was submitted (e.g. a button click).
        const SUBMIT = 2;
        /// The control is being interacted with.
        const ACTIVE = 1;
        /// No interaction.
        const NONE = 0;
    }
}

impl ResourceState {
    /// Returns `true` if the control changed its bound value.
    pub fn is_changed(&self) -> bool { self.intersects(Self::CHANGE) }
    /// Returns `true` if the control signaled submission.
    pub fn is_submitted(&self) -> bool { self.intersects(Self::SUBMIT) }
    /// Returns `true` if the control is active.
    pub fn is_active(&self) -> bool { self.intersects(Self::ACTIVE) }
    /// Returns `true` if the state contains no flags.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Behaviour flags of a window.
    pub struct WindowFlags : u32 {
        /// Excluded from move-to-front when clicked.
        const NO_FOCUS = 512;
        /// Routed to the foreground layer.
        const ALWAYS_ON_TOP = 256;
        /// Controls receive no cursor.
        const DISABLED = 128;
        /// Kept alive but neither drawn nor interactive.
        const HIDDEN = 64;
        /// Size follows the declared content every frame.
        const AUTO_RESIZE = 32;
        /// Draws a background panel and border.
        const BACKGROUND = 16;
        /// Draws a titlebar with the display name.
        const TITLEBAR = 8;
        /// Shows scrollbars when the content overflows.
        const SCROLLABLE = 4;
        /// Can be resized from its border grips.
        const RESIZABLE = 2;
        /// Can be dragged by its titlebar.
        const MOVABLE = 1;
        /// No special behaviour.
        const NONE = 0;
        /// A regular decorated window.
        const DEFAULT = Self::MOVABLE.bits() | Self::RESIZABLE.bits() | Self::SCROLLABLE.bits() | Self::TITLEBAR.bits() | Self::BACKGROUND.bits();
    }
}

impl WindowFlags {
    /// Returns `true` if the window can be dragged by its titlebar.
    pub fn is_movable(&self) -> bool { self.intersects(Self::MOVABLE) }
    /// Returns `true` if the window exposes resize grips.
    pub fn is_resizable(&self) -> bool { self.intersects(Self::RESIZABLE) }
    /// Returns `true` if the window scrolls overflowing content.
    pub fn is_scrollable(&self) -> bool { self.intersects(Self::SCROLLABLE) }
    /// Returns `true` if the window has a titlebar.
    pub fn has_titlebar(&self) -> bool { self.intersects(Self::TITLEBAR) }
    /// Returns `true` if the window draws a background.
    pub fn has_background(&self) -> bool { self.intersects(Self::BACKGROUND) }
    /// Returns `true` if the window sizes itself to its content.
    pub fn is_auto_sizing(&self) -> bool { self.intersects(Self::AUTO_RESIZE) }
    /// Returns `true` if the window is hidden.
    pub fn is_hidden(&self) -> bool { self.intersects(Self::HIDDEN) }
    /// Returns `true` if the window's controls are disabled.
    pub fn is_disabled(&self) -> bool { self.intersects(Self::DISABLED) }
    /// Returns `true` if the window belongs to the foreground layer.
    pub fn is_always_on_top(&self) -> bool { self.intersects(Self::ALWAYS_ON_TOP) }
    /// Returns `true` if clicks never bring the window to the front.
    pub fn is_focus_exempt(&self) -> bool { self.intersects(Self::NO_FOCUS) }
    /// Returns `true` if scrollbars must fit inside the window at all times.
    pub fn needs_scrollbars(&self) -> bool { self.is_scrollable() && !self.is_auto_sizing() }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Window edges affected by an active resize grip.
    pub struct ResizeDir : u32 {
        /// Left edge.
        const LEFT = 8;
        /// Bottom edge.
        const BOTTOM = 4;
        /// Right edge.
        const RIGHT = 2;
        /// Top edge.
        const TOP = 1;
        /// No edge.
        const NONE = 0;
    }
}

impl ResizeDir {
    /// Returns the cursor icon matching this grip.
    pub fn cursor_icon(&self) -> CursorIcon {
        let horizontal = self.intersects(Self::LEFT | Self::RIGHT);
        let vertical = self.intersects(Self::TOP | Self::BOTTOM);
        match (horizontal, vertical) {
            (true, true) => {
                if *self == Self::TOP | Self::LEFT || *self == Self::BOTTOM | Self::RIGHT {
                    CursorIcon::ResizeNwse
                } else {
                    CursorIcon::ResizeNesw
                }
            }
            (true, false) => CursorIcon::ResizeLeftRight,
            (false, true) => CursorIcon::ResizeUpDown,
            (false, false) => CursorIcon::Arrow,
        }
    }
}

#[derive(Clone, Debug)]
/// Raw device state collected between frames.
pub struct Input {
    mouse_pos: Vec2f,
    last_mouse_pos: Vec2f,
    mouse_delta: Vec2f,
    scroll_delta: Vec2f,
    mouse_down: MouseButton,
    mouse_pressed: MouseButton,
    mouse_released: MouseButton,
    key_down: KeyMode,
    key_pressed: KeyMode,
    key_code_pressed: KeyCode,
    input_text: String,
    delta_time: f32,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            mouse_pos: vec2f(0.0, 0.0),
            last_mouse_pos: vec2f(0.0, 0.0),
            mouse_delta: vec2f(0.0, 0.0),
            scroll_delta: vec2f(0.0, 0.0),
            mouse_down: MouseButton::NONE,
            mouse_pressed: MouseButton::NONE,
            mouse_released: MouseButton::NONE,
            key_down: KeyMode::NONE,
            key_pressed: KeyMode::NONE,
            key_code_pressed: KeyCode::NONE,
            input_text: String::new(),
            delta_time: 1.0 / 60.0,
        }
    }
}

impl Input {
    /// Updates the current mouse pointer position.
    pub fn mousemove(&mut self, x: f32, y: f32) { self.mouse_pos = vec2f(x, y); }

    /// Records that the specified mouse button was pressed.
    pub fn mousedown(&mut self, x: f32, y: f32, btn: MouseButton) {
        self.mousemove(x, y);
        self.mouse_down |= btn;
        self.mouse_pressed |= btn;
    }

    /// Records that the specified mouse button was released.
    pub fn mouseup(&mut self, x: f32, y: f32, btn: MouseButton) {
        self.mousemove(x, y);
        self.mouse_down &= !btn;
        self.mouse_released |= btn;
    }

    /// Accumulates scroll wheel movement (in notches).
    pub fn scroll(&mut self, x: f32, y: f32) {
        self.scroll_delta.x += x;
        self.scroll_delta.y += y;
    }

    /// Records that a modifier or editing key was pressed.
    pub fn keydown(&mut self, key: KeyMode) {
        self.key_pressed |= key;
        self.key_down |= key;
    }

    /// Records that a modifier or editing key was released.
    pub fn keyup(&mut self, key: KeyMode) { self.key_down &= !key; }

    /// Records that a navigation key was pressed.
    pub fn keydown_code(&mut self, code: KeyCode) { self.key_code_pressed |= code; }

    /// Appends UTF-8 text typed since the last frame.
    pub fn text(&mut self, text: &str) { self.input_text.push_str(text); }

    /// Returns the held modifier and editing keys.
    pub fn key_state(&self) -> KeyMode { self.key_down }

    /// Returns the modifier and editing keys pressed this frame.
    pub fn key_pressed(&self) -> KeyMode { self.key_pressed }

    /// Returns the navigation keys pressed this frame.
    pub fn key_code_pressed(&self) -> KeyCode { self.key_code_pressed }

    /// Returns the text typed this frame.
    pub fn text_input(&self) -> &str { &self.input_text }

    /// Sets the elapsed time of the upcoming frame, in seconds.
    pub fn set_delta_time(&mut self, dt: f32) { self.delta_time = dt.max(0.0); }

    /// Returns the absolute pointer position.
    pub fn mouse_pos(&self) -> Vec2f { self.mouse_pos }

    /// Returns the pointer movement since the previous frame.
    pub fn mouse_delta(&self) -> Vec2f { self.mouse_delta }

    /// Returns the wheel movement accumulated this frame.
    pub fn scroll_delta(&self) -> Vec2f { self.scroll_delta }

    /// Returns the currently held mouse buttons.
    pub fn mouse_buttons(&self) -> MouseButton { self.mouse_down }

    /// Returns `true` while the left button is held.
    pub fn left_down(&self) -> bool { self.mouse_down.is_left() }

    /// Returns `true` on the frame the left button went down.
    pub fn left_pressed(&self) -> bool { self.mouse_pressed.is_left() }

    /// Returns `true` on the frame the left button went up.
    pub fn left_released(&self) -> bool { self.mouse_released.is_left() }

    /// Returns the elapsed frame time, in seconds.
    pub fn delta_time(&self) -> f32 { self.delta_time }

    pub(crate) fn prelude(&mut self) {
        // a press can teleport the pointer (touch input); never report that as motion
        if self.mouse_pressed.is_none() {
            self.mouse_delta = vec2f(self.mouse_pos.x - self.last_mouse_pos.x, self.mouse_pos.y - self.last_mouse_pos.y);
        } else {
            self.mouse_delta = vec2f(0.0, 0.0);
        }
    }

    pub(crate) fn epilogue(&mut self) {
        self.mouse_pressed = MouseButton::NONE;
        self.mouse_released = MouseButton::NONE;
        self.key_pressed = KeyMode::NONE;
        self.key_code_pressed = KeyCode::NONE;
        self.input_text.clear();
        self.scroll_delta = vec2f(0.0, 0.0);
        self.last_mouse_pos = self.mouse_pos;
    }
}

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[repr(C)]
/// Simple RGBA color stored with 8-bit components.
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Returns the color with its alpha scaled by `factor` (clamped to `0..=1`).
    pub fn fade(self, factor: f32) -> Self {
        let a = (self.a as f32 * factor.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }
}

#[derive(PartialEq, Copy, Clone, Debug)]
#[repr(u32)]
/// Identifiers for each of the built-in style colors.
pub enum ControlColor {
    /// Number of color entries in [`Style::colors`].
    Max = 14,
    /// Thumb of scrollbars.
    ScrollThumb = 13,
    /// Track of scrollbars.
    ScrollBase = 12,
    /// Filled part of sliders and progress bars.
    Accent = 11,
    /// Frames of checkboxes, sliders and progress bars.
    Base = 10,
    /// Button color while pressed.
    ButtonActive = 9,
    /// Button color while hovered.
    ButtonHover = 8,
    /// Default button color.
    Button = 7,
    /// Window title text color.
    TitleText = 6,
    /// Window title background color.
    TitleBG = 5,
    /// Window outline color.
    Border = 4,
    /// Window background color.
    WindowBG = 3,
    /// Separator lines.
    Separator = 2,
    /// Text of disabled controls.
    TextDisabled = 1,
    /// Default text color.
    Text = 0,
}

impl ControlColor {
    /// Promotes the enum to the hover variant when relevant.
    pub fn hover(&mut self) {
        *self = match self {
            Self::Button => Self::ButtonHover,
            _ => *self,
        }
    }

    /// Promotes the enum to the pressed variant when relevant.
    pub fn active(&mut self) {
        *self = match self {
            Self::Button | Self::ButtonHover => Self::ButtonActive,
            _ => *self,
        }
    }
}

#[derive(Copy, Clone, Debug)]
/// Collection of geometric, timing and color constants.
pub struct Style {
    /// Padding between a window's content edge and its controls.
    pub padding: f32,
    /// Spacing between consecutive controls.
    pub spacing: f32,
    /// Height of window title bars.
    pub title_height: f32,
    /// Half-thickness of the resize band around window edges.
    pub grip_size: f32,
    /// Thickness of scrollbars.
    pub scrollbar_size: f32,
    /// Smallest scrollbar thumb length.
    pub min_thumb_size: f32,
    /// Scroll distance of one wheel notch.
    pub wheel_step: f32,
    /// Corner radius of windows and scrollbars.
    pub corner_radius: f32,
    /// Inner padding of buttons around their label.
    pub button_padding: Vec2f,
    /// Side length of checkbox squares.
    pub check_size: f32,
    /// Default size of sliders and progress bars.
    pub bar_size: Vec2f,
    /// Delay before a held track press starts repeating, in seconds.
    pub repeat_delay: f32,
    /// Interval between track press repeats, in seconds.
    pub repeat_interval: f32,
    /// Time constant of smoothed scrolling, in seconds.
    pub scroll_smooth_time: f32,
    /// Scrollbar fade-in duration, in seconds.
    pub fade_in: f32,
    /// Scrollbar fade-out duration, in seconds.
    pub fade_out: f32,
    /// Time a scrollbar stays fully visible after interaction stops, in seconds.
    pub fade_hold: f32,
    /// Palette of [`ControlColor`] entries.
    pub colors: [Color; 14],
}

impl Style {
    /// Returns the palette entry for `id`.
    pub fn color(&self, id: ControlColor) -> Color { self.colors[id as usize] }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            padding: 10.0,
            spacing: 5.0,
            title_height: 30.0,
            grip_size: 5.0,
            scrollbar_size: 14.0,
            min_thumb_size: 16.0,
            wheel_step: 40.0,
            corner_radius: 3.0,
            button_padding: vec2f(7.0, 4.0),
            check_size: 16.0,
            bar_size: vec2f(150.0, 20.0),
            repeat_delay: 0.5,
            repeat_interval: 0.1,
            scroll_smooth_time: 0.08,
            fade_in: 0.1,
            fade_out: 0.4,
            fade_hold: 1.0,
            colors: [
                Color { r: 230, g: 230, b: 230, a: 255 },
                Color { r: 150, g: 150, b: 150, a: 255 },
                Color { r: 90, g: 90, b: 90, a: 255 },
                Color { r: 40, g: 40, b: 40, a: 240 },
                Color { r: 25, g: 25, b: 25, a: 255 },
                Color { r: 55, g: 55, b: 55, a: 255 },
                Color { r: 240, g: 240, b: 240, a: 255 },
                Color { r: 75, g: 75, b: 75, a: 255 },
                Color { r: 95, g: 95, b: 95, a: 255 },
                Color { r: 115, g: 115, b: 115, a: 255 },
                Color { r: 30, g: 30, b: 30, a: 255 },
                Color { r: 50, g: 120, b: 220, a: 255 },
                Color { r: 43, g: 43, b: 43, a: 255 },
                Color { r: 110, g: 110, b: 110, a: 255 },
            ],
        }
    }
}

/// Measures rendered text. Supplied by the embedding application.
pub trait TextMetrics {
    /// Returns the size of `text` rendered with the application's font.
    fn measure(&self, text: &str) -> Dimensionf;

    /// Height of one line of text.
    fn line_height(&self) -> f32 { self.measure("M").height }
}

/// Convenience constructor for [`Vec2f`].
pub fn vec2f(x: f32, y: f32) -> Vec2f { Vec2f::new(x, y) }

/// Convenience constructor for [`Rectf`].
pub fn rectf(x: f32, y: f32, w: f32, h: f32) -> Rectf { Rectf::new(x, y, w, h) }

/// Convenience constructor for [`Color`].
pub fn color(r: u8, g: u8, b: u8, a: u8) -> Color { Color { r, g, b, a } }

/// Expands (or shrinks) a rectangle uniformly on all sides.
pub fn expand_rectf(r: Rectf, n: f32) -> Rectf { rectf(r.x - n, r.y - n, r.width + n * 2.0, r.height + n * 2.0) }

/// Returns `true` if `p` lies inside `r` (left/top inclusive, right/bottom exclusive).
///
/// Unlike `Rect::contains`, a point on an edge shared by two adjacent rects belongs to exactly one of them.
pub fn rect_contains(r: &Rectf, p: Vec2f) -> bool { p.x >= r.x && p.y >= r.y && p.x < r.x + r.width && p.y < r.y + r.height }

