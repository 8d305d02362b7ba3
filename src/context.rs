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
use crate::window::FrameEnv;
use crate::{
    rectf, Button, Checkbox, Command, Control, CursorIcon, Dimensionf, Image, ImageId, Input, InputArbiter, Label, Layer, LayerKind, ProgressBar,
    RadioButton, Renderer, ResourceState, Separator, Slider, Style, TextBox, TextMetrics, Vec2f, Window, WindowFlags,
};

/// Key reserved for the canvas-sized window that receives controls declared outside any window.
const DEFAULT_WINDOW: &str = "##default";

#[derive(Clone, Debug)]
struct WindowRef {
    layer: LayerKind,
    key: String,
}

/// Primary entry point: owns every window, the input arbiter and the command list of the current frame.
///
/// A frame is `frame_begin`, any number of window and control declarations, then `frame_end`.
/// Windows and controls not declared during a frame are destroyed when it ends.
pub struct Context {
    layers: [Layer; 3],
    arbiter: InputArbiter,
    input: Input,
    style: Style,
    metrics: Box<dyn TextMetrics>,
    canvas: Dimensionf,
    stack: Vec<WindowRef>,
    commands: Vec<Command>,
    cursor_icon: Option<CursorIcon>,
}

impl Context {
    /// Creates a runtime measuring text with `metrics`.
    pub fn new(metrics: impl TextMetrics + 'static) -> Self { Self::with_style(metrics, Style::default()) }

    /// Creates a runtime with a custom style.
    pub fn with_style(metrics: impl TextMetrics + 'static, style: Style) -> Self {
        Self {
            layers: LayerKind::ALL.map(Layer::new),
            arbiter: InputArbiter::new(),
            input: Input::default(),
            style,
            metrics: Box::new(metrics),
            canvas: Dimensionf::new(0.0, 0.0),
            stack: Vec::new(),
            commands: Vec::new(),
            cursor_icon: None,
        }
    }

    /// Input state fed by the platform layer between frames.
    pub fn input_mut(&mut self) -> &mut Input { &mut self.input }

    /// Input state of the current frame.
    pub fn input(&self) -> &Input { &self.input }

    /// Active style.
    pub fn style(&self) -> &Style { &self.style }

    /// Replaces the style and pushes it into every live window.
    pub fn set_style(&mut self, style: Style) {
        self.style = style;
        for layer in self.layers.iter_mut() {
            layer.apply_style(&self.style);
        }
    }

    /// Canvas size given to the last [`Context::frame_begin`].
    pub fn canvas_size(&self) -> Dimensionf { self.canvas }

    /// Hover and capture state.
    pub fn arbiter(&self) -> &InputArbiter { &self.arbiter }

    /// Windows of one tier.
    pub fn layer(&self, kind: LayerKind) -> &Layer { &self.layers[kind.index()] }

    /// Starts a frame: arbitrates input front to back across all windows and opens the default window.
    pub fn frame_begin(&mut self, canvas: Dimensionf) {
        self.canvas = canvas;
        self.commands.clear();
        self.cursor_icon = None;
        self.input.prelude();
        self.arbiter.sample_frame(self.input.mouse_pos());

        let mut env = FrameEnv { input: &self.input, arbiter: &mut self.arbiter, style: &self.style, metrics: self.metrics.as_ref(), canvas: self.canvas };
        for kind in [LayerKind::Foreground, LayerKind::Normal, LayerKind::Background] {
            self.layers[kind.index()].frame_begin(&mut env);
        }

        let background = &mut self.layers[LayerKind::Background.index()];
        let window = background.define_window(DEFAULT_WINDOW, WindowFlags::SCROLLABLE, &self.style, canvas);
        window.set_fixed_rect(rectf(0.0, 0.0, canvas.width, canvas.height), &self.style);

        self.stack.clear();
        self.stack.push(WindowRef { layer: LayerKind::Background, key: String::from(DEFAULT_WINDOW) });
    }

    /// Ends the frame: destroys undeclared windows and controls, then records the draw commands back to front.
    pub fn frame_end(&mut self) {
        if self.stack.len() > 1 {
            log::warn!("{} window(s) still open at frame end", self.stack.len() - 1);
        }
        self.stack.clear();

        let mut env = FrameEnv { input: &self.input, arbiter: &mut self.arbiter, style: &self.style, metrics: self.metrics.as_ref(), canvas: self.canvas };
        for kind in LayerKind::ALL {
            self.layers[kind.index()].frame_end(&mut env, &mut self.commands);
        }

        self.cursor_icon = [LayerKind::Foreground, LayerKind::Normal, LayerKind::Background]
            .iter()
            .find_map(|kind| self.layers[kind.index()].cursor_request());
        if let Some(icon) = self.cursor_icon {
            self.commands.push(Command::Cursor { icon, pos: self.input.mouse_pos() });
        }
        self.input.epilogue();
    }

    /// Runs `f` between [`Context::frame_begin`] and [`Context::frame_end`].
    pub fn frame<F: FnOnce(&mut Self)>(&mut self, canvas: Dimensionf, f: F) {
        self.frame_begin(canvas);
        f(self);
        self.frame_end();
    }

    /// Opens (creating on first use) the window `key`; following declarations go into it until
    /// [`Context::window_end`].
    pub fn window_begin(&mut self, key: &str, flags: WindowFlags) {
        if key == DEFAULT_WINDOW {
            log::warn!("window key '{}' is reserved", key);
            self.stack.push(WindowRef { layer: LayerKind::Background, key: String::from(DEFAULT_WINDOW) });
            return;
        }
        let (kind, other) = if flags.is_always_on_top() {
            (LayerKind::Foreground, LayerKind::Normal)
        } else {
            (LayerKind::Normal, LayerKind::Foreground)
        };
        if self.layers[other.index()].remove(key, &mut self.arbiter) {
            log::debug!("window '{}' moved to the {:?} layer", key, kind);
        }
        let canvas = self.canvas;
        self.layers[kind.index()].define_window(key, flags, &self.style, canvas);
        self.stack.push(WindowRef { layer: kind, key: String::from(key) });
    }

    /// Closes the innermost open window. Does nothing if only the default window is open.
    pub fn window_end(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        } else {
            log::trace!("window_end without a matching window_begin");
        }
    }

    /// Declares the window `key` and runs `f` inside it.
    pub fn window<F: FnOnce(&mut Self)>(&mut self, key: &str, flags: WindowFlags, f: F) {
        self.window_begin(key, flags);
        f(self);
        self.window_end();
    }

    fn current_window_mut(&mut self) -> Option<&mut Window> {
        let current = self.stack.last()?;
        self.layers[current.layer.index()].get_mut(&current.key)
    }

    // runs `f` against the innermost open window; `None` outside of a frame
    fn with_current<R>(&mut self, f: impl FnOnce(&mut Window, &mut FrameEnv<'_>) -> R) -> Option<R> {
        let current = self.stack.last()?;
        let window = self.layers[current.layer.index()].get_mut(&current.key)?;
        let mut env = FrameEnv { input: &self.input, arbiter: &mut self.arbiter, style: &self.style, metrics: self.metrics.as_ref(), canvas: self.canvas };
        Some(f(window, &mut env))
    }

    /// Looks up a live window in any layer.
    pub fn window_info(&self, key: &str) -> Option<&Window> {
        [LayerKind::Normal, LayerKind::Foreground, LayerKind::Background].iter().find_map(|kind| self.layers[kind.index()].get(key))
    }

    /// Returns `true` if the pointer was over `key` (and nothing in front of it) this frame.
    pub fn is_window_hovered(&self, key: &str) -> bool { self.window_info(key).is_some_and(Window::is_hovered) }

    /// The canvas-sized window in the background layer.
    pub fn default_window(&self) -> Option<&Window> { self.layer(LayerKind::Background).get(DEFAULT_WINDOW) }

    /// Moves the current window to `pos` at the end of the frame.
    pub fn set_window_pos(&mut self, pos: Vec2f) {
        if let Some(window) = self.current_window_mut() {
            window.set_pos_override(pos);
        }
    }

    /// Resizes the current window at the end of the frame. The size is clamped to the window's minimum.
    pub fn set_window_size(&mut self, size: Vec2f) {
        if let Some(window) = self.current_window_mut() {
            window.set_size_override(size);
        }
    }

    /// Replaces the titlebar text of the current window.
    pub fn set_window_title(&mut self, title: &str) {
        if let Some(window) = self.current_window_mut() {
            window.set_title(title);
        }
    }

    /// Places the next control to the right of the previous one.
    pub fn same_line(&mut self) {
        if let Some(window) = self.current_window_mut() {
            window.same_line();
        }
    }

    /// Declares a positional control in the current window.
    ///
    /// `make` builds the control the first time this position is reached with this type, `bind` copies caller
    /// values into it, and `read` extracts the result after the update. Returns `None` outside of a frame.
    pub fn control<T: Control, R>(
        &mut self,
        make: impl FnOnce() -> T,
        bind: impl FnOnce(&mut T),
        read: impl FnOnce(&T, ResourceState) -> R,
    ) -> Option<R> {
        self.with_current(|window, env| window.update_control(None, env, make, bind, read))
    }

    /// Declares a control identified by `key` in the current window. Its state survives reordering and
    /// frames in which it is not declared.
    pub fn control_keyed<T: Control, R>(
        &mut self,
        key: &str,
        make: impl FnOnce() -> T,
        bind: impl FnOnce(&mut T),
        read: impl FnOnce(&T, ResourceState) -> R,
    ) -> Option<R> {
        self.with_current(|window, env| window.update_control(Some(key), env, make, bind, read))
    }

    /// Drops the keyed control `key` of the current window. Returns `true` if it existed.
    pub fn forget_keyed(&mut self, key: &str) -> bool { self.with_current(|window, env| window.forget_keyed(key, env.arbiter)).unwrap_or(false) }

    /// Static text.
    pub fn label(&mut self, text: &str) {
        self.control(
            || Label::new(text),
            |label| {
                if label.text != text {
                    label.text = String::from(text);
                }
            },
            |_, _| (),
        );
    }

    /// Push button. The result carries `SUBMIT` on the frame it is clicked.
    pub fn button(&mut self, label: &str) -> ResourceState {
        self.control(
            || Button::new(label),
            |button| {
                if button.label != label {
                    button.label = String::from(label);
                }
            },
            |_, res| res,
        )
        .unwrap_or_default()
    }

    /// Checkbox bound to `value`.
    pub fn checkbox(&mut self, label: &str, value: &mut bool) -> ResourceState {
        let current = *value;
        let out = self.control(
            || Checkbox::new(label, current),
            |checkbox| {
                checkbox.checked = current;
                if checkbox.label != label {
                    checkbox.label = String::from(label);
                }
            },
            |checkbox, res| (checkbox.checked, res),
        );
        match out {
            Some((checked, res)) => {
                *value = checked;
                res
            }
            None => ResourceState::NONE,
        }
    }

    /// One choice of a radio group: selecting it stores `option` into `value`.
    pub fn radio_button<T: PartialEq>(&mut self, label: &str, value: &mut T, option: T) -> ResourceState {
        let selected = *value == option;
        let out = self.control(
            || RadioButton::new(label, selected),
            |radio| {
                radio.selected = selected;
                if radio.label != label {
                    radio.label = String::from(label);
                }
            },
            |_, res| res,
        );
        match out {
            Some(res) => {
                if res.is_changed() {
                    *value = option;
                }
                res
            }
            None => ResourceState::NONE,
        }
    }

    /// Single-line text field bound to `value`. Keyed, so the caret and focus survive layout changes.
    pub fn textbox(&mut self, key: &str, value: &mut String) -> ResourceState {
        let current = value.as_str();
        let out = self.control_keyed(
            key,
            || TextBox::new(current),
            |field| {
                if field.text() != current {
                    field.set_text(current);
                }
            },
            |field, res| (res.is_changed().then(|| String::from(field.text())), res),
        );
        match out {
            Some((text, res)) => {
                if let Some(text) = text {
                    *value = text;
                }
                res
            }
            None => ResourceState::NONE,
        }
    }

    /// Horizontal slider bound to `value`, clamped to `low..=high`.
    pub fn slider(&mut self, value: &mut f32, low: f32, high: f32) -> ResourceState {
        let current = *value;
        let out = self.control(
            || Slider::new(current, low, high),
            |slider| {
                slider.low = low;
                slider.high = high;
                slider.value = current;
            },
            |slider, res| (slider.value, res),
        );
        match out {
            Some((v, res)) => {
                *value = v;
                res
            }
            None => ResourceState::NONE,
        }
    }

    /// Progress bar showing `value` in `0..=1`.
    pub fn progress_bar(&mut self, value: f32) {
        self.control(|| ProgressBar::new(value), |bar| bar.value = value, |_, _| ());
    }

    /// Horizontal rule.
    pub fn separator(&mut self) { self.control(Separator::new, |_| (), |_, _| ()); }

    /// Draws `image` at `size`.
    pub fn image(&mut self, image: ImageId, size: Vec2f) {
        self.control(
            || Image::new(image, size),
            |img| {
                img.image = image;
                img.size = size;
            },
            |_, _| (),
        );
    }

    /// Draw commands recorded by the last [`Context::frame_end`].
    pub fn commands(&self) -> &[Command] { &self.commands }

    /// Cursor shape requested during the last frame, if any.
    pub fn cursor_icon(&self) -> Option<CursorIcon> { self.cursor_icon }

    /// Replays the recorded commands into `renderer` and clears them.
    pub fn render<R: Renderer>(&mut self, renderer: &mut R) {
        renderer.begin(self.canvas);
        for command in self.commands.drain(..) {
            renderer.command(&command);
        }
        renderer.end();
    }
}
