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
use crate::{vec2f, Command, CursorIcon, Dimensionf, InputArbiter, Style, Vec2f, Window, WindowFlags};
use std::collections::HashMap;

/// Z-stacking tier of a window.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// Behind everything; never reordered. Holds the default window.
    Background,
    /// Regular windows.
    Normal,
    /// Windows flagged as always on top.
    Foreground,
}

impl LayerKind {
    /// All tiers, back to front.
    pub const ALL: [LayerKind; 3] = [LayerKind::Background, LayerKind::Normal, LayerKind::Foreground];

    pub(crate) fn index(self) -> usize {
        match self {
            LayerKind::Background => 0,
            LayerKind::Normal => 1,
            LayerKind::Foreground => 2,
        }
    }
}

/// Windows of one tier, keyed by name, with their z-order (most recently focused last).
pub struct Layer {
    kind: LayerKind,
    windows: HashMap<String, Window>,
    order: Vec<String>,
}

impl Layer {
    /// Creates an empty layer.
    pub fn new(kind: LayerKind) -> Self { Self { kind, windows: HashMap::new(), order: Vec::new() } }

    /// Tier of this layer.
    pub fn kind(&self) -> LayerKind { self.kind }

    /// Number of live windows.
    pub fn len(&self) -> usize { self.windows.len() }

    /// Returns `true` if the layer holds no window.
    pub fn is_empty(&self) -> bool { self.windows.is_empty() }

    /// Returns `true` if a window with `key` is alive in this layer.
    pub fn contains(&self, key: &str) -> bool { self.windows.contains_key(key) }

    /// Looks up a window.
    pub fn get(&self, key: &str) -> Option<&Window> { self.windows.get(key) }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut Window> { self.windows.get_mut(key) }

    /// Window keys, back to front.
    pub fn order(&self) -> impl Iterator<Item = &str> + '_ { self.order.iter().map(String::as_str) }

    /// Looks up or creates the window `key` and marks it declared for this frame.
    pub(crate) fn define_window(&mut self, key: &str, flags: WindowFlags, style: &Style, canvas: Dimensionf) -> &mut Window {
        let order = &mut self.order;
        let window = self.windows.entry(String::from(key)).or_insert_with(|| {
            order.push(String::from(key));
            Window::new(key, flags, initial_origin(canvas), style)
        });
        window.set_flags(flags);
        window.mark_declared();
        window
    }

    /// Destroys the window `key`. Returns `true` if it existed.
    pub(crate) fn remove(&mut self, key: &str, arbiter: &mut InputArbiter) -> bool {
        match self.windows.remove(key) {
            Some(mut window) => {
                window.release_all(arbiter);
                self.order.retain(|k| k != key);
                true
            }
            None => false,
        }
    }

    /// Moves `key` to the front of the layer.
    pub(crate) fn bring_to_front(&mut self, key: &str) {
        if self.kind == LayerKind::Background {
            return;
        }
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            let k = self.order.remove(pos);
            self.order.push(k);
        }
    }

    /// Runs every window's input pass front to back, then applies the focus requests.
    pub(crate) fn frame_begin(&mut self, env: &mut FrameEnv<'_>) {
        let mut raised = Vec::new();
        for key in self.order.iter().rev() {
            if let Some(window) = self.windows.get_mut(key) {
                window.frame_begin(env);
                if window.take_front_request() {
                    raised.push(key.clone());
                }
            }
        }
        for key in raised {
            self.bring_to_front(&key);
        }
    }

    /// Destroys undeclared windows, then finalizes and draws the rest back to front.
    pub(crate) fn frame_end(&mut self, env: &mut FrameEnv<'_>, commands: &mut Vec<Command>) {
        let stale: Vec<String> = self.order.iter().filter(|k| self.windows.get(*k).is_some_and(|w| !w.is_declared())).cloned().collect();
        for key in stale {
            self.remove(&key, env.arbiter);
        }
        for key in &self.order {
            if let Some(window) = self.windows.get_mut(key) {
                window.frame_end(env, commands);
            }
        }
    }

    pub(crate) fn cursor_request(&self) -> Option<CursorIcon> {
        self.order.iter().rev().filter_map(|k| self.windows.get(k)).find_map(Window::cursor_request)
    }

    pub(crate) fn apply_style(&mut self, style: &Style) {
        for window in self.windows.values_mut() {
            window.apply_style(style);
        }
    }
}

// new windows open somewhere in the upper-left quarter of the canvas
fn initial_origin(canvas: Dimensionf) -> Vec2f {
    let x: f32 = rand::random();
    let y: f32 = rand::random();
    vec2f((x * canvas.width * 0.5).floor(), (y * canvas.height * 0.5).floor())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FixedMetrics, Input};

    fn run_frame(layer: &mut Layer, arbiter: &mut InputArbiter, keys: &[&str]) {
        let style = Style::default();
        let metrics = FixedMetrics::default();
        let input = Input::default();
        let mut commands = Vec::new();
        let mut env = FrameEnv { input: &input, arbiter, style: &style, metrics: &metrics, canvas: Dimensionf::new(800.0, 600.0) };
        layer.frame_begin(&mut env);
        for key in keys {
            layer.define_window(key, WindowFlags::DEFAULT, &style, Dimensionf::new(800.0, 600.0));
        }
        layer.frame_end(&mut env, &mut commands);
    }

    #[test]
    fn windows_keep_declaration_order() {
        let mut layer = Layer::new(LayerKind::Normal);
        let mut arbiter = InputArbiter::new();
        run_frame(&mut layer, &mut arbiter, &["a", "b", "c"]);
        assert_eq!(layer.order().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        layer.bring_to_front("a");
        assert_eq!(layer.order().collect::<Vec<_>>(), vec!["b", "c", "a"]);
    }

    #[test]
    fn background_never_reorders() {
        let mut layer = Layer::new(LayerKind::Background);
        let mut arbiter = InputArbiter::new();
        run_frame(&mut layer, &mut arbiter, &["a", "b"]);
        layer.bring_to_front("a");
        assert_eq!(layer.order().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn undeclared_windows_are_destroyed_and_released() {
        let mut layer = Layer::new(LayerKind::Normal);
        let mut arbiter = InputArbiter::new();
        run_frame(&mut layer, &mut arbiter, &["a", "b"]);
        let id = layer.get("b").map(Window::id);
        if let Some(id) = id {
            assert!(arbiter.try_capture(id, true));
        }
        run_frame(&mut layer, &mut arbiter, &["a"]);
        assert!(!layer.contains("b"));
        assert_eq!(layer.len(), 1);
        assert!(!arbiter.is_capturing());
    }

    #[test]
    fn new_windows_open_inside_the_canvas() {
        for _ in 0..100 {
            let p = initial_origin(Dimensionf::new(800.0, 600.0));
            assert!((0.0..=400.0).contains(&p.x) && (0.0..=300.0).contains(&p.y));
        }
    }
}
