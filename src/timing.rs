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
//! Small frame-driven timers shared by scrollbars and controls.

#[derive(Clone, Debug)]
/// Press-and-hold auto-repeat: fires once immediately, then after `delay`, then every `interval`.
pub struct Repeater {
    delay: f32,
    interval: f32,
    elapsed: f32,
    active: bool,
    repeating: bool,
}

impl Repeater {
    /// Creates a repeater with the given initial delay and repeat interval, in seconds.
    pub fn new(delay: f32, interval: f32) -> Self {
        Self {
            delay,
            interval: interval.max(f32::EPSILON),
            elapsed: 0.0,
            active: false,
            repeating: false,
        }
    }

    /// Advances the timer and returns how many times it fires this frame.
    /// Releasing (`held == false`) resets it so the next hold fires immediately again.
    pub fn update(&mut self, held: bool, dt: f32) -> u32 {
        if !held {
            self.reset();
            return 0;
        }
        if !self.active {
            self.active = true;
            return 1;
        }

        self.elapsed += dt;
        let mut fired = 0;
        loop {
            let threshold = if self.repeating { self.interval } else { self.delay };
            if self.elapsed < threshold {
                break;
            }
            self.elapsed -= threshold;
            self.repeating = true;
            fired += 1;
        }
        fired
    }

    /// Returns `true` while a hold is in progress.
    pub fn is_active(&self) -> bool { self.active }

    /// Stops the timer.
    pub fn reset(&mut self) {
        self.active = false;
        self.repeating = false;
        self.elapsed = 0.0;
    }
}

#[derive(Clone, Debug)]
/// Stays "on" while a condition holds and for `duration` seconds after it stops holding.
pub struct Delay {
    duration: f32,
    elapsed: f32,
}

impl Delay {
    /// Creates an expired delay of the given hold duration.
    pub fn new(duration: f32) -> Self { Self { duration, elapsed: duration } }

    /// Advances the timer; returns `true` while `active` or within the hold window after it.
    pub fn update(&mut self, active: bool, dt: f32) -> bool {
        if active {
            self.elapsed = 0.0;
            return true;
        }
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.elapsed < self.duration
    }

    /// Replaces the hold duration.
    pub fn set_duration(&mut self, duration: f32) { self.duration = duration; }
}

#[derive(Clone, Debug)]
/// Linear `0..=1` ramp with independent rise and fall durations.
pub struct Transition {
    fade_in: f32,
    fade_out: f32,
    value: f32,
}

impl Transition {
    /// Creates a transition resting at zero.
    pub fn new(fade_in: f32, fade_out: f32) -> Self { Self { fade_in, fade_out, value: 0.0 } }

    /// Moves the value toward one while `on`, toward zero otherwise.
    pub fn update(&mut self, on: bool, dt: f32) {
        if on {
            self.value = if self.fade_in <= 0.0 { 1.0 } else { (self.value + dt / self.fade_in).min(1.0) };
        } else {
            self.value = if self.fade_out <= 0.0 { 0.0 } else { (self.value - dt / self.fade_out).max(0.0) };
        }
    }

    /// Replaces both durations.
    pub fn set_durations(&mut self, fade_in: f32, fade_out: f32) {
        self.fade_in = fade_in;
        self.fade_out = fade_out;
    }

    /// Current ramp value.
    pub fn value(&self) -> f32 { self.value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeater_fires_immediately_then_after_delay_then_every_interval() {
        let mut r = Repeater::new(0.5, 0.1);
        assert_eq!(r.update(true, 0.016), 1);
        assert_eq!(r.update(true, 0.25), 0);
        assert_eq!(r.update(true, 0.25), 1);
        assert_eq!(r.update(true, 0.05), 0);
        assert_eq!(r.update(true, 0.05), 1);
        assert_eq!(r.update(true, 0.25), 2);
    }

    #[test]
    fn repeater_restarts_after_release() {
        let mut r = Repeater::new(0.5, 0.1);
        assert_eq!(r.update(true, 0.0), 1);
        assert_eq!(r.update(false, 0.0), 0);
        assert!(!r.is_active());
        assert_eq!(r.update(true, 0.0), 1);
    }

    #[test]
    fn delay_holds_after_activity() {
        let mut d = Delay::new(1.0);
        assert!(!d.update(false, 0.1));
        assert!(d.update(true, 0.1));
        assert!(d.update(false, 0.5));
        assert!(d.update(false, 0.4));
        assert!(!d.update(false, 0.2));
    }

    #[test]
    fn transition_rises_fast_and_falls_slow() {
        let mut t = Transition::new(0.1, 0.4);
        t.update(true, 0.05);
        assert!((t.value() - 0.5).abs() < 1e-5);
        t.update(true, 0.05);
        assert_eq!(t.value(), 1.0);
        t.update(false, 0.1);
        assert!((t.value() - 0.75).abs() < 1e-5);
        t.update(false, 1.0);
        assert_eq!(t.value(), 0.0);
    }
}
