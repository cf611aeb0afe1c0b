//! Linear parameter ramping with a lock-free control-thread slot.
//!
//! A [`ParameterRamper`] owns the value the audio thread reads every sample.
//! Control threads never touch that value directly: they write a "UI value"
//! through a [`RamperHandle`], which bumps a change counter. On the next
//! [`dezipper_check`](ParameterRamper::dezipper_check) the audio thread sees
//! the counter moved and starts a short ramp toward the new value.
//!
//! Host automation bypasses the UI slot and calls
//! [`start_ramp`](ParameterRamper::start_ramp) with an explicit duration.
//!
//! ## Usage
//!
//! ```rust
//! use shelf_core::ParameterRamper;
//!
//! let mut cutoff = ParameterRamper::new(1000.0);
//! cutoff.start_ramp(2000.0, 4);
//!
//! let values: Vec<f32> = (0..6).map(|_| cutoff.get_and_step()).collect();
//! assert_eq!(values, [1000.0, 1250.0, 1500.0, 1750.0, 2000.0, 2000.0]);
//! ```

use alloc::sync::Arc;
use core::sync::atomic::{AtomicU32, Ordering};

/// Shared slot written by control threads.
#[derive(Debug)]
struct UiSlot {
    /// `f32` bits of the latest UI value.
    value: AtomicU32,
    /// Incremented on every UI write.
    change_counter: AtomicU32,
}

impl UiSlot {
    fn new(value: f32) -> Self {
        Self {
            value: AtomicU32::new(value.to_bits()),
            change_counter: AtomicU32::new(0),
        }
    }

    #[inline]
    fn load(&self) -> f32 {
        f32::from_bits(self.value.load(Ordering::Relaxed))
    }

    #[inline]
    fn store(&self, value: f32) {
        self.value.store(value.to_bits(), Ordering::Relaxed);
    }

    #[inline]
    fn publish(&self, value: f32) {
        self.store(value);
        // Release pairs with the Acquire in `dezipper_check` so the value
        // store is visible once the new counter is.
        self.change_counter.fetch_add(1, Ordering::Release);
    }
}

/// Control-thread view of a ramper's UI slot.
///
/// Cheap to clone, `Send + Sync`. Writes are lock-free and never block the
/// audio thread.
#[derive(Debug, Clone)]
pub struct RamperHandle {
    slot: Arc<UiSlot>,
}

impl RamperHandle {
    /// Publishes a new UI value. The audio thread ramps to it on its next
    /// dezipper check.
    #[inline]
    pub fn set(&self, value: f32) {
        self.slot.publish(value);
    }

    /// Latest UI value.
    #[inline]
    pub fn get(&self) -> f32 {
        self.slot.load()
    }
}

/// A parameter that moves linearly between goals.
///
/// The current value is evaluated as a line equation,
/// `inverse_slope * samples_remaining + goal`, rather than by accumulating
/// increments, so long ramps land exactly on the goal at the right sample.
#[derive(Debug)]
pub struct ParameterRamper {
    slot: Arc<UiSlot>,
    goal: f32,
    /// (start - goal) / duration; zero when not ramping.
    inverse_slope: f32,
    samples_remaining: u32,
    /// Change counter value at the last dezipper check.
    update_counter: u32,
}

impl ParameterRamper {
    /// Creates a ramper resting at `value`.
    pub fn new(value: f32) -> Self {
        Self {
            slot: Arc::new(UiSlot::new(value)),
            goal: value,
            inverse_slope: 0.0,
            samples_remaining: 0,
            update_counter: 0,
        }
    }

    /// Returns a handle for writing UI values from another thread.
    pub fn handle(&self) -> RamperHandle {
        RamperHandle {
            slot: Arc::clone(&self.slot),
        }
    }

    /// Snaps to the current UI value, cancelling any ramp.
    pub fn init(&mut self) {
        self.set_immediate(self.slot.load());
    }

    /// Forgets pending UI changes by zeroing both change counters.
    pub fn reset(&mut self) {
        self.slot.change_counter.store(0, Ordering::Relaxed);
        self.update_counter = 0;
    }

    /// Jumps to `value` with no ramp. Updates the UI value too.
    ///
    /// Call from the audio thread or while the node is not rendering.
    pub fn set_immediate(&mut self, value: f32) {
        self.slot.store(value);
        self.goal = value;
        self.inverse_slope = 0.0;
        self.samples_remaining = 0;
    }

    /// Publishes a UI value; see [`RamperHandle::set`].
    #[inline]
    pub fn set_ui_value(&self, value: f32) {
        self.slot.publish(value);
    }

    /// Latest UI value.
    #[inline]
    pub fn ui_value(&self) -> f32 {
        self.slot.load()
    }

    /// Starts a ramp to the UI value if it changed since the last check.
    #[inline]
    pub fn dezipper_check(&mut self, ramp_frames: u32) {
        let snapshot = self.slot.change_counter.load(Ordering::Acquire);
        if snapshot != self.update_counter {
            self.update_counter = snapshot;
            self.start_ramp(self.slot.load(), ramp_frames);
        }
    }

    /// Ramps linearly from the current value to `goal` over `frames` samples.
    ///
    /// `frames == 0` is equivalent to [`set_immediate`](Self::set_immediate).
    pub fn start_ramp(&mut self, goal: f32, frames: u32) {
        if frames == 0 {
            self.set_immediate(goal);
        } else {
            self.inverse_slope = (self.get() - goal) / frames as f32;
            self.samples_remaining = frames;
            self.goal = goal;
            self.slot.store(goal);
        }
    }

    /// Current value without advancing.
    #[inline]
    pub fn get(&self) -> f32 {
        self.inverse_slope * self.samples_remaining as f32 + self.goal
    }

    /// Advances one sample.
    #[inline]
    pub fn step(&mut self) {
        if self.samples_remaining != 0 {
            self.samples_remaining -= 1;
        }
    }

    /// Returns the current value, then advances one sample.
    #[inline]
    pub fn get_and_step(&mut self) -> f32 {
        if self.samples_remaining != 0 {
            let value = self.get();
            self.samples_remaining -= 1;
            value
        } else {
            self.goal
        }
    }

    /// Value the ramper is heading to (or resting at).
    #[inline]
    pub fn goal(&self) -> f32 {
        self.goal
    }

    /// Samples left in the current ramp.
    #[inline]
    pub fn remaining(&self) -> u32 {
        self.samples_remaining
    }

    /// True while a ramp is in progress.
    #[inline]
    pub fn is_ramping(&self) -> bool {
        self.samples_remaining != 0
    }
}

impl Default for ParameterRamper {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resting_ramper_returns_goal() {
        let mut ramper = ParameterRamper::new(0.707);
        for _ in 0..10 {
            assert_eq!(ramper.get_and_step(), 0.707);
        }
        assert!(!ramper.is_ramping());
    }

    #[test]
    fn ramp_lands_on_goal_after_exact_duration() {
        let mut ramper = ParameterRamper::new(0.0);
        ramper.start_ramp(1.0, 480);

        let mut last = 0.0;
        for i in 0..480 {
            let v = ramper.get_and_step();
            assert!(v >= last, "ramp not monotonic at {i}");
            assert!(v < 1.0, "reached goal early at {i}");
            last = v;
        }
        assert!(!ramper.is_ramping());
        assert_eq!(ramper.get_and_step(), 1.0);
    }

    #[test]
    fn ramp_starts_from_current_value() {
        let mut ramper = ParameterRamper::new(100.0);
        ramper.start_ramp(200.0, 10);
        for _ in 0..5 {
            ramper.get_and_step();
        }
        // Mid-ramp retarget continues from 150.
        ramper.start_ramp(0.0, 3);
        assert_eq!(ramper.get_and_step(), 150.0);
        assert_eq!(ramper.get_and_step(), 100.0);
        assert_eq!(ramper.get_and_step(), 50.0);
        assert_eq!(ramper.get_and_step(), 0.0);
    }

    #[test]
    fn zero_duration_ramp_is_immediate() {
        let mut ramper = ParameterRamper::new(1.0);
        ramper.start_ramp(5.0, 0);
        assert_eq!(ramper.get(), 5.0);
        assert_eq!(ramper.ui_value(), 5.0);
        assert!(!ramper.is_ramping());
    }

    #[test]
    fn start_ramp_updates_ui_value() {
        let mut ramper = ParameterRamper::new(1.0);
        ramper.start_ramp(3.0, 100);
        assert_eq!(ramper.ui_value(), 3.0);
        assert_eq!(ramper.goal(), 3.0);
        assert_eq!(ramper.remaining(), 100);
    }

    #[test]
    fn ui_value_is_ignored_until_dezipper_check() {
        let mut ramper = ParameterRamper::new(1.0);
        ramper.set_ui_value(2.0);
        assert_eq!(ramper.ui_value(), 2.0);
        assert_eq!(ramper.get_and_step(), 1.0);

        ramper.dezipper_check(2);
        assert!(ramper.is_ramping());
        assert_eq!(ramper.get_and_step(), 1.0);
        assert_eq!(ramper.get_and_step(), 1.5);
        assert_eq!(ramper.get_and_step(), 2.0);
    }

    #[test]
    fn dezipper_check_without_change_is_noop() {
        let mut ramper = ParameterRamper::new(1.0);
        ramper.dezipper_check(100);
        assert!(!ramper.is_ramping());

        ramper.set_ui_value(2.0);
        ramper.dezipper_check(0);
        assert_eq!(ramper.get(), 2.0);

        // Counter already consumed.
        ramper.dezipper_check(100);
        assert!(!ramper.is_ramping());
    }

    #[test]
    fn reset_drops_pending_ui_change() {
        let mut ramper = ParameterRamper::new(1.0);
        ramper.set_ui_value(4.0);
        ramper.reset();
        ramper.dezipper_check(0);
        assert_eq!(ramper.get(), 1.0);
    }

    #[test]
    fn init_snaps_to_ui_value() {
        let mut ramper = ParameterRamper::new(1.0);
        ramper.set_ui_value(7.0);
        ramper.init();
        assert_eq!(ramper.get(), 7.0);
        assert!(!ramper.is_ramping());
    }

    #[test]
    fn set_immediate_cancels_ramp() {
        let mut ramper = ParameterRamper::new(0.0);
        ramper.start_ramp(1.0, 1000);
        ramper.get_and_step();
        ramper.set_immediate(0.25);
        assert!(!ramper.is_ramping());
        assert_eq!(ramper.get_and_step(), 0.25);
        assert_eq!(ramper.ui_value(), 0.25);
    }

    #[test]
    fn step_without_ramp_is_harmless() {
        let mut ramper = ParameterRamper::new(3.0);
        ramper.step();
        assert_eq!(ramper.get(), 3.0);
    }

    #[test]
    fn handle_writes_from_another_thread() {
        let mut ramper = ParameterRamper::new(0.0);
        let handle = ramper.handle();

        std::thread::spawn(move || handle.set(0.5))
            .join()
            .expect("writer thread panicked");

        ramper.dezipper_check(0);
        assert_eq!(ramper.get(), 0.5);
    }

    #[test]
    fn handle_reads_ui_value() {
        let mut ramper = ParameterRamper::new(0.0);
        let handle = ramper.handle();
        ramper.set_immediate(9.0);
        assert_eq!(handle.get(), 9.0);
    }
}
