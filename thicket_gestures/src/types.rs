// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture kinds, recognizer effects, timer tokens, and configuration.

use smallvec::SmallVec;

/// A semantic gesture derived from a press-to-release interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// A short press and release with no movement.
    Tap,
    /// A second tap landing inside the double-tap window of the previous one.
    DoubleTap,
    /// A press held past the long-tap delay without movement or release.
    LongTap,
    /// A press-move-release whose displacement exceeds the swipe length.
    ///
    /// Always followed by a [`Gesture::SwipeDirected`] for the same session.
    Swipe,
    /// The direction-qualified companion of [`Gesture::Swipe`].
    SwipeDirected(SwipeDirection),
}

impl Gesture {
    /// The event-kind string used when this gesture re-enters a string-keyed
    /// dispatch path.
    pub fn kind(self) -> &'static str {
        match self {
            Self::Tap => "tap",
            Self::DoubleTap => "dbltap",
            Self::LongTap => "longtap",
            Self::Swipe => "swipe",
            Self::SwipeDirected(SwipeDirection::Left) => "swipeleft",
            Self::SwipeDirected(SwipeDirection::Right) => "swiperight",
            Self::SwipeDirected(SwipeDirection::Up) => "swipeup",
            Self::SwipeDirected(SwipeDirection::Down) => "swipedown",
        }
    }
}

/// Resolved swipe direction along the dominant displacement axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    /// Dominant horizontal displacement toward negative x.
    Left,
    /// Dominant horizontal displacement toward positive x.
    Right,
    /// Dominant vertical displacement toward negative y.
    Up,
    /// Dominant vertical displacement toward positive y.
    Down,
}

/// A gesture emission carrying the element resolved at press time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GestureEvent<K> {
    /// The classified gesture.
    pub gesture: Gesture,
    /// The anchor element the gesture fires on.
    pub target: K,
}

/// Which of the session's timers a token refers to.
///
/// At most one of each is outstanding at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Fires `longtap` if the press is still held and unmoved.
    LongTap,
    /// One-tick deferral before swipe emission, so a competing scroll signal
    /// can preempt it.
    SwipeSettle,
    /// One-tick deferral before arming the single-tap delay.
    TapSettle,
    /// The single-tap delay proper; fires `tap` unless suppressed.
    SingleTap,
}

/// A scheduled-timer handle carrying the session generation that issued it.
///
/// The recognizer ignores tokens whose generation no longer matches the live
/// session, so firing a stale timer — or cancelling one that already fired —
/// is a no-op rather than an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerToken {
    pub(crate) generation: u64,
    /// The timer slot this token was issued for.
    pub kind: TimerKind,
}

/// An action the host must carry out on the recognizer's behalf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect<K> {
    /// Schedule a timer; call [`Recognizer::on_timer`](crate::Recognizer::on_timer)
    /// with `token` after `delay_ms` milliseconds. A zero delay still runs
    /// after the current synchronous turn completes.
    Schedule {
        /// The token to hand back when the timer fires.
        token: TimerToken,
        /// Delay in milliseconds.
        delay_ms: u64,
    },
    /// Cancel a previously scheduled timer. Best effort: the generation guard
    /// already makes a late firing harmless.
    CancelTimer(TimerToken),
    /// Deliver a gesture occurrence to its target.
    Emit(GestureEvent<K>),
}

/// Effects returned by one recognizer transition.
pub type Effects<K> = SmallVec<[Effect<K>; 4]>;

/// Policy for a press landing on a disabled control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisabledPress {
    /// Start a session normally; gestures fire on the disabled element.
    #[default]
    Track,
    /// Ignore the press entirely; no session starts.
    Ignore,
}

/// Thresholds and policies for gesture classification.
///
/// [`GestureConfig::default`] suits mouse/pointer environments;
/// [`GestureConfig::touch`] adjusts the single-tap delay for touch-oriented
/// user agents. The environment probe only ever selects between presets — it
/// never branches classification logic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Hold duration before `longtap` fires, in milliseconds.
    pub long_tap_delay_ms: u64,
    /// Delay between release and `tap` emission, in milliseconds.
    pub single_tap_delay_ms: u64,
    /// Press-to-press window for double-tap detection, in milliseconds.
    /// Inclusive upper bound; a non-positive delta never qualifies.
    pub double_tap_window_ms: u64,
    /// Displacement on the dominant axis that turns a release into a swipe.
    /// Exclusive lower bound. Sensible values are 20–50 pixels.
    pub swipe_length: f64,
    /// What to do when a press lands on a disabled control.
    pub disabled_press: DisabledPress,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            long_tap_delay_ms: 750,
            single_tap_delay_ms: 150,
            double_tap_window_ms: 250,
            swipe_length: 50.0,
            disabled_press: DisabledPress::Track,
        }
    }
}

impl GestureConfig {
    /// Defaults for touch-oriented user agents: a longer single-tap delay.
    pub fn touch() -> Self {
        Self {
            single_tap_delay_ms: 200,
            ..Self::default()
        }
    }
}
