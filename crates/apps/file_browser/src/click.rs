//! Single-click versus double-click disambiguation.
//!
//! Browsers deliver `click`, `click`, `dblclick` for a double click. A single click therefore only
//! fires once its delay elapses without a double click arriving in between.

use std::time::Duration;

use leptos::ev::MouseEvent;
use leptos::leptos_dom::helpers::TimeoutHandle;
use leptos::*;

/// Delay used when the caller does not configure one.
pub const DEFAULT_CLICK_DELAY: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Timer-free core of the click disambiguation.
///
/// Each click hands out a token for the timer the caller arms. Only the timer carrying the most
/// recent token may fire the single action, so a stale timer that could not be cleared is inert.
pub struct ClickDisambiguator {
    next_token: u64,
    pending: Option<u64>,
}

impl ClickDisambiguator {
    /// Records a click and returns the token for the timer that should be (re)armed.
    pub fn click(&mut self) -> u64 {
        self.next_token = self.next_token.wrapping_add(1);
        self.pending = Some(self.next_token);
        self.next_token
    }

    /// Records a double click, cancelling any pending single click.
    pub fn double_click(&mut self) {
        self.pending = None;
    }

    /// Reports a timer expiry. Returns `true` when the single action should fire.
    pub fn elapsed(&mut self, token: u64) -> bool {
        if self.pending == Some(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Returns `true` while a single click is waiting on its timer.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[derive(Clone, Copy)]
/// DOM handlers returned by [`use_single_and_double_click`].
pub struct ClickHandlers {
    /// Bind to `on:click`.
    pub on_click: Callback<MouseEvent>,
    /// Bind to `on:dblclick`.
    pub on_double_click: Callback<MouseEvent>,
}

/// Builds click handlers that fire `on_single` after `delay` unless a double click arrives first,
/// in which case only `on_double` fires.
///
/// Both handlers stop propagation so containers never see the clicks they resolve.
pub fn use_single_and_double_click(
    delay: Duration,
    on_single: Callback<()>,
    on_double: Callback<()>,
) -> ClickHandlers {
    let machine = store_value(ClickDisambiguator::default());
    let timer = store_value(None::<TimeoutHandle>);

    let cancel_timer = move || {
        if let Some(Some(handle)) = timer.try_update_value(Option::take) {
            handle.clear();
        }
    };

    let on_click = Callback::new(move |ev: MouseEvent| {
        ev.stop_propagation();
        cancel_timer();
        let mut token = 0;
        machine.update_value(|machine| token = machine.click());

        let fire_single = move || {
            let mut fire = false;
            machine.update_value(|machine| fire = machine.elapsed(token));
            if fire {
                on_single.call(());
            }
        };

        match set_timeout_with_handle(fire_single, delay) {
            Ok(handle) => timer.set_value(Some(handle)),
            Err(err) => {
                logging::warn!("click timer unavailable, firing single click now: {err:?}");
                fire_single();
            }
        }
    });

    let on_double_click = Callback::new(move |ev: MouseEvent| {
        ev.stop_propagation();
        cancel_timer();
        machine.update_value(ClickDisambiguator::double_click);
        on_double.call(());
    });

    on_cleanup(cancel_timer);

    ClickHandlers {
        on_click,
        on_double_click,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_click_fires_when_its_timer_elapses() {
        let mut machine = ClickDisambiguator::default();
        let token = machine.click();
        assert!(machine.is_pending());
        assert!(machine.elapsed(token));
        assert!(!machine.is_pending());
        assert!(!machine.elapsed(token));
    }

    #[test]
    fn double_click_suppresses_both_pending_singles() {
        let mut machine = ClickDisambiguator::default();
        let first = machine.click();
        let second = machine.click();
        machine.double_click();

        assert!(!machine.elapsed(first));
        assert!(!machine.elapsed(second));
    }

    #[test]
    fn browser_double_click_sequence_opens_without_selecting() {
        let mut machine = ClickDisambiguator::default();
        let mut singles = 0;
        let mut timers = Vec::new();

        timers.push(machine.click());
        timers.push(machine.click());
        machine.double_click();
        for token in timers {
            if machine.elapsed(token) {
                singles += 1;
            }
        }

        assert_eq!(singles, 0);
        assert!(!machine.is_pending());
    }

    #[test]
    fn rearming_invalidates_the_earlier_timer() {
        let mut machine = ClickDisambiguator::default();
        let first = machine.click();
        let second = machine.click();

        assert!(!machine.elapsed(first));
        assert!(machine.is_pending());
        assert!(machine.elapsed(second));
    }
}
