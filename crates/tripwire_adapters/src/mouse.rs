//! Mouse adapters and derived drag tracking
//!
//! Button input is not forwarded verbatim: [`MouseTracker`] drops repeats of
//! the last action seen for a button, ignores input while no world is loaded,
//! and remembers where each held button was pressed so render ticks can
//! report drags. Clicks and drags inside an open screen are separate call
//! sites and can be suppressed.

use crate::adapter::{always_proceed, CallSite, HostAction, Interception};
use crate::config::AdapterConfig;
use crate::host::{screen_ref, HostInput, HostScreen};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::trace;
use tripwire_events::{
    EventBus, EventName, GuiMouseClickPayload, GuiMouseDragPayload, MouseDragPayload,
    MouseInputPayload, MouseScrollPayload, Payload, Verdict,
};

pub const GLFW_RELEASE: i32 = 0;
pub const GLFW_PRESS: i32 = 1;

/// Button number the host uses for "no button".
const NO_BUTTON: i32 = -1;

/// A raw button callback, whatever shape the host passes it in.
pub trait MouseButtonCall {
    fn button(&self) -> i32;
    /// GLFW action code
    fn action(&self) -> i32;
}

fn gui_drag_payload(
    x: f64,
    y: f64,
    dx: f64,
    dy: f64,
    button: i32,
    screen: Option<&dyn HostScreen>,
) -> Option<Payload> {
    // Drags with no open screen go to the world, not a GUI.
    let screen = screen?;
    Some(Payload::GuiMouseDrag(GuiMouseDragPayload {
        dx,
        dy,
        x,
        y,
        button,
        screen: screen_ref(screen),
    }))
}

fn gui_click_payload(
    x: f64,
    y: f64,
    button: i32,
    pressed: bool,
    screen: &dyn HostScreen,
) -> Payload {
    Payload::GuiMouseClick(GuiMouseClickPayload {
        x,
        y,
        button,
        pressed,
        screen: screen_ref(screen),
    })
}

pub mod legacy {
    use super::*;

    /// Press or release the open screen is about to handle.
    pub struct GuiMouseClickSite<'a> {
        pub x: f64,
        pub y: f64,
        pub button: i32,
        /// `false` for a release
        pub pressed: bool,
        pub screen: &'a dyn HostScreen,
    }

    impl CallSite for GuiMouseClickSite<'_> {
        const EVENT: EventName = EventName::GuiMouseClick;

        fn payload(&self) -> Option<Payload> {
            Some(gui_click_payload(
                self.x,
                self.y,
                self.button,
                self.pressed,
                self.screen,
            ))
        }
    }

    pub struct MouseButtonSite {
        pub button: i32,
        pub action: i32,
    }

    impl MouseButtonCall for MouseButtonSite {
        fn button(&self) -> i32 {
            self.button
        }

        fn action(&self) -> i32 {
            self.action
        }
    }

    /// Drag forwarded to the open screen during the mouse tick.
    pub struct GuiMouseDragSite<'a> {
        pub x: f64,
        pub y: f64,
        pub dx: f64,
        pub dy: f64,
        pub active_button: i32,
        pub screen: Option<&'a dyn HostScreen>,
    }

    impl CallSite for GuiMouseDragSite<'_> {
        const EVENT: EventName = EventName::GuiMouseDrag;

        fn payload(&self) -> Option<Payload> {
            gui_drag_payload(self.x, self.y, self.dx, self.dy, self.active_button, self.screen)
        }
    }
}

pub mod modern {
    use super::*;
    use serde::{Deserialize, Serialize};

    /// Button plus modifier bits, as the current host bundles them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MouseInput {
        pub button: i32,
        #[serde(default)]
        pub modifiers: i32,
    }

    /// Cursor position and button, bundled by the current host's screen
    /// callbacks.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct MouseClick {
        pub x: f64,
        pub y: f64,
        pub input: MouseInput,
    }

    pub struct MouseButtonSite {
        pub input: MouseInput,
        pub action: i32,
    }

    pub struct GuiMouseClickSite<'a> {
        pub click: MouseClick,
        pub pressed: bool,
        pub screen: &'a dyn HostScreen,
    }

    impl CallSite for GuiMouseClickSite<'_> {
        const EVENT: EventName = EventName::GuiMouseClick;

        fn payload(&self) -> Option<Payload> {
            Some(gui_click_payload(
                self.click.x,
                self.click.y,
                self.click.input.button,
                self.pressed,
                self.screen,
            ))
        }
    }

    impl MouseButtonCall for MouseButtonSite {
        fn button(&self) -> i32 {
            self.input.button
        }

        fn action(&self) -> i32 {
            self.action
        }
    }

    pub struct GuiMouseDragSite<'a> {
        pub x: f64,
        pub y: f64,
        pub dx: f64,
        pub dy: f64,
        pub active_button: MouseInput,
        pub screen: Option<&'a dyn HostScreen>,
    }

    impl CallSite for GuiMouseDragSite<'_> {
        const EVENT: EventName = EventName::GuiMouseDrag;

        fn payload(&self) -> Option<Payload> {
            gui_drag_payload(
                self.x,
                self.y,
                self.dx,
                self.dy,
                self.active_button.button,
                self.screen,
            )
        }
    }
}

/// Vertical wheel movement. Scrolling cannot be suppressed.
pub struct RawMouseScrollSite<'a> {
    pub input: &'a dyn HostInput,
    pub horizontal: f64,
    pub vertical: f64,
}

impl CallSite for RawMouseScrollSite<'_> {
    const EVENT: EventName = EventName::RawMouseScroll;

    fn payload(&self) -> Option<Payload> {
        let (x, y) = self.input.cursor();
        Some(Payload::MouseScroll(MouseScrollPayload {
            x,
            y,
            delta: self.vertical,
        }))
    }

    fn enact(&self, verdict: Verdict) -> HostAction {
        always_proceed(&verdict)
    }
}

#[derive(Debug, Default)]
struct TrackerState {
    /// Last GLFW action seen per button
    actions: HashMap<i32, i32>,
    /// Last known cursor position per held button
    drag_origins: BTreeMap<i32, (f64, f64)>,
}

/// Button and drag state shared by the input and render threads.
#[derive(Debug)]
pub struct MouseTracker {
    config: AdapterConfig,
    state: Mutex<TrackerState>,
}

impl MouseTracker {
    pub fn new(config: AdapterConfig) -> Self {
        Self {
            config,
            state: Mutex::new(TrackerState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Handles a raw button callback, firing `raw_mouse_input` when the
    /// button's action actually changed.
    pub fn on_button<C: MouseButtonCall>(
        &self,
        bus: &EventBus,
        input: &dyn HostInput,
        call: &C,
    ) -> Interception {
        let skipped = Interception {
            event: EventName::RawMouseInput,
            dispatched: false,
            action: HostAction::Proceed,
        };

        let (button, action) = (call.button(), call.action());
        let (x, y) = {
            let mut state = self.state();
            if !input.world_loaded() {
                state.actions.clear();
                state.drag_origins.clear();
                return skipped;
            }
            if button == NO_BUTTON || state.actions.get(&button) == Some(&action) {
                return skipped;
            }

            let cursor = input.cursor();
            state.actions.insert(button, action);
            if action == GLFW_PRESS {
                state.drag_origins.insert(button, cursor);
            } else {
                state.drag_origins.remove(&button);
            }
            cursor
        };

        let payload = Payload::MouseInput(MouseInputPayload {
            x,
            y,
            button,
            pressed: action == GLFW_PRESS,
        });
        let verdict = bus.fire(EventName::RawMouseInput, &payload);
        Interception {
            event: EventName::RawMouseInput,
            dispatched: true,
            action: always_proceed(&verdict),
        }
    }

    /// Fires `mouse_dragged` for every held button whose cursor position
    /// changed since the last tick. Returns how many events fired.
    pub fn on_render_tick(&self, bus: &EventBus, input: &dyn HostInput) -> usize {
        if !self.config.track_mouse_drag || !input.world_loaded() {
            return 0;
        }

        let (x, y) = input.cursor();
        let drags: Vec<_> = {
            let mut state = self.state();
            (0..i32::from(self.config.drag_buttons))
                .filter_map(|button| {
                    let origin = state.drag_origins.get_mut(&button)?;
                    if *origin == (x, y) {
                        return None;
                    }
                    let (dx, dy) = (x - origin.0, y - origin.1);
                    *origin = (x, y);
                    Some(MouseDragPayload { dx, dy, x, y, button })
                })
                .collect()
        };

        for drag in &drags {
            trace!(button = drag.button, dx = drag.dx, dy = drag.dy, "Mouse dragged");
            bus.fire(EventName::MouseDragged, &Payload::MouseDrag(drag.clone()));
        }
        drags.len()
    }

    /// Forgets all button and drag state.
    pub fn reset(&self) {
        let mut state = self.state();
        state.actions.clear();
        state.drag_origins.clear();
    }

    /// Buttons currently held, in ascending order.
    pub fn held_buttons(&self) -> Vec<i32> {
        self.state().drag_origins.keys().copied().collect()
    }
}

impl Default for MouseTracker {
    fn default() -> Self {
        Self::new(AdapterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::intercept;
    use crate::record::{RecordedInput, RecordedScreen};
    use std::sync::Arc;
    use tripwire_events::{FnListener, ScreenRef};

    fn recording_bus(event: EventName) -> (EventBus, Arc<Mutex<Vec<Payload>>>) {
        let bus = EventBus::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = seen.clone();
        bus.register(
            event,
            Arc::new(FnListener::new("record", move |payload, _| {
                recorder.lock().unwrap().push(payload.clone());
                Ok(())
            })),
        );
        (bus, seen)
    }

    fn at(x: f64, y: f64) -> RecordedInput {
        RecordedInput {
            world_loaded: true,
            cursor: (x, y),
        }
    }

    fn press(button: i32) -> legacy::MouseButtonSite {
        legacy::MouseButtonSite {
            button,
            action: GLFW_PRESS,
        }
    }

    fn release(button: i32) -> legacy::MouseButtonSite {
        legacy::MouseButtonSite {
            button,
            action: GLFW_RELEASE,
        }
    }

    #[test]
    fn repeated_actions_fire_once() {
        let (bus, seen) = recording_bus(EventName::RawMouseInput);
        let tracker = MouseTracker::default();

        assert!(tracker.on_button(&bus, &at(5.0, 6.0), &press(0)).dispatched);
        assert!(!tracker.on_button(&bus, &at(5.0, 6.0), &press(0)).dispatched);
        assert!(tracker.on_button(&bus, &at(5.0, 6.0), &release(0)).dispatched);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(
            seen[0],
            Payload::MouseInput(MouseInputPayload {
                x: 5.0,
                y: 6.0,
                button: 0,
                pressed: true,
            })
        );
    }

    #[test]
    fn no_button_is_ignored() {
        let (bus, seen) = recording_bus(EventName::RawMouseInput);
        let tracker = MouseTracker::default();

        tracker.on_button(&bus, &at(0.0, 0.0), &press(NO_BUTTON));
        assert!(seen.lock().unwrap().is_empty());
        assert!(tracker.held_buttons().is_empty());
    }

    #[test]
    fn unloaded_world_clears_state() {
        let (bus, seen) = recording_bus(EventName::RawMouseInput);
        let tracker = MouseTracker::default();
        tracker.on_button(&bus, &at(0.0, 0.0), &press(1));
        assert_eq!(tracker.held_buttons(), [1]);

        let menu = RecordedInput {
            world_loaded: false,
            cursor: (0.0, 0.0),
        };
        assert!(!tracker.on_button(&bus, &menu, &release(1)).dispatched);
        assert!(tracker.held_buttons().is_empty());

        // The cleared action means the same press fires again.
        assert!(tracker.on_button(&bus, &at(0.0, 0.0), &press(1)).dispatched);
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn held_button_reports_drag_deltas() {
        let (bus, seen) = recording_bus(EventName::MouseDragged);
        let tracker = MouseTracker::default();

        tracker.on_button(&bus, &at(10.0, 10.0), &press(0));
        assert_eq!(tracker.on_render_tick(&bus, &at(10.0, 10.0)), 0);
        assert_eq!(tracker.on_render_tick(&bus, &at(13.0, 8.0)), 1);
        assert_eq!(tracker.on_render_tick(&bus, &at(14.0, 8.0)), 1);

        tracker.on_button(&bus, &at(14.0, 8.0), &release(0));
        assert_eq!(tracker.on_render_tick(&bus, &at(20.0, 20.0)), 0);

        let seen = seen.lock().unwrap();
        assert_eq!(
            seen.as_slice(),
            [
                Payload::MouseDrag(MouseDragPayload {
                    dx: 3.0,
                    dy: -2.0,
                    x: 13.0,
                    y: 8.0,
                    button: 0,
                }),
                Payload::MouseDrag(MouseDragPayload {
                    dx: 1.0,
                    dy: 0.0,
                    x: 14.0,
                    y: 8.0,
                    button: 0,
                }),
            ]
        );
    }

    #[test]
    fn drag_tracking_can_be_disabled() {
        let bus = EventBus::default();
        let tracker = MouseTracker::new(AdapterConfig {
            track_mouse_drag: false,
            ..Default::default()
        });

        tracker.on_button(&bus, &at(0.0, 0.0), &press(0));
        assert_eq!(tracker.on_render_tick(&bus, &at(5.0, 5.0)), 0);
    }

    #[test]
    fn modern_button_input_unwraps_button() {
        let (bus, seen) = recording_bus(EventName::RawMouseInput);
        let tracker = MouseTracker::default();
        let call = modern::MouseButtonSite {
            input: modern::MouseInput {
                button: 2,
                modifiers: 0,
            },
            action: GLFW_PRESS,
        };

        tracker.on_button(&bus, &at(1.0, 1.0), &call);
        match &seen.lock().unwrap()[0] {
            Payload::MouseInput(input) => assert_eq!(input.button, 2),
            other => panic!("unexpected payload {other:?}"),
        };
    }

    #[test]
    fn scroll_carries_cursor_and_vertical_delta() {
        let (bus, seen) = recording_bus(EventName::RawMouseScroll);
        let input = at(100.0, 50.0);

        let outcome = intercept(
            &bus,
            &RawMouseScrollSite {
                input: &input,
                horizontal: 0.0,
                vertical: 1.5,
            },
        );

        assert_eq!(outcome.action, HostAction::Proceed);
        assert_eq!(
            seen.lock().unwrap()[0],
            Payload::MouseScroll(MouseScrollPayload {
                x: 100.0,
                y: 50.0,
                delta: 1.5,
            })
        );
    }

    #[test]
    fn cancelled_gui_click_is_suppressed() {
        let (bus, seen) = recording_bus(EventName::GuiMouseClick);
        bus.register(
            EventName::GuiMouseClick,
            Arc::new(FnListener::new("no_right_click", |payload, verdict| {
                if let Payload::GuiMouseClick(click) = payload {
                    if click.button == 1 {
                        verdict.cancel();
                    }
                }
                Ok(())
            })),
        );
        let screen = RecordedScreen {
            kind: "GenericContainerScreen".into(),
        };

        let left = intercept(
            &bus,
            &legacy::GuiMouseClickSite {
                x: 20.0,
                y: 30.0,
                button: 0,
                pressed: true,
                screen: &screen,
            },
        );
        let right_release = intercept(
            &bus,
            &modern::GuiMouseClickSite {
                click: modern::MouseClick {
                    x: 20.0,
                    y: 30.0,
                    input: modern::MouseInput {
                        button: 1,
                        modifiers: 0,
                    },
                },
                pressed: false,
                screen: &screen,
            },
        );

        assert_eq!(left.action, HostAction::Proceed);
        assert_eq!(right_release.action, HostAction::Suppress);
        assert_eq!(
            seen.lock().unwrap()[1],
            Payload::GuiMouseClick(GuiMouseClickPayload {
                x: 20.0,
                y: 30.0,
                button: 1,
                pressed: false,
                screen: ScreenRef {
                    kind: "GenericContainerScreen".into(),
                },
            })
        );
    }

    #[test]
    fn gui_drag_requires_open_screen() {
        let bus = EventBus::default();
        bus.register(
            EventName::GuiMouseDrag,
            Arc::new(FnListener::new("block_drag", |_, verdict| {
                verdict.cancel();
                Ok(())
            })),
        );
        let screen = RecordedScreen {
            kind: "InventoryScreen".into(),
        };

        let no_screen = intercept(
            &bus,
            &legacy::GuiMouseDragSite {
                x: 1.0,
                y: 1.0,
                dx: 0.5,
                dy: 0.5,
                active_button: 0,
                screen: None,
            },
        );
        assert!(!no_screen.dispatched);

        let with_screen = intercept(
            &bus,
            &modern::GuiMouseDragSite {
                x: 1.0,
                y: 1.0,
                dx: 0.5,
                dy: 0.5,
                active_button: modern::MouseInput {
                    button: 0,
                    modifiers: 0,
                },
                screen: Some(&screen),
            },
        );
        assert_eq!(with_screen.action, HostAction::Suppress);
    }
}
