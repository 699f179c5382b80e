//! Trace replay
//!
//! Feeds recorded call sites (one JSON object per line) through the adapters
//! of the active host variant, exactly as the host glue would, and reports
//! what each call did.

use crate::config::AppConfig;
use crate::error::ReplayError;
use crate::session::ScriptSession;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::{info, warn};
use tripwire_adapters::record::{
    RecordedBlockEntity, RecordedEntity, RecordedInput, RecordedPacket, RecordedScreen,
    RecordedSound,
};
use tripwire_adapters::{
    active, intercept, BlockOutlineSite, HostAction, Interception, MouseTracker, NetworkSide,
    PacketReceiveSite, PacketSendSite, RawMouseScrollSite, WorldRenderLastSite,
};
use tripwire_events::{BlockPos, EventName, FnListener, Transform};

/// One recorded host call site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "site", rename_all = "snake_case")]
pub enum TraceRecord {
    PacketReceived {
        side: NetworkSide,
        packet: RecordedPacket,
    },
    PacketSent {
        packet: RecordedPacket,
    },
    RenderEntity {
        #[serde(default)]
        entity: Option<RecordedEntity>,
        tick_delta: f32,
        #[serde(default)]
        transform: Transform,
    },
    RenderBlockEntity {
        #[serde(default)]
        block_entity: Option<RecordedBlockEntity>,
        tick_delta: f32,
        #[serde(default)]
        transform: Transform,
    },
    WorldRenderStart {
        tick_delta: f32,
    },
    WorldRenderLast,
    BlockOutline {
        pos: BlockPos,
    },
    MouseButton {
        input: RecordedInput,
        button: i32,
        action: i32,
    },
    MouseScroll {
        input: RecordedInput,
        #[serde(default)]
        horizontal: f64,
        vertical: f64,
    },
    GuiMouseDrag {
        x: f64,
        y: f64,
        dx: f64,
        dy: f64,
        button: i32,
        #[serde(default)]
        screen: Option<RecordedScreen>,
    },
    GuiMouseClick {
        x: f64,
        y: f64,
        button: i32,
        pressed: bool,
        screen: RecordedScreen,
    },
    RenderTick {
        input: RecordedInput,
    },
    SoundPlay {
        sound: RecordedSound,
    },
}

/// Summary of one replayed call site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayLine {
    /// 1-based line number in the trace
    pub line: usize,
    pub event: EventName,
    /// Events fired for this call; 0 when the call was filtered
    pub fired: usize,
    pub action: HostAction,
}

impl fmt::Display for ReplayLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = if self.fired == 0 {
            "filtered".to_string()
        } else {
            format!("fired x{}", self.fired)
        };
        let action = match &self.action {
            HostAction::Proceed => "proceed".to_string(),
            HostAction::Suppress => "suppress".to_string(),
            HostAction::Return(value) => format!("return {value:?}"),
        };
        write!(
            f,
            "{:>5}  {:<22} {:<10} {}",
            self.line,
            self.event.as_str(),
            outcome,
            action
        )
    }
}

/// Totals for a whole trace.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaySummary {
    pub calls: usize,
    pub dispatched: usize,
    pub suppressed: usize,
    pub malformed: usize,
}

/// Replays call sites against one script session.
pub struct Replayer {
    session: ScriptSession,
    tracker: MouseTracker,
}

impl Replayer {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_session(ScriptSession::new(config.bus.clone()), config)
    }

    pub fn with_session(session: ScriptSession, config: &AppConfig) -> Self {
        Self {
            session,
            tracker: MouseTracker::new(config.adapters.clone()),
        }
    }

    pub fn session(&self) -> &ScriptSession {
        &self.session
    }

    /// Registers a listener on every event that logs each payload it sees.
    pub fn watch_all_events(&self) {
        for event in EventName::ALL {
            self.session.register(
                "replay",
                event,
                Arc::new(FnListener::new("trace_logger", |payload, verdict| {
                    info!(event = %verdict.event(), "📥 {:?}", payload);
                    Ok(())
                })),
            );
        }
    }

    /// Runs one recorded call site through its adapter.
    pub fn replay(&self, record: &TraceRecord) -> Interception {
        let bus = self.session.bus().as_ref();
        match record {
            TraceRecord::PacketReceived { side, packet } => intercept(
                bus,
                &PacketReceiveSite {
                    side: *side,
                    packet,
                },
            ),
            TraceRecord::PacketSent { packet } => intercept(bus, &PacketSendSite { packet }),
            TraceRecord::RenderEntity {
                entity,
                tick_delta,
                transform,
            } => self.render_entity(entity.as_ref(), *tick_delta, *transform),
            TraceRecord::RenderBlockEntity {
                block_entity,
                tick_delta,
                transform,
            } => self.render_block_entity(block_entity.as_ref(), *tick_delta, *transform),
            TraceRecord::WorldRenderStart { tick_delta } => self.world_render_start(*tick_delta),
            TraceRecord::WorldRenderLast => intercept(bus, &WorldRenderLastSite),
            TraceRecord::BlockOutline { pos } => intercept(bus, &BlockOutlineSite { pos: *pos }),
            TraceRecord::MouseButton {
                input,
                button,
                action,
            } => self.mouse_button(input, *button, *action),
            TraceRecord::MouseScroll {
                input,
                horizontal,
                vertical,
            } => intercept(
                bus,
                &RawMouseScrollSite {
                    input,
                    horizontal: *horizontal,
                    vertical: *vertical,
                },
            ),
            TraceRecord::GuiMouseDrag {
                x,
                y,
                dx,
                dy,
                button,
                screen,
            } => self.gui_mouse_drag(*x, *y, *dx, *dy, *button, screen.as_ref()),
            TraceRecord::GuiMouseClick {
                x,
                y,
                button,
                pressed,
                screen,
            } => self.gui_mouse_click(*x, *y, *button, *pressed, screen),
            TraceRecord::RenderTick { input } => {
                let fired = self.tracker.on_render_tick(bus, input);
                Interception {
                    event: EventName::MouseDragged,
                    dispatched: fired > 0,
                    action: HostAction::Proceed,
                }
            }
            TraceRecord::SoundPlay { sound } => {
                intercept(bus, &active::SoundPlaySite { sound })
            }
        }
    }

    /// Replays every line of `trace`, writing one summary line per call to
    /// `out`. Lines that are not valid records are logged and skipped.
    pub fn replay_trace<R: BufRead, W: Write>(
        &self,
        trace: R,
        out: &mut W,
    ) -> Result<ReplaySummary, ReplayError> {
        let mut summary = ReplaySummary::default();

        for (index, line) in trace.lines().enumerate() {
            let line_no = index + 1;
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let record: TraceRecord = match serde_json::from_str(&line) {
                Ok(record) => record,
                Err(source) => {
                    warn!("⚠️ {}", ReplayError::Record { line: line_no, source });
                    summary.malformed += 1;
                    continue;
                }
            };

            let outcome = self.replay_counted(line_no, &record);
            summary.calls += 1;
            if outcome.fired > 0 {
                summary.dispatched += 1;
            }
            if outcome.action.is_suppressed() {
                summary.suppressed += 1;
            }
            writeln!(out, "{outcome}")?;
        }

        Ok(summary)
    }

    fn replay_counted(&self, line: usize, record: &TraceRecord) -> ReplayLine {
        let before = self.session.bus().stats().fires;
        let interception = self.replay(record);
        let fired = (self.session.bus().stats().fires - before) as usize;
        ReplayLine {
            line,
            event: interception.event,
            fired: if interception.dispatched { fired.max(1) } else { 0 },
            action: interception.action,
        }
    }

    #[cfg(feature = "legacy-host")]
    fn render_entity(
        &self,
        entity: Option<&RecordedEntity>,
        tick_delta: f32,
        matrices: Transform,
    ) -> Interception {
        let Some(entity) = entity else {
            return filtered(EventName::RenderEntity);
        };
        intercept(
            self.session.bus(),
            &active::EntityRenderSite {
                entity,
                tick_delta,
                matrices,
            },
        )
    }

    #[cfg(not(feature = "legacy-host"))]
    fn render_entity(
        &self,
        entity: Option<&RecordedEntity>,
        tick_delta: f32,
        matrices: Transform,
    ) -> Interception {
        let state = tripwire_adapters::record::RecordedEntityRenderState {
            entity: entity.cloned(),
        };
        intercept(
            self.session.bus(),
            &active::EntityRenderSite {
                state: &state,
                tick_counter: &tick_delta,
                matrices,
            },
        )
    }

    #[cfg(feature = "legacy-host")]
    fn render_block_entity(
        &self,
        block_entity: Option<&RecordedBlockEntity>,
        tick_delta: f32,
        matrices: Transform,
    ) -> Interception {
        let Some(block_entity) = block_entity else {
            return filtered(EventName::RenderBlockEntity);
        };
        intercept(
            self.session.bus(),
            &active::BlockEntityRenderSite {
                block_entity,
                tick_delta,
                matrices,
            },
        )
    }

    #[cfg(not(feature = "legacy-host"))]
    fn render_block_entity(
        &self,
        block_entity: Option<&RecordedBlockEntity>,
        tick_delta: f32,
        matrices: Transform,
    ) -> Interception {
        let state = tripwire_adapters::record::RecordedBlockEntityRenderState {
            block_entity: block_entity.cloned(),
        };
        intercept(
            self.session.bus(),
            &active::BlockEntityRenderSite {
                state: &state,
                tick_counter: &tick_delta,
                matrices,
            },
        )
    }

    #[cfg(feature = "legacy-host")]
    fn world_render_start(&self, tick_delta: f32) -> Interception {
        intercept(self.session.bus(), &active::WorldRenderStartSite { tick_delta })
    }

    #[cfg(not(feature = "legacy-host"))]
    fn world_render_start(&self, tick_delta: f32) -> Interception {
        intercept(
            self.session.bus(),
            &active::WorldRenderStartSite {
                tick_counter: &tick_delta,
            },
        )
    }

    #[cfg(feature = "legacy-host")]
    fn mouse_button(&self, input: &RecordedInput, button: i32, action: i32) -> Interception {
        self.tracker.on_button(
            self.session.bus(),
            input,
            &active::MouseButtonSite { button, action },
        )
    }

    #[cfg(not(feature = "legacy-host"))]
    fn mouse_button(&self, input: &RecordedInput, button: i32, action: i32) -> Interception {
        self.tracker.on_button(
            self.session.bus(),
            input,
            &active::MouseButtonSite {
                input: active::MouseInput {
                    button,
                    modifiers: 0,
                },
                action,
            },
        )
    }

    #[cfg(feature = "legacy-host")]
    fn gui_mouse_drag(
        &self,
        x: f64,
        y: f64,
        dx: f64,
        dy: f64,
        button: i32,
        screen: Option<&RecordedScreen>,
    ) -> Interception {
        intercept(
            self.session.bus(),
            &active::GuiMouseDragSite {
                x,
                y,
                dx,
                dy,
                active_button: button,
                screen: screen.map(|s| s as &dyn tripwire_adapters::HostScreen),
            },
        )
    }

    #[cfg(not(feature = "legacy-host"))]
    fn gui_mouse_drag(
        &self,
        x: f64,
        y: f64,
        dx: f64,
        dy: f64,
        button: i32,
        screen: Option<&RecordedScreen>,
    ) -> Interception {
        intercept(
            self.session.bus(),
            &active::GuiMouseDragSite {
                x,
                y,
                dx,
                dy,
                active_button: active::MouseInput {
                    button,
                    modifiers: 0,
                },
                screen: screen.map(|s| s as &dyn tripwire_adapters::HostScreen),
            },
        )
    }

    #[cfg(feature = "legacy-host")]
    fn gui_mouse_click(
        &self,
        x: f64,
        y: f64,
        button: i32,
        pressed: bool,
        screen: &RecordedScreen,
    ) -> Interception {
        intercept(
            self.session.bus(),
            &active::GuiMouseClickSite {
                x,
                y,
                button,
                pressed,
                screen,
            },
        )
    }

    #[cfg(not(feature = "legacy-host"))]
    fn gui_mouse_click(
        &self,
        x: f64,
        y: f64,
        button: i32,
        pressed: bool,
        screen: &RecordedScreen,
    ) -> Interception {
        intercept(
            self.session.bus(),
            &active::GuiMouseClickSite {
                click: active::MouseClick {
                    x,
                    y,
                    input: active::MouseInput {
                        button,
                        modifiers: 0,
                    },
                },
                pressed,
                screen,
            },
        )
    }
}

#[cfg(feature = "legacy-host")]
fn filtered(event: EventName) -> Interception {
    Interception {
        event,
        dispatched: false,
        action: HostAction::Proceed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tripwire_events::{BusConfig, Payload};

    fn replayer() -> Replayer {
        Replayer::new(&AppConfig::default())
    }

    #[test]
    fn records_parse_from_json_lines() {
        let record: TraceRecord = serde_json::from_str(
            r#"{"site":"packet_received","side":"serverbound","packet":{"kind":"HandshakeC2SPacket","handle":1}}"#,
        )
        .unwrap();
        assert!(matches!(
            record,
            TraceRecord::PacketReceived {
                side: NetworkSide::Serverbound,
                ..
            }
        ));

        let record: TraceRecord = serde_json::from_str(
            r#"{"site":"sound_play","sound":{"position":{"x":0.0,"y":64.0,"z":0.0},"id":"minecraft:ui.button.click","volume":0.25}}"#,
        )
        .unwrap();
        match record {
            TraceRecord::SoundPlay { sound } => {
                assert_eq!(sound.volume, Some(0.25));
                assert_eq!(sound.pitch, None);
            }
            other => panic!("unexpected record {other:?}"),
        }
    }

    #[test]
    fn outbound_received_packet_is_filtered() {
        let replayer = replayer();
        let record = TraceRecord::PacketReceived {
            side: NetworkSide::Serverbound,
            packet: RecordedPacket {
                kind: "HandshakeC2SPacket".into(),
                handle: 1,
            },
        };

        let line = replayer.replay_counted(1, &record);
        assert_eq!(line.fired, 0);
        assert_eq!(line.action, HostAction::Proceed);
        assert_eq!(line.to_string().split_whitespace().nth(2), Some("filtered"));
    }

    #[test]
    fn trace_summary_counts_calls() {
        let replayer = replayer();
        replayer.session().register(
            "test",
            EventName::BlockOutlineRender,
            Arc::new(FnListener::new("no_outline", |_, verdict| {
                verdict.cancel();
                Ok(())
            })),
        );

        let trace = [
            r#"{"site":"block_outline","pos":{"x":1,"y":2,"z":3}}"#,
            "",
            r#"{"site":"world_render_last"}"#,
            r#"{"site":"not_a_site"}"#,
            r#"{"site":"mouse_button","input":{"world_loaded":true,"cursor":[4.0,4.0]},"button":0,"action":1}"#,
            r#"{"site":"render_tick","input":{"world_loaded":true,"cursor":[6.0,4.0]}}"#,
            r#"{"site":"render_tick","input":{"world_loaded":true,"cursor":[6.0,4.0]}}"#,
        ]
        .join("\n");

        let mut out = Vec::new();
        let summary = replayer.replay_trace(trace.as_bytes(), &mut out).unwrap();

        assert_eq!(
            summary,
            ReplaySummary {
                calls: 5,
                dispatched: 4,
                suppressed: 1,
                malformed: 1,
            }
        );
        let out = String::from_utf8(out).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("block_outline_render"));
        assert!(lines[0].ends_with("suppress"));
        assert!(lines[3].contains("mouse_dragged"));
        assert!(lines[4].contains("filtered"));
    }

    #[test]
    fn cancelled_gui_click_replays_as_suppressed() {
        let replayer = replayer();
        replayer.session().register(
            "test",
            EventName::GuiMouseClick,
            Arc::new(FnListener::new("lock_inventory", |_, verdict| {
                verdict.cancel();
                Ok(())
            })),
        );

        let record: TraceRecord = serde_json::from_str(
            r#"{"site":"gui_mouse_click","x":12.0,"y":40.5,"button":0,"pressed":false,"screen":{"kind":"InventoryScreen"}}"#,
        )
        .unwrap();
        let line = replayer.replay_counted(1, &record);

        assert_eq!(line.event, EventName::GuiMouseClick);
        assert_eq!(line.fired, 1);
        assert_eq!(line.action, HostAction::Suppress);
    }

    #[test]
    fn render_entity_without_entity_is_not_dispatched() {
        let session = ScriptSession::new(BusConfig::default());
        let replayer = Replayer::with_session(session, &AppConfig::default());
        let record = TraceRecord::RenderEntity {
            entity: None,
            tick_delta: 0.5,
            transform: Transform::IDENTITY,
        };

        let outcome = replayer.replay(&record);
        assert!(!outcome.dispatched);
        assert_eq!(replayer.session().bus().stats().fires, 0);
    }

    #[test]
    fn watch_all_events_covers_every_event() {
        let replayer = replayer();
        replayer.watch_all_events();

        let registry = replayer.session().bus().registry();
        for event in EventName::ALL {
            assert_eq!(registry.listener_count(event), 1);
        }

        let verdict = replayer
            .session()
            .bus()
            .fire(EventName::WorldRenderLast, &Payload::WorldRenderLast);
        assert!(!verdict.is_cancelled());
    }
}
