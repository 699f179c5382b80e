// End-to-end adapter scenarios
#[cfg(test)]
mod tests {
    use crate::record::*;
    use crate::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tripwire_events::*;

    fn count_all(bus: &EventBus) -> Arc<Mutex<Vec<EventName>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        for event in EventName::ALL {
            let recorder = seen.clone();
            bus.register(
                event,
                Arc::new(FnListener::new("observer", move |payload, _| {
                    recorder.lock().unwrap().push(payload.event_name());
                    Ok(())
                })),
            );
        }
        seen
    }

    #[test_log::test]
    fn each_call_site_fires_exactly_once() {
        let bus = EventBus::default();
        let seen = count_all(&bus);
        let packet = RecordedPacket {
            kind: "PlayerMoveC2SPacket".into(),
            handle: 3,
        };
        let input = RecordedInput {
            world_loaded: true,
            cursor: (0.0, 0.0),
        };
        let screen = RecordedScreen {
            kind: "ChatScreen".into(),
        };

        intercept(&bus, &PacketSendSite { packet: &packet });
        intercept(
            &bus,
            &PacketReceiveSite {
                side: NetworkSide::Clientbound,
                packet: &packet,
            },
        );
        intercept(
            &bus,
            &RawMouseScrollSite {
                input: &input,
                horizontal: 0.0,
                vertical: -1.0,
            },
        );
        intercept(&bus, &WorldRenderLastSite);
        intercept(
            &bus,
            &BlockOutlineSite {
                pos: BlockPos::new(0, 0, 0),
            },
        );
        intercept(
            &bus,
            &mouse::legacy::GuiMouseClickSite {
                x: 8.0,
                y: 8.0,
                button: 0,
                pressed: true,
                screen: &screen,
            },
        );

        assert_eq!(
            seen.lock().unwrap().as_slice(),
            [
                EventName::PacketSent,
                EventName::PacketReceived,
                EventName::RawMouseScroll,
                EventName::WorldRenderLast,
                EventName::BlockOutlineRender,
                EventName::GuiMouseClick,
            ]
        );
        assert_eq!(bus.stats().fires, 6);
    }

    #[test_log::test]
    fn faulty_listener_does_not_break_sound_playback() {
        let bus = EventBus::default();
        let reached = Arc::new(AtomicUsize::new(0));

        bus.register(
            EventName::SoundPlay,
            Arc::new(FnListener::new("broken", |_, _| {
                Err(ListenerError::Script("undefined is not a function".into()))
            })),
        );
        let counter = reached.clone();
        bus.register(
            EventName::SoundPlay,
            Arc::new(FnListener::new("volume_check", move |payload, _| {
                if let Payload::Sound(sound) = payload {
                    assert_eq!(sound.volume, 0.0);
                    counter.fetch_add(1, Ordering::SeqCst);
                }
                Ok(())
            })),
        );

        let sound = RecordedSound {
            position: Vec3::default(),
            id: "minecraft:block.note_block.harp".into(),
            category: SoundCategory::Record,
            volume: None,
            pitch: Some(1.0),
        };
        let outcome = intercept(&bus, &active::SoundPlaySite { sound: &sound });

        assert_eq!(outcome.action, HostAction::Proceed);
        assert_eq!(reached.load(Ordering::SeqCst), 1);
        assert_eq!(bus.stats().listener_faults, 1);
    }

    #[test_log::test]
    fn frame_with_drag_and_hidden_entity() {
        let bus = EventBus::default();
        let seen = count_all(&bus);
        bus.register(
            EventName::RenderEntity,
            Arc::new(FnListener::new("hide_zombies", |payload, verdict| {
                if let Payload::RenderEntity(render) = payload {
                    if render.entity.kind == "minecraft:zombie" {
                        verdict.cancel();
                    }
                }
                Ok(())
            })),
        );

        let tracker = MouseTracker::default();
        let pressed_at = RecordedInput {
            world_loaded: true,
            cursor: (40.0, 40.0),
        };
        let moved_to = RecordedInput {
            world_loaded: true,
            cursor: (42.0, 41.0),
        };
        tracker.on_button(
            &bus,
            &pressed_at,
            &mouse::legacy::MouseButtonSite {
                button: 1,
                action: GLFW_PRESS,
            },
        );

        let zombie = RecordedEntity {
            id: 99,
            kind: "minecraft:zombie".into(),
            world: Some(RecordedWorld { client: true }),
        };
        let render = intercept(
            &bus,
            &render::legacy::EntityRenderSite {
                entity: &zombie,
                tick_delta: 0.5,
                matrices: Transform::IDENTITY,
            },
        );
        let drags = tracker.on_render_tick(&bus, &moved_to);

        assert_eq!(render.action, HostAction::Suppress);
        assert_eq!(drags, 1);
        assert_eq!(
            seen.lock().unwrap().as_slice(),
            [
                EventName::RawMouseInput,
                EventName::RenderEntity,
                EventName::MouseDragged,
            ]
        );
    }

    #[test]
    fn host_action_serializes_for_traces() {
        let json = serde_json::to_value(HostAction::Return(Value::SoundPlayResult(
            PlayResult::NotStarted,
        )))
        .unwrap();
        assert_eq!(json["action"], "return");
        assert_eq!(json["value"]["type"], "sound_play_result");
        assert_eq!(json["value"]["value"], "not_started");
    }

    #[test]
    fn active_variant_is_named() {
        assert!(["legacy", "modern"].contains(&active::HOST_VARIANT));
    }
}
