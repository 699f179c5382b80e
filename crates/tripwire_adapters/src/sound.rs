//! Sound playback adapter
//!
//! Volume and pitch are read through [`read_or_default`]: a sound whose
//! accessor fails still fires, with that field at zero.

use crate::host::HostSound;
use compact_str::CompactString;
use tripwire_events::{read_or_default, Payload, SoundPayload};

fn sound_payload(sound: &dyn HostSound) -> Option<Payload> {
    Some(Payload::Sound(SoundPayload {
        position: sound.position(),
        id: CompactString::new(sound.id()),
        volume: read_or_default("volume", || sound.volume()),
        pitch: read_or_default("pitch", || sound.pitch()),
        category: sound.category(),
    }))
}

pub mod legacy {
    use super::sound_payload;
    use crate::adapter::CallSite;
    use crate::host::HostSound;
    use tripwire_events::{EventName, Payload};

    /// `play` returns nothing on the older host; cancelling just skips it.
    pub struct SoundPlaySite<'a> {
        pub sound: &'a dyn HostSound,
    }

    impl CallSite for SoundPlaySite<'_> {
        const EVENT: EventName = EventName::SoundPlay;

        fn payload(&self) -> Option<Payload> {
            sound_payload(self.sound)
        }
    }
}

pub mod modern {
    use super::sound_payload;
    use crate::adapter::{CallSite, HostAction};
    use crate::host::HostSound;
    use tracing::warn;
    use tripwire_events::{EventName, Payload, PlayResult, Value, Verdict};

    /// `play` returns a play result on the current host. A cancelled call
    /// returns the listener's replacement result, or `NotStarted`.
    pub struct SoundPlaySite<'a> {
        pub sound: &'a dyn HostSound,
    }

    impl CallSite for SoundPlaySite<'_> {
        const EVENT: EventName = EventName::SoundPlay;

        fn payload(&self) -> Option<Payload> {
            sound_payload(self.sound)
        }

        fn enact(&self, mut verdict: Verdict) -> HostAction {
            if !verdict.is_cancelled() {
                return HostAction::Proceed;
            }

            let result = match verdict.take_replacement() {
                Some(Value::SoundPlayResult(result)) => result,
                Some(other) => {
                    warn!(
                        sound = self.sound.id(),
                        "⚠️ Ignoring non play-result replacement {:?}", other
                    );
                    PlayResult::NotStarted
                }
                None => PlayResult::NotStarted,
            };
            HostAction::Return(Value::SoundPlayResult(result))
        }
    }
}
