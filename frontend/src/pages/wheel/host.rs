use std::time::Duration;

use futures::future::{FutureExt, LocalBoxFuture};
use gloo_timers::future::TimeoutFuture;
use shared::{Clock, Easing, Segment, SoundCue, SpinOutcome, WheelSurface, WinnersDisplay};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::HtmlAudioElement;
use yew::html::Scope;

use super::{Msg, WheelPage};

/// Browser timers for the draw controller.
pub struct GlooClock;

impl Clock for GlooClock {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis).boxed_local()
    }
}

/// Forwards everything the draw does to the page component as messages, so
/// the running draw never holds a borrow of component state.
pub struct BrowserHost {
    link: Scope<WheelPage>,
}

impl BrowserHost {
    pub fn new(link: Scope<WheelPage>) -> Self {
        Self { link }
    }
}

impl WheelSurface for BrowserHost {
    fn render(&mut self, segments: &[Segment]) {
        self.link.send_message(Msg::Segments(segments.to_vec()));
    }

    fn reset_rotation(&mut self) {
        self.link.send_message(Msg::ResetRotation);
    }

    fn animate_rotation(&mut self, target_angle: f64, duration: Duration, easing: Easing) {
        self.link.send_message(Msg::Animate {
            target_angle,
            duration,
            easing,
        });
    }
}

impl SoundCue for BrowserHost {
    fn start_sound(&mut self) {
        self.link.send_message(Msg::Playing(true));
    }

    fn stop_sound(&mut self) {
        self.link.send_message(Msg::Playing(false));
    }
}

impl WinnersDisplay for BrowserHost {
    fn clear_winners(&mut self) {
        self.link.send_message(Msg::ClearWinners);
    }

    fn show_winner(&mut self, outcome: &SpinOutcome) {
        self.link.send_message(Msg::Winner(outcome.clone()));
    }
}

/// The looping spinner sound. Missing or blocked audio just means silence.
#[derive(Clone)]
pub struct SpinnerSound {
    audio: Option<HtmlAudioElement>,
}

impl SpinnerSound {
    pub fn load(url: &str) -> Self {
        let audio = match HtmlAudioElement::new_with_src(url) {
            Ok(audio) => {
                audio.set_loop(true);
                Some(audio)
            }
            Err(err) => {
                log::warn!("spinner sound unavailable: {:?}", err);
                None
            }
        };
        Self { audio }
    }

    pub fn play(&self) {
        let Some(audio) = &self.audio else {
            return;
        };
        match audio.play() {
            Ok(promise) => spawn_local(async move {
                if let Err(err) = JsFuture::from(promise).await {
                    log::warn!("spinner sound blocked: {:?}", err);
                }
            }),
            Err(err) => log::warn!("spinner sound failed to start: {:?}", err),
        }
    }

    pub fn stop(&self) {
        if let Some(audio) = &self.audio {
            let _ = audio.pause();
            audio.set_current_time(0.0);
        }
    }
}
