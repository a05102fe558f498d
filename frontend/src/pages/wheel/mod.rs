mod host;
mod wheel_canvas;
mod wheel_utils;

use std::time::Duration;

use gloo_render::{request_animation_frame, AnimationFrame};
use log::{error, info};
use rand::rngs::SmallRng;
use rand::{thread_rng, SeedableRng};
use shared::validation::parse_winner_count;
use shared::{
    segment_under_pointer, CancelToken, DrawController, DrawLock, DrawPolicy, DrawReport, Easing,
    Segment, SpinOutcome, WheelError, WheelState,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::config::{get_asset_url, load_policy, SPINNER_SOUND_PATH};
use crate::styles;
use host::{BrowserHost, GlooClock, SpinnerSound};
use wheel_canvas::WheelCanvas;
use wheel_utils::{draw_notice, SpinButton, WinnersList};

pub enum Msg {
    EntriesInput(String),
    UpdateEntries,
    WinnerCountInput(String),
    StartDraw,
    StopDraw,
    // Sent by the running draw
    Segments(Vec<Segment>),
    ResetRotation,
    Animate {
        target_angle: f64,
        duration: Duration,
        easing: Easing,
    },
    Frame,
    Playing(bool),
    ClearWinners,
    Winner(SpinOutcome),
    DrawFinished(Result<DrawReport, WheelError>),
}

/// An in-flight rotation, interpolated from 0 on every animation frame.
#[derive(Clone, Copy)]
struct ActiveSpin {
    target_angle: f64,
    started_at: f64,
    duration_ms: f64,
    easing: Easing,
}

pub struct WheelPage {
    wheel: WheelState,
    segments: Vec<Segment>,
    rotation: f64,
    /// Segment under the pointer while its winner waits to be removed.
    highlight: Option<usize>,
    active_spin: Option<ActiveSpin>,
    _frame: Option<AnimationFrame>,
    is_playing: bool,
    entries_text: String,
    winner_count_text: String,
    winners: Vec<SpinOutcome>,
    error_message: Option<String>,
    notice: Option<String>,
    policy: DrawPolicy,
    lock: DrawLock,
    cancel: Option<CancelToken>,
    sound: SpinnerSound,
}

impl WheelPage {
    fn is_drawing(&self) -> bool {
        self.lock.is_held()
    }

    fn request_frame(&mut self, ctx: &Context<Self>) {
        let link = ctx.link().clone();
        self._frame = Some(request_animation_frame(move |_| link.send_message(Msg::Frame)));
    }

    fn start_draw(&mut self, ctx: &Context<Self>) -> Result<(), WheelError> {
        let requested = parse_winner_count(&self.winner_count_text)?;
        let guard = self.lock.try_acquire()?;
        let mut controller = DrawController::new(GlooClock, SmallRng::from_entropy(), self.policy)?;

        self.cancel = Some(controller.cancel_token());
        self.notice = None;

        let state = self.wheel.clone();
        let mut host = BrowserHost::new(ctx.link().clone());
        let link = ctx.link().clone();
        spawn_local(async move {
            let result = controller.run_draw(state, requested, &mut host).await;
            drop(guard);
            link.send_message(Msg::DrawFinished(result));
        });
        Ok(())
    }
}

impl Component for WheelPage {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let wheel = WheelState::with_default_entries(&mut thread_rng());
        Self {
            segments: wheel.segments(),
            entries_text: wheel.to_text(),
            wheel,
            rotation: 0.0,
            highlight: None,
            active_spin: None,
            _frame: None,
            is_playing: false,
            winner_count_text: "1".to_string(),
            winners: Vec::new(),
            error_message: None,
            notice: None,
            policy: load_policy(),
            lock: DrawLock::new(),
            cancel: None,
            sound: SpinnerSound::load(&get_asset_url(SPINNER_SOUND_PATH)),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::EntriesInput(text) => {
                self.entries_text = text;
                false
            }
            Msg::UpdateEntries => {
                if self.is_drawing() {
                    self.error_message = Some(WheelError::DrawInProgress.user_message());
                    return true;
                }
                match self.wheel.regenerate(&self.entries_text, &mut thread_rng()) {
                    Ok(count) => {
                        info!("wheel updated with {} entries", count);
                        self.segments = self.wheel.segments();
                        self.error_message = None;
                    }
                    Err(err) => self.error_message = Some(err.user_message()),
                }
                true
            }
            Msg::WinnerCountInput(text) => {
                self.winner_count_text = text;
                false
            }
            Msg::StartDraw => {
                match self.start_draw(ctx) {
                    Ok(()) => self.error_message = None,
                    Err(err) => self.error_message = Some(err.user_message()),
                }
                true
            }
            Msg::StopDraw => {
                if let Some(cancel) = &self.cancel {
                    cancel.cancel();
                    self.notice = Some("Stopping after the current spin...".to_string());
                }
                true
            }
            Msg::Segments(segments) => {
                self.segments = segments;
                self.highlight = None;
                true
            }
            Msg::ResetRotation => {
                self.active_spin = None;
                self._frame = None;
                self.rotation = 0.0;
                self.highlight = None;
                true
            }
            Msg::Animate { target_angle, duration, easing } => {
                self.active_spin = Some(ActiveSpin {
                    target_angle,
                    started_at: js_sys::Date::now(),
                    duration_ms: duration.as_millis() as f64,
                    easing,
                });
                self.request_frame(ctx);
                false
            }
            Msg::Frame => {
                let Some(spin) = self.active_spin else {
                    return false;
                };
                let progress = (js_sys::Date::now() - spin.started_at) / spin.duration_ms;
                self.rotation = spin.target_angle * spin.easing.apply(progress);
                if progress < 1.0 {
                    self.request_frame(ctx);
                } else {
                    self.active_spin = None;
                    self._frame = None;
                }
                true
            }
            Msg::Playing(is_playing) => {
                self.is_playing = is_playing;
                if is_playing {
                    self.sound.play();
                } else {
                    self.sound.stop();
                    // The spin has settled; land exactly on the planned angle
                    if let Some(spin) = self.active_spin.take() {
                        self.rotation = spin.target_angle;
                        self._frame = None;
                    }
                }
                true
            }
            Msg::ClearWinners => {
                self.winners.clear();
                true
            }
            Msg::Winner(outcome) => {
                self.highlight = segment_under_pointer(self.rotation, self.segments.len());
                self.winners.push(outcome);
                true
            }
            Msg::DrawFinished(result) => {
                self.cancel = None;
                self.is_playing = false;
                self.sound.stop();
                match result {
                    Ok(report) => {
                        self.notice = draw_notice(&report);
                        self.wheel = report.remaining;
                        self.segments = self.wheel.segments();
                        self.entries_text = self.wheel.to_text();
                    }
                    Err(err) => {
                        error!("draw failed: {}", err);
                        self.notice = None;
                        self.error_message = Some(err.user_message());
                    }
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let is_drawing = self.is_drawing();

        let on_entries_input = ctx.link().callback(|e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            Msg::EntriesInput(input.value())
        });
        let on_winner_count_input = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::WinnerCountInput(input.value())
        });
        let on_update = ctx.link().callback(|_: MouseEvent| Msg::UpdateEntries);
        let on_spin = ctx.link().callback(|_: MouseEvent| Msg::StartDraw);
        let on_stop = ctx.link().callback(|_: MouseEvent| Msg::StopDraw);

        html! {
            <div class="max-w-6xl mx-auto">
                <h1 class={classes!(styles::TEXT_H1, "mb-6", "text-center")}>{"Wheel of Winners"}</h1>

                if let Some(error) = &self.error_message {
                    <div class={classes!(styles::ALERT_ERROR, "mb-4")}>{error}</div>
                }
                if let Some(notice) = &self.notice {
                    <div class={styles::ALERT_WARNING}>{notice}</div>
                }

                <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                    <div class={classes!(styles::CARD, "lg:col-span-2", "flex", "justify-center")}>
                        <WheelCanvas
                            segments={self.segments.clone()}
                            rotation={self.rotation}
                            highlight={self.highlight}
                            is_spinning={self.is_playing}
                        />
                    </div>

                    <div class={styles::CARD}>
                        <label class={styles::TEXT_LABEL} for="wallet-addresses">{"Wallet addresses (one per line)"}</label>
                        <textarea
                            id="wallet-addresses"
                            class={styles::TEXTAREA}
                            value={self.entries_text.clone()}
                            oninput={on_entries_input}
                            disabled={is_drawing}
                        />
                        <button
                            type="button"
                            class={classes!(styles::BUTTON_SECONDARY, "mt-3", "w-full")}
                            onclick={on_update}
                            disabled={is_drawing}
                        >
                            {"Update Wallet Addresses"}
                        </button>
                        <p class={styles::TEXT_HINT}>{format!("{} entries on the wheel", self.segments.len())}</p>

                        <label class={classes!(styles::TEXT_LABEL, "mt-6")} for="num-winners">{"Number of winners"}</label>
                        <input
                            id="num-winners"
                            type="number"
                            min="1"
                            class={styles::INPUT}
                            value={self.winner_count_text.clone()}
                            oninput={on_winner_count_input}
                            disabled={is_drawing}
                        />

                        <div class="mt-6">
                            <SpinButton is_spinning={is_drawing} onclick={on_spin} />
                        </div>
                        if is_drawing {
                            <button
                                type="button"
                                class={classes!(styles::BUTTON_DANGER, "mt-3", "w-full")}
                                onclick={on_stop}
                                disabled={self.cancel.as_ref().map_or(true, CancelToken::is_cancelled)}
                            >
                                {"Stop"}
                            </button>
                        }

                        <WinnersList winners={self.winners.clone()} />
                    </div>
                </div>
            </div>
        }
    }
}
