use shared::{DrawReport, DrawTermination, SpinOutcome};
use yew::prelude::*;

use crate::styles;

/// Banner text for a draw that did not produce every requested winner.
pub fn draw_notice(report: &DrawReport) -> Option<String> {
    match report.termination {
        DrawTermination::Completed => None,
        DrawTermination::Exhausted { requested, drawn } => Some(format!(
            "Only {} of {} winners could be drawn: the wheel ran out of entries.",
            drawn, requested
        )),
        DrawTermination::Cancelled => Some(format!(
            "Draw stopped after {} winner{}.",
            report.winners.len(),
            if report.winners.len() == 1 { "" } else { "s" }
        )),
    }
}

#[derive(Properties, PartialEq)]
pub struct WinnersListProps {
    pub winners: Vec<SpinOutcome>,
}

#[function_component(WinnersList)]
pub fn winners_list(props: &WinnersListProps) -> Html {
    if props.winners.is_empty() {
        return html! {};
    }

    html! {
        <div class="mt-6">
            <h3 class={styles::TEXT_H3}>{"Winners"}</h3>
            <ul class="mt-3 space-y-2">
                { for props.winners.iter().map(|winner| html! {
                    <li key={winner.rank.to_string()} class={styles::WINNER_ITEM}>{ winner.display_line() }</li>
                }) }
            </ul>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SpinButtonProps {
    pub is_spinning: bool,
    pub onclick: Callback<MouseEvent>,
}

#[function_component(SpinButton)]
pub fn spin_button(props: &SpinButtonProps) -> Html {
    let button_text = if props.is_spinning { "Spinning..." } else { "Spin" };

    let button_class = if props.is_spinning {
        "bg-gradient-to-r from-gray-400 to-gray-500 opacity-75 cursor-not-allowed text-white"
    } else {
        "bg-gradient-to-r from-yellow-400 to-orange-500 hover:from-yellow-500 hover:to-orange-600 text-white shadow-lg hover:shadow-xl transform hover:-translate-y-0.5 active:translate-y-0"
    };

    let spin_icon_class = if props.is_spinning {
        "inline-block mr-2 animate-spin"
    } else {
        "hidden"
    };

    html! {
        <div class={classes!("relative", "overflow-hidden", "rounded-full", "w-full", button_class)}>
            <button
                onclick={props.onclick.clone()}
                disabled={props.is_spinning}
                class="relative w-full px-8 py-4 font-bold text-lg transition-all duration-300 focus:outline-none focus:ring-4 focus:ring-yellow-300 bg-transparent"
            >
                <div class="flex items-center justify-center">
                    <svg class={spin_icon_class} xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                        <circle cx="12" cy="12" r="10" />
                        <path d="M12 6v6l4 2" />
                    </svg>
                    <span>{button_text}</span>
                </div>
            </button>
        </div>
    }
}
