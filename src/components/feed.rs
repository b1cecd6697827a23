//! Good Things Feed Components
//!
//! The user's recent records and other people's entries.

use leptos::*;

use crate::feed::{DisplayEntry, OwnRow};

/// The user's latest records, newest first
#[component]
pub fn OwnList(
    #[prop(into)] rows: Signal<Vec<OwnRow>>,
    #[prop(into)] loaded: Signal<bool>,
) -> impl IntoView {
    view! {
        <ul class="space-y-3">
            {move || {
                let rows = rows.get();
                if rows.is_empty() {
                    let message = if loaded.get() { "No records yet." } else { "Loading..." };
                    return view! { <li class="text-gray-400">{message}</li> }.into_view();
                }

                rows.into_iter()
                    .map(|row| match row {
                        OwnRow::Positives(lines) => view! {
                            <li class="bg-gray-700 rounded-lg p-3 space-y-1">
                                {lines.into_iter()
                                    .map(|line| view! { <p>{line}</p> })
                                    .collect_view()}
                            </li>
                        }.into_view(),
                        OwnRow::Empty => view! {
                            <li class="bg-gray-700 rounded-lg p-3 text-gray-400 italic">"(empty)"</li>
                        }.into_view(),
                    })
                    .collect_view()
            }}
        </ul>
    }
}

/// Entries from other people, in the order the backend sent them
#[component]
pub fn OthersList(
    #[prop(into)] entries: Signal<Vec<DisplayEntry>>,
    #[prop(into)] loaded: Signal<bool>,
) -> impl IntoView {
    view! {
        <ul class="space-y-3">
            {move || {
                let entries = entries.get();
                if entries.is_empty() {
                    let message = if loaded.get() { "Nothing shared yet." } else { "Loading..." };
                    return view! { <li class="text-gray-400">{message}</li> }.into_view();
                }

                entries.into_iter()
                    .map(|entry| view! {
                        <li class="bg-gray-700 rounded-lg p-3 flex items-center justify-between gap-3">
                            <span>{entry.text}</span>
                            {entry.genre.map(|genre| view! {
                                <span class="px-2 py-0.5 rounded-full bg-gray-600 text-xs text-gray-200">
                                    {genre}
                                </span>
                            })}
                        </li>
                    })
                    .collect_view()
            }}
        </ul>
    }
}
