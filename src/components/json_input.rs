use leptos::prelude::*;
use log::info;
use serde_json::Value;

use crate::document::{SAMPLE_DOCUMENT, parse_document};

/// Text area for the raw document with Visualize, Sample JSON and Clear.
///
/// `on_visualize` receives the parsed document, or `None` when the text is
/// invalid or was cleared.
#[component]
pub fn JsonInput(
	raw_json: RwSignal<String>,
	#[prop(into)] on_visualize: Callback<Option<Value>>,
) -> impl IntoView {
	let error = RwSignal::new(None::<String>);

	let handle_visualize = move |_| {
		error.set(None);
		match raw_json.with(|raw| parse_document(raw)) {
			Ok(value) => {
				info!("visualizing document");
				on_visualize.run(Some(value));
			}
			Err(err) => {
				error.set(Some(err.to_string()));
				on_visualize.run(None);
			}
		}
	};

	let handle_sample = move |_| raw_json.set(SAMPLE_DOCUMENT.to_owned());

	let handle_clear = move |_| {
		raw_json.set(String::new());
		error.set(None);
		on_visualize.run(None);
	};

	view! {
		<div class="json-input">
			<label class="json-input__label">"JSON Input"</label>
			<textarea
				class="json-input__text"
				rows="18"
				placeholder="Paste JSON here..."
				prop:value=move || raw_json.get()
				on:input=move |ev| raw_json.set(event_target_value(&ev))
			/>
			{move || error.get().map(|msg| view! { <div class="json-input__error">{msg}</div> })}
			<div class="json-input__actions">
				<button class="button button--primary" on:click=handle_visualize>
					"Visualize"
				</button>
				<button class="button" on:click=handle_sample>
					"Sample JSON"
				</button>
				<button class="button" on:click=handle_clear>
					"Clear"
				</button>
			</div>
		</div>
	}
}
