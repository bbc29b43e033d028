use leptos::prelude::*;
use serde_json::Value;

use crate::components::json_input::JsonInput;
use crate::components::tree_visualizer::TreeVisualizer;
use crate::document::SAMPLE_DOCUMENT;
use crate::storage::{JSON_INPUT_KEY, use_local_storage};
use crate::theme::Theme;

/// Default Home Page
#[component]
pub fn Home(theme: RwSignal<Theme>) -> impl IntoView {
	let raw_json = use_local_storage(JSON_INPUT_KEY, SAMPLE_DOCUMENT.to_owned());
	let tree_data = RwSignal::new(None::<Value>);

	view! {
		<div class="app">
			<header class="app__header">
				<div>
					<h1>"JSON Tree Visualizer"</h1>
					<p class="subtitle">"Built with Leptos + Canvas"</p>
				</div>
				<button
					class="button theme-toggle"
					on:click=move |_| theme.update(|t| *t = t.toggled())
				>
					{move || theme.get().toggle_label()}
				</button>
			</header>

			<div class="app__panels">
				<div class="app__input">
					<JsonInput raw_json=raw_json on_visualize={move |parsed: Option<Value>| tree_data.set(parsed)} />
				</div>
				<div class="app__tree">
					<TreeVisualizer json_data=tree_data theme=theme />
				</div>
			</div>

			<footer class="app__footer">
				"Tip: Search using dot/bracket paths like "
				<code>"$.user.address.city"</code>
				" or "
				<code>"items[0].name"</code>
				"."
			</footer>
		</div>
	}
}
