use leptos::prelude::*;

/// Zoom, fit, clear and copy-path buttons above the canvas.
#[component]
pub fn ControlsBar(
	#[prop(into)] on_zoom_in: Callback<()>,
	#[prop(into)] on_zoom_out: Callback<()>,
	#[prop(into)] on_fit_view: Callback<()>,
	#[prop(into)] on_clear: Callback<()>,
	#[prop(into)] on_copy_mode_toggle: Callback<()>,
	#[prop(into)] copy_mode: Signal<bool>,
) -> impl IntoView {
	view! {
		<div class="controls-bar">
			<button class="button button--small" on:click=move |_| on_zoom_in.run(())>
				"Zoom In"
			</button>
			<button class="button button--small" on:click=move |_| on_zoom_out.run(())>
				"Zoom Out"
			</button>
			<button class="button button--small" on:click=move |_| on_fit_view.run(())>
				"Fit View"
			</button>
			<button class="button button--small" on:click=move |_| on_clear.run(())>
				"Clear"
			</button>
			<button
				class=move || {
					if copy_mode.get() {
						"button button--small button--active"
					} else {
						"button button--small"
					}
				}
				on:click=move |_| on_copy_mode_toggle.run(())
			>
				{move || if copy_mode.get() { "Copy mode: ON" } else { "Copy path" }}
			</button>
		</div>
	}
}
