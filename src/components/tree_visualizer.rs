use leptos::ev::KeyboardEvent;
use leptos::prelude::*;
use log::{info, warn};
use serde_json::Value;
use thiserror::Error;
use wasm_bindgen_futures::{JsFuture, spawn_local};

use super::controls_bar::ControlsBar;
use super::tree_canvas::{TreeCanvas, ViewCommand};
use crate::theme::Theme;
use crate::tree::{self, Resolution, TreeGraph};

/// Status line after a search.
fn search_message(graph: &TreeGraph, query: &str) -> (Option<String>, String) {
	match tree::resolve(&graph.nodes, query) {
		Resolution::EmptyQuery => (None, "Please enter a path".to_owned()),
		Resolution::NoMatch => (None, "No match found".to_owned()),
		Resolution::Found(node) => {
			let more = tree::candidates(&graph.nodes, query).len() - 1;
			let message = match more {
				0 => format!("Match found: {}", node.path),
				more => format!("Match found: {} (+{more} more)", node.path),
			};
			(Some(node.id.clone()), message)
		}
	}
}

/// Clipboard write that did not go through.
#[derive(Debug, Error)]
enum ClipboardError {
	#[error("no browser window")]
	NoWindow,
	#[error("clipboard write rejected: {0}")]
	Rejected(String),
}

async fn copy_to_clipboard(text: &str) -> Result<(), ClipboardError> {
	let window = web_sys::window().ok_or(ClipboardError::NoWindow)?;
	let promise = window.navigator().clipboard().write_text(text);
	JsFuture::from(promise)
		.await
		.map(|_| ())
		.map_err(|err| ClipboardError::Rejected(format!("{err:?}")))
}

fn copy_message(path: &str, outcome: &Result<(), ClipboardError>) -> String {
	match outcome {
		Ok(()) => format!("Copied path: {path}"),
		Err(err) => format!("Could not copy path: {err}"),
	}
}

/// Search box, controls and canvas for the current document.
#[component]
pub fn TreeVisualizer(
	#[prop(into)] json_data: Signal<Option<Value>>,
	#[prop(into)] theme: Signal<Theme>,
) -> impl IntoView {
	let graph = RwSignal::new(TreeGraph::default());
	let search = RwSignal::new(String::new());
	let message = RwSignal::new(String::new());
	let highlighted = RwSignal::new(None::<String>);
	let command = RwSignal::new(None::<ViewCommand>);
	let copy_mode = RwSignal::new(false);

	Effect::new(move |_| {
		json_data.with(|data| match data {
			Some(value) => {
				let built = tree::build(value);
				message.set(format!("Tree generated — {} nodes", built.nodes.len()));
				graph.set(built);
			}
			None => {
				graph.set(TreeGraph::default());
				message.set("No tree to show".to_owned());
			}
		});
		highlighted.set(None);
	});

	let handle_search = move || {
		let (hit, text) = graph.with(|g| search.with(|q| search_message(g, q)));
		message.set(text);
		highlighted.set(hit.clone());
		if let Some(id) = hit {
			command.set(Some(ViewCommand::Focus(id)));
		}
	};

	let on_node_click = move |id: String| {
		if !copy_mode.get_untracked() {
			return;
		}
		let path = graph.with_untracked(|g| g.node(&id).map(|n| n.path.clone()));
		let Some(path) = path else {
			return;
		};
		copy_mode.set(false);
		spawn_local(async move {
			let outcome = copy_to_clipboard(&path).await;
			match &outcome {
				Ok(()) => info!("copied path {path:?}"),
				Err(err) => warn!("could not copy path {path:?}: {err}"),
			}
			message.set(copy_message(&path, &outcome));
		});
	};

	let handle_clear = move |()| {
		graph.set(TreeGraph::default());
		highlighted.set(None);
		message.set("Cleared".to_owned());
	};

	view! {
		<div class="tree-visualizer">
			<div class="tree-visualizer__toolbar">
				<div class="tree-visualizer__search">
					<input
						class="search-input"
						placeholder="Search path (e.g. $.user.address.city or items[0].name)"
						prop:value=move || search.get()
						on:input=move |ev| search.set(event_target_value(&ev))
						on:keydown=move |ev: KeyboardEvent| {
							if ev.key() == "Enter" {
								handle_search();
							}
						}
					/>
					<button class="button button--primary" on:click=move |_| handle_search()>
						"Search"
					</button>
				</div>
				<ControlsBar
					on_zoom_in=move |()| command.set(Some(ViewCommand::ZoomIn))
					on_zoom_out=move |()| command.set(Some(ViewCommand::ZoomOut))
					on_fit_view=move |()| command.set(Some(ViewCommand::FitView))
					on_clear=handle_clear
					on_copy_mode_toggle=move |()| copy_mode.update(|on| *on = !*on)
					copy_mode=copy_mode
				/>
			</div>
			<div class="tree-visualizer__canvas">
				<TreeCanvas
					data=graph
					selected=highlighted
					command=command
					theme=theme
					on_node_click=on_node_click
				/>
			</div>
			<div class="tree-visualizer__message">{move || message.get()}</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn search_messages() {
		let graph = tree::build(&json!({"items": [{"name": "pen"}, {"name": "book"}]}));
		assert_eq!(
			search_message(&graph, ""),
			(None, "Please enter a path".to_owned())
		);
		assert_eq!(
			search_message(&graph, "missing"),
			(None, "No match found".to_owned())
		);
		assert_eq!(
			search_message(&graph, "items[1].name"),
			(Some("6".to_owned()), "Match found: items.1.name".to_owned())
		);
		assert_eq!(
			search_message(&graph, "name"),
			(Some("4".to_owned()), "Match found: items.0.name (+1 more)".to_owned())
		);
	}

	#[test]
	fn copy_messages_report_failures() {
		assert_eq!(copy_message("user.name", &Ok(())), "Copied path: user.name");
		let rejected = Err(ClipboardError::Rejected("NotAllowedError".to_owned()));
		assert_eq!(
			copy_message("user.name", &rejected),
			"Could not copy path: clipboard write rejected: NotAllowedError"
		);
		assert_eq!(
			copy_message("a", &Err(ClipboardError::NoWindow)),
			"Could not copy path: no browser window"
		);
	}
}
