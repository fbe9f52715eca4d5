//! Column pickers and the people / organization filters.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlOptionElement, HtmlSelectElement};

/// Single choice among the table's columns.
#[component]
pub fn ColumnPicker(
	label: &'static str,
	#[prop(into)] options: Signal<Vec<String>>,
	selected: RwSignal<String>,
) -> impl IntoView {
	view! {
		<label class="picker">
			<span>{label}</span>
			<select on:change=move |ev| selected.set(event_target_value(&ev))>
				{move || {
					let current = selected.get();
					options
						.get()
						.into_iter()
						.map(|column| {
							let is_selected = column == current;
							let value = column.clone();
							view! {
								<option value=value prop:selected=is_selected>
									{column}
								</option>
							}
						})
						.collect_view()
				}}
			</select>
		</label>
	}
}

fn selected_values(select: &HtmlSelectElement) -> Vec<String> {
	let options = select.selected_options();
	(0..options.length())
		.filter_map(|i| options.item(i))
		.filter_map(|el| el.dyn_into::<HtmlOptionElement>().ok())
		.map(|option| option.value())
		.collect()
}

/// Multiple choice allow-list. Nothing selected means no filtering.
#[component]
pub fn MultiFilter(
	label: &'static str,
	#[prop(into)] options: Signal<Vec<String>>,
	selected: RwSignal<Vec<String>>,
) -> impl IntoView {
	let on_change = move |ev: leptos::ev::Event| {
		let select: HtmlSelectElement = event_target(&ev);
		selected.set(selected_values(&select));
	};

	view! {
		<label class="picker">
			<span>{label} " (empty = all)"</span>
			<select multiple=true size="6" on:change=on_change>
				{move || {
					let current = selected.get();
					options
						.get()
						.into_iter()
						.map(|item| {
							let is_selected = current.contains(&item);
							let value = item.clone();
							view! {
								<option value=value prop:selected=is_selected>
									{item}
								</option>
							}
						})
						.collect_view()
				}}
			</select>
			<button
				type="button"
				class="clear"
				disabled=move || selected.with(Vec::is_empty)
				on:click=move |_| selected.set(Vec::new())
			>
				"Clear"
			</button>
		</label>
	}
}
