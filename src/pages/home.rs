use leptos::prelude::*;
use log::{debug, info, warn};

use crate::analysis::{
	Category, ColumnSelection, Figure, FilterOptions, GraphStats, LayoutConfig, NormalizedRow,
	Palette, RowFilter, analyze, normalize,
};
use crate::components::controls::{ColumnPicker, MultiFilter};
use crate::components::force_graph::ForceGraphCanvas;
use crate::components::upload::{FileUpload, LoadedFile};
use crate::error::{AnalysisError, LoadError};

#[derive(Clone, Copy, Debug, PartialEq)]
struct RunSummary {
	matched_rows: usize,
	stats: GraphStats,
}

fn legend() -> impl IntoView {
	let palette = Palette::default();
	Category::ALL
		.into_iter()
		.map(|category| {
			let style = format!("background: {}", palette.color(category));
			view! {
				<span class="legend-item">
					<span class="swatch" style=style></span>
					{category.key()}
				</span>
			}
		})
		.collect_view()
}

/// Upload, choose columns and filters, then run the network analysis.
#[component]
pub fn Home() -> impl IntoView {
	let loaded = RwSignal::new(None::<LoadedFile>);
	let load_error = RwSignal::new(None::<LoadError>);
	let (person_col, org_col, theme_col) = (
		RwSignal::new(String::new()),
		RwSignal::new(String::new()),
		RwSignal::new(String::new()),
	);
	let selected_people = RwSignal::new(Vec::<String>::new());
	let selected_orgs = RwSignal::new(Vec::<String>::new());
	let figure = RwSignal::new(Figure::default());
	let summary = RwSignal::new(None::<RunSummary>);

	let on_load = Callback::new(move |result: Result<LoadedFile, LoadError>| {
		selected_people.set(Vec::new());
		selected_orgs.set(Vec::new());
		match result {
			Ok(file) => {
				if let Some(sel) = ColumnSelection::first_three(&file.table) {
					person_col.set(sel.person);
					org_col.set(sel.organization);
					theme_col.set(sel.theme);
				}
				load_error.set(None);
				loaded.set(Some(file));
			}
			Err(err) => {
				loaded.set(None);
				load_error.set(Some(err));
			}
		}
	});

	let columns = Signal::derive(move || {
		loaded.with(|f| {
			f.as_ref()
				.map(|f| f.table.columns().to_vec())
				.unwrap_or_default()
		})
	});
	let selection = Memo::new(move |_| ColumnSelection {
		person: person_col.get(),
		organization: org_col.get(),
		theme: theme_col.get(),
	});
	let rows: Memo<Option<Result<Vec<NormalizedRow>, AnalysisError>>> = Memo::new(move |_| {
		loaded.with(|f| {
			f.as_ref()
				.map(|f| selection.with(|sel| normalize(&f.table, sel)))
		})
	});
	let options = Memo::new(move |_| {
		rows.with(|r| match r {
			Some(Ok(rows)) => FilterOptions::from_rows(rows),
			_ => FilterOptions::default(),
		})
	});

	// Selections no longer offered by the pickers are dropped.
	Effect::new(move |_| {
		let pruned = options.with(|o| {
			o.retain_known(&RowFilter::new(
				selected_people.get_untracked(),
				selected_orgs.get_untracked(),
			))
		});
		if selected_people.with_untracked(|p| *p != pruned.people) {
			debug!("dropping stale people selections");
			selected_people.set(pruned.people);
		}
		if selected_orgs.with_untracked(|o| *o != pruned.orgs) {
			debug!("dropping stale organization selections");
			selected_orgs.set(pruned.orgs);
		}
	});

	// Any change of input or filters discards the previous result.
	Effect::new(move |_| {
		loaded.track();
		selection.track();
		selected_people.track();
		selected_orgs.track();
		figure.set(Figure::default());
		summary.set(None);
	});

	let run = move |_| {
		let filter = options.with_untracked(|o| {
			o.retain_known(&RowFilter::new(
				selected_people.get_untracked(),
				selected_orgs.get_untracked(),
			))
		});
		rows.with_untracked(|r| match r {
			Some(Ok(rows)) => {
				let analysis = analyze(rows, &filter, &LayoutConfig::default());
				summary.set(Some(RunSummary {
					matched_rows: analysis.matched_rows,
					stats: analysis.stats(),
				}));
				figure.set(analysis.figure);
			}
			Some(Err(err)) => warn!("cannot run analysis: {err}"),
			None => info!("no file loaded"),
		});
	};

	let ready = move || rows.with(|r| matches!(r, Some(Ok(_))));

	view! {
		<div class="layout">
			<aside class="controls">
				<h1>"Network analysis"</h1>
				<p class="subtitle">"People, organizations and themes from a spreadsheet"</p>

				<FileUpload on_load=on_load />
				{move || {
					load_error
						.get()
						.map(|err| view! { <p class="error">{err.to_string()}</p> })
				}}
				{move || {
					loaded
						.with(|f| {
							f.as_ref()
								.map(|f| {
									format!(
										"Loaded {}: {} rows, {} columns",
										f.name,
										f.table.len(),
										f.table.columns().len(),
									)
								})
						})
						.map(|notice| view! { <p class="notice">{notice}</p> })
				}}

				<Show when=move || loaded.with(Option::is_some)>
					<h2>"Columns"</h2>
					<ColumnPicker label="Person column" options=columns selected=person_col />
					<ColumnPicker label="Organization column" options=columns selected=org_col />
					<ColumnPicker label="Theme column" options=columns selected=theme_col />

					<ErrorBoundary fallback=|errors| {
						view! {
							<ul class="error">
								{move || {
									errors
										.get()
										.into_iter()
										.map(|(_, e)| view! { <li>{e.to_string()}</li> })
										.collect_view()
								}}
							</ul>
						}
					}>
						{move || {
							rows.get()
								.map(|r| {
									r.map(|rows| view! { <p class="notice">{rows.len()} " usable rows"</p> })
								})
						}}
					</ErrorBoundary>

					<h2>"Filters"</h2>
					<MultiFilter
						label="People"
						options=Signal::derive(move || options.with(|o| o.people.clone()))
						selected=selected_people
					/>
					<MultiFilter
						label="Organizations"
						options=Signal::derive(move || options.with(|o| o.orgs.clone()))
						selected=selected_orgs
					/>

					<button class="run" disabled=move || !ready() on:click=run>
						"Run analysis"
					</button>
				</Show>

				{move || {
					summary
						.get()
						.map(|s| {
							view! {
								<dl class="summary">
									<dt>"Matched rows"</dt>
									<dd>{s.matched_rows}</dd>
									<dt>"People"</dt>
									<dd>{s.stats.people}</dd>
									<dt>"Organizations"</dt>
									<dd>{s.stats.organizations}</dd>
									<dt>"Themes"</dt>
									<dd>{s.stats.themes}</dd>
									<dt>"Edges"</dt>
									<dd>{s.stats.edges}</dd>
								</dl>
							}
						})
				}}
				<div class="legend">{legend()}</div>
			</aside>

			<main class="graph">
				<ForceGraphCanvas data=figure />
			</main>
		</div>
	}
}
